// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Logging facade for Loom components.
//!
//! Components obtain named loggers when they are constructed, which is
//! often before the application has configured a logging backend. This
//! crate provides:
//! - [`Logger`] / [`LoggerExt`] - the logging primitive and per-level helpers
//! - [`LoggerFactory`] - the contract every backend implements
//! - [`WrappingLogger`] - a handle whose backing logger can be swapped
//! - [`BufferingLoggerFactory`] - buffers records until a backend is bound
//! - [`LazyLoggerFactory`] - a factory whose backend is set later
//! - [`VoidLoggerFactory`] - a backend that discards everything
//!
//! # Usage
//!
//! ```
//! use std::sync::Arc;
//! use loom_common_logger::{LazyLoggerFactory, LoggerExt, VoidLoggerFactory};
//!
//! let factory: LazyLoggerFactory = LazyLoggerFactory::new();
//! let logger = factory.create_logger("HttpServer");
//! logger.info("listening");
//!
//! // Later, once a backend is configured, buffered records are replayed.
//! factory.set_logger_factory(Arc::new(VoidLoggerFactory));
//! ```

mod buffering;
mod error;
mod factory;
pub mod global;
mod lazy;
mod level;
mod logger;
#[cfg(test)]
mod testing;
mod void;

pub use buffering::{BufferingLoggerFactory, DEFAULT_BUFFER_SIZE};
pub use error::{LoggerError, Result};
pub use factory::LoggerFactory;
pub use global::{logger_for, logger_for_type, set_global_logger_factory};
pub use lazy::LazyLoggerFactory;
pub use level::LogLevel;
pub use logger::{Logger, LoggerExt, Metadata, WrappingLogger};
pub use void::{VoidLogger, VoidLoggerFactory};
