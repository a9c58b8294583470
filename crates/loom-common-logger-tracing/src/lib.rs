// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! `tracing` backend for [`loom_common_logger`].
//!
//! This crate provides:
//! - [`TracingLoggerFactory`] - a backend that writes records as `tracing` events
//! - [`ProcessRole`] - primary/worker identity shown in each line
//! - [`LoggingConfig`] - layered configuration from defaults, TOML and environment
//! - [`init_logging`] - installs the subscriber and binds the global factory
//!
//! # Usage
//!
//! ```ignore
//! use loom_common_logger::{logger_for, LoggerExt};
//! use loom_common_logger_tracing::{init_logging, load_config};
//!
//! let early = logger_for("Startup");
//! early.info("buffered until logging is initialised");
//!
//! let config = load_config(None)?;
//! init_logging(&config)?;
//! ```

mod backend;
mod config;
mod error;
mod init;
mod process;

pub use backend::{level_filter, tracing_level, TracingLogger, TracingLoggerFactory, TARGET};
pub use config::{
	load_config, LoggingConfig, LoggingConfigLayer, BUFFER_SIZE_ENV, JSON_ENV, LEVEL_ENV,
};
pub use error::{ConfigError, InitError};
pub use init::init_logging;
pub use process::{ProcessRole, WORKER_ENV};
