// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Error types for the logger facade.

use thiserror::Error;

/// Result type for logger facade operations.
pub type Result<T> = std::result::Result<T, LoggerError>;

/// Errors raised by the logger facade itself.
///
/// Failures inside a concrete backend are never wrapped in this type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoggerError {
	/// The lazy factory was read before a concrete factory was set.
	#[error("Logger factory not yet set.")]
	Uninitialized,

	#[error("invalid log level: {0}")]
	InvalidLevel(String),
}
