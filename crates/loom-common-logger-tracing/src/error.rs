// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Configuration and initialisation error types.

use std::path::PathBuf;

/// Errors that can occur while loading logging configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	/// I/O error reading config file
	#[error("I/O error reading {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// TOML parsing error
	#[error("TOML parse error in {path}: {source}")]
	TomlParse {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	/// Invalid value
	#[error("Invalid value for {key}: {message}")]
	InvalidValue { key: String, message: String },
}

impl ConfigError {
	pub fn invalid_value(key: impl Into<String>, message: impl Into<String>) -> Self {
		Self::InvalidValue {
			key: key.into(),
			message: message.into(),
		}
	}
}

/// Errors that can occur while installing the tracing subscriber.
#[derive(Debug, thiserror::Error)]
pub enum InitError {
	#[error("tracing subscriber already initialized: {0}")]
	AlreadyInitialized(#[from] tracing_subscriber::util::TryInitError),

	#[error("invalid log filter: {0}")]
	Filter(#[from] tracing_subscriber::filter::ParseError),
}
