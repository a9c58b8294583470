// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Logging configuration.
//!
//! Layers are merged with the following precedence (highest to lowest):
//! 1. Environment variables (`LOOM_LOG_*`)
//! 2. The `[logging]` table of a TOML config file
//! 3. Built-in defaults

use std::path::Path;

use loom_common_logger::{LazyLoggerFactory, LogLevel, DEFAULT_BUFFER_SIZE};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::process::{is_truthy, WORKER_ENV};

pub const LEVEL_ENV: &str = "LOOM_LOG_LEVEL";
pub const BUFFER_SIZE_ENV: &str = "LOOM_LOG_BUFFER_SIZE";
pub const JSON_ENV: &str = "LOOM_LOG_JSON";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfigLayer {
	pub level: Option<LogLevel>,
	pub buffer_size: Option<usize>,
	pub worker: Option<bool>,
	pub json: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
	#[serde(default)]
	logging: LoggingConfigLayer,
}

impl LoggingConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.level.is_some() {
			self.level = other.level;
		}
		if other.buffer_size.is_some() {
			self.buffer_size = other.buffer_size;
		}
		if other.worker.is_some() {
			self.worker = other.worker;
		}
		if other.json.is_some() {
			self.json = other.json;
		}
	}

	pub fn finalize(self) -> LoggingConfig {
		let defaults = LoggingConfig::default();
		LoggingConfig {
			level: self.level.unwrap_or(defaults.level),
			buffer_size: self.buffer_size.unwrap_or(defaults.buffer_size),
			worker: self.worker.unwrap_or(defaults.worker),
			json: self.json.unwrap_or(defaults.json),
		}
	}

	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_vars(|name| std::env::var(name).ok())
	}

	/// Build a layer from a variable lookup; empty values count as unset.
	pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
		let var = |name: &str| lookup(name).filter(|v| !v.is_empty());

		let level = match var(LEVEL_ENV) {
			Some(v) => Some(
				v.parse::<LogLevel>()
					.map_err(|e| ConfigError::invalid_value(LEVEL_ENV, e.to_string()))?,
			),
			None => None,
		};
		let buffer_size = match var(BUFFER_SIZE_ENV) {
			Some(v) => Some(v.parse::<usize>().map_err(|_| {
				ConfigError::invalid_value(BUFFER_SIZE_ENV, format!("invalid usize value '{v}'"))
			})?),
			None => None,
		};

		Ok(Self {
			level,
			buffer_size,
			worker: var(WORKER_ENV).map(|v| is_truthy(&v)),
			json: var(JSON_ENV).map(|v| is_truthy(&v)),
		})
	}

	/// Read the `[logging]` table of a TOML file. A missing file yields an empty layer.
	pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
		if !path.exists() {
			return Ok(Self::default());
		}
		let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		Self::from_toml_str(&content, path)
	}

	pub fn from_toml_str(content: &str, path: &Path) -> Result<Self, ConfigError> {
		let file: ConfigFile = toml::from_str(content).map_err(|source| ConfigError::TomlParse {
			path: path.to_path_buf(),
			source,
		})?;
		Ok(file.logging)
	}
}

/// Fully resolved logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
	/// Minimum level written by the backend.
	pub level: LogLevel,
	/// Records buffered before a backend is bound. Zero disables buffering:
	/// records logged before [`init_logging`](crate::init_logging) are
	/// dropped, but loggers created early still write once it runs.
	pub buffer_size: usize,
	/// Whether this process logs as a worker.
	pub worker: bool,
	/// Emit JSON lines instead of human-readable output.
	pub json: bool,
}

impl Default for LoggingConfig {
	fn default() -> Self {
		Self {
			level: LogLevel::Info,
			buffer_size: DEFAULT_BUFFER_SIZE,
			worker: false,
			json: false,
		}
	}
}

impl LoggingConfig {
	/// A lazy factory buffering up to the configured number of records.
	pub fn lazy_factory(&self) -> LazyLoggerFactory {
		LazyLoggerFactory::with_buffer_size(self.buffer_size)
	}
}

/// Load configuration from defaults, an optional file, and the environment.
pub fn load_config(path: Option<&Path>) -> Result<LoggingConfig, ConfigError> {
	let mut merged = LoggingConfigLayer::default();
	if let Some(path) = path {
		merged.merge(LoggingConfigLayer::from_file(path)?);
	}
	merged.merge(LoggingConfigLayer::from_env()?);
	Ok(merged.finalize())
}
