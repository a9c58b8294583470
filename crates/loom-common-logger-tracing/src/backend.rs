// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Console backend that emits records as `tracing` events.

use std::sync::Arc;

use loom_common_logger::{LogLevel, Logger, LoggerFactory, Metadata};
use tracing::level_filters::LevelFilter;

use crate::config::LoggingConfig;
use crate::process::ProcessRole;

/// Target of every event emitted by [`TracingLogger`].
pub const TARGET: &str = "loom_logger";

/// Map a record level onto the closest `tracing` level.
pub fn tracing_level(level: LogLevel) -> tracing::Level {
	match level {
		LogLevel::Error => tracing::Level::ERROR,
		LogLevel::Warn => tracing::Level::WARN,
		LogLevel::Info => tracing::Level::INFO,
		LogLevel::Verbose | LogLevel::Debug => tracing::Level::DEBUG,
		LogLevel::Silly => tracing::Level::TRACE,
	}
}

pub fn level_filter(level: LogLevel) -> LevelFilter {
	LevelFilter::from_level(tracing_level(level))
}

/// Creates [`TracingLogger`]s that drop records below a minimum level.
#[derive(Debug, Clone)]
pub struct TracingLoggerFactory {
	level: LogLevel,
	process: ProcessRole,
}

impl TracingLoggerFactory {
	pub fn new(level: LogLevel) -> Self {
		Self {
			level,
			process: ProcessRole::detect(),
		}
	}

	pub fn from_config(config: &LoggingConfig) -> Self {
		Self {
			level: config.level,
			process: ProcessRole::from_flag(config.worker),
		}
	}

	pub fn with_process(mut self, process: ProcessRole) -> Self {
		self.process = process;
		self
	}

	pub fn level(&self) -> LogLevel {
		self.level
	}

	pub fn process(&self) -> ProcessRole {
		self.process
	}
}

impl LoggerFactory for TracingLoggerFactory {
	fn create_logger(&self, label: &str) -> Arc<dyn Logger> {
		Arc::new(TracingLogger {
			label: label.to_string(),
			level: self.level,
			process: self.process,
		})
	}
}

/// Logger bound to one label, writing through `tracing`.
#[derive(Debug, Clone)]
pub struct TracingLogger {
	label: String,
	level: LogLevel,
	process: ProcessRole,
}

impl TracingLogger {
	pub fn label(&self) -> &str {
		&self.label
	}

	/// Render the console line for a record, without timestamp.
	pub fn format_line(&self, level: LogLevel, message: &str) -> String {
		format!("[{}] {{{}}} {}: {}", self.label, self.process, level, message)
	}
}

impl Logger for TracingLogger {
	fn log(&self, level: LogLevel, message: &str, meta: Option<Metadata>) {
		if level < self.level {
			return;
		}

		let line = self.format_line(level, message);
		let meta = meta.map(|m| serde_json::Value::Object(m).to_string());
		let meta = meta.as_deref();
		let label = self.label.as_str();
		let process = tracing::field::display(&self.process);
		let severity = level.as_str();

		match level {
			LogLevel::Error => {
				tracing::error!(target: TARGET, label, process, severity, meta, "{}", line)
			}
			LogLevel::Warn => {
				tracing::warn!(target: TARGET, label, process, severity, meta, "{}", line)
			}
			LogLevel::Info => {
				tracing::info!(target: TARGET, label, process, severity, meta, "{}", line)
			}
			LogLevel::Verbose | LogLevel::Debug => {
				tracing::debug!(target: TARGET, label, process, severity, meta, "{}", line)
			}
			LogLevel::Silly => {
				tracing::trace!(target: TARGET, label, process, severity, meta, "{}", line)
			}
		}
	}
}
