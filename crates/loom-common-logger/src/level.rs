// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Severity levels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LoggerError;

/// Severity of a log record, ordered from least to most severe.
///
/// This layer never filters on level; thresholds belong to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
	Silly,
	Debug,
	Verbose,
	Info,
	Warn,
	Error,
}

impl LogLevel {
	/// All levels, least severe first.
	pub const ALL: [LogLevel; 6] = [
		LogLevel::Silly,
		LogLevel::Debug,
		LogLevel::Verbose,
		LogLevel::Info,
		LogLevel::Warn,
		LogLevel::Error,
	];

	pub fn as_str(&self) -> &'static str {
		match self {
			LogLevel::Silly => "silly",
			LogLevel::Debug => "debug",
			LogLevel::Verbose => "verbose",
			LogLevel::Info => "info",
			LogLevel::Warn => "warn",
			LogLevel::Error => "error",
		}
	}
}

impl fmt::Display for LogLevel {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for LogLevel {
	type Err = LoggerError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		LogLevel::ALL
			.into_iter()
			.find(|level| level.as_str().eq_ignore_ascii_case(s.trim()))
			.ok_or_else(|| LoggerError::InvalidLevel(s.to_string()))
	}
}
