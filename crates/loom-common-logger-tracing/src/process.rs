// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Identity of the current process in log lines.

use std::fmt;

/// Environment variable marking the process as a worker.
pub const WORKER_ENV: &str = "LOOM_LOG_WORKER";

/// Whether this process is the primary or one of several workers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessRole {
	Primary,
	/// A worker, identified by its PID.
	Worker(u32),
}

impl ProcessRole {
	/// Detect the role from [`WORKER_ENV`].
	pub fn detect() -> Self {
		let worker = std::env::var(WORKER_ENV)
			.ok()
			.is_some_and(|v| is_truthy(&v));
		Self::from_flag(worker)
	}

	pub fn from_flag(worker: bool) -> Self {
		if worker {
			ProcessRole::Worker(std::process::id())
		} else {
			ProcessRole::Primary
		}
	}
}

impl fmt::Display for ProcessRole {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ProcessRole::Primary => f.write_str("Primary"),
			ProcessRole::Worker(pid) => write!(f, "W-{pid}"),
		}
	}
}

pub(crate) fn is_truthy(value: &str) -> bool {
	value.eq_ignore_ascii_case("true") || value == "1"
}
