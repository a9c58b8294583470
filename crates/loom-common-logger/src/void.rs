// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Backend that discards everything.

use std::sync::Arc;

use crate::factory::LoggerFactory;
use crate::level::LogLevel;
use crate::logger::Logger;

/// A logger that discards all records.
#[derive(Debug, Clone, Copy, Default)]
pub struct VoidLogger;

impl<M> Logger<M> for VoidLogger {
	#[inline]
	fn log(&self, _level: LogLevel, _message: &str, _meta: Option<M>) {}
}

/// Creates [`VoidLogger`]s for every label.
#[derive(Debug, Clone, Copy, Default)]
pub struct VoidLoggerFactory;

impl VoidLoggerFactory {
	pub fn new() -> Self {
		Self
	}
}

impl<M: 'static> LoggerFactory<M> for VoidLoggerFactory {
	fn create_logger(&self, _label: &str) -> Arc<dyn Logger<M>> {
		Arc::new(VoidLogger)
	}
}
