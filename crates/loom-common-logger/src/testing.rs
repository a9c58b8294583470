// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Recording test doubles shared by the unit tests.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::factory::LoggerFactory;
use crate::level::LogLevel;
use crate::logger::{Logger, Metadata};

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Call {
	pub level: LogLevel,
	pub message: String,
	pub meta: Option<Metadata>,
}

impl Call {
	pub fn new(level: LogLevel, message: &str, meta: Option<Metadata>) -> Self {
		Self {
			level,
			message: message.to_string(),
			meta,
		}
	}
}

#[derive(Debug, Default)]
pub(crate) struct RecordingLogger {
	calls: Mutex<Vec<Call>>,
}

impl RecordingLogger {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn calls(&self) -> Vec<Call> {
		self.calls.lock().clone()
	}
}

impl Logger for RecordingLogger {
	fn log(&self, level: LogLevel, message: &str, meta: Option<Metadata>) {
		self.calls.lock().push(Call::new(level, message, meta));
	}
}

/// Factory that records every label it is asked for.
#[derive(Debug, Default)]
pub(crate) struct RecordingFactory {
	created: Mutex<Vec<(String, Arc<RecordingLogger>)>>,
}

impl RecordingFactory {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn labels(&self) -> Vec<String> {
		self.created.lock().iter().map(|(label, _)| label.clone()).collect()
	}

	pub fn logger(&self, index: usize) -> Arc<RecordingLogger> {
		self.created.lock()[index].1.clone()
	}

	pub fn created_count(&self) -> usize {
		self.created.lock().len()
	}
}

impl LoggerFactory for RecordingFactory {
	fn create_logger(&self, label: &str) -> Arc<dyn Logger> {
		let logger = Arc::new(RecordingLogger::new());
		self.created.lock().push((label.to_string(), logger.clone()));
		logger
	}
}
