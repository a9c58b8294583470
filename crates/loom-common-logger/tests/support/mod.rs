// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Recording backend used by the integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use loom_common_logger::{LogLevel, Logger, LoggerFactory, Metadata};
use parking_lot::Mutex;

pub type Entry = (LogLevel, String, Option<Metadata>);

#[derive(Default)]
pub struct RecordingLogger {
	entries: Mutex<Vec<Entry>>,
}

impl RecordingLogger {
	pub fn entries(&self) -> Vec<Entry> {
		self.entries.lock().clone()
	}

	pub fn levels_and_messages(&self) -> Vec<(LogLevel, String)> {
		self.entries
			.lock()
			.iter()
			.map(|(level, message, _)| (*level, message.clone()))
			.collect()
	}
}

impl Logger for RecordingLogger {
	fn log(&self, level: LogLevel, message: &str, meta: Option<Metadata>) {
		self.entries.lock().push((level, message.to_string(), meta));
	}
}

#[derive(Default)]
pub struct RecordingBackend {
	loggers: Mutex<Vec<(String, Arc<RecordingLogger>)>>,
}

impl RecordingBackend {
	pub fn new() -> Arc<Self> {
		Arc::new(Self::default())
	}

	pub fn labels(&self) -> Vec<String> {
		self.loggers.lock().iter().map(|(label, _)| label.clone()).collect()
	}

	pub fn logger(&self, index: usize) -> Arc<RecordingLogger> {
		self.loggers.lock()[index].1.clone()
	}

	pub fn created(&self) -> usize {
		self.loggers.lock().len()
	}
}

impl LoggerFactory for RecordingBackend {
	fn create_logger(&self, label: &str) -> Arc<dyn Logger> {
		let logger = Arc::new(RecordingLogger::default());
		self.loggers.lock().push((label.to_string(), logger.clone()));
		logger
	}
}
