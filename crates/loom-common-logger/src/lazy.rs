// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Logger factory whose backend is set after loggers are handed out.

use std::mem;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::buffering::{BufferingLoggerFactory, DEFAULT_BUFFER_SIZE};
use crate::error::{LoggerError, Result};
use crate::factory::LoggerFactory;
use crate::logger::{Logger, Metadata};

/// Wraps a [`LoggerFactory`] that can be set lazily.
///
/// Components may create loggers while the application is still being
/// wired together. Until [`set_logger_factory`] is called those loggers
/// buffer their records; setting a factory binds and replays them.
///
/// [`set_logger_factory`]: LazyLoggerFactory::set_logger_factory
pub struct LazyLoggerFactory<M = Metadata> {
	factory: RwLock<Active<M>>,
}

enum Active<M> {
	Pending(Arc<BufferingLoggerFactory<M>>),
	Set(Arc<dyn LoggerFactory<M>>),
}

impl<M: Send + 'static> LazyLoggerFactory<M> {
	pub fn new() -> Self {
		Self::with_buffer_size(DEFAULT_BUFFER_SIZE)
	}

	pub fn with_buffer_size(buffer_size: usize) -> Self {
		Self {
			factory: RwLock::new(Active::Pending(Arc::new(BufferingLoggerFactory::new(
				buffer_size,
			)))),
		}
	}

	/// The concrete factory, or [`LoggerError::Uninitialized`] if none was set.
	pub fn logger_factory(&self) -> Result<Arc<dyn LoggerFactory<M>>> {
		match &*self.factory.read() {
			Active::Pending(_) => Err(LoggerError::Uninitialized),
			Active::Set(factory) => Ok(factory.clone()),
		}
	}

	/// Set the concrete factory.
	///
	/// The first call binds every logger created so far and replays their
	/// buffered records. Later calls only affect loggers created afterwards.
	pub fn set_logger_factory(&self, factory: Arc<dyn LoggerFactory<M>>) {
		let previous = mem::replace(&mut *self.factory.write(), Active::Set(factory.clone()));
		if let Active::Pending(pending) = previous {
			pending.bind(factory);
		}
	}

	pub fn is_set(&self) -> bool {
		matches!(&*self.factory.read(), Active::Set(_))
	}

	pub fn create_logger(&self, label: &str) -> Arc<dyn Logger<M>> {
		let active: Arc<dyn LoggerFactory<M>> = match &*self.factory.read() {
			Active::Pending(pending) => pending.clone() as Arc<dyn LoggerFactory<M>>,
			Active::Set(factory) => factory.clone(),
		};
		active.create_logger(label)
	}
}

impl<M: Send + 'static> Default for LazyLoggerFactory<M> {
	fn default() -> Self {
		Self::new()
	}
}

impl<M: Send + 'static> LoggerFactory<M> for LazyLoggerFactory<M> {
	fn create_logger(&self, label: &str) -> Arc<dyn Logger<M>> {
		LazyLoggerFactory::create_logger(self, label)
	}
}
