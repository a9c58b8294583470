// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Logger traits and the swappable logger handle.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::level::LogLevel;

/// Default structured metadata attached to a record.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// The single logging primitive every backend implements.
///
/// Implementations must be `Send + Sync` so handles can be shared freely.
/// Failures inside an implementation are not caught by this crate.
pub trait Logger<M = Metadata>: Send + Sync {
	/// Log `message` at `level`, with optional metadata.
	fn log(&self, level: LogLevel, message: &str, meta: Option<M>);
}

/// Per-level convenience methods, derived from [`Logger::log`].
///
/// Implemented for every [`Logger`], including `dyn Logger`. Each method
/// returns the receiver so calls can be chained:
///
/// ```
/// use std::sync::Arc;
/// use loom_common_logger::{Logger, LoggerExt, VoidLogger};
///
/// let logger: Arc<dyn Logger> = Arc::new(VoidLogger);
/// logger.info("starting").debug("config loaded");
/// ```
pub trait LoggerExt<M = Metadata>: Logger<M> {
	fn error(&self, message: &str) -> &Self {
		self.log(LogLevel::Error, message, None);
		self
	}

	fn error_with(&self, message: &str, meta: M) -> &Self {
		self.log(LogLevel::Error, message, Some(meta));
		self
	}

	fn warn(&self, message: &str) -> &Self {
		self.log(LogLevel::Warn, message, None);
		self
	}

	fn warn_with(&self, message: &str, meta: M) -> &Self {
		self.log(LogLevel::Warn, message, Some(meta));
		self
	}

	fn info(&self, message: &str) -> &Self {
		self.log(LogLevel::Info, message, None);
		self
	}

	fn info_with(&self, message: &str, meta: M) -> &Self {
		self.log(LogLevel::Info, message, Some(meta));
		self
	}

	fn verbose(&self, message: &str) -> &Self {
		self.log(LogLevel::Verbose, message, None);
		self
	}

	fn verbose_with(&self, message: &str, meta: M) -> &Self {
		self.log(LogLevel::Verbose, message, Some(meta));
		self
	}

	fn debug(&self, message: &str) -> &Self {
		self.log(LogLevel::Debug, message, None);
		self
	}

	fn debug_with(&self, message: &str, meta: M) -> &Self {
		self.log(LogLevel::Debug, message, Some(meta));
		self
	}

	fn silly(&self, message: &str) -> &Self {
		self.log(LogLevel::Silly, message, None);
		self
	}

	fn silly_with(&self, message: &str, meta: M) -> &Self {
		self.log(LogLevel::Silly, message, Some(meta));
		self
	}
}

impl<M, L: Logger<M> + ?Sized> LoggerExt<M> for L {}

/// A logger handle whose backing logger can be replaced at runtime.
///
/// Every call is forwarded verbatim to whichever logger currently occupies
/// the slot. Only the buffering factory in this crate rewires the slot.
pub struct WrappingLogger<M = Metadata> {
	label: String,
	logger: RwLock<Arc<dyn Logger<M>>>,
}

impl<M: Send + 'static> WrappingLogger<M> {
	pub fn new(label: impl Into<String>, logger: Arc<dyn Logger<M>>) -> Self {
		Self {
			label: label.into(),
			logger: RwLock::new(logger),
		}
	}

	/// The label this handle was created with.
	pub fn label(&self) -> &str {
		&self.label
	}

	pub(crate) fn set_logger(&self, logger: Arc<dyn Logger<M>>) {
		*self.logger.write() = logger;
	}

	fn current(&self) -> Arc<dyn Logger<M>> {
		self.logger.read().clone()
	}
}

impl<M: Send + 'static> Logger<M> for WrappingLogger<M> {
	fn log(&self, level: LogLevel, message: &str, meta: Option<M>) {
		// The slot may be rewritten by the call below, so the lock is released first.
		let logger = self.current();
		logger.log(level, message, meta);
	}
}

impl<M> fmt::Debug for WrappingLogger<M> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("WrappingLogger")
			.field("label", &self.label)
			.finish_non_exhaustive()
	}
}
