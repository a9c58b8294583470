// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Logger factory that buffers records until a real backend is bound.
//!
//! Handles are created before any backend exists. Records logged through
//! them are kept in one ordered buffer shared by every handle of the
//! factory. Binding a backend rewires each handle, in creation order, and
//! replays the buffer in the order the records were produced.
//!
//! If the buffer fills before a backend is bound, the factory assumes none
//! ever will be: it drops the buffer and binds a [`VoidLoggerFactory`]
//! instead. From then on the factory is fused and stays silent.

use std::mem;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tracing::debug;

use crate::factory::LoggerFactory;
use crate::level::LogLevel;
use crate::logger::{Logger, Metadata, WrappingLogger};
use crate::void::{VoidLogger, VoidLoggerFactory};

/// Default number of records buffered before falling back to a void backend.
pub const DEFAULT_BUFFER_SIZE: usize = 1024;

/// Factory handing out [`WrappingLogger`]s that buffer until [`bind`] is called.
///
/// [`bind`]: BufferingLoggerFactory::bind
pub struct BufferingLoggerFactory<M = Metadata> {
	state: Arc<Mutex<State<M>>>,
}

enum Phase<M> {
	Buffering { remaining: usize },
	Bound(Arc<dyn LoggerFactory<M>>),
	Fused,
}

struct State<M> {
	phase: Phase<M>,
	/// Handles not yet rewired, in creation order.
	pending: Vec<Arc<WrappingLogger<M>>>,
	/// Records in global insertion order across all handles.
	records: Vec<BufferedRecord<M>>,
	/// Set while `rewire` is moving handles onto a backend.
	rewiring: bool,
}

/// Metadata is not buffered, so replay forwards only level and message.
struct BufferedRecord<M> {
	handle: Arc<WrappingLogger<M>>,
	level: LogLevel,
	message: String,
}

/// Backing logger of an unbound handle.
struct BufferingLogger<M> {
	state: Weak<Mutex<State<M>>>,
	handle: Weak<WrappingLogger<M>>,
}

impl<M: Send + 'static> BufferingLoggerFactory<M> {
	/// Create a factory that buffers at most `buffer_size` records.
	///
	/// With a size of zero nothing is buffered and the factory never fuses;
	/// handles still wait for [`bind`](Self::bind).
	pub fn new(buffer_size: usize) -> Self {
		Self {
			state: Arc::new(Mutex::new(State {
				phase: Phase::Buffering {
					remaining: buffer_size,
				},
				pending: Vec::new(),
				records: Vec::new(),
				rewiring: false,
			})),
		}
	}

	/// Create a handle for `label`.
	///
	/// While unbound the handle buffers its records. After a bind it is backed
	/// directly by the bound backend, and after fusing by a [`VoidLogger`].
	pub fn create_logger(&self, label: &str) -> Arc<WrappingLogger<M>> {
		let mut state = self.state.lock();
		let bound = match &state.phase {
			Phase::Buffering { .. } => None,
			Phase::Bound(factory) => Some(factory.clone()),
			Phase::Fused => return Arc::new(WrappingLogger::new(label, Arc::new(VoidLogger))),
		};
		if let Some(factory) = bound {
			drop(state);
			return Arc::new(WrappingLogger::new(label, factory.create_logger(label)));
		}

		let weak_state = Arc::downgrade(&self.state);
		let handle = Arc::new_cyclic(|weak_handle| {
			let buffering: Arc<dyn Logger<M>> = Arc::new(BufferingLogger {
				state: weak_state,
				handle: weak_handle.clone(),
			});
			WrappingLogger::new(label, buffering)
		});
		state.pending.push(handle.clone());
		handle
	}

	/// Bind a real backend.
	///
	/// Every pending handle gets a logger from `factory`, in creation order,
	/// then the buffered records are replayed through those handles in the
	/// order they were logged. Metadata is not replayed.
	///
	/// Once fused this is a no-op. Binding again after a successful bind only
	/// changes the backend used for handles created afterwards.
	pub fn bind(&self, factory: Arc<dyn LoggerFactory<M>>) {
		rewire(&self.state, factory, false);
	}

	/// Number of records waiting for replay.
	pub fn buffered_len(&self) -> usize {
		self.state.lock().records.len()
	}

	/// Number of handles waiting to be rewired.
	pub fn pending_len(&self) -> usize {
		self.state.lock().pending.len()
	}

	/// Buffer slots left before the factory fuses. Zero once bound or fused.
	pub fn remaining_capacity(&self) -> usize {
		match self.state.lock().phase {
			Phase::Buffering { remaining } => remaining,
			_ => 0,
		}
	}

	pub fn is_bound(&self) -> bool {
		matches!(self.state.lock().phase, Phase::Bound(_))
	}

	pub fn is_fused(&self) -> bool {
		matches!(self.state.lock().phase, Phase::Fused)
	}
}

impl<M: Send + 'static> Default for BufferingLoggerFactory<M> {
	fn default() -> Self {
		Self::new(DEFAULT_BUFFER_SIZE)
	}
}

impl<M: Send + 'static> LoggerFactory<M> for BufferingLoggerFactory<M> {
	fn create_logger(&self, label: &str) -> Arc<dyn Logger<M>> {
		BufferingLoggerFactory::create_logger(self, label)
	}
}

/// Move every pending handle onto `factory` and replay the buffer.
///
/// No lock is held while backend code runs. The factory keeps buffering
/// until every handle is rewired, so a backend that logs through a handle
/// while creating its logger has that record replayed.
fn rewire<M: Send + 'static>(
	state: &Mutex<State<M>>,
	factory: Arc<dyn LoggerFactory<M>>,
	fuse: bool,
) {
	let pending = {
		let mut guard = state.lock();
		if guard.rewiring {
			return;
		}
		if !matches!(guard.phase, Phase::Buffering { .. }) {
			if !fuse && matches!(guard.phase, Phase::Bound(_)) {
				guard.phase = Phase::Bound(factory);
			}
			return;
		}
		guard.rewiring = true;
		mem::take(&mut guard.pending)
	};

	for handle in &pending {
		handle.set_logger(factory.create_logger(handle.label()));
	}

	let (late, records) = {
		let mut guard = state.lock();
		guard.rewiring = false;
		guard.phase = if fuse {
			Phase::Fused
		} else {
			Phase::Bound(factory.clone())
		};
		(
			mem::take(&mut guard.pending),
			mem::take(&mut guard.records),
		)
	};

	// Handles created while the first batch was being rewired.
	for handle in &late {
		handle.set_logger(factory.create_logger(handle.label()));
	}
	for record in &records {
		record.handle.log(record.level, &record.message, None);
	}

	debug!(
		handles = pending.len() + late.len(),
		replayed = records.len(),
		fused = fuse,
		"rewired buffered loggers"
	);
}

impl<M: Send + 'static> Logger<M> for BufferingLogger<M> {
	fn log(&self, level: LogLevel, message: &str, _meta: Option<M>) {
		let (Some(state), Some(handle)) = (self.state.upgrade(), self.handle.upgrade()) else {
			return;
		};

		let mut guard = state.lock();
		let Phase::Buffering { remaining } = &mut guard.phase else {
			return;
		};
		if *remaining == 0 {
			return;
		}
		*remaining -= 1;
		let exhausted = *remaining == 0;

		if exhausted && guard.rewiring {
			// A backend is being bound, so there is no reason to fuse.
			return;
		}
		if exhausted {
			// The buffer is full; assume no backend is coming and go silent.
			let dropped = guard.records.len();
			guard.records.clear();
			drop(guard);
			debug!(dropped, "log buffer exhausted, switching to void loggers");
			rewire(&state, Arc::new(VoidLoggerFactory), true);
			return;
		}

		guard.records.push(BufferedRecord {
			handle,
			level,
			message: message.to_string(),
		});
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::logger::LoggerExt;
	use crate::testing::{Call, RecordingFactory};
	use proptest::prelude::*;
	use serde_json::json;

	fn recording() -> Arc<RecordingFactory> {
		Arc::new(RecordingFactory::new())
	}

	#[test]
	fn test_bind_creates_loggers_in_creation_order() {
		let factory = BufferingLoggerFactory::<Metadata>::default();
		factory.create_logger("LoggerA");
		factory.create_logger("LoggerB");
		factory.create_logger("LoggerA");

		let backend = recording();
		factory.bind(backend.clone());

		assert_eq!(backend.labels(), vec!["LoggerA", "LoggerB", "LoggerA"]);
		assert_eq!(factory.pending_len(), 0);
	}

	#[test]
	fn test_bind_replays_records_in_global_order() {
		let factory = BufferingLoggerFactory::<Metadata>::default();
		let a = factory.create_logger("LoggerA");
		let b = factory.create_logger("LoggerB");
		a.warn("message1");
		b.warn("message2");
		b.error("message3");
		a.error("message4");
		assert_eq!(factory.buffered_len(), 4);

		let backend = recording();
		factory.bind(backend.clone());

		assert_eq!(
			backend.logger(0).calls(),
			vec![
				Call::new(LogLevel::Warn, "message1", None),
				Call::new(LogLevel::Error, "message4", None),
			]
		);
		assert_eq!(
			backend.logger(1).calls(),
			vec![
				Call::new(LogLevel::Warn, "message2", None),
				Call::new(LogLevel::Error, "message3", None),
			]
		);
		assert_eq!(factory.buffered_len(), 0);
	}

	#[test]
	fn test_replay_drops_metadata() {
		// Known quirk: only level and message survive buffering.
		let factory = BufferingLoggerFactory::<Metadata>::default();
		let logger = factory.create_logger("Meta");
		let mut meta = Metadata::new();
		meta.insert("user".to_string(), json!("alice"));
		logger.info_with("hello", meta);

		let backend = recording();
		factory.bind(backend.clone());

		assert_eq!(
			backend.logger(0).calls(),
			vec![Call::new(LogLevel::Info, "hello", None)]
		);
	}

	#[test]
	fn test_logs_after_bind_go_straight_to_backend() {
		let factory = BufferingLoggerFactory::<Metadata>::default();
		let logger = factory.create_logger("Direct");
		let backend = recording();
		factory.bind(backend.clone());

		let mut meta = Metadata::new();
		meta.insert("k".to_string(), json!(1));
		logger.debug_with("after bind", meta.clone());

		assert_eq!(factory.buffered_len(), 0);
		assert_eq!(
			backend.logger(0).calls(),
			vec![Call::new(LogLevel::Debug, "after bind", Some(meta))]
		);
	}

	#[test]
	fn test_handles_created_after_bind_use_backend() {
		let factory = BufferingLoggerFactory::<Metadata>::default();
		let backend = recording();
		factory.bind(backend.clone());
		assert!(factory.is_bound());

		let late = factory.create_logger("Late");
		late.info("hi");

		assert_eq!(backend.labels(), vec!["Late"]);
		assert_eq!(backend.logger(0).calls().len(), 1);
		assert_eq!(factory.pending_len(), 0);
	}

	#[test]
	fn test_second_bind_does_not_rewire_existing_handles() {
		let factory = BufferingLoggerFactory::<Metadata>::default();
		let early = factory.create_logger("Early");
		let first = recording();
		let second = recording();

		factory.bind(first.clone());
		factory.bind(second.clone());
		early.info("still first");
		factory.create_logger("Later");

		assert_eq!(first.labels(), vec!["Early"]);
		assert_eq!(first.logger(0).calls().len(), 1);
		assert_eq!(second.labels(), vec!["Later"]);
	}

	#[test]
	fn test_bind_without_handles_is_noop() {
		let factory = BufferingLoggerFactory::<Metadata>::default();
		let backend = recording();
		factory.bind(backend.clone());
		assert_eq!(backend.created_count(), 0);
	}

	#[test]
	fn test_full_buffer_fuses_to_void() {
		let factory = BufferingLoggerFactory::<Metadata>::new(100);
		let a = factory.create_logger("LoggerA");
		let b = factory.create_logger("LoggerB");

		for _ in 0..50 {
			a.info("info");
		}
		for _ in 0..49 {
			b.info("info");
		}
		assert!(!factory.is_fused());
		assert_eq!(factory.buffered_len(), 99);
		assert_eq!(factory.remaining_capacity(), 1);

		b.info("info");
		assert!(factory.is_fused());
		assert_eq!(factory.buffered_len(), 0);
		assert_eq!(factory.pending_len(), 0);

		let backend = recording();
		factory.bind(backend.clone());
		a.info("dropped");
		b.info("dropped");

		assert_eq!(backend.created_count(), 0);
		assert!(factory.is_fused());
	}

	#[test]
	fn test_handles_created_after_fusing_are_void() {
		let factory = BufferingLoggerFactory::<Metadata>::new(1);
		let first = factory.create_logger("First");
		first.info("fuses immediately");
		assert!(factory.is_fused());

		let late = factory.create_logger("Late");
		late.info("not buffered");
		assert_eq!(factory.buffered_len(), 0);
		assert_eq!(factory.pending_len(), 0);

		let backend = recording();
		factory.bind(backend.clone());
		assert_eq!(backend.created_count(), 0);
	}

	#[test]
	fn test_zero_buffer_size_never_buffers_but_still_binds() {
		let factory = BufferingLoggerFactory::<Metadata>::new(0);
		assert_eq!(factory.remaining_capacity(), 0);

		let logger = factory.create_logger("Zero");
		logger.error("discarded");
		assert!(!factory.is_fused());
		assert_eq!(factory.buffered_len(), 0);
		assert_eq!(factory.pending_len(), 1);

		let backend = recording();
		factory.bind(backend.clone());
		logger.info("after bind");

		assert_eq!(backend.labels(), vec!["Zero"]);
		assert_eq!(
			backend.logger(0).calls(),
			vec![Call::new(LogLevel::Info, "after bind", None)]
		);
	}

	#[test]
	fn test_dropped_factory_leaves_handles_silent() {
		let factory = BufferingLoggerFactory::<Metadata>::default();
		let logger = factory.create_logger("Orphan");
		drop(factory);

		logger.info("nobody is listening");
	}

	/// Backend that logs through an existing handle while creating loggers.
	struct ReentrantFactory {
		inner: RecordingFactory,
		chatty: Mutex<Option<Arc<WrappingLogger>>>,
	}

	impl ReentrantFactory {
		fn new(chatty: Arc<WrappingLogger>) -> Arc<Self> {
			Arc::new(Self {
				inner: RecordingFactory::new(),
				chatty: Mutex::new(Some(chatty)),
			})
		}
	}

	impl LoggerFactory for ReentrantFactory {
		fn create_logger(&self, label: &str) -> Arc<dyn Logger> {
			let logger = self.inner.create_logger(label);
			let chatty = self.chatty.lock().clone();
			if let Some(chatty) = chatty {
				chatty.info("creating logger");
			}
			logger
		}
	}

	#[test]
	fn test_backend_may_log_while_being_bound() {
		let factory = BufferingLoggerFactory::<Metadata>::default();
		let chatty = factory.create_logger("Chatty");
		let backend = ReentrantFactory::new(chatty);

		factory.bind(backend.clone());

		assert_eq!(backend.inner.labels(), vec!["Chatty"]);
		assert_eq!(
			backend.inner.logger(0).calls(),
			vec![Call::new(LogLevel::Info, "creating logger", None)]
		);
		assert!(factory.is_bound());
		assert_eq!(factory.buffered_len(), 0);
	}

	#[test]
	fn test_filling_buffer_during_bind_does_not_fuse() {
		let factory = BufferingLoggerFactory::<Metadata>::new(1);
		let chatty = factory.create_logger("Chatty");
		let backend = ReentrantFactory::new(chatty.clone());

		factory.bind(backend.clone());
		chatty.warn("bound");

		assert!(factory.is_bound());
		assert!(!factory.is_fused());
		assert_eq!(
			backend.inner.logger(0).calls(),
			vec![Call::new(LogLevel::Warn, "bound", None)]
		);
	}

	#[test]
	fn test_factory_is_send_sync() {
		fn assert_send_sync<T: Send + Sync>() {}
		assert_send_sync::<BufferingLoggerFactory>();
	}

	proptest! {
		/// Any interleaving of logs across handles is replayed per handle in order.
		#[test]
		fn replay_preserves_order(
			handles in 1usize..5,
			writes in prop::collection::vec((0usize..5, 0usize..6), 0..60),
		) {
			let factory = BufferingLoggerFactory::<Metadata>::new(1000);
			let loggers: Vec<_> = (0..handles)
				.map(|i| factory.create_logger(&format!("L{i}")))
				.collect();

			let mut expected: Vec<Vec<Call>> = vec![Vec::new(); handles];
			for (n, (target, level)) in writes.iter().enumerate() {
				let target = target % handles;
				let level = LogLevel::ALL[*level];
				let message = format!("m{n}");
				loggers[target].log(level, &message, None);
				expected[target].push(Call::new(level, &message, None));
			}

			let backend = recording();
			factory.bind(backend.clone());

			let labels: Vec<String> = (0..handles).map(|i| format!("L{i}")).collect();
			prop_assert_eq!(backend.labels(), labels);
			for (i, calls) in expected.iter().enumerate() {
				prop_assert_eq!(&backend.logger(i).calls(), calls);
			}
		}

		/// The factory fuses exactly when the buffer size is reached.
		#[test]
		fn fuses_exactly_at_capacity(size in 1usize..64, writes in 0usize..128) {
			let factory = BufferingLoggerFactory::<Metadata>::new(size);
			let logger = factory.create_logger("Only");
			for _ in 0..writes {
				logger.silly("x");
			}

			prop_assert_eq!(factory.is_fused(), writes >= size);
			if writes < size {
				prop_assert_eq!(factory.buffered_len(), writes);
				prop_assert_eq!(factory.remaining_capacity(), size - writes);
			} else {
				prop_assert_eq!(factory.buffered_len(), 0);
			}
		}
	}
}
