// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use std::sync::Arc;

use crate::logger::{Logger, Metadata};

/// Creates logger instances for a label.
///
/// This is the contract every logging backend satisfies. Labels are for
/// display and grouping only; they need not be unique.
pub trait LoggerFactory<M = Metadata>: Send + Sync {
	fn create_logger(&self, label: &str) -> Arc<dyn Logger<M>>;
}
