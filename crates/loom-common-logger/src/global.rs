// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Process-wide lazy logger factory.
//!
//! Libraries call [`logger_for`] when they are constructed; the application
//! calls [`set_global_logger_factory`] once its logging backend is ready.

use std::sync::{Arc, OnceLock};

use crate::error::Result;
use crate::factory::LoggerFactory;
use crate::lazy::LazyLoggerFactory;
use crate::logger::Logger;

static GLOBAL_FACTORY: OnceLock<LazyLoggerFactory> = OnceLock::new();

/// The shared lazy factory, created on first use.
pub fn global() -> &'static LazyLoggerFactory {
	GLOBAL_FACTORY.get_or_init(LazyLoggerFactory::new)
}

/// Create a logger for `label` from the shared factory.
pub fn logger_for(label: &str) -> Arc<dyn Logger> {
	global().create_logger(label)
}

/// Create a logger labelled with the unqualified name of `T`.
pub fn logger_for_type<T: ?Sized>() -> Arc<dyn Logger> {
	logger_for(short_type_name::<T>())
}

pub fn set_global_logger_factory(factory: Arc<dyn LoggerFactory>) {
	global().set_logger_factory(factory);
}

pub fn global_logger_factory() -> Result<Arc<dyn LoggerFactory>> {
	global().logger_factory()
}

fn short_type_name<T: ?Sized>() -> &'static str {
	let full = std::any::type_name::<T>();
	let base = full.split('<').next().unwrap_or(full);
	base.rsplit("::").next().unwrap_or(base)
}
