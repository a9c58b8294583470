// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Subscriber initialisation.

use std::sync::Arc;

use loom_common_logger::set_global_logger_factory;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::backend::{level_filter, TracingLoggerFactory};
use crate::config::LoggingConfig;
use crate::error::InitError;

/// Install the global tracing subscriber and bind the global logger factory.
///
/// `RUST_LOG` takes precedence over the configured level. Loggers created
/// through [`loom_common_logger::logger_for`] before this call have their
/// buffered records replayed once the subscriber is in place.
pub fn init_logging(config: &LoggingConfig) -> Result<(), InitError> {
	let filter = match EnvFilter::try_from_default_env() {
		Ok(filter) => filter,
		Err(_) => EnvFilter::try_new(level_filter(config.level).to_string())?,
	};

	let registry = tracing_subscriber::registry().with(filter);
	if config.json {
		registry
			.with(tracing_subscriber::fmt::layer().json())
			.try_init()?;
	} else {
		registry.with(tracing_subscriber::fmt::layer()).try_init()?;
	}

	set_global_logger_factory(Arc::new(TracingLoggerFactory::from_config(config)));
	tracing::debug!(level = %config.level, json = config.json, "logging initialised");
	Ok(())
}
