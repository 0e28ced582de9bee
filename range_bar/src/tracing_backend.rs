// Copyright 2026 the Range Bar Authors
// SPDX-License-Identifier: Apache-2.0

//! Configures a default [`tracing`] subscriber for hosts and tests of the range bar.
//!
//! Logs are written to stderr in a compact format, with millisecond UTC timestamps.
//! The default filter can be overwritten using `RUST_LOG`.
//! Hosts get all [`DEBUG`](tracing::Level::DEBUG) messages in debug mode,
//! and all [`INFO`](tracing::Level::INFO) messages in release mode.
//! Tests only get warnings, unless `RUST_LOG` asks for more.
//!
//! If a `tracing` subscriber is already set, none of these functions replace it.

use std::error::Error;

use time::macros::format_description;
use tracing::Subscriber;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::TestWriter;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::prelude::*;

/// Builds the subscriber we use by default, with the given `default_level`.
///
/// Returns the subscriber, and the error in case `RUST_LOG` couldn't be fully parsed.
/// Unparseable directives are skipped rather than failing.
pub fn default_tracing_subscriber(
    default_level: LevelFilter,
) -> (impl Subscriber + Send + Sync, Option<Box<dyn Error + Send + Sync>>) {
    subscriber(default_level, false)
}

fn subscriber(
    default_level: LevelFilter,
    test_writer: bool,
) -> (impl Subscriber + Send + Sync, Option<Box<dyn Error + Send + Sync>>) {
    let env_filter_builder = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .with_env_var("RUST_LOG");
    let err = env_filter_builder
        .from_env()
        .err()
        .map(|err| format!("failed to parse RUST_LOG environment variable: {err:#}").into());
    let env_filter = env_filter_builder.from_env_lossy();

    let timer = UtcTime::new(format_description!(
        "[hour repr:24]:[minute]:[second].[subsecond digits:3]Z"
    ));
    // Test output goes through libtest's capture.
    let writer = if test_writer {
        BoxMakeWriter::new(TestWriter::default())
    } else {
        BoxMakeWriter::new(std::io::stderr)
    };
    let console_layer = tracing_subscriber::fmt::layer()
        .with_timer(timer)
        // Range bar logs all come from the same few modules.
        .with_target(false)
        .with_writer(writer)
        .with_filter(env_filter);

    let registry = tracing_subscriber::registry().with(console_layer);
    (registry, err)
}

/// An error indicating that a tracing subscriber has been set before.
#[derive(Debug, thiserror::Error)]
#[error("A tracing subscriber has been set before.")]
pub struct TracingSubscriberHasBeenSetError;

fn try_init(
    default_level: LevelFilter,
    test_writer: bool,
) -> Result<(), TracingSubscriberHasBeenSetError> {
    let (subscriber, err) = subscriber(default_level, test_writer);
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|_| TracingSubscriberHasBeenSetError)?;
    if let Some(err) = err {
        tracing::warn!("Initialising logging encountered recoverable error: {err}");
    }
    Ok(())
}

/// Initialises tracing with a default subscriber for a unit test.
///
/// This ignores most messages to limit noise.
pub fn try_init_test_tracing() -> Result<(), TracingSubscriberHasBeenSetError> {
    try_init(LevelFilter::WARN, true)
}

/// Initialises tracing with a default subscriber for a host application.
pub fn try_init_tracing() -> Result<(), TracingSubscriberHasBeenSetError> {
    // DEBUG prints a log per reconfiguration or snap; INFO stays quiet.
    let default_level = if cfg!(debug_assertions) {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    try_init(default_level, false)
}
