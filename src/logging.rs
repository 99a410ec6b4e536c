//! Structured logging configuration
//!
//! Pretty console output by default, JSON and file output available through
//! configuration. User-facing report text and the per-line parse warnings
//! bypass this entirely; tracing carries only instrumentation.

use crate::config::get_config;
use std::sync::OnceLock;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

// Keeps the non-blocking file writer alive for the life of the process.
static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Initialize the logging system based on configuration.
pub fn init_logging() {
    let config = get_config();

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.output.as_str() {
        "file" => init_file_logging(env_filter),
        "both" => init_combined_logging(env_filter),
        _ => init_console_logging(env_filter),
    }
}

fn init_console_logging(filter: EnvFilter) {
    let config = get_config();
    let subscriber = tracing_subscriber::registry().with(filter);

    match config.logging.format.as_str() {
        "json" => {
            subscriber
                .with(fmt::layer().json().with_writer(std::io::stderr).with_target(true))
                .init();
        }
        _ => {
            subscriber
                .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
                .init();
        }
    }
}

fn init_file_logging(filter: EnvFilter) {
    let config = get_config();
    let file_appender =
        tracing_appender::rolling::daily(&config.logging.directory, "traffic-analyzer.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let _ = FILE_GUARD.set(guard);

    let subscriber = tracing_subscriber::registry().with(filter);

    match config.logging.format.as_str() {
        "json" => {
            subscriber
                .with(fmt::layer().json().with_writer(non_blocking))
                .init();
        }
        _ => {
            subscriber
                .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
                .init();
        }
    }
}

fn init_combined_logging(filter: EnvFilter) {
    let config = get_config();
    let file_appender =
        tracing_appender::rolling::daily(&config.logging.directory, "traffic-analyzer.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let _ = FILE_GUARD.set(guard);

    let subscriber = tracing_subscriber::registry().with(filter);

    match config.logging.format.as_str() {
        "json" => {
            subscriber
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .with(fmt::layer().json().with_writer(non_blocking))
                .init();
        }
        _ => {
            subscriber
                .with(fmt::layer().with_writer(std::io::stderr))
                .with(fmt::layer().with_ansi(false).with_writer(non_blocking))
                .init();
        }
    }
}
