//! Traffic Analyzer Library
//!
//! Computes descriptive traffic statistics from a fixed-format access log:
//! per-method distribution, status-class counts, top talkers, top URLs and
//! a trailing-24-hour activity breakdown, subject to optional method,
//! status and time-window filters.
//!
//! ## Architecture
//!
//! - [`models`] - log records and the two aggregation state types
//! - [`parser`] - line parsing and the shared file-scan loop
//! - [`filter`] - the filter predicate built from CLI input
//! - [`analyzer`] - the two-pass pipeline and report hand-off
//! - [`display`] - fixed-format report rendering
//! - [`config`] - ambient configuration (logging, report defaults)
//! - [`logging`] - tracing-subscriber setup
//!
//! ## Usage
//!
//! ```no_run
//! use traffic_analyzer::{FilterSpec, TrafficAnalyzer};
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! let analyzer = TrafficAnalyzer::new(FilterSpec::default(), 3);
//! analyzer.run(Path::new("access.log"))?;
//! # Ok(())
//! # }
//! ```

pub mod analyzer;
pub mod config;
pub mod display;
pub mod filter;
pub mod logging;
pub mod models;
pub mod parser;

pub use analyzer::TrafficAnalyzer;
pub use filter::{FilterSpec, StatusRange};
pub use models::{AggregateState, LogRecord, RecentActivity};
