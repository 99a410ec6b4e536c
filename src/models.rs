//! Core Data Models
//!
//! This module defines the data structures the analysis pipeline flows
//! through:
//!
//! 1. **Raw data**: [`LogRecord`] - one decoded access-log line
//! 2. **Pass 1**: [`AggregateState`] - filtered global statistics,
//!    folded incrementally over every passing record
//! 3. **Pass 2**: [`RecentActivity`] - trailing-24-hour window breakdown
//!
//! Aggregation is deliberately free of I/O: both state types expose an
//! `observe` method that folds in a single record, so the aggregation logic
//! is unit-testable without touching the filesystem.

use chrono::DateTime;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::debug;

/// Seconds in the trailing activity window.
pub const RECENT_WINDOW_SECS: i64 = 86_400;

/// One decoded access-log line.
///
/// The parser guarantees integer syntax for `timestamp`, `status` and
/// `size` but performs no range validation; out-of-range values flow
/// through and are classified (or ignored) downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogRecord {
    pub timestamp: i64,
    pub ip: String,
    pub method: String,
    pub url: String,
    pub status: i64,
    pub size: i64,
}

/// A frequency counter that remembers first-seen order.
///
/// Report sections iterate methods in the order they first appeared in the
/// log, and top-N rankings break count ties by first appearance, so a plain
/// `HashMap` is not enough here.
#[derive(Debug, Clone, Default)]
pub struct OrderedCounter {
    index: HashMap<String, usize>,
    entries: Vec<(String, u64)>,
}

impl OrderedCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bump(&mut self, key: &str) {
        match self.index.get(key) {
            Some(&slot) => self.entries[slot].1 += 1,
            None => {
                self.index.insert(key.to_string(), self.entries.len());
                self.entries.push((key.to_string(), 1));
            }
        }
    }

    pub fn get(&self, key: &str) -> u64 {
        self.index.get(key).map(|&slot| self.entries[slot].1).unwrap_or(0)
    }

    /// Entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(key, count)| (key.as_str(), *count))
    }

    /// The `n` highest counts; ties keep first-seen order (stable sort).
    pub fn top(&self, n: usize) -> Vec<(String, u64)> {
        let mut ranked = self.entries.clone();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(n);
        ranked
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Global statistics accumulated over every record that passed the
/// configured filters (pass 1).
#[derive(Debug, Clone, Default)]
pub struct AggregateState {
    pub total_requests: u64,
    pub unique_ips: HashSet<String>,
    pub ip_counter: OrderedCounter,
    pub url_counter: OrderedCounter,
    pub method_counter: OrderedCounter,
    pub total_bytes: i64,
    pub success_count: u64,
    pub success_bytes: i64,
    pub client_error_count: u64,
    pub server_error_count: u64,
    pub latest_timestamp: Option<i64>,
}

impl AggregateState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one passing record into the running statistics.
    pub fn observe(&mut self, record: &LogRecord) {
        self.total_requests += 1;
        self.unique_ips.insert(record.ip.clone());
        self.ip_counter.bump(&record.ip);
        self.url_counter.bump(&record.url);
        self.method_counter.bump(&record.method);
        self.total_bytes += record.size;

        self.latest_timestamp = Some(match self.latest_timestamp {
            Some(latest) => latest.max(record.timestamp),
            None => record.timestamp,
        });

        // Statuses outside 2xx/4xx/5xx count toward the total only.
        match record.status {
            200..=299 => {
                self.success_count += 1;
                self.success_bytes += record.size;
            }
            400..=499 => self.client_error_count += 1,
            500..=599 => self.server_error_count += 1,
            _ => {}
        }
    }

    /// Start of the trailing activity window, anchored at the latest
    /// passing timestamp. `None` when no record passed the filters.
    pub fn recent_cutoff(&self) -> Option<i64> {
        self.latest_timestamp.map(|latest| latest - RECENT_WINDOW_SECS)
    }

    /// Average 2xx response size in whole bytes (floor division), or
    /// `None` when no successful request was seen.
    pub fn average_success_size(&self) -> Option<i64> {
        if self.success_count == 0 {
            return None;
        }
        Some(self.success_bytes.div_euclid(self.success_count as i64))
    }
}

/// Activity within the trailing 24-hour window (pass 2).
///
/// The hour map is keyed by `YYYY-MM-DD HH:00` labels; with that fixed
/// format the `BTreeMap`'s lexicographic order is chronological order.
#[derive(Debug, Clone, Default)]
pub struct RecentActivity {
    pub unique_ips: HashSet<String>,
    pub hourly_requests: BTreeMap<String, u64>,
}

impl RecentActivity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one record into the window state. Records before the cutoff
    /// are ignored; the configured method/status/time filters deliberately
    /// do not apply here.
    pub fn observe(&mut self, record: &LogRecord, cutoff: i64) {
        if record.timestamp < cutoff {
            return;
        }
        self.unique_ips.insert(record.ip.clone());
        match hour_bucket(record.timestamp) {
            Some(bucket) => *self.hourly_requests.entry(bucket).or_insert(0) += 1,
            None => debug!(timestamp = record.timestamp, "timestamp outside representable range"),
        }
    }
}

/// UTC calendar-hour label for an epoch-second timestamp.
pub fn hour_bucket(timestamp: i64) -> Option<String> {
    DateTime::from_timestamp(timestamp, 0).map(|dt| dt.format("%Y-%m-%d %H:00").to_string())
}
