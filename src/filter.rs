//! Record filtering
//!
//! [`FilterSpec`] captures the user's `--method`/`--status`/`--start`/`--end`
//! selections once at startup and is immutable afterwards. Matching is a
//! pure predicate; all configured filters combine with logical AND.
//!
//! Absent bounds are `None` rather than zero sentinels, so `--start 0` and
//! `--end 0` are honored as real inclusive bounds.

use crate::models::LogRecord;
use anyhow::{bail, Result};
use std::fmt;

/// Inclusive status-code range. A single `--status 404` is the degenerate
/// range `404-404`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusRange {
    pub low: i64,
    pub high: i64,
}

impl StatusRange {
    /// Parses the `--status` argument: a single integer or `LOW-HIGH`.
    pub fn parse(raw: &str) -> Result<Self> {
        if let Some((low, high)) = raw.split_once('-') {
            let (Ok(low), Ok(high)) = (low.parse::<i64>(), high.parse::<i64>()) else {
                bail!("Invalid status range format");
            };
            if low > high {
                bail!("Invalid status range format");
            }
            Ok(Self { low, high })
        } else {
            let Ok(code) = raw.parse::<i64>() else {
                bail!("Invalid status code format");
            };
            Ok(Self { low: code, high: code })
        }
    }

    pub fn contains(&self, status: i64) -> bool {
        self.low <= status && status <= self.high
    }
}

impl fmt::Display for StatusRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.low == self.high {
            write!(f, "{}", self.low)
        } else {
            write!(f, "{}-{}", self.low, self.high)
        }
    }
}

/// The active record filters, built once from CLI input.
#[derive(Debug, Clone, Default)]
pub struct FilterSpec {
    /// Exact, case-sensitive method match.
    pub method: Option<String>,
    pub status: Option<StatusRange>,
    /// Inclusive epoch-second bounds.
    pub start: Option<i64>,
    pub end: Option<i64>,
}

impl FilterSpec {
    /// True when `record` satisfies every configured filter.
    pub fn matches(&self, record: &LogRecord) -> bool {
        if let Some(method) = &self.method {
            if record.method != *method {
                return false;
            }
        }
        if let Some(range) = &self.status {
            if !range.contains(record.status) {
                return false;
            }
        }
        if let Some(start) = self.start {
            if record.timestamp < start {
                return false;
            }
        }
        if let Some(end) = self.end {
            if record.timestamp > end {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(timestamp: i64, method: &str, status: i64) -> LogRecord {
        LogRecord {
            timestamp,
            ip: "10.0.0.1".to_string(),
            method: method.to_string(),
            url: "/".to_string(),
            status,
            size: 0,
        }
    }

    #[test]
    fn parses_single_code_as_degenerate_range() {
        let range = StatusRange::parse("404").unwrap();
        assert_eq!(range, StatusRange { low: 404, high: 404 });
        assert_eq!(range.to_string(), "404");
    }

    #[test]
    fn parses_inclusive_range() {
        let range = StatusRange::parse("400-499").unwrap();
        assert!(range.contains(400));
        assert!(range.contains(499));
        assert!(!range.contains(500));
        assert_eq!(range.to_string(), "400-499");
    }

    #[test]
    fn rejects_bad_syntax() {
        assert!(StatusRange::parse("abc").is_err());
        assert!(StatusRange::parse("400-").is_err());
        assert!(StatusRange::parse("-499").is_err());
        assert!(StatusRange::parse("400-499-599").is_err());
    }

    #[test]
    fn rejects_inverted_range() {
        assert!(StatusRange::parse("499-400").is_err());
    }

    #[test]
    fn empty_spec_matches_everything() {
        let spec = FilterSpec::default();
        assert!(spec.matches(&record(0, "GET", 200)));
        assert!(spec.matches(&record(-1, "BREW", 418)));
    }

    #[test]
    fn method_match_is_case_sensitive() {
        let spec = FilterSpec {
            method: Some("GET".to_string()),
            ..Default::default()
        };
        assert!(spec.matches(&record(0, "GET", 200)));
        assert!(!spec.matches(&record(0, "get", 200)));
        assert!(!spec.matches(&record(0, "POST", 200)));
    }

    #[test]
    fn time_bounds_are_inclusive() {
        let spec = FilterSpec {
            start: Some(100),
            end: Some(200),
            ..Default::default()
        };
        assert!(!spec.matches(&record(99, "GET", 200)));
        assert!(spec.matches(&record(100, "GET", 200)));
        assert!(spec.matches(&record(200, "GET", 200)));
        assert!(!spec.matches(&record(201, "GET", 200)));
    }

    #[test]
    fn zero_bound_is_a_real_bound() {
        let spec = FilterSpec {
            start: Some(0),
            ..Default::default()
        };
        assert!(!spec.matches(&record(-5, "GET", 200)));
        assert!(spec.matches(&record(0, "GET", 200)));
    }

    #[test]
    fn filters_combine_with_and() {
        let spec = FilterSpec {
            method: Some("GET".to_string()),
            status: Some(StatusRange { low: 200, high: 299 }),
            start: Some(10),
            end: None,
        };
        assert!(spec.matches(&record(10, "GET", 204)));
        assert!(!spec.matches(&record(10, "GET", 404)));
        assert!(!spec.matches(&record(10, "POST", 204)));
        assert!(!spec.matches(&record(9, "GET", 204)));
    }
}
