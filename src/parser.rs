//! Access-log parsing
//!
//! The log format is plain text, one record per line, exactly six
//! whitespace-separated fields:
//!
//! ```text
//! timestamp(int) ip(str) method(str) url(str) status(int) size(int)
//! ```
//!
//! Malformed lines are recoverable: each one produces a single
//! line-numbered warning on stderr and is skipped, without affecting the
//! exit code. The warnings go through `eprintln!` rather than `tracing` so
//! they stay visible and stable regardless of the logging configuration.
//!
//! Both aggregation passes read the file through [`scan_log`]; it reports
//! I/O failure as a structured `Result` and leaves fatality to the caller.

use crate::models::LogRecord;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// Expected field count per record line.
const FIELD_COUNT: usize = 6;

/// Parses one raw line into a [`LogRecord`].
///
/// Returns `None` for malformed lines after emitting a warning carrying the
/// 1-based line number. Field-count and data-type problems produce distinct
/// diagnostics. No validation beyond integer syntax is applied; status
/// codes outside any class range and negative sizes flow through as-is.
pub fn parse_line(line: &str, line_number: usize) -> Option<LogRecord> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != FIELD_COUNT {
        eprintln!("Warning: invalid format at line {}", line_number);
        return None;
    }

    let (Ok(timestamp), Ok(status), Ok(size)) = (
        fields[0].parse::<i64>(),
        fields[4].parse::<i64>(),
        fields[5].parse::<i64>(),
    ) else {
        eprintln!("Warning: invalid data types at line {}", line_number);
        return None;
    };

    Some(LogRecord {
        timestamp,
        ip: fields[1].to_string(),
        method: fields[2].to_string(),
        url: fields[3].to_string(),
        status,
        size,
    })
}

/// Reads `path` from the top and feeds every well-formed record to `visit`.
///
/// The file handle is scoped to this call and released on every exit path.
/// Errors are returned, never swallowed; pass 1 treats them as fatal while
/// the recent-activity pass degrades to partial results.
pub fn scan_log<F>(path: &Path, mut visit: F) -> Result<()>
where
    F: FnMut(&LogRecord),
{
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let reader = BufReader::new(file);

    let mut line_number = 0;
    let mut skipped = 0;
    for line in reader.lines() {
        line_number += 1;
        let line = line.with_context(|| format!("read error at line {}", line_number))?;
        match parse_line(&line, line_number) {
            Some(record) => visit(&record),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        debug!(skipped, total_lines = line_number, "skipped malformed lines");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn parses_well_formed_line() {
        let record = parse_line("1000 10.0.0.1 GET /a 200 500", 1).unwrap();
        assert_eq!(record.timestamp, 1000);
        assert_eq!(record.ip, "10.0.0.1");
        assert_eq!(record.method, "GET");
        assert_eq!(record.url, "/a");
        assert_eq!(record.status, 200);
        assert_eq!(record.size, 500);
    }

    #[test]
    fn tolerates_extra_whitespace_between_fields() {
        let record = parse_line("  1000\t10.0.0.1  GET\t/a 200  500 ", 1).unwrap();
        assert_eq!(record.url, "/a");
    }

    #[test]
    fn rejects_wrong_field_count() {
        assert!(parse_line("1000 10.0.0.1 GET /a 200", 1).is_none());
        assert!(parse_line("1000 10.0.0.1 GET /a 200 500 extra", 1).is_none());
        assert!(parse_line("", 1).is_none());
    }

    #[test]
    fn rejects_non_integer_fields() {
        assert!(parse_line("soon 10.0.0.1 GET /a 200 500", 1).is_none());
        assert!(parse_line("1000 10.0.0.1 GET /a OK 500", 1).is_none());
        assert!(parse_line("1000 10.0.0.1 GET /a 200 big", 1).is_none());
    }

    #[test]
    fn accepts_out_of_range_values_without_validation() {
        let record = parse_line("-1 10.0.0.1 GET /a 999 -42", 7).unwrap();
        assert_eq!(record.timestamp, -1);
        assert_eq!(record.status, 999);
        assert_eq!(record.size, -42);
    }

    #[test]
    fn scan_skips_malformed_lines_and_keeps_going() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "1000 10.0.0.1 GET /a 200 500").unwrap();
        writeln!(file, "not a record").unwrap();
        writeln!(file, "2000 10.0.0.2 POST /b 404 300").unwrap();

        let mut seen = Vec::new();
        scan_log(file.path(), |record| seen.push(record.ip.clone())).unwrap();
        assert_eq!(seen, vec!["10.0.0.1", "10.0.0.2"]);
    }

    #[test]
    fn scan_reports_missing_file() {
        let err = scan_log(Path::new("/nonexistent/access.log"), |_| {}).unwrap_err();
        let io = err.downcast_ref::<std::io::Error>().unwrap();
        assert_eq!(io.kind(), std::io::ErrorKind::NotFound);
    }
}
