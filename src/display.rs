//! Report rendering
//!
//! Renders the accumulated statistics as the fixed textual report, section
//! by section, in a deterministic order. The only side effect is writing to
//! stdout; identical inputs always produce byte-identical output.
//!
//! The title is emphasized with [`colored`], which turns itself off when
//! stdout is not a terminal, so piped output stays plain text.

use crate::config::get_config;
use crate::filter::FilterSpec;
use crate::models::{AggregateState, RecentActivity};
use colored::Colorize;

/// Echo of one time bound, or a fallback label when the filter is unset.
fn bound_label(bound: Option<i64>, fallback: &str) -> String {
    bound.map_or_else(|| fallback.to_string(), |value| value.to_string())
}

/// Human-readable byte size: 1024-based, two decimals, advancing units
/// (B, KB, MB, GB, TB) once the value reaches 1024 in the current unit.
pub fn readable_bytes(num: i64) -> String {
    let mut value = num as f64;
    for unit in ["B", "KB", "MB", "GB"] {
        if value < 1024.0 {
            return format!("{:.2} {}", value, unit);
        }
        value /= 1024.0;
    }
    format!("{:.2} TB", value)
}

/// Prints the full traffic report.
pub struct ReportPrinter {
    top_ips: usize,
    top_urls: usize,
}

impl ReportPrinter {
    pub fn new(top_ips: usize) -> Self {
        Self {
            top_ips,
            top_urls: get_config().output.top_urls,
        }
    }

    pub fn print(&self, filter: &FilterSpec, stats: &AggregateState, recent: &RecentActivity) {
        println!("\n{}\n", "TRAFFIC ANALYSIS REPORT".bright_white().bold());

        println!("Filter settings:");
        println!(
            "- Time range: {} - {}",
            bound_label(filter.start, "all time"),
            bound_label(filter.end, "all time"),
        );
        println!(
            "- Method filter: {}",
            filter.method.as_deref().unwrap_or("all methods")
        );
        println!(
            "- Status filter: {}\n",
            filter
                .status
                .map_or_else(|| "all statuses".to_string(), |range| range.to_string())
        );

        println!("Basic statistics:");
        println!("Total requests: {}", stats.total_requests);
        println!("Unique IPs: {}", stats.unique_ips.len());
        println!(
            "Total data transferred: {} ({})\n",
            stats.total_bytes,
            readable_bytes(stats.total_bytes)
        );

        println!("Request distribution:");
        for (method, count) in stats.method_counter.iter() {
            let percent = count as f64 / stats.total_requests as f64 * 100.0;
            println!("- {}: {:.1}%", method, percent);
        }

        println!("\nPerformance metrics:");
        println!("- Successful requests (2xx): {}", stats.success_count);
        println!("- Client errors (4xx): {}", stats.client_error_count);
        println!("- Server errors (5xx): {}", stats.server_error_count);
        if let Some(average) = stats.average_success_size() {
            println!("- Average response size (2xx): {} bytes", average);
        }

        println!("\nTop {} active IPs:", self.top_ips);
        for (rank, (ip, count)) in stats.ip_counter.top(self.top_ips).iter().enumerate() {
            println!("{}. {}: {} requests", rank + 1, ip, count);
        }

        println!("\nTop {} requested URLs:", self.top_urls);
        for (rank, (url, count)) in stats.url_counter.top(self.top_urls).iter().enumerate() {
            println!("{}. {}: {}", rank + 1, url, count);
        }

        println!("\nRecent activity (last 24h):");
        println!("- Unique IPs: {}", recent.unique_ips.len());
        println!("- Requests per hour:");
        for (hour, count) in &recent.hourly_requests {
            println!("  {}: {}", hour, count);
        }
    }
}
