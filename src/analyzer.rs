//! Traffic Analysis Engine
//!
//! Orchestrates the whole pipeline: one filtered pass over the log that
//! builds the global [`AggregateState`], a trailing-24-hour cutoff derived
//! from that pass, a second unfiltered pass restricted to the cutoff, and
//! the final report.
//!
//! Both passes share the same scan loop ([`crate::parser::scan_log`]); what
//! differs is how each treats failure. Pass 1 is fatal on I/O errors (a
//! report over no data is meaningless), while the recent-activity pass logs
//! the failure and keeps whatever partial window state it had, so a
//! transient error there can never take down an otherwise complete report.

use crate::display::ReportPrinter;
use crate::filter::FilterSpec;
use crate::models::{AggregateState, RecentActivity};
use crate::parser;
use anyhow::Result;
use std::path::Path;
use tracing::{debug, warn};

pub struct TrafficAnalyzer {
    filter: FilterSpec,
    top_ips: usize,
}

impl TrafficAnalyzer {
    pub fn new(filter: FilterSpec, top_ips: usize) -> Self {
        Self { filter, top_ips }
    }

    /// Pass 1: fold every record that passes the configured filters into
    /// global statistics. I/O failure here is fatal.
    pub fn collect_stats(&self, logfile: &Path) -> Result<AggregateState> {
        let mut stats = AggregateState::new();
        parser::scan_log(logfile, |record| {
            if self.filter.matches(record) {
                stats.observe(record);
            }
        })?;
        debug!(
            total_requests = stats.total_requests,
            unique_ips = stats.unique_ips.len(),
            "finished statistics pass"
        );
        Ok(stats)
    }

    /// Pass 2: re-read the source and bucket everything at or after
    /// `cutoff` by UTC hour. The configured filters are deliberately not
    /// reapplied; only the cutoff gates records. Failure degrades to
    /// whatever partial state was accumulated.
    pub fn recent_activity(&self, logfile: &Path, cutoff: i64) -> RecentActivity {
        let mut recent = RecentActivity::new();
        if let Err(e) = parser::scan_log(logfile, |record| recent.observe(record, cutoff)) {
            warn!(error = %e, "recent-activity pass ended early; reporting partial window data");
        }
        recent
    }

    /// Runs both passes and prints the report. Prints the no-data notice
    /// and returns cleanly when nothing passes the filters.
    pub fn run(&self, logfile: &Path) -> Result<()> {
        let stats = self.collect_stats(logfile)?;

        let Some(cutoff) = stats.recent_cutoff() else {
            println!("No data after applying filters");
            return Ok(());
        };

        let recent = self.recent_activity(logfile, cutoff);
        ReportPrinter::new(self.top_ips).print(&self.filter, &stats, &recent);
        Ok(())
    }
}
