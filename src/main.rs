use anyhow::Error;
use clap::Parser;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::process;

use traffic_analyzer::analyzer::TrafficAnalyzer;
use traffic_analyzer::filter::{FilterSpec, StatusRange};
use traffic_analyzer::logging;

#[derive(Parser)]
#[command(name = "traffic-analyzer")]
#[command(about = "Descriptive traffic statistics from fixed-format access logs")]
#[command(version)]
struct Cli {
    /// Path to the access log file
    logfile: PathBuf,
    /// Filter by HTTP method (exact match)
    #[arg(long)]
    method: Option<String>,
    /// Filter by status code or inclusive range (e.g. 404 or 400-499)
    #[arg(long)]
    status: Option<String>,
    /// Inclusive start timestamp (epoch seconds)
    #[arg(long)]
    start: Option<i64>,
    /// Inclusive end timestamp (epoch seconds)
    #[arg(long)]
    end: Option<i64>,
    /// Number of top client IPs to list
    #[arg(long, default_value_t = 3)]
    top: usize,
}

fn main() {
    let cli = Cli::parse();
    logging::init_logging();

    // Bad --status syntax is fatal before any I/O happens.
    let status = match cli.status.as_deref().map(StatusRange::parse).transpose() {
        Ok(status) => status,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let filter = FilterSpec {
        method: cli.method,
        status,
        start: cli.start,
        end: cli.end,
    };

    let analyzer = TrafficAnalyzer::new(filter, cli.top);
    if let Err(e) = analyzer.run(&cli.logfile) {
        report_fatal(&e);
        process::exit(1);
    }
}

fn report_fatal(e: &Error) {
    match e.downcast_ref::<std::io::Error>().map(|io| io.kind()) {
        Some(ErrorKind::NotFound) => eprintln!("Error: log file not found"),
        Some(ErrorKind::PermissionDenied) => eprintln!("Error: no permission to read log file"),
        _ => eprintln!("Error: {:#}", e),
    }
}
