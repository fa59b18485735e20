use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use keydash_log::format_duration;
use keydash_log::parsers::{detect_format, parse, SensorChannel};

#[derive(Parser)]
#[command(name = "inspect_log", about = "Parse an ECU log and print a summary")]
struct Cli {
    /// Log file (comma-delimited with a header row, or a JSON array)
    path: PathBuf,

    /// Number of sample frames to print
    #[arg(long, default_value_t = 5)]
    rows: usize,

    /// Print the parsed frames as JSON instead of a summary
    #[arg(long)]
    json: bool,

    /// Log parser diagnostics at debug level (RUST_LOG overrides)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let contents = fs::read_to_string(&cli.path)
        .with_context(|| format!("failed to read {}", cli.path.display()))?;
    tracing::debug!("Read {} bytes from {}", contents.len(), cli.path.display());

    let log = parse(&contents);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&log)?);
        return Ok(());
    }

    println!("=== Parse Results ===");
    println!(
        "Format: {}",
        detect_format(&contents).map_or("Empty", |f| f.name())
    );
    println!("Frames: {}", log.len());
    println!(
        "Duration: {} ({} ms)",
        format_duration(log.duration_ms),
        log.duration_ms
    );

    if log.is_empty() {
        return Ok(());
    }

    println!("\n=== Channels ===");
    for channel in SensorChannel::ALL {
        let data = log.channel_data(channel);
        let min = data.iter().copied().fold(f64::INFINITY, f64::min);
        let max = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        println!(
            "  {:<18} [{:>3}]  min {:>10.2}  max {:>10.2}",
            channel.name(),
            channel.unit(),
            min,
            max
        );
    }

    println!("\n=== Sample Data (first {} frames) ===", cli.rows);
    let header: Vec<String> = SensorChannel::ALL
        .iter()
        .map(|c| format!("{:>10}", c.unit()))
        .collect();
    println!("  {:>5} | {:>8} | {}", "Index", "Time", header.join(" | "));

    for frame in log.frames.iter().take(cli.rows) {
        let values: Vec<String> = SensorChannel::ALL
            .iter()
            .map(|c| format!("{:>10.2}", frame.value(*c)))
            .collect();
        println!(
            "  {:>5} | {:>8} | {}",
            frame.index,
            format_duration(frame.timestamp_ms),
            values.join(" | ")
        );
    }

    if log.len() > cli.rows {
        println!("  ... and {} more frames", log.len() - cli.rows);
    }

    Ok(())
}
