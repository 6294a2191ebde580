//! # CLI Module
//!
//! Command-line interface for the media sorter.
//!
//! ## Usage
//! ```bash
//! # Sort a memory card into a dated library
//! media-sort /Volumes/CARD/DCIM ~/Pictures/Sorted
//!
//! # See what would happen first
//! media-sort /Volumes/CARD/DCIM ~/Pictures/Sorted --dry-run
//!
//! # Per-probe detail
//! media-sort /Volumes/CARD/DCIM ~/Pictures/Sorted --verbose
//! ```

use clap::{Parser, ValueEnum};
use console::{style, Term};
use media_sorter::core::Organizer;
use media_sorter::error::Result;
use media_sorter::events::{
    CopyEvent, Event, EventChannel, ResolveEvent, RunEvent, RunSummary, WalkEvent,
};
use std::path::PathBuf;
use std::thread;

/// Media Sorter - Copy photos into dated folders without duplicates
#[derive(Parser, Debug)]
#[command(name = "media-sort")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to read photos and videos from
    source: PathBuf,

    /// Directory to sort them into (YYYY/MM/DD subfolders)
    destination: PathBuf,

    /// Report what would be copied without writing anything
    #[arg(long)]
    dry_run: bool,

    /// Skip hidden files and directories
    #[arg(long)]
    skip_hidden: bool,

    /// Follow symbolic links in the source tree
    #[arg(long)]
    follow_symlinks: bool,

    /// Summary format
    #[arg(short, long, default_value = "pretty")]
    output: OutputFormat,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Human-readable output with colors
    Pretty,
    /// JSON output for scripting
    Json,
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    media_sorter::init_tracing(if cli.verbose { "debug" } else { "info" });

    let organizer = Organizer::builder()
        .source(&cli.source)
        .destination(&cli.destination)
        .dry_run(cli.dry_run)
        .skip_hidden(cli.skip_hidden)
        .follow_symlinks(cli.follow_symlinks)
        .build()?;

    let (sender, receiver) = EventChannel::new();

    // Render events as log lines while the organizer works
    let event_thread = thread::spawn(move || {
        for event in receiver.iter() {
            log_event(&event);
        }
    });

    let summary = organizer.run_with_events(&sender);

    drop(sender);
    event_thread.join().ok();

    match cli.output {
        OutputFormat::Pretty => print_pretty_summary(&Term::stderr(), &summary, cli.dry_run),
        OutputFormat::Json => print_json_summary(&summary),
    }

    Ok(())
}

fn log_event(event: &Event) {
    match event {
        Event::Run(RunEvent::Started {
            source_root,
            destination_root,
            dry_run,
        }) => {
            tracing::info!(
                dry_run,
                "Sorting {} into {}",
                source_root.display(),
                destination_root.display()
            );
        }
        Event::Run(RunEvent::Completed { summary }) => {
            tracing::debug!(?summary, "Run complete");
        }
        Event::Walk(WalkEvent::Directory { path }) => {
            tracing::info!("{} is a directory", path.display());
        }
        Event::Walk(WalkEvent::Skipped { path }) => {
            tracing::info!("{} is not a regular file, skipping", path.display());
        }
        Event::Walk(WalkEvent::Error { path, message }) => {
            tracing::warn!(path = %path.display(), "{}", message);
        }
        Event::Resolve(ResolveEvent::Resolved {
            source,
            destination,
        }) => {
            tracing::debug!("{} -> {}", source.display(), destination.display());
        }
        Event::Resolve(ResolveEvent::Duplicate { source, existing }) => {
            tracing::info!(
                "{} already present as {}, not copying",
                source.display(),
                existing.display()
            );
        }
        Event::Resolve(ResolveEvent::TimestampUnavailable { source, reason }) => {
            tracing::warn!("Skipping {}: {}", source.display(), reason);
        }
        Event::Resolve(ResolveEvent::ProbeExhausted {
            source,
            directory,
            attempts,
        }) => {
            tracing::warn!(
                "Skipping {}: no free name in {} after {} attempts",
                source.display(),
                directory.display(),
                attempts
            );
        }
        Event::Resolve(ResolveEvent::Failed { source, message }) => {
            tracing::warn!("Skipping {}: {}", source.display(), message);
        }
        Event::Copy(CopyEvent::Copied {
            destination,
            bytes_written,
            ..
        }) => {
            tracing::info!(
                "Copied {} ({} bytes written)",
                destination.display(),
                bytes_written
            );
        }
        Event::Copy(CopyEvent::Planned {
            source,
            destination,
        }) => {
            tracing::info!(
                "Would copy {} to {}",
                source.display(),
                destination.display()
            );
        }
        Event::Copy(CopyEvent::Refused { source, message }) => {
            tracing::warn!(path = %source.display(), "{}", message);
        }
        Event::Copy(CopyEvent::Failed {
            source, message, ..
        }) => {
            tracing::error!(path = %source.display(), "{}", message);
        }
    }
}

fn print_pretty_summary(term: &Term, summary: &RunSummary, dry_run: bool) {
    term.write_line("").ok();
    let heading = if dry_run { "Dry Run Complete" } else { "Sort Complete" };
    term.write_line(&format!("{} {}", style("✓").green().bold(), heading))
        .ok();
    term.write_line("").ok();

    term.write_line(&format!(
        "  {} files examined in {:.1}s",
        style(summary.files_seen).cyan(),
        summary.duration_ms as f64 / 1000.0
    ))
    .ok();

    let verb = if dry_run { "would be copied" } else { "copied" };
    term.write_line(&format!(
        "  {} {} ({})",
        style(summary.copied).cyan(),
        verb,
        style(format_bytes(summary.bytes_written)).yellow()
    ))
    .ok();

    term.write_line(&format!(
        "  {} already present",
        style(summary.duplicates).cyan()
    ))
    .ok();

    for (count, label) in [
        (summary.timestamp_unavailable, "without a capture date"),
        (summary.probe_exhausted, "with no free file name"),
        (summary.refused, "already at their destination"),
        (summary.errors, "errors"),
    ] {
        if count > 0 {
            term.write_line(&format!("  {} {}", style(count).yellow(), label))
                .ok();
        }
    }
}

fn print_json_summary(summary: &RunSummary) {
    match serde_json::to_string_pretty(summary) {
        Ok(json) => println!("{}", json),
        Err(e) => tracing::error!("Failed to serialize summary: {}", e),
    }
}

fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}
