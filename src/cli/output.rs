use colored::*;
use std::io::{self, Write};

use super::args::OutputFormat;
use crate::catalog::Catalog;
use crate::cleaner::{CategoryOutcome, CleanEvent, DoneSummary};
use crate::common::format::{count_label, display_path, format_size, paint_size};
use crate::scanner::TotalReport;

/// Print scan results in human-readable format
pub fn print_scan_results(report: &TotalReport) {
    println!();
    println!("{}  CleanSweep Scan Results ({})", "🧹", report.os);
    println!("{}", "─".repeat(60).dimmed());
    println!(
        "  Scanned in {}  •  {} reclaimable  •  {}",
        format!("{:.2}s", report.duration_secs).cyan(),
        paint_size(report.total),
        count_label(report.categories.len() as u64, "category", "categories").dimmed()
    );
    println!("{}", "─".repeat(60).dimmed());
    println!();

    if report.is_empty() {
        println!("  {} Nothing to clean here!", "✨");
        return;
    }

    for result in &report.categories {
        println!(
            "    {:<32} {:>12}",
            result.category,
            paint_size(result.size)
        );
        for path in result.paths.iter().filter(|p| p.exists()) {
            println!("      {} {}", "↳".dimmed(), display_path(path).dimmed());
        }
    }

    println!();
    println!("{}", "─".repeat(60).dimmed());
    println!(
        "  {} Total reclaimable: {}",
        "💾",
        paint_size(report.total)
    );
    println!("  {} Run {} to reclaim it", "💡", "cleansweep clean".cyan());
    println!();
}

/// Print scan results as JSON
pub fn print_scan_json(report: &TotalReport) {
    match serde_json::to_string_pretty(report) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing results: {}", e),
    }
}

/// Print a minimal summary
pub fn print_scan_quiet(report: &TotalReport) {
    println!(
        "{}  {}  {}",
        format_size(report.total),
        report.total,
        report.categories.len()
    );
}

/// Print every category and candidate path, marking the ones that exist
pub fn print_targets(catalog: &Catalog) {
    println!();
    println!("{}", "Candidate locations".bold().underline());
    println!();
    for category in catalog {
        println!("  {}", category.name.bold());
        if category.paths.is_empty() {
            println!("    {} {}", "·".dimmed(), "(no matching paths)".dimmed());
        }
        for path in &category.paths {
            let marker = if path.exists() { "●".green() } else { "○".dimmed() };
            println!("    {} {}", marker, display_path(path));
        }
    }
    println!();
}

/// Write one clean event and flush, so the consumer sees it immediately.
///
/// JSON output is one object per line. With `quiet`, human output keeps only
/// categories that hit errors plus the summary. An error means the consumer
/// is gone.
pub fn write_clean_event(
    out: &mut impl Write,
    event: &CleanEvent,
    fmt: &OutputFormat,
    quiet: bool,
) -> io::Result<()> {
    match fmt {
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, event)?;
            writeln!(out)?;
        }
        OutputFormat::Human => match event {
            CleanEvent::Category(outcome) if quiet && outcome.errors == 0 => {}
            CleanEvent::Category(outcome) => write_outcome_line(out, outcome)?,
            CleanEvent::Done(done) => write_done_summary(out, done)?,
        },
        OutputFormat::Quiet => {
            if let CleanEvent::Done(done) = event {
                writeln!(out, "{}  {}  {}", format_size(done.total_freed), done.total_freed, done.errors)?;
            }
        }
    }
    out.flush()
}

fn write_outcome_line(out: &mut impl Write, outcome: &CategoryOutcome) -> io::Result<()> {
    let icon = if outcome.errors > 0 { "⚠".yellow() } else { "✓".green() };
    let errors = if outcome.errors > 0 {
        format!("  {} errors", outcome.errors).yellow().to_string()
    } else {
        String::new()
    };
    writeln!(
        out,
        "  {} {:<32.32} {:>12}  ({}){}",
        icon,
        outcome.category,
        paint_size(outcome.freed),
        count_label(outcome.items, "item", "items").dimmed(),
        errors
    )
}

fn write_done_summary(out: &mut impl Write, done: &DoneSummary) -> io::Result<()> {
    writeln!(out, "{}", "─".repeat(60).dimmed())?;
    if done.cancelled {
        writeln!(out, "  {} Cancelled before all categories were cleaned", "✗".red())?;
    }
    writeln!(
        out,
        "  {} Freed {}",
        "💾",
        paint_size(done.total_freed)
    )?;
    if done.errors > 0 {
        writeln!(
            out,
            "  {} {} entries could not be removed (in use or permission denied)",
            "⚠".yellow(),
            done.errors.to_string().yellow()
        )?;
    }
    writeln!(out)
}
