//! Subcommand implementations

pub mod pack;
pub mod unpack;

use anyhow::{Context, Result};
use colored::*;
use fuzzcache_core::{Progress, Summary};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Prints per-target progress lines on stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleProgress;

impl Progress for ConsoleProgress {
    fn native_loaded(&mut self, target: &str, count: usize) {
        println!(
            "Loaded {} inputs from Go fuzz cache for {}",
            count,
            target.cyan()
        );
    }

    fn corpus_loaded(&mut self, target: &str, count: usize) {
        println!(
            "Loaded {} existing inputs from testdata for {}",
            count,
            target.cyan()
        );
    }

    fn saved(&mut self, target: &str, count: usize, destination: &Path) {
        println!(
            "{} Saved {} inputs for {} to {}",
            "✓".green(),
            count,
            target.cyan(),
            destination.display()
        );
    }

    fn pruned(&mut self, target: &str, count: usize) {
        if count > 0 {
            println!(
                "Removed {} stale inputs for {}",
                count.to_string().yellow(),
                target.cyan()
            );
        }
    }
}

#[derive(Serialize)]
struct Report<'a> {
    command: &'a str,
    native_dir: &'a str,
    corpus_dir: &'a str,
    total_saved: usize,
    #[serde(flatten)]
    summary: &'a Summary,
}

/// Write the JSON summary of a run
pub(crate) fn write_report(
    output: &str,
    command: &str,
    native_dir: &str,
    corpus_dir: &str,
    summary: &Summary,
) -> Result<()> {
    let report = Report {
        command,
        native_dir,
        corpus_dir,
        total_saved: summary.total_saved(),
        summary,
    };

    let json = serde_json::to_string_pretty(&report)
        .with_context(|| "Failed to serialize run summary")?;

    fs::write(output, json).with_context(|| format!("Failed to write report file: {}", output))?;

    Ok(())
}
