use super::{write_report, ConsoleProgress};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

pub fn execute(native_dir: &str, corpus_dir: &str, report: Option<&str>) -> Result<()> {
    info!("Packing fuzz inputs from {} into {}", native_dir, corpus_dir);
    println!(
        "Packing fuzz inputs from Go fuzz cache {} into testdata fuzz cache {}",
        native_dir, corpus_dir
    );

    let summary = fuzzcache_core::pack(
        Path::new(native_dir),
        Path::new(corpus_dir),
        &mut ConsoleProgress,
    )
    .with_context(|| format!("Failed to pack fuzz inputs from {}", native_dir))?;

    if let Some(output) = report {
        write_report(output, "pack", native_dir, corpus_dir, &summary)?;
        info!("Report written to: {}", output);
    }

    info!(
        "Successfully packed {} targets ({} inputs total)",
        summary.targets.len(),
        summary.total_saved()
    );

    Ok(())
}
