use super::{write_report, ConsoleProgress};
use anyhow::{Context, Result};
use fuzzcache_core::UnpackOptions;
use std::path::Path;
use tracing::info;

pub fn execute(
    native_dir: &str,
    corpus_dir: &str,
    prune: bool,
    report: Option<&str>,
) -> Result<()> {
    info!("Unpacking fuzz inputs from {} into {}", corpus_dir, native_dir);
    println!(
        "Unpacking fuzz inputs from testdata fuzz cache {} into Go fuzz cache {}",
        corpus_dir, native_dir
    );

    let summary = fuzzcache_core::unpack(
        Path::new(native_dir),
        Path::new(corpus_dir),
        UnpackOptions { prune },
        &mut ConsoleProgress,
    )
    .with_context(|| format!("Failed to unpack fuzz inputs from {}", corpus_dir))?;

    if let Some(output) = report {
        write_report(output, "unpack", native_dir, corpus_dir, &summary)?;
        info!("Report written to: {}", output);
    }

    info!(
        "Successfully unpacked {} targets ({} inputs total)",
        summary.targets.len(),
        summary.total_saved()
    );

    Ok(())
}
