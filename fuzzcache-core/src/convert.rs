//! Pack and unpack orchestrators
//!
//! Targets are processed one at a time in name order. The first error aborts
//! the run; targets already written stay written.

use crate::constants::target_from_corpus_file;
use crate::corpus;
use crate::error::CorpusError;
use crate::native;
use crate::progress::Progress;
use crate::Result;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

#[cfg(feature = "logging")]
use tracing::debug;

/// Options for [`unpack`]
#[derive(Debug, Clone, Copy, Default)]
pub struct UnpackOptions {
    /// Remove files in each target's native directory that were not just written
    pub prune: bool,
}

/// Counts for one processed target
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetSummary {
    /// Target name
    pub target: String,
    /// Seeds loaded from the native cache
    pub native_loaded: usize,
    /// Seeds loaded from the consolidated corpus
    pub corpus_loaded: usize,
    /// Distinct seeds written
    pub saved: usize,
    /// Stale native entries removed
    pub pruned: usize,
    /// File or directory written to
    pub destination: PathBuf,
}

/// Result of a pack or unpack run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// One entry per processed target, in processing order
    pub targets: Vec<TargetSummary>,
}

impl Summary {
    /// Total number of seeds written across all targets
    pub fn total_saved(&self) -> usize {
        self.targets.iter().map(|t| t.saved).sum()
    }
}

/// Merge every target in the native cache into its consolidated corpus file
///
/// Each subdirectory of `native_root` is a target. The corpus file is
/// rewritten with the union of the native seeds and the seeds it already
/// held; a target without a corpus file starts from nothing.
pub fn pack(
    native_root: &Path,
    corpus_root: &Path,
    progress: &mut dyn Progress,
) -> Result<Summary> {
    let mut summary = Summary::default();

    for target in native_targets(native_root)? {
        #[cfg(feature = "logging")]
        debug!("Packing target {}", target);

        let mut seeds = native::load_target(native_root, &target)?;
        let native_loaded = seeds.len();
        progress.native_loaded(&target, native_loaded);

        let existing = match corpus::load_corpus(corpus_root, &target) {
            Ok(existing) => existing,
            Err(err) if err.is_not_found() => Vec::new(),
            Err(err) => return Err(err),
        };
        let corpus_loaded = existing.len();
        progress.corpus_loaded(&target, corpus_loaded);

        seeds.extend(existing);
        let destination = corpus::corpus_path(corpus_root, &target)?;
        let saved = corpus::save_corpus(corpus_root, &target, seeds)?;
        progress.saved(&target, saved, &destination);

        summary.targets.push(TargetSummary {
            target,
            native_loaded,
            corpus_loaded,
            saved,
            pruned: 0,
            destination,
        });
    }

    Ok(summary)
}

/// Regenerate native cache entries from every consolidated corpus file
///
/// Each `<target>.fuzz` file directly under `corpus_root` is written out as
/// one native entry per seed under `<native_root>/<target>/`.
pub fn unpack(
    native_root: &Path,
    corpus_root: &Path,
    options: UnpackOptions,
    progress: &mut dyn Progress,
) -> Result<Summary> {
    let mut summary = Summary::default();

    for target in corpus_targets(corpus_root)? {
        #[cfg(feature = "logging")]
        debug!("Unpacking target {}", target);

        let seeds = corpus::load_corpus(corpus_root, &target)?;
        let corpus_loaded = seeds.len();
        progress.corpus_loaded(&target, corpus_loaded);

        let destination = native::target_dir(native_root, &target)?;
        fs::create_dir_all(&destination).map_err(|e| CorpusError::io(&destination, e))?;
        let names = native::write_entries(&destination, &seeds)?;
        progress.saved(&target, names.len(), &destination);

        let pruned = if options.prune {
            let removed = native::prune_stale(&destination, &names)?;
            progress.pruned(&target, removed);
            removed
        } else {
            0
        };

        summary.targets.push(TargetSummary {
            target,
            native_loaded: 0,
            corpus_loaded,
            saved: names.len(),
            pruned,
            destination,
        });
    }

    Ok(summary)
}

/// Names of the subdirectories of the native cache root, sorted
fn native_targets(native_root: &Path) -> Result<Vec<String>> {
    let mut targets = Vec::new();

    for entry in fs::read_dir(native_root).map_err(|e| CorpusError::io(native_root, e))? {
        let entry = entry.map_err(|e| CorpusError::io(native_root, e))?;
        let file_type = entry
            .file_type()
            .map_err(|e| CorpusError::io(entry.path(), e))?;
        if !file_type.is_dir() {
            continue;
        }
        targets.push(utf8_name(&entry)?);
    }

    targets.sort();
    Ok(targets)
}

/// Target names of the `.fuzz` files directly under the corpus root, sorted
fn corpus_targets(corpus_root: &Path) -> Result<Vec<String>> {
    let mut targets = Vec::new();

    for entry in fs::read_dir(corpus_root).map_err(|e| CorpusError::io(corpus_root, e))? {
        let entry = entry.map_err(|e| CorpusError::io(corpus_root, e))?;
        let file_type = entry
            .file_type()
            .map_err(|e| CorpusError::io(entry.path(), e))?;
        if file_type.is_dir() {
            continue;
        }

        let file_name = entry.file_name();
        let Some(target) = file_name.to_str().and_then(target_from_corpus_file) else {
            continue;
        };
        targets.push(target.to_string());
    }

    targets.sort();
    Ok(targets)
}

fn utf8_name(entry: &fs::DirEntry) -> Result<String> {
    entry
        .file_name()
        .into_string()
        .map_err(|name| CorpusError::InvalidTargetName(name.to_string_lossy().into_owned()))
}
