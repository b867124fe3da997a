//! Progress reporting for the pack and unpack orchestrators

use std::path::Path;

/// Receives per-target progress from [`crate::pack`] and [`crate::unpack`]
///
/// All methods default to doing nothing.
pub trait Progress {
    /// Seeds were loaded from the native cache for `target`
    fn native_loaded(&mut self, _target: &str, _count: usize) {}

    /// Seeds were loaded from the consolidated corpus for `target`
    fn corpus_loaded(&mut self, _target: &str, _count: usize) {}

    /// `count` distinct seeds were written for `target` to `destination`
    fn saved(&mut self, _target: &str, _count: usize, _destination: &Path) {}

    /// Stale native entries were removed for `target`
    fn pruned(&mut self, _target: &str, _count: usize) {}
}

/// A [`Progress`] that discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl Progress for NoProgress {}
