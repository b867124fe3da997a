//! Native cache entries
//!
//! The Go fuzzing engine keeps one file per seed under
//! `<root>/<target>/<name>`, where `<name>` is the first 16 hex characters of
//! the SHA-256 digest of the file content:
//!
//! ```text
//! go test fuzz v1
//! []byte("...")
//! ```

use crate::constants::{
    is_valid_target_name, BYTES_PREFIX, BYTES_SUFFIX, ENC_VERSION_1, NATIVE_NAME_LEN,
};
use crate::error::CorpusError;
use crate::quote;
use crate::{Result, Seed};
use sha2::{Digest, Sha256};
use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[cfg(feature = "logging")]
use tracing::{debug, warn};

/// Directory holding the native entries of one target
pub fn target_dir(native_root: &Path, target: &str) -> Result<PathBuf> {
    if !is_valid_target_name(target) {
        return Err(CorpusError::InvalidTargetName(target.to_string()));
    }
    Ok(native_root.join(target))
}

/// Build the full file content of a native entry for one seed
pub fn encode_entry(seed: &[u8]) -> String {
    format!(
        "{}\n{}{}{}\n",
        ENC_VERSION_1,
        BYTES_PREFIX,
        quote::encode(seed),
        BYTES_SUFFIX
    )
}

/// Content-derived file name of a native entry
pub fn entry_name(content: &[u8]) -> String {
    let mut name = hex::encode(Sha256::digest(content));
    name.truncate(NATIVE_NAME_LEN);
    name
}

/// Parse the content of one native entry
///
/// Returns the first `[]byte(...)` payload that decodes. Payload lines that
/// fail to decode are logged and skipped; if every payload line fails the
/// entry yields `Ok(None)`. An entry without any payload line is a
/// [`CorpusError::MissingPayload`].
pub fn parse_entry<R: BufRead>(reader: R, path: &Path) -> Result<Option<Seed>> {
    let mut saw_payload_line = false;

    for (_index, raw) in reader.split(b'\n').enumerate() {
        let raw = raw.map_err(|e| CorpusError::io(path, e))?;
        let line = raw.strip_suffix(b"\r").unwrap_or(&raw);

        let Some(token) = line
            .strip_prefix(BYTES_PREFIX.as_bytes())
            .and_then(|rest| rest.strip_suffix(BYTES_SUFFIX.as_bytes()))
        else {
            continue;
        };
        saw_payload_line = true;

        match quote::decode_bytes(token) {
            Ok(seed) => return Ok(Some(Seed::from(seed))),
            Err(_err) => {
                #[cfg(feature = "logging")]
                warn!(
                    "Skipping undecodable payload in {} line {}: {}",
                    path.display(),
                    _index + 1,
                    _err
                );
            }
        }
    }

    if saw_payload_line {
        #[cfg(feature = "logging")]
        warn!("No decodable payload in {}, skipping entry", path.display());
        Ok(None)
    } else {
        Err(CorpusError::MissingPayload {
            path: path.to_path_buf(),
        })
    }
}

/// Read one native entry file
pub fn read_entry(path: &Path) -> Result<Option<Seed>> {
    let file = File::open(path).map_err(|e| CorpusError::io(path, e))?;
    parse_entry(BufReader::new(file), path)
}

/// Load every seed stored for `target` under the native cache root
///
/// Entries are walked recursively in file name order.
pub fn load_target(native_root: &Path, target: &str) -> Result<Vec<Seed>> {
    let base = target_dir(native_root, target)?;
    let mut seeds = Vec::new();

    for entry in WalkDir::new(&base).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(&base).to_path_buf();
            CorpusError::io(path, e.into())
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        if let Some(seed) = read_entry(entry.path())? {
            seeds.push(seed);
        }
    }

    #[cfg(feature = "logging")]
    debug!("Loaded {} native entries from {}", seeds.len(), base.display());

    Ok(seeds)
}

/// Write each seed as a native entry in `dir`, returning the names written
///
/// `dir` must already exist. Existing files with the same name are
/// overwritten; identical seeds map to the same name.
pub fn write_entries(dir: &Path, seeds: &[Seed]) -> Result<BTreeSet<String>> {
    let mut names = BTreeSet::new();

    for seed in seeds {
        let content = encode_entry(seed);
        let name = entry_name(content.as_bytes());
        let path = dir.join(&name);
        fs::write(&path, content).map_err(|e| CorpusError::io(&path, e))?;
        names.insert(name);
    }

    #[cfg(feature = "logging")]
    debug!("Wrote {} native entries to {}", names.len(), dir.display());

    Ok(names)
}

/// Delete regular files directly in `dir` whose names are not in `keep`
pub fn prune_stale(dir: &Path, keep: &BTreeSet<String>) -> Result<usize> {
    let mut removed = 0;

    for entry in fs::read_dir(dir).map_err(|e| CorpusError::io(dir, e))? {
        let entry = entry.map_err(|e| CorpusError::io(dir, e))?;
        let path = entry.path();
        let file_type = entry.file_type().map_err(|e| CorpusError::io(&path, e))?;
        if !file_type.is_file() {
            continue;
        }

        let stale = entry
            .file_name()
            .to_str()
            .map_or(true, |name| !keep.contains(name));
        if stale {
            fs::remove_file(&path).map_err(|e| CorpusError::io(&path, e))?;
            #[cfg(feature = "logging")]
            debug!("Removed stale entry {}", path.display());
            removed += 1;
        }
    }

    Ok(removed)
}
