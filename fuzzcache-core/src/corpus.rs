//! Consolidated corpus files
//!
//! One `<target>.fuzz` file per target holds every seed as a quoted literal
//! on its own line. Files are written deduplicated and sorted by the encoded
//! text, so the same seed set always produces the same bytes.

use crate::constants::{corpus_file_name, is_valid_target_name};
use crate::error::CorpusError;
use crate::quote;
use crate::{Result, Seed};
use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

#[cfg(feature = "logging")]
use tracing::{debug, warn};

/// Path of the consolidated corpus file for `target`
pub fn corpus_path(corpus_root: &Path, target: &str) -> Result<PathBuf> {
    if !is_valid_target_name(target) {
        return Err(CorpusError::InvalidTargetName(target.to_string()));
    }
    Ok(corpus_root.join(corpus_file_name(target)))
}

/// Read seeds from a consolidated corpus stream
///
/// Empty lines are ignored. Lines that fail to decode are logged and skipped;
/// only IO failures are returned as errors.
pub fn read_corpus<R: BufRead>(mut reader: R, path: &Path) -> Result<Vec<Seed>> {
    let mut seeds = Vec::new();
    let mut buf = Vec::new();
    let mut _line_no = 0usize;

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|e| CorpusError::io(path, e))?;
        if read == 0 {
            break;
        }
        _line_no += 1;

        let line = trim_line_ending(&buf);
        if line.is_empty() {
            continue;
        }

        match quote::decode_bytes(line) {
            Ok(seed) => seeds.push(Seed::from(seed)),
            Err(_err) => {
                #[cfg(feature = "logging")]
                warn!(
                    "Skipping malformed line {} in {}: {}",
                    _line_no,
                    path.display(),
                    _err
                );
            }
        }
    }

    Ok(seeds)
}

fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Load all seeds stored for `target`
///
/// A missing file is an IO error of kind `NotFound`; see
/// [`CorpusError::is_not_found`].
pub fn load_corpus(corpus_root: &Path, target: &str) -> Result<Vec<Seed>> {
    let path = corpus_path(corpus_root, target)?;
    let file = File::open(&path).map_err(|e| CorpusError::io(&path, e))?;
    let seeds = read_corpus(BufReader::new(file), &path)?;

    #[cfg(feature = "logging")]
    debug!("Loaded {} seeds from {}", seeds.len(), path.display());

    Ok(seeds)
}

/// Encode seeds into the distinct, sorted lines of a corpus file
///
/// The codec is injective, so distinct encoded lines are exactly the
/// distinct seeds.
pub fn corpus_lines<I>(seeds: I) -> BTreeSet<String>
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    seeds
        .into_iter()
        .map(|seed| quote::encode(seed.as_ref()))
        .collect()
}

/// Write seeds in corpus format to a stream, returning the number of lines
pub fn write_corpus<W, I>(writer: &mut W, seeds: I) -> std::io::Result<usize>
where
    W: Write,
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    let lines = corpus_lines(seeds);
    for line in &lines {
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
    }
    Ok(lines.len())
}

/// Replace the corpus file for `target` with the given seeds
///
/// Creates `corpus_root` if needed. Returns the number of distinct seeds
/// written.
pub fn save_corpus<I>(corpus_root: &Path, target: &str, seeds: I) -> Result<usize>
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    let path = corpus_path(corpus_root, target)?;
    fs::create_dir_all(corpus_root).map_err(|e| CorpusError::io(corpus_root, e))?;

    let file = File::create(&path).map_err(|e| CorpusError::io(&path, e))?;
    let mut writer = BufWriter::new(file);
    let written = write_corpus(&mut writer, seeds)
        .and_then(|n| writer.flush().map(|_| n))
        .map_err(|e| CorpusError::io(&path, e))?;

    #[cfg(feature = "logging")]
    debug!("Wrote {} seeds to {}", written, path.display());

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::tempdir;

    #[test]
    fn test_read_skips_empty_and_malformed_lines() {
        let data = b"\"a\"\n\n\"b\\x00\"\r\nnot quoted\n\"c\"";
        let seeds = read_corpus(Cursor::new(&data[..]), Path::new("t.fuzz")).unwrap();
        assert_eq!(
            seeds,
            vec![
                Seed::from_static(b"a"),
                Seed::from_static(b"b\x00"),
                Seed::from_static(b"c"),
            ]
        );
    }

    #[test]
    fn test_read_skips_non_utf8_line() {
        let data = b"\"\xff\"\n\"ok\"\n";
        let seeds = read_corpus(&data[..], Path::new("t.fuzz")).unwrap();
        assert_eq!(seeds, vec![Seed::from_static(b"ok")]);
    }

    #[test]
    fn test_read_long_line_across_buffer_boundary() {
        let long = vec![b'z'; 64 * 1024];
        let data = format!("{}\n\"short\"\n", quote::encode(&long));
        // Tiny buffer forces the long line to be assembled from many reads
        let reader = BufReader::with_capacity(16, data.as_bytes());
        let seeds = read_corpus(reader, Path::new("t.fuzz")).unwrap();
        assert_eq!(seeds.len(), 2);
        assert_eq!(seeds[0].as_ref(), &long[..]);
    }

    #[test]
    fn test_write_dedups_and_sorts_by_encoded_text() {
        let mut out = Vec::new();
        let seeds: Vec<&[u8]> = vec![b"b", b"\x01", b"a", b"b", b"A"];
        let n = write_corpus(&mut out, seeds).unwrap();
        assert_eq!(n, 4);
        // '"A"' < '"\x01"' < '"a"' < '"b"' as text
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "\"A\"\n\"\\x01\"\n\"a\"\n\"b\"\n"
        );
    }

    #[test]
    fn test_save_creates_root_and_overwrites() {
        let td = tempdir().unwrap();
        let root = td.path().join("testdata").join("fuzz");

        save_corpus(&root, "FuzzX", [b"one".as_slice(), b"two".as_slice()]).unwrap();
        save_corpus(&root, "FuzzX", [b"three".as_slice()]).unwrap();

        let text = fs::read_to_string(root.join("FuzzX.fuzz")).unwrap();
        assert_eq!(text, "\"three\"\n");
    }

    #[test]
    fn test_load_missing_is_not_found() {
        let td = tempdir().unwrap();
        let err = load_corpus(td.path(), "FuzzMissing").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_save_empty_set_writes_empty_file() {
        let td = tempdir().unwrap();
        let n = save_corpus(td.path(), "FuzzEmpty", Vec::<Seed>::new()).unwrap();
        assert_eq!(n, 0);
        assert_eq!(fs::read(td.path().join("FuzzEmpty.fuzz")).unwrap(), b"");
    }
}
