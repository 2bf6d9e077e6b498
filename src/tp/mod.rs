//! Tracepoint discovery.
//!
//! The kernel exposes every tracepoint as `tracing/events/<category>/<name>/id`
//! under debugfs. Each category with at least one readable ID is appended to
//! the catalog as one event, each readable tracepoint as one of its unit masks.

pub mod mount;

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::Path;

use crate::error::Result;
use crate::event::tp::Candidate;
use crate::table::Catalog;

/// Scans the events directory found in the mount table at `mounts`.
///
/// A missing mount table or debug filesystem is not an error, no event is
/// added in that case.
pub fn discover_from_mounts<P>(catalog: &mut Catalog, mounts: P) -> Result<usize>
where
    P: AsRef<Path>,
{
    match mount::events_dir(mounts) {
        Some(dir) => discover(catalog, dir),
        None => Ok(0),
    }
}

/// Appends one event per tracepoint category under `dir` and returns how many
/// were committed.
///
/// Unreadable entries are skipped. Only [`NoMem`][crate::error::Error::NoMem]
/// stops the scan early, events committed before that are kept.
/// Categories and tracepoints are visited in name order so that indices do
/// not depend on directory order.
pub fn discover<P>(catalog: &mut Catalog, dir: P) -> Result<usize>
where
    P: AsRef<Path>,
{
    let dir = dir.as_ref();
    tracing::debug!(?dir, "scanning tracepoints");

    let categories = match sorted_dirs(dir) {
        Ok(it) => it,
        Err(e) => {
            tracing::debug!(?dir, error = %e, "cannot open tracepoint events dir");
            return Ok(0);
        }
    };

    let mut committed = 0;
    for category in categories {
        let category_dir = dir.join(&category);
        // Fails if it is not a directory.
        let Ok(tracepoints) = sorted_dirs(&category_dir) else {
            continue;
        };

        let mut candidate = Candidate::new(category);
        for tracepoint in tracepoints {
            let path = category_dir.join(&tracepoint).join("id");
            let id = match read_id(&path) {
                Ok(it) => it,
                Err(_) => continue,
            };
            tracing::debug!("idpath={}:{} id={}", candidate.name(), tracepoint, id);
            candidate.push(tracepoint, id)?;
        }

        // Not a tree structure we know about.
        if candidate.is_empty() {
            continue;
        }

        let (head, umasks) = candidate.into_record();
        catalog.commit(head, umasks)?;
        committed += 1;
    }

    Ok(committed)
}

fn sorted_dirs(dir: &Path) -> io::Result<Vec<String>> {
    let mut names = vec![];
    for entry in fs::read_dir(dir)? {
        let Ok(entry) = entry else {
            continue;
        };
        if let Ok(name) = entry.file_name().into_string() {
            names.push(name);
        }
    }
    names.sort_unstable();
    Ok(names)
}

fn read_id(path: &Path) -> io::Result<u64> {
    let mut file = File::open(path)?;

    // IDs are short decimal numbers, 32 bytes is plenty.
    let mut buf = [0; 32];
    let len = file.read(&mut buf)?;
    let text = std::str::from_utf8(&buf[..len]).map_err(io::Error::other)?;

    parse_id(text.trim()).ok_or_else(|| io::Error::from(io::ErrorKind::InvalidData))
}

// Radix and longest-prefix rules of `strtoull(_, _, 0)`, except that text
// without a leading digit and values past `u64::MAX` are rejected.
fn parse_id(text: &str) -> Option<u64> {
    let (digits, radix) = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) if hex.starts_with(|c: char| c.is_ascii_hexdigit()) => (hex, 16),
        _ if text.starts_with('0') => (text, 8),
        _ => (text, 10),
    };
    let end = digits
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    u64::from_str_radix(&digits[..end], radix).ok()
}
