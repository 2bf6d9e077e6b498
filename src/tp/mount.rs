use std::fs;
use std::path::{Path, PathBuf};

/// One row of the mount table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mount {
    pub dir: PathBuf,
    pub fs: String,
}

// Each row of `/proc/mounts` is `<device> <dir> <fs> <options> <dump> <pass>`,
// with blanks in fields escaped as octal (`\040`):
// https://man7.org/linux/man-pages/man5/fstab.5.html
pub fn parse(table: &str) -> impl Iterator<Item = Mount> + '_ {
    table.lines().filter_map(|line| {
        let mut fields = line.split_ascii_whitespace();
        let _device = fields.next()?;
        let dir = fields.next()?;
        let fs = fields.next()?;
        Some(Mount {
            dir: PathBuf::from(unescape(dir)),
            fs: fs.to_string(),
        })
    })
}

fn unescape(field: &str) -> String {
    let bytes = field.as_bytes();
    let mut acc = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let octal = bytes
            .get(i + 1..i + 4)
            .filter(|it| bytes[i] == b'\\' && it.iter().all(|c| (b'0'..=b'7').contains(c)))
            .map(|it| it.iter().fold(0u32, |acc, c| acc * 8 + (c - b'0') as u32));
        match octal {
            Some(val) if val <= 0xff => {
                acc.push(val as u8);
                i += 4;
            }
            _ => {
                acc.push(bytes[i]);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&acc).into_owned()
}

/// Locates the tracepoint events directory from the mount table at `path`.
///
/// The first `debugfs` row wins (`<dir>/tracing/events`), otherwise the
/// first `tracefs` row (`<dir>/events`).
pub fn events_dir<P>(path: P) -> Option<PathBuf>
where
    P: AsRef<Path>,
{
    let table = match fs::read_to_string(path.as_ref()) {
        Ok(it) => it,
        Err(e) => {
            tracing::debug!(path = ?path.as_ref(), error = %e, "cannot read mount table");
            return None;
        }
    };

    let mut tracefs = None;
    for mount in parse(&table) {
        match mount.fs.as_str() {
            "debugfs" => return Some(mount.dir.join("tracing/events")),
            "tracefs" if tracefs.is_none() => tracefs = Some(mount.dir.join("events")),
            _ => (),
        }
    }
    tracefs
}
