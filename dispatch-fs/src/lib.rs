//! Capability-based file access for the Dispatch CLI.
//!
//! Paths arrive from the command line as UTF-8 strings. Every helper opens the
//! containing directory with ambient authority and then works relative to it
//! through `cap-std`, so callers never touch `std::fs` directly.
#![forbid(unsafe_code)]

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use std::io;
use std::path::{Component, MAIN_SEPARATOR};

/// Open an existing file for reading.
pub fn open_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Create or truncate a file for writing, creating missing parent directories.
pub fn create_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    ensure_parent_dir(path)?;
    let (dir, name) = open_parent_dir(path)?;
    dir.create(name)
}

/// Report whether `path` names a regular file.
///
/// A missing file yields an [`io::ErrorKind::NotFound`] error rather than
/// `false`, so callers can tell "absent" apart from "not a file".
pub fn is_regular_file(path: &Utf8Path) -> io::Result<bool> {
    let (dir, name) = open_parent_dir(path)?;
    dir.metadata(name).map(|meta| meta.is_file())
}

/// Create every missing directory above `path`.
pub fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_str().is_empty() || parent == Utf8Path::new("/") {
        return Ok(());
    }
    let (base, relative) = split_anchor(parent)?;
    if relative.as_str().is_empty() {
        return Ok(());
    }
    base.create_dir_all(&relative)
}

/// The directory holding `path`, opened ambiently, plus the file name inside it.
fn open_parent_dir(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, String)> {
    let name = path
        .file_name()
        .ok_or_else(|| io::Error::other(format!("{path} does not name a file")))?
        .to_owned();
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, name))
}

/// Split `dir` into an ambiently opened anchor (root, drive or `.`) and the
/// remaining relative path.
fn split_anchor(dir: &Utf8Path) -> io::Result<(fs_utf8::Dir, Utf8PathBuf)> {
    let anchor = match dir.as_std_path().components().next() {
        Some(Component::Prefix(prefix)) => {
            let drive = prefix
                .as_os_str()
                .to_str()
                .ok_or_else(|| io::Error::other("non-UTF-8 path prefix"))?;
            Utf8PathBuf::from(drive).join(MAIN_SEPARATOR.to_string())
        }
        Some(Component::RootDir) => Utf8PathBuf::from(MAIN_SEPARATOR.to_string()),
        _ => {
            let base = fs_utf8::Dir::open_ambient_dir(".", ambient_authority())?;
            return Ok((base, dir.to_path_buf()));
        }
    };
    let relative = dir
        .strip_prefix(&anchor)
        .map_err(|_| io::Error::other(format!("cannot strip {anchor} from {dir}")))?
        .to_path_buf();
    let base = fs_utf8::Dir::open_ambient_dir(&anchor, ambient_authority())?;
    Ok((base, relative))
}
