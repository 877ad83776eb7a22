//! Atomic file writes inside a capability directory.
//!
//! Files are written to a hidden sibling first and renamed over the target,
//! so a reader never observes a half-written UE configuration.

use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};

use camino::{Utf8Component, Utf8Path};
use cap_std::fs::{Dir, OpenOptions};

use crate::error::UeConfigError;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Writes `contents` to `file_name` in `dir` via a temporary file and rename.
///
/// `file_name` must be a single normal path component.
///
/// # Errors
///
/// Returns [`UeConfigError::WriteError`] if the name is not a plain file name
/// or any write, sync or rename step fails. The temporary file is removed on
/// failure.
pub(crate) fn write_atomic(
    dir: &Dir,
    file_name: &Utf8Path,
    contents: &str,
) -> Result<(), UeConfigError> {
    let write_error = |message: String| UeConfigError::WriteError {
        path: file_name.to_path_buf(),
        message,
    };

    let mut components = file_name.components();
    let (Some(Utf8Component::Normal(name)), None) = (components.next(), components.next())
    else {
        return Err(write_error("target must be a plain file name".to_owned()));
    };

    let tmp_name = format!(
        ".{name}.tmp.{}.{}",
        std::process::id(),
        TEMP_COUNTER.fetch_add(1, Ordering::Relaxed)
    );

    if let Err(err) = write_and_sync(dir, &tmp_name, contents) {
        discard(dir, &tmp_name);
        return Err(write_error(err.to_string()));
    }

    if let Err(err) = replace(dir, &tmp_name, name) {
        discard(dir, &tmp_name);
        return Err(write_error(err.to_string()));
    }

    // Persist the rename; a failed directory sync leaves the file in place.
    drop(dir.open(".").and_then(|handle| handle.sync_all()));
    Ok(())
}

fn write_and_sync(dir: &Dir, tmp_name: &str, contents: &str) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    let mut file = dir.open_with(tmp_name, &options)?;
    file.write_all(contents.as_bytes())?;
    file.sync_all()
}

#[cfg(windows)]
fn replace(dir: &Dir, tmp_name: &str, target_name: &str) -> io::Result<()> {
    // Windows refuses to rename over an existing file.
    match dir.remove_file(target_name) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(err),
    }
    dir.rename(tmp_name, dir, target_name)
}

#[cfg(not(windows))]
fn replace(dir: &Dir, tmp_name: &str, target_name: &str) -> io::Result<()> {
    dir.rename(tmp_name, dir, target_name)
}

fn discard(dir: &Dir, tmp_name: &str) {
    drop(dir.remove_file(tmp_name));
}
