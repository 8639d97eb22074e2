use crate::error::{ProcessorError, ProcessorErrorExt};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{trace, warn};

/// Marker inside temp file names; [`crate::sweep`] keys on it.
pub(crate) const TMP_MARKER: &str = ".spost.";
pub(crate) const TMP_SUFFIX: &str = ".tmp";

/// Replaces `target` with `data` through a synced sibling temp file and a rename.
///
/// The temp file takes over the permissions of an existing `target` and is removed
/// again if any step fails, so a failed replace leaves the directory exactly as it was.
pub(crate) fn replace(
    target: &Path,
    data: &[u8],
    counter: &AtomicU64,
) -> Result<(), ProcessorError> {
    let temp = unique_tmp_path(target, counter);

    let result = write_temp(&temp, data)
        .and_then(|()| inherit_permissions(target, &temp))
        .and_then(|()| swap(&temp, target));
    if result.is_err() {
        discard(&temp);
    }
    result
}

fn write_temp(temp: &Path, data: &[u8]) -> Result<(), ProcessorError> {
    let mut file = fs::OpenOptions::new()
        .create_new(true)
        .write(true)
        .open(temp)
        .context(format!("Temp creation failed: {}", temp.display()))?;
    file.write_all(data).context(format!("Write failed: {}", temp.display()))?;
    file.sync_all().context("Hardware sync failed")?;
    trace!(temp = %temp.display(), bytes = data.len(), "Temp stylesheet written");
    Ok(())
}

fn inherit_permissions(target: &Path, temp: &Path) -> Result<(), ProcessorError> {
    match fs::metadata(target) {
        Ok(meta) => fs::set_permissions(temp, meta.permissions())
            .context(format!("Permission copy failed: {}", temp.display())),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
        Err(err) => Err(ProcessorError::Io {
            source: err,
            context: Some(format!("Stat failed: {}", target.display()).into()),
        }),
    }
}

/// Renames `temp` over `target`; `target` is never removed first.
fn swap(temp: &Path, target: &Path) -> Result<(), ProcessorError> {
    fs::rename(temp, target)
        .context(format!("Atomic swap failed: {} -> {}", temp.display(), target.display()))
}

fn discard(temp: &Path) {
    match fs::remove_file(temp) {
        Ok(()) => trace!(temp = %temp.display(), "Temp stylesheet discarded"),
        Err(err) if err.kind() == ErrorKind::NotFound => {},
        Err(err) => warn!(temp = %temp.display(), error = %err, "Temp stylesheet cleanup failed"),
    }
}

fn unique_tmp_path(target: &Path, counter: &AtomicU64) -> PathBuf {
    let n = counter.fetch_add(1, Ordering::Relaxed);
    let file_name = target.file_name().and_then(|s| s.to_str()).unwrap_or("stylesheet");
    let pid = std::process::id();
    target.with_file_name(format!("{file_name}{TMP_MARKER}{pid}-{n}{TMP_SUFFIX}"))
}
