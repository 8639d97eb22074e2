//! Removal of post-processing intermediates orphaned by an interrupted build.

use crate::writer::{TMP_MARKER, TMP_SUFFIX};
use std::path::Path;
use std::time::{Duration, SystemTime};
use tracing::{info, warn};
use walkdir::{DirEntry, WalkDir};

/// Age after which an intermediate is considered orphaned.
pub const DEFAULT_STALE_AFTER: Duration = Duration::from_secs(300);

/// Intermediate written next to a stylesheet by older autoprefixer setups (`main.css.ap`).
const LEGACY_SUFFIX: &str = ".css.ap";

/// Deletes stale intermediates under `dir` and returns `(removed, failed)`.
///
/// Intermediates are this crate's `<name>.spost.<id>.tmp` files and `<name>.css.ap`
/// files; anything younger than `stale_after` is left alone since a build may still
/// own it. A missing `dir` is not an error.
#[must_use]
pub fn purge_stale(dir: &Path, stale_after: Duration) -> (usize, usize) {
    let now = SystemTime::now();
    let mut removed = 0;
    let mut failed = 0;

    WalkDir::new(dir)
        .into_iter()
        .flatten()
        .filter(|entry| is_intermediate(entry) && is_stale(entry, now, stale_after))
        .for_each(|entry| match std::fs::remove_file(entry.path()) {
            Ok(()) => removed += 1,
            Err(err) => {
                warn!(path = %entry.path().display(), error = %err, "Intermediate removal failed");
                failed += 1;
            },
        });

    if removed > 0 || failed > 0 {
        info!(dir = %dir.display(), removed, failed, "Cleaned up stylesheet intermediates");
    }

    (removed, failed)
}

/// Whether `name` looks like an intermediate rather than a real stylesheet.
#[must_use]
pub fn is_intermediate_name(name: &str) -> bool {
    (name.contains(TMP_MARKER) && name.ends_with(TMP_SUFFIX)) || name.ends_with(LEGACY_SUFFIX)
}

fn is_intermediate(entry: &DirEntry) -> bool {
    entry.file_type().is_file() && entry.file_name().to_str().is_some_and(is_intermediate_name)
}

fn is_stale(entry: &DirEntry, now: SystemTime, stale_after: Duration) -> bool {
    entry
        .metadata()
        .ok()
        .and_then(|m| m.modified().ok())
        .and_then(|modified| now.duration_since(modified).ok())
        .is_none_or(|age| age >= stale_after)
}
