use crate::error::{BuildError, BuildErrorExt};
use spost_kernel::hooks::HookRegistry;
use spost_processor::sweep::is_intermediate_name;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};
use walkdir::WalkDir;

const CSS_EXTENSION: &str = "css";

/// The emission step of a build: called once per stylesheet the compiler has written.
///
/// Every save goes through the registered hooks in order. The first failure aborts
/// the step; files emitted later are left as the compiler wrote them.
#[derive(Debug, Default)]
pub struct BuildStep {
    hooks: HookRegistry,
}

impl BuildStep {
    #[must_use]
    pub const fn new(hooks: HookRegistry) -> Self {
        Self { hooks }
    }

    #[must_use]
    pub const fn hooks(&self) -> &HookRegistry {
        &self.hooks
    }

    /// Reports one saved stylesheet.
    ///
    /// # Errors
    /// Returns [`BuildError::Hook`] carrying the path when a hook fails.
    pub fn saved(&self, path: &Path) -> Result<(), BuildError> {
        self.hooks.notify(path).context(format!("stylesheet {}", path.display()))
    }

    /// Reports every path in order and returns how many were processed.
    ///
    /// # Errors
    /// Stops at the first failing stylesheet, see [`BuildStep::saved`].
    #[instrument(skip_all)]
    pub fn run<I, P>(&self, paths: I) -> Result<usize, BuildError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut processed = 0;
        for path in paths {
            self.saved(path.as_ref())?;
            processed += 1;
        }
        info!(processed, "Stylesheets post-processed");
        Ok(processed)
    }

    /// Runs the hooks over every stylesheet under `css_dir`, in file-name order.
    ///
    /// # Errors
    /// Returns [`BuildError::Scan`] if the directory cannot be walked, otherwise see
    /// [`BuildStep::run`].
    #[instrument(skip(self), fields(dir = %css_dir.display()))]
    pub fn rescan(&self, css_dir: &Path) -> Result<usize, BuildError> {
        let sheets = collect_stylesheets(css_dir)?;
        debug!(found = sheets.len(), "Stylesheets collected");
        self.run(sheets)
    }
}

fn collect_stylesheets(css_dir: &Path) -> Result<Vec<PathBuf>, BuildError> {
    let mut sheets = Vec::new();
    for entry in WalkDir::new(css_dir).sort_by_file_name() {
        let entry = entry.context(format!("walking {}", css_dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let is_css = path.extension().and_then(OsStr::to_str) == Some(CSS_EXTENSION);
        let name = entry.file_name().to_string_lossy();
        if is_css && !is_intermediate_name(&name) {
            sheets.push(path.to_path_buf());
        }
    }
    Ok(sheets)
}
