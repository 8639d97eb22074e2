use crate::emit::BuildStep;
use crate::error::BuildError;
use spost_domain::{BuildConfig, OutputStyle};
use spost_kernel::config::load_build_config;
use spost_kernel::hooks::{HookError, HookErrorExt, HookRegistry, StylesheetHook};
use spost_processor::Processor;
use spost_processor::sweep::{DEFAULT_STALE_AFTER, purge_stale};
use std::path::Path;
use tracing::{debug, instrument};

/// Name under which the configurator registers its save hook.
pub const HOOK_NAME: &str = "prefix-and-minify";

/// The build configurator: read-only settings plus the post-save hook.
///
/// After the compiler writes a stylesheet, the hook prefixes it for
/// [`supported_browsers`](spost_domain::BuildConfigInner::supported_browsers) and, when the
/// effective output style is `compressed`, minifies the prefixed text before
/// overwriting the file.
///
/// # Example
///
/// ```rust
/// use spost::Configurator;
/// use spost::domain::{BuildConfig, BuildConfigInner, Environment};
/// use spost::kernel::hooks::StylesheetHook;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// # let tmp = tempfile::tempdir()?;
/// # let path = tmp.path().join("main.css");
/// # std::fs::write(&path, ".a {\n  color: red;\n}\n")?;
/// let config = BuildConfig::new(BuildConfigInner {
///     environment: Environment::Production,
///     ..Default::default()
/// });
/// let configurator = Configurator::new(config)?;
///
/// configurator.on_stylesheet_saved(&path)?;
/// assert_eq!(std::fs::read_to_string(&path)?, ".a{color:red}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Configurator {
    config: BuildConfig,
    processor: Processor,
}

impl Configurator {
    /// Resolves the browser targets of `config` and prepares the hook.
    ///
    /// # Errors
    /// Returns [`BuildError::Processor`] if `supported_browsers` cannot be resolved.
    pub fn new(config: BuildConfig) -> Result<Self, BuildError> {
        let processor = Processor::builder()
            .browsers(config.supported_browsers.iter().cloned())
            .compress(config.output_style().is_compressed())
            .build()?;

        debug!(
            project_type = %config.project_type,
            output_style = %config.output_style(),
            "Build configurator ready"
        );

        Ok(Self { config, processor })
    }

    /// Loads the configuration file (plus `SPOST__` overrides) and prepares the hook.
    ///
    /// # Errors
    /// Returns [`BuildError::Config`] for an unreadable configuration and
    /// [`BuildError::Processor`] for unresolvable browser queries.
    pub fn from_file(path: Option<impl AsRef<Path>>) -> Result<Self, BuildError> {
        Self::new(load_build_config(path)?)
    }

    #[must_use]
    pub const fn config(&self) -> &BuildConfig {
        &self.config
    }

    #[must_use]
    pub const fn processor(&self) -> &Processor {
        &self.processor
    }

    #[must_use]
    pub fn output_style(&self) -> OutputStyle {
        self.config.output_style()
    }

    /// Removes intermediates an interrupted build left in `css_dir`; returns `(removed, failed)`.
    #[must_use]
    pub fn purge_stale_intermediates(&self) -> (usize, usize) {
        purge_stale(&self.config.css_dir, DEFAULT_STALE_AFTER)
    }

    /// A [`HookRegistry`] holding only this configurator's hook.
    #[must_use]
    pub fn hooks(self) -> HookRegistry {
        HookRegistry::new().with(HOOK_NAME, self)
    }

    /// The emission step the compiler drives, wired to this configurator.
    #[must_use]
    pub fn into_build_step(self) -> BuildStep {
        BuildStep::new(self.hooks())
    }
}

impl StylesheetHook for Configurator {
    #[instrument(skip(self), fields(path = %path.display(), style = %self.output_style()))]
    fn on_stylesheet_saved(&self, path: &Path) -> Result<(), HookError> {
        self.processor.process_file(path).context(format!("stylesheet {}", path.display()))
    }
}
