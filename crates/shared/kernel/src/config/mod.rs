use config::{Config, Environment, File, Map};
use serde::de::DeserializeOwned;
use spost_domain::BuildConfig;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// Base name of the configuration file looked up when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "stylepost";
/// Prefix of environment overrides (`SPOST__CSS_DIR`, `SPOST__ENVIRONMENT`, ...).
pub const ENV_PREFIX: &str = "SPOST";

/// Custom error type for config loading.
#[spost_derive::spost_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// A reusable configuration loader that combines file-based settings with environment overrides.
///
/// This function implements a layered configuration strategy:
/// 1. **Base File**: Loads settings from a file (e.g., `stylepost.toml`). If no path is provided,
///    it defaults to `"stylepost"` in the current directory; any format the `config` crate
///    recognises by extension is accepted.
/// 2. **Environment Overrides**: Overlays values from environment variables prefixed with `SPOST__`
///    (e.g., `SPOST__ENVIRONMENT=development`, `SPOST__CSS_DIR=public/css`).
///    `SPOST__SUPPORTED_BROWSERS` is split on `,`.
///
/// # Errors
/// This function will return an error if:
/// * The specified (or default) configuration file cannot be found.
/// * The content of the file does not match the structure of type `T`.
///
/// # Example
/// ```rust,no_run
/// use spost_kernel::config::load_config;
/// use spost_kernel::domain::BuildConfig;
///
/// let cfg: BuildConfig = load_config(Some("scss/stylepost.toml")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    load_config_with_env(path, None)
}

/// Same as [`load_config`], but reads overrides from `env` instead of the process environment.
///
/// Keys of `env` are full variable names such as `SPOST__CSS_DIR`.
///
/// # Errors
/// See [`load_config`].
pub fn load_config_with_env<T>(
    path: Option<impl AsRef<Path>>,
    env: Option<Map<String, String>>,
) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let effective_path =
        path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), |p| p.as_ref().to_path_buf());

    let builder = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(true))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .convert_case(config::Case::Snake)
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("supported_browsers")
                .source(env),
        );

    info!("Loading config from {}", effective_path.display());

    let config = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}

/// Loads the [`BuildConfig`] of a stylesheet project.
///
/// # Errors
/// See [`load_config`].
pub fn load_build_config(path: Option<impl AsRef<Path>>) -> Result<BuildConfig, ConfigError> {
    let cfg: BuildConfig = load_config(path)?;
    info!(
        environment = %cfg.environment,
        output_style = %cfg.output_style(),
        css_dir = %cfg.css_dir.display(),
        "Build configuration resolved"
    );
    Ok(cfg)
}
