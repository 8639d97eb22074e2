use serde::{Deserialize, Serialize};
use std::ops::Deref;
use std::path::PathBuf;
use std::sync::Arc;
use strum_macros::{Display, EnumString};

/// Deployment mode of the stylesheet project.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ProjectType {
    #[default]
    StandAlone,
    Rails,
}

/// Build environment. Only decides the default [`OutputStyle`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Environment {
    Development,
    #[default]
    Production,
}

/// Formatting of the emitted CSS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum OutputStyle {
    Expanded,
    Nested,
    Compact,
    Compressed,
}

impl OutputStyle {
    #[must_use]
    pub const fn is_compressed(self) -> bool {
        matches!(self, Self::Compressed)
    }
}

impl From<Environment> for OutputStyle {
    fn from(env: Environment) -> Self {
        match env {
            Environment::Development => Self::Expanded,
            Environment::Production => Self::Compressed,
        }
    }
}

/// Settings read once at startup and shared read-only with the save hook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfigInner {
    pub project_type: ProjectType,
    pub environment: Environment,
    pub http_path: String,

    pub sass_dir: PathBuf,
    pub css_dir: PathBuf,
    pub http_stylesheets_path: String,
    pub images_dir: PathBuf,
    pub http_images_path: String,
    pub generated_images_dir: PathBuf,
    pub http_generated_images_path: String,
    pub fonts_dir: PathBuf,
    pub http_fonts_path: String,

    /// Explicit override; when absent the style follows [`Self::environment`].
    pub output_style: Option<OutputStyle>,
    pub relative_assets: bool,
    pub line_comments: bool,
    /// Browserslist queries, in order.
    pub supported_browsers: Vec<String>,
}

impl BuildConfigInner {
    /// The effective output style: the explicit override, else the environment default.
    #[must_use]
    pub fn output_style(&self) -> OutputStyle {
        self.output_style.unwrap_or_else(|| self.environment.into())
    }
}

/// Immutable, `Arc`-wrapped build configuration for cheap cloning into hooks.
///
/// (De)serializes as [`BuildConfigInner`] itself, so loaders see a plain struct and keep
/// coercing scalar overrides such as `SPOST__CSS_DIR=2024` into strings.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BuildConfigInner", into = "BuildConfigInner")]
pub struct BuildConfig {
    inner: Arc<BuildConfigInner>,
}

impl BuildConfig {
    #[must_use]
    pub fn new(inner: BuildConfigInner) -> Self {
        Self { inner: Arc::new(inner) }
    }
}

impl From<BuildConfigInner> for BuildConfig {
    fn from(inner: BuildConfigInner) -> Self {
        Self::new(inner)
    }
}

impl From<BuildConfig> for BuildConfigInner {
    fn from(config: BuildConfig) -> Self {
        Arc::unwrap_or_clone(config.inner)
    }
}

impl Deref for BuildConfig {
    type Target = BuildConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

// --- Default ---

pub const DEFAULT_SUPPORTED_BROWSERS: [&str; 4] =
    ["> 1%", "last 2 versions", "Firefox ESR", "ie >= 9"];

impl Default for BuildConfigInner {
    fn default() -> Self {
        Self {
            project_type: ProjectType::default(),
            environment: Environment::default(),
            http_path: "/".to_owned(),
            sass_dir: PathBuf::from("."),
            css_dir: PathBuf::from("../web/assets/css"),
            http_stylesheets_path: "/assets/css".to_owned(),
            images_dir: PathBuf::from("../web/images"),
            http_images_path: "/images".to_owned(),
            generated_images_dir: PathBuf::from("../web/assets/images"),
            http_generated_images_path: "/assets/images".to_owned(),
            fonts_dir: PathBuf::from("../web/fonts"),
            http_fonts_path: "/fonts".to_owned(),
            output_style: None,
            relative_assets: false,
            line_comments: false,
            supported_browsers: Vec::from(DEFAULT_SUPPORTED_BROWSERS.map(str::to_owned)),
        }
    }
}
