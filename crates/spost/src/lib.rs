//! # Stylepost
//!
//! Build configuration for a stylesheet project plus the hook that runs after the
//! compiler saves each stylesheet: vendor prefixes for the supported browsers, then
//! minification when the effective output style is `compressed`. The file is replaced
//! atomically and no intermediate file outlives the hook.
//!
//! ```rust,no_run
//! use spost::Configurator;
//!
//! # fn main() -> Result<(), spost::BuildError> {
//! let configurator = Configurator::from_file(Some("stylepost.toml"))?;
//! let css_dir = configurator.config().css_dir.clone();
//!
//! let _ = configurator.purge_stale_intermediates();
//! configurator.into_build_step().rescan(&css_dir)?;
//! # Ok(())
//! # }
//! ```

mod configurator;
pub mod emit;
mod error;

pub use configurator::{Configurator, HOOK_NAME};
pub use emit::BuildStep;
pub use error::{BuildError, BuildErrorExt};

pub use spost_domain as domain;
pub use spost_kernel as kernel;
pub use spost_processor as processor;
