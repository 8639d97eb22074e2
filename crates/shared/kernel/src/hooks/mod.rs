//! The seam between the stylesheet compiler and post-processing.
//!
//! The compiler calls [`StylesheetHook::on_stylesheet_saved`] once for every stylesheet it
//! writes, synchronously, and aborts the build on the first error.

mod error;
mod registry;

pub use error::{HookError, HookErrorExt};
pub use registry::HookRegistry;

use std::path::Path;

/// A callback run after the compiler saved a stylesheet.
pub trait StylesheetHook: Send + Sync {
    /// Handles the stylesheet just written to `path`.
    ///
    /// # Errors
    /// Any error is fatal to the invoking build step.
    fn on_stylesheet_saved(&self, path: &Path) -> Result<(), HookError>;
}

impl<F> StylesheetHook for F
where
    F: Fn(&Path) -> Result<(), HookError> + Send + Sync,
{
    fn on_stylesheet_saved(&self, path: &Path) -> Result<(), HookError> {
        self(path)
    }
}
