//! Stylesheet post-processing for Sass build output.
//!
//! Once an external compiler has written a stylesheet, this crate rewrites it for the
//! configured browsers. All work is synchronous and deterministic for a fixed browser list.
//!
//! # Core Features
//!
//! - **Vendor Prefixing**: Adds the prefixes the browserslist targets need (via `lightningcss`).
//! - **Minification**: Prints the smallest equivalent CSS for compressed builds.
//! - **Atomic Rewrites**: Output goes to a unique temp file that is synced and renamed over the
//!   stylesheet; the temp file never outlives the call.
//! - **Sweeping**: [`sweep::purge_stale`] removes intermediates left behind by crashed builds.
//!
//! # Examples
//!
//! ```rust
//! use spost_processor::{Processor, ProcessorError};
//!
//! # fn main() -> Result<(), ProcessorError> {
//! # let tmp = tempfile::tempdir().unwrap();
//! # let path = tmp.path().join("main.css");
//! # std::fs::write(&path, ".a { color: red; }").unwrap();
//! let processor = Processor::builder()
//!     .browsers(["> 1%", "last 2 versions", "Firefox ESR", "ie >= 9"])
//!     .compress(true)
//!     .build()?;
//!
//! processor.process_file(&path)?;
//! assert_eq!(std::fs::read_to_string(&path).unwrap(), ".a{color:red}");
//! # Ok(())
//! # }
//! ```

mod engine;
mod error;
pub mod sweep;
mod writer;

pub use engine::{Processor, ProcessorBuilder};
pub use error::{ProcessorError, ProcessorErrorExt};
