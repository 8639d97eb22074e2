//! Kernel utilities shared by the Stylepost crates.
//! Keep this crate lightweight: it owns config loading and the hook seam, nothing else.
//!
//! ## Config loading
//! ```rust,no_run
//! use spost_kernel::config::load_build_config;
//!
//! let cfg = load_build_config(Some("stylepost.toml")).unwrap();
//! println!("{}", cfg.output_style());
//! ```
//!
//! ## Hooks
//! ```rust
//! use spost_kernel::hooks::{HookError, HookRegistry};
//! use std::path::Path;
//!
//! let mut hooks = HookRegistry::new();
//! hooks.register("noop", |_: &Path| Ok::<(), HookError>(()));
//! hooks.notify(Path::new("main.css")).unwrap();
//! ```
pub mod config;
pub mod hooks;

pub use spost_domain as domain;
