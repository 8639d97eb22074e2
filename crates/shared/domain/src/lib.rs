//! # Domain Models
//!
//! Pure build configuration types with minimal dependencies (`serde`, `strum`).
//! Keep it lean: no I/O, no CSS handling, just data and simple helpers.

pub mod config;

pub use config::{BuildConfig, BuildConfigInner, Environment, OutputStyle, ProjectType};
