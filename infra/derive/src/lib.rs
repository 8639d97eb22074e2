#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by the Stylepost crates.
//!
//! ## Usage
//! Depend on the crate from any workspace member that declares an error enum:
//! ```toml
//! [dependencies]
//! spost-derive.workspace = true
//! thiserror.workspace = true
//! ```

mod error;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Attribute macro for declaring the error enum of a crate.
///
/// The enum gains `Debug` and `thiserror::Error` derives, a companion `<Name>Ext` trait
/// that attaches human-readable context to failures, and conversions from wrapped
/// upstream errors so that `?` works across crate boundaries.
///
/// # Requirements
///
/// 1. The macro must be applied to an **enum** with named-field variants only.
/// 2. A variant wrapping an upstream error names it `source` (or marks it `#[source]` /
///    `#[from]`) and must also carry `context: Option<Cow<'static, str>>`.
/// 3. A `context` field, when present, must have exactly that type.
///
/// # Generated Items
///
/// * `<Name>Ext` with `.context(...)` for `Result<T, Name>` and for `Result<T, Source>`
///   of every wrapped source type.
/// * `From<Source>` for every variant with a source field.
/// * `From<&'static str>` and `From<String>` when an `Internal { message, context }`
///   variant exists.
/// * A module-private `format_context` helper for `#[error(...)]` strings.
///
/// # Example
///
/// ```rust,ignore
/// use spost_derive::spost_error;
/// use std::borrow::Cow;
///
/// #[spost_error]
/// pub enum ProcessorError {
///     #[error("Stylesheet I/O failure{}: {source}", format_context(.context))]
///     Io { source: std::io::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal processor error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn read(path: &std::path::Path) -> Result<String, ProcessorError> {
///     std::fs::read_to_string(path).context(format!("Reading {}", path.display()))
/// }
/// ```
#[proc_macro_attribute]
pub fn spost_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    error::expand_derive(input).into()
}
