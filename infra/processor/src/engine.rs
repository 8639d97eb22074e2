//! Core post-processing engine.
//!
//! [`Processor`] resolves its browser targets once and then turns CSS text into prefixed
//! (and optionally minified) CSS text. [`Processor::process_file`] applies the same
//! transform to a stylesheet on disk and replaces it atomically.

use crate::error::ProcessorError;
use crate::writer;
use lightningcss::stylesheet::{MinifyOptions, ParserOptions, PrinterOptions, StyleSheet};
use lightningcss::targets::{Browsers, Targets};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use tracing::{debug, instrument};

#[derive(Debug)]
pub(crate) struct ProcessorInner {
    /// Browserslist queries the targets were resolved from.
    pub(crate) browsers: Vec<String>,
    pub(crate) targets: Targets,
    /// Whether [`Processor::process`] minifies after prefixing.
    pub(crate) compress: bool,
    pub(crate) tmp_counter: AtomicU64,
}

/// A thread-safe handle to the prefix/minify pipeline.
///
/// Prefixing and minification are deterministic for a fixed browser list, so the same
/// input always produces the same output.
///
/// # Example
///
/// ```rust
/// use spost_processor::{Processor, ProcessorError};
///
/// # fn main() -> Result<(), ProcessorError> {
/// let processor = Processor::builder().browsers(["ie >= 9"]).compress(true).build()?;
///
/// let css = processor.process(".a{color:red;}", "inline.css")?;
/// assert_eq!(css, ".a{color:red}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Processor {
    pub(crate) inner: Arc<ProcessorInner>,
}

impl Processor {
    #[must_use = "The processor is not usable until you call .build()"]
    pub fn builder() -> ProcessorBuilder {
        ProcessorBuilder::default()
    }

    /// The browserslist queries this processor targets.
    #[must_use]
    pub fn browsers(&self) -> &[String] {
        &self.inner.browsers
    }

    #[must_use]
    pub fn compresses(&self) -> bool {
        self.inner.compress
    }

    /// Adds the vendor prefixes the target browsers need and prints readable CSS.
    ///
    /// The stylesheet goes through lightningcss's structural optimizations before it is
    /// printed: compatible rules are merged, colors and lengths take their shortest form
    /// and plain comments are dropped. A leading `@charset` rule and a trailing
    /// `sourceMappingURL` comment are carried over.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessorError::Parse`] for malformed input, and
    /// [`ProcessorError::Transform`] or [`ProcessorError::Print`] if lightningcss rejects
    /// the stylesheet later in the pipeline.
    pub fn prefix(&self, css: &str, filename: &str) -> Result<String, ProcessorError> {
        self.run(css, filename, false)
    }

    /// Prefixes (no-op for already prefixed input) and prints the smallest equivalent CSS.
    ///
    /// # Errors
    ///
    /// Same as [`Processor::prefix`].
    pub fn minify(&self, css: &str, filename: &str) -> Result<String, ProcessorError> {
        self.run(css, filename, true)
    }

    /// `prefix`, then `minify` when the processor compresses.
    ///
    /// # Errors
    ///
    /// Same as [`Processor::prefix`].
    pub fn process(&self, css: &str, filename: &str) -> Result<String, ProcessorError> {
        let prefixed = self.prefix(css, filename)?;
        if self.inner.compress { self.minify(&prefixed, filename) } else { Ok(prefixed) }
    }

    /// Reads the stylesheet at `path`, processes it and overwrites it in place.
    ///
    /// The replacement goes through a unique sibling temp file that is renamed over
    /// `path`; no temp file survives, whether the call succeeds or fails.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessorError::FileNotFound`] if `path` does not exist,
    /// [`ProcessorError::Io`] for any other read or write failure, and the errors of
    /// [`Processor::process`] for CSS it cannot handle. The file is left untouched on error.
    #[instrument(skip(self), fields(path = %path.display(), compress = self.inner.compress))]
    pub fn process_file(&self, path: &Path) -> Result<(), ProcessorError> {
        let source = match fs::read_to_string(path) {
            Ok(source) => source,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(ProcessorError::FileNotFound {
                    message: path.display().to_string().into(),
                    context: None,
                });
            },
            Err(err) => {
                return Err(ProcessorError::Io {
                    source: err,
                    context: Some(format!("Read failed: {}", path.display()).into()),
                });
            },
        };

        let filename = path.display().to_string();
        let output = self.process(&source, &filename)?;

        writer::replace(path, output.as_bytes(), &self.inner.tmp_counter)?;

        debug!(before = source.len(), after = output.len(), "Stylesheet post-processed");
        Ok(())
    }

    fn run(&self, css: &str, filename: &str, minify: bool) -> Result<String, ProcessorError> {
        let options = ParserOptions { filename: filename.to_owned(), ..ParserOptions::default() };
        let mut sheet = StyleSheet::parse(css, options).map_err(|e| ProcessorError::Parse {
            message: e.to_string().into(),
            context: Some(filename.to_owned().into()),
        })?;
        let map_url = sheet.source_map_url(0).cloned();

        let targets = self.inner.targets;
        sheet.minify(MinifyOptions { targets, ..MinifyOptions::default() }).map_err(|e| {
            ProcessorError::Transform {
                message: e.to_string().into(),
                context: Some(filename.to_owned().into()),
            }
        })?;

        let printed = sheet
            .to_css(PrinterOptions { minify, targets, ..PrinterOptions::default() })
            .map_err(|e| ProcessorError::Print {
                message: e.to_string().into(),
                context: Some(filename.to_owned().into()),
            })?;

        Ok(reattach(printed.code, leading_charset(css), map_url.as_deref(), minify))
    }
}

/// The `@charset "...";` rule opening `css`, if any. lightningcss drops it on print.
fn leading_charset(css: &str) -> Option<&str> {
    let css = css.strip_prefix('\u{feff}').unwrap_or(css);
    if !css.starts_with("@charset \"") {
        return None;
    }
    css.find(';').map(|end| &css[..=end])
}

fn reattach(code: String, charset: Option<&str>, map_url: Option<&str>, minify: bool) -> String {
    if charset.is_none() && map_url.is_none() {
        return code;
    }

    let mut out = String::with_capacity(code.len() + 64);
    if let Some(charset) = charset {
        out.push_str(charset);
        if !minify {
            out.push('\n');
        }
    }
    out.push_str(&code);
    if let Some(url) = map_url {
        if minify || !out.ends_with('\n') {
            out.push('\n');
        }
        out.push_str("/*# sourceMappingURL=");
        out.push_str(url);
        out.push_str(" */");
        if !minify {
            out.push('\n');
        }
    }
    out
}

#[derive(Debug, Clone, Default)]
pub struct ProcessorBuilder {
    browsers: Vec<String>,
    compress: bool,
}

impl ProcessorBuilder {
    /// Sets the browserslist queries used as the compatibility target.
    ///
    /// An empty list disables prefixing.
    #[must_use = "Sets the browser queries of the processor"]
    pub fn browsers<I, S>(mut self, queries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.browsers = queries.into_iter().map(Into::into).collect();
        self
    }

    #[must_use = "Sets whether processed output is minified"]
    pub const fn compress(mut self, enable: bool) -> Self {
        self.compress = enable;
        self
    }

    /// Resolves the browser queries and returns a ready [`Processor`].
    ///
    /// # Errors
    ///
    /// Returns [`ProcessorError::Browsers`] if a query cannot be resolved.
    pub fn build(self) -> Result<Processor, ProcessorError> {
        let targets = resolve_targets(&self.browsers)?;

        debug!(browsers = ?self.browsers, compress = self.compress, "Processor ready");

        Ok(Processor {
            inner: Arc::new(ProcessorInner {
                browsers: self.browsers,
                targets,
                compress: self.compress,
                tmp_counter: AtomicU64::new(1),
            }),
        })
    }
}

fn resolve_targets(queries: &[String]) -> Result<Targets, ProcessorError> {
    if queries.is_empty() {
        return Ok(Targets::default());
    }

    let browsers =
        Browsers::from_browserslist(queries.iter()).map_err(|e| ProcessorError::Browsers {
            message: e.to_string().into(),
            context: Some(queries.join(", ").into()),
        })?;

    Ok(Targets { browsers, ..Targets::default() })
}
