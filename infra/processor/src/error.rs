use std::borrow::Cow;

/// A specialized [`ProcessorError`] enum of this crate.
#[spost_derive::spost_error]
pub enum ProcessorError {
    #[error("Stylesheet not found{}: {message}", format_context(.context))]
    FileNotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Stylesheet I/O failure{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Unresolvable browser query{}: {message}", format_context(.context))]
    Browsers { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Malformed CSS{}: {message}", format_context(.context))]
    Parse { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("CSS transform failure{}: {message}", format_context(.context))]
    Transform { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("CSS printing failure{}: {message}", format_context(.context))]
    Print { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
