use spost_kernel::config::ConfigError;
use spost_kernel::hooks::HookError;
use spost_processor::ProcessorError;
use std::borrow::Cow;

/// Fatal failure of a build step. Nothing is retried.
#[spost_derive::spost_error]
pub enum BuildError {
    #[error("Build configuration failed{}: {source}", format_context(.context))]
    Config { source: ConfigError, context: Option<Cow<'static, str>> },

    #[error("Post-processor setup failed{}: {source}", format_context(.context))]
    Processor { source: ProcessorError, context: Option<Cow<'static, str>> },

    #[error("Save hook failed{}: {source}", format_context(.context))]
    Hook { source: HookError, context: Option<Cow<'static, str>> },

    #[error("Stylesheet scan failed{}: {source}", format_context(.context))]
    Scan { source: walkdir::Error, context: Option<Cow<'static, str>> },
}
