use spost_processor::ProcessorError;
use std::borrow::Cow;

/// Failure raised by a stylesheet hook. Always fatal for the build step.
#[spost_derive::spost_error]
pub enum HookError {
    #[error("Stylesheet post-processing failed{}: {source}", format_context(.context))]
    Processor { source: ProcessorError, context: Option<Cow<'static, str>> },

    #[error("Stylesheet hook failed{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
