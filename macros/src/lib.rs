mod case;
mod input;
mod log;
mod loggable;
mod traceable;

use proc_macro::TokenStream;

/// Emits a loggable value at the level it declares.
///
/// `log!(entry)` logs the display message, `log!(entry, context)` additionally
/// attaches `context` as a debug field.
#[proc_macro]
pub fn log(input: TokenStream) -> TokenStream {
    log::log_impl(input)
}

/// Declares a plain enum of log entries, each bound to a `tracing::Level`.
#[proc_macro]
pub fn loggable(input: TokenStream) -> TokenStream {
    loggable::loggable_impl(input)
}

/// Declares an error enum whose variants carry the rendered cause in `err`
/// unless marked `#[no_source]`.
#[proc_macro]
pub fn traceable(input: TokenStream) -> TokenStream {
    traceable::traceable_impl(input)
}
