use proc_macro::TokenStream;
use quote::quote;
use syn::parse::{Parse, ParseStream};
use syn::{parse_macro_input, Expr, Token};

struct LogInput {
    entry: Expr,
    context: Option<Expr>,
}

impl Parse for LogInput {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let entry = input.parse::<Expr>()?;

        let context = if input.peek(Token![,]) {
            input.parse::<Token![,]>()?;
            if input.is_empty() {
                None
            } else {
                Some(input.parse::<Expr>()?)
            }
        } else {
            None
        };

        Ok(LogInput { entry, context })
    }
}

pub fn log_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as LogInput);

    let entry = &input.entry;

    let dispatch = match &input.context {
        Some(context) => quote! {
            let context = #context;
            match level {
                tracing::Level::ERROR => tracing::error!(message = %message, context = ?context),
                tracing::Level::WARN => tracing::warn!(message = %message, context = ?context),
                tracing::Level::INFO => tracing::info!(message = %message, context = ?context),
                tracing::Level::DEBUG => tracing::debug!(message = %message, context = ?context),
                _ => tracing::trace!(message = %message, context = ?context),
            }
        },
        None => quote! {
            match level {
                tracing::Level::ERROR => tracing::error!("{}", message),
                tracing::Level::WARN => tracing::warn!("{}", message),
                tracing::Level::INFO => tracing::info!("{}", message),
                tracing::Level::DEBUG => tracing::debug!("{}", message),
                _ => tracing::trace!("{}", message),
            }
        },
    };

    quote! {
        {
            let entry = &#entry;
            let level = entry.level();
            let message = entry.to_string();
            #dispatch
        }
    }
    .into()
}
