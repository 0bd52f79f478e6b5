use syn::parse::{Parse, ParseStream};
use syn::spanned::Spanned;
use syn::{braced, Attribute, Error, Expr, Ident, LitStr, Result, Token, Type};

pub struct EntryVariant {
    pub attributes: Vec<Attribute>,
    pub message: LitStr,
    pub name: Ident,
    pub fields: Vec<(Ident, Type)>,
    pub level: Expr,
}

impl EntryVariant {
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|attr| attr.path().is_ident(name))
    }
}

pub struct EntryEnum {
    pub name: Ident,
    pub variants: Vec<EntryVariant>,
}

impl Parse for EntryEnum {
    fn parse(input: ParseStream) -> Result<Self> {
        let name = input.parse::<Ident>()?;

        let content;
        braced!(content in input);

        let mut variants = Vec::new();
        while !content.is_empty() {
            let attributes = content.call(Attribute::parse_outer)?;

            let error_attr = attributes
                .iter()
                .find(|attr| attr.path().is_ident("error"))
                .ok_or_else(|| Error::new(content.span(), "Missing #[error(...)] attribute"))?;
            let message = error_attr
                .parse_args::<LitStr>()
                .map_err(|_| Error::new(error_attr.span(), "Invalid error attribute format"))?;

            let name = content.parse::<Ident>()?;

            let mut fields = Vec::new();
            if content.peek(syn::token::Brace) {
                let fields_content;
                braced!(fields_content in content);
                while !fields_content.is_empty() {
                    let field_name = fields_content.parse::<Ident>()?;
                    fields_content.parse::<Token![:]>()?;
                    let field_type = fields_content.parse::<Type>()?;
                    fields.push((field_name, field_type));
                    if fields_content.peek(Token![,]) {
                        fields_content.parse::<Token![,]>()?;
                    }
                }
            }

            content.parse::<Token![=>]>()?;
            let level = content.parse::<Expr>()?;

            if content.peek(Token![,]) {
                content.parse::<Token![,]>()?;
            }

            variants.push(EntryVariant {
                attributes,
                message,
                name,
                fields,
                level,
            });
        }

        Ok(EntryEnum { name, variants })
    }
}
