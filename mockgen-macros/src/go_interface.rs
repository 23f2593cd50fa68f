use proc_macro2::{Ident, TokenStream};
use quote::quote;
use syn::{
    braced,
    ext::IdentExt,
    parse::{Parse, ParseStream, Result as ParseResult},
    parse2,
    punctuated::Punctuated,
    LitStr, Token,
};

use crate::go_method::GoMethod;
use crate::misc::ident_mockgen;

pub(crate) fn exec(input: TokenStream) -> TokenStream {
    let interface = match parse2::<GoInterface>(input) {
        Ok(interface) => interface,
        Err(err) => return err.to_compile_error(),
    };

    #[allow(clippy::let_and_return)]
    let tokens = interface.expand(&ident_mockgen());

    #[cfg(feature = "debug")]
    println!("\ngo_interface!:\n{tokens:#}\n");

    tokens
}

/// `Name in "path/to/file.go" { Method(...) ...; ... }`
struct GoInterface {
    name: Ident,
    source_path: Option<LitStr>,
    methods: Vec<GoMethod>,
}

impl GoInterface {
    fn expand(&self, krate: &Ident) -> TokenStream {
        let Self {
            name,
            source_path,
            methods,
        } = self;

        let name = name.to_string();
        let source_path = source_path.iter();
        let methods = methods.iter().map(|m| m.expand(krate));

        quote! {
            #krate::Interface::new(#name)
                #( .with_source_path(#source_path) )*
                #( .with_method(#methods) )*
        }
    }
}

impl Parse for GoInterface {
    fn parse(input: ParseStream<'_>) -> ParseResult<Self> {
        let name = input.call(Ident::parse_any)?;

        let source_path = if input.peek(Token![in]) {
            input.parse::<Token![in]>()?;

            Some(input.parse::<LitStr>()?)
        } else {
            None
        };

        let content;
        braced!(content in input);

        let methods = Punctuated::<GoMethod, Token![;]>::parse_terminated(&content)?
            .into_iter()
            .collect();

        Ok(Self {
            name,
            source_path,
            methods,
        })
    }
}
