use proc_macro2::{Ident, TokenStream};
use quote::quote;
use syn::{
    ext::IdentExt,
    parenthesized,
    parse::{Parse, ParseStream, Result as ParseResult},
    parse2,
};

use crate::go_type::{parse_params, parse_results, GoParam, GoType};
use crate::misc::ident_mockgen;

pub(crate) fn exec(input: TokenStream) -> TokenStream {
    let method = match parse2::<GoMethod>(input) {
        Ok(method) => method,
        Err(err) => return err.to_compile_error(),
    };

    #[allow(clippy::let_and_return)]
    let tokens = method.expand(&ident_mockgen());

    #[cfg(feature = "debug")]
    println!("\ngo_method!:\n{tokens:#}\n");

    tokens
}

/// Method of a Go interface: `Name(params) results`.
#[derive(Debug, Clone)]
pub(crate) struct GoMethod {
    pub name: Ident,
    pub params: Vec<GoParam>,
    pub results: Vec<GoType>,
}

impl GoMethod {
    pub(crate) fn expand(&self, krate: &Ident) -> TokenStream {
        let Self {
            name,
            params,
            results,
        } = self;

        let name = name.to_string();
        let params = params.iter().map(|GoParam { name, ty }| {
            let ty = ty.expand(krate);

            match name {
                Some(name) => {
                    let name = name.to_string();

                    quote!(#krate::Parameter::named(#name, #ty))
                }
                None => quote!(#krate::Parameter::unnamed(#ty)),
            }
        });
        let results = results.iter().map(|ty| ty.expand(krate));

        quote! {
            #krate::Method::new(#name)
                #( .with_param(#params) )*
                #( .with_result(#results) )*
        }
    }
}

impl Parse for GoMethod {
    fn parse(input: ParseStream<'_>) -> ParseResult<Self> {
        let name = input.call(Ident::parse_any)?;

        let content;
        parenthesized!(content in input);

        let params = parse_params(&content)?;
        let results = parse_results(input)?;

        Ok(Self {
            name,
            params,
            results,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(tokens: TokenStream) -> GoMethod {
        parse2::<GoMethod>(tokens).unwrap()
    }

    #[test]
    fn method_with_results() {
        let method = parse(quote!(Get(path string) (string, error)));

        assert_eq!("Get", method.name.to_string());
        assert_eq!(1, method.params.len());
        assert_eq!(2, method.results.len());
    }

    #[test]
    fn method_without_anything() {
        let method = parse(quote!(Get()));

        assert!(method.params.is_empty());
        assert!(method.results.is_empty());
    }

    #[test]
    fn method_returning_function() {
        let method = parse(quote!(Baz(path string) func(string) string));

        assert_eq!(1, method.results.len());
        assert!(matches!(
            &method.results[0],
            GoType::Func { params, results } if params.len() == 1 && results.len() == 1
        ));
    }
}
