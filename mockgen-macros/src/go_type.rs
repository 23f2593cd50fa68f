use proc_macro2::{Ident, Span, TokenStream};
use quote::quote;
use syn::{
    braced, bracketed,
    ext::IdentExt,
    parenthesized,
    parse::{discouraged::Speculative, Parse, ParseStream, Result as ParseResult},
    parse2,
    punctuated::Punctuated,
    token::{Bracket, Paren},
    Error, LitStr, Token,
};

use crate::misc::ident_mockgen;

pub(crate) fn exec(input: TokenStream) -> TokenStream {
    let ty = match parse2::<GoType>(input) {
        Ok(ty) => ty,
        Err(err) => return err.to_compile_error(),
    };

    #[allow(clippy::let_and_return)]
    let tokens = ty.expand(&ident_mockgen());

    #[cfg(feature = "debug")]
    println!("\ngo_type!:\n{tokens:#}\n");

    tokens
}

/// Go type expression written as Rust tokens.
#[derive(Debug, Clone)]
pub(crate) enum GoType {
    Named(String),
    Qualified { package: String, ident: String },
    Pointer(Box<GoType>),
    Slice(Box<GoType>),
    Array { len: String, elem: Box<GoType> },
    Map { key: Box<GoType>, value: Box<GoType> },
    Chan { dir: ChanDir, elem: Box<GoType> },
    Func { params: Vec<GoType>, results: Vec<GoType> },
    Variadic(Box<GoType>),
    Any,
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum ChanDir {
    Both,
    Send,
    Recv,
}

impl GoType {
    pub(crate) fn expand(&self, krate: &Ident) -> TokenStream {
        let ty = quote!(#krate::TypeExpr);

        match self {
            Self::Named(ident) => quote!(#ty::named(#ident)),
            Self::Qualified { package, ident } => quote!(#ty::qualified(#package, #ident)),
            Self::Pointer(elem) => {
                let elem = elem.expand(krate);

                quote!(#ty::pointer(#elem))
            }
            Self::Slice(elem) => {
                let elem = elem.expand(krate);

                quote!(#ty::slice(#elem))
            }
            Self::Array { len, elem } => {
                let elem = elem.expand(krate);

                quote!(#ty::array(#len, #elem))
            }
            Self::Map { key, value } => {
                let key = key.expand(krate);
                let value = value.expand(krate);

                quote!(#ty::map(#key, #value))
            }
            Self::Chan { dir, elem } => {
                let dir = match dir {
                    ChanDir::Both => quote!(#krate::ChanDir::Both),
                    ChanDir::Send => quote!(#krate::ChanDir::Send),
                    ChanDir::Recv => quote!(#krate::ChanDir::Recv),
                };
                let elem = elem.expand(krate);

                quote!(#ty::chan(#dir, #elem))
            }
            Self::Func { params, results } => {
                let params = params.iter().map(|p| p.expand(krate));
                let results = results.iter().map(|r| r.expand(krate));

                quote! {
                    #ty::func(
                        ::std::vec::Vec::<#ty>::from([ #( #params ),* ]),
                        ::std::vec::Vec::<#ty>::from([ #( #results ),* ]),
                    )
                }
            }
            Self::Variadic(elem) => {
                let elem = elem.expand(krate);

                quote!(#ty::variadic(#elem))
            }
            Self::Any => quote!(#ty::Any),
        }
    }
}

impl Parse for GoType {
    fn parse(input: ParseStream<'_>) -> ParseResult<Self> {
        if input.peek(Token![*]) {
            input.parse::<Token![*]>()?;

            return Ok(Self::Pointer(Box::new(input.parse()?)));
        }

        if input.peek(Token![...]) {
            input.parse::<Token![...]>()?;

            return Ok(Self::Variadic(Box::new(input.parse()?)));
        }

        if input.peek(Token![<-]) {
            input.parse::<Token![<-]>()?;

            let keyword = input.call(Ident::parse_any)?;
            if keyword != "chan" {
                return Err(Error::new(keyword.span(), "Expected `chan` after `<-`"));
            }

            return Ok(Self::Chan {
                dir: ChanDir::Recv,
                elem: Box::new(input.parse()?),
            });
        }

        if input.peek(Bracket) {
            let content;
            bracketed!(content in input);

            let elem = Box::new(input.parse()?);

            return Ok(if content.is_empty() {
                Self::Slice(elem)
            } else {
                let len = content.parse::<TokenStream>()?.to_string();

                Self::Array { len, elem }
            });
        }

        if input.peek(Paren) {
            let content;
            parenthesized!(content in input);

            return content.parse();
        }

        if input.peek(LitStr) {
            let package = input.parse::<LitStr>()?.value();
            input.parse::<Token![.]>()?;
            let ident = input.call(Ident::parse_any)?.to_string();

            return Ok(Self::Qualified { package, ident });
        }

        let ident = input.call(Ident::parse_any)?;
        match ident.to_string().as_str() {
            "map" => {
                let content;
                bracketed!(content in input);

                let key = Box::new(content.parse()?);
                let value = Box::new(input.parse()?);

                Ok(Self::Map { key, value })
            }
            "chan" => {
                let dir = if input.peek(Token![<-]) {
                    input.parse::<Token![<-]>()?;

                    ChanDir::Send
                } else {
                    ChanDir::Both
                };

                Ok(Self::Chan {
                    dir,
                    elem: Box::new(input.parse()?),
                })
            }
            "func" => {
                let content;
                parenthesized!(content in input);

                let params = parse_params(&content)?.into_iter().map(|p| p.ty).collect();
                let results = parse_results(input)?;

                Ok(Self::Func { params, results })
            }
            "interface" => {
                let content;
                braced!(content in input);

                if content.is_empty() {
                    Ok(Self::Any)
                } else {
                    Err(content.error("Only the empty interface is supported"))
                }
            }
            "struct" => {
                let content;
                braced!(content in input);

                if content.is_empty() {
                    Ok(Self::Named("struct{}".into()))
                } else {
                    Err(content.error("Only the empty struct is supported"))
                }
            }
            _ if input.peek(Token![.]) && !input.peek(Token![...]) => {
                input.parse::<Token![.]>()?;
                let name = input.call(Ident::parse_any)?;

                Ok(Self::Qualified {
                    package: ident.to_string(),
                    ident: name.to_string(),
                })
            }
            name => Ok(Self::Named(name.into())),
        }
    }
}

/* Parameters */

/// Parameter of a method or function type, the name is optional.
#[derive(Debug, Clone)]
pub(crate) struct GoParam {
    pub name: Option<Ident>,
    pub ty: GoType,
}

enum Entry {
    /// Single identifier: a parameter name whose type follows later in the
    /// list, or a type if no parameter of the list is named.
    Bare(Ident),
    Named(Ident, GoType),
    Type(GoType),
}

impl Parse for Entry {
    fn parse(input: ParseStream<'_>) -> ParseResult<Self> {
        if !input.peek(Ident::peek_any) || peek_type_keyword(input) {
            return Ok(Self::Type(input.parse()?));
        }

        let fork = input.fork();
        let ident = fork.call(Ident::parse_any)?;

        if fork.is_empty() || fork.peek(Token![,]) {
            input.advance_to(&fork);

            Ok(Self::Bare(ident))
        } else if fork.peek(Token![...]) || !fork.peek(Token![.]) {
            input.advance_to(&fork);

            Ok(Self::Named(ident, input.parse()?))
        } else {
            Ok(Self::Type(input.parse()?))
        }
    }
}

fn peek_type_keyword(input: ParseStream<'_>) -> bool {
    input.fork().call(Ident::parse_any).is_ok_and(|ident| {
        matches!(
            ident.to_string().as_str(),
            "chan" | "func" | "interface" | "map" | "struct"
        )
    })
}

/// Parse a comma separated parameter list. Either all parameters are named or
/// none is, consecutive names may share one type (`a, b string`).
pub(crate) fn parse_params(input: ParseStream<'_>) -> ParseResult<Vec<GoParam>> {
    let entries = Punctuated::<Entry, Token![,]>::parse_terminated(input)?;
    let named = entries.iter().any(|e| matches!(e, Entry::Named(..)));

    let mut params = Vec::new();
    let mut pending = Vec::new();

    for entry in entries {
        match entry {
            Entry::Bare(ident) if named => pending.push(ident),
            Entry::Bare(ident) => params.push(GoParam {
                name: None,
                ty: GoType::Named(ident.to_string()),
            }),
            Entry::Named(ident, ty) => {
                for name in pending.drain(..) {
                    params.push(GoParam {
                        name: Some(name),
                        ty: ty.clone(),
                    });
                }

                params.push(GoParam {
                    name: Some(ident),
                    ty,
                });
            }
            Entry::Type(_) if named => {
                return Err(Error::new(
                    Span::call_site(),
                    "Mixed named and unnamed parameters",
                ));
            }
            Entry::Type(ty) => params.push(GoParam { name: None, ty }),
        }
    }

    if let Some(ident) = pending.first() {
        return Err(Error::new(ident.span(), "Missing type for parameter"));
    }

    Ok(params)
}

/// Parse the results of a signature: nothing, a single type or a
/// parenthesized list. Result names are dropped.
pub(crate) fn parse_results(input: ParseStream<'_>) -> ParseResult<Vec<GoType>> {
    if input.is_empty() || input.peek(Token![,]) || input.peek(Token![;]) {
        return Ok(Vec::new());
    }

    if input.peek(Paren) {
        let content;
        parenthesized!(content in input);

        return Ok(parse_params(&content)?.into_iter().map(|p| p.ty).collect());
    }

    Ok(vec![input.parse()?])
}

#[cfg(test)]
mod tests {
    use quote::format_ident;
    use syn::parse::Parser;

    use super::*;

    fn expand(tokens: TokenStream) -> String {
        parse2::<GoType>(tokens)
            .unwrap()
            .expand(&format_ident!("mockgen"))
            .to_string()
    }

    #[test]
    fn named_and_qualified_types() {
        assert_eq!(
            quote!(mockgen::TypeExpr::named("string")).to_string(),
            expand(quote!(string))
        );
        assert_eq!(
            quote!(mockgen::TypeExpr::pointer(mockgen::TypeExpr::qualified("json", "RawMessage")))
                .to_string(),
            expand(quote!(*json.RawMessage))
        );
        assert_eq!(
            quote!(mockgen::TypeExpr::qualified("net/http", "Response")).to_string(),
            expand(quote!("net/http".Response))
        );
    }

    #[test]
    fn channel_types() {
        assert_eq!(
            quote!(mockgen::TypeExpr::chan(mockgen::ChanDir::Recv, mockgen::TypeExpr::named("struct{}")))
                .to_string(),
            expand(quote!(<-chan struct{}))
        );
        assert_eq!(
            quote!(mockgen::TypeExpr::chan(mockgen::ChanDir::Send, mockgen::TypeExpr::named("bool")))
                .to_string(),
            expand(quote!(chan<- bool))
        );
    }

    #[test]
    fn slices_arrays_and_maps() {
        assert_eq!(
            quote!(mockgen::TypeExpr::array("2", mockgen::TypeExpr::named("string"))).to_string(),
            expand(quote!([2]string))
        );
        assert_eq!(
            quote!(mockgen::TypeExpr::map(
                mockgen::TypeExpr::named("string"),
                mockgen::TypeExpr::slice(mockgen::TypeExpr::named("byte"))
            ))
            .to_string(),
            expand(quote!(map[string][]byte))
        );
    }

    #[test]
    fn params_share_trailing_type() {
        let params = parse_params
            .parse2(quote!(path, url string, values ...int))
            .unwrap();

        let names = params
            .iter()
            .map(|p| p.name.as_ref().unwrap().to_string())
            .collect::<Vec<_>>();
        assert_eq!(vec!["path", "url", "values"], names);
        assert!(matches!(params[1].ty, GoType::Named(ref n) if n == "string"));
        assert!(matches!(params[2].ty, GoType::Variadic(_)));
    }

    #[test]
    fn unnamed_params() {
        let params = parse_params
            .parse2(quote!(string, uint16, func(string) string))
            .unwrap();

        assert_eq!(3, params.len());
        assert!(params.iter().all(|p| p.name.is_none()));
        assert!(matches!(params[2].ty, GoType::Func { ref results, .. } if results.len() == 1));
    }

    #[test]
    fn mixed_params_are_rejected() {
        let err = parse_params
            .parse2(quote!(path string, *int));

        assert!(err.is_err());
    }
}
