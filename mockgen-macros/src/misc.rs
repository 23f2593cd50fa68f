use proc_macro2::Ident;
use quote::format_ident;

#[cfg(feature = "force-name")]
pub(crate) fn ident_mockgen() -> Ident {
    format_ident!("mockgen")
}

#[cfg(not(feature = "force-name"))]
pub(crate) fn ident_mockgen() -> Ident {
    use proc_macro_crate::{crate_name, FoundCrate};

    match crate_name("mockgen") {
        Ok(FoundCrate::Itself) => format_ident!("crate"),
        Ok(FoundCrate::Name(name)) => format_ident!("{name}"),
        Err(_) => format_ident!("mockgen"),
    }
}
