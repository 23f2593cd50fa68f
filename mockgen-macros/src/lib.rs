#![warn(
    unused,
    clippy::pedantic,
    future_incompatible,
    missing_debug_implementations,
    nonstandard_style,
    rust_2018_idioms,
    rust_2021_compatibility
)]
#![allow(clippy::module_name_repetitions)]

use proc_macro::TokenStream;

mod go_interface;
mod go_method;
mod go_type;
mod misc;

/// Build a `mockgen::TypeExpr` from Go type syntax.
///
/// Types of other packages are written as `pkg.Type` if the import path is a
/// single segment, or as `"import/path".Type` otherwise.
#[proc_macro]
pub fn go_type(input: TokenStream) -> TokenStream {
    go_type::exec(input.into()).into()
}

/// Build a `mockgen::Method` from a Go method signature like
/// `Get(path string) (string, error)`.
#[proc_macro]
pub fn go_method(input: TokenStream) -> TokenStream {
    go_method::exec(input.into()).into()
}

/// Build a `mockgen::Interface` from a list of Go method signatures.
///
/// `Name in "path/to/file.go" { Get(path string) error; Put(); }`, the source
/// path is optional.
#[proc_macro]
pub fn go_interface(input: TokenStream) -> TokenStream {
    go_interface::exec(input.into()).into()
}
