//! The [`error`](self) module contains the errors reported while generating a mock.

use thiserror::Error;

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that stop the generation of a mock.
///
/// Generation is a pure function of its input, so every error reproduces
/// identically when the same input is rendered again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The requested interface is not part of the parsed declarations.
    #[error("Interface `{0}` was not found")]
    NotFound(String),

    /// A method uses a type expression that can not be rendered as valid
    /// source text. The whole interface is rejected.
    #[error("Unable to render method `{interface}.{method}`: {shape}")]
    UnsupportedShape {
        interface: String,
        method: String,
        shape: Shape,
    },
}

/// Type expression shapes that have no valid textual form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Shape {
    #[error("variadic type `{0}` is only allowed for the last parameter")]
    MisplacedVariadic(String),

    #[error("nested variadic type `{0}`")]
    NestedVariadic(String),

    #[error("variadic type `{0}` used as result")]
    VariadicResult(String),

    #[error("empty type identifier")]
    EmptyIdentifier,

    #[error("array type `{0}` has an empty length")]
    EmptyArrayLength(String),
}
