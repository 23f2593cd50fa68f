//! The [`types`](self) module contains the type expressions that may occur in
//! the signature of an interface method, together with their textual form.

mod display;

use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::error::Shape;

pub use display::{NaturalNames, TypeDisplay, TypeNamer};

/// A Go type expression as it occurs in a method signature.
///
/// The set of variants is closed, every variant has exactly one textual form
/// (see [`TypeExpr::display`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeExpr {
    /// Built-in or locally declared type, like `string` or `Sibling`.
    Named(String),

    /// Type declared in another package. `package` is the full import path.
    Qualified { package: String, ident: String },

    /// `*T`
    Pointer(Box<TypeExpr>),

    /// `[]T`
    Slice(Box<TypeExpr>),

    /// `[N]T`, the length is kept verbatim.
    Array { len: String, elem: Box<TypeExpr> },

    /// `map[K]V`
    Map {
        key: Box<TypeExpr>,
        value: Box<TypeExpr>,
    },

    /// `chan T`, `chan<- T` or `<-chan T`
    Chan { dir: ChanDir, elem: Box<TypeExpr> },

    /// `func(P...) R...`
    Func {
        params: Vec<TypeExpr>,
        results: Vec<TypeExpr>,
    },

    /// `...T`, only valid as the last parameter of a method or function type.
    Variadic(Box<TypeExpr>),

    /// `interface{}`
    Any,
}

/// Direction of a channel type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChanDir {
    /// `chan T`
    Both,

    /// `chan<- T`
    Send,

    /// `<-chan T`
    Recv,
}

impl ChanDir {
    pub(crate) fn keyword(self) -> &'static str {
        match self {
            Self::Both => "chan ",
            Self::Send => "chan<- ",
            Self::Recv => "<-chan ",
        }
    }
}

impl TypeExpr {
    pub fn named<S: Into<String>>(ident: S) -> Self {
        Self::Named(ident.into())
    }

    /// Create a reference to `ident` inside `package`.
    ///
    /// An empty `package` refers to the current compilation unit and is
    /// normalized to [`TypeExpr::Named`], so that two expressions that print
    /// the same text also compare equal.
    pub fn qualified<P: Into<String>, S: Into<String>>(package: P, ident: S) -> Self {
        let package = package.into();
        let ident = ident.into();

        if package.is_empty() {
            Self::Named(ident)
        } else {
            Self::Qualified { package, ident }
        }
    }

    pub fn pointer(elem: Self) -> Self {
        Self::Pointer(Box::new(elem))
    }

    pub fn slice(elem: Self) -> Self {
        Self::Slice(Box::new(elem))
    }

    pub fn array<L: Into<String>>(len: L, elem: Self) -> Self {
        Self::Array {
            len: len.into(),
            elem: Box::new(elem),
        }
    }

    pub fn map(key: Self, value: Self) -> Self {
        Self::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    pub fn chan(dir: ChanDir, elem: Self) -> Self {
        Self::Chan {
            dir,
            elem: Box::new(elem),
        }
    }

    pub fn func<P, R>(params: P, results: R) -> Self
    where
        P: IntoIterator<Item = Self>,
        R: IntoIterator<Item = Self>,
    {
        Self::Func {
            params: params.into_iter().collect(),
            results: results.into_iter().collect(),
        }
    }

    pub fn variadic(elem: Self) -> Self {
        Self::Variadic(Box::new(elem))
    }

    /// Returns `true` if this is the predeclared `error` type.
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Named(ident) if ident == "error")
    }

    #[must_use]
    pub fn is_variadic(&self) -> bool {
        matches!(self, Self::Variadic(_))
    }

    /// Get a [`Display`] adapter that prints this expression, spelling package
    /// qualifiers the way `namer` decides.
    pub fn display<'a, N>(&'a self, namer: &'a N) -> TypeDisplay<'a, N>
    where
        N: TypeNamer + ?Sized,
    {
        TypeDisplay::new(self, namer)
    }

    /// Call `f` for every package path referenced by this expression, in
    /// textual order.
    pub fn visit_packages<F>(&self, f: &mut F)
    where
        F: FnMut(&str),
    {
        match self {
            Self::Named(_) | Self::Any => (),
            Self::Qualified { package, .. } => f(package),
            Self::Pointer(elem)
            | Self::Slice(elem)
            | Self::Array { elem, .. }
            | Self::Chan { elem, .. }
            | Self::Variadic(elem) => elem.visit_packages(f),
            Self::Map { key, value } => {
                key.visit_packages(f);
                value.visit_packages(f);
            }
            Self::Func { params, results } => {
                for ty in params.iter().chain(results) {
                    ty.visit_packages(f);
                }
            }
        }
    }

    /// Check this expression as the type of a parameter. `last` tells whether
    /// the parameter is the last one of its list.
    ///
    /// # Errors
    /// Returns the offending [`Shape`] if the expression can not be rendered
    /// as valid source text at this position.
    pub fn check_param(&self, last: bool) -> Result<(), Shape> {
        self.check(last)
    }

    /// Check this expression as a result type.
    ///
    /// # Errors
    /// Returns the offending [`Shape`] if the expression can not be rendered
    /// as valid source text at this position.
    pub fn check_result(&self) -> Result<(), Shape> {
        if self.is_variadic() {
            return Err(Shape::VariadicResult(self.to_string()));
        }

        self.check(false)
    }

    fn check(&self, variadic_allowed: bool) -> Result<(), Shape> {
        match self {
            Self::Named(ident) | Self::Qualified { ident, .. } if ident.is_empty() => {
                Err(Shape::EmptyIdentifier)
            }
            Self::Named(_) | Self::Qualified { .. } | Self::Any => Ok(()),
            Self::Pointer(elem) | Self::Slice(elem) | Self::Chan { elem, .. } => elem.check(false),
            Self::Array { len, elem } => {
                if len.trim().is_empty() {
                    return Err(Shape::EmptyArrayLength(self.to_string()));
                }

                elem.check(false)
            }
            Self::Map { key, value } => {
                key.check(false)?;
                value.check(false)
            }
            Self::Func { params, results } => {
                check_params(params)?;

                results.iter().try_for_each(Self::check_result)
            }
            Self::Variadic(elem) if elem.is_variadic() => {
                Err(Shape::NestedVariadic(self.to_string()))
            }
            Self::Variadic(elem) if variadic_allowed => elem.check(false),
            Self::Variadic(_) => Err(Shape::MisplacedVariadic(self.to_string())),
        }
    }
}

/// Check a parameter list, only the last entry may be variadic.
pub(crate) fn check_params<'a, I>(params: I) -> Result<(), Shape>
where
    I: IntoIterator<Item = &'a TypeExpr>,
    I::IntoIter: ExactSizeIterator,
{
    let params = params.into_iter();
    let count = params.len();

    params
        .enumerate()
        .try_for_each(|(i, ty)| ty.check_param(i + 1 == count))
}

impl Display for TypeExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        self.display(&NaturalNames).fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn string() -> TypeExpr {
        TypeExpr::named("string")
    }

    #[test]
    fn prints_composite_types() {
        let ty = TypeExpr::map(string(), TypeExpr::func([string()], [string()]));
        assert_eq!("map[string]func(string) string", ty.to_string());

        let ty = TypeExpr::func([TypeExpr::slice(TypeExpr::named("int"))], []);
        assert_eq!("func([]int)", ty.to_string());

        let ty = TypeExpr::func(
            [TypeExpr::variadic(string())],
            [TypeExpr::named("int"), TypeExpr::named("error")],
        );
        assert_eq!("func(...string) (int, error)", ty.to_string());

        let ty = TypeExpr::array("2", string());
        assert_eq!("[2]string", ty.to_string());
    }

    #[test]
    fn prints_channel_directions() {
        let bool_ = || TypeExpr::named("bool");

        assert_eq!("chan bool", TypeExpr::chan(ChanDir::Both, bool_()).to_string());
        assert_eq!("chan<- bool", TypeExpr::chan(ChanDir::Send, bool_()).to_string());
        assert_eq!("<-chan bool", TypeExpr::chan(ChanDir::Recv, bool_()).to_string());

        let nested = TypeExpr::chan(ChanDir::Both, TypeExpr::chan(ChanDir::Recv, bool_()));
        assert_eq!("chan (<-chan bool)", nested.to_string());

        let nested = TypeExpr::chan(ChanDir::Send, TypeExpr::chan(ChanDir::Recv, bool_()));
        assert_eq!("chan<- <-chan bool", nested.to_string());
    }

    #[test]
    fn prints_qualified_types_with_natural_names() {
        let ty = TypeExpr::pointer(TypeExpr::qualified("encoding/json", "RawMessage"));
        assert_eq!("*json.RawMessage", ty.to_string());

        let ty = TypeExpr::qualified("", "Err");
        assert_eq!(TypeExpr::named("Err"), ty);
        assert_eq!("Err", ty.to_string());
    }

    #[test]
    fn variadic_only_allowed_as_last_parameter() {
        let variadic = TypeExpr::variadic(string());

        assert_eq!(Ok(()), variadic.check_param(true));
        assert_eq!(
            Err(Shape::MisplacedVariadic("...string".into())),
            variadic.check_param(false)
        );
        assert_eq!(
            Err(Shape::VariadicResult("...string".into())),
            variadic.check_result()
        );

        let nested = TypeExpr::variadic(TypeExpr::variadic(string()));
        assert_eq!(
            Err(Shape::NestedVariadic("......string".into())),
            nested.check_param(true)
        );

        let in_slice = TypeExpr::slice(TypeExpr::variadic(string()));
        assert!(in_slice.check_param(true).is_err());

        let in_func = TypeExpr::func([TypeExpr::variadic(string()), string()], []);
        assert!(in_func.check_result().is_err());
    }

    #[test]
    fn rejects_empty_identifiers_and_lengths() {
        assert_eq!(Err(Shape::EmptyIdentifier), TypeExpr::named("").check_result());
        assert_eq!(
            Err(Shape::EmptyArrayLength("[ ]string".into())),
            TypeExpr::array(" ", string()).check_result()
        );
    }

    #[test]
    fn collects_referenced_packages_in_order() {
        let ty = TypeExpr::func(
            [TypeExpr::qualified("net/http", "Request")],
            [TypeExpr::map(
                TypeExpr::qualified("io", "Reader"),
                TypeExpr::qualified("net/http", "Response"),
            )],
        );

        let mut packages = Vec::new();
        ty.visit_packages(&mut |p| packages.push(p.to_owned()));

        assert_eq!(vec!["net/http", "io", "net/http"], packages);
    }
}
