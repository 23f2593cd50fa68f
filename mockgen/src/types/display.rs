use std::borrow::Cow;
use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::misc::package_ident;

use super::{ChanDir, TypeExpr};

/// Decides how references into other packages are spelled.
pub trait TypeNamer {
    /// Get the local identifier used to qualify types of `package`.
    fn qualifier<'a>(&'a self, package: &'a str) -> Cow<'a, str>;
}

/// [`TypeNamer`] that spells every package by its natural identifier.
#[derive(Default, Debug, Clone, Copy)]
pub struct NaturalNames;

impl TypeNamer for NaturalNames {
    fn qualifier<'a>(&'a self, package: &'a str) -> Cow<'a, str> {
        package_ident(package)
    }
}

/// [`Display`] adapter returned by [`TypeExpr::display`].
#[derive(Debug)]
pub struct TypeDisplay<'a, N: ?Sized> {
    ty: &'a TypeExpr,
    namer: &'a N,
}

impl<'a, N: ?Sized> TypeDisplay<'a, N> {
    pub(crate) fn new(ty: &'a TypeExpr, namer: &'a N) -> Self {
        Self { ty, namer }
    }
}

impl<N> Display for TypeDisplay<'_, N>
where
    N: TypeNamer + ?Sized,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write_type(f, self.ty, self.namer)
    }
}

fn write_type<N>(f: &mut Formatter<'_>, ty: &TypeExpr, namer: &N) -> FmtResult
where
    N: TypeNamer + ?Sized,
{
    match ty {
        TypeExpr::Named(ident) => f.write_str(ident),
        TypeExpr::Qualified { package, ident } if package.is_empty() => f.write_str(ident),
        TypeExpr::Qualified { package, ident } => {
            write!(f, "{}.{}", namer.qualifier(package), ident)
        }
        TypeExpr::Pointer(elem) => {
            f.write_str("*")?;
            write_type(f, elem, namer)
        }
        TypeExpr::Slice(elem) => {
            f.write_str("[]")?;
            write_type(f, elem, namer)
        }
        TypeExpr::Array { len, elem } => {
            write!(f, "[{len}]")?;
            write_type(f, elem, namer)
        }
        TypeExpr::Map { key, value } => {
            f.write_str("map[")?;
            write_type(f, key, namer)?;
            f.write_str("]")?;
            write_type(f, value, namer)
        }
        TypeExpr::Chan { dir, elem } => {
            /* `chan <-chan T` would bind as `chan<- (chan T)` */
            let wrap = *dir == ChanDir::Both
                && matches!(&**elem, TypeExpr::Chan { dir: ChanDir::Recv, .. });

            f.write_str(dir.keyword())?;
            if wrap {
                f.write_str("(")?;
                write_type(f, elem, namer)?;
                f.write_str(")")
            } else {
                write_type(f, elem, namer)
            }
        }
        TypeExpr::Func { params, results } => {
            f.write_str("func(")?;
            write_list(f, params, namer)?;
            f.write_str(")")?;
            write_results(f, results, namer)
        }
        TypeExpr::Variadic(elem) => {
            f.write_str("...")?;
            write_type(f, elem, namer)
        }
        TypeExpr::Any => f.write_str("interface{}"),
    }
}

fn write_list<N>(f: &mut Formatter<'_>, types: &[TypeExpr], namer: &N) -> FmtResult
where
    N: TypeNamer + ?Sized,
{
    for (i, ty) in types.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }

        write_type(f, ty, namer)?;
    }

    Ok(())
}

/// Writes the result part of a signature: nothing, ` T` or ` (A, B)`.
fn write_results<N>(f: &mut Formatter<'_>, results: &[TypeExpr], namer: &N) -> FmtResult
where
    N: TypeNamer + ?Sized,
{
    match results {
        [] => Ok(()),
        [ty] => {
            f.write_str(" ")?;
            write_type(f, ty, namer)
        }
        types => {
            f.write_str(" (")?;
            write_list(f, types, namer)?;
            f.write_str(")")
        }
    }
}
