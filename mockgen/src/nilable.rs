//! The [`nilable`](self) module decides how a scripted return value is
//! extracted from the loosely typed call record.

use tracing::warn;

use crate::interface::{Declarations, TypeDecl};
use crate::misc::{is_predeclared_interface, is_predeclared_scalar};
use crate::types::TypeExpr;

/// How the value of one result is taken out of the recorded call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extraction {
    /// Dedicated accessor for the predeclared `error` type: `ret.Error(i)`.
    ErrorSlot,

    /// The value may be nil, it is only cast if it is present. Otherwise the
    /// zero value of the result is returned.
    Guarded,

    /// The value is cast unconditionally. A missing value panics at test time.
    Unchecked,
}

impl Extraction {
    /// Select the extraction for a result of type `ty`.
    #[must_use]
    pub fn of(ty: &TypeExpr, decls: &Declarations) -> Self {
        if ty.is_error() {
            Self::ErrorSlot
        } else if is_nilable(ty, decls) {
            Self::Guarded
        } else {
            Self::Unchecked
        }
    }
}

/// Returns `true` if values of `ty` have a nil representation that has to be
/// checked before a cast.
///
/// Named types are resolved against `decls`. Types that can not be resolved
/// are reported and treated as not nilable.
#[must_use]
pub fn is_nilable(ty: &TypeExpr, decls: &Declarations) -> bool {
    match ty {
        TypeExpr::Pointer(_)
        | TypeExpr::Slice(_)
        | TypeExpr::Map { .. }
        | TypeExpr::Chan { .. }
        | TypeExpr::Func { .. }
        | TypeExpr::Variadic(_)
        | TypeExpr::Any => true,
        TypeExpr::Array { .. } => false,
        TypeExpr::Named(ident) if is_predeclared_interface(ident) => true,
        TypeExpr::Named(ident) if is_predeclared_scalar(ident) => false,
        TypeExpr::Named(ident) => is_interface("", ident, decls),
        TypeExpr::Qualified { package, ident } => is_interface(package, ident, decls),
    }
}

fn is_interface(package: &str, ident: &str, decls: &Declarations) -> bool {
    match decls.lookup(package, ident) {
        Some(TypeDecl::Interface) => true,
        Some(TypeDecl::Concrete) => false,
        None => {
            warn!(
                package,
                ident, "Unable to resolve type declaration, assuming it is not nilable"
            );

            false
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::types::ChanDir;

    use super::*;

    fn string() -> TypeExpr {
        TypeExpr::named("string")
    }

    #[test]
    fn composite_types_are_guarded() {
        let decls = Declarations::new();

        for ty in [
            TypeExpr::pointer(string()),
            TypeExpr::slice(string()),
            TypeExpr::map(string(), string()),
            TypeExpr::chan(ChanDir::Recv, string()),
            TypeExpr::func([string()], [string()]),
            TypeExpr::Any,
            TypeExpr::named("any"),
        ] {
            assert_eq!(Extraction::Guarded, Extraction::of(&ty, &decls), "{ty}");
        }
    }

    #[test]
    fn values_are_unchecked() {
        let decls = Declarations::new().with_type("net/http", "Response", TypeDecl::Concrete);

        for ty in [
            string(),
            TypeExpr::named("int"),
            TypeExpr::named("struct{}"),
            TypeExpr::array("2", string()),
            TypeExpr::qualified("net/http", "Response"),
        ] {
            assert_eq!(Extraction::Unchecked, Extraction::of(&ty, &decls), "{ty}");
        }
    }

    #[test]
    fn error_uses_the_error_slot() {
        let decls = Declarations::new();

        assert_eq!(
            Extraction::ErrorSlot,
            Extraction::of(&TypeExpr::named("error"), &decls)
        );
        assert_eq!(
            Extraction::Guarded,
            Extraction::of(&TypeExpr::pointer(TypeExpr::named("Err")), &decls)
        );
    }

    #[test]
    fn declared_interfaces_are_guarded() {
        let decls = Declarations::new()
            .with_type("io", "Reader", TypeDecl::Interface)
            .with_type("", "Sibling", TypeDecl::Interface)
            .with_type("", "Payload", TypeDecl::Concrete);

        assert!(is_nilable(&TypeExpr::qualified("io", "Reader"), &decls));
        assert!(is_nilable(&TypeExpr::named("Sibling"), &decls));
        assert!(!is_nilable(&TypeExpr::named("Payload"), &decls));
        assert!(!is_nilable(&TypeExpr::named("Unknown"), &decls));
    }
}
