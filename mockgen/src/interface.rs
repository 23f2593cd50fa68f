//! The [`interface`](self) module contains the structured description of the
//! interfaces to mock, as it is handed over by a parser.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::types::TypeExpr;

/// Parameter of an interface method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Name of the parameter, `None` if the declaration elided it.
    pub name: Option<String>,

    /// Type of the parameter.
    pub ty: TypeExpr,
}

impl Parameter {
    pub fn named<S: Into<String>>(name: S, ty: TypeExpr) -> Self {
        Self {
            name: Some(name.into()),
            ty,
        }
    }

    pub fn unnamed(ty: TypeExpr) -> Self {
        Self { name: None, ty }
    }

    /// Name of the parameter as it may be used in generated code. The blank
    /// identifier `_` can not be forwarded and counts as missing.
    #[must_use]
    pub fn usable_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| *name != "_" && !name.is_empty())
    }
}

/// Method of an interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    pub name: String,
    pub params: Vec<Parameter>,
    pub results: Vec<TypeExpr>,
}

impl Method {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            results: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_param(mut self, param: Parameter) -> Self {
        self.params.push(param);

        self
    }

    #[must_use]
    pub fn with_result(mut self, ty: TypeExpr) -> Self {
        self.results.push(ty);

        self
    }
}

/// Interface to generate a mock for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interface {
    pub name: String,

    /// File the interface was declared in.
    pub source_path: PathBuf,

    /// Methods of the interface, keyed and ordered by their name.
    pub methods: BTreeMap<String, Method>,
}

impl Interface {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            source_path: PathBuf::new(),
            methods: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_source_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.source_path = path.into();

        self
    }

    #[must_use]
    pub fn with_method(mut self, method: Method) -> Self {
        self.insert_method(method);

        self
    }

    /// Add `method` to the interface. Returns the method that was previously
    /// registered with the same name, if any.
    pub fn insert_method(&mut self, method: Method) -> Option<Method> {
        self.methods.insert(method.name.clone(), method)
    }
}

/// Kind of a declared named type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeDecl {
    /// Interface type, values of it may be nil.
    Interface,

    /// Any other type (struct, scalar based, array based, ...).
    Concrete,
}

/// Declarations known to the parser: the interfaces that may be mocked and
/// the kind of every named type it resolved.
///
/// Types of the compilation unit under test are keyed by the empty package.
#[derive(Default, Debug, Clone)]
pub struct Declarations {
    interfaces: BTreeMap<String, Interface>,
    types: HashMap<(String, String), TypeDecl>,
}

impl Declarations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an interface of the compilation unit. It is also declared as a
    /// local interface type.
    pub fn add_interface(&mut self, interface: Interface) {
        self.declare("", interface.name.clone(), TypeDecl::Interface);
        self.interfaces.insert(interface.name.clone(), interface);
    }

    #[must_use]
    pub fn with_interface(mut self, interface: Interface) -> Self {
        self.add_interface(interface);

        self
    }

    /// Declare the kind of the type `ident` inside `package`.
    pub fn declare<P, S>(&mut self, package: P, ident: S, decl: TypeDecl)
    where
        P: Into<String>,
        S: Into<String>,
    {
        self.types.insert((package.into(), ident.into()), decl);
    }

    #[must_use]
    pub fn with_type<P, S>(mut self, package: P, ident: S, decl: TypeDecl) -> Self
    where
        P: Into<String>,
        S: Into<String>,
    {
        self.declare(package, ident, decl);

        self
    }

    /// Look up the declaration of the type `ident` inside `package`.
    #[must_use]
    pub fn lookup(&self, package: &str, ident: &str) -> Option<TypeDecl> {
        self.types
            .get(&(package.to_owned(), ident.to_owned()))
            .copied()
    }

    /// Find the interface with the passed `name`.
    ///
    /// # Errors
    /// Returns [`Error::NotFound`] if no such interface was parsed.
    pub fn find(&self, name: &str) -> Result<&Interface> {
        self.interfaces
            .get(name)
            .ok_or_else(|| Error::NotFound(name.to_owned()))
    }

    /// Iterate over all interfaces, ordered by name.
    pub fn interfaces(&self) -> impl Iterator<Item = &Interface> + '_ {
        self.interfaces.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_reports_missing_interfaces() {
        let decls = Declarations::new().with_interface(Interface::new("Requester"));

        assert_eq!("Requester", decls.find("Requester").unwrap().name);
        assert_eq!(
            Err(Error::NotFound("Missing".into())),
            decls.find("Missing").map(|_| ())
        );
    }

    #[test]
    fn interfaces_are_declared_as_local_types() {
        let decls = Declarations::new()
            .with_interface(Interface::new("Sibling"))
            .with_type("net/http", "Response", TypeDecl::Concrete);

        assert_eq!(Some(TypeDecl::Interface), decls.lookup("", "Sibling"));
        assert_eq!(Some(TypeDecl::Concrete), decls.lookup("net/http", "Response"));
        assert_eq!(None, decls.lookup("io", "Reader"));
    }

    #[test]
    fn methods_are_unique_by_name() {
        let mut iface = Interface::new("Requester").with_method(Method::new("Get"));

        let old = iface.insert_method(Method::new("Get").with_result(TypeExpr::named("error")));

        assert_eq!(Some(Method::new("Get")), old);
        assert_eq!(1, iface.methods.len());
    }
}
