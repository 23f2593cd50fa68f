//! The [`imports`](self) module keeps track of the packages referenced by the
//! methods of one interface and of the identifiers they are imported as.

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::fmt::{Display, Formatter, Result as FmtResult};

use tracing::{trace, warn};

use crate::misc::{package_alias, package_base, package_ident};
use crate::types::TypeNamer;

/// One line of the import table of a generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportEntry {
    /// Import path of the package.
    pub package: String,

    /// Identifier the package is referenced by in the generated code.
    pub ident: String,
}

impl ImportEntry {
    /// Returns `true` if the import needs an explicit alias to be referenced
    /// by [`ident`](Self::ident).
    #[must_use]
    pub fn is_aliased(&self) -> bool {
        self.ident != package_base(&self.package)
    }
}

impl Display for ImportEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        if self.is_aliased() {
            write!(f, "import {} \"{}\"", self.ident, self.package)
        } else {
            write!(f, "import \"{}\"", self.package)
        }
    }
}

/// Assigns local identifiers to the packages referenced by one interface.
///
/// Names that are taken by something else (parameters, the recorder package)
/// have to be [`reserve`](Self::reserve)d before the first package is
/// [`register`](Self::register)ed. Packages whose natural identifier collides
/// are imported with an alias derived from their full path.
#[derive(Default, Debug, Clone)]
pub struct ImportResolver {
    taken: HashSet<String>,
    packages: HashMap<String, usize>,
    entries: Vec<ImportEntry>,
}

impl ImportResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `name` as used by something that is not an import.
    ///
    /// Returns `false` if the name was already assigned to an import.
    pub fn reserve<S: Into<String>>(&mut self, name: S) -> bool {
        let name = name.into();

        if self.entries.iter().any(|e| e.ident == name) {
            warn!(%name, "Reserved name is already used by an import");

            return false;
        }

        self.taken.insert(name);

        true
    }

    /// Get the local identifier of `package`, assigning a new one if the
    /// package was not seen before.
    pub fn register(&mut self, package: &str) -> &str {
        let index = if let Some(index) = self.packages.get(package) {
            *index
        } else {
            let ident = self.assign(package);

            trace!(package, %ident, "Assigned import identifier");

            self.taken.insert(ident.clone());
            self.entries.push(ImportEntry {
                package: package.to_owned(),
                ident,
            });

            let index = self.entries.len() - 1;
            self.packages.insert(package.to_owned(), index);

            index
        };

        &self.entries[index].ident
    }

    /// Get the local identifier of an already registered `package`.
    #[must_use]
    pub fn local_name(&self, package: &str) -> Option<&str> {
        self.packages
            .get(package)
            .map(|index| self.entries[*index].ident.as_str())
    }

    /// Get the import table in the order the packages were first registered.
    #[must_use]
    pub fn entries(&self) -> &[ImportEntry] {
        &self.entries
    }

    /// Consume the resolver and return the import table in the order the
    /// packages were first registered.
    #[must_use]
    pub fn finalize(self) -> Vec<ImportEntry> {
        self.entries
    }

    fn assign(&self, package: &str) -> String {
        let natural = package_ident(package);
        if !self.taken.contains(natural.as_ref()) {
            return natural.into_owned();
        }

        let alias = package_alias(package);
        if !self.taken.contains(&alias) {
            return alias;
        }

        let mut suffix = 2;
        loop {
            let ident = format!("{alias}_{suffix}");
            if !self.taken.contains(&ident) {
                return ident;
            }

            suffix += 1;
        }
    }
}

impl TypeNamer for ImportResolver {
    fn qualifier<'a>(&'a self, package: &'a str) -> Cow<'a, str> {
        match self.local_name(package) {
            Some(ident) => Cow::Borrowed(ident),
            None => package_ident(package),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_is_idempotent() {
        let mut imports = ImportResolver::new();

        assert_eq!("http", imports.register("net/http"));
        assert_eq!("io", imports.register("io"));
        assert_eq!("http", imports.register("net/http"));

        assert_eq!(
            vec![
                ImportEntry {
                    package: "net/http".into(),
                    ident: "http".into()
                },
                ImportEntry {
                    package: "io".into(),
                    ident: "io".into()
                },
            ],
            imports.finalize()
        );
    }

    #[test]
    fn reserved_names_force_an_alias() {
        let mut imports = ImportResolver::new();
        imports.reserve("json");

        assert_eq!("encoding_json", imports.register("encoding/json"));
        assert_eq!(Some("encoding_json"), imports.local_name("encoding/json"));
        assert_eq!(
            "import encoding_json \"encoding/json\"",
            imports.entries()[0].to_string()
        );
    }

    #[test]
    fn colliding_packages_get_distinct_names() {
        let mut imports = ImportResolver::new();

        assert_eq!("template", imports.register("text/template"));
        assert_eq!("html_template", imports.register("html/template"));

        imports.reserve("a_b");
        assert_eq!("b", imports.register("x/b"));
        assert_eq!("a_b_2", imports.register("a/b"));
    }

    #[test]
    fn late_reservations_are_rejected() {
        let mut imports = ImportResolver::new();
        imports.register("io");

        assert!(!imports.reserve("io"));
        assert!(imports.reserve("path"));
    }

    #[test]
    fn unaliased_import_lines() {
        let entry = ImportEntry {
            package: "net/http".into(),
            ident: "http".into(),
        };
        assert_eq!("import \"net/http\"", entry.to_string());

        let entry = ImportEntry {
            package: "gopkg.in/yaml.v2".into(),
            ident: "yaml".into(),
        };
        assert_eq!("import yaml \"gopkg.in/yaml.v2\"", entry.to_string());
    }
}
