//! The [`misc`](self) module contains naming helpers shared by the different
//! parts of the generator.

use std::borrow::Cow;
use std::collections::HashSet;
use std::path::{Component, Path};

use convert_case::{Case, Casing};
use lazy_static::lazy_static;
use regex::Regex;

/// Get the name of the mock type generated for a non-exported interface, or
/// for an exported one that is mocked inside its own package.
///
/// Non-exported names are prefixed with `mock` and capitalized, exported names
/// are prefixed with `Mock`.
#[must_use]
pub fn exported_mock_name(interface: &str, is_exported: bool) -> String {
    if is_exported {
        return format!("Mock{interface}");
    }

    let mut chars = interface.chars();
    match chars.next() {
        Some(first) => format!("mock{}{}", first.to_uppercase(), chars.as_str()),
        None => "mock".into(),
    }
}

/// Returns `true` if `ident` is visible outside of its package.
#[must_use]
pub fn is_exported(ident: &str) -> bool {
    ident.chars().next().is_some_and(char::is_uppercase)
}

/// Identifier a package is referred to by if it is imported without alias.
pub(crate) fn package_ident(path: &str) -> Cow<'_, str> {
    let mut segments = path.rsplit('/').filter(|s| !s.is_empty());
    let mut ident = segments.next().unwrap_or(path);

    if MAJOR_VERSION.is_match(ident) {
        if let Some(parent) = segments.next() {
            ident = parent;
        }
    }

    let ident = ident.split('.').next().unwrap_or(ident);

    if ident.contains('-') {
        Cow::Owned(ident.replace('-', "_"))
    } else {
        Cow::Borrowed(ident)
    }
}

/// Last segment of an import path.
pub(crate) fn package_base(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Fully qualified alias for a package, used if the natural identifier is
/// already taken.
pub(crate) fn package_alias(path: &str) -> String {
    let alias = path
        .replace(|c: char| !c.is_alphanumeric(), "_")
        .from_case(Case::Snake)
        .to_case(Case::Snake);

    if alias.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{alias}")
    } else {
        alias
    }
}

/// Split a free-form note into its lines. Both real line breaks and the
/// escaped `\n` sequence separate lines.
pub(crate) fn note_lines(note: &str) -> impl Iterator<Item = &str> + '_ {
    NOTE_LINE_BREAK.split(note)
}

/// Relative import path of `dir` seen from `root`, using `/` as separator.
pub(crate) fn relative_import(root: &Path, dir: &Path) -> String {
    let root = root
        .components()
        .filter(|c| *c != Component::CurDir)
        .collect::<Vec<_>>();
    let dir = dir
        .components()
        .filter(|c| *c != Component::CurDir)
        .collect::<Vec<_>>();

    let common = root
        .iter()
        .zip(&dir)
        .take_while(|(a, b)| a == b)
        .count();

    let parts = std::iter::repeat(Cow::Borrowed(".."))
        .take(root.len() - common)
        .chain(dir[common..].iter().map(|c| c.as_os_str().to_string_lossy()))
        .collect::<Vec<_>>();

    if parts.is_empty() {
        ".".into()
    } else {
        parts.join("/")
    }
}

/// Returns `true` for predeclared types that are never nil.
pub(crate) fn is_predeclared_scalar(ident: &str) -> bool {
    PREDECLARED_SCALARS.contains(ident)
}

/// Returns `true` for predeclared interface types.
pub(crate) fn is_predeclared_interface(ident: &str) -> bool {
    matches!(ident, "error" | "any" | "comparable")
}

lazy_static! {
    static ref MAJOR_VERSION: Regex = Regex::new(r"^v[0-9]+$").unwrap();
    static ref NOTE_LINE_BREAK: Regex = Regex::new(r"\\n|\r?\n").unwrap();
    static ref PREDECLARED_SCALARS: HashSet<&'static str> = [
        "bool",
        "byte",
        "complex64",
        "complex128",
        "float32",
        "float64",
        "int",
        "int8",
        "int16",
        "int32",
        "int64",
        "rune",
        "string",
        "struct{}",
        "uint",
        "uint8",
        "uint16",
        "uint32",
        "uint64",
        "uintptr",
    ]
    .into_iter()
    .collect();
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn mock_names() {
        assert_eq!("mockRequester", exported_mock_name("requester", false));
        assert_eq!("MockRequester", exported_mock_name("Requester", true));
        assert_eq!("mockÄrger", exported_mock_name("ärger", false));

        assert!(is_exported("Requester"));
        assert!(!is_exported("requester"));
        assert!(!is_exported("_Requester"));
    }

    #[test]
    fn package_identifiers() {
        assert_eq!("http", package_ident("net/http"));
        assert_eq!("io", package_ident("io"));
        assert_eq!("yaml", package_ident("gopkg.in/yaml.v2"));
        assert_eq!("redis", package_ident("github.com/go-redis/redis/v8"));
        assert_eq!("go_lib", package_ident("example.com/go-lib"));

        assert_eq!("encoding_json", package_alias("encoding/json"));
        assert_eq!("net_http", package_alias("net/http"));
        assert_eq!("gopkg_in_yaml_v2", package_alias("gopkg.in/yaml.v2"));
        assert_eq!("example_com_r0", package_alias("example.com/r0"));
    }

    #[test]
    fn notes_split_on_escaped_and_real_line_breaks() {
        assert_eq!(vec!["A", "B"], note_lines("A\\nB").collect::<Vec<_>>());
        assert_eq!(vec!["A", "B", "C"], note_lines("A\nB\r\nC").collect::<Vec<_>>());
        assert_eq!(vec!["single"], note_lines("single").collect::<Vec<_>>());
    }

    #[test]
    fn relative_imports() {
        let root = PathBuf::from("/go/src");

        assert_eq!(
            "github.com/vektra/mockery/fixtures",
            relative_import(&root, &PathBuf::from("/go/src/github.com/vektra/mockery/fixtures"))
        );
        assert_eq!("../other", relative_import(&root, &PathBuf::from("/go/other")));
        assert_eq!(".", relative_import(&root, &root));
    }
}
