//! The [`config`](self) module contains the options that control the shape
//! of a generated file.

use std::path::PathBuf;

/// Import path of the call recording runtime used by default.
pub const DEFAULT_RECORDER_IMPORT: &str = "github.com/stretchr/testify/mock";

/// Options for a [`Generator`](crate::Generator).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Package the generated file belongs to. The prologue (package clause and
    /// imports) is only generated if this is set.
    pub package: Option<String>,

    /// Free-form note that is written as comment block after the prologue.
    pub note: Option<String>,

    /// The mock is generated inside the package that declares the interface.
    pub in_package: bool,

    /// Root the import path of the interface's own package is computed from.
    /// Without a root the interface's package is not imported.
    pub source_root: Option<PathBuf>,

    /// Import path of the call recording runtime.
    pub recorder_import: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            package: None,
            note: None,
            in_package: false,
            source_root: None,
            recorder_import: DEFAULT_RECORDER_IMPORT.into(),
        }
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn package<S: Into<String>>(mut self, package: S) -> Self {
        self.package = Some(package.into());

        self
    }

    #[must_use]
    pub fn note<S: Into<String>>(mut self, note: S) -> Self {
        self.note = Some(note.into());

        self
    }

    #[must_use]
    pub fn in_package(mut self, value: bool) -> Self {
        self.in_package = value;

        self
    }

    #[must_use]
    pub fn source_root<P: Into<PathBuf>>(mut self, root: P) -> Self {
        self.source_root = Some(root.into());

        self
    }

    #[must_use]
    pub fn recorder_import<S: Into<String>>(mut self, import: S) -> Self {
        self.recorder_import = import.into();

        self
    }
}
