mod context;
mod mock_method;
mod mock_type;
mod prologue;

use std::fmt::Write;

use tracing::{debug, instrument};

use crate::config::Options;
use crate::error::Result;
use crate::imports::ImportEntry;
use crate::interface::{Declarations, Interface};

use context::Context;

pub use mock_type::MockType;
pub use prologue::{Note, Prologue};

/// Generates the mock for one interface.
///
/// All naming decisions (parameter names, import identifiers, the name of the
/// mock type) are made when the generator is created, so every part that is
/// rendered afterwards is consistent with every other part.
#[derive(Debug, Clone)]
pub struct Generator<'a> {
    context: Context<'a>,
}

impl<'a> Generator<'a> {
    /// Create a generator for `interface`. Named types are resolved against
    /// `decls`.
    ///
    /// # Errors
    /// Returns [`Error::UnsupportedShape`](crate::Error::UnsupportedShape) if
    /// any method of the interface uses a type that can not be rendered.
    #[instrument(level = "debug", skip_all, fields(interface = %interface.name))]
    pub fn new(
        interface: &'a Interface,
        decls: &'a Declarations,
        options: &'a Options,
    ) -> Result<Self> {
        let context = Context::new(interface, decls, options)?;

        debug!(
            mock = %context.ident_mock,
            methods = context.methods.len(),
            imports = context.imports.entries().len(),
            "Prepared mock generator"
        );

        Ok(Self { context })
    }

    /// Create a generator for the interface called `name`.
    ///
    /// # Errors
    /// Returns [`Error::NotFound`](crate::Error::NotFound) if `decls` does not
    /// contain the interface, or any error of [`new`](Self::new).
    pub fn find(name: &str, decls: &'a Declarations, options: &'a Options) -> Result<Self> {
        Self::new(decls.find(name)?, decls, options)
    }

    /// Name of the generated mock type.
    #[must_use]
    pub fn mock_name(&self) -> &str {
        &self.context.ident_mock
    }

    /// Packages imported by the generated code, in discovery order.
    #[must_use]
    pub fn imports(&self) -> &[ImportEntry] {
        self.context.imports.entries()
    }

    /// The mock type declaration and its methods.
    #[must_use]
    pub fn mock(&self) -> MockType<'a> {
        MockType::new(self.context.clone())
    }

    /// Package clause and imports for a file of the passed `package`.
    #[must_use]
    pub fn prologue<S: Into<String>>(&self, package: S) -> Prologue<'a> {
        Prologue::new(self.context.clone(), package.into())
    }

    /// Comment block containing the passed `note`.
    #[must_use]
    pub fn note<'n>(&self, note: &'n str) -> Note<'n> {
        Note::new(note)
    }

    /// Render the complete file: prologue and note if they are configured in
    /// the [`Options`], followed by the mock.
    #[must_use]
    pub fn generate(&self) -> String {
        let Options { package, note, .. } = self.context.options;

        let mut out = String::new();

        if let Some(package) = package {
            let _ = write!(out, "{}", self.prologue(package.as_str()));
        }

        if let Some(note) = note {
            let _ = write!(out, "{}", self.note(note));
        }

        let _ = write!(out, "{}", self.mock());

        out
    }
}
