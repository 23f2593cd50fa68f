use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::misc::note_lines;

use super::context::{Context, ContextData};

/// Package clause and import table of a generated file.
#[derive(Debug, Clone)]
pub struct Prologue<'a> {
    context: Context<'a>,
    package: String,
}

impl<'a> Prologue<'a> {
    pub(crate) fn new(context: Context<'a>, package: String) -> Self {
        Self { context, package }
    }
}

impl Display for Prologue<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let ContextData {
            options,
            self_import,
            imports,
            ..
        } = &*self.context;

        writeln!(f, "package {}", self.package)?;
        writeln!(f)?;

        if let Some(path) = self_import {
            writeln!(f, "import \"{path}\"")?;
        }
        writeln!(f, "import \"{}\"", options.recorder_import)?;
        writeln!(f)?;

        for entry in imports.entries() {
            writeln!(f, "{entry}")?;
            writeln!(f)?;
        }

        Ok(())
    }
}

/// Free-form note, every line is written as its own comment line.
#[derive(Debug, Clone)]
pub struct Note<'a> {
    text: &'a str,
}

impl<'a> Note<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Self { text }
    }
}

impl Display for Note<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        if self.text.is_empty() {
            return Ok(());
        }

        writeln!(f)?;
        for line in note_lines(self.text) {
            writeln!(f, "// {line}")?;
        }
        writeln!(f)
    }
}
