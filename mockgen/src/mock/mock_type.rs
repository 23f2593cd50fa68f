use std::fmt::{Display, Formatter, Result as FmtResult};

use super::context::{Context, ContextData};
use super::mock_method::MockMethod;

/// Mock type declaration followed by the mocked implementation of every
/// method, ordered by method name.
#[derive(Debug, Clone)]
pub struct MockType<'a> {
    context: Context<'a>,
}

impl<'a> MockType<'a> {
    pub(crate) fn new(context: Context<'a>) -> Self {
        Self { context }
    }
}

impl Display for MockType<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let ContextData {
            interface,
            ident_mock,
            ident_recorder,
            methods,
            ..
        } = &*self.context;

        writeln!(
            f,
            "// {ident_mock} is an autogenerated mock type for the {} type",
            interface.name
        )?;
        writeln!(f, "type {ident_mock} struct {{")?;
        writeln!(f, "\t{ident_recorder}.Mock")?;
        writeln!(f, "}}")?;

        for method in methods {
            writeln!(f)?;
            MockMethod::new(&self.context, method).fmt(f)?;
        }

        Ok(())
    }
}
