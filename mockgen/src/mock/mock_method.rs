use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::nilable::Extraction;
use crate::types::TypeExpr;

use super::context::{ContextData, Locals, MethodContext};

/// Renders the mocked implementation of one interface method.
pub(crate) struct MockMethod<'x, 'a> {
    context: &'x ContextData<'a>,
    method: &'x MethodContext<'a>,
}

impl<'x, 'a> MockMethod<'x, 'a> {
    pub(crate) fn new(context: &'x ContextData<'a>, method: &'x MethodContext<'a>) -> Self {
        Self { context, method }
    }

    /// Arguments for the call of an override function. A variadic parameter
    /// is spread again.
    fn call_args(&self) -> String {
        let MethodContext { method, arg_names, .. } = self.method;

        arg_names
            .iter()
            .zip(&method.params)
            .map(|(name, param)| {
                if param.ty.is_variadic() {
                    format!("{name}...")
                } else {
                    name.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn write_extraction(
        &self,
        f: &mut Formatter<'_>,
        index: usize,
        ty: &TypeExpr,
        call_args: &str,
    ) -> FmtResult {
        let ContextData { decls, imports, .. } = self.context;
        let method = self.method.method;

        let ret_ty = ty.display(imports);
        let override_ty = TypeExpr::func(
            method.params.iter().map(|p| p.ty.clone()),
            [ty.clone()],
        );
        let override_ty = override_ty.display(imports);

        let Locals { ret, rf, ok, results, .. } = &self.method.locals;
        let result = &results[index];

        writeln!(f, "\tvar {result} {ret_ty}")?;
        writeln!(f, "\tif {rf}, {ok} := {ret}.Get({index}).({override_ty}); {ok} {{")?;
        writeln!(f, "\t\t{result} = {rf}({call_args})")?;
        writeln!(f, "\t}} else {{")?;

        match Extraction::of(ty, decls) {
            Extraction::ErrorSlot => {
                writeln!(f, "\t\t{result} = {ret}.Error({index})")?;
            }
            Extraction::Unchecked => {
                writeln!(f, "\t\t{result} = {ret}.Get({index}).({ret_ty})")?;
            }
            Extraction::Guarded => {
                writeln!(f, "\t\tif {ret}.Get({index}) != nil {{")?;
                writeln!(f, "\t\t\t{result} = {ret}.Get({index}).({ret_ty})")?;
                writeln!(f, "\t\t}}")?;
            }
        }

        writeln!(f, "\t}}")
    }
}

impl Display for MockMethod<'_, '_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let ContextData {
            ident_mock,
            imports,
            ..
        } = self.context;
        let MethodContext {
            method,
            arg_names,
            locals,
        } = self.method;
        let Locals { receiver, ret, .. } = locals;

        let fields = arg_names.join(", ");

        let params = arg_names
            .iter()
            .zip(&method.params)
            .map(|(name, param)| format!("{name} {}", param.ty.display(imports)))
            .collect::<Vec<_>>()
            .join(", ");

        let results = method
            .results
            .iter()
            .map(|ty| ty.display(imports).to_string())
            .collect::<Vec<_>>();
        let results = match results.as_slice() {
            [] => String::new(),
            [ty] => format!(" {ty}"),
            types => format!(" ({})", types.join(", ")),
        };

        writeln!(
            f,
            "// {} provides a mock function with given fields: {fields}",
            method.name
        )?;
        writeln!(
            f,
            "func ({receiver} *{ident_mock}) {}({params}){results} {{",
            method.name
        )?;

        if method.results.is_empty() {
            writeln!(f, "\t{receiver}.Called({fields})")?;

            return writeln!(f, "}}");
        }

        writeln!(f, "\t{ret} := {receiver}.Called({fields})")?;
        writeln!(f)?;

        let call_args = self.call_args();
        for (index, ty) in method.results.iter().enumerate() {
            self.write_extraction(f, index, ty, &call_args)?;
            writeln!(f)?;
        }

        let returns = locals.results.join(", ");

        writeln!(f, "\treturn {returns}")?;
        writeln!(f, "}}")
    }
}
