use std::collections::HashSet;
use std::ops::Deref;
use std::sync::Arc;

use tracing::trace;

use crate::config::Options;
use crate::error::{Error, Result};
use crate::imports::ImportResolver;
use crate::interface::{Declarations, Interface, Method};
use crate::misc::{exported_mock_name, is_exported, package_ident, relative_import};
use crate::types::check_params;

/* Context */

/// Everything that is known about the interface while its mock is rendered.
#[derive(Debug, Clone)]
pub(crate) struct Context<'a>(Arc<ContextData<'a>>);

#[derive(Debug)]
pub(crate) struct ContextData<'a> {
    pub interface: &'a Interface,
    pub decls: &'a Declarations,
    pub options: &'a Options,

    pub ident_mock: String,
    pub ident_recorder: String,

    pub self_import: Option<String>,
    pub imports: ImportResolver,

    pub methods: Vec<MethodContext<'a>>,
}

impl<'a> Context<'a> {
    pub(crate) fn new(
        interface: &'a Interface,
        decls: &'a Declarations,
        options: &'a Options,
    ) -> Result<Self> {
        for method in interface.methods.values() {
            check_method(interface, method)?;
        }

        let ident_mock = if is_exported(&interface.name) && !options.in_package {
            interface.name.clone()
        } else {
            exported_mock_name(&interface.name, is_exported(&interface.name))
        };

        let self_import = match &options.source_root {
            Some(root) if !options.in_package => interface
                .source_path
                .parent()
                .map(|dir| relative_import(root, dir)),
            _ => None,
        };

        let methods = interface
            .methods
            .values()
            .map(MethodContext::new)
            .collect::<Vec<_>>();

        /* names of parameters and fixed imports are decided first */
        let mut imports = ImportResolver::new();
        let ident_recorder = package_ident(&options.recorder_import).into_owned();
        imports.reserve(ident_recorder.clone());
        if let Some(path) = &self_import {
            imports.reserve(package_ident(path).into_owned());
        }
        for name in BODY_NAMES {
            imports.reserve(name);
        }
        for method in &methods {
            for name in method.arg_names.iter().chain(method.locals.names()) {
                imports.reserve(name.clone());
            }
        }

        for method in &methods {
            let types = method
                .method
                .params
                .iter()
                .map(|p| &p.ty)
                .chain(&method.method.results);

            for ty in types {
                ty.visit_packages(&mut |package| {
                    imports.register(package);
                });
            }
        }

        Ok(Self(Arc::new(ContextData {
            interface,
            decls,
            options,
            ident_mock,
            ident_recorder,
            self_import,
            imports,
            methods,
        })))
    }
}

impl<'a> Deref for Context<'a> {
    type Target = ContextData<'a>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

fn check_method(interface: &Interface, method: &Method) -> Result<()> {
    let shape = check_params(method.params.iter().map(|p| &p.ty))
        .and_then(|()| method.results.iter().try_for_each(|ty| ty.check_result()));

    shape.map_err(|shape| Error::UnsupportedShape {
        interface: interface.name.clone(),
        method: method.name.clone(),
        shape,
    })
}

/* MethodContext */

/// Identifiers every mocked method body declares: receiver, recorded call,
/// override function and its type assertion flag.
const BODY_NAMES: [&str; 4] = ["_m", "ret", "rf", "ok"];

#[derive(Debug)]
pub(crate) struct MethodContext<'a> {
    pub method: &'a Method,

    /// Names the parameters are forwarded by, in declaration order.
    pub arg_names: Vec<String>,

    pub locals: Locals,
}

impl<'a> MethodContext<'a> {
    pub(crate) fn new(method: &'a Method) -> Self {
        let declared = method
            .params
            .iter()
            .filter_map(|p| p.usable_name())
            .collect::<HashSet<_>>();

        let mut synthesized = HashSet::new();
        let arg_names = method
            .params
            .iter()
            .enumerate()
            .map(|(i, param)| {
                if let Some(name) = param.usable_name() {
                    return name.to_owned();
                }

                let mut name = format!("_a{i}");
                let mut suffix = 1;
                while declared.contains(name.as_str()) || synthesized.contains(&name) {
                    name = format!("_a{i}_{suffix}");
                    suffix += 1;
                }

                synthesized.insert(name.clone());

                name
            })
            .collect::<Vec<_>>();

        let locals = Locals::new(&arg_names, method.results.len());

        trace!(method = %method.name, ?arg_names, ?locals, "Prepared method context");

        Self {
            method,
            arg_names,
            locals,
        }
    }
}

/* Locals */

/// Names of the identifiers declared by one mocked method body. Parameters
/// keep their names, so a local that collides with one gets a suffix.
#[derive(Debug)]
pub(crate) struct Locals {
    pub receiver: String,
    pub ret: String,
    pub rf: String,
    pub ok: String,
    pub results: Vec<String>,
}

impl Locals {
    fn new(arg_names: &[String], result_count: usize) -> Self {
        let mut taken = arg_names.iter().cloned().collect::<HashSet<_>>();
        let mut fresh = |base: String| {
            let mut name = base.clone();
            let mut suffix = 1;
            while taken.contains(&name) {
                name = format!("{base}_{suffix}");
                suffix += 1;
            }

            taken.insert(name.clone());

            name
        };

        let [receiver, ret, rf, ok] = BODY_NAMES.map(|name| fresh(name.to_owned()));
        let results = (0..result_count).map(|i| fresh(format!("r{i}"))).collect();

        Self {
            receiver,
            ret,
            rf,
            ok,
            results,
        }
    }

    pub(crate) fn names(&self) -> impl Iterator<Item = &String> + '_ {
        [&self.receiver, &self.ret, &self.rf, &self.ok]
            .into_iter()
            .chain(&self.results)
    }
}
