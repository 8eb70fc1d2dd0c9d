//! Export surface extraction from one module factory.
//!
//! A factory is `function (require, exports, module) { ... }`. Only calls on
//! the third parameter matter, whatever it happens to be named:
//!
//! - `module.export({ a: () => a })` declares named exports
//! - `module.link("./b", { x: "y", "*": "*" })` declares re-exports
//! - `module.exportDefault(value)` declares the default export
//!
//! Everything else in the body is ignored; the code is never evaluated.
//! Nested functions that rebind the parameter's name are skipped, since
//! calls inside them target a different object.

use indexmap::IndexMap;
use oxc_ast::ast::{
    Argument, ArrowFunctionExpression, CallExpression, Expression, FormalParameters, Function,
    FunctionBody, ObjectExpression, ObjectPropertyKind,
};
use oxc_ast_visit::{Visit, walk};
use oxc_syntax::scope::ScopeFlags;
use tracing::trace;

use crate::ExportDescriptor;
use crate::parser::shape::Factory;

/// Extracts ordered [`ExportDescriptor`]s from factory bodies.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExportAnalyzer;

impl ExportAnalyzer {
    /// Analyze a flattened factory. Factories without a third parameter
    /// cannot declare exports.
    pub(crate) fn analyze(factory: &Factory<'_, '_>) -> Vec<ExportDescriptor> {
        let Some(body) = factory.body() else {
            return Vec::new();
        };
        match factory.param_name(2) {
            Some(module_param) => Self::analyze_body(body, &module_param),
            None => Vec::new(),
        }
    }

    /// Collect the exports declared through `module_param` in `body`.
    ///
    /// Descriptors come back in source order. A later declaration of an
    /// already exported name replaces the earlier one and takes its place at
    /// the end of the list.
    pub fn analyze_body(body: &FunctionBody<'_>, module_param: &str) -> Vec<ExportDescriptor> {
        let mut collector = ExportCollector {
            module_param,
            exports: IndexMap::new(),
        };
        collector.visit_function_body(body);
        collector.exports.into_values().collect()
    }
}

struct ExportCollector<'p> {
    module_param: &'p str,
    exports: IndexMap<String, ExportDescriptor>,
}

impl ExportCollector<'_> {
    fn declare(&mut self, descriptor: ExportDescriptor) {
        let key = descriptor.binding_key().into_owned();
        if self.exports.shift_remove(&key).is_some() {
            trace!(export = %key, "export redeclared, keeping the later declaration");
        }
        self.exports.insert(key, descriptor);
    }

    /// `Some(method)` when `call` is `<module_param>.<method>(...)`.
    fn module_method<'c>(&self, call: &'c CallExpression<'_>) -> Option<&'c str> {
        let Expression::StaticMemberExpression(member) = call.callee.without_parentheses() else {
            return None;
        };
        match member.object.without_parentheses() {
            Expression::Identifier(ident) if ident.name.as_str() == self.module_param => {
                Some(member.property.name.as_str())
            }
            _ => None,
        }
    }

    /// True when `params` declare a binding named like the module parameter.
    fn shadows_module(&self, params: &FormalParameters<'_>) -> bool {
        params
            .items
            .iter()
            .flat_map(|param| param.pattern.get_binding_identifiers())
            .chain(params.rest.iter().flat_map(|rest| rest.argument.get_binding_identifiers()))
            .any(|ident| ident.name.as_str() == self.module_param)
    }

    fn collect_export(&mut self, call: &CallExpression<'_>) {
        let Some(getters) = first_object(call.arguments.first()) else {
            return;
        };
        for property in &getters.properties {
            let ObjectPropertyKind::ObjectProperty(property) = property else {
                continue;
            };
            if let Some(name) = property.key.static_name() {
                self.declare(ExportDescriptor::named(name));
            }
        }
    }

    fn collect_link(&mut self, call: &CallExpression<'_>) {
        let from = call
            .arguments
            .first()
            .and_then(Argument::as_expression)
            .and_then(|expr| match expr.without_parentheses() {
                Expression::StringLiteral(lit) => Some(lit.value.as_str()),
                _ => None,
            });
        let Some(from) = from else {
            return;
        };
        // No mapping: imported for side effects only.
        let Some(mapping) = first_object(call.arguments.get(1)) else {
            return;
        };

        for property in &mapping.properties {
            let ObjectPropertyKind::ObjectProperty(property) = property else {
                continue;
            };
            let Some(imported) = property.key.static_name() else {
                continue;
            };
            // Function values are import setters, not re-exports.
            let Expression::StringLiteral(alias) = property.value.without_parentheses() else {
                continue;
            };
            let alias = alias.value.as_str();
            if imported == "*" {
                self.declare(ExportDescriptor::wildcard(alias, from));
            } else {
                self.declare(ExportDescriptor::re_export(imported, alias, from));
            }
        }
    }
}

impl<'a> Visit<'a> for ExportCollector<'_> {
    fn visit_call_expression(&mut self, call: &CallExpression<'a>) {
        match self.module_method(call) {
            Some("export") => self.collect_export(call),
            Some("link") => self.collect_link(call),
            Some("exportDefault") => self.declare(ExportDescriptor::Default),
            _ => {}
        }
        walk::walk_call_expression(self, call);
    }

    fn visit_function(&mut self, func: &Function<'a>, flags: ScopeFlags) {
        if self.shadows_module(&func.params) {
            trace!(module_param = self.module_param, "skipping function that shadows the module parameter");
            return;
        }
        walk::walk_function(self, func, flags);
    }

    fn visit_arrow_function_expression(&mut self, arrow: &ArrowFunctionExpression<'a>) {
        if self.shadows_module(&arrow.params) {
            trace!(module_param = self.module_param, "skipping arrow function that shadows the module parameter");
            return;
        }
        walk::walk_arrow_function_expression(self, arrow);
    }
}

fn first_object<'c, 'a>(argument: Option<&'c Argument<'a>>) -> Option<&'c ObjectExpression<'a>> {
    match argument?.as_expression()?.without_parentheses() {
        Expression::ObjectExpression(object) => Some(object),
        _ => None,
    }
}
