//! Visitor that finds the installer call and assembles the selected package.

use oxc_ast::ast::{CallExpression, Expression};
use oxc_ast_visit::{Visit, walk};

use super::InstallerShape;
use super::shape::{self, ShapeMismatch};
use crate::ModuleGraphModel;
use crate::error::{MalformedBundleError, NestingLevel};

pub(crate) struct InstallerLocator<'s> {
    shape: &'s InstallerShape,
    source_path: &'s str,
    wanted: Option<&'s str>,
    outcome: Option<Result<ModuleGraphModel, MalformedBundleError>>,
    first_mismatch: Option<ShapeMismatch>,
    seen_packages: Vec<String>,
}

impl<'s> InstallerLocator<'s> {
    pub fn new(shape: &'s InstallerShape, source_path: &'s str, wanted: Option<&'s str>) -> Self {
        Self {
            shape,
            source_path,
            wanted,
            outcome: None,
            first_mismatch: None,
            seen_packages: Vec::new(),
        }
    }

    fn is_installer(&self, call: &CallExpression<'_>) -> bool {
        let callee = self.shape.callee.as_str();
        match call.callee.without_parentheses() {
            Expression::Identifier(ident) => ident.name.as_str() == callee,
            Expression::StaticMemberExpression(member) => member.property.name.as_str() == callee,
            _ => false,
        }
    }

    /// Result of the walk: the assembled package or the first shape failure.
    pub fn finish(self) -> Result<ModuleGraphModel, MalformedBundleError> {
        if let Some(outcome) = self.outcome {
            return outcome;
        }
        if let Some(mismatch) = self.first_mismatch {
            return Err(mismatch.into_error(self.source_path));
        }
        if let Some(wanted) = self.wanted.filter(|_| !self.seen_packages.is_empty()) {
            let found = self
                .seen_packages
                .iter()
                .map(|key| format!("\"{key}\""))
                .collect::<Vec<_>>()
                .join(", ");
            return Err(MalformedBundleError::new(
                self.source_path,
                NestingLevel::Package,
                format!("package key \"{wanted}\""),
                format!("only {found}"),
            ));
        }
        Err(MalformedBundleError::new(
            self.source_path,
            NestingLevel::InstallerCall,
            format!("a call to `{}`", self.shape.callee),
            "no installer call in the bundle",
        ))
    }
}

impl<'a> Visit<'a> for InstallerLocator<'_> {
    fn visit_call_expression(&mut self, call: &CallExpression<'a>) {
        if self.outcome.is_some() {
            return;
        }
        if !self.is_installer(call) {
            walk::walk_call_expression(self, call);
            return;
        }

        let packages = match shape::installer_packages(call, self.shape) {
            Ok(packages) => packages,
            Err(mismatch) => {
                self.first_mismatch.get_or_insert(mismatch);
                return;
            }
        };

        let selected = match self.wanted {
            Some(wanted) => packages.iter().find(|package| package.key == wanted),
            None => packages.first(),
        };
        let Some(package) = selected else {
            self.seen_packages
                .extend(packages.iter().map(|package| package.key.clone()));
            return;
        };

        let source_path = self.source_path;
        let installer = self.shape;
        self.outcome = Some(
            shape::flatten_package(package)
                .map(|flat| ModuleGraphModel::assemble(flat, source_path, installer))
                .map_err(|mismatch| mismatch.into_error(source_path)),
        );
    }
}
