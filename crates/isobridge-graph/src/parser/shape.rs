//! Schema checks for the installer call's nested object literal.
//!
//! Each nesting level is checked by its own function that either returns the
//! node for the next level or a [`ShapeMismatch`] naming what it expected and
//! what it found.

use oxc_ast::ast::{
    Argument, ArrowFunctionExpression, CallExpression, Expression, FormalParameters, Function,
    FunctionBody, ObjectExpression, ObjectPropertyKind,
};
use oxc_span::{GetSpan, Span};
use tracing::debug;

use super::InstallerShape;
use crate::error::{MalformedBundleError, NestingLevel};
use crate::{ModulePath, PackageId};

/// Where and how the shape check failed.
#[derive(Debug, Clone)]
pub(crate) struct ShapeMismatch {
    pub level: NestingLevel,
    pub expected: String,
    pub found: String,
    pub span: Span,
}

impl ShapeMismatch {
    fn new(level: NestingLevel, expected: impl Into<String>, found: impl Into<String>, span: Span) -> Self {
        Self {
            level,
            expected: expected.into(),
            found: found.into(),
            span,
        }
    }

    pub fn into_error(self, source_path: &str) -> MalformedBundleError {
        MalformedBundleError::new(source_path, self.level, self.expected, self.found)
            .with_span(self.span.start, self.span.end)
    }
}

/// A module factory function as written in the bundle.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Factory<'c, 'a> {
    Function(&'c Function<'a>),
    Arrow(&'c ArrowFunctionExpression<'a>),
}

impl<'c, 'a> Factory<'c, 'a> {
    fn from_expression(expr: &'c Expression<'a>) -> Option<Self> {
        match expr.without_parentheses() {
            Expression::FunctionExpression(func) => Some(Self::Function(func)),
            Expression::ArrowFunctionExpression(arrow) => Some(Self::Arrow(arrow)),
            _ => None,
        }
    }

    pub fn params(&self) -> &'c FormalParameters<'a> {
        match *self {
            Self::Function(func) => &func.params,
            Self::Arrow(arrow) => &arrow.params,
        }
    }

    pub fn body(&self) -> Option<&'c FunctionBody<'a>> {
        match *self {
            Self::Function(func) => func.body.as_deref(),
            Self::Arrow(arrow) => Some(&arrow.body),
        }
    }

    /// Name of the positional parameter at `index`, if it is a plain identifier.
    pub fn param_name(&self, index: usize) -> Option<String> {
        self.params()
            .items
            .get(index)
            .and_then(|param| param.pattern.get_identifier_name())
            .map(|name| name.to_string())
    }
}

/// One flattened `path -> factory` entry.
#[derive(Debug)]
pub(crate) struct FactoryEntry<'c, 'a> {
    pub path: ModulePath,
    pub factory: Factory<'c, 'a>,
}

/// A package entry under the host scope, before its file tree is flattened.
#[derive(Debug)]
pub(crate) struct PackageTree<'c, 'a> {
    pub key: String,
    pub span: Span,
    pub files: &'c ObjectExpression<'a>,
}

/// A package with every module factory flattened to a normalized path.
#[derive(Debug)]
pub(crate) struct FlatPackage<'c, 'a> {
    pub package_id: PackageId,
    pub factories: Vec<FactoryEntry<'c, 'a>>,
}

/// Check `{ <namespace>: { <scope>: { <package>: {...}, ... } } }` and return
/// the package entries.
pub(crate) fn installer_packages<'c, 'a>(
    call: &'c CallExpression<'a>,
    shape: &InstallerShape,
) -> Result<Vec<PackageTree<'c, 'a>>, ShapeMismatch> {
    let first = call.arguments.first().and_then(Argument::as_expression);
    let Some(first) = first else {
        return Err(ShapeMismatch::new(
            NestingLevel::InstallerArgument,
            "an object literal as the first argument",
            describe_argument(call.arguments.first()),
            call.span,
        ));
    };
    let root = expect_object(first, NestingLevel::InstallerArgument, "an object literal")?;

    let namespace = expect_key(root, &shape.namespace_key, NestingLevel::Namespace)?;
    let namespace = expect_object(
        namespace,
        NestingLevel::Namespace,
        format!("an object literal under \"{}\"", shape.namespace_key),
    )?;

    let scope = expect_key(namespace, &shape.scope_key, NestingLevel::HostScope)?;
    let scope = expect_object(
        scope,
        NestingLevel::HostScope,
        format!("an object literal under \"{}\"", shape.scope_key),
    )?;

    let mut packages = Vec::with_capacity(scope.properties.len());
    for property in &scope.properties {
        let ObjectPropertyKind::ObjectProperty(property) = property else {
            return Err(ShapeMismatch::new(
                NestingLevel::Package,
                "a package name key",
                "a spread element",
                property.span(),
            ));
        };
        let Some(key) = property.key.static_name() else {
            return Err(ShapeMismatch::new(
                NestingLevel::Package,
                "a package name key",
                "a computed key",
                property.key.span(),
            ));
        };
        let files = expect_object(
            &property.value,
            NestingLevel::Package,
            format!("an object literal of files for package \"{key}\""),
        )?;
        packages.push(PackageTree {
            key: key.to_string(),
            span: property.span,
            files,
        });
    }

    if packages.is_empty() {
        return Err(ShapeMismatch::new(
            NestingLevel::Package,
            "at least one package entry",
            "an empty object",
            scope.span,
        ));
    }

    Ok(packages)
}

/// Flatten a package's file tree into `path -> factory` entries.
pub(crate) fn flatten_package<'c, 'a>(
    package: &PackageTree<'c, 'a>,
) -> Result<FlatPackage<'c, 'a>, ShapeMismatch> {
    let package_id = PackageId::parse(&package.key).map_err(|_| {
        ShapeMismatch::new(
            NestingLevel::Package,
            "a package name like \"name\" or \"scope:name\"",
            format!("key \"{}\"", package.key),
            package.span,
        )
    })?;

    let mut factories = Vec::new();
    flatten_tree(package.files, &ModulePath::new(""), &mut factories)?;
    Ok(FlatPackage {
        package_id,
        factories,
    })
}

fn flatten_tree<'c, 'a>(
    dir: &'c ObjectExpression<'a>,
    prefix: &ModulePath,
    out: &mut Vec<FactoryEntry<'c, 'a>>,
) -> Result<(), ShapeMismatch> {
    let level = || NestingLevel::ModuleTree {
        depth: prefix.depth(),
        parent: prefix.to_string(),
    };

    for property in &dir.properties {
        let ObjectPropertyKind::ObjectProperty(property) = property else {
            return Err(ShapeMismatch::new(
                level(),
                "a file or directory key",
                "a spread element",
                property.span(),
            ));
        };
        let Some(key) = property.key.static_name() else {
            return Err(ShapeMismatch::new(
                level(),
                "a file or directory key",
                "a computed key",
                property.key.span(),
            ));
        };
        let path = prefix.join(&key);

        if let Some(factory) = Factory::from_expression(&property.value) {
            out.push(FactoryEntry { path, factory });
            continue;
        }

        match property.value.without_parentheses() {
            Expression::ObjectExpression(nested) => flatten_tree(nested, &path, out)?,
            Expression::ArrayExpression(array) => {
                // `[dependency, ..., factory]` form
                let factory = array
                    .elements
                    .iter()
                    .rev()
                    .find_map(|element| element.as_expression().and_then(Factory::from_expression));
                match factory {
                    Some(factory) => out.push(FactoryEntry { path, factory }),
                    None => debug!(module = %path, "skipping array entry without a factory"),
                }
            }
            other => {
                debug!(module = %path, value = %describe_expression(other), "skipping non-module tree entry");
            }
        }
    }
    Ok(())
}

fn expect_object<'c, 'a>(
    expr: &'c Expression<'a>,
    level: NestingLevel,
    expected: impl Into<String>,
) -> Result<&'c ObjectExpression<'a>, ShapeMismatch> {
    match expr.without_parentheses() {
        Expression::ObjectExpression(object) => Ok(object),
        other => Err(ShapeMismatch::new(level, expected, describe_expression(other), other.span())),
    }
}

fn expect_key<'c, 'a>(
    object: &'c ObjectExpression<'a>,
    key: &str,
    level: NestingLevel,
) -> Result<&'c Expression<'a>, ShapeMismatch> {
    let mut first_key = None;
    for property in &object.properties {
        let ObjectPropertyKind::ObjectProperty(property) = property else {
            continue;
        };
        let Some(name) = property.key.static_name() else {
            continue;
        };
        if name == key {
            return Ok(&property.value);
        }
        first_key.get_or_insert_with(|| (name.to_string(), property.key.span()));
    }

    let expected = format!("key \"{key}\"");
    Err(match first_key {
        Some((found, span)) => ShapeMismatch::new(level, expected, format!("key \"{found}\""), span),
        None => ShapeMismatch::new(level, expected, "an object with no keys", object.span),
    })
}

fn describe_argument(argument: Option<&Argument<'_>>) -> String {
    match argument {
        None => "no arguments".to_string(),
        Some(Argument::SpreadElement(_)) => "a spread argument".to_string(),
        Some(argument) => argument
            .as_expression()
            .map_or_else(|| "an unsupported argument".to_string(), describe_expression),
    }
}

/// Short human description of an expression for mismatch messages.
pub(crate) fn describe_expression(expr: &Expression<'_>) -> String {
    match expr.without_parentheses() {
        Expression::ObjectExpression(_) => "an object literal".to_string(),
        Expression::ArrayExpression(_) => "an array literal".to_string(),
        Expression::FunctionExpression(_) | Expression::ArrowFunctionExpression(_) => {
            "a function".to_string()
        }
        Expression::StringLiteral(lit) => format!("string \"{}\"", lit.value),
        Expression::NumericLiteral(lit) => format!("number {}", lit.value),
        Expression::BooleanLiteral(lit) => format!("boolean {}", lit.value),
        Expression::NullLiteral(_) => "null".to_string(),
        Expression::Identifier(ident) => format!("identifier `{}`", ident.name),
        Expression::CallExpression(_) => "a call expression".to_string(),
        Expression::StaticMemberExpression(_) | Expression::ComputedMemberExpression(_) => {
            "a member expression".to_string()
        }
        _ => "an unsupported expression".to_string(),
    }
}
