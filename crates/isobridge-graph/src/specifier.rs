use crate::error::SpecifierError;
use crate::{ModulePath, PackageId};

/// An import request for a host package, e.g. `meteor/ostrio:cookies/lib/index.js`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSpecifier {
    pub package: PackageId,
    /// Submodule inside the package; `None` requests the main module.
    pub module: Option<ModulePath>,
}

impl ImportSpecifier {
    /// Parse a specifier whose first segment is `scope_key` (usually `meteor`).
    pub fn parse(specifier: &str, scope_key: &str) -> Result<Self, SpecifierError> {
        let prefix = format!("{scope_key}/");
        let rest = specifier
            .trim_start_matches('/')
            .strip_prefix(&prefix)
            .ok_or_else(|| SpecifierError::MissingPrefix {
                specifier: specifier.to_string(),
                prefix: prefix.clone(),
            })?;

        let (package, module) = match rest.split_once('/') {
            Some((package, module)) => (package, ModulePath::new(module)),
            None => (rest, ModulePath::new("")),
        };

        Ok(Self {
            package: PackageId::parse(package)?,
            module: (!module.is_empty()).then_some(module),
        })
    }

    /// Render back to `<scope_key>/<package>[/<module>]`.
    pub fn to_specifier(&self, scope_key: &str) -> String {
        match &self.module {
            Some(module) => format!("{scope_key}/{}/{module}", self.package),
            None => format!("{scope_key}/{}", self.package),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_package_root_request() {
        let spec = ImportSpecifier::parse("meteor/tracker", "meteor").unwrap();
        assert_eq!(spec.package.to_string(), "tracker");
        assert_eq!(spec.module, None);
    }

    #[test]
    fn parses_submodule_request() {
        let spec = ImportSpecifier::parse("meteor/ostrio:cookies/lib/index.js", "meteor").unwrap();
        assert_eq!(spec.package.to_string(), "ostrio:cookies");
        assert_eq!(spec.module, Some(ModulePath::new("lib/index.js")));
        assert_eq!(
            spec.to_specifier("meteor"),
            "meteor/ostrio:cookies/lib/index.js"
        );
    }

    #[test]
    fn trailing_slash_is_package_root() {
        let spec = ImportSpecifier::parse("meteor/tracker/", "meteor").unwrap();
        assert_eq!(spec.module, None);
    }

    #[test]
    fn rejects_foreign_specifiers() {
        let err = ImportSpecifier::parse("react/jsx-runtime", "meteor").unwrap_err();
        assert!(matches!(err, SpecifierError::MissingPrefix { .. }));

        let err = ImportSpecifier::parse("meteor/:bad", "meteor").unwrap_err();
        assert!(matches!(err, SpecifierError::InvalidPackageId(_)));
    }
}
