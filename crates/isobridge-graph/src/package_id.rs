use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SpecifierError;

/// Host package identifier: `name` or `scope:name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PackageId {
    scope: Option<String>,
    name: String,
}

impl PackageId {
    /// Parse `name` or `scope:name`.
    pub fn parse(raw: &str) -> Result<Self, SpecifierError> {
        let invalid = || SpecifierError::InvalidPackageId(raw.to_string());
        let is_part = |part: &str| {
            !part.is_empty() && !part.contains(['/', ':']) && !part.chars().any(char::is_whitespace)
        };

        match raw.split_once(':') {
            Some((scope, name)) if is_part(scope) && is_part(name) => Ok(Self {
                scope: Some(scope.to_string()),
                name: name.to_string(),
            }),
            Some(_) => Err(invalid()),
            None if is_part(raw) => Ok(Self {
                scope: None,
                name: raw.to_string(),
            }),
            None => Err(invalid()),
        }
    }

    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Directory-safe form: `ostrio:cookies` becomes `ostrio_cookies`.
    pub fn fs_name(&self) -> String {
        match &self.scope {
            Some(scope) => format!("{scope}_{}", self.name),
            None => self.name.clone(),
        }
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.scope {
            Some(scope) => write!(f, "{scope}:{}", self.name),
            None => f.write_str(&self.name),
        }
    }
}

impl FromStr for PackageId {
    type Err = SpecifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PackageId {
    type Error = SpecifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PackageId> for String {
    fn from(id: PackageId) -> Self {
        id.to_string()
    }
}
