use std::fmt;

use serde::{Deserialize, Serialize};

/// Forward-slash path of a module relative to its package root.
///
/// Construction normalizes the text so that every encoding of the same file
/// compares equal: `./lib//a.js`, `/lib/a.js` and the segments `["lib", "a.js"]`
/// all produce `lib/a.js`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ModulePath(String);

impl ModulePath {
    /// Normalize a raw path.
    pub fn new(raw: &str) -> Self {
        Self::from_segments(raw.split(['/', '\\']))
    }

    /// Join path segments, splitting any segment that itself contains `/`.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut parts: Vec<String> = Vec::new();
        for segment in segments {
            parts.extend(
                segment
                    .as_ref()
                    .split(['/', '\\'])
                    .filter(|part| !part.is_empty() && *part != ".")
                    .map(str::to_string),
            );
        }
        Self(parts.join("/"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for the package root itself.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Enclosing directory, empty at the package root.
    pub fn parent(&self) -> &str {
        self.0.rsplit_once('/').map_or("", |(dir, _)| dir)
    }

    /// Last path segment.
    pub fn file_name(&self) -> &str {
        self.0.rsplit_once('/').map_or(self.0.as_str(), |(_, name)| name)
    }

    /// Append a relative path.
    pub fn join(&self, rest: &str) -> Self {
        Self::from_segments([self.0.as_str(), rest])
    }

    /// Append a suffix to the last segment (`lib/a` + `.js`).
    pub fn with_suffix(&self, suffix: &str) -> Self {
        Self(format!("{}{suffix}", self.0))
    }

    /// Number of `/`-separated segments.
    pub fn depth(&self) -> usize {
        if self.0.is_empty() {
            0
        } else {
            self.0.matches('/').count() + 1
        }
    }
}

impl fmt::Display for ModulePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ModulePath {
    fn from(value: String) -> Self {
        Self::new(&value)
    }
}

impl From<&str> for ModulePath {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<ModulePath> for String {
    fn from(path: ModulePath) -> Self {
        path.0
    }
}

impl AsRef<str> for ModulePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_equivalent_encodings() {
        let expected = ModulePath::new("lib/server/index.js");
        assert_eq!(ModulePath::new("./lib/server/index.js"), expected);
        assert_eq!(ModulePath::new("/lib//server/./index.js"), expected);
        assert_eq!(ModulePath::from_segments(["lib", "server", "index.js"]), expected);
        assert_eq!(ModulePath::from_segments(["lib/server", "index.js"]), expected);
    }

    #[test]
    fn parent_and_file_name() {
        let path = ModulePath::new("lib/server/index.js");
        assert_eq!(path.parent(), "lib/server");
        assert_eq!(path.file_name(), "index.js");
        assert_eq!(path.depth(), 3);

        let root_file = ModulePath::new("main.js");
        assert_eq!(root_file.parent(), "");
        assert_eq!(root_file.file_name(), "main.js");
    }

    #[test]
    fn join_and_suffix() {
        let dir = ModulePath::new("lib");
        assert_eq!(dir.join("index.js").as_str(), "lib/index.js");
        assert_eq!(dir.with_suffix(".js").as_str(), "lib.js");
        assert!(ModulePath::new("./").is_empty());
        assert_eq!(ModulePath::new("").depth(), 0);
    }
}
