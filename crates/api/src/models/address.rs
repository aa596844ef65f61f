use serde::{Deserialize, Serialize};
use std::fmt;

/// How a raw path string addresses a file inside a package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AddressingScheme {
    /// `Packages/<package>/<relative>`, relative to the overrides root.
    ConfigRelative,
    /// A real filesystem path under the overrides root.
    Absolute,
    /// `<prefix>/<package>.<ext>/<relative>`, a member inside an archive
    /// spelled as if the archive were a directory.
    ArchivePseudo,
}

impl AddressingScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            AddressingScheme::ConfigRelative => "config-relative",
            AddressingScheme::Absolute => "absolute",
            AddressingScheme::ArchivePseudo => "archive-pseudo",
        }
    }
}

impl fmt::Display for AddressingScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raw path decomposed into its package components.
///
/// `base_prefix` is only set for [`AddressingScheme::Absolute`] (the overrides
/// root) and [`AddressingScheme::ArchivePseudo`] (whatever precedes the
/// archive component).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathAddress {
    pub package: String,
    pub relative_path: String,
    pub scheme: AddressingScheme,
    pub base_prefix: Option<String>,
}

impl PathAddress {
    pub fn config_relative(package: impl Into<String>, relative_path: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            relative_path: relative_path.into(),
            scheme: AddressingScheme::ConfigRelative,
            base_prefix: None,
        }
    }

    pub fn absolute(
        package: impl Into<String>,
        relative_path: impl Into<String>,
        root: impl Into<String>,
    ) -> Self {
        Self {
            package: package.into(),
            relative_path: relative_path.into(),
            scheme: AddressingScheme::Absolute,
            base_prefix: Some(root.into()),
        }
    }

    pub fn archive_pseudo(
        package: impl Into<String>,
        relative_path: impl Into<String>,
        prefix: impl Into<String>,
    ) -> Self {
        Self {
            package: package.into(),
            relative_path: relative_path.into(),
            scheme: AddressingScheme::ArchivePseudo,
            base_prefix: Some(prefix.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_prefix_only_for_rooted_schemes() {
        assert_eq!(PathAddress::config_relative("Fool", "one.py").base_prefix, None);
        assert_eq!(
            PathAddress::absolute("Fool", "one.py", "/pkgs").base_prefix.as_deref(),
            Some("/pkgs")
        );
        assert_eq!(
            PathAddress::archive_pseudo("Fool", "one.py", "C:/x").scheme,
            AddressingScheme::ArchivePseudo
        );
    }

    #[test]
    fn test_address_serializes_scheme_by_name() {
        let address = PathAddress::config_relative("Default", "sort.py");
        let json = serde_json::to_string(&address).unwrap();
        assert!(json.contains("\"ConfigRelative\""));
    }
}
