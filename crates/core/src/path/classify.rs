//! Raw path to [`PathAddress`] classification.
//!
//! Three syntaxes are recognized, tried in this order:
//!
//! ```text
//! Packages/<pkg>/<relative...>                  config-relative
//! <prefix>/<pkg>.<ext>/<relative...>            archive-pseudo (either separator)
//! <overrides-root>/<pkg>/<relative...>          absolute
//! ```
//!
//! The overrides root also matches in its display form, so `/C/...` works
//! for a `C:\...` root.
//!
//! Anything else is a classification error.

use packres_api::{AddressingScheme, PackageHost, PathAddress};
use regex::Regex;
use std::path::Path;

use super::display::to_open_file_path;
use crate::error::{ResourceError, Result};

#[derive(Debug, Clone)]
pub struct PathClassifier {
    /// `<root_token>/`
    root_marker: String,
    root_token: String,
    display_token: String,
    /// Overrides root as the host reported it
    overrides_root: String,
    /// Overrides root with `/` separators and no trailing separator
    overrides_root_normalized: String,
    /// Overrides root in `open_file` form (`/C/...` for drive roots)
    overrides_root_open: String,
    archive_pattern: Regex,
}

impl PathClassifier {
    pub fn new(
        overrides_root: &Path,
        archive_extension: &str,
        root_token: &str,
        display_token: &str,
    ) -> Result<Self> {
        let pattern = format!(
            r"(?s)^(?P<prefix>.*)/(?P<package>[^/]+?)\.{}/(?P<relative>.*)$",
            regex::escape(archive_extension)
        );
        let archive_pattern = Regex::new(&pattern)
            .map_err(|e| ResourceError::Config(format!("archive pattern {pattern:?}: {e}")))?;

        let overrides_root = overrides_root.to_string_lossy().into_owned();
        let overrides_root_normalized = overrides_root
            .replace('\\', "/")
            .trim_end_matches('/')
            .to_string();
        let overrides_root_open = to_open_file_path(&overrides_root_normalized);

        Ok(Self {
            root_marker: format!("{root_token}/"),
            root_token: root_token.to_string(),
            display_token: display_token.to_string(),
            overrides_root,
            overrides_root_normalized,
            overrides_root_open,
            archive_pattern,
        })
    }

    pub fn for_host(host: &dyn PackageHost) -> Result<Self> {
        Self::new(
            host.overrides_root(),
            host.archive_extension(),
            host.root_token(),
            host.display_token(),
        )
    }

    /// Decompose `raw` into package, relative path, scheme and base prefix.
    pub fn classify(&self, raw: &str) -> Result<PathAddress> {
        if let Some(rest) = raw.strip_prefix(&self.root_marker) {
            let (package, relative) = split_package(rest).ok_or_else(|| {
                ResourceError::classification(raw, "expected <root>/<package>/<relative>")
            })?;
            return Ok(PathAddress::config_relative(package, relative));
        }

        let normalized = raw.replace('\\', "/");
        if let Some(caps) = self.archive_pattern.captures(&normalized) {
            return Ok(PathAddress::archive_pseudo(
                &caps["package"],
                &caps["relative"],
                &caps["prefix"],
            ));
        }

        let rest = [&self.overrides_root_normalized, &self.overrides_root_open]
            .into_iter()
            .find_map(|root| {
                normalized
                    .strip_prefix(root.as_str())
                    .and_then(|rest| rest.strip_prefix('/'))
            })
            .ok_or_else(|| {
                ResourceError::classification(raw, "not under any recognized package root")
            })?;
        let (package, relative) = split_package(rest).ok_or_else(|| {
            ResourceError::classification(raw, "expected <overrides-root>/<package>/<relative>")
        })?;
        Ok(PathAddress::absolute(package, relative, self.overrides_root.as_str()))
    }

    /// Short, host-addressable form of `raw`.
    ///
    /// Absolute paths become `open_file` paths (see [`to_open_file_path`]);
    /// everything else becomes `<display-token>/<package>/<relative>`.
    pub fn to_display_address(&self, raw: &str) -> Result<String> {
        let address = self.classify(raw)?;
        Ok(match address.scheme {
            AddressingScheme::Absolute => to_open_file_path(raw),
            AddressingScheme::ConfigRelative | AddressingScheme::ArchivePseudo => format!(
                "{}/{}/{}",
                self.display_token, address.package, address.relative_path
            ),
        })
    }

    /// Reinterpret a display address as the equivalent config-relative one.
    /// Other strings are returned unchanged.
    pub fn from_display_address(&self, display: &str) -> String {
        match display
            .strip_prefix(self.display_token.as_str())
            .and_then(|rest| rest.strip_prefix('/'))
        {
            Some(rest) => format!("{}/{}", self.root_token, rest),
            None => display.to_string(),
        }
    }
}

/// `<package>/<relative...>`; the relative part keeps its embedded slashes.
fn split_package(rest: &str) -> Option<(&str, &str)> {
    rest.split_once('/')
        .filter(|(package, _)| !package.is_empty())
}
