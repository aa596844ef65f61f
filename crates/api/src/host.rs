//! Host environment contract.
//!
//! The host application owns the package directories; this layer only reads
//! them. Everything it needs to know about the host goes through
//! [`PackageHost`].

use std::path::{Path, PathBuf};

pub const DEFAULT_ARCHIVE_EXTENSION: &str = "sublime-package";
pub const DEFAULT_ROOT_TOKEN: &str = "Packages";
pub const DEFAULT_DISPLAY_TOKEN: &str = "${packages}";

pub trait PackageHost: Send + Sync {
    /// Directory holding folder-backed package overrides.
    fn overrides_root(&self) -> &Path;

    /// Directories searched for archive-backed packages, in priority order.
    fn archive_search_roots(&self) -> Vec<PathBuf>;

    /// Host platform name. Cosmetic only.
    fn platform_name(&self) -> String;

    /// Archive file extension, without the leading dot.
    fn archive_extension(&self) -> &str {
        DEFAULT_ARCHIVE_EXTENSION
    }

    /// Leading segment of config-relative addresses.
    fn root_token(&self) -> &str {
        DEFAULT_ROOT_TOKEN
    }

    /// Leading segment of display addresses.
    fn display_token(&self) -> &str {
        DEFAULT_DISPLAY_TOKEN
    }
}
