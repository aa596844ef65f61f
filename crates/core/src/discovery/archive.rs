//! Archive discoverer.
//!
//! Globs each search root for `*.<ext>` files. Each match is an
//! archive-backed package named after the file stem.

use packres_api::{LocationDiscoverer, PackageLocation};
use std::path::{Path, PathBuf};
use tracing::warn;

pub struct ArchiveDiscoverer {
    roots: Vec<PathBuf>,
    extension: String,
}

impl ArchiveDiscoverer {
    pub fn new(roots: Vec<PathBuf>, extension: &str) -> Self {
        Self {
            roots,
            extension: extension.to_string(),
        }
    }

    /// Matches under one root, in glob (alphabetical) order
    fn discover_root(&self, root: &Path) -> Vec<PackageLocation> {
        let pattern = format!(
            "{}/*.{}",
            glob::Pattern::escape(&root.to_string_lossy()),
            glob::Pattern::escape(&self.extension)
        );

        let paths = match glob::glob(&pattern) {
            Ok(paths) => paths,
            Err(e) => {
                warn!("Invalid archive pattern {:?}: {}", pattern, e);
                return Vec::new();
            }
        };

        paths
            .filter_map(|entry| match entry {
                Ok(path) => Some(path),
                Err(e) => {
                    warn!("Skipping unreadable archive candidate: {}", e);
                    None
                }
            })
            .filter(|path| path.is_file())
            .filter_map(|path| {
                let name = path.file_stem()?.to_string_lossy().into_owned();
                Some(PackageLocation::archive(name, path))
            })
            .collect()
    }
}

impl LocationDiscoverer for ArchiveDiscoverer {
    fn discover(&self) -> Box<dyn Iterator<Item = PackageLocation> + Send + '_> {
        Box::new(self.roots.iter().flat_map(|root| self.discover_root(root)))
    }

    fn name(&self) -> &str {
        "Archive Discoverer"
    }
}
