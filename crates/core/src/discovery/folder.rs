//! Override folder discoverer.
//!
//! Every directory directly under the overrides root is a folder-backed
//! package named after the directory.

use packres_api::{LocationDiscoverer, PackageLocation};
use std::path::PathBuf;
use tracing::warn;

pub struct FolderDiscoverer {
    root: PathBuf,
}

impl FolderDiscoverer {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }
}

impl LocationDiscoverer for FolderDiscoverer {
    fn discover(&self) -> Box<dyn Iterator<Item = PackageLocation> + Send + '_> {
        let entries = match std::fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Cannot list overrides root {:?}: {}", self.root, e);
                return Box::new(std::iter::empty());
            }
        };

        Box::new(
            entries
                .filter_map(|e| e.ok())
                .map(|e| e.path())
                .filter(|path| path.is_dir())
                .filter_map(|path| {
                    let name = path.file_name()?.to_string_lossy().into_owned();
                    Some(PackageLocation::folder(name, path))
                }),
        )
    }

    fn name(&self) -> &str {
        "Override Folder Discoverer"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_folder_discoverer_lists_directories_only() {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path().to_path_buf();
        fs::create_dir_all(root.join("User")).unwrap();
        fs::create_dir_all(root.join("Default")).unwrap();
        fs::write(root.join("stray.txt"), b"x").unwrap();

        let discoverer = FolderDiscoverer::new(root.clone());
        let mut locations: Vec<_> = discoverer.discover().collect();
        locations.sort_by(|a, b| a.name.cmp(&b.name));

        assert_eq!(
            locations,
            vec![
                PackageLocation::folder("Default", root.join("Default")),
                PackageLocation::folder("User", root.join("User")),
            ]
        );
    }

    #[test]
    fn test_folder_discoverer_missing_root() {
        let temp = tempfile::tempdir().unwrap();
        let discoverer = FolderDiscoverer::new(temp.path().join("absent"));
        assert_eq!(discoverer.discover().count(), 0);
    }
}
