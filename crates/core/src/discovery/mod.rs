//! Package location enumeration.
//!
//! The scanner runs its discoverers in registration order and concatenates
//! their sightings:
//!
//! ```text
//! ┌──────────────────────┐
//! │  FolderDiscoverer    │  one sighting per directory under the overrides root
//! └──────────┬───────────┘
//!            ▼
//! ┌──────────────────────┐
//! │  ArchiveDiscoverer   │  one sighting per archive, search roots in order
//! └──────────┬───────────┘
//!            ▼
//!     Vec<PackageLocation>   (duplicates kept; merging is the registry's job)
//! ```

pub mod archive;
pub mod folder;

pub use archive::ArchiveDiscoverer;
pub use folder::FolderDiscoverer;

use packres_api::{LocationDiscoverer, PackageHost, PackageLocation};
use tracing::debug;

/// Combines multiple location discoverers
pub struct LocationScanner {
    discoverers: Vec<Box<dyn LocationDiscoverer>>,
}

impl LocationScanner {
    pub fn new() -> Self {
        Self {
            discoverers: Vec::new(),
        }
    }

    /// Folder sightings first, then archive sightings in search-root order.
    pub fn for_host(host: &dyn PackageHost) -> Self {
        Self::new()
            .add_discoverer(Box::new(FolderDiscoverer::new(
                host.overrides_root().to_path_buf(),
            )))
            .add_discoverer(Box::new(ArchiveDiscoverer::new(
                host.archive_search_roots(),
                host.archive_extension(),
            )))
    }

    /// Add a discoverer
    pub fn add_discoverer(mut self, discoverer: Box<dyn LocationDiscoverer>) -> Self {
        self.discoverers.push(discoverer);
        self
    }

    /// Collect every sighting, in discoverer order
    pub fn enumerate(&self) -> Vec<PackageLocation> {
        let mut locations = Vec::new();

        for discoverer in &self.discoverers {
            let before = locations.len();
            locations.extend(discoverer.discover());
            debug!(
                "Discoverer {} found {} package locations",
                discoverer.name(),
                locations.len() - before
            );
        }

        locations
    }
}

impl Default for LocationScanner {
    fn default() -> Self {
        Self::new()
    }
}
