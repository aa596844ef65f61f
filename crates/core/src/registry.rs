//! Merged package registry.
//!
//! Folds package sightings into one [`MergedPackageRecord`] per name. The
//! merge is sequential over a fixed enumeration order, so "first sighting
//! wins" is deterministic: the first archive and the first folder seen for
//! a name are kept, later ones are ignored.

use indexmap::IndexMap;
use indexmap::map::Entry;
use packres_api::{MergedPackageRecord, PackageHost, PackageLocation};
use tracing::{debug, info};

use crate::discovery::LocationScanner;

#[derive(Debug, Clone, Default)]
pub struct PackageRegistry {
    /// Keyed by package name, in first-sighting order
    packages: IndexMap<String, MergedPackageRecord>,
}

impl PackageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enumerate the host's package locations and merge them.
    pub fn build(host: &dyn PackageHost) -> Self {
        let locations = LocationScanner::for_host(host).enumerate();
        let registry = Self::from_locations(locations);
        info!(
            "Package registry built: {} packages from {:?} and {} archive roots",
            registry.len(),
            host.overrides_root(),
            host.archive_search_roots().len()
        );
        registry
    }

    pub fn from_locations(locations: impl IntoIterator<Item = PackageLocation>) -> Self {
        let mut registry = Self::new();
        for location in locations {
            registry.merge(&location);
        }
        registry
    }

    /// Fold one sighting in, creating the record on first sight.
    pub fn merge(&mut self, location: &PackageLocation) {
        match self.packages.entry(location.name.clone()) {
            Entry::Occupied(mut existing) => {
                let record = existing.get_mut();
                let before = (record.archive_path.is_some(), record.folder_path.is_some());
                record.absorb(location);
                if before == (record.archive_path.is_some(), record.folder_path.is_some()) {
                    debug!(
                        "Ignoring later {} sighting of {}",
                        location.kind(),
                        location.name
                    );
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(MergedPackageRecord::new(location.name.clone()))
                    .absorb(location);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&MergedPackageRecord> {
        self.packages.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.packages.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.packages.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MergedPackageRecord> {
        self.packages.values()
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    pub fn into_map(self) -> IndexMap<String, MergedPackageRecord> {
        self.packages
    }
}
