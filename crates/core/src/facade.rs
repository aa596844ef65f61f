use packres_api::{
    MergedPackageRecord, PackageFileEntry, PackageHost, PackageLocation, PathAddress,
};
use tracing::warn;

use crate::discovery::LocationScanner;
use crate::encoding::TextEncoding;
use crate::error::{ResourceError, Result};
use crate::listing::{self, NameFilter, PackageBrowse, PackageListing};
use crate::path::PathClassifier;
use crate::registry::PackageRegistry;
use crate::resolver::FileResolver;

/// Package resource handle - unified interface for host code
///
/// Every call recomputes its view from the live filesystem: packages can
/// change underfoot, so nothing is cached between calls.
pub struct PackageResources<H: PackageHost> {
    host: H,
    classifier: PathClassifier,
}

impl<H: PackageHost> PackageResources<H> {
    pub fn new(host: H) -> Result<Self> {
        let classifier = PathClassifier::for_host(&host)?;
        Ok(Self { host, classifier })
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn classifier(&self) -> &PathClassifier {
        &self.classifier
    }

    // ---- Addressing ----

    pub fn classify(&self, raw: &str) -> Result<PathAddress> {
        self.classifier.classify(raw)
    }

    pub fn to_display_address(&self, raw: &str) -> Result<String> {
        self.classifier.to_display_address(raw)
    }

    pub fn from_display_address(&self, display: &str) -> String {
        self.classifier.from_display_address(display)
    }

    // ---- Browsing ----

    /// Every package sighting, duplicates included
    pub fn enumerate_locations(&self) -> Vec<PackageLocation> {
        LocationScanner::for_host(&self.host).enumerate()
    }

    pub fn build_registry(&self) -> PackageRegistry {
        PackageRegistry::build(&self.host)
    }

    pub fn list_contents(
        &self,
        record: &MergedPackageRecord,
        filter: NameFilter<'_>,
    ) -> Result<PackageListing> {
        listing::list_contents(record, filter)
    }

    /// List a package by name
    pub fn list_package(&self, name: &str, filter: NameFilter<'_>) -> Result<PackageListing> {
        let registry = self.build_registry();
        let record = registry
            .get(name)
            .ok_or_else(|| ResourceError::PackageNotFound(name.to_string()))?;
        listing::list_contents(record, filter)
    }

    /// List every package; failures stay attached to their package
    pub fn browse_packages(&self, filter: NameFilter<'_>) -> Vec<PackageBrowse> {
        listing::browse_registry(&self.build_registry(), filter)
    }

    /// Matching files across all packages, as `(package, entry)` pairs.
    /// Packages that cannot be listed are logged and skipped.
    pub fn find_resources(&self, filter: NameFilter<'_>) -> Vec<(String, PackageFileEntry)> {
        let mut found = Vec::new();
        for browse in self.browse_packages(filter) {
            match browse.listing {
                Ok(listing) => found.extend(
                    listing
                        .into_values()
                        .map(|entry| (browse.package.clone(), entry)),
                ),
                Err(e) => warn!("Skipping package {} in resource search: {}", browse.package, e),
            }
        }
        found
    }

    // ---- Reading ----

    pub fn resolve_exists(&self, raw: &str) -> Result<bool> {
        self.resolver().exists(raw)
    }

    pub fn resolve_text(&self, raw: &str, encoding: TextEncoding) -> Result<String> {
        self.resolver().text(raw, encoding)
    }

    pub fn resolve_binary(&self, raw: &str) -> Result<Vec<u8>> {
        self.resolver().binary(raw)
    }

    fn resolver(&self) -> FileResolver<'_> {
        FileResolver::new(&self.host, &self.classifier)
    }
}
