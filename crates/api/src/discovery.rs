use crate::models::PackageLocation;

/// Package location discoverer - knows one place packages live.
/// Uses Iterator pattern so callers can stream sightings.
pub trait LocationDiscoverer: Send + Sync {
    /// Returns the sightings of this source, in its own stable order
    fn discover(&self) -> Box<dyn Iterator<Item = PackageLocation> + Send + '_>;

    /// Discoverer name (for logging/debugging)
    fn name(&self) -> &str;
}
