pub mod discovery;
pub mod host;
pub mod models;

// Re-export commonly used types
pub use discovery::LocationDiscoverer;
pub use host::{DEFAULT_ARCHIVE_EXTENSION, DEFAULT_DISPLAY_TOKEN, DEFAULT_ROOT_TOKEN, PackageHost};
pub use models::*;
