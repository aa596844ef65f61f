pub mod archive;
pub mod config;
pub mod discovery;
pub mod encoding;
pub mod error;
pub mod facade;
pub mod listing;
pub mod logging;
pub mod path;
pub mod registry;
pub mod resolver;

pub use config::HostConfig;
pub use encoding::TextEncoding;
pub use error::{ResourceError, Result};
pub use facade::PackageResources;
pub use listing::{PackageBrowse, PackageListing};
pub use registry::PackageRegistry;
