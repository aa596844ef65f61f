pub mod address;
pub mod package;

pub use address::{AddressingScheme, PathAddress};
pub use package::{EntrySource, MergedPackageRecord, PackageFileEntry, PackageLocation};
