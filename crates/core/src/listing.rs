//! Package content listing.
//!
//! A package's file set is the union of its archive members and the files
//! under its override folder, keyed by `/`-separated relative name. Archive
//! members come first in sorted order; folder files follow in directory walk
//! order, which is platform dependent.

use indexmap::IndexMap;
use packres_api::{MergedPackageRecord, PackageFileEntry};
use std::path::Path;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::archive::{PackageArchive, canonical_member_name};
use crate::error::Result;
use crate::registry::PackageRegistry;

pub type PackageListing = IndexMap<String, PackageFileEntry>;

/// Optional filter over relative names.
pub type NameFilter<'a> = Option<&'a dyn Fn(&str) -> bool>;

const VCS_DIRS: &[&str] = &[".git", ".hg", ".svn"];

/// Outcome of listing one package during a multi-package browse.
#[derive(Debug)]
pub struct PackageBrowse {
    pub package: String,
    pub listing: Result<PackageListing>,
}

/// List one package. Fails only if its archive cannot be read.
pub fn list_contents(
    record: &MergedPackageRecord,
    filter: NameFilter<'_>,
) -> Result<PackageListing> {
    let mut contents = PackageListing::new();
    let accepts = |name: &str| filter.is_none_or(|f| f(name));

    if let Some(archive_path) = &record.archive_path {
        let archive = PackageArchive::open(archive_path)?;
        for member in archive.member_names() {
            let relative = canonical_member_name(&member);
            if !accepts(&relative) {
                continue;
            }
            let entry = contents
                .entry(relative.clone())
                .or_insert_with(|| PackageFileEntry::new(relative));
            entry.archive_member = Some(member);
        }
        // archive handle dropped here
    }

    if let Some(folder) = &record.folder_path {
        for entry in walk_folder(folder) {
            let Some(relative) = relative_name(folder, entry.path()) else {
                continue;
            };
            if !accepts(&relative) {
                continue;
            }
            contents
                .entry(relative.clone())
                .or_insert_with(|| PackageFileEntry::new(relative))
                .folder_path = Some(entry.into_path());
        }
    }

    debug!("Listed {} entries for package {}", contents.len(), record.name);
    Ok(contents)
}

/// List every package in `registry`. A package whose archive is unreadable
/// gets an error result; the others are still listed.
pub fn browse_registry(registry: &PackageRegistry, filter: NameFilter<'_>) -> Vec<PackageBrowse> {
    registry
        .iter()
        .map(|record| {
            let listing = list_contents(record, filter);
            if let Err(e) = &listing {
                warn!("Failed to list package {}: {}", record.name, e);
            }
            PackageBrowse {
                package: record.name.clone(),
                listing,
            }
        })
        .collect()
}

/// Files under `folder`, skipping version-control metadata directories.
/// Symlinks to directories are not followed and not listed.
fn walk_folder(folder: &Path) -> impl Iterator<Item = DirEntry> {
    WalkDir::new(folder)
        .into_iter()
        .filter_entry(|e| !is_vcs_dir(e))
        .filter_map(|e| match e {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!("Skipping unreadable override entry: {}", err);
                None
            }
        })
        .filter(|e| !e.path().is_dir())
}

fn is_vcs_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| VCS_DIRS.contains(&name))
}

/// `path` relative to `folder`, joined with `/` whatever the platform.
fn relative_name(folder: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(folder).ok()?;
    let parts: Vec<_> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect();
    if parts.is_empty() {
        return None;
    }
    Some(parts.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::test_support::create_archive;
    use crate::error::ResourceError;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn record(
        name: &str,
        archive: Option<PathBuf>,
        folder: Option<PathBuf>,
    ) -> MergedPackageRecord {
        MergedPackageRecord {
            name: name.to_string(),
            archive_path: archive,
            folder_path: folder,
        }
    }

    #[test]
    fn test_union_with_folder_override() {
        let dir = tempdir().unwrap();
        let archive = dir.path().join("Default.sublime-package");
        create_archive(&archive, &[("sort.py", b"zip"), ("nested/a.py", b"zip")]);

        let folder = dir.path().join("Default");
        fs::create_dir_all(folder.join("nested")).unwrap();
        fs::write(folder.join("nested/a.py"), b"folder").unwrap();
        fs::write(folder.join("extra.py"), b"folder").unwrap();

        let record = record("Default", Some(archive), Some(folder.clone()));
        let listing = list_contents(&record, None).unwrap();

        assert_eq!(listing.len(), 3);

        let sort = &listing["sort.py"];
        assert_eq!(sort.archive_member.as_deref(), Some("sort.py"));
        assert_eq!(sort.folder_path, None);

        let nested = &listing["nested/a.py"];
        assert_eq!(nested.archive_member.as_deref(), Some("nested/a.py"));
        assert_eq!(nested.folder_path, Some(folder.join("nested/a.py")));
        assert!(nested.is_overridden());

        let extra = &listing["extra.py"];
        assert_eq!(extra.archive_member, None);
        assert_eq!(extra.folder_path, Some(folder.join("extra.py")));
    }

    #[test]
    fn test_archive_entries_come_first_sorted() {
        let dir = tempdir().unwrap();
        let archive = dir.path().join("P.sublime-package");
        create_archive(&archive, &[("b.py", b""), ("a.py", b""), ("c/d.py", b"")]);

        let listing = list_contents(&record("P", Some(archive), None), None).unwrap();
        let keys: Vec<_> = listing.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["a.py", "b.py", "c/d.py"]);
    }

    #[test]
    fn test_vcs_directories_are_skipped() {
        let dir = tempdir().unwrap();
        let folder = dir.path().join("User");
        for vcs in [".git", ".hg", ".svn"] {
            fs::create_dir_all(folder.join(vcs)).unwrap();
            fs::write(folder.join(vcs).join("config"), b"x").unwrap();
        }
        fs::write(folder.join("foo.py"), b"x").unwrap();

        let listing = list_contents(&record("User", None, Some(folder)), None).unwrap();
        let keys: Vec<_> = listing.keys().cloned().collect();
        assert_eq!(keys, vec!["foo.py".to_string()]);
    }

    #[test]
    fn test_filter_applies_to_both_backends() {
        let dir = tempdir().unwrap();
        let archive = dir.path().join("P.sublime-package");
        create_archive(&archive, &[("a.py", b""), ("a.txt", b"")]);
        let folder = dir.path().join("P");
        fs::create_dir_all(&folder).unwrap();
        fs::write(folder.join("b.py"), b"").unwrap();
        fs::write(folder.join("b.md"), b"").unwrap();

        let only_python: &dyn Fn(&str) -> bool = &|name: &str| name.ends_with(".py");
        let record = record("P", Some(archive), Some(folder));
        let listing = list_contents(&record, Some(only_python)).unwrap();

        let mut keys: Vec<_> = listing.keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, vec!["a.py".to_string(), "b.py".to_string()]);
    }

    #[test]
    fn test_backslash_member_merges_with_folder_file() {
        let dir = tempdir().unwrap();
        let archive = dir.path().join("P.sublime-package");
        create_archive(&archive, &[("nested\\a.py", b"zip")]);
        let folder = dir.path().join("P");
        fs::create_dir_all(folder.join("nested")).unwrap();
        fs::write(folder.join("nested/a.py"), b"folder").unwrap();

        let record = record("P", Some(archive), Some(folder.clone()));
        let listing = list_contents(&record, None).unwrap();
        let keys: Vec<_> = listing.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["nested/a.py"]);

        let entry = &listing["nested/a.py"];
        assert_eq!(entry.archive_member.as_deref(), Some("nested\\a.py"));
        assert_eq!(entry.folder_path, Some(folder.join("nested/a.py")));
        assert!(entry.is_overridden());
    }

    #[cfg(unix)]
    #[test]
    fn test_directory_symlinks_are_not_files() {
        let dir = tempdir().unwrap();
        let elsewhere = dir.path().join("elsewhere");
        fs::create_dir_all(&elsewhere).unwrap();
        fs::write(elsewhere.join("y.py"), b"y").unwrap();

        let folder = dir.path().join("P");
        fs::create_dir_all(folder.join("real")).unwrap();
        fs::write(folder.join("real/x.py"), b"x").unwrap();
        fs::write(elsewhere.join("z.py"), b"z").unwrap();
        std::os::unix::fs::symlink(&elsewhere, folder.join("linked")).unwrap();
        std::os::unix::fs::symlink(elsewhere.join("z.py"), folder.join("z.py")).unwrap();

        let listing = list_contents(&record("P", None, Some(folder)), None).unwrap();
        let mut keys: Vec<_> = listing.keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, vec!["real/x.py".to_string(), "z.py".to_string()]);
    }

    #[test]
    fn test_browse_isolates_broken_archive() {
        let dir = tempdir().unwrap();
        let broken = dir.path().join("Broken.sublime-package");
        fs::write(&broken, b"garbage").unwrap();
        let good = dir.path().join("Good.sublime-package");
        create_archive(&good, &[("ok.txt", b"ok")]);

        let registry = PackageRegistry::from_locations([
            packres_api::PackageLocation::archive("Broken", broken),
            packres_api::PackageLocation::archive("Good", good),
        ]);

        let results = browse_registry(&registry, None);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].package, "Broken");
        assert!(matches!(results[0].listing, Err(ResourceError::ArchiveRead { .. })));
        assert_eq!(results[1].package, "Good");
        assert!(results[1].listing.as_ref().unwrap().contains_key("ok.txt"));
    }
}
