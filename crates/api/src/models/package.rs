use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A single sighting of a package at one backend.
///
/// Enumeration yields one of these per override folder and per archive
/// file, so the same `name` may show up several times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageLocation {
    pub name: String,
    pub archive_path: Option<PathBuf>,
    pub folder_path: Option<PathBuf>,
}

impl PackageLocation {
    pub fn folder(name: impl Into<String>, path: PathBuf) -> Self {
        Self {
            name: name.into(),
            archive_path: None,
            folder_path: Some(path),
        }
    }

    pub fn archive(name: impl Into<String>, path: PathBuf) -> Self {
        Self {
            name: name.into(),
            archive_path: Some(path),
            folder_path: None,
        }
    }

    /// Backend kind, for logging
    pub fn kind(&self) -> &'static str {
        if self.archive_path.is_some() {
            "archive"
        } else {
            "folder"
        }
    }
}

/// The logical package: at most one archive and one override folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedPackageRecord {
    pub name: String,
    pub archive_path: Option<PathBuf>,
    pub folder_path: Option<PathBuf>,
}

impl MergedPackageRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            archive_path: None,
            folder_path: None,
        }
    }

    /// Fold a sighting into this record. Fields that are already set are
    /// never overwritten, so the first sighting of each kind wins.
    pub fn absorb(&mut self, sighting: &PackageLocation) {
        if self.archive_path.is_none() {
            self.archive_path = sighting.archive_path.clone();
        }
        if self.folder_path.is_none() {
            self.folder_path = sighting.folder_path.clone();
        }
    }
}

/// Where a package file should be read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntrySource<'a> {
    Folder(&'a Path),
    Archive(&'a str),
}

/// One file of a package listing, keyed by its `/`-separated relative name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageFileEntry {
    pub relative_name: String,
    pub archive_member: Option<String>,
    pub folder_path: Option<PathBuf>,
}

impl PackageFileEntry {
    pub fn new(relative_name: impl Into<String>) -> Self {
        Self {
            relative_name: relative_name.into(),
            archive_member: None,
            folder_path: None,
        }
    }

    /// The folder copy shadows the archive member when both exist.
    pub fn preferred_source(&self) -> Option<EntrySource<'_>> {
        match (&self.folder_path, &self.archive_member) {
            (Some(path), _) => Some(EntrySource::Folder(path)),
            (None, Some(member)) => Some(EntrySource::Archive(member)),
            (None, None) => None,
        }
    }

    pub fn is_overridden(&self) -> bool {
        self.folder_path.is_some() && self.archive_member.is_some()
    }

    /// `<archive>/<member>` pseudo path for the archived copy, if any.
    pub fn archive_pseudo_path(&self, archive: &Path) -> Option<String> {
        let member = self.archive_member.as_ref()?;
        let archive = archive.to_string_lossy().replace('\\', "/");
        Some(format!(
            "{}/{}",
            archive.trim_end_matches('/'),
            member.replace('\\', "/")
        ))
    }
}
