//! Read-only access to package archives.
//!
//! A [`PackageArchive`] owns its file handle; dropping it closes the archive,
//! so callers open one immediately before a read and let it go out of scope
//! right after.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use zip::ZipArchive;
use zip::result::ZipError;

use crate::error::{ResourceError, Result};

pub struct PackageArchive {
    path: PathBuf,
    zip: ZipArchive<File>,
}

impl PackageArchive {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| ResourceError::archive(path, ZipError::Io(e)))?;
        let zip = ZipArchive::new(file).map_err(|e| ResourceError::archive(path, e))?;
        Ok(Self {
            path: path.to_path_buf(),
            zip,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File member names in sorted order of their canonical form.
    /// Directory members are skipped.
    pub fn member_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .zip
            .file_names()
            .filter(|name| !name.ends_with('/') && !name.ends_with('\\'))
            .map(str::to_owned)
            .collect();
        names.sort_by_cached_key(|name| canonical_member_name(name));
        names
    }

    /// Whether a member's canonical name is `relative`.
    pub fn contains(&self, relative: &str) -> bool {
        self.member_for(relative).is_some()
    }

    /// Raw bytes of the member whose canonical name is `relative`, or `None`
    /// if the archive has no such member.
    pub fn read_member(&mut self, relative: &str) -> Result<Option<Vec<u8>>> {
        let Some(member) = self.member_for(relative) else {
            return Ok(None);
        };
        let mut entry = match self.zip.by_name(&member) {
            Ok(entry) => entry,
            Err(ZipError::FileNotFound) => return Ok(None),
            Err(e) => return Err(ResourceError::archive(&self.path, e)),
        };

        // The declared size is untrusted; let the buffer grow with the data.
        let mut bytes = Vec::new();
        entry
            .read_to_end(&mut bytes)
            .map_err(|e| ResourceError::archive(&self.path, ZipError::Io(e)))?;
        Ok(Some(bytes))
    }

    fn member_for(&self, relative: &str) -> Option<String> {
        if self.zip.index_for_name(relative).is_some() {
            return Some(relative.to_string());
        }
        self.zip
            .file_names()
            .find(|name| canonical_member_name(name) == relative)
            .map(str::to_owned)
    }
}

/// Member name with `/` separators, the form used as a listing key.
pub fn canonical_member_name(name: &str) -> String {
    name.replace('\\', "/")
}
