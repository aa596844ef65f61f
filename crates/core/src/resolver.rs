//! File resolution across the override folder and the archive search roots.
//!
//! Lookup order for a raw path:
//! 1. The folder-backed path (`<overrides-root>/<package>/<relative>` for
//!    config-relative addresses, the raw path itself otherwise).
//! 2. `<root>/<package>.<ext>` for each archive search root, in order; the
//!    first archive holding the member wins.
//!
//! Nothing is cached between calls.

use packres_api::{AddressingScheme, PackageHost, PathAddress};
use std::path::PathBuf;
use tracing::debug;

use crate::archive::PackageArchive;
use crate::encoding::{TextEncoding, normalize_newlines};
use crate::error::{ResourceError, Result};
use crate::path::PathClassifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lookup {
    Probe,
    Read,
}

struct Found {
    /// Where the bytes came from, for diagnostics
    origin: String,
    bytes: Vec<u8>,
}

pub struct FileResolver<'a> {
    host: &'a dyn PackageHost,
    classifier: &'a PathClassifier,
}

impl<'a> FileResolver<'a> {
    pub fn new(host: &'a dyn PackageHost, classifier: &'a PathClassifier) -> Self {
        Self { host, classifier }
    }

    pub fn exists(&self, raw: &str) -> Result<bool> {
        Ok(self.lookup(raw, Lookup::Probe)?.is_some())
    }

    pub fn binary(&self, raw: &str) -> Result<Vec<u8>> {
        self.lookup(raw, Lookup::Read)?
            .map(|found| found.bytes)
            .ok_or_else(|| ResourceError::FileNotFound(raw.to_string()))
    }

    /// Decoded contents with universal newlines.
    pub fn text(&self, raw: &str, encoding: TextEncoding) -> Result<String> {
        let found = self
            .lookup(raw, Lookup::Read)?
            .ok_or_else(|| ResourceError::FileNotFound(raw.to_string()))?;
        encoding
            .decode(&found.bytes, &found.origin)
            .map(normalize_newlines)
    }

    fn folder_candidate(&self, raw: &str, address: &PathAddress) -> PathBuf {
        match address.scheme {
            AddressingScheme::ConfigRelative => self
                .host
                .overrides_root()
                .join(&address.package)
                .join(&address.relative_path),
            AddressingScheme::Absolute | AddressingScheme::ArchivePseudo => PathBuf::from(raw),
        }
    }

    fn lookup(&self, raw: &str, mode: Lookup) -> Result<Option<Found>> {
        let address = self.classifier.classify(raw)?;

        let candidate = self.folder_candidate(raw, &address);
        if candidate.is_file() {
            debug!("Resolved {} from folder {:?}", raw, candidate);
            let bytes = match mode {
                Lookup::Probe => Vec::new(),
                Lookup::Read => {
                    std::fs::read(&candidate).map_err(|e| ResourceError::io(&candidate, e))?
                }
            };
            return Ok(Some(Found {
                origin: candidate.display().to_string(),
                bytes,
            }));
        }

        let archive_name = format!("{}.{}", address.package, self.host.archive_extension());
        for root in self.host.archive_search_roots() {
            let archive_path = root.join(&archive_name);
            if !archive_path.is_file() {
                continue;
            }

            let mut archive = PackageArchive::open(&archive_path)?;
            let member = address.relative_path.as_str();
            let bytes = match mode {
                Lookup::Probe => archive.contains(member).then(Vec::new),
                Lookup::Read => archive.read_member(member)?,
            };

            if let Some(bytes) = bytes {
                debug!("Resolved {} from archive {:?}", raw, archive_path);
                return Ok(Some(Found {
                    origin: format!("{}/{}", archive_path.display(), member),
                    bytes,
                }));
            }
        }

        debug!("Nothing provides {}", raw);
        Ok(None)
    }
}
