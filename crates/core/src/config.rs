//! Host configuration.
//!
//! [`HostConfig`] is the concrete [`PackageHost`] used when the host hands us
//! plain paths (a JSON file or environment variables) instead of its own
//! implementation of the trait.

use packres_api::{
    DEFAULT_ARCHIVE_EXTENSION, DEFAULT_DISPLAY_TOKEN, DEFAULT_ROOT_TOKEN, PackageHost,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ResourceError, Result};

pub const ENV_OVERRIDES_ROOT: &str = "PACKRES_OVERRIDES_ROOT";
pub const ENV_INSTALLED_PACKAGES: &str = "PACKRES_INSTALLED_PACKAGES";
pub const ENV_EXECUTABLE: &str = "PACKRES_EXECUTABLE";
pub const ENV_PLATFORM: &str = "PACKRES_PLATFORM";

/// Application directory name under the user config dir.
const APP_DIR: &str = "sublime-text";
const INSTALLED_PACKAGES_DIR: &str = "Installed Packages";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostConfig {
    pub overrides_root: PathBuf,
    pub installed_packages_dir: PathBuf,
    #[serde(default)]
    pub executable_path: Option<PathBuf>,
    #[serde(default = "default_platform")]
    pub platform: String,
    #[serde(default = "default_archive_extension")]
    pub archive_extension: String,
    #[serde(default = "default_root_token")]
    pub root_token: String,
    #[serde(default = "default_display_token")]
    pub display_token: String,
}

fn default_platform() -> String {
    std::env::consts::OS.to_string()
}

fn default_archive_extension() -> String {
    DEFAULT_ARCHIVE_EXTENSION.to_string()
}

fn default_root_token() -> String {
    DEFAULT_ROOT_TOKEN.to_string()
}

fn default_display_token() -> String {
    DEFAULT_DISPLAY_TOKEN.to_string()
}

impl HostConfig {
    pub fn new(overrides_root: PathBuf, installed_packages_dir: PathBuf) -> Self {
        Self {
            overrides_root,
            installed_packages_dir,
            executable_path: None,
            platform: default_platform(),
            archive_extension: default_archive_extension(),
            root_token: default_root_token(),
            display_token: default_display_token(),
        }
    }

    pub fn with_executable(mut self, path: PathBuf) -> Self {
        self.executable_path = Some(path);
        self
    }

    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = platform.into();
        self
    }

    pub fn with_archive_extension(mut self, extension: impl Into<String>) -> Self {
        self.archive_extension = extension.into();
        self
    }

    /// Load from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ResourceError::io(path, e))?;
        serde_json::from_str(&content)
            .map_err(|e| ResourceError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Build from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup.
    ///
    /// Checks in order:
    /// 1. `PACKRES_*` variables
    /// 2. The user config directory (`<config>/sublime-text/...`)
    /// 3. The running executable for `executable_path`
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let app_dir = dirs::config_dir().map(|dir| dir.join(APP_DIR));

        let overrides_root = match lookup(ENV_OVERRIDES_ROOT) {
            Some(path) => PathBuf::from(path),
            None => app_dir
                .as_ref()
                .map(|dir| dir.join(DEFAULT_ROOT_TOKEN))
                .ok_or_else(|| {
                    ResourceError::Config(format!(
                        "{ENV_OVERRIDES_ROOT} is unset and no config directory is known"
                    ))
                })?,
        };

        let installed_packages_dir = match lookup(ENV_INSTALLED_PACKAGES) {
            Some(path) => PathBuf::from(path),
            None => app_dir
                .as_ref()
                .map(|dir| dir.join(INSTALLED_PACKAGES_DIR))
                .ok_or_else(|| {
                    ResourceError::Config(format!(
                        "{ENV_INSTALLED_PACKAGES} is unset and no config directory is known"
                    ))
                })?,
        };

        let executable_path = lookup(ENV_EXECUTABLE)
            .map(PathBuf::from)
            .or_else(|| std::env::current_exe().ok());

        let mut config = Self::new(overrides_root, installed_packages_dir);
        config.executable_path = executable_path;
        if let Some(platform) = lookup(ENV_PLATFORM) {
            config.platform = platform;
        }
        Ok(config)
    }
}

impl PackageHost for HostConfig {
    fn overrides_root(&self) -> &Path {
        &self.overrides_root
    }

    fn archive_search_roots(&self) -> Vec<PathBuf> {
        let mut roots = vec![self.installed_packages_dir.clone()];
        if let Some(exe_dir) = self.executable_path.as_deref().and_then(Path::parent) {
            roots.push(exe_dir.join(&self.root_token));
        }
        roots
    }

    fn platform_name(&self) -> String {
        normalized_platform(&self.platform)
    }

    fn archive_extension(&self) -> &str {
        &self.archive_extension
    }

    fn root_token(&self) -> &str {
        &self.root_token
    }

    fn display_token(&self) -> &str {
        &self.display_token
    }
}

/// Title-cased platform name, with macOS spelled `OSX`.
pub fn normalized_platform(name: &str) -> String {
    let lower = name.trim().to_lowercase();
    match lower.as_str() {
        "osx" | "macos" => "OSX".to_string(),
        _ => {
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        }
    }
}
