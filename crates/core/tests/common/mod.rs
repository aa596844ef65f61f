use packres_core::{HostConfig, PackageResources};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A throwaway host layout:
///
/// ```text
/// <tmp>/Packages/             overrides root
/// <tmp>/Installed Packages/   installed archives
/// <tmp>/app/host              executable; <tmp>/app/Packages holds shipped archives
/// ```
pub struct HostLayout {
    pub dir: TempDir,
    pub config: HostConfig,
}

#[allow(dead_code)]
impl HostLayout {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let overrides = dir.path().join("Packages");
        let installed = dir.path().join("Installed Packages");
        fs::create_dir_all(&overrides).unwrap();
        fs::create_dir_all(&installed).unwrap();
        fs::create_dir_all(dir.path().join("app/Packages")).unwrap();

        let config = HostConfig::new(overrides, installed)
            .with_executable(dir.path().join("app/host"))
            .with_platform("linux");
        Self { dir, config }
    }

    pub fn overrides_root(&self) -> &Path {
        &self.config.overrides_root
    }

    pub fn installed_dir(&self) -> &Path {
        &self.config.installed_packages_dir
    }

    pub fn shipped_dir(&self) -> PathBuf {
        self.dir.path().join("app/Packages")
    }

    /// Write `relative` under the override folder of `package`.
    pub fn override_file(&self, package: &str, relative: &str, contents: &[u8]) -> PathBuf {
        let path = self.overrides_root().join(package).join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, contents).unwrap();
        path
    }

    pub fn resources(&self) -> PackageResources<HostConfig> {
        PackageResources::new(self.config.clone()).unwrap()
    }
}

#[allow(dead_code)]
pub fn create_archive(path: &Path, members: &[(&str, &[u8])]) {
    let file = File::create(path).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default();

    for (name, contents) in members {
        zip.start_file(*name, options).unwrap();
        zip.write_all(contents).unwrap();
    }

    zip.finish().unwrap();
}
