//! Fetch-and-discover for remote packages.
//!
//! For each package the resolver downloads the artifact (AAR first, JAR as
//! fallback) and the POM, reads the compile-scoped dependencies out of the
//! POM, and for AARs reads the SDK bounds out of the embedded
//! `AndroidManifest.xml`. Every failure is fatal to the run.

pub mod android_manifest;
pub mod encoding;
pub mod pom;

use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::error::{Error, Result};
use crate::fetch::Fetch;
use crate::package::{ArtifactKind, Package, Resolution, SdkBounds};

pub struct Resolver<'a, F: Fetch + ?Sized> {
    fetcher: &'a F,
    libs_dir: PathBuf,
    defaults: SdkBounds,
}

impl<'a, F: Fetch + ?Sized> Resolver<'a, F> {
    pub fn new(fetcher: &'a F, libs_dir: impl Into<PathBuf>, defaults: SdkBounds) -> Self {
        Self {
            fetcher,
            libs_dir: libs_dir.into(),
            defaults,
        }
    }

    /// Resolve one package. SDK packages are a no-op and return `None`.
    ///
    /// Errors carry the package's `group:artifact:version`.
    pub fn resolve(&self, package: &Package) -> Result<Option<Resolution>> {
        let Some(module_url) = package.module_url() else {
            return Ok(None);
        };
        info!("Processing {}", package.gradle_name);
        self.resolve_remote(package, &module_url)
            .map(Some)
            .map_err(|e| e.in_package(&package.gradle_name))
    }

    fn resolve_remote(&self, package: &Package, module_url: &str) -> Result<Resolution> {
        let dir = package.storage_dir(&self.libs_dir);
        create_package_dir(&dir)?;

        let kind = self.download_artifact(package, module_url)?;

        let pom_url = format!("{}/{}", module_url, package.file_name("pom"));
        let pom_path = package.pom_path(&self.libs_dir);
        let pom = self.fetch_required(&pom_url)?;
        write_file(&pom_path, &pom)?;

        let pom_text = encoding::read_xml(&pom_path)?;
        let dependencies = pom::parse_dependencies(&pom_text, &pom_path)?;
        debug!(
            "{}: {} compile dependencies",
            package.gradle_name,
            dependencies.len()
        );

        let bounds = match kind {
            ArtifactKind::Aar => {
                let aar = package.artifact_path(&self.libs_dir, kind);
                let manifest = package.manifest_path(&self.libs_dir);
                android_manifest::extract(&aar, &manifest)?;
                let xml = encoding::read_xml(&manifest)?;
                android_manifest::parse_bounds(&xml, &manifest, self.defaults)?
            }
            ArtifactKind::Jar => self.defaults,
        };

        if pom_path.exists() {
            std::fs::remove_file(&pom_path).map_err(|e| Error::io(&pom_path, e))?;
        }

        Ok(Resolution {
            kind,
            bounds,
            dependencies,
        })
    }

    /// Download the AAR, or the JAR when there is no AAR, into the package
    /// directory.
    fn download_artifact(&self, package: &Package, module_url: &str) -> Result<ArtifactKind> {
        let url = |kind: ArtifactKind| {
            format!("{}/{}", module_url, package.file_name(kind.extension()))
        };
        let aar_url = url(ArtifactKind::Aar);
        let aar = self.fetcher.get(&aar_url)?;
        let (kind, body) = if aar.is_success() {
            (ArtifactKind::Aar, aar.body)
        } else {
            debug!("{} returned {}, trying jar", aar_url, aar.status);
            let jar_url = url(ArtifactKind::Jar);
            (ArtifactKind::Jar, self.fetch_required(&jar_url)?)
        };
        write_file(&package.artifact_path(&self.libs_dir, kind), &body)?;
        Ok(kind)
    }

    fn fetch_required(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.fetcher.get(url)?;
        if !response.is_success() {
            return Err(Error::FetchStatus {
                url: url.to_string(),
                status: response.status,
            });
        }
        Ok(response.body)
    }
}

/// Create the package directory; it must not exist yet.
fn create_package_dir(dir: &Path) -> Result<()> {
    if let Some(parent) = dir.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    match std::fs::create_dir(dir) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
            Err(Error::DuplicatePackage(dir.to_path_buf()))
        }
        Err(e) => Err(Error::io(dir, e)),
    }
}

fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    std::fs::write(path, contents).map_err(|e| Error::io(path, e))
}
