//! Package descriptors: one per `[[package]]` entry in `libs.toml`.
//!
//! A [`Package`] is fixed identity plus everything derived from it (module
//! names, URLs, storage paths). What the resolver discovers lives in a
//! separate [`Resolution`]; the two are joined by index in a [`PackageSet`].
//!
//! Storage layout under the libs directory:
//! ```text
//! libs/
//! └── <group as dirs>/<artifact>/<version>/
//!     ├── <artifact>-<version>.aar   (or .jar)
//!     └── AndroidManifest.xml        (AAR only)
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::translate::{AliasTable, Coordinate};

/// Repository identifier meaning "provided by the platform SDK".
pub const SDK_REPOSITORY: &str = "sdk";

pub const ANDROID_MANIFEST: &str = "AndroidManifest.xml";

// ─── Data Types ────────────────────────────────────────────────────

/// One entry of the static dependency list.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackageSpec {
    pub group: String,
    pub artifact: String,
    pub version: String,
    pub repository: String,
}

/// Where a package comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Source {
    /// Already shipped by the platform; never downloaded.
    Sdk,
    /// A Maven repository.
    Remote { name: String, url: String },
}

impl Source {
    pub fn name(&self) -> &str {
        match self {
            Source::Sdk => SDK_REPOSITORY,
            Source::Remote { name, .. } => name,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArtifactKind {
    /// Android archive: classes plus an `AndroidManifest.xml`.
    Aar,
    /// Plain Java archive.
    Jar,
}

impl ArtifactKind {
    pub fn extension(self) -> &'static str {
        match self {
            ArtifactKind::Aar => "aar",
            ArtifactKind::Jar => "jar",
        }
    }
}

/// Platform version bounds of a package.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SdkBounds {
    /// Target SDK version (`sdk_version` in Soong).
    pub sdk_version: u32,
    pub min_sdk_version: u32,
}

/// What the resolver found out about a remote package.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub kind: ArtifactKind,
    pub bounds: SdkBounds,
    /// Compile-scoped dependencies in POM order, duplicates kept.
    pub dependencies: Vec<Coordinate>,
}

// ─── Package ───────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Package {
    pub coordinate: Coordinate,
    pub version: String,
    pub source: Source,
    /// `group:artifact:version`
    pub gradle_name: String,
    /// Module name in the generated build graph.
    pub target_name: String,
    /// `<group as dirs>/<artifact>/<version>`, relative to the libs directory.
    pub relative_path: PathBuf,
}

impl Package {
    /// Build a descriptor. `app_name` namespaces remote packages that have
    /// no alias so they can't collide with modules already in the tree.
    pub fn new(spec: &PackageSpec, source: Source, app_name: &str, aliases: &AliasTable) -> Self {
        let coordinate = Coordinate::new(&spec.group, &spec.artifact);
        let raw = coordinate.raw_name();
        let target_name = match aliases.get(&raw) {
            Some(alias) => alias.to_string(),
            None if source == Source::Sdk => raw,
            None => format!("{}_{}", app_name, raw),
        };

        let mut relative_path: PathBuf = spec.group.split('.').collect();
        relative_path.push(&spec.artifact);
        relative_path.push(&spec.version);

        Self {
            gradle_name: format!("{}:{}:{}", spec.group, spec.artifact, spec.version),
            coordinate,
            version: spec.version.clone(),
            source,
            target_name,
            relative_path,
        }
    }

    pub fn is_sdk(&self) -> bool {
        self.source == Source::Sdk
    }

    /// `<repo>/<group/path>/<artifact>/<version>`; `None` for SDK packages.
    pub fn module_url(&self) -> Option<String> {
        match &self.source {
            Source::Sdk => None,
            Source::Remote { url, .. } => Some(format!(
                "{}/{}/{}/{}",
                url,
                self.coordinate.group.replace('.', "/"),
                self.coordinate.artifact,
                self.version
            )),
        }
    }

    /// `<artifact>-<version>.<extension>`
    pub fn file_name(&self, extension: &str) -> String {
        format!("{}-{}.{}", self.coordinate.artifact, self.version, extension)
    }

    /// [`Package::relative_path`] with `/` separators, for build files.
    pub fn relative_dir(&self) -> String {
        self.relative_path
            .iter()
            .map(|c| c.to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }

    pub fn storage_dir(&self, libs_dir: &Path) -> PathBuf {
        libs_dir.join(&self.relative_path)
    }

    pub fn artifact_path(&self, libs_dir: &Path, kind: ArtifactKind) -> PathBuf {
        self.storage_dir(libs_dir)
            .join(self.file_name(kind.extension()))
    }

    pub fn pom_path(&self, libs_dir: &Path) -> PathBuf {
        self.storage_dir(libs_dir).join(self.file_name("pom"))
    }

    pub fn manifest_path(&self, libs_dir: &Path) -> PathBuf {
        self.storage_dir(libs_dir).join(ANDROID_MANIFEST)
    }

    /// The artifact file present on disk, AAR first.
    pub fn library_file(&self, libs_dir: &Path) -> Result<(ArtifactKind, PathBuf)> {
        [ArtifactKind::Aar, ArtifactKind::Jar]
            .into_iter()
            .map(|kind| (kind, self.artifact_path(libs_dir, kind)))
            .find(|(_, path)| path.is_file())
            .ok_or_else(|| Error::MissingLibrary(self.gradle_name.clone()))
    }
}

// ─── Package Set ───────────────────────────────────────────────────

/// All packages of a run, in input order, with their resolutions.
#[derive(Clone, Debug, Default)]
pub struct PackageSet {
    packages: Vec<Package>,
    resolutions: Vec<Option<Resolution>>,
}

impl PackageSet {
    pub fn new(packages: Vec<Package>) -> Self {
        let resolutions = vec![None; packages.len()];
        Self {
            packages,
            resolutions,
        }
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    pub fn get(&self, index: usize) -> Option<&Package> {
        self.packages.get(index)
    }

    pub fn resolution(&self, index: usize) -> Option<&Resolution> {
        self.resolutions.get(index).and_then(Option::as_ref)
    }

    pub fn set_resolution(&mut self, index: usize, resolution: Resolution) {
        self.resolutions[index] = Some(resolution);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Package, Option<&Resolution>)> {
        self.packages
            .iter()
            .zip(self.resolutions.iter().map(Option::as_ref))
    }

    /// First package with the given coordinate, regardless of version.
    pub fn find(&self, coordinate: &Coordinate) -> Option<&Package> {
        self.packages.iter().find(|p| &p.coordinate == coordinate)
    }
}
