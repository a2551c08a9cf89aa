//! `libs.toml`: the dependency list and the tables that drive translation.
//!
//! ```toml
//! app_name = "Selfie"
//! default_sdk_version = 31
//! default_min_sdk_version = 14
//! ignore = ["org.jetbrains.kotlin_kotlin-stdlib-common"]
//!
//! [repositories]
//! maven_central = "https://repo1.maven.org/maven2"
//!
//! [aliases]
//! "com.google.guava_listenablefuture" = "guava"
//!
//! [[package]]
//! group = "com.google.zxing"
//! artifact = "core"
//! version = "3.5.0"
//! repository = "maven_central"
//! ```

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::package::{Package, PackageSet, PackageSpec, SdkBounds, Source, SDK_REPOSITORY};
use crate::translate::{AliasTable, IgnoreSet, Translator};

pub const CONFIG_FILE: &str = "libs.toml";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    app_name: String,
    #[serde(default)]
    update_gradle: bool,
    default_sdk_version: u32,
    default_min_sdk_version: u32,
    #[serde(default = "default_libs_dir")]
    libs_dir: PathBuf,
    #[serde(default)]
    ignore: Vec<String>,
    #[serde(default)]
    repositories: BTreeMap<String, String>,
    #[serde(default)]
    aliases: BTreeMap<String, String>,
    #[serde(default, rename = "package")]
    packages: Vec<PackageSpec>,
}

fn default_libs_dir() -> PathBuf {
    PathBuf::from("libs")
}

/// Validated configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// Prefix for the module names of vendored packages.
    pub app_name: String,
    /// Also rewrite the Gradle build file.
    pub update_gradle: bool,
    /// Used when a package doesn't state its own bounds.
    pub defaults: SdkBounds,
    /// Destination directory, relative to the project root.
    pub libs_dir: PathBuf,
    /// Repository name → base URL (no trailing slash).
    pub repositories: BTreeMap<String, String>,
    pub translator: Translator,
    pub packages: Vec<PackageSpec>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Config> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::parse(&content, path)
    }

    /// Parse and validate. `path` is only used in error messages.
    pub fn parse(content: &str, path: &Path) -> Result<Config> {
        let raw: RawConfig = toml::from_str(content).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })?;

        check_libs_dir(&raw.libs_dir)?;
        if raw.repositories.contains_key(SDK_REPOSITORY) {
            return Err(Error::ReservedRepository(SDK_REPOSITORY.to_string()));
        }
        let repositories: BTreeMap<String, String> = raw
            .repositories
            .into_iter()
            .map(|(name, url)| (name, url.trim_end_matches('/').to_string()))
            .collect();

        for spec in &raw.packages {
            if spec.repository != SDK_REPOSITORY && !repositories.contains_key(&spec.repository) {
                return Err(Error::UnknownRepository {
                    package: format!("{}:{}:{}", spec.group, spec.artifact, spec.version),
                    repository: spec.repository.clone(),
                });
            }
        }

        Ok(Config {
            app_name: raw.app_name,
            update_gradle: raw.update_gradle,
            defaults: SdkBounds {
                sdk_version: raw.default_sdk_version,
                min_sdk_version: raw.default_min_sdk_version,
            },
            libs_dir: raw.libs_dir,
            repositories,
            translator: Translator::new(AliasTable::new(raw.aliases), IgnoreSet::new(raw.ignore)),
            packages: raw.packages,
        })
    }

    /// The source a spec refers to. Specs are validated in [`Config::parse`],
    /// but a hand-built `Config` may still name an unknown repository.
    pub fn source(&self, spec: &PackageSpec) -> Result<Source> {
        if spec.repository == SDK_REPOSITORY {
            return Ok(Source::Sdk);
        }
        self.repositories
            .get(&spec.repository)
            .map(|url| Source::Remote {
                name: spec.repository.clone(),
                url: url.clone(),
            })
            .ok_or_else(|| Error::UnknownRepository {
                package: format!("{}:{}:{}", spec.group, spec.artifact, spec.version),
                repository: spec.repository.clone(),
            })
    }

    /// Descriptors for every configured package, in input order.
    pub fn package_set(&self) -> Result<PackageSet> {
        let packages = self
            .packages
            .iter()
            .map(|spec| {
                let source = self.source(spec)?;
                Ok(Package::new(
                    spec,
                    source,
                    &self.app_name,
                    self.translator.aliases(),
                ))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(PackageSet::new(packages))
    }
}

/// The libs directory is wiped on every run, so it has to stay strictly
/// below the project root: non-empty, relative, and made of plain names only.
pub fn check_libs_dir(libs_dir: &Path) -> Result<()> {
    let plain = libs_dir
        .components()
        .all(|c| matches!(c, Component::Normal(_)));
    if libs_dir.as_os_str().is_empty() || !plain {
        return Err(Error::InvalidLibsDir(libs_dir.to_path_buf()));
    }
    Ok(())
}
