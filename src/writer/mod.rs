//! The whole run, from an empty libs directory to rewritten build files.
//!
//! ```text
//! clean libs dir → resolve all → root Android.bp list → libs/Android.bp → [Gradle]
//! ```
//!
//! Resolution finishes for every package before anything is rendered, so a
//! failed download never leaves a half-updated build graph behind.

pub mod block;
pub mod gradle;

use std::path::{Path, PathBuf};

use log::info;

use crate::config::{check_libs_dir, Config};
use crate::error::{Error, Result};
use crate::fetch::Fetch;
use crate::package::PackageSet;
use crate::render::{Renderer, GENERATED_HEADER};
use crate::resolve::Resolver;

use block::{ANDROID_BP_STATIC_LIBS, GRADLE_DEPENDENCIES};
use gradle::Dialect;

pub const ANDROID_BP: &str = "Android.bp";

const DO_NOT_EDIT_LIST: &str = "// DO NOT EDIT THIS LIST MANUALLY";

/// What a finished run touched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub packages: usize,
    /// Remote packages that were downloaded and got a generated module.
    pub vendored: usize,
    /// Build files written, in write order.
    pub written: Vec<PathBuf>,
}

pub struct GraphWriter<'a, F: Fetch + ?Sized> {
    config: &'a Config,
    root: PathBuf,
    fetcher: &'a F,
}

impl<'a, F: Fetch + ?Sized> GraphWriter<'a, F> {
    pub fn new(config: &'a Config, root: impl Into<PathBuf>, fetcher: &'a F) -> Self {
        Self {
            config,
            root: root.into(),
            fetcher,
        }
    }

    pub fn libs_dir(&self) -> PathBuf {
        self.root.join(&self.config.libs_dir)
    }

    /// Run every phase. The first error aborts the run.
    pub fn run(&self) -> Result<Summary> {
        let mut packages = self.config.package_set()?;
        check_libs_dir(&self.config.libs_dir)?;
        let libs_dir = self.libs_dir();
        reset_dir(&libs_dir)?;

        self.resolve_all(&mut packages)?;

        let mut summary = Summary {
            packages: packages.len(),
            vendored: packages.iter().filter(|(p, _)| !p.is_sdk()).count(),
            written: Vec::new(),
        };
        summary.written.push(self.write_root_list(&packages)?);
        summary.written.push(self.write_modules(&packages)?);
        if self.config.update_gradle {
            summary.written.push(self.write_gradle(&packages)?);
        }
        Ok(summary)
    }

    /// Resolve every package in input order.
    pub fn resolve_all(&self, packages: &mut PackageSet) -> Result<()> {
        let resolver = Resolver::new(self.fetcher, self.libs_dir(), self.config.defaults);
        for index in 0..packages.len() {
            let Some(package) = packages.get(index) else {
                continue;
            };
            if let Some(resolution) = resolver.resolve(package)? {
                packages.set_resolution(index, resolution);
            }
        }
        Ok(())
    }

    /// Rewrite the `static_libs` list of `<root>/Android.bp` to name every
    /// package, SDK ones included.
    pub fn write_root_list(&self, packages: &PackageSet) -> Result<PathBuf> {
        let mut lines = vec![format!("        {}", DO_NOT_EDIT_LIST)];
        lines.extend(
            packages
                .packages()
                .iter()
                .map(|p| format!("        \"{}\",", p.target_name)),
        );
        let path = self.root.join(ANDROID_BP);
        rewrite_block(&path, &ANDROID_BP_STATIC_LIBS, &lines)?;
        Ok(path)
    }

    /// Contents of `<libs>/Android.bp`: one stanza pair per remote package.
    pub fn render_modules(&self, packages: &PackageSet) -> Result<String> {
        let libs_dir = self.libs_dir();
        let renderer = Renderer::new(&self.config.translator, &libs_dir);
        let mut stanzas = Vec::new();
        for (package, resolution) in packages.iter() {
            if package.is_sdk() {
                continue;
            }
            let resolution =
                resolution.ok_or_else(|| Error::MissingLibrary(package.gradle_name.clone()))?;
            stanzas.push(renderer.render(package, resolution, packages)?);
        }
        Ok(format!("{}{}", GENERATED_HEADER, stanzas.join("\n")))
    }

    pub fn write_modules(&self, packages: &PackageSet) -> Result<PathBuf> {
        let content = self.render_modules(packages)?;
        let path = self.libs_dir().join(ANDROID_BP);
        std::fs::write(&path, content).map_err(|e| Error::io(&path, e))?;
        info!("Wrote {}", path.display());
        Ok(path)
    }

    /// Rewrite the `dependencies` block of the Gradle build script.
    pub fn write_gradle(&self, packages: &PackageSet) -> Result<PathBuf> {
        let (dialect, path) = Dialect::detect(&self.root)?;
        let libs_dir = self.libs_dir();
        let mut lines = vec![format!("    {}", DO_NOT_EDIT_LIST)];
        for package in packages.packages() {
            lines.push(dialect.dependency_line(package, &self.root, &libs_dir)?);
        }
        rewrite_block(&path, &GRADLE_DEPENDENCIES, &lines)?;
        Ok(path)
    }
}

/// Remove `dir` if present and recreate it empty.
fn reset_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        std::fs::remove_dir_all(dir).map_err(|e| Error::io(dir, e))?;
    }
    std::fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))
}

fn rewrite_block(path: &Path, block: &block::ManagedBlock, lines: &[String]) -> Result<()> {
    let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let updated = block.replace(&text, lines, path)?;
    std::fs::write(path, updated).map_err(|e| Error::io(path, e))?;
    info!("Updated {}", path.display());
    Ok(())
}
