//! The optional Gradle build script, kept in sync so the app also builds
//! outside the platform tree.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::package::Package;

pub const KOTLIN_SCRIPT: &str = "build.gradle.kts";
pub const GROOVY_SCRIPT: &str = "build.gradle";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dialect {
    /// `implementation("...")`
    Kotlin,
    /// `implementation '...'`
    Groovy,
}

impl Dialect {
    /// Find the build script under `root`; the Kotlin one wins when both
    /// exist.
    pub fn detect(root: &Path) -> Result<(Dialect, PathBuf)> {
        let kts = root.join(KOTLIN_SCRIPT);
        if kts.is_file() {
            return Ok((Dialect::Kotlin, kts));
        }
        let groovy = root.join(GROOVY_SCRIPT);
        if groovy.is_file() {
            return Ok((Dialect::Groovy, groovy));
        }
        Err(Error::io(
            &groovy,
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("neither {} nor {} exists", KOTLIN_SCRIPT, GROOVY_SCRIPT),
            ),
        ))
    }

    fn quote(self, s: &str) -> String {
        match self {
            Dialect::Kotlin => format!("\"{}\"", s),
            Dialect::Groovy => format!("'{}'", s),
        }
    }

    fn implementation(self, dependency: &str) -> String {
        match self {
            Dialect::Kotlin => format!("    implementation({})", dependency),
            Dialect::Groovy => format!("    implementation {}", dependency),
        }
    }

    /// The dependency line for one package. SDK packages are referenced by
    /// coordinate; vendored ones by their artifact file relative to `root`.
    pub fn dependency_line(self, package: &Package, root: &Path, libs_dir: &Path) -> Result<String> {
        if package.is_sdk() {
            return Ok(self.implementation(&self.quote(&package.gradle_name)));
        }
        let (_, library) = package.library_file(libs_dir)?;
        let relative = library.strip_prefix(root).unwrap_or(&library);
        let relative = relative
            .iter()
            .map(|c| c.to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        Ok(self.implementation(&format!("files({})", self.quote(&relative))))
    }
}
