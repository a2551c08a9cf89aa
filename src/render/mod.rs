//! Soong module stanzas for vendored packages.
//!
//! Every package becomes two modules: a `-nodeps` import of the raw artifact
//! and a library wrapping it together with its translated dependencies:
//!
//! ```text
//! android_library_import  <name>-nodeps   (aar)    java_import          <name>-nodeps
//! android_library         <name>          (aar)    java_library_static  <name>
//! ```

use std::path::Path;

use crate::error::{Error, Result};
use crate::package::{ArtifactKind, Package, PackageSet, Resolution, ANDROID_MANIFEST};
use crate::translate::Translator;

pub const GENERATED_HEADER: &str = "// DO NOT EDIT THIS FILE MANUALLY\n";

pub struct Renderer<'a> {
    translator: &'a Translator,
    libs_dir: &'a Path,
}

impl<'a> Renderer<'a> {
    pub fn new(translator: &'a Translator, libs_dir: &'a Path) -> Self {
        Self {
            translator,
            libs_dir,
        }
    }

    /// Module names for the package's dependencies, deduplicated in first
    /// occurrence order. Ignored coordinates are dropped; coordinates of
    /// packages in `known` use that package's own module name.
    pub fn static_libs(&self, resolution: &Resolution, known: &PackageSet) -> Vec<String> {
        let mut libs: Vec<String> = Vec::new();
        for dep in &resolution.dependencies {
            let Some(name) = self.translator.translate(dep) else {
                continue;
            };
            let name = match known.find(dep) {
                Some(package) => package.target_name.clone(),
                None => name,
            };
            if !libs.contains(&name) {
                libs.push(name);
            }
        }
        libs
    }

    /// Both stanzas for one resolved package.
    pub fn render(
        &self,
        package: &Package,
        resolution: &Resolution,
        known: &PackageSet,
    ) -> Result<String> {
        if package.is_sdk() {
            return Err(Error::SdkModule(package.gradle_name.clone()));
        }
        let (kind, _) = package.library_file(self.libs_dir)?;
        let deps: String = self
            .static_libs(resolution, known)
            .iter()
            .map(|dep| format!("\n        \"{}\",", dep))
            .collect();

        let stanza = Stanza {
            name: &package.target_name,
            dir: package.relative_dir(),
            file: package.file_name(kind.extension()),
            sdk_version: resolution.bounds.sdk_version,
            min_sdk_version: resolution.bounds.min_sdk_version,
            deps,
        };
        Ok(match kind {
            ArtifactKind::Aar => stanza.aar(),
            ArtifactKind::Jar => stanza.jar(),
        })
    }
}

struct Stanza<'a> {
    name: &'a str,
    dir: String,
    file: String,
    sdk_version: u32,
    min_sdk_version: u32,
    /// Pre-formatted `static_libs` entries, each starting with a newline.
    deps: String,
}

impl Stanza<'_> {
    fn aar(&self) -> String {
        let Stanza {
            name,
            dir,
            file,
            sdk_version,
            min_sdk_version,
            deps,
        } = self;
        format!(
            r#"android_library_import {{
    name: "{name}-nodeps",
    aars: ["{dir}/{file}"],
    sdk_version: "{sdk_version}",
    min_sdk_version: "{min_sdk_version}",
    apex_available: [
        "//apex_available:platform",
        "//apex_available:anyapex",
    ],
    static_libs: [{deps}
    ],
}}

android_library {{
    name: "{name}",
    sdk_version: "{sdk_version}",
    min_sdk_version: "{min_sdk_version}",
    apex_available: [
        "//apex_available:platform",
        "//apex_available:anyapex",
    ],
    manifest: "{dir}/{ANDROID_MANIFEST}",
    static_libs: [
        "{name}-nodeps",{deps}
    ],
    java_version: "1.7",
}}
"#
        )
    }

    fn jar(&self) -> String {
        let Stanza {
            name,
            dir,
            file,
            sdk_version,
            min_sdk_version,
            deps,
        } = self;
        format!(
            r#"java_import {{
    name: "{name}-nodeps",
    jars: ["{dir}/{file}"],
    sdk_version: "{sdk_version}",
    min_sdk_version: "{min_sdk_version}",
    apex_available: [
        "//apex_available:platform",
        "//apex_available:anyapex",
    ],
}}

java_library_static {{
    name: "{name}",
    sdk_version: "{sdk_version}",
    min_sdk_version: "{min_sdk_version}",
    apex_available: [
        "//apex_available:platform",
        "//apex_available:anyapex",
    ],
    static_libs: [
        "{name}-nodeps",{deps}
    ],
    java_version: "1.7",
}}
"#
        )
    }
}
