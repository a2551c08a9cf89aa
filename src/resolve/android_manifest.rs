use std::fs::File;
use std::path::Path;

use roxmltree::Document;

use crate::error::{Error, Result};
use crate::package::{SdkBounds, ANDROID_MANIFEST};

pub const ANDROID_NAMESPACE: &str = "http://schemas.android.com/apk/res/android";

/// Copy `AndroidManifest.xml` out of an AAR into `dest`, leaving every other
/// entry in the archive alone.
pub fn extract(aar: &Path, dest: &Path) -> Result<()> {
    let archive_err = |source| Error::Archive {
        path: aar.to_path_buf(),
        source,
    };
    let file = File::open(aar).map_err(|e| Error::io(aar, e))?;
    let mut archive = zip::ZipArchive::new(file).map_err(archive_err)?;
    let mut entry = archive.by_name(ANDROID_MANIFEST).map_err(archive_err)?;
    let mut out = File::create(dest).map_err(|e| Error::io(dest, e))?;
    std::io::copy(&mut entry, &mut out).map_err(|e| Error::io(dest, e))?;
    Ok(())
}

/// SDK bounds from `<uses-sdk>`. Each attribute (and the element itself) is
/// optional and falls back to `defaults`.
pub fn parse_bounds(xml: &str, path: &Path, defaults: SdkBounds) -> Result<SdkBounds> {
    let doc = Document::parse(xml).map_err(|source| Error::Xml {
        path: path.to_path_buf(),
        source,
    })?;

    let Some(uses_sdk) = doc
        .root_element()
        .children()
        .find(|n| n.has_tag_name("uses-sdk"))
    else {
        return Ok(defaults);
    };

    let read = |attribute: &'static str, default: u32| -> Result<u32> {
        match uses_sdk.attribute((ANDROID_NAMESPACE, attribute)) {
            None => Ok(default),
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| Error::InvalidSdkVersion {
                    path: path.to_path_buf(),
                    attribute,
                    value: value.to_string(),
                }),
        }
    };

    Ok(SdkBounds {
        sdk_version: read("targetSdkVersion", defaults.sdk_version)?,
        min_sdk_version: read("minSdkVersion", defaults.min_sdk_version)?,
    })
}
