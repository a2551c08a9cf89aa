//! Canned network responses and artifacts for unit tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write;

use crate::error::Result;
use crate::fetch::{Fetch, Response};

/// Serves bodies from a map; anything else is a 404. Records every request.
#[derive(Default)]
pub(crate) struct FakeFetcher {
    responses: HashMap<String, Vec<u8>>,
    requests: RefCell<Vec<String>>,
}

impl FakeFetcher {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with(mut self, url: &str, body: impl Into<Vec<u8>>) -> Self {
        self.responses.insert(url.to_string(), body.into());
        self
    }

    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl Fetch for FakeFetcher {
    fn get(&self, url: &str) -> Result<Response> {
        self.requests.borrow_mut().push(url.to_string());
        Ok(match self.responses.get(url) {
            Some(body) => Response {
                status: 200,
                body: body.clone(),
            },
            None => Response {
                status: 404,
                body: b"Not Found".to_vec(),
            },
        })
    }
}

/// `(group, artifact, scope)` triples as a POM document.
pub(crate) fn pom(deps: &[(&str, &str, Option<&str>)]) -> String {
    let mut out = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <project xmlns=\"http://maven.apache.org/POM/4.0.0\">\n\
         \x20 <modelVersion>4.0.0</modelVersion>\n\
         \x20 <dependencies>\n",
    );
    for (group, artifact, scope) in deps {
        out.push_str("    <dependency>\n");
        out.push_str(&format!("      <groupId>{}</groupId>\n", group));
        out.push_str(&format!("      <artifactId>{}</artifactId>\n", artifact));
        out.push_str("      <version>1.0</version>\n");
        if let Some(scope) = scope {
            out.push_str(&format!("      <scope>{}</scope>\n", scope));
        }
        out.push_str("    </dependency>\n");
    }
    out.push_str("  </dependencies>\n</project>\n");
    out
}

/// An `AndroidManifest.xml` with the given `uses-sdk` attributes.
pub(crate) fn android_manifest(min_sdk: Option<&str>, target_sdk: Option<&str>) -> String {
    let mut attrs = String::new();
    if let Some(min) = min_sdk {
        attrs.push_str(&format!(" android:minSdkVersion=\"{}\"", min));
    }
    if let Some(target) = target_sdk {
        attrs.push_str(&format!(" android:targetSdkVersion=\"{}\"", target));
    }
    format!(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
         <manifest xmlns:android=\"http://schemas.android.com/apk/res/android\" package=\"org.example\">\n\
         \x20   <uses-sdk{} />\n\
         </manifest>\n",
        attrs
    )
}

/// A zip archive holding the given entries.
pub(crate) fn zip_archive(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut buffer = std::io::Cursor::new(Vec::new());
    {
        let mut zip = zip::ZipWriter::new(&mut buffer);
        let options = zip::write::SimpleFileOptions::default();
        for (name, contents) in entries {
            zip.start_file(*name, options).unwrap();
            zip.write_all(contents).unwrap();
        }
        zip.finish().unwrap();
    }
    buffer.into_inner()
}

/// An AAR whose only interesting entry is its manifest.
pub(crate) fn aar(manifest: &str) -> Vec<u8> {
    zip_archive(&[
        ("AndroidManifest.xml", manifest.as_bytes()),
        ("classes.jar", b"PK\x05\x06"),
    ])
}
