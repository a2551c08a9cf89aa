//! End to end: a mock Maven repository, a project tree in a temp dir and
//! the real HTTP client.

use std::io::Write;
use std::path::Path;

use httpmock::prelude::*;
use mvn2bp::{Config, Error, GraphWriter, HttpFetcher};

const ROOT_BP: &str = r#"android_app {
    name: "Demo",
    srcs: ["src/**/*.kt"],
    static_libs: [
        // DO NOT EDIT THIS LIST MANUALLY
    ],
}
"#;

const EXPECTED_ROOT_BP: &str = r#"android_app {
    name: "Demo",
    srcs: ["src/**/*.kt"],
    static_libs: [
        // DO NOT EDIT THIS LIST MANUALLY
        "androidx.annotation_annotation",
        "Demo_org.example_widget",
        "Demo_org.example_base",
    ],
}
"#;

const EXPECTED_LIBS_BP: &str = r#"// DO NOT EDIT THIS FILE MANUALLY
android_library_import {
    name: "Demo_org.example_widget-nodeps",
    aars: ["org/example/widget/2.0/widget-2.0.aar"],
    sdk_version: "33",
    min_sdk_version: "23",
    apex_available: [
        "//apex_available:platform",
        "//apex_available:anyapex",
    ],
    static_libs: [
        "Demo_org.example_base",
        "androidx.annotation_annotation",
    ],
}

android_library {
    name: "Demo_org.example_widget",
    sdk_version: "33",
    min_sdk_version: "23",
    apex_available: [
        "//apex_available:platform",
        "//apex_available:anyapex",
    ],
    manifest: "org/example/widget/2.0/AndroidManifest.xml",
    static_libs: [
        "Demo_org.example_widget-nodeps",
        "Demo_org.example_base",
        "androidx.annotation_annotation",
    ],
    java_version: "1.7",
}

java_import {
    name: "Demo_org.example_base-nodeps",
    jars: ["org/example/base/1.1/base-1.1.jar"],
    sdk_version: "31",
    min_sdk_version: "14",
    apex_available: [
        "//apex_available:platform",
        "//apex_available:anyapex",
    ],
}

java_library_static {
    name: "Demo_org.example_base",
    sdk_version: "31",
    min_sdk_version: "14",
    apex_available: [
        "//apex_available:platform",
        "//apex_available:anyapex",
    ],
    static_libs: [
        "Demo_org.example_base-nodeps",
    ],
    java_version: "1.7",
}
"#;

const WIDGET_MANIFEST: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<manifest xmlns:android="http://schemas.android.com/apk/res/android" package="org.example.widget">
    <uses-sdk android:minSdkVersion="23" android:targetSdkVersion="33" />
</manifest>
"#;

const WIDGET_POM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0">
  <modelVersion>4.0.0</modelVersion>
  <groupId>org.example</groupId>
  <artifactId>widget</artifactId>
  <version>2.0</version>
  <packaging>aar</packaging>
  <dependencies>
    <dependency>
      <groupId>org.example</groupId>
      <artifactId>base</artifactId>
      <version>1.1</version>
      <scope>compile</scope>
    </dependency>
    <dependency>
      <groupId>androidx.annotation</groupId>
      <artifactId>annotation</artifactId>
      <version>1.3.0</version>
    </dependency>
    <dependency>
      <groupId>org.example</groupId>
      <artifactId>base</artifactId>
      <version>1.1</version>
    </dependency>
    <dependency>
      <groupId>junit</groupId>
      <artifactId>junit</artifactId>
      <version>4.13.2</version>
      <scope>test</scope>
    </dependency>
  </dependencies>
</project>
"#;

const BASE_POM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0">
  <modelVersion>4.0.0</modelVersion>
  <groupId>org.example</groupId>
  <artifactId>base</artifactId>
  <version>1.1</version>
</project>
"#;

fn widget_aar() -> Vec<u8> {
    let mut buffer = std::io::Cursor::new(Vec::new());
    {
        let mut zip = zip::ZipWriter::new(&mut buffer);
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("AndroidManifest.xml", options).unwrap();
        zip.write_all(WIDGET_MANIFEST.as_bytes()).unwrap();
        zip.start_file("classes.jar", options).unwrap();
        zip.write_all(b"PK\x05\x06").unwrap();
        zip.finish().unwrap();
    }
    buffer.into_inner()
}

fn config(repository: &str, extra: &str) -> Config {
    let content = format!(
        r#"
app_name = "Demo"
default_sdk_version = 31
default_min_sdk_version = 14

[repositories]
central = "{repository}/"

[[package]]
group = "androidx.annotation"
artifact = "annotation"
version = "1.3.0"
repository = "sdk"

[[package]]
group = "org.example"
artifact = "widget"
version = "2.0"
repository = "central"

[[package]]
group = "org.example"
artifact = "base"
version = "1.1"
repository = "central"
{extra}"#
    );
    Config::parse(&content, Path::new("libs.toml")).unwrap()
}

#[test]
fn test_update_against_mock_repository() {
    let server = MockServer::start();
    let widget_aar_mock = server.mock(|when, then| {
        when.method(GET).path("/org/example/widget/2.0/widget-2.0.aar");
        then.status(200).body(widget_aar());
    });
    let widget_pom_mock = server.mock(|when, then| {
        when.method(GET).path("/org/example/widget/2.0/widget-2.0.pom");
        then.status(200).body(WIDGET_POM);
    });
    let base_aar_mock = server.mock(|when, then| {
        when.method(GET).path("/org/example/base/1.1/base-1.1.aar");
        then.status(404);
    });
    let base_jar_mock = server.mock(|when, then| {
        when.method(GET).path("/org/example/base/1.1/base-1.1.jar");
        then.status(200).body(b"PK\x05\x06".to_vec());
    });
    let base_pom_mock = server.mock(|when, then| {
        when.method(GET).path("/org/example/base/1.1/base-1.1.pom");
        then.status(200).body(BASE_POM);
    });

    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join("Android.bp"), ROOT_BP).unwrap();
    let config = config(&server.base_url(), "");
    let fetcher = HttpFetcher::new().unwrap();

    let summary = GraphWriter::new(&config, tmp.path(), &fetcher)
        .run()
        .unwrap();

    widget_aar_mock.assert();
    widget_pom_mock.assert();
    base_aar_mock.assert();
    base_jar_mock.assert();
    base_pom_mock.assert();

    assert_eq!(summary.packages, 3);
    assert_eq!(summary.vendored, 2);
    assert_eq!(
        std::fs::read_to_string(tmp.path().join("Android.bp")).unwrap(),
        EXPECTED_ROOT_BP
    );
    assert_eq!(
        std::fs::read_to_string(tmp.path().join("libs/Android.bp")).unwrap(),
        EXPECTED_LIBS_BP
    );
    assert_eq!(
        std::fs::read_to_string(tmp.path().join("libs/org/example/widget/2.0/AndroidManifest.xml"))
            .unwrap(),
        WIDGET_MANIFEST
    );
}

#[test]
fn test_duplicate_package_fails_before_fetching() {
    let server = MockServer::start();
    let widget_aar_mock = server.mock(|when, then| {
        when.method(GET).path("/org/example/widget/2.0/widget-2.0.aar");
        then.status(200).body(widget_aar());
    });
    server.mock(|when, then| {
        when.method(GET).path("/org/example/widget/2.0/widget-2.0.pom");
        then.status(200).body(WIDGET_POM);
    });
    server.mock(|when, then| {
        when.method(GET).path("/org/example/base/1.1/base-1.1.jar");
        then.status(200).body(b"PK\x05\x06".to_vec());
    });
    server.mock(|when, then| {
        when.method(GET).path("/org/example/base/1.1/base-1.1.pom");
        then.status(200).body(BASE_POM);
    });

    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join("Android.bp"), ROOT_BP).unwrap();
    let duplicate = r#"
[[package]]
group = "org.example"
artifact = "widget"
version = "2.0"
repository = "central"
"#;
    let config = config(&server.base_url(), duplicate);
    let fetcher = HttpFetcher::new().unwrap();

    let err = GraphWriter::new(&config, tmp.path(), &fetcher)
        .run()
        .unwrap_err();
    match err {
        Error::Package { package, source } => {
            assert_eq!(package, "org.example:widget:2.0");
            assert!(matches!(*source, Error::DuplicatePackage(_)));
        }
        other => panic!("unexpected error: {:?}", other),
    }
    // Only the first occurrence reached the network.
    widget_aar_mock.assert_hits(1);
    assert_eq!(
        std::fs::read_to_string(tmp.path().join("Android.bp")).unwrap(),
        ROOT_BP
    );
}
