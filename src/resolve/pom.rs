use std::path::Path;

use roxmltree::{Document, Node};

use crate::error::{Error, Result};
use crate::translate::Coordinate;

pub const POM_NAMESPACE: &str = "http://maven.apache.org/POM/4.0.0";

/// Compile-scoped dependencies declared anywhere in a POM, in document order.
///
/// Every `<dependencies>` block counts, including the ones under
/// `<dependencyManagement>`. Entries with a `<scope>` other than `compile`
/// are skipped; an entry without `<scope>` is kept.
pub fn parse_dependencies(xml: &str, path: &Path) -> Result<Vec<Coordinate>> {
    let doc = Document::parse(xml).map_err(|source| Error::Xml {
        path: path.to_path_buf(),
        source,
    })?;

    let mut deps = Vec::new();
    for block in doc
        .descendants()
        .filter(|n| n.has_tag_name((POM_NAMESPACE, "dependencies")))
    {
        for dep in block
            .children()
            .filter(|n| n.has_tag_name((POM_NAMESPACE, "dependency")))
        {
            let group = child_text(dep, "groupId").ok_or_else(|| Error::MissingElement {
                path: path.to_path_buf(),
                element: "groupId",
            })?;
            let artifact = child_text(dep, "artifactId").ok_or_else(|| Error::MissingElement {
                path: path.to_path_buf(),
                element: "artifactId",
            })?;
            if child_text(dep, "scope").is_some_and(|scope| scope != "compile") {
                continue;
            }
            deps.push(Coordinate::new(group, artifact));
        }
    }
    Ok(deps)
}

/// Trimmed text of the first child element `name`; an empty element yields
/// `Some("")`.
fn child_text<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    node.children()
        .find(|n| n.has_tag_name((POM_NAMESPACE, name)))
        .map(|n| n.text().unwrap_or("").trim())
}
