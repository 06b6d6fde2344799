//! Coordinate resolution from `pom.xml` descriptors.

use super::{Coordinates, dtd::strip_external_entities};
use crate::bundler::error::{Error, ErrorExt, Result};
use roxmltree::{Document, Node, ParsingOptions};
use std::path::Path;

/// Resolves the identity of a project from its descriptor.
pub trait CoordinateResolver {
    /// Reads `descriptor` and returns its coordinates.
    ///
    /// # Errors
    ///
    /// - [`Error::DescriptorInvalid`] when the file is not well-formed XML
    /// - [`Error::MissingCoordinate`] when a field is still empty after parent fallback
    /// - [`Error::InvalidCoordinate`] when a field is not usable as a repository path
    fn resolve(&self, descriptor: &Path) -> Result<Coordinates>;
}

/// Default resolver for Maven `pom.xml` files.
///
/// Reads `groupId`, `artifactId` and `version` from the direct children of the
/// root element. Missing `groupId`/`version` fall back to the `<parent>` block;
/// `artifactId` is never inherited.
///
/// The parser never loads anything from outside the file: a `<!DOCTYPE>` is
/// accepted and ignored, external DTDs are not fetched and entities declared
/// with a `SYSTEM`/`PUBLIC` identifier expand to nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct PomResolver;

impl PomResolver {
    pub fn new() -> Self {
        Self
    }
}

impl CoordinateResolver for PomResolver {
    fn resolve(&self, descriptor: &Path) -> Result<Coordinates> {
        let bytes = std::fs::read(descriptor).fs_context("reading project descriptor", descriptor)?;
        let text = String::from_utf8(bytes).map_err(|e| Error::DescriptorInvalid {
            path: descriptor.to_path_buf(),
            reason: format!("not valid UTF-8: {e}"),
        })?;

        let mut options = ParsingOptions::default();
        options.allow_dtd = true;

        let text = strip_external_entities(&text);
        let doc = Document::parse_with_options(&text, options).map_err(|e| {
            Error::DescriptorInvalid {
                path: descriptor.to_path_buf(),
                reason: e.to_string(),
            }
        })?;

        let project = doc.root_element();
        let parent = child_element(project, "parent");

        let group_id = child_text(project, "groupId")
            .or_else(|| parent.and_then(|p| child_text(p, "groupId")));
        let artifact_id = child_text(project, "artifactId");
        let version = child_text(project, "version")
            .or_else(|| parent.and_then(|p| child_text(p, "version")));

        let require = |value: Option<String>, field: &'static str| {
            value.ok_or_else(|| Error::MissingCoordinate {
                field,
                path: descriptor.to_path_buf(),
            })
        };

        let coordinates = Coordinates::new(
            require(group_id, "groupId")?,
            require(artifact_id, "artifactId")?,
            require(version, "version")?,
        );
        if let Some((field, value)) = coordinates.invalid_field() {
            return Err(Error::InvalidCoordinate {
                field,
                value: value.to_string(),
                path: descriptor.to_path_buf(),
            });
        }
        log::debug!("Resolved {} from {}", coordinates, descriptor.display());
        Ok(coordinates)
    }
}

fn child_element<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|c| c.is_element() && c.tag_name().name() == name)
}

/// Trimmed text content of a direct child, `None` when absent or blank.
fn child_text(node: Node<'_, '_>, name: &str) -> Option<String> {
    let element = child_element(node, name)?;
    let text: String = element
        .descendants()
        .filter(|d| d.is_text())
        .filter_map(|d| d.text())
        .collect();
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_pom(dir: &TempDir, body: &str) -> std::path::PathBuf {
        let path = dir.path().join("pom.xml");
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn reads_top_level_coordinates() {
        let dir = TempDir::new().unwrap();
        let pom = write_pom(
            &dir,
            r#"<?xml version="1.0"?>
<project xmlns="http://maven.apache.org/POM/4.0.0">
  <modelVersion>4.0.0</modelVersion>
  <groupId> io.kodegen </groupId>
  <artifactId>core</artifactId>
  <version>1.4.0</version>
  <dependencies>
    <dependency>
      <groupId>other.group</groupId>
      <artifactId>dep</artifactId>
      <version>9.9</version>
    </dependency>
  </dependencies>
</project>"#,
        );
        let coords = PomResolver.resolve(&pom).unwrap();
        assert_eq!(coords, Coordinates::new("io.kodegen", "core", "1.4.0"));
    }

    #[test]
    fn inherits_group_and_version_from_parent() {
        let dir = TempDir::new().unwrap();
        let pom = write_pom(
            &dir,
            r#"<project>
  <parent>
    <groupId>io.kodegen</groupId>
    <artifactId>parent</artifactId>
    <version>2.0.0</version>
  </parent>
  <artifactId>child</artifactId>
</project>"#,
        );
        let coords = PomResolver.resolve(&pom).unwrap();
        assert_eq!(coords, Coordinates::new("io.kodegen", "child", "2.0.0"));
    }

    #[test]
    fn artifact_id_is_never_inherited() {
        let dir = TempDir::new().unwrap();
        let pom = write_pom(
            &dir,
            r#"<project>
  <parent>
    <groupId>io.kodegen</groupId>
    <artifactId>parent</artifactId>
    <version>2.0.0</version>
  </parent>
</project>"#,
        );
        let err = PomResolver.resolve(&pom).unwrap_err();
        assert!(matches!(err, Error::MissingCoordinate { field: "artifactId", .. }));
    }

    #[test]
    fn empty_version_without_parent_is_missing() {
        let dir = TempDir::new().unwrap();
        let pom = write_pom(
            &dir,
            "<project><groupId>g</groupId><artifactId>a</artifactId><version>  </version></project>",
        );
        let err = PomResolver.resolve(&pom).unwrap_err();
        assert!(matches!(err, Error::MissingCoordinate { field: "version", .. }));
    }

    #[test]
    fn malformed_xml_is_descriptor_invalid() {
        let dir = TempDir::new().unwrap();
        let pom = write_pom(&dir, "<project><groupId>g</project>");
        let err = PomResolver.resolve(&pom).unwrap_err();
        assert!(matches!(err, Error::DescriptorInvalid { .. }));
    }

    #[test]
    fn external_doctype_is_ignored() {
        let dir = TempDir::new().unwrap();
        let pom = write_pom(
            &dir,
            r#"<?xml version="1.0"?>
<!DOCTYPE project SYSTEM "http://127.0.0.1:1/never-fetched.dtd">
<project><groupId>g</groupId><artifactId>a</artifactId><version>1</version></project>"#,
        );
        let coords = PomResolver.resolve(&pom).unwrap();
        assert_eq!(coords.to_string(), "g:a:1");
    }

    #[test]
    fn external_entity_reference_has_no_effect() {
        let dir = TempDir::new().unwrap();
        let secret = dir.path().join("secret.txt");
        std::fs::write(&secret, "leaked").unwrap();
        let pom = write_pom(
            &dir,
            &format!(
                r#"<?xml version="1.0"?>
<!DOCTYPE project [ <!ENTITY ext SYSTEM "file://{}"> ]>
<project>
  <groupId>io.kodegen</groupId>
  <artifactId>core</artifactId>
  <version>1.0&ext;</version>
  <description>&ext;</description>
</project>"#,
                secret.display()
            ),
        );
        let coords = PomResolver.resolve(&pom).unwrap();
        assert_eq!(coords, Coordinates::new("io.kodegen", "core", "1.0"));
    }

    #[test]
    fn external_parameter_entity_is_ignored() {
        let dir = TempDir::new().unwrap();
        let pom = write_pom(
            &dir,
            r#"<!DOCTYPE project [
  <!ENTITY % remote SYSTEM "http://127.0.0.1:1/evil.dtd">
  %remote;
  <!ENTITY pub PUBLIC "-//Kodegen//EN" "http://127.0.0.1:1/pub.xml">
]>
<project><groupId>g</groupId><artifactId>a&pub;</artifactId><version>1</version></project>"#,
        );
        assert_eq!(PomResolver.resolve(&pom).unwrap().to_string(), "g:a:1");
    }

    #[test]
    fn internal_entity_still_expands() {
        let dir = TempDir::new().unwrap();
        let pom = write_pom(
            &dir,
            r#"<!DOCTYPE project [ <!ENTITY release "3.1.4"> ]>
<project><groupId>g</groupId><artifactId>a</artifactId><version>&release;</version></project>"#,
        );
        assert_eq!(PomResolver.resolve(&pom).unwrap().version(), "3.1.4");
    }

    #[test]
    fn path_traversal_coordinates_are_rejected() {
        let dir = TempDir::new().unwrap();
        let pom = write_pom(
            &dir,
            "<project><groupId>..</groupId><artifactId>..</artifactId>\
             <version>../../evil</version></project>",
        );
        let err = PomResolver.resolve(&pom).unwrap_err();
        assert!(matches!(err, Error::InvalidCoordinate { field: "groupId", .. }));

        let pom = write_pom(
            &dir,
            "<project><groupId>io.kodegen</groupId><artifactId>core</artifactId>\
             <version>../../evil</version></project>",
        );
        let err = PomResolver.resolve(&pom).unwrap_err();
        assert!(
            matches!(err, Error::InvalidCoordinate { field: "version", ref value, .. } if value == "../../evil")
        );
    }

    #[test]
    fn empty_group_segment_is_rejected() {
        let dir = TempDir::new().unwrap();
        let pom = write_pom(
            &dir,
            "<project><groupId>io..kodegen</groupId><artifactId>a</artifactId><version>1</version></project>",
        );
        let err = PomResolver.resolve(&pom).unwrap_err();
        assert!(matches!(err, Error::InvalidCoordinate { field: "groupId", .. }));
    }

    #[test]
    fn missing_file_is_fs_error() {
        let dir = TempDir::new().unwrap();
        let err = PomResolver.resolve(&dir.path().join("pom.xml")).unwrap_err();
        assert!(matches!(err, Error::Fs { .. }));
    }
}
