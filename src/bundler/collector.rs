//! Artifact file collection.
//!
//! The collector only decides *which* files belong to an artifact. Whether they
//! exist is checked later by the orchestrator, which treats a missing descriptor
//! as fatal and a missing optional file as a warning.

use super::settings::{ArtifactLayout, IncludeOptions};
use crate::metadata::Coordinates;
use std::{
    fmt,
    path::{Path, PathBuf},
};

/// Kind of a file placed in the bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// Project descriptor (`pom.xml` → `<base>.pom`). Always mandatory.
    Descriptor,
    /// Primary binary (`<base>.jar`).
    Binary,
    /// Source bundle (`<base>-sources.jar`).
    Sources,
    /// Documentation bundle (`<base>-javadoc.jar`).
    Docs,
    /// Detached signature of another entry.
    Signature,
    /// Checksum of another entry.
    Checksum,
}

impl ArtifactKind {
    /// Only descriptors abort the run when absent.
    pub fn is_required(self) -> bool {
        matches!(self, ArtifactKind::Descriptor)
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ArtifactKind::Descriptor => "descriptor",
            ArtifactKind::Binary => "binary",
            ArtifactKind::Sources => "sources",
            ArtifactKind::Docs => "docs",
            ArtifactKind::Signature => "signature",
            ArtifactKind::Checksum => "checksum",
        };
        f.write_str(name)
    }
}

/// A candidate file: where it lives, what it is called in the bundle, and its kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactFile {
    source: PathBuf,
    target_name: String,
    kind: ArtifactKind,
}

impl ArtifactFile {
    pub fn new(source: PathBuf, target_name: String, kind: ArtifactKind) -> Self {
        Self {
            source,
            target_name,
            kind,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn target_name(&self) -> &str {
        &self.target_name
    }

    pub fn kind(&self) -> ArtifactKind {
        self.kind
    }

    /// Checked lazily against the filesystem.
    pub fn exists(&self) -> bool {
        self.source.is_file()
    }
}

/// Enumerates the files belonging to one project directory.
#[derive(Debug, Clone)]
pub struct ArtifactCollector {
    include: IncludeOptions,
    layout: ArtifactLayout,
}

impl ArtifactCollector {
    pub fn new(include: IncludeOptions, layout: ArtifactLayout) -> Self {
        Self { include, layout }
    }

    /// Lists candidate files for `coordinates` inside `project_dir`.
    ///
    /// Order is fixed: descriptor, binary, sources, docs. Optional kinds appear
    /// only when enabled in [`IncludeOptions`].
    pub fn collect(&self, project_dir: &Path, coordinates: &Coordinates) -> Vec<ArtifactFile> {
        let base = coordinates.base_file_name();
        let layout = &self.layout;

        let mut files = vec![ArtifactFile::new(
            project_dir.join(&layout.descriptor_file_name),
            format!("{base}{}", layout.descriptor_suffix),
            ArtifactKind::Descriptor,
        )];

        let optional = [
            (self.include.binary, &layout.binary_suffix, ArtifactKind::Binary),
            (self.include.sources, &layout.sources_suffix, ArtifactKind::Sources),
            (self.include.docs, &layout.docs_suffix, ArtifactKind::Docs),
        ];

        for (enabled, suffix, kind) in optional {
            if enabled {
                let name = format!("{base}{suffix}");
                files.push(ArtifactFile::new(project_dir.join(&name), name, kind));
            }
        }

        files
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coords() -> Coordinates {
        Coordinates::new("io.kodegen", "core", "1.0.0")
    }

    #[test]
    fn descriptor_only_by_default() {
        let collector = ArtifactCollector::new(IncludeOptions::default(), ArtifactLayout::default());
        let files = collector.collect(Path::new("/work/core"), &coords());

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].kind(), ArtifactKind::Descriptor);
        assert_eq!(files[0].source(), Path::new("/work/core/pom.xml"));
        assert_eq!(files[0].target_name(), "core-1.0.0.pom");
    }

    #[test]
    fn optional_files_follow_fixed_order() {
        let include = IncludeOptions {
            binary: true,
            sources: true,
            docs: true,
        };
        let collector = ArtifactCollector::new(include, ArtifactLayout::default());
        let files = collector.collect(Path::new("/work/core"), &coords());

        let names: Vec<_> = files.iter().map(|f| f.target_name()).collect();
        assert_eq!(
            names,
            [
                "core-1.0.0.pom",
                "core-1.0.0.jar",
                "core-1.0.0-sources.jar",
                "core-1.0.0-javadoc.jar",
            ]
        );
        assert_eq!(files[2].source(), Path::new("/work/core/core-1.0.0-sources.jar"));
    }

    #[test]
    fn suffixes_come_from_layout() {
        let include = IncludeOptions {
            binary: true,
            sources: false,
            docs: true,
        };
        let layout = ArtifactLayout {
            binary_suffix: ".aar".into(),
            docs_suffix: "-dokka.jar".into(),
            ..ArtifactLayout::default()
        };
        let collector = ArtifactCollector::new(include, layout);
        let files = collector.collect(Path::new("p"), &coords());

        assert_eq!(files[1].target_name(), "core-1.0.0.aar");
        assert_eq!(files[2].target_name(), "core-1.0.0-dokka.jar");
        assert_eq!(files[2].kind(), ArtifactKind::Docs);
    }

    #[test]
    fn only_descriptor_is_required() {
        assert!(ArtifactKind::Descriptor.is_required());
        assert!(!ArtifactKind::Sources.is_required());
    }
}
