//! Descriptor set loading.
//!
//! Reads one artifact's descriptor set and reduces it to what the rest of
//! the pipeline may rely on: only externally visible declarations, every
//! one of them renderable, no two with the same signature, in canonical
//! order. Anything dropped along the way is reported as a diagnostic.

mod filter;

#[cfg(test)]
mod metadata_tests;

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use stubgen_core::{ArtifactDescriptor, DescriptorSet, TypeDescriptor};

use crate::diagnostics::Diagnostics;
use crate::{Config, Error, MetadataCause, Result};

use filter::Filter;

/// One artifact's declarations, ready to render.
#[derive(Debug, Clone)]
pub struct Metadata {
    pub artifact: ArtifactDescriptor,
    pub types: Vec<TypeDescriptor>,
    pub diagnostics: Diagnostics,
}

impl Metadata {
    pub fn type_count(&self) -> usize {
        self.types.iter().map(TypeDescriptor::type_count).sum()
    }

    pub fn member_count(&self) -> usize {
        self.types.iter().map(TypeDescriptor::member_count).sum()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MetadataReader {
    include_protected: bool,
}

impl Default for MetadataReader {
    fn default() -> Self {
        Self {
            include_protected: true,
        }
    }
}

impl MetadataReader {
    pub fn new(config: &Config) -> Self {
        Self {
            include_protected: config.include_protected,
        }
    }

    /// Load a descriptor set from disk.
    pub fn read(&self, path: &Path) -> Result<Metadata> {
        let source = fs::read_to_string(path).map_err(|e| {
            let cause = match e.kind() {
                ErrorKind::NotFound => MetadataCause::NotFound,
                _ => MetadataCause::Io(e),
            };
            unavailable(path, cause)
        })?;
        self.from_source(&source, path)
    }

    /// Load a descriptor set from its text. `origin` is only used in errors.
    pub fn from_source(&self, source: &str, origin: &Path) -> Result<Metadata> {
        let set = DescriptorSet::from_json(source).map_err(|error| {
            unavailable(
                origin,
                MetadataCause::Malformed {
                    error,
                    source_text: source.to_string(),
                },
            )
        })?;
        check_artifact(&set.artifact)
            .map_err(|msg| unavailable(origin, MetadataCause::Invalid(msg)))?;

        let mut diagnostics = Diagnostics::new();
        let artifact = set.artifact;
        let types = Filter::new(self.include_protected, &mut diagnostics).types(set.types, "");

        let metadata = Metadata {
            artifact,
            types,
            diagnostics,
        };
        tracing::debug!(
            artifact = %metadata.artifact.name,
            types = metadata.type_count(),
            members = metadata.member_count(),
            skipped = metadata.diagnostics.len(),
            "metadata read"
        );
        Ok(metadata)
    }
}

fn unavailable(path: &Path, cause: MetadataCause) -> Error {
    Error::MetadataUnavailable {
        path: path.to_path_buf(),
        cause,
    }
}

/// The artifact name becomes a file name, so it must be usable as one.
fn check_artifact(artifact: &ArtifactDescriptor) -> std::result::Result<(), String> {
    let name = artifact.name.trim();
    if name.is_empty() {
        return Err("artifact name is empty".to_string());
    }
    let reserved = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];
    if name == "." || name == ".." || name.contains(reserved) || name.chars().any(char::is_control)
    {
        return Err(format!(
            "artifact name `{}` cannot be used as a file name",
            artifact.name
        ));
    }
    Ok(())
}
