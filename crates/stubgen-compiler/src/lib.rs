//! stubgen compiler: metadata reader, signature renderer, and file writer.
//!
//! This crate provides the generation pipeline for one or more artifacts:
//! - `metadata` - descriptor set loading, visibility filtering, validation
//! - `render` - C# declaration rendering (namespaces, types, members)
//! - `stub` - placeholder bodies that always throw
//! - `writer` - provenance header and idempotent file output
//! - `pipeline` - per-artifact runs, sequential or parallel
//! - `diagnostics` - warnings collected while reading

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod diagnostics;
pub mod metadata;
pub mod pipeline;
pub mod render;
pub mod stub;
pub mod writer;

#[cfg(test)]
pub mod test_utils;

use std::path::PathBuf;

use stubgen_core::DescriptorError;

pub use config::{Config, Sentinel};
pub use diagnostics::{DiagnosticKind, Diagnostics, DiagnosticsPrinter, Severity};
pub use metadata::{Metadata, MetadataReader};
pub use pipeline::{ArtifactReport, generate, generate_all, render_unit};
pub use render::{Renderer, render_type};
pub use stub::StubBody;
pub use writer::WriteStatus;

/// Errors that end one artifact's run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Descriptor set missing, unreadable, or corrupt.
    #[error("metadata unavailable for {}: {cause}", .path.display())]
    MetadataUnavailable { path: PathBuf, cause: MetadataCause },

    /// Two artifacts in one run map to the same output file.
    #[error("{} is already generated from {}", .path.display(), .first.display())]
    OutputCollision { path: PathBuf, first: PathBuf },

    /// Output path not writable.
    #[error("failed to write {}: {source}", .path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Why a descriptor set could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum MetadataCause {
    #[error("file not found")]
    NotFound,

    #[error("{0}")]
    Io(std::io::Error),

    /// Not valid JSON, or JSON that does not match the descriptor schema.
    #[error("{error}")]
    Malformed {
        #[source]
        error: DescriptorError,
        source_text: String,
    },

    /// Parsed, but unusable as an artifact.
    #[error("{0}")]
    Invalid(String),
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;
