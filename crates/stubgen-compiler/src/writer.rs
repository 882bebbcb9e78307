//! Output files: provenance header and idempotent writes.

use std::fs;
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

use stubgen_core::{ArtifactDescriptor, Colors};

use crate::{Error, Result};

pub const GENERATED_MARKER: &str = "// This file contains auto-generated code.";

/// Outcome of writing one unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WriteStatus {
    Written,
    /// Existing file already had identical content; left untouched.
    Unchanged,
}

impl std::fmt::Display for WriteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Written => write!(f, "written"),
            Self::Unchanged => write!(f, "unchanged"),
        }
    }
}

/// Two comment lines naming the generator and the source artifact.
pub fn provenance_header(artifact: &ArtifactDescriptor, colors: Colors) -> String {
    let text = format!(
        "{GENERATED_MARKER}\n// Generated from `{}`.",
        artifact.display_name()
    );
    format!("{}\n", colors.paint(colors.comment, &text))
}

/// Full unit text: header followed by the rendered declarations.
pub fn compose(artifact: &ArtifactDescriptor, body: &str, colors: Colors) -> String {
    let mut out = provenance_header(artifact, colors);
    out.push_str(body);
    out
}

/// `<dir>/<artifact name>.cs`
pub fn output_path(dir: &Path, artifact: &ArtifactDescriptor) -> PathBuf {
    dir.join(format!("{}.cs", artifact.name.trim()))
}

/// Write `content` to `path` unless it already holds exactly that.
///
/// Goes through a uniquely named sibling temporary file and a rename, so a
/// failed run never leaves a partially written unit behind.
pub fn write_unit(path: &Path, content: &str) -> Result<WriteStatus> {
    match fs::read(path) {
        Ok(existing) if existing == content.as_bytes() => {
            tracing::debug!(path = %path.display(), "unchanged");
            return Ok(WriteStatus::Unchanged);
        }
        Ok(_) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(write_failure(path, e)),
    }

    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|e| write_failure(path, e))?;

    // Dropping the temp file on any error below removes it.
    let mut tmp = tempfile::Builder::new()
        .prefix(".stubgen-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| write_failure(path, e))?;
    tmp.write_all(content.as_bytes())
        .map_err(|e| write_failure(path, e))?;
    tmp.persist(path)
        .map_err(|e| write_failure(path, e.error))?;

    tracing::debug!(path = %path.display(), bytes = content.len(), "written");
    Ok(WriteStatus::Written)
}

fn write_failure(path: &Path, source: io::Error) -> Error {
    Error::WriteFailure {
        path: path.to_path_buf(),
        source,
    }
}
