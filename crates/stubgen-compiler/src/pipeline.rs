//! Per-artifact generation runs.
//!
//! Each artifact is independent: its own reader, renderer and output file.
//! Multi-artifact runs fan out over a rayon pool; a failure in one artifact
//! never affects another. Output paths are claimed in input order before
//! anything is written, so two descriptor sets naming the same artifact
//! never race on one file.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use indexmap::map::Entry;
use rayon::prelude::*;
use stubgen_core::ArtifactDescriptor;

use crate::diagnostics::Diagnostics;
use crate::metadata::{Metadata, MetadataReader};
use crate::render::Renderer;
use crate::writer::{self, WriteStatus};
use crate::{Config, Error, Result};

/// What happened to one artifact.
#[derive(Debug, Clone)]
pub struct ArtifactReport {
    pub source: PathBuf,
    pub artifact: ArtifactDescriptor,
    pub output: PathBuf,
    pub status: WriteStatus,
    pub diagnostics: Diagnostics,
    pub types: usize,
    pub members: usize,
}

/// A rendered unit waiting to be written.
struct Prepared {
    source: PathBuf,
    metadata: Metadata,
    output: PathBuf,
    content: String,
}

/// Complete unit text for already loaded metadata.
pub fn render_unit(metadata: &Metadata, config: &Config) -> String {
    let body = Renderer::new(&metadata.types, config).emit();
    writer::compose(&metadata.artifact, &body, config.colors)
}

/// Read, render and write one artifact.
pub fn generate(reference: &Path, config: &Config) -> Result<ArtifactReport> {
    commit(prepare(reference, config)?)
}

/// Run [`generate`] for every reference. Results keep the input order.
///
/// When several references produce the same output file, the first one
/// in input order writes it and the others fail with
/// [`Error::OutputCollision`].
pub fn generate_all(references: &[PathBuf], config: &Config) -> Vec<Result<ArtifactReport>> {
    in_pool(config.jobs, || {
        let prepared: Vec<_> = references
            .par_iter()
            .map(|reference| prepare(reference, config))
            .collect();
        claim_outputs(prepared)
            .into_par_iter()
            .map(|prepared| prepared.and_then(commit))
            .collect()
    })
}

fn prepare(reference: &Path, config: &Config) -> Result<Prepared> {
    let _span = tracing::info_span!("artifact", source = %reference.display()).entered();
    tracing::info!("generating");

    let metadata = MetadataReader::new(config).read(reference)?;
    // Files on disk never carry color codes.
    let plain = config.clone().colored(false);
    let content = render_unit(&metadata, &plain);
    let output = writer::output_path(&config.output_dir, &metadata.artifact);
    Ok(Prepared {
        source: reference.to_path_buf(),
        metadata,
        output,
        content,
    })
}

fn commit(prepared: Prepared) -> Result<ArtifactReport> {
    let Prepared {
        source,
        metadata,
        output,
        content,
    } = prepared;
    let _span = tracing::info_span!("artifact", source = %source.display()).entered();
    let status = writer::write_unit(&output, &content)?;

    tracing::info!(
        artifact = %metadata.artifact.name,
        output = %output.display(),
        %status,
        warnings = metadata.diagnostics.len(),
        "artifact done"
    );

    Ok(ArtifactReport {
        source,
        types: metadata.type_count(),
        members: metadata.member_count(),
        artifact: metadata.artifact,
        output,
        status,
        diagnostics: metadata.diagnostics,
    })
}

/// First claim on an output path wins. Paths compare case-insensitively,
/// since `Acme.cs` and `acme.cs` are one file on common file systems.
fn claim_outputs(prepared: Vec<Result<Prepared>>) -> Vec<Result<Prepared>> {
    let mut owners: IndexMap<String, PathBuf> = IndexMap::new();
    prepared
        .into_iter()
        .map(|prepared| {
            let prepared = prepared?;
            let key = prepared.output.to_string_lossy().to_lowercase();
            match owners.entry(key) {
                Entry::Vacant(e) => {
                    e.insert(prepared.source.clone());
                    Ok(prepared)
                }
                Entry::Occupied(e) => {
                    tracing::warn!(
                        source = %prepared.source.display(),
                        first = %e.get().display(),
                        "output already claimed"
                    );
                    Err(Error::OutputCollision {
                        path: prepared.output,
                        first: e.get().clone(),
                    })
                }
            }
        })
        .collect()
}

fn in_pool<R: Send>(jobs: Option<usize>, run: impl FnOnce() -> R + Send) -> R {
    let Some(jobs) = jobs else {
        return run();
    };
    match rayon::ThreadPoolBuilder::new().num_threads(jobs).build() {
        Ok(pool) => pool.install(run),
        Err(e) => {
            tracing::warn!(jobs, error = %e, "thread pool unavailable, using global pool");
            run()
        }
    }
}
