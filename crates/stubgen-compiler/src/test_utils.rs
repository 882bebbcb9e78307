//! Test helpers: descriptor sets from inline JSON.

use std::path::Path;

use crate::metadata::{Metadata, MetadataReader};
use crate::render::Renderer;
use crate::Config;

/// Wrap a `types` array in a descriptor set for artifact `Test`.
pub fn descriptor_set(types: &str) -> String {
    format!(
        r#"{{ "artifact": {{ "name": "Test", "version": "1.0.0.0" }}, "types": {types} }}"#
    )
}

pub fn read_with(types: &str, config: &Config) -> Metadata {
    MetadataReader::new(config)
        .from_source(&descriptor_set(types), Path::new("test.json"))
        .unwrap()
}

pub fn read(types: &str) -> Metadata {
    read_with(types, &Config::new())
}

/// Rendered namespace tree (no header) for a `types` array.
pub fn render_with(types: &str, config: &Config) -> String {
    let metadata = read_with(types, config);
    Renderer::new(&metadata.types, config).emit()
}

pub fn render(types: &str) -> String {
    render_with(types, &Config::new())
}
