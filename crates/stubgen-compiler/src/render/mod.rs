//! C# declaration rendering.
//!
//! Turns filtered descriptors into source text: nested namespace blocks,
//! type headers, and one line per member. Rendering is pure; the same
//! descriptors and config always produce the same text.

mod declaration;
mod literal;
mod member;
pub mod naming;
pub mod order;


use stubgen_core::{Colors, TypeDescriptor};

pub use literal::literal;
pub use naming::type_name;
pub use order::{Chunk, signature, signature_key};

use crate::Config;

const INDENT: &str = "    ";

/// Source renderer for one artifact's types.
pub struct Renderer<'a> {
    pub(super) types: &'a [TypeDescriptor],
    pub(super) config: &'a Config,
    /// Output buffer
    pub(super) output: String,
}

impl<'a> Renderer<'a> {
    pub fn new(types: &'a [TypeDescriptor], config: &'a Config) -> Self {
        Self {
            types,
            config,
            output: String::new(),
        }
    }

    pub(super) fn c(&self) -> Colors {
        self.config.colors
    }

    /// Render every type, grouped into namespace blocks.
    pub fn emit(mut self) -> String {
        let tree = declaration::NamespaceNode::build(self.types);
        for chunk in self.scope_chunks(&tree, 0) {
            self.output.push_str(&chunk.text);
        }
        self.output
    }
}

/// Render one type declaration, nested types included, at the top level.
pub fn render_type(ty: &TypeDescriptor, config: &Config) -> String {
    Renderer::new(&[], config).type_chunk(ty, 0).text
}

pub(super) fn indent(depth: usize) -> String {
    INDENT.repeat(depth)
}
