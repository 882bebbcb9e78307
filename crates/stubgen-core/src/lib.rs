#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for stub generation.
//!
//! Two layers:
//! - **Deserialization layer**: raw mirror of the descriptor set JSON
//! - **Model layer**: `DescriptorSet` with owner back-references resolved
//!
//! Everything here is immutable once built; the compiler crate only reads it.

pub mod colors;
pub mod descriptor;
pub mod utils;


pub use colors::Colors;
pub use descriptor::{
    Accessibility, Accessor, ArtifactDescriptor, Constraint, DescriptorError, DescriptorSet,
    GenericParam, Literal, MemberDescriptor, MemberKind, Modifier, ParamModifier, Parameter,
    Signature, TupleElement, TypeDescriptor, TypeKind, TypeModifier, TypeRef, Variance,
};

/// Parse a descriptor set file's content.
pub fn parse_descriptor_set(json: &str) -> Result<DescriptorSet, DescriptorError> {
    DescriptorSet::from_json(json)
}
