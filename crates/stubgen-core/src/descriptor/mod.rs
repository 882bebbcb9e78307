//! Descriptor model for artifact metadata.
//!
//! This module provides types for one artifact's public shape (types, members,
//! signatures) together with JSON deserialization of descriptor set files.

mod json;
mod types;

#[cfg(test)]
mod json_tests;

pub use json::DescriptorError;
pub use types::{
    Accessibility, Accessor, ArtifactDescriptor, Constraint, DescriptorSet, GenericParam, Literal,
    MemberDescriptor, MemberKind, Modifier, ParamModifier, Parameter, Signature, TupleElement,
    TypeDescriptor, TypeKind, TypeModifier, TypeRef, Variance,
};
