//! JSON deserialization for descriptor set files.
//!
//! The raw layer accepts a couple of shorthands the model does not carry:
//! dotted namespace strings, bare type names for non-generic references,
//! and bare JSON scalars for literals.

use std::collections::BTreeSet;

use serde::Deserialize;

use super::types::{
    Accessibility, Accessor, ArtifactDescriptor, Constraint, DescriptorSet, GenericParam, Literal,
    MemberDescriptor, MemberKind, Modifier, ParamModifier, Parameter, Signature, TupleElement,
    TypeDescriptor, TypeKind, TypeModifier, TypeRef, Variance,
};

/// Error during descriptor set parsing.
#[derive(Debug)]
pub struct DescriptorError(serde_json::Error);

impl DescriptorError {
    /// One-based line of the failure.
    pub fn line(&self) -> usize {
        self.0.line()
    }

    /// One-based column of the failure.
    pub fn column(&self) -> usize {
        self.0.column()
    }

    /// Whether the input ended before the document was complete.
    pub fn is_eof(&self) -> bool {
        self.0.is_eof()
    }
}

impl std::fmt::Display for DescriptorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "JSON parse error: {}", self.0)
    }
}

impl std::error::Error for DescriptorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

impl DescriptorSet {
    /// Parse a descriptor set from JSON.
    pub fn from_json(json: &str) -> Result<Self, DescriptorError> {
        let raw: RawDescriptorSet = serde_json::from_str(json).map_err(DescriptorError)?;
        Ok(raw.into())
    }
}

#[derive(Debug, Deserialize)]
struct RawDescriptorSet {
    artifact: RawArtifact,
    #[serde(default)]
    types: Vec<RawType>,
}

impl From<RawDescriptorSet> for DescriptorSet {
    fn from(raw: RawDescriptorSet) -> Self {
        Self {
            artifact: raw.artifact.into(),
            types: raw
                .types
                .into_iter()
                .map(|t| {
                    let namespace = t.namespace.clone().into_segments();
                    t.into_descriptor(namespace, Vec::new())
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawArtifact {
    name: String,
    #[serde(default = "default_version")]
    version: String,
    #[serde(default)]
    culture: Option<String>,
    #[serde(default)]
    public_key_token: Option<String>,
}

fn default_version() -> String {
    "0.0.0.0".to_string()
}

impl From<RawArtifact> for ArtifactDescriptor {
    fn from(raw: RawArtifact) -> Self {
        Self {
            name: raw.name,
            version: raw.version,
            culture: raw.culture,
            public_key_token: raw.public_key_token,
        }
    }
}

/// Namespace as `"A.B.C"` or `["A", "B", "C"]`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RawNamespace {
    Dotted(String),
    Segments(Vec<String>),
}

impl Default for RawNamespace {
    fn default() -> Self {
        Self::Segments(Vec::new())
    }
}

impl RawNamespace {
    fn into_segments(self) -> Vec<String> {
        match self {
            Self::Dotted(s) => s
                .split('.')
                .filter(|seg| !seg.is_empty())
                .map(str::to_string)
                .collect(),
            Self::Segments(segs) => segs.into_iter().filter(|s| !s.is_empty()).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawType {
    #[serde(default)]
    namespace: RawNamespace,
    name: String,
    kind: String,
    #[serde(default)]
    accessibility: Accessibility,
    #[serde(default)]
    modifiers: BTreeSet<TypeModifier>,
    #[serde(default)]
    generic_params: Vec<RawGenericParam>,
    #[serde(default)]
    base_type: Option<RawTypeRef>,
    #[serde(default)]
    interfaces: Vec<RawTypeRef>,
    #[serde(default)]
    members: Vec<RawMember>,
    #[serde(default)]
    nested_types: Vec<RawType>,
    #[serde(default)]
    underlying_type: Option<RawTypeRef>,
    #[serde(default)]
    delegate: Option<RawSignature>,
}

impl RawType {
    /// Nested types inherit the parent's namespace; their own is ignored.
    fn into_descriptor(self, namespace: Vec<String>, declaring: Vec<String>) -> TypeDescriptor {
        let owner = namespace
            .iter()
            .chain(declaring.iter())
            .map(String::as_str)
            .chain(std::iter::once(self.name.as_str()))
            .collect::<Vec<_>>()
            .join(".");

        let mut inner_declaring = declaring.clone();
        inner_declaring.push(self.name.clone());

        TypeDescriptor {
            kind: type_kind(&self.kind),
            accessibility: self.accessibility,
            modifiers: self.modifiers,
            generic_params: self.generic_params.into_iter().map(Into::into).collect(),
            base_type: self.base_type.map(Into::into),
            interfaces: self.interfaces.into_iter().map(Into::into).collect(),
            members: self
                .members
                .into_iter()
                .map(|m| m.into_descriptor(&owner))
                .collect(),
            nested_types: self
                .nested_types
                .into_iter()
                .map(|t| t.into_descriptor(namespace.clone(), inner_declaring.clone()))
                .collect(),
            underlying_type: self.underlying_type.map(Into::into),
            delegate: self.delegate.map(Into::into),
            namespace,
            declaring,
            name: self.name,
        }
    }
}

fn type_kind(kind: &str) -> TypeKind {
    match kind {
        "class" => TypeKind::Class,
        "interface" => TypeKind::Interface,
        "struct" => TypeKind::Struct,
        "enum" => TypeKind::Enum,
        "delegate" => TypeKind::Delegate,
        _ => TypeKind::Unknown,
    }
}

fn member_kind(kind: &str) -> MemberKind {
    match kind {
        "method" => MemberKind::Method,
        "constructor" => MemberKind::Constructor,
        "property" => MemberKind::Property,
        "indexer" => MemberKind::Indexer,
        "field" => MemberKind::Field,
        "event" => MemberKind::Event,
        "operator" => MemberKind::Operator,
        _ => MemberKind::Unknown,
    }
}

#[derive(Debug, Deserialize)]
struct RawMember {
    kind: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    accessibility: Accessibility,
    #[serde(default)]
    modifiers: BTreeSet<Modifier>,
    #[serde(default)]
    generic_params: Vec<RawGenericParam>,
    #[serde(default)]
    parameters: Vec<RawParameter>,
    #[serde(default, rename = "type")]
    ty: Option<RawTypeRef>,
    #[serde(default)]
    accessors: BTreeSet<Accessor>,
    #[serde(default)]
    explicit_interface: Option<RawTypeRef>,
    #[serde(default)]
    constant: Option<RawLiteral>,
}

impl RawMember {
    fn into_descriptor(self, owner: &str) -> MemberDescriptor {
        MemberDescriptor {
            owner: owner.to_string(),
            kind: member_kind(&self.kind),
            name: self.name,
            accessibility: self.accessibility,
            modifiers: self.modifiers,
            generic_params: self.generic_params.into_iter().map(Into::into).collect(),
            parameters: self.parameters.into_iter().map(Into::into).collect(),
            ty: self.ty.map(Into::into),
            accessors: self.accessors,
            explicit_interface: self.explicit_interface.map(Into::into),
            constant: self.constant.map(Into::into),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawGenericParam {
    name: String,
    #[serde(default)]
    variance: Option<Variance>,
    #[serde(default)]
    constraints: Vec<RawConstraint>,
}

impl From<RawGenericParam> for GenericParam {
    fn from(raw: RawGenericParam) -> Self {
        Self {
            name: raw.name,
            variance: raw.variance,
            constraints: raw.constraints.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum RawConstraint {
    Class,
    Struct,
    Unmanaged,
    #[serde(rename = "notnull")]
    NotNull,
    New,
    Type {
        #[serde(rename = "type")]
        ty: RawTypeRef,
    },
}

impl From<RawConstraint> for Constraint {
    fn from(raw: RawConstraint) -> Self {
        match raw {
            RawConstraint::Class => Self::Class,
            RawConstraint::Struct => Self::Struct,
            RawConstraint::Unmanaged => Self::Unmanaged,
            RawConstraint::NotNull => Self::NotNull,
            RawConstraint::New => Self::New,
            RawConstraint::Type { ty } => Self::Type(ty.into()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawParameter {
    name: String,
    #[serde(rename = "type")]
    ty: RawTypeRef,
    #[serde(default)]
    default: Option<RawLiteral>,
    #[serde(default)]
    modifier: Option<ParamModifier>,
}

impl From<RawParameter> for Parameter {
    fn from(raw: RawParameter) -> Self {
        Self {
            name: raw.name,
            ty: raw.ty.into(),
            default: raw.default.map(Into::into),
            modifier: raw.modifier,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawSignature {
    #[serde(default, rename = "type")]
    return_type: Option<RawTypeRef>,
    #[serde(default)]
    parameters: Vec<RawParameter>,
}

impl From<RawSignature> for Signature {
    fn from(raw: RawSignature) -> Self {
        Self {
            return_type: raw.return_type.map(Into::into),
            parameters: raw.parameters.into_iter().map(Into::into).collect(),
        }
    }
}

/// Type reference as a bare name or a tagged object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawTypeRef {
    Name(String),
    Tagged(RawTaggedTypeRef),
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum RawTaggedTypeRef {
    Named {
        name: String,
        #[serde(default)]
        args: Vec<RawTypeRef>,
    },
    GenericParam {
        name: String,
    },
    Array {
        element: Box<RawTypeRef>,
        #[serde(default = "default_rank")]
        rank: u8,
    },
    Tuple {
        elements: Vec<RawTupleElement>,
    },
    Pointer {
        pointee: Box<RawTypeRef>,
    },
    FunctionPointer,
    #[serde(other)]
    Unknown,
}

fn default_rank() -> u8 {
    1
}

impl From<RawTypeRef> for TypeRef {
    fn from(raw: RawTypeRef) -> Self {
        match raw {
            RawTypeRef::Name(name) => TypeRef::named(name),
            RawTypeRef::Tagged(tagged) => match tagged {
                RawTaggedTypeRef::Named { name, args } => TypeRef::Named {
                    name,
                    args: args.into_iter().map(Into::into).collect(),
                },
                RawTaggedTypeRef::GenericParam { name } => TypeRef::GenericParam(name),
                RawTaggedTypeRef::Array { element, rank } => TypeRef::Array {
                    element: Box::new((*element).into()),
                    rank,
                },
                RawTaggedTypeRef::Tuple { elements } => {
                    TypeRef::Tuple(elements.into_iter().map(Into::into).collect())
                }
                RawTaggedTypeRef::Pointer { pointee } => {
                    TypeRef::Pointer(Box::new((*pointee).into()))
                }
                RawTaggedTypeRef::FunctionPointer => TypeRef::FunctionPointer,
                RawTaggedTypeRef::Unknown => TypeRef::Unknown,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawTupleElement {
    #[serde(rename = "type")]
    ty: RawTypeRef,
    #[serde(default)]
    name: Option<String>,
}

impl From<RawTupleElement> for TupleElement {
    fn from(raw: RawTupleElement) -> Self {
        Self {
            ty: raw.ty.into(),
            name: raw.name,
        }
    }
}

/// Literal as a tagged object or a bare JSON scalar.
///
/// A bare `null` means "no value"; the null literal must be tagged.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawLiteral {
    Tagged(RawTaggedLiteral),
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    String(String),
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
enum RawTaggedLiteral {
    Default,
    Null,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    String(String),
    Char(char),
}

impl From<RawLiteral> for Literal {
    fn from(raw: RawLiteral) -> Self {
        match raw {
            RawLiteral::Tagged(tagged) => match tagged {
                RawTaggedLiteral::Default => Literal::Default,
                RawTaggedLiteral::Null => Literal::Null,
                RawTaggedLiteral::Bool(v) => Literal::Bool(v),
                RawTaggedLiteral::Int(v) => Literal::Int(v),
                RawTaggedLiteral::Uint(v) => Literal::UInt(v),
                RawTaggedLiteral::Float(v) => Literal::Float(v),
                RawTaggedLiteral::String(v) => Literal::String(v),
                RawTaggedLiteral::Char(v) => Literal::Char(v),
            },
            RawLiteral::Bool(v) => Literal::Bool(v),
            RawLiteral::Int(v) => Literal::Int(v),
            RawLiteral::UInt(v) => Literal::UInt(v),
            RawLiteral::Float(v) => Literal::Float(v),
            RawLiteral::String(v) => Literal::String(v),
        }
    }
}
