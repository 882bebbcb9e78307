//! Descriptor type definitions.

use std::collections::BTreeSet;

use serde::Deserialize;

/// One artifact's complete descriptor set.
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptorSet {
    pub artifact: ArtifactDescriptor,
    /// Top-level types; nested types hang off their parents.
    pub types: Vec<TypeDescriptor>,
}

/// Identity of the compiled artifact being mirrored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactDescriptor {
    pub name: String,
    pub version: String,
    /// Locale tag. `None` means neutral.
    pub culture: Option<String>,
    /// Signing-key fingerprint. `None` means unsigned.
    pub public_key_token: Option<String>,
}

impl ArtifactDescriptor {
    pub fn culture(&self) -> &str {
        match self.culture.as_deref() {
            Some(c) if !c.is_empty() => c,
            _ => "neutral",
        }
    }

    pub fn public_key_token(&self) -> &str {
        match self.public_key_token.as_deref() {
            Some(t) if !t.is_empty() => t,
            _ => "null",
        }
    }

    /// Full display name: `Name, Version=1.0.0.0, Culture=neutral, PublicKeyToken=null`.
    pub fn display_name(&self) -> String {
        format!(
            "{}, Version={}, Culture={}, PublicKeyToken={}",
            self.name,
            self.version,
            self.culture(),
            self.public_key_token()
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypeKind {
    Class,
    Interface,
    Struct,
    Enum,
    Delegate,
    /// Kind the reader does not recognize.
    Unknown,
}

impl TypeKind {
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Struct => "struct",
            Self::Enum => "enum",
            Self::Delegate => "delegate",
            Self::Unknown => "?",
        }
    }
}

/// Declared accessibility of a type or member.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accessibility {
    #[default]
    Public,
    Protected,
    ProtectedInternal,
    Internal,
    Private,
    PrivateProtected,
}

impl Accessibility {
    /// Whether code outside the artifact can see this declaration.
    pub fn is_visible(self, include_protected: bool) -> bool {
        match self {
            Self::Public => true,
            Self::Protected | Self::ProtectedInternal => include_protected,
            Self::Internal | Self::Private | Self::PrivateProtected => false,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Protected => "protected",
            Self::ProtectedInternal => "protected internal",
            Self::Internal => "internal",
            Self::Private => "private",
            Self::PrivateProtected => "private protected",
        }
    }
}

/// Type-level modifiers. Variant order is the rendering order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeModifier {
    Static,
    Abstract,
    Sealed,
    Readonly,
    Ref,
}

impl TypeModifier {
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Abstract => "abstract",
            Self::Sealed => "sealed",
            Self::Readonly => "readonly",
            Self::Ref => "ref",
        }
    }
}

/// Member-level modifiers. Variant order is the rendering order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modifier {
    Static,
    Extern,
    New,
    Const,
    Virtual,
    Abstract,
    Sealed,
    Override,
    Readonly,
    Volatile,
}

impl Modifier {
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Extern => "extern",
            Self::New => "new",
            Self::Const => "const",
            Self::Virtual => "virtual",
            Self::Abstract => "abstract",
            Self::Sealed => "sealed",
            Self::Override => "override",
            Self::Readonly => "readonly",
            Self::Volatile => "volatile",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variance {
    In,
    Out,
}

/// Constraint on a generic parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Constraint {
    Class,
    Struct,
    Unmanaged,
    NotNull,
    /// `new()`
    New,
    Type(TypeRef),
}

impl Constraint {
    /// Position class within a `where` clause: primary, then types, then `new()`.
    pub fn rank(&self) -> u8 {
        match self {
            Self::Class | Self::Struct | Self::Unmanaged | Self::NotNull => 0,
            Self::Type(_) => 1,
            Self::New => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GenericParam {
    pub name: String,
    pub variance: Option<Variance>,
    pub constraints: Vec<Constraint>,
}

/// Reference to a type from a signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// Dotted full name (`System.Collections.Generic.List`) plus generic arguments.
    Named { name: String, args: Vec<TypeRef> },
    GenericParam(String),
    Array { element: Box<TypeRef>, rank: u8 },
    Tuple(Vec<TupleElement>),
    Pointer(Box<TypeRef>),
    FunctionPointer,
    /// Kind the reader does not recognize.
    Unknown,
}

impl TypeRef {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named {
            name: name.into(),
            args: Vec::new(),
        }
    }

    pub fn generic(name: impl Into<String>, args: Vec<TypeRef>) -> Self {
        Self::Named {
            name: name.into(),
            args,
        }
    }

    pub fn array(element: TypeRef) -> Self {
        Self::Array {
            element: Box::new(element),
            rank: 1,
        }
    }

    pub fn is_void(&self) -> bool {
        matches!(self, Self::Named { name, args } if name == "System.Void" && args.is_empty())
    }

    /// First shape inside this reference that has no source-level spelling.
    pub fn unsupported(&self) -> Option<String> {
        match self {
            Self::Named { args, .. } => args.iter().find_map(TypeRef::unsupported),
            Self::GenericParam(_) => None,
            Self::Array { element, rank } => {
                if *rank == 0 {
                    return Some("array of rank 0".to_string());
                }
                element.unsupported()
            }
            Self::Tuple(elements) => {
                if elements.len() < 2 {
                    return Some("tuple with fewer than two elements".to_string());
                }
                elements.iter().find_map(|e| e.ty.unsupported())
            }
            Self::Pointer(_) => Some("pointer type".to_string()),
            Self::FunctionPointer => Some("function pointer type".to_string()),
            Self::Unknown => Some("unrecognized type reference kind".to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TupleElement {
    pub ty: TypeRef,
    pub name: Option<String>,
}

/// Literal value used for parameter defaults and constants.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// `default(T)`
    Default,
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    String(String),
    Char(char),
}

impl Literal {
    pub fn as_integer(&self) -> Option<i128> {
        match self {
            Self::Int(v) => Some(i128::from(*v)),
            Self::UInt(v) => Some(i128::from(*v)),
            Self::Char(c) => Some(i128::from(u32::from(*c))),
            Self::Bool(b) => Some(i128::from(*b)),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamModifier {
    Ref,
    Out,
    In,
    Params,
    /// Receiver of an extension method.
    This,
}

impl ParamModifier {
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Ref => "ref",
            Self::Out => "out",
            Self::In => "in",
            Self::Params => "params",
            Self::This => "this",
        }
    }

    /// Whether the modifier passes the argument by reference.
    pub fn is_by_ref(self) -> bool {
        matches!(self, Self::Ref | Self::Out | Self::In)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub ty: TypeRef,
    pub default: Option<Literal>,
    pub modifier: Option<ParamModifier>,
}

/// Property or indexer accessor. Variant order is the rendering order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accessor {
    Get,
    Set,
    Init,
}

impl Accessor {
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Set => "set",
            Self::Init => "init",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MemberKind {
    Method,
    Constructor,
    Property,
    Indexer,
    Field,
    Event,
    Operator,
    Unknown,
}

impl MemberKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Method => "method",
            Self::Constructor => "constructor",
            Self::Property => "property",
            Self::Indexer => "indexer",
            Self::Field => "field",
            Self::Event => "event",
            Self::Operator => "operator",
            Self::Unknown => "member",
        }
    }
}

/// Return type plus parameters of a delegate.
#[derive(Debug, Clone, PartialEq)]
pub struct Signature {
    /// `None` means `void`.
    pub return_type: Option<TypeRef>,
    pub parameters: Vec<Parameter>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemberDescriptor {
    /// Qualified name of the owning type. A back-reference only.
    pub owner: String,
    pub kind: MemberKind,
    pub name: String,
    pub accessibility: Accessibility,
    pub modifiers: BTreeSet<Modifier>,
    pub generic_params: Vec<GenericParam>,
    pub parameters: Vec<Parameter>,
    /// Return type for methods and operators, value type for everything else.
    /// `None` means `void`.
    pub ty: Option<TypeRef>,
    pub accessors: BTreeSet<Accessor>,
    pub explicit_interface: Option<TypeRef>,
    pub constant: Option<Literal>,
}

impl MemberDescriptor {
    pub fn has(&self, modifier: Modifier) -> bool {
        self.modifiers.contains(&modifier)
    }

    pub fn is_static(&self) -> bool {
        self.has(Modifier::Static) || self.has(Modifier::Const)
    }

    pub fn is_explicit(&self) -> bool {
        self.explicit_interface.is_some()
    }

    pub fn generic_arity(&self) -> usize {
        self.generic_params.len()
    }

    pub fn is_extension(&self) -> bool {
        self.kind == MemberKind::Method
            && self
                .parameters
                .first()
                .is_some_and(|p| p.modifier == Some(ParamModifier::This))
    }

    /// `Owner.Name`, for messages.
    pub fn display_path(&self) -> String {
        let name = match self.kind {
            MemberKind::Constructor => ".ctor",
            MemberKind::Indexer => "this[]",
            _ => self.name.as_str(),
        };
        if self.owner.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", self.owner, name)
        }
    }

    /// All type references in the member's signature.
    pub fn type_refs(&self) -> impl Iterator<Item = &TypeRef> {
        self.ty
            .iter()
            .chain(self.parameters.iter().map(|p| &p.ty))
            .chain(self.explicit_interface.iter())
            .chain(self.generic_params.iter().flat_map(constraint_types))
    }
}

fn constraint_types(param: &GenericParam) -> impl Iterator<Item = &TypeRef> {
    param.constraints.iter().filter_map(|c| match c {
        Constraint::Type(ty) => Some(ty),
        _ => None,
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeDescriptor {
    /// Namespace segments; empty for the global namespace.
    pub namespace: Vec<String>,
    /// Names of enclosing types, outermost first; empty for top-level types.
    pub declaring: Vec<String>,
    pub name: String,
    pub kind: TypeKind,
    pub accessibility: Accessibility,
    pub modifiers: BTreeSet<TypeModifier>,
    pub generic_params: Vec<GenericParam>,
    pub base_type: Option<TypeRef>,
    /// Declared order is kept.
    pub interfaces: Vec<TypeRef>,
    pub members: Vec<MemberDescriptor>,
    pub nested_types: Vec<TypeDescriptor>,
    /// Enum backing type; `None` means `int`.
    pub underlying_type: Option<TypeRef>,
    /// Delegate signature (delegates only).
    pub delegate: Option<Signature>,
}

impl TypeDescriptor {
    pub fn has(&self, modifier: TypeModifier) -> bool {
        self.modifiers.contains(&modifier)
    }

    pub fn generic_arity(&self) -> usize {
        self.generic_params.len()
    }

    /// Dotted name through namespace and enclosing types.
    pub fn qualified_name(&self) -> String {
        self.namespace
            .iter()
            .chain(self.declaring.iter())
            .map(String::as_str)
            .chain(std::iter::once(self.name.as_str()))
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Count of this type and all nested types.
    pub fn type_count(&self) -> usize {
        1 + self
            .nested_types
            .iter()
            .map(TypeDescriptor::type_count)
            .sum::<usize>()
    }

    /// Count of members declared here and on nested types.
    pub fn member_count(&self) -> usize {
        self.members.len()
            + self
                .nested_types
                .iter()
                .map(TypeDescriptor::member_count)
                .sum::<usize>()
    }
}
