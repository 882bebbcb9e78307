//! Canonical ordering and signature identity.
//!
//! Output order must not depend on input order. Every rendered item is
//! sorted by a case-insensitive name with ordinal tie-breaks, ending with
//! the full rendered text so no two distinct items ever compare equal.

use std::cmp::Ordering;

use stubgen_core::utils::compare_names;
use stubgen_core::{MemberDescriptor, MemberKind, TypeDescriptor};

use super::naming::{OperatorSpelling, operator_spelling, type_name};

/// A rendered member line or nested declaration, with its sort key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub name: String,
    pub explicit: bool,
    pub arity: usize,
    pub params: usize,
    pub text: String,
}

impl Chunk {
    pub fn member(member: &MemberDescriptor, text: String) -> Self {
        Self {
            name: sort_name(member).to_string(),
            explicit: member.is_explicit(),
            arity: member.generic_arity(),
            params: member.parameters.len(),
            text,
        }
    }

    pub fn declaration(ty: &TypeDescriptor, text: String) -> Self {
        Self {
            name: ty.name.clone(),
            explicit: false,
            arity: ty.generic_arity(),
            params: 0,
            text,
        }
    }

    pub fn namespace(name: &str, text: String) -> Self {
        Self {
            name: name.to_string(),
            explicit: false,
            arity: 0,
            params: 0,
            text,
        }
    }
}

impl Ord for Chunk {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_names(&self.name, &other.name)
            .then(self.explicit.cmp(&other.explicit))
            .then(self.arity.cmp(&other.arity))
            .then(self.params.cmp(&other.params))
            .then_with(|| self.text.cmp(&other.text))
    }
}

impl PartialOrd for Chunk {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Name a member sorts under: constructors as `ctor`, indexers as `this`.
pub fn sort_name(member: &MemberDescriptor) -> &str {
    match member.kind {
        MemberKind::Constructor => "ctor",
        MemberKind::Indexer => "this",
        _ => &member.name,
    }
}

/// Order members by their sort key alone, before anything is rendered.
pub fn compare_members(a: &MemberDescriptor, b: &MemberDescriptor) -> Ordering {
    compare_names(sort_name(a), sort_name(b))
        .then(a.is_explicit().cmp(&b.is_explicit()))
        .then(a.generic_arity().cmp(&b.generic_arity()))
        .then(a.parameters.len().cmp(&b.parameters.len()))
}

pub fn compare_types(a: &TypeDescriptor, b: &TypeDescriptor) -> Ordering {
    compare_names(&a.name, &b.name).then(a.generic_arity().cmp(&b.generic_arity()))
}

/// Readable signature used in duplicate reports: `Read<1>(int, ref byte[])`.
pub fn signature(member: &MemberDescriptor) -> String {
    let mut out = String::new();
    if let Some(iface) = &member.explicit_interface {
        out.push_str(&type_name(iface));
        out.push('.');
    }
    out.push_str(match member.kind {
        MemberKind::Constructor => ".ctor",
        MemberKind::Indexer => "this",
        _ => member.name.as_str(),
    });
    if member.generic_arity() > 0 {
        out.push_str(&format!("<{}>", member.generic_arity()));
    }
    if takes_parameters(member.kind) {
        let params: Vec<_> = member
            .parameters
            .iter()
            .map(|p| {
                let by_ref = p.modifier.is_some_and(|m| m.is_by_ref());
                format!("{}{}", if by_ref { "ref " } else { "" }, type_name(&p.ty))
            })
            .collect();
        out.push('(');
        out.push_str(&params.join(", "));
        out.push(')');
    }
    if member.kind == MemberKind::Operator
        && matches!(
            operator_spelling(&member.name),
            Some(OperatorSpelling::Conversion(_))
        )
        && let Some(ty) = &member.ty
    {
        out.push_str(" -> ");
        out.push_str(&type_name(ty));
    }
    out
}

/// Identity of a member within its type. Two members with equal keys
/// cannot both be declared.
///
/// Fields, properties and events share one name space.
pub fn signature_key(member: &MemberDescriptor) -> String {
    let class = match member.kind {
        MemberKind::Method => "method",
        MemberKind::Constructor if member.is_static() => "cctor",
        MemberKind::Constructor => "ctor",
        MemberKind::Property | MemberKind::Field | MemberKind::Event => "value",
        MemberKind::Indexer => "indexer",
        MemberKind::Operator => "operator",
        MemberKind::Unknown => "unknown",
    };
    format!("{class}:{}", signature(member))
}

fn takes_parameters(kind: MemberKind) -> bool {
    matches!(
        kind,
        MemberKind::Method | MemberKind::Constructor | MemberKind::Indexer | MemberKind::Operator
    )
}
