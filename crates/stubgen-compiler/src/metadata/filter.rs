//! Visibility filtering, validation and de-duplication.

use indexmap::IndexMap;
use indexmap::map::Entry;
use stubgen_core::{
    Constraint, GenericParam, Literal, MemberDescriptor, MemberKind, Modifier, TypeDescriptor,
    TypeKind, TypeRef,
};

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::render::naming::{OperatorSpelling, is_integral, keyword_of, operator_spelling};
use crate::render::order::{compare_members, compare_types, signature, signature_key};

pub(super) struct Filter<'d> {
    include_protected: bool,
    diagnostics: &'d mut Diagnostics,
}

impl<'d> Filter<'d> {
    pub(super) fn new(include_protected: bool, diagnostics: &'d mut Diagnostics) -> Self {
        Self {
            include_protected,
            diagnostics,
        }
    }

    /// Visible, valid, de-duplicated types of one scope, in canonical order.
    ///
    /// `scope` is the enclosing type's qualified name, empty at top level.
    pub(super) fn types(&mut self, types: Vec<TypeDescriptor>, scope: &str) -> Vec<TypeDescriptor> {
        let mut kept: Vec<TypeDescriptor> =
            types.into_iter().filter_map(|t| self.type_descriptor(t)).collect();
        kept.sort_by(|a, b| {
            a.namespace
                .cmp(&b.namespace)
                .then_with(|| compare_types(a, b))
                .then_with(|| format!("{a:?}").cmp(&format!("{b:?}")))
        });

        let mut unique: IndexMap<(String, usize), TypeDescriptor> = IndexMap::new();
        for ty in kept {
            match unique.entry((ty.qualified_name(), ty.generic_arity())) {
                Entry::Vacant(e) => {
                    e.insert(ty);
                }
                Entry::Occupied(e) => {
                    let location = if scope.is_empty() {
                        scope_label(&e.get().namespace)
                    } else {
                        scope.to_string()
                    };
                    self.diagnostics
                        .report(DiagnosticKind::DuplicateType, location)
                        .message(arity_name(&e.key().0, e.key().1))
                        .emit();
                }
            }
        }
        unique.into_values().collect()
    }

    fn type_descriptor(&mut self, mut ty: TypeDescriptor) -> Option<TypeDescriptor> {
        if !ty.accessibility.is_visible(self.include_protected) {
            tracing::trace!(ty = %ty.qualified_name(), "not visible");
            return None;
        }
        if let Err(reason) = check_type(&ty) {
            self.diagnostics
                .report(DiagnosticKind::UnsupportedConstruct, ty.qualified_name())
                .message(reason)
                .emit();
            return None;
        }
        if let Some(name) = invalid_type_name(&ty) {
            self.diagnostics
                .report(DiagnosticKind::InvalidName, ty.qualified_name())
                .message(name)
                .emit();
            return None;
        }

        let members = std::mem::take(&mut ty.members);
        ty.members = if ty.kind == TypeKind::Delegate {
            Vec::new()
        } else {
            self.members(&ty, members)
        };
        let nested = std::mem::take(&mut ty.nested_types);
        ty.nested_types = self.types(nested, &ty.qualified_name());
        Some(ty)
    }

    fn members(
        &mut self,
        owner: &TypeDescriptor,
        members: Vec<MemberDescriptor>,
    ) -> Vec<MemberDescriptor> {
        let mut kept: Vec<MemberDescriptor> = Vec::with_capacity(members.len());
        for member in members {
            if !self.is_visible(&member) {
                continue;
            }
            if let Err(reason) = check_member(owner, &member) {
                self.diagnostics
                    .report(DiagnosticKind::UnsupportedConstruct, member.display_path())
                    .message(reason)
                    .emit();
                continue;
            }
            match invalid_member_name(&member) {
                Some(name) => self
                    .diagnostics
                    .report(DiagnosticKind::InvalidName, member.display_path())
                    .message(name)
                    .emit(),
                None => kept.push(member),
            }
        }
        kept.sort_by(|a, b| {
            compare_members(a, b).then_with(|| format!("{a:?}").cmp(&format!("{b:?}")))
        });

        let mut unique: IndexMap<String, MemberDescriptor> = IndexMap::new();
        for member in kept {
            match unique.entry(signature_key(&member)) {
                Entry::Vacant(e) => {
                    e.insert(member);
                }
                Entry::Occupied(_) => self
                    .diagnostics
                    .report(DiagnosticKind::DuplicateMember, owner.qualified_name())
                    .message(signature(&member))
                    .emit(),
            }
        }
        unique.into_values().collect()
    }

    /// Explicit interface implementations are private in metadata but part
    /// of the surface callers can reach through the interface. Everything
    /// else, interface members included, goes by its own accessibility.
    fn is_visible(&self, member: &MemberDescriptor) -> bool {
        member.is_explicit() || member.accessibility.is_visible(self.include_protected)
    }
}

fn scope_label(namespace: &[String]) -> String {
    if namespace.is_empty() {
        "<global>".to_string()
    } else {
        namespace.join(".")
    }
}

fn arity_name(name: &str, arity: usize) -> String {
    if arity == 0 {
        name.to_string()
    } else {
        format!("{name}<{}>", ",".repeat(arity - 1))
    }
}

/// Letters, digits and underscores, not starting with a digit.
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c == '_' || c.is_alphabetic())
        && chars.all(|c| c == '_' || c.is_alphanumeric())
}

fn first_invalid<'a>(mut names: impl Iterator<Item = &'a str>) -> Option<String> {
    names.find(|name| !is_identifier(name)).map(str::to_string)
}

fn generic_names(params: &[GenericParam]) -> impl Iterator<Item = &str> {
    params.iter().map(|p| p.name.as_str())
}

fn invalid_type_name(ty: &TypeDescriptor) -> Option<String> {
    let delegate_params = ty
        .delegate
        .iter()
        .flat_map(|sig| sig.parameters.iter())
        .map(|p| p.name.as_str())
        .filter(|name| !name.is_empty());
    let names = ty
        .namespace
        .iter()
        .map(String::as_str)
        .chain(std::iter::once(ty.name.as_str()))
        .chain(generic_names(&ty.generic_params))
        .chain(delegate_params);
    first_invalid(names)
}

/// Constructors and indexers are spelled without their metadata names.
fn invalid_member_name(m: &MemberDescriptor) -> Option<String> {
    let own = match m.kind {
        MemberKind::Constructor | MemberKind::Indexer => None,
        _ => Some(m.name.as_str()),
    };
    let params = m
        .parameters
        .iter()
        .map(|p| p.name.as_str())
        .filter(|name| !name.is_empty());
    first_invalid(own.into_iter().chain(generic_names(&m.generic_params)).chain(params))
}

/// `decimal` has no NaN or infinities to spell.
fn non_finite_decimal(value: Option<&Literal>, ty: Option<&TypeRef>) -> bool {
    matches!(value, Some(Literal::Float(v)) if !v.is_finite())
        && ty.and_then(keyword_of) == Some("decimal")
}

fn first_unsupported<'a>(mut refs: impl Iterator<Item = &'a TypeRef>) -> Option<String> {
    refs.find_map(TypeRef::unsupported)
}

fn check_type(ty: &TypeDescriptor) -> Result<(), String> {
    if ty.kind == TypeKind::Unknown {
        return Err("unrecognized type kind".to_string());
    }
    if ty.name.is_empty() {
        return Err("type without a name".to_string());
    }

    let constraint_refs = ty.generic_params.iter().flat_map(|p| {
        p.constraints.iter().filter_map(|c| match c {
            Constraint::Type(t) => Some(t),
            _ => None,
        })
    });
    let refs = ty
        .base_type
        .iter()
        .chain(ty.interfaces.iter())
        .chain(ty.underlying_type.iter())
        .chain(constraint_refs);
    if let Some(reason) = first_unsupported(refs) {
        return Err(reason);
    }

    match ty.kind {
        TypeKind::Delegate => {
            let Some(sig) = &ty.delegate else {
                return Err("delegate without a signature".to_string());
            };
            let refs = sig
                .return_type
                .iter()
                .chain(sig.parameters.iter().map(|p| &p.ty));
            if let Some(reason) = first_unsupported(refs) {
                return Err(reason);
            }
        }
        TypeKind::Enum => {
            if let Some(underlying) = &ty.underlying_type
                && !is_integral(underlying)
            {
                return Err("enum backing type is not integral".to_string());
            }
        }
        _ => {}
    }
    Ok(())
}

fn check_member(owner: &TypeDescriptor, m: &MemberDescriptor) -> Result<(), String> {
    if m.kind == MemberKind::Unknown {
        return Err("unrecognized member kind".to_string());
    }
    if let Some(reason) = first_unsupported(m.type_refs()) {
        return Err(reason);
    }
    let named = !matches!(m.kind, MemberKind::Constructor | MemberKind::Indexer);
    if named && m.name.is_empty() {
        return Err(format!("{} without a name", m.kind.label()));
    }

    if owner.kind == TypeKind::Enum {
        let integral = m.constant.as_ref().and_then(|c| c.as_integer()).is_some();
        if m.kind != MemberKind::Field || !integral {
            return Err("enum member without an integral value".to_string());
        }
        return Ok(());
    }

    match m.kind {
        MemberKind::Constructor if owner.kind == TypeKind::Interface => {
            return Err("constructor on an interface".to_string());
        }
        MemberKind::Operator => match operator_spelling(&m.name) {
            None => return Err(format!("operator `{}` has no source spelling", m.name)),
            Some(OperatorSpelling::Conversion(_)) if m.ty.as_ref().is_none_or(TypeRef::is_void) => {
                return Err("conversion operator without a target type".to_string());
            }
            _ if owner.kind == TypeKind::Interface
                && !m.has(Modifier::Abstract)
                && !m.has(Modifier::Virtual) =>
            {
                return Err("interface operator is neither abstract nor virtual".to_string());
            }
            _ => {}
        },
        MemberKind::Indexer if m.parameters.is_empty() => {
            return Err("indexer without parameters".to_string());
        }
        _ => {}
    }

    let has_value_type = matches!(
        m.kind,
        MemberKind::Property | MemberKind::Indexer | MemberKind::Field | MemberKind::Event
    );
    if has_value_type && m.ty.is_none() {
        return Err(format!("{} without a type", m.kind.label()));
    }
    if matches!(m.kind, MemberKind::Property | MemberKind::Indexer) && m.accessors.is_empty() {
        return Err(format!("{} without accessors", m.kind.label()));
    }
    if m.kind == MemberKind::Field && m.has(Modifier::Const) && m.has(Modifier::Readonly) {
        return Err("field is both const and readonly".to_string());
    }
    let defaults = m.parameters.iter().map(|p| (p.default.as_ref(), Some(&p.ty)));
    let mut values = std::iter::once((m.constant.as_ref(), m.ty.as_ref())).chain(defaults);
    if values.any(|(value, ty)| non_finite_decimal(value, ty)) {
        return Err("non-finite decimal value".to_string());
    }
    Ok(())
}
