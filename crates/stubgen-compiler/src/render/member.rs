//! Member signature lines.

use stubgen_core::{
    MemberDescriptor, MemberKind, Modifier, Parameter, TypeDescriptor, TypeKind, TypeRef,
};

use super::declaration::{generic_list, where_clauses};
use super::literal::literal;
use super::naming::{OperatorSpelling, identifier, operator_spelling, type_name};
use super::order::Chunk;
use super::{Renderer, indent};
use crate::stub::StubBody;

impl Renderer<'_> {
    pub(super) fn member_chunk(
        &self,
        owner: &TypeDescriptor,
        member: &MemberDescriptor,
        depth: usize,
    ) -> Chunk {
        let line = self.member_line(owner, member);
        Chunk::member(member, format!("{}{line}\n", indent(depth)))
    }

    fn member_line(&self, owner: &TypeDescriptor, m: &MemberDescriptor) -> String {
        let prefix = prefix(owner, m);
        let body = StubBody::for_member(owner, m).render(self.config.sentinel, self.c());
        let ty = || value_type(m.ty.as_ref());

        match m.kind {
            MemberKind::Method => format!(
                "{prefix}{} {}{}({}){}{body}",
                ty(),
                member_name(m),
                generic_list(&m.generic_params, false),
                self.parameter_list(&m.parameters),
                method_constraints(m),
            ),
            MemberKind::Constructor => format!(
                "{prefix}{}({}){body}",
                identifier(&owner.name),
                self.parameter_list(&m.parameters),
            ),
            MemberKind::Property => format!("{prefix}{} {}{body}", ty(), member_name(m)),
            MemberKind::Indexer => format!(
                "{prefix}{} {}this[{}]{body}",
                ty(),
                explicit_prefix(m),
                self.parameter_list(&m.parameters),
            ),
            MemberKind::Field => format!(
                "{prefix}{} {}{};",
                ty(),
                identifier(&m.name),
                self.constant_initializer(m)
            ),
            MemberKind::Event => format!("{prefix}event {} {}{body}", ty(), member_name(m)),
            MemberKind::Operator => self.operator_line(&prefix, m, &body),
            MemberKind::Unknown => format!("// unsupported member {}", m.display_path()),
        }
    }

    fn operator_line(&self, prefix: &str, m: &MemberDescriptor, body: &str) -> String {
        let ret = value_type(m.ty.as_ref());
        let params = self.parameter_list(&m.parameters);
        let explicit = explicit_prefix(m);
        match operator_spelling(&m.name) {
            Some(OperatorSpelling::Conversion(direction)) => {
                format!("{prefix}{direction} {explicit}operator {ret}({params}){body}")
            }
            Some(OperatorSpelling::Token(token)) => {
                format!("{prefix}{ret} {explicit}operator {token}({params}){body}")
            }
            None => format!("// unsupported operator {}", m.display_path()),
        }
    }

    fn constant_initializer(&self, m: &MemberDescriptor) -> String {
        if !m.has(Modifier::Const) {
            return String::new();
        }
        let c = self.c();
        let value = match (&m.constant, &m.ty) {
            (Some(constant), Some(ty)) => literal(constant, ty),
            _ => "default".to_string(),
        };
        format!(" = {}", c.paint(c.literal, &value))
    }

    pub(super) fn parameter_list(&self, params: &[Parameter]) -> String {
        params
            .iter()
            .enumerate()
            .map(|(i, p)| self.parameter(i, p))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn parameter(&self, index: usize, p: &Parameter) -> String {
        let c = self.c();
        let mut out = String::new();
        if let Some(modifier) = p.modifier {
            out.push_str(modifier.keyword());
            out.push(' ');
        }
        out.push_str(&type_name(&p.ty));
        out.push(' ');
        if p.name.is_empty() {
            out.push_str(&format!("arg{index}"));
        } else {
            out.push_str(&identifier(&p.name));
        }
        if let Some(default) = &p.default {
            out.push_str(" = ");
            out.push_str(&c.paint(c.literal, &literal(default, &p.ty)));
        }
        out
    }
}

/// Accessibility and modifiers, with a trailing space when non-empty.
///
/// Explicit implementations carry neither (only `static` for static
/// interface members). Instance interface members carry nothing.
fn prefix(owner: &TypeDescriptor, m: &MemberDescriptor) -> String {
    let mut words: Vec<&str> = Vec::new();
    let in_interface = owner.kind == TypeKind::Interface;
    let instance_interface_member =
        in_interface && !m.has(Modifier::Static) && m.kind != MemberKind::Operator;

    if m.is_explicit() {
        if m.has(Modifier::Static) || m.kind == MemberKind::Operator {
            words.push(Modifier::Static.keyword());
        }
    } else if !instance_interface_member {
        let static_ctor = m.kind == MemberKind::Constructor && m.has(Modifier::Static);
        if !in_interface && !static_ctor {
            words.push(m.accessibility.keyword());
        }
        if m.kind == MemberKind::Operator && !m.has(Modifier::Static) {
            words.push(Modifier::Static.keyword());
        }
        for modifier in &m.modifiers {
            if *modifier == Modifier::Static && m.has(Modifier::Const) {
                continue;
            }
            words.push(modifier.keyword());
        }
    }

    if words.is_empty() {
        String::new()
    } else {
        format!("{} ", words.join(" "))
    }
}

fn value_type(ty: Option<&TypeRef>) -> String {
    ty.map_or_else(|| "void".to_string(), type_name)
}

/// `IFace.` for explicit implementations, empty otherwise.
fn explicit_prefix(m: &MemberDescriptor) -> String {
    match &m.explicit_interface {
        Some(iface) => format!("{}.", type_name(iface)),
        None => String::new(),
    }
}

fn member_name(m: &MemberDescriptor) -> String {
    format!("{}{}", explicit_prefix(m), identifier(&m.name))
}

/// Overrides and explicit implementations inherit their constraints.
fn method_constraints(m: &MemberDescriptor) -> String {
    if m.is_explicit() || m.has(Modifier::Override) {
        return String::new();
    }
    where_clauses(&m.generic_params)
}
