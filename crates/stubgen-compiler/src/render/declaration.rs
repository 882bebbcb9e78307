//! Namespace blocks and type declarations.

use std::collections::BTreeMap;

use stubgen_core::utils::compare_names;
use stubgen_core::{
    Constraint, GenericParam, MemberKind, TypeDescriptor, TypeKind, TypeModifier, TypeRef, Variance,
};

use super::naming::{identifier, keyword_of, type_name};
use super::order::Chunk;
use super::{Renderer, indent};

/// Types grouped by namespace path.
#[derive(Debug, Default)]
pub(super) struct NamespaceNode<'a> {
    children: BTreeMap<&'a str, NamespaceNode<'a>>,
    types: Vec<&'a TypeDescriptor>,
}

impl<'a> NamespaceNode<'a> {
    pub(super) fn build(types: &'a [TypeDescriptor]) -> Self {
        let mut root = Self::default();
        for ty in types {
            root.insert(&ty.namespace, ty);
        }
        root
    }

    fn insert(&mut self, path: &'a [String], ty: &'a TypeDescriptor) {
        match path.split_first() {
            None => self.types.push(ty),
            Some((head, rest)) => self
                .children
                .entry(head.as_str())
                .or_default()
                .insert(rest, ty),
        }
    }
}

impl Renderer<'_> {
    /// Sorted declarations of one namespace: child namespaces and types interleaved.
    pub(super) fn scope_chunks(&self, node: &NamespaceNode<'_>, depth: usize) -> Vec<Chunk> {
        let mut chunks: Vec<Chunk> = node
            .children
            .iter()
            .map(|(name, child)| self.namespace_chunk(name, child, depth))
            .chain(node.types.iter().map(|ty| self.type_chunk(ty, depth)))
            .collect();
        chunks.sort();
        chunks
    }

    fn namespace_chunk(&self, name: &str, node: &NamespaceNode<'_>, depth: usize) -> Chunk {
        let c = self.c();
        let pad = indent(depth);
        let mut text = format!(
            "{pad}{} {}\n{pad}{{\n",
            c.paint(c.keyword, "namespace"),
            identifier(name)
        );
        for chunk in self.scope_chunks(node, depth + 1) {
            text.push_str(&chunk.text);
        }
        text.push_str(&format!("{pad}}}\n"));
        Chunk::namespace(name, text)
    }

    pub(super) fn type_chunk(&self, ty: &TypeDescriptor, depth: usize) -> Chunk {
        let text = match ty.kind {
            TypeKind::Delegate => self.delegate_declaration(ty, depth),
            TypeKind::Enum => self.enum_declaration(ty, depth),
            _ => self.composite_declaration(ty, depth),
        };
        Chunk::declaration(ty, text)
    }

    fn composite_declaration(&self, ty: &TypeDescriptor, depth: usize) -> String {
        let pad = indent(depth);
        let mut body: Vec<Chunk> = ty
            .members
            .iter()
            .map(|m| self.member_chunk(ty, m, depth + 1))
            .chain(ty.nested_types.iter().map(|n| self.type_chunk(n, depth + 1)))
            .collect();
        body.sort();

        let mut text = format!("{pad}{}\n{pad}{{\n", self.type_header(ty));
        for chunk in body {
            text.push_str(&chunk.text);
        }
        text.push_str(&format!("{pad}}}\n"));
        text
    }

    fn enum_declaration(&self, ty: &TypeDescriptor, depth: usize) -> String {
        let c = self.c();
        let pad = indent(depth);
        let inner = indent(depth + 1);

        let mut values: Vec<(i128, &str)> = ty
            .members
            .iter()
            .filter(|m| m.kind == MemberKind::Field)
            .filter_map(|m| Some((m.constant.as_ref()?.as_integer()?, m.name.as_str())))
            .collect();
        values.sort_by(|a, b| {
            a.0.cmp(&b.0)
                .then_with(|| compare_names(a.1, b.1))
        });

        let mut text = format!("{pad}{}\n{pad}{{\n", self.type_header(ty));
        for (value, name) in values {
            text.push_str(&format!(
                "{inner}{} = {},\n",
                identifier(name),
                c.paint(c.literal, &value.to_string())
            ));
        }
        text.push_str(&format!("{pad}}}\n"));
        text
    }

    fn delegate_declaration(&self, ty: &TypeDescriptor, depth: usize) -> String {
        let c = self.c();
        let (ret, params) = match &ty.delegate {
            Some(sig) => (
                sig.return_type
                    .as_ref()
                    .map_or_else(|| "void".to_string(), type_name),
                self.parameter_list(&sig.parameters),
            ),
            None => ("void".to_string(), String::new()),
        };
        format!(
            "{}{} delegate {ret} {}{}({params}){};\n",
            indent(depth),
            ty.accessibility.keyword(),
            c.paint(c.declared, &identifier(&ty.name)),
            generic_list(&ty.generic_params, true),
            where_clauses(&ty.generic_params),
        )
    }

    /// `public static partial class Name<T> : Base, IFace where T : new()`
    fn type_header(&self, ty: &TypeDescriptor) -> String {
        let c = self.c();
        let mut words = vec![ty.accessibility.keyword().to_string()];
        words.extend(type_modifiers(ty).into_iter().map(str::to_string));
        if is_extension_container(ty) {
            words.push("partial".to_string());
        }
        words.push(ty.kind.keyword().to_string());

        let variance = ty.kind == TypeKind::Interface;
        let mut header = format!(
            "{} {}{}",
            words.join(" "),
            c.paint(c.declared, &identifier(&ty.name)),
            generic_list(&ty.generic_params, variance)
        );

        let bases = base_list(ty);
        if !bases.is_empty() {
            header.push_str(" : ");
            header.push_str(&bases.join(", "));
        }
        header.push_str(&where_clauses(&ty.generic_params));
        header
    }
}

/// Type modifiers valid for the kind. Abstract plus sealed is how metadata
/// spells a static class.
fn type_modifiers(ty: &TypeDescriptor) -> Vec<&'static str> {
    match ty.kind {
        TypeKind::Class => {
            let is_static = ty.has(TypeModifier::Static)
                || (ty.has(TypeModifier::Abstract) && ty.has(TypeModifier::Sealed));
            if is_static {
                return vec![TypeModifier::Static.keyword()];
            }
            ty.modifiers
                .iter()
                .filter(|m| matches!(m, TypeModifier::Abstract | TypeModifier::Sealed))
                .map(|m| m.keyword())
                .collect()
        }
        TypeKind::Struct => ty
            .modifiers
            .iter()
            .filter(|m| matches!(m, TypeModifier::Readonly | TypeModifier::Ref))
            .map(|m| m.keyword())
            .collect(),
        _ => Vec::new(),
    }
}

/// Static classes declaring extension methods are emitted `partial`.
fn is_extension_container(ty: &TypeDescriptor) -> bool {
    ty.kind == TypeKind::Class
        && type_modifiers(ty).contains(&"static")
        && ty.members.iter().any(|m| m.is_extension())
}

fn base_list(ty: &TypeDescriptor) -> Vec<String> {
    let mut bases = Vec::new();
    match ty.kind {
        TypeKind::Class => {
            if let Some(base) = &ty.base_type
                && !is_named(base, "System.Object")
            {
                bases.push(type_name(base));
            }
            bases.extend(ty.interfaces.iter().map(type_name));
        }
        TypeKind::Struct | TypeKind::Interface => {
            bases.extend(ty.interfaces.iter().map(type_name));
        }
        TypeKind::Enum => {
            if let Some(underlying) = &ty.underlying_type
                && keyword_of(underlying) != Some("int")
            {
                bases.push(type_name(underlying));
            }
        }
        TypeKind::Delegate | TypeKind::Unknown => {}
    }
    bases
}

fn is_named(ty: &TypeRef, expected: &str) -> bool {
    matches!(ty, TypeRef::Named { name, args } if name == expected && args.is_empty())
}

/// `<T, out U>`; variance only where the declaration allows it.
pub(super) fn generic_list(params: &[GenericParam], variance: bool) -> String {
    if params.is_empty() {
        return String::new();
    }
    let names: Vec<_> = params
        .iter()
        .map(|p| {
            let prefix = match p.variance {
                Some(Variance::In) if variance => "in ",
                Some(Variance::Out) if variance => "out ",
                _ => "",
            };
            format!("{prefix}{}", identifier(&p.name))
        })
        .collect();
    format!("<{}>", names.join(", "))
}

/// ` where T : class, System.IDisposable, new()` for every constrained parameter.
pub(super) fn where_clauses(params: &[GenericParam]) -> String {
    let mut out = String::new();
    for param in params {
        let mut constraints: Vec<&Constraint> = param.constraints.iter().collect();
        let value_type = constraints
            .iter()
            .any(|c| matches!(c, Constraint::Struct | Constraint::Unmanaged));
        if value_type {
            constraints.retain(|c| !matches!(c, Constraint::New));
        }
        if constraints.is_empty() {
            continue;
        }
        constraints.sort_by_key(|c| c.rank());
        let spelled: Vec<_> = constraints.into_iter().map(constraint).collect();
        out.push_str(&format!(
            " where {} : {}",
            identifier(&param.name),
            spelled.join(", ")
        ));
    }
    out
}

fn constraint(c: &Constraint) -> String {
    match c {
        Constraint::Class => "class".to_string(),
        Constraint::Struct => "struct".to_string(),
        Constraint::Unmanaged => "unmanaged".to_string(),
        Constraint::NotNull => "notnull".to_string(),
        Constraint::New => "new()".to_string(),
        Constraint::Type(ty) => type_name(ty),
    }
}
