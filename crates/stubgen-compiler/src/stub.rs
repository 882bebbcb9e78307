//! Placeholder bodies.
//!
//! Every executable member gets a body that raises on first use, so
//! analysis can read signatures but nothing can silently run.

use stubgen_core::{
    Accessor, Colors, MemberDescriptor, MemberKind, Modifier, TypeDescriptor, TypeKind,
};

use crate::config::Sentinel;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StubBody {
    /// `;`
    None,
    /// ` => throw null;`
    Expression,
    /// ` { get => throw null; set => throw null; }`, or ` { get; set; }`
    /// where no bodies are allowed.
    Accessors {
        accessors: Vec<Accessor>,
        bodies: bool,
    },
    /// ` { add => throw null; remove => throw null; }`
    EventAccessors,
}

impl StubBody {
    pub fn for_member(owner: &TypeDescriptor, member: &MemberDescriptor) -> Self {
        let bodies = needs_body(owner, member);
        match member.kind {
            MemberKind::Property | MemberKind::Indexer => Self::Accessors {
                accessors: member.accessors.iter().copied().collect(),
                bodies,
            },
            MemberKind::Event if bodies => Self::EventAccessors,
            MemberKind::Method | MemberKind::Constructor | MemberKind::Operator if bodies => {
                Self::Expression
            }
            _ => Self::None,
        }
    }

    pub fn render(&self, sentinel: Sentinel, colors: Colors) -> String {
        let throw = colors.paint(colors.sentinel, sentinel.expression());
        match self {
            Self::None => ";".to_string(),
            Self::Expression => format!(" => {throw};"),
            Self::Accessors { accessors, bodies } => {
                let parts: Vec<_> = accessors
                    .iter()
                    .map(|a| {
                        if *bodies {
                            format!("{} => {throw};", a.keyword())
                        } else {
                            format!("{};", a.keyword())
                        }
                    })
                    .collect();
                format!(" {{ {} }}", parts.join(" "))
            }
            Self::EventAccessors => format!(" {{ add => {throw}; remove => {throw}; }}"),
        }
    }
}

/// Whether a member may carry a body at all.
///
/// Fields never do. Abstract and extern members never do. Interface
/// members only do when static and not abstract; operators are always
/// static.
pub fn needs_body(owner: &TypeDescriptor, member: &MemberDescriptor) -> bool {
    if matches!(member.kind, MemberKind::Field | MemberKind::Unknown) {
        return false;
    }
    if member.has(Modifier::Abstract) || member.has(Modifier::Extern) {
        return false;
    }
    if owner.kind == TypeKind::Interface {
        return member.is_explicit()
            || member.has(Modifier::Static)
            || member.kind == MemberKind::Operator;
    }
    true
}
