//! Semantic tree: resolved sections keyed by `(module, name)`
//!
//! Typedefs refer to each other by [`SectionKey`] rather than by reference, so cyclic typedefs
//! are plain map entries.

use std::fmt;

use arf_core::Permissions;
use arf_core::lang::primitives::{self, PrimitiveId};
use indexmap::IndexMap;

use crate::frontend::ast::{Literal, Position};

/// Identifies a section across modules.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SectionKey {
    pub module: String,
    pub name: String,
}

impl SectionKey {
    pub fn new(module: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.module, self.name)
    }
}

// ============================================================================
// Types
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedTypeKind {
    Primitive(PrimitiveId),
    Typedef(SectionKey),
    Pointer { points_to: Box<ResolvedType>, items: u64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedType {
    pub kind: ResolvedTypeKind,
    pub mutable: bool,
}

impl ResolvedType {
    pub fn primitive(id: PrimitiveId) -> Self {
        Self {
            kind: ResolvedTypeKind::Primitive(id),
            mutable: false,
        }
    }

    pub fn typedef(key: SectionKey) -> Self {
        Self {
            kind: ResolvedTypeKind::Typedef(key),
            mutable: false,
        }
    }

    pub fn pointer(points_to: ResolvedType, items: u64) -> Self {
        Self {
            kind: ResolvedTypeKind::Pointer {
                points_to: Box::new(points_to),
                items,
            },
            mutable: false,
        }
    }

    /// The typedef this type names, looking through pointers.
    pub fn typedef_key(&self) -> Option<&SectionKey> {
        match &self.kind {
            ResolvedTypeKind::Typedef(key) => Some(key),
            ResolvedTypeKind::Pointer { points_to, .. } => points_to.typedef_key(),
            ResolvedTypeKind::Primitive(_) => None,
        }
    }
}

impl fmt::Display for ResolvedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ResolvedTypeKind::Primitive(id) => write!(f, "{}", primitives::as_str(*id))?,
            ResolvedTypeKind::Typedef(key) => write!(f, "{key}")?,
            ResolvedTypeKind::Pointer { points_to, items } if *items == 1 => write!(f, "{{{points_to}}}")?,
            ResolvedTypeKind::Pointer { points_to, items } => write!(f, "{{{points_to} {items}}}")?,
        }
        if self.mutable {
            write!(f, ":mut")?;
        }
        Ok(())
    }
}

/// Render an optional type, marking ones that failed to resolve.
fn show(ty: &Option<ResolvedType>) -> String {
    match ty {
        Some(ty) => ty.to_string(),
        None => "<unresolved>".to_string(),
    }
}

// ============================================================================
// Sections
// ============================================================================

/// A data section, typedef member, or function input/output with its type resolved.
///
/// `ty` is `None` when the type could not be resolved; the error has been reported.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedData {
    pub position: Position,
    pub name: String,
    pub permissions: Permissions,
    pub ty: Option<ResolvedType>,
    pub values: Vec<Literal>,
    pub external: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTypedef {
    pub position: Position,
    pub key: SectionKey,
    pub permissions: Permissions,
    pub inherits: Option<ResolvedType>,
    pub members: IndexMap<String, ResolvedData>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedReceiver {
    pub name: String,
    pub ty: Option<ResolvedType>,
}

/// A function signature; bodies are not analyzed.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedFunction {
    pub position: Position,
    pub key: SectionKey,
    pub permissions: Permissions,
    pub receiver: Option<ResolvedReceiver>,
    pub inputs: IndexMap<String, ResolvedData>,
    pub outputs: IndexMap<String, ResolvedData>,
}

// ============================================================================
// Tree
// ============================================================================

/// Everything the analyzer resolved, in resolution order.
///
/// An empty map means nothing of that kind was resolved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SemanticTree {
    pub typedefs: IndexMap<SectionKey, ResolvedTypedef>,
    pub datas: IndexMap<SectionKey, ResolvedData>,
    pub functions: IndexMap<SectionKey, ResolvedFunction>,
}

impl SemanticTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn typedef(&self, module: &str, name: &str) -> Option<&ResolvedTypedef> {
        self.typedefs.get(&SectionKey::new(module, name))
    }

    pub fn data(&self, module: &str, name: &str) -> Option<&ResolvedData> {
        self.datas.get(&SectionKey::new(module, name))
    }

    pub fn function(&self, module: &str, name: &str) -> Option<&ResolvedFunction> {
        self.functions.get(&SectionKey::new(module, name))
    }

    pub fn is_empty(&self) -> bool {
        self.typedefs.is_empty() && self.datas.is_empty() && self.functions.is_empty()
    }
}

impl fmt::Display for SemanticTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for typedef in self.typedefs.values() {
            writeln!(f, "typedef {} {}", typedef.key, typedef.permissions)?;
            writeln!(f, "  inherits {}", show(&typedef.inherits))?;
            for member in typedef.members.values() {
                writeln!(f, "  member {} {} {}", member.name, member.permissions, show(&member.ty))?;
            }
        }
        for (key, data) in &self.datas {
            write!(f, "data {key} {} {}", data.permissions, show(&data.ty))?;
            if data.external {
                write!(f, " external")?;
            }
            writeln!(f)?;
        }
        for function in self.functions.values() {
            writeln!(f, "func {} {}", function.key, function.permissions)?;
            if let Some(receiver) = &function.receiver {
                writeln!(f, "  @ {} {}", receiver.name, show(&receiver.ty))?;
            }
            for input in function.inputs.values() {
                writeln!(f, "  > {} {}", input.name, show(&input.ty))?;
            }
            for output in function.outputs.values() {
                writeln!(f, "  < {} {}", output.name, show(&output.ty))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolved_type_display() {
        let mut ty = ResolvedType::pointer(ResolvedType::typedef(SectionKey::new("shapes", "Point")), 4);
        ty.mutable = true;
        assert_eq!(ty.to_string(), "{shapes.Point 4}:mut");
        assert_eq!(ResolvedType::primitive(PrimitiveId::U8).to_string(), "U8");
    }

    #[test]
    fn test_typedef_key_looks_through_pointers() {
        let key = SectionKey::new("shapes", "Point");
        let ty = ResolvedType::pointer(ResolvedType::pointer(ResolvedType::typedef(key.clone()), 1), 1);
        assert_eq!(ty.typedef_key(), Some(&key));
        assert_eq!(ResolvedType::primitive(PrimitiveId::Int).typedef_key(), None);
    }
}
