//! Abstract syntax tree definitions for arf.
//!
//! A [`Module`] holds three name-keyed section maps. Maps are [`IndexMap`]s so sections keep source
//! order for rendering while names stay unique.
//!
//! Every node carries a [`Position`]; positions compare equal to each other, so two trees parsed
//! from differently laid out text compare equal when their structure matches.

use std::fmt;
use std::path::PathBuf;

use arf_core::Permissions;
use indexmap::IndexMap;
use thiserror::Error;

pub use crate::source::Position;

// ============================================================================
// Literals
// ============================================================================

/// A decoded literal value.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Integer(u64),
    SignedInteger(i64),
    Float(f64),
    String(String),
    Rune(char),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Integer(value) => write!(f, "{value}"),
            Literal::SignedInteger(value) => write!(f, "{value}"),
            Literal::Float(value) => {
                let text = value.to_string();
                if text.contains('.') {
                    write!(f, "{text}")
                } else {
                    write!(f, "{text}.0")
                }
            }
            Literal::String(value) => write!(f, "{}", quote(value, '"')),
            Literal::Rune(value) => write!(f, "{}", quote(&value.to_string(), '\'')),
        }
    }
}

/// Quote `text` with `delimiter`, escaping it so the lexer reads back the same value.
pub fn quote(text: &str, delimiter: char) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push(delimiter);
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\x07' => out.push_str("\\a"),
            '\x08' => out.push_str("\\b"),
            '\x0c' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\x0b' => out.push_str("\\v"),
            c if c == delimiter => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() && (c as u32) < 0x100 => out.push_str(&format!("\\x{:02x}", c as u32)),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push(delimiter);
    out
}

// ============================================================================
// Names and types
// ============================================================================

/// A dotted name such as `counter` or `geometry.Point`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Identifier {
    pub position: Position,
    pub trail: Vec<String>,
}

impl Identifier {
    pub fn new(position: Position, trail: Vec<String>) -> Self {
        Self { position, trail }
    }

    pub fn single(position: Position, name: impl Into<String>) -> Self {
        Self {
            position,
            trail: vec![name.into()],
        }
    }

    /// Return the name when the identifier has exactly one segment.
    pub fn as_single(&self) -> Option<&str> {
        match self.trail.as_slice() {
            [name] => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.trail.join("."))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeKind {
    /// A typedef or primitive referenced by name.
    Named(Identifier),
    /// `{Type}` or `{Type N}`; the pointer owns its pointee.
    Pointer { points_to: Box<Type>, items: u64 },
}

/// A type specifier with its `:mut` qualifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Type {
    pub position: Position,
    pub kind: TypeKind,
    pub mutable: bool,
}

impl Type {
    pub fn named(position: Position, name: Identifier) -> Self {
        Self {
            position,
            kind: TypeKind::Named(name),
            mutable: false,
        }
    }

    pub fn pointer(position: Position, points_to: Type, items: u64) -> Self {
        Self {
            position,
            kind: TypeKind::Pointer {
                points_to: Box::new(points_to),
                items,
            },
            mutable: false,
        }
    }

    pub fn is_pointer(&self) -> bool {
        matches!(self.kind, TypeKind::Pointer { .. })
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TypeKind::Named(name) => write!(f, "{name}")?,
            TypeKind::Pointer { points_to, items } if *items == 1 => write!(f, "{{{points_to}}}")?,
            TypeKind::Pointer { points_to, items } => write!(f, "{{{points_to} {items}}}")?,
        }
        if self.mutable {
            write!(f, ":mut")?;
        }
        Ok(())
    }
}

// ============================================================================
// Sections
// ============================================================================

/// A data section, a typedef member, or a function input/output.
#[derive(Debug, Clone, PartialEq)]
pub struct Data {
    pub position: Position,
    pub name: String,
    pub permissions: Permissions,
    pub ty: Type,
    pub values: Vec<Literal>,
    /// Defined in another object; set by the word `external` in value position.
    pub external: bool,
}

impl Data {
    pub fn new(position: Position, name: impl Into<String>, permissions: Permissions, ty: Type) -> Self {
        Self {
            position,
            name: name.into(),
            permissions,
            ty,
            values: Vec::new(),
            external: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Typedef {
    pub position: Position,
    pub name: String,
    pub permissions: Permissions,
    pub inherits: Type,
    pub members: IndexMap<String, Data>,
}

impl Typedef {
    pub fn new(position: Position, name: impl Into<String>, permissions: Permissions, inherits: Type) -> Self {
        Self {
            position,
            name: name.into(),
            permissions,
            inherits,
            members: IndexMap::new(),
        }
    }

    /// Add a member, keeping the first one when the name is taken.
    pub fn add_member(&mut self, member: Data) -> Result<(), AlreadyExists> {
        insert_unique(&mut self.members, member.name.clone(), member, "member")
    }
}

/// The `@ name:{Type}` line of a method.
#[derive(Debug, Clone, PartialEq)]
pub struct Receiver {
    pub position: Position,
    pub name: String,
    pub ty: Type,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub position: Position,
    pub name: String,
    pub permissions: Permissions,
    pub receiver: Option<Receiver>,
    pub inputs: IndexMap<String, Data>,
    pub outputs: IndexMap<String, Data>,
    pub root: Block,
}

impl Function {
    pub fn new(position: Position, name: impl Into<String>, permissions: Permissions) -> Self {
        Self {
            position,
            name: name.into(),
            permissions,
            receiver: None,
            inputs: IndexMap::new(),
            outputs: IndexMap::new(),
            root: Block::default(),
        }
    }

    /// A function with a receiver is a method of the receiver's type.
    pub fn is_member(&self) -> bool {
        self.receiver.is_some()
    }

    pub fn add_input(&mut self, input: Data) -> Result<(), AlreadyExists> {
        insert_unique(&mut self.inputs, input.name.clone(), input, "input")
    }

    pub fn add_output(&mut self, output: Data) -> Result<(), AlreadyExists> {
        insert_unique(&mut self.outputs, output.name.clone(), output, "output")
    }
}

// ============================================================================
// Function bodies
// ============================================================================

/// A variable introduced by an inline `name:Type` definition.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub position: Position,
    pub name: String,
    pub ty: Type,
}

/// A scope plus the statements and nested blocks in it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub position: Position,
    pub variables: IndexMap<String, Variable>,
    pub items: Vec<BlockItem>,
}

impl Block {
    pub fn new(position: Position) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn add_variable(&mut self, variable: Variable) -> Result<(), AlreadyExists> {
        insert_unique(&mut self.variables, variable.name.clone(), variable, "variable")
    }

    pub fn statements(&self) -> impl Iterator<Item = &Statement> {
        self.items.iter().filter_map(|item| match item {
            BlockItem::Statement(statement) => Some(statement),
            BlockItem::Block(_) => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BlockItem {
    Block(Block),
    Statement(Statement),
}

/// What a statement invokes.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// A reachable function, `name` or `module.name`.
    Identifier(Identifier),
    /// An operator symbol such as `+` or `=`.
    Operator(String),
    /// A function of arbitrary name, written as a string.
    External(String),
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Identifier(identifier) => write!(f, "{identifier}"),
            Command::Operator(symbol) => write!(f, "{symbol}"),
            Command::External(name) => write!(f, "{}", quote(name, '"')),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub position: Position,
    pub command: Command,
    pub arguments: Vec<Argument>,
}

/// `name:Type` inside a statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Definition {
    pub name: String,
    pub ty: Type,
}

/// `{argument N}`: read `N` items through a pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct Dereference {
    pub argument: Box<Argument>,
    pub offset: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    pub position: Position,
    pub kind: ArgumentKind,
}

impl Argument {
    pub fn new(position: Position, kind: ArgumentKind) -> Self {
        Self { position, kind }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ArgumentKind {
    Statement(Statement),
    Identifier(Identifier),
    Definition(Definition),
    Dereference(Dereference),
    String(String),
    Rune(char),
    Integer(u64),
    SignedInteger(i64),
    Float(f64),
}

impl From<Literal> for ArgumentKind {
    fn from(literal: Literal) -> Self {
        match literal {
            Literal::Integer(value) => ArgumentKind::Integer(value),
            Literal::SignedInteger(value) => ArgumentKind::SignedInteger(value),
            Literal::Float(value) => ArgumentKind::Float(value),
            Literal::String(value) => ArgumentKind::String(value),
            Literal::Rune(value) => ArgumentKind::Rune(value),
        }
    }
}

// ============================================================================
// Modules
// ============================================================================

/// Every file of one module, merged.
#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    pub name: String,
    /// Directory of the module joined with its name.
    pub path: PathBuf,
    pub author: String,
    pub license: String,
    pub requires: Vec<String>,
    pub typedefs: IndexMap<String, Typedef>,
    pub datas: IndexMap<String, Data>,
    pub functions: IndexMap<String, Function>,
}

impl Module {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            author: String::new(),
            license: String::new(),
            requires: Vec::new(),
            typedefs: IndexMap::new(),
            datas: IndexMap::new(),
            functions: IndexMap::new(),
        }
    }

    pub fn add_typedef(&mut self, typedef: Typedef) -> Result<(), AlreadyExists> {
        insert_unique(&mut self.typedefs, typedef.name.clone(), typedef, "type section")
    }

    pub fn add_data(&mut self, data: Data) -> Result<(), AlreadyExists> {
        insert_unique(&mut self.datas, data.name.clone(), data, "data section")
    }

    pub fn add_function(&mut self, function: Function) -> Result<(), AlreadyExists> {
        insert_unique(&mut self.functions, function.name.clone(), function, "func section")
    }
}

/// A name was inserted twice into a name-keyed map; the first entry was kept.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{what} {name} already exists")]
pub struct AlreadyExists {
    pub what: &'static str,
    pub name: String,
}

fn insert_unique<T>(
    map: &mut IndexMap<String, T>,
    name: String,
    value: T,
    what: &'static str,
) -> Result<(), AlreadyExists> {
    if map.contains_key(&name) {
        return Err(AlreadyExists { what, name });
    }
    map.insert(name, value);
    Ok(())
}
