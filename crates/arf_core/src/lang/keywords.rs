//! Define the word vocabulary of arf source files.
//!
//! arf has no reserved words in the usual sense: names are contextual. A word is a section keyword
//! only at indentation 0 of the body, a header key only before the `---` separator, and a type
//! qualifier only after the `:` that follows a type.
//!
//! ## Examples
//! ```rust
//! use arf_core::lang::keywords::{self, HeaderKeyId, QualifierId};
//!
//! assert_eq!(keywords::header_key_from_str("require"), Some(HeaderKeyId::Require));
//! assert_eq!(keywords::qualifier_from_str("mut"), Some(QualifierId::Mut));
//! assert_eq!(keywords::qualifier_from_str("const"), None);
//! ```

/// Top-level body sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionId {
    Data,
    Type,
    Func,
}

/// Header directives that may appear before the `---` separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderKeyId {
    Module,
    Author,
    License,
    Require,
}

/// Qualifiers that may follow a type after a colon (`Int:mut`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QualifierId {
    Mut,
}

/// Metadata record for a single word.
#[derive(Debug, Clone, Copy)]
pub struct WordInfo<Id: 'static> {
    pub id: Id,
    pub canonical: &'static str,
    pub description: &'static str,
}

pub const SECTIONS: &[WordInfo<SectionId>] = &[
    WordInfo {
        id: SectionId::Data,
        canonical: "data",
        description: "module-level variable with optional default values",
    },
    WordInfo {
        id: SectionId::Type,
        canonical: "type",
        description: "type definition: an inherited type plus member fields",
    },
    WordInfo {
        id: SectionId::Func,
        canonical: "func",
        description: "function with a head of receiver/inputs/outputs and a body block",
    },
];

pub const HEADER_KEYS: &[WordInfo<HeaderKeyId>] = &[
    WordInfo {
        id: HeaderKeyId::Module,
        canonical: "module",
        description: "name of the module this file belongs to",
    },
    WordInfo {
        id: HeaderKeyId::Author,
        canonical: "author",
        description: "author of the module",
    },
    WordInfo {
        id: HeaderKeyId::License,
        canonical: "license",
        description: "license the module is distributed under",
    },
    WordInfo {
        id: HeaderKeyId::Require,
        canonical: "require",
        description: "path of another module this module depends on",
    },
];

pub const QUALIFIERS: &[WordInfo<QualifierId>] = &[WordInfo {
    id: QualifierId::Mut,
    canonical: "mut",
    description: "the value may be written to",
}];

/// Word that marks a data section as defined elsewhere when it stands in value position.
pub const EXTERNAL: &str = "external";

fn lookup<Id: Copy>(table: &[WordInfo<Id>], word: &str) -> Option<Id> {
    table.iter().find(|info| info.canonical == word).map(|info| info.id)
}

fn spelling<Id: Copy + PartialEq>(table: &[WordInfo<Id>], id: Id) -> &'static str {
    table
        .iter()
        .find(|info| info.id == id)
        .map(|info| info.canonical)
        .unwrap_or("")
}

pub fn section_from_str(word: &str) -> Option<SectionId> {
    lookup(SECTIONS, word)
}

pub fn section_as_str(id: SectionId) -> &'static str {
    spelling(SECTIONS, id)
}

pub fn header_key_from_str(word: &str) -> Option<HeaderKeyId> {
    lookup(HEADER_KEYS, word)
}

pub fn header_key_as_str(id: HeaderKeyId) -> &'static str {
    spelling(HEADER_KEYS, id)
}

pub fn qualifier_from_str(word: &str) -> Option<QualifierId> {
    lookup(QUALIFIERS, word)
}

pub fn qualifier_as_str(id: QualifierId) -> &'static str {
    spelling(QUALIFIERS, id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_registry_round_trips() {
        for info in SECTIONS {
            assert_eq!(section_from_str(info.canonical), Some(info.id));
            assert_eq!(section_as_str(info.id), info.canonical);
        }
    }

    #[test]
    fn test_header_registry_round_trips() {
        for info in HEADER_KEYS {
            assert_eq!(header_key_from_str(info.canonical), Some(info.id));
            assert_eq!(header_key_as_str(info.id), info.canonical);
        }
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert_eq!(section_from_str("Data"), None);
        assert_eq!(header_key_from_str("AUTHOR"), None);
        assert_eq!(qualifier_as_str(QualifierId::Mut), "mut");
    }
}
