//! Sections that are being resolved or are done

use std::collections::HashSet;

use super::tree::SectionKey;

/// Set of `(module, name)` keys the analyzer has started on.
///
/// A key is checked before its section is resolved, so a section that refers back to itself
/// (directly or through other sections) is entered once and then found on the list.
#[derive(Debug, Clone, Default)]
pub struct Checklist {
    items: HashSet<SectionKey>,
}

impl Checklist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `key`. Returns `false` if it was already marked.
    pub fn check(&mut self, key: SectionKey) -> bool {
        self.items.insert(key)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
