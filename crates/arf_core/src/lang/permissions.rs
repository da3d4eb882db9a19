//! Access permissions attached to every section.
//!
//! A permission is written as two letters over the alphabet `n`, `r`, `w`. The first letter is the
//! mode granted inside the module, the second the mode granted to other modules.
//!
//! ## Examples
//! ```rust
//! use arf_core::{Mode, Permissions};
//!
//! let perms: Permissions = "rw".parse().unwrap();
//! assert_eq!(perms.internal, Mode::Read);
//! assert_eq!(perms.external, Mode::Write);
//! assert_eq!(perms.to_string(), "rw");
//! ```

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::validate;

/// What a caller is allowed to do with a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    #[default]
    Deny,
    Read,
    Write,
}

impl Mode {
    /// Decode a single permission letter.
    pub fn from_char(c: char) -> Option<Mode> {
        match c {
            'n' => Some(Mode::Deny),
            'r' => Some(Mode::Read),
            'w' => Some(Mode::Write),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Mode::Deny => 'n',
            Mode::Read => 'r',
            Mode::Write => 'w',
        }
    }
}

/// Internal/external access pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Permissions {
    pub internal: Mode,
    pub external: Mode,
}

impl Permissions {
    pub fn new(internal: Mode, external: Mode) -> Self {
        Self { internal, external }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("\"{0}\" is not a permission, expected two of the letters n, r, w")]
pub struct PermissionError(pub String);

impl FromStr for Permissions {
    type Err = PermissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !validate::is_valid_permission(s) {
            return Err(PermissionError(s.to_string()));
        }
        let mut letters = s.chars().filter_map(Mode::from_char);
        match (letters.next(), letters.next()) {
            (Some(internal), Some(external)) => Ok(Permissions { internal, external }),
            _ => Err(PermissionError(s.to_string())),
        }
    }
}

impl fmt::Display for Permissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.internal.as_char(), self.external.as_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_read_write() {
        let perms: Permissions = "rw".parse().unwrap();
        assert_eq!(perms, Permissions::new(Mode::Read, Mode::Write));
    }

    #[test]
    fn test_decode_deny_deny() {
        let perms: Permissions = "nn".parse().unwrap();
        assert_eq!(perms, Permissions::new(Mode::Deny, Mode::Deny));
        assert_eq!(perms, Permissions::default());
    }

    #[test]
    fn test_rejects_malformed_strings() {
        for bad in ["", "r", "rwn", "rx", "RW", "ro"] {
            assert!(bad.parse::<Permissions>().is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_display_round_trips() {
        for s in ["nn", "nr", "nw", "rn", "rr", "rw", "wn", "wr", "ww"] {
            assert_eq!(s.parse::<Permissions>().unwrap().to_string(), s);
        }
    }
}
