//! Punctuation vocabulary: multi-character symbols, head markers and the file magic line.

/// First line of every arf source file.
pub const MAGIC: &str = ":arf";

/// Ends the header and the head of a function.
pub const SEPARATOR: &str = "---";

/// Direction arrow.
pub const DIRECTION: &str = "->";

/// Width of one indentation level, in spaces.
pub const INDENT_WIDTH: usize = 8;

/// Symbols that introduce a line in the head of a function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeadMarkerId {
    /// `@` method receiver
    Receiver,
    /// `>` input
    Input,
    /// `<` output
    Output,
}

pub fn head_marker_from_str(symbol: &str) -> Option<HeadMarkerId> {
    match symbol {
        "@" => Some(HeadMarkerId::Receiver),
        ">" => Some(HeadMarkerId::Input),
        "<" => Some(HeadMarkerId::Output),
        _ => None,
    }
}

pub fn head_marker_as_str(id: HeadMarkerId) -> &'static str {
    match id {
        HeadMarkerId::Receiver => "@",
        HeadMarkerId::Input => ">",
        HeadMarkerId::Output => "<",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_head_markers_round_trip() {
        for id in [HeadMarkerId::Receiver, HeadMarkerId::Input, HeadMarkerId::Output] {
            assert_eq!(head_marker_from_str(head_marker_as_str(id)), Some(id));
        }
        assert_eq!(head_marker_from_str("<<"), None);
    }
}
