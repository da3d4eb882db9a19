//! Syntactic validators for names and permission strings.

/// Return whether `name` is a valid module, section or variable name.
///
/// A name starts with an ASCII letter, is at least two characters long and contains only ASCII
/// letters and digits. Dashes and underscores are not allowed.
///
/// ## Examples
/// ```rust
/// use arf_core::validate::is_valid_name;
///
/// assert!(is_valid_name("main"));
/// assert!(!is_valid_name("x"));
/// assert!(!is_valid_name("my_module"));
/// ```
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !first.is_ascii_alphabetic() || name.chars().count() < 2 {
        return false;
    }
    chars.all(|c| c.is_ascii_alphanumeric())
}

/// Return whether `permission` is exactly two of the letters `n`, `r`, `w`.
pub fn is_valid_permission(permission: &str) -> bool {
    let mut count = 0;
    for c in permission.chars() {
        if !matches!(c, 'n' | 'r' | 'w') {
            return false;
        }
        count += 1;
    }
    count == 2
}
