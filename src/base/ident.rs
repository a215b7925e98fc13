//! Identifier validation for user-supplied names (composition slot names, trait
//! type names, enum member names). These are the strings the type graph uses to
//! build hierarchical paths like `a.b[2].c`, so they must be valid name segments.

use unicode_ident::{is_xid_continue, is_xid_start};

/// Returns true if `s` is a valid bare identifier (no array suffix, no dots).
///
/// Mirrors the identifier grammar of the surface language without depending on
/// its lexer (which is out of scope for this crate): a XID_Start character
/// followed by zero or more XID_Continue characters, or a single `_`.
pub fn is_valid_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        None => false,
        Some(c) if c == '_' => chars.all(is_xid_continue),
        Some(c) => is_xid_start(c) && chars.all(is_xid_continue),
    }
}
