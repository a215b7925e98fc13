//! Foundation types shared across the whole crate.
//!
//! This module has no dependencies on other `faebryk_core` modules.

mod ident;
mod interner;

pub use ident::is_valid_identifier;
pub use interner::{IStr, Interner};
