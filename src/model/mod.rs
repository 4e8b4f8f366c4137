//! Type model
//!
//! The input side of schema generation: candidate types, their members and
//! the parsed declared-type tokens.

pub mod tokens;
pub mod types;

pub use tokens::{TokenSuffix, TypeToken};
pub use types::{MemberDescriptor, TypeDescriptor, TypeKind, TypeModel};
