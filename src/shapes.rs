//! Member shape classification
//!
//! Every member's declared type falls into one of four shapes. The shape is
//! computed once, when the member descriptor is built, and the emitter only
//! ever matches on it.

use crate::model::TypeToken;
use crate::primitives::{primitive_kind_of, PrimitiveKind};

/// Simple names recognized as list-like collections
pub const LIST_TYPE_NAMES: [&str; 4] = ["List", "ObservableCollection", "IList", "ICollection"];

/// Substring marking a nullable-like wrapper
pub const NULLABLE_MARKER: &str = "Nullable";

/// Shape of a member's declared type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    /// Built-in scalar
    Primitive(PrimitiveKind),
    /// Repeated element of the given type
    List(TypeToken),
    /// Optional value of the given type
    Nullable(TypeToken),
    /// Custom type, pending resolution
    Named(String),
}

/// Outcome of classifying a declared type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// The shape used for emission
    pub shape: Shape,
    /// Why the shape was a fallback, when the declared type did not fit
    pub ambiguity: Option<String>,
}

impl Classification {
    fn exact(shape: Shape) -> Self {
        Self {
            shape,
            ambiguity: None,
        }
    }

    fn fallback(declared: &TypeToken, reason: String) -> Self {
        Self {
            shape: Shape::Named(declared.simple_name().to_string()),
            ambiguity: Some(reason),
        }
    }
}

/// Check if a token is a recognized list-like collection
pub fn is_list_type(token: &TypeToken) -> bool {
    token.suffix == Some(crate::model::TokenSuffix::Array)
        || LIST_TYPE_NAMES.contains(&token.simple_name())
}

/// Check if a token looks like a nullable wrapper
///
/// This is a substring match on the simple name, so a custom type such as
/// `NullableRange<T>` is treated as a wrapper too.
pub fn is_nullable_type(token: &TypeToken) -> bool {
    token.simple_name().contains(NULLABLE_MARKER)
}

/// Classify a declared type
///
/// A known primitive wins. List and nullable wrappers need exactly one type
/// argument; without one, or for any other generic type, the raw simple name
/// is used as a custom type name and the ambiguity is recorded.
pub fn classify(declared: &TypeToken) -> Classification {
    if let Some(kind) = primitive_kind_of(declared) {
        return Classification::exact(Shape::Primitive(kind));
    }

    if is_list_type(declared) {
        return match declared.single_argument() {
            Some(element) => Classification::exact(Shape::List(element.clone())),
            None => Classification::fallback(
                declared,
                format!(
                    "list type '{}' needs exactly one type argument",
                    declared
                ),
            ),
        };
    }

    if is_nullable_type(declared) {
        return match declared.single_argument() {
            Some(element) => Classification::exact(Shape::Nullable(element.clone())),
            None => Classification::fallback(
                declared,
                format!(
                    "nullable type '{}' needs exactly one type argument",
                    declared
                ),
            ),
        };
    }

    if declared.is_generic() {
        return Classification::fallback(
            declared,
            format!("generic type '{}' is not a recognized container", declared),
        );
    }

    Classification::exact(Shape::Named(declared.simple_name().to_string()))
}
