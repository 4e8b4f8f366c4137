//! XML Schema components
//!
//! The subset of XSD components the generator produces: named simple and
//! complex types, elements and their occurrence bounds.

pub mod complex_types;
pub mod elements;
pub mod particles;
pub mod simple_types;

pub use complex_types::XsdComplexType;
pub use elements::XsdElement;
pub use particles::Occurs;
pub use simple_types::XsdSimpleType;

use crate::namespaces::QName;

/// A top-level schema item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaItem {
    /// Named simple type
    SimpleType(XsdSimpleType),
    /// Named complex type
    ComplexType(XsdComplexType),
    /// Global element declaration
    Element(XsdElement),
}

impl SchemaItem {
    /// Name of the item
    pub fn name(&self) -> &str {
        match self {
            SchemaItem::SimpleType(st) => &st.name,
            SchemaItem::ComplexType(ct) => &ct.name,
            SchemaItem::Element(elem) => &elem.name,
        }
    }

    /// Check if the item defines a type
    pub fn is_type(&self) -> bool {
        !matches!(self, SchemaItem::Element(_))
    }

    /// Type names this item refers to
    pub fn type_references(&self) -> Vec<&QName> {
        match self {
            SchemaItem::SimpleType(st) => vec![&st.base_type],
            SchemaItem::ComplexType(ct) => ct.sequence.iter().map(|e| &e.type_name).collect(),
            SchemaItem::Element(elem) => vec![&elem.type_name],
        }
    }

    /// The complex type, if this is one
    pub fn as_complex_type(&self) -> Option<&XsdComplexType> {
        match self {
            SchemaItem::ComplexType(ct) => Some(ct),
            _ => None,
        }
    }

    /// The simple type, if this is one
    pub fn as_simple_type(&self) -> Option<&XsdSimpleType> {
        match self {
            SchemaItem::SimpleType(st) => Some(st),
            _ => None,
        }
    }

    /// The element, if this is one
    pub fn as_element(&self) -> Option<&XsdElement> {
        match self {
            SchemaItem::Element(elem) => Some(elem),
            _ => None,
        }
    }
}
