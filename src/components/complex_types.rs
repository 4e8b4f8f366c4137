//! XSD complex type definitions
//!
//! Generated complex types always have element-only content made of a
//! single sequence.

use super::elements::XsdElement;

/// Named complex type with a sequence content model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XsdComplexType {
    /// Type name
    pub name: String,
    /// Sequence particle items, in order
    pub sequence: Vec<XsdElement>,
}

impl XsdComplexType {
    /// Create a complex type with an empty sequence
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sequence: Vec::new(),
        }
    }

    /// Append an element to the sequence
    pub fn push(&mut self, element: XsdElement) {
        self.sequence.push(element);
    }

    /// Find a sequence element by name
    pub fn element(&self, name: &str) -> Option<&XsdElement> {
        self.sequence.iter().find(|e| e.name == name)
    }

    /// Check if the sequence has no elements
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}
