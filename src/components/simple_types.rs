//! XSD simple type definitions
//!
//! Enumerations are the only simple types generated: a restriction of a
//! built-in base with one enumeration facet per value.

use crate::namespaces::QName;

/// Named simple type restricted by enumeration facets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XsdSimpleType {
    /// Type name
    pub name: String,
    /// Restriction base
    pub base_type: QName,
    /// Enumeration facet values, in order
    pub enumerations: Vec<String>,
}

impl XsdSimpleType {
    /// Create a restriction of `base_type` with no facets
    pub fn restriction(name: impl Into<String>, base_type: QName) -> Self {
        Self {
            name: name.into(),
            base_type,
            enumerations: Vec::new(),
        }
    }

    /// Append an enumeration facet
    pub fn add_enumeration(&mut self, value: impl Into<String>) {
        self.enumerations.push(value.into());
    }
}
