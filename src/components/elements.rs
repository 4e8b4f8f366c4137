//! XSD element declarations
//!
//! Elements appear in two places: as members of a complex type's sequence
//! and as top-level root elements.

use crate::namespaces::QName;

use super::particles::Occurs;

/// XSD element declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XsdElement {
    /// Element name
    pub name: String,
    /// Type the element refers to
    pub type_name: QName,
    /// Occurrence bounds (only meaningful inside a sequence)
    pub occurs: Occurs,
    /// Whether xsi:nil is allowed
    pub nillable: bool,
}

impl XsdElement {
    /// Create a new element with default (1, 1) bounds
    pub fn new(name: impl Into<String>, type_name: QName) -> Self {
        Self {
            name: name.into(),
            type_name,
            occurs: Occurs::once(),
            nillable: false,
        }
    }

    /// Top-level element whose name and type are the same
    pub fn root(name: &str) -> Self {
        Self::new(name, QName::local(name))
    }

    /// Set occurrence bounds
    pub fn with_occurs(mut self, occurs: Occurs) -> Self {
        self.occurs = occurs;
        self
    }

    /// Set nillable
    pub fn with_nillable(mut self, nillable: bool) -> Self {
        self.nillable = nillable;
        self
    }
}
