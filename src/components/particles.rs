//! Occurrence constraints
//!
//! Reference: https://www.w3.org/TR/xmlschema-1/#p

/// Occurrence bounds for a particle (minOccurs, maxOccurs)
/// None for max_occurs means unbounded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Occurs {
    /// Minimum number of occurrences (default 1)
    pub min: u32,
    /// Maximum number of occurrences (None = unbounded, default 1)
    pub max: Option<u32>,
}

impl Occurs {
    /// Create new occurrence bounds
    pub fn new(min: u32, max: Option<u32>) -> Self {
        Self { min, max }
    }

    /// Default occurrence (1, 1)
    pub fn once() -> Self {
        Self { min: 1, max: Some(1) }
    }

    /// Optional occurrence (0, 1)
    pub fn optional() -> Self {
        Self { min: 0, max: Some(1) }
    }

    /// Zero or more (0, unbounded)
    pub fn zero_or_more() -> Self {
        Self { min: 0, max: None }
    }

    /// Bounds of a class member element
    pub fn for_member(is_required: bool) -> Self {
        if is_required {
            Self::once()
        } else {
            Self::optional()
        }
    }

    /// Check if maxOccurs is unbounded
    pub fn is_unbounded(&self) -> bool {
        self.max.is_none()
    }

    /// minOccurs attribute value, when it differs from the default
    pub fn min_attribute(&self) -> Option<String> {
        (self.min != 1).then(|| self.min.to_string())
    }

    /// maxOccurs attribute value, when it differs from the default
    pub fn max_attribute(&self) -> Option<String> {
        match self.max {
            None => Some("unbounded".to_string()),
            Some(1) => None,
            Some(max) => Some(max.to_string()),
        }
    }
}

impl Default for Occurs {
    fn default() -> Self {
        Self::once()
    }
}
