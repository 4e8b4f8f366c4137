//! XML namespace handling
//!
//! This module provides qualified names and the prefix mappings used when
//! writing them out as `prefix:local` strings.

use crate::error::{Error, Result};
use crate::XSD_NAMESPACE;
use indexmap::IndexMap;
use std::fmt;

/// XML Namespace URI
pub type NamespaceUri = String;

/// Namespace prefix
pub type Prefix = String;

/// Qualified name (QName) - combination of namespace and local name
///
/// Equality is structural. Schema type uniqueness is keyed on
/// [`QName::local_name`] alone.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QName {
    /// Namespace URI (None for no namespace)
    pub namespace: Option<NamespaceUri>,
    /// Local name
    pub local_name: String,
}

impl QName {
    /// Create a QName without a namespace
    pub fn local(local_name: impl Into<String>) -> Self {
        Self {
            namespace: None,
            local_name: local_name.into(),
        }
    }

    /// Create a QName with a namespace
    pub fn namespaced(namespace: impl Into<String>, local_name: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            local_name: local_name.into(),
        }
    }

    /// Create a QName in the XML Schema namespace
    pub fn xsd(local_name: impl Into<String>) -> Self {
        Self::namespaced(XSD_NAMESPACE, local_name)
    }

    /// Check if this name lives in the XML Schema namespace
    pub fn is_xsd(&self) -> bool {
        self.namespace.as_deref() == Some(XSD_NAMESPACE)
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{{{}}}{}", ns, self.local_name),
            None => write!(f, "{}", self.local_name),
        }
    }
}

/// Namespace context for writing prefixed names
#[derive(Debug, Clone)]
pub struct NamespaceContext {
    /// Mapping from prefix to namespace URI, in declaration order
    prefixes: IndexMap<Prefix, NamespaceUri>,
    /// Default namespace (no prefix)
    default_namespace: Option<NamespaceUri>,
}

impl NamespaceContext {
    /// Create a new empty namespace context
    pub fn new() -> Self {
        Self {
            prefixes: IndexMap::new(),
            default_namespace: None,
        }
    }

    /// Context with `xs` bound to the XML Schema namespace
    pub fn for_schema(target_namespace: Option<&str>) -> Self {
        let mut ctx = Self::new();
        ctx.add_prefix("xs", XSD_NAMESPACE);
        if let Some(ns) = target_namespace {
            ctx.set_default_namespace(ns);
        }
        ctx
    }

    /// Add a namespace prefix mapping
    pub fn add_prefix(&mut self, prefix: impl Into<String>, namespace: impl Into<String>) {
        self.prefixes.insert(prefix.into(), namespace.into());
    }

    /// Set the default namespace
    pub fn set_default_namespace(&mut self, namespace: impl Into<String>) {
        self.default_namespace = Some(namespace.into());
    }

    /// Get the first prefix bound to a namespace
    pub fn get_prefix(&self, namespace: &str) -> Option<&str> {
        self.prefixes
            .iter()
            .find(|(_, uri)| uri.as_str() == namespace)
            .map(|(prefix, _)| prefix.as_str())
    }

    /// Prefix mappings in declaration order
    pub fn prefixes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.prefixes.iter().map(|(p, u)| (p.as_str(), u.as_str()))
    }

    /// Render a QName as it must appear in an attribute value
    ///
    /// Names without a namespace are written bare; they resolve against the
    /// default namespace, which is the schema's own target namespace.
    pub fn qualify(&self, qname: &QName) -> Result<String> {
        match qname.namespace.as_deref() {
            None => Ok(qname.local_name.clone()),
            Some(ns) if self.default_namespace.as_deref() == Some(ns) => {
                Ok(qname.local_name.clone())
            }
            Some(ns) => self
                .get_prefix(ns)
                .map(|prefix| format!("{}:{}", prefix, qname.local_name))
                .ok_or_else(|| Error::Namespace(format!("No prefix bound for {}", ns))),
        }
    }
}

impl Default for NamespaceContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qname_creation() {
        let qname = QName::namespaced("http://example.com", "element");
        assert_eq!(qname.namespace, Some("http://example.com".to_string()));
        assert_eq!(qname.local_name, "element");
    }

    #[test]
    fn test_qname_display() {
        let qname = QName::xsd("int");
        assert_eq!(qname.to_string(), "{http://www.w3.org/2001/XMLSchema}int");

        let qname_local = QName::local("Person");
        assert_eq!(qname_local.to_string(), "Person");
    }

    #[test]
    fn test_qname_structural_equality() {
        assert_eq!(QName::xsd("string"), QName::namespaced(XSD_NAMESPACE, "string"));
        assert_ne!(QName::xsd("string"), QName::local("string"));
        assert!(QName::xsd("string").is_xsd());
        assert!(!QName::local("string").is_xsd());
    }

    #[test]
    fn test_qualify() {
        let ctx = NamespaceContext::for_schema(Some("http://example.com/zoo"));

        assert_eq!(ctx.qualify(&QName::xsd("int")).unwrap(), "xs:int");
        assert_eq!(ctx.qualify(&QName::local("Person")).unwrap(), "Person");
        assert_eq!(
            ctx.qualify(&QName::namespaced("http://example.com/zoo", "Animal"))
                .unwrap(),
            "Animal"
        );
        assert!(ctx
            .qualify(&QName::namespaced("http://other", "Animal"))
            .is_err());
    }

    #[test]
    fn test_prefix_lookup() {
        let mut ctx = NamespaceContext::new();
        ctx.add_prefix("xs", XSD_NAMESPACE);
        ctx.add_prefix("tns", "http://example.com");

        assert_eq!(ctx.get_prefix("http://example.com"), Some("tns"));
        assert_eq!(ctx.get_prefix(XSD_NAMESPACE), Some("xs"));
        assert_eq!(ctx.get_prefix("http://other"), None);
        assert_eq!(ctx.prefixes().count(), 2);
    }
}
