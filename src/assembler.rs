//! Schema set assembly and structural compilation
//!
//! Fragments are concatenated in emission order, root elements are appended
//! after them, and a compile pass checks names and type references. The pass
//! only reports; the item list is always produced.

use indexmap::IndexSet;
use tracing::debug;

use crate::components::{SchemaItem, XsdComplexType, XsdElement, XsdSimpleType};
use crate::emitter::SchemaFragment;
use crate::error::{Diagnostic, DiagnosticSink};
use crate::names::is_valid_ncname;
use crate::namespaces::QName;
use crate::primitives::PrimitiveKind;

/// A compiled schema ready to be written
#[derive(Debug, Clone, Default)]
pub struct CompiledSchema {
    /// Target namespace, from the first fragment that declares one
    pub target_namespace: Option<String>,
    /// Types followed by root elements
    pub items: Vec<SchemaItem>,
    /// Compile diagnostics
    pub diagnostics: Vec<Diagnostic>,
}

impl CompiledSchema {
    /// Type definitions in order
    pub fn types(&self) -> impl Iterator<Item = &SchemaItem> {
        self.items.iter().filter(|item| item.is_type())
    }

    /// Root element declarations in order
    pub fn elements(&self) -> impl Iterator<Item = &XsdElement> {
        self.items.iter().filter_map(SchemaItem::as_element)
    }

    /// Find a type definition by name
    pub fn find_type(&self, name: &str) -> Option<&SchemaItem> {
        self.types().find(|item| item.name() == name)
    }

    /// Find a complex type by name
    pub fn find_complex_type(&self, name: &str) -> Option<&XsdComplexType> {
        self.find_type(name).and_then(SchemaItem::as_complex_type)
    }

    /// Find a simple type by name
    pub fn find_simple_type(&self, name: &str) -> Option<&XsdSimpleType> {
        self.find_type(name).and_then(SchemaItem::as_simple_type)
    }

    /// Find a root element by name
    pub fn find_element(&self, name: &str) -> Option<&XsdElement> {
        self.elements().find(|elem| elem.name == name)
    }

    /// Error-severity compile diagnostics
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_error())
    }

    /// Check if compilation reported no error
    pub fn is_valid(&self) -> bool {
        self.errors().next().is_none()
    }

    /// Forward compile diagnostics to a sink
    pub fn report_to(&self, sink: &mut dyn DiagnosticSink) {
        for diag in &self.diagnostics {
            sink.report(diag.clone());
        }
    }
}

/// Accumulates fragments and root names before compilation
#[derive(Debug, Clone, Default)]
pub struct SchemaSet {
    items: Vec<SchemaItem>,
    namespaces: IndexSet<String>,
    roots: Vec<String>,
}

impl SchemaSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one fragment's definition
    pub fn add_fragment(&mut self, fragment: SchemaFragment) {
        if let Some(ns) = fragment.target_namespace {
            self.namespaces.insert(ns);
        }
        if let Some(definition) = fragment.definition {
            self.items.push(definition);
        }
    }

    /// Request a root element named after a type
    pub fn add_root(&mut self, name: impl Into<String>) {
        self.roots.push(name.into());
    }

    /// Compile the set
    pub fn compile(self) -> CompiledSchema {
        let mut diagnostics = Vec::new();

        let mut namespaces = self.namespaces.into_iter();
        let target_namespace = namespaces.next();
        for other in namespaces {
            if let Some(target) = &target_namespace {
                diagnostics.push(Diagnostic::compile_warning(format!(
                    "Namespace '{}' conflicts with target namespace '{}'",
                    other, target
                )));
            }
        }

        let mut items = self.items;
        items.extend(
            self.roots
                .iter()
                .map(|root| SchemaItem::Element(XsdElement::root(root))),
        );

        check_items(&items, &mut diagnostics);
        debug!(
            items = items.len(),
            diagnostics = diagnostics.len(),
            "compiled schema set"
        );

        CompiledSchema {
            target_namespace,
            items,
            diagnostics,
        }
    }
}

fn check_items(items: &[SchemaItem], diagnostics: &mut Vec<Diagnostic>) {
    let mut type_names = IndexSet::new();
    let mut root_names = IndexSet::new();

    for item in items {
        let name = item.name();
        let (what, seen) = if item.is_type() {
            ("type", &mut type_names)
        } else {
            ("root element", &mut root_names)
        };
        if !is_valid_ncname(name) {
            diagnostics.push(
                Diagnostic::compile_error(format!("Invalid {} name '{}'", what, name))
                    .with_type_name(name),
            );
        }
        if !seen.insert(name) {
            diagnostics.push(
                Diagnostic::compile_error(format!("Duplicate {} name '{}'", what, name))
                    .with_type_name(name),
            );
        }

        match item {
            SchemaItem::ComplexType(ct) => {
                for elem in &ct.sequence {
                    if !is_valid_ncname(&elem.name) {
                        diagnostics.push(
                            Diagnostic::compile_error(format!(
                                "Invalid element name '{}' in type '{}'",
                                elem.name, ct.name
                            ))
                            .with_type_name(&ct.name)
                            .with_member(&elem.name),
                        );
                    }
                }
            }
            SchemaItem::SimpleType(st) if st.enumerations.is_empty() => {
                diagnostics.push(
                    Diagnostic::compile_warning(format!(
                        "Enumeration '{}' has no values",
                        st.name
                    ))
                    .with_type_name(&st.name),
                );
            }
            _ => {}
        }
    }

    for item in items {
        for reference in item.type_references() {
            if let Some(message) = check_reference(reference, &type_names) {
                diagnostics.push(Diagnostic::compile_error(message).with_type_name(item.name()));
            }
        }
    }
}

fn check_reference(reference: &QName, type_names: &IndexSet<&str>) -> Option<String> {
    if reference.is_xsd() {
        PrimitiveKind::from_xsd_local_name(&reference.local_name)
            .is_none()
            .then(|| format!("Unknown built-in type 'xs:{}'", reference.local_name))
    } else {
        (!type_names.contains(reference.local_name.as_str()))
            .then(|| format!("Type '{}' is not declared", reference.local_name))
    }
}

/// Assemble fragments and root elements into a compiled schema
pub fn assemble<I>(fragments: I, roots: &[String]) -> CompiledSchema
where
    I: IntoIterator<Item = SchemaFragment>,
{
    let mut set = SchemaSet::new();
    for fragment in fragments {
        set.add_fragment(fragment);
    }
    for root in roots {
        set.add_root(root.as_str());
    }
    set.compile()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Occurs;
    use crate::error::{DiagnosticKind, Severity};
    use pretty_assertions::assert_eq;

    fn complex(name: &str, members: &[(&str, QName)]) -> SchemaFragment {
        let mut ct = XsdComplexType::new(name);
        for (member, type_name) in members {
            ct.push(XsdElement::new(*member, type_name.clone()).with_occurs(Occurs::optional()));
        }
        SchemaFragment {
            definition: Some(SchemaItem::ComplexType(ct)),
            ..Default::default()
        }
    }

    fn messages(schema: &CompiledSchema) -> Vec<&str> {
        schema.diagnostics.iter().map(|d| d.message.as_str()).collect()
    }

    #[test]
    fn test_roots_follow_types() {
        let schema = assemble(
            [
                complex("Person", &[("Name", QName::xsd("string"))]),
                complex("Animal", &[]),
            ],
            &["Person".to_string()],
        );

        let names: Vec<_> = schema.items.iter().map(SchemaItem::name).collect();
        assert_eq!(names, vec!["Person", "Animal", "Person"]);
        assert!(schema.items[2].as_element().is_some());
        assert_eq!(
            schema.find_element("Person").unwrap().type_name,
            QName::local("Person")
        );
        assert!(schema.is_valid());
    }

    #[test]
    fn test_undeclared_type_reference() {
        let schema = assemble(
            [complex("Person", &[("Shadow", QName::local("Ghost"))])],
            &[],
        );
        assert_eq!(messages(&schema), vec!["Type 'Ghost' is not declared"]);
        assert!(!schema.is_valid());
        assert_eq!(schema.diagnostics[0].kind, DiagnosticKind::SchemaCompile);
    }

    #[test]
    fn test_root_without_type() {
        let schema = assemble(Vec::new(), &["Nothing".to_string()]);
        assert_eq!(schema.elements().count(), 1);
        assert_eq!(messages(&schema), vec!["Type 'Nothing' is not declared"]);
    }

    #[test]
    fn test_duplicate_names() {
        let schema = assemble(
            [complex("Person", &[]), complex("Person", &[])],
            &["Person".to_string(), "Person".to_string()],
        );
        assert_eq!(
            messages(&schema),
            vec![
                "Duplicate type name 'Person'",
                "Duplicate root element name 'Person'"
            ]
        );
    }

    #[test]
    fn test_invalid_names() {
        let schema = assemble(
            [complex("Bad Name", &[("1st", QName::xsd("int"))])],
            &[],
        );
        assert_eq!(
            messages(&schema),
            vec![
                "Invalid type name 'Bad Name'",
                "Invalid element name '1st' in type 'Bad Name'"
            ]
        );
    }

    #[test]
    fn test_non_latin_names_compile() {
        let schema = assemble(
            [
                complex("Ελλάδα", &[("Πόλη", QName::local("Адрес"))]),
                complex("Адрес", &[("注文", QName::xsd("string"))]),
            ],
            &["Ελλάδα".to_string()],
        );
        assert!(schema.diagnostics.is_empty());
        assert!(schema.is_valid());
    }

    #[test]
    fn test_unknown_builtin() {
        let schema = assemble([complex("Person", &[("Id", QName::xsd("guid"))])], &[]);
        assert_eq!(messages(&schema), vec!["Unknown built-in type 'xs:guid'"]);
    }

    #[test]
    fn test_empty_enum_warns() {
        let fragment = SchemaFragment {
            definition: Some(SchemaItem::SimpleType(XsdSimpleType::restriction(
                "Empty",
                QName::xsd("string"),
            ))),
            ..Default::default()
        };
        let schema = assemble([fragment], &[]);
        assert_eq!(schema.diagnostics.len(), 1);
        assert_eq!(schema.diagnostics[0].severity, Severity::Warning);
        assert!(schema.is_valid());
        assert!(schema.find_simple_type("Empty").is_some());
    }

    #[test]
    fn test_target_namespace_first_wins() {
        let mut first = complex("Person", &[]);
        first.target_namespace = Some("http://example.com/a".to_string());
        let mut second = complex("Animal", &[]);
        second.target_namespace = Some("http://example.com/b".to_string());
        let mut third = complex("Plant", &[]);
        third.target_namespace = Some("http://example.com/a".to_string());

        let schema = assemble([complex("Rock", &[]), first, second, third], &[]);
        assert_eq!(schema.target_namespace.as_deref(), Some("http://example.com/a"));
        assert_eq!(
            messages(&schema),
            vec!["Namespace 'http://example.com/b' conflicts with target namespace 'http://example.com/a'"]
        );
        assert!(schema.is_valid());
    }

    #[test]
    fn test_report_to_sink() {
        let schema = assemble([complex("Person", &[("Pet", QName::local("Ghost"))])], &[]);
        let mut sink: Vec<Diagnostic> = Vec::new();
        schema.report_to(&mut sink);
        assert_eq!(sink.len(), 1);
        assert_eq!(sink[0].type_name.as_deref(), Some("Person"));
    }
}
