//! Schema fragment emission
//!
//! One fragment per type: a single named definition plus the custom type
//! names the definition mentions but does not define. Those names feed the
//! closure resolver.

use indexmap::IndexSet;

use crate::components::{Occurs, SchemaItem, XsdComplexType, XsdElement, XsdSimpleType};
use crate::model::{TypeDescriptor, TypeKind, TypeToken};
use crate::namespaces::QName;
use crate::primitives::{primitive_kind_of, primitive_xml_name, PrimitiveKind};
use crate::shapes::Shape;

/// Prefix of list wrapper type names
pub const ARRAY_PREFIX: &str = "ArrayOf";

/// Name of the wrapper type for a list of `element`
pub fn array_type_name(element: &str) -> String {
    format!("{}{}", ARRAY_PREFIX, element)
}

/// Output of emitting one type
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SchemaFragment {
    /// The definition, if the type produced one
    pub definition: Option<SchemaItem>,
    /// Custom type names mentioned but not defined here, in first-seen order
    pub referenced_type_names: IndexSet<String>,
    /// Namespace declared by the type's contract annotation
    pub target_namespace: Option<String>,
}

impl SchemaFragment {
    fn new(definition: SchemaItem, target_namespace: Option<String>) -> Self {
        Self {
            definition: Some(definition),
            referenced_type_names: IndexSet::new(),
            target_namespace,
        }
    }

    /// Name of the defined type
    pub fn name(&self) -> Option<&str> {
        self.definition.as_ref().map(SchemaItem::name)
    }

    fn reference(&mut self, name: impl Into<String>) {
        self.referenced_type_names.insert(name.into());
    }
}

/// Emit the simple type of an enum
pub fn emit_enum(t: &TypeDescriptor) -> SchemaFragment {
    debug_assert_eq!(t.kind, TypeKind::Enum);
    let mut simple = XsdSimpleType::restriction(&t.name, primitive_xml_name(PrimitiveKind::Text));
    for value in &t.enum_values {
        simple.add_enumeration(value);
    }
    SchemaFragment::new(SchemaItem::SimpleType(simple), t.declared_namespace.clone())
}

/// Emit the complex type of a class
pub fn emit_class(t: &TypeDescriptor) -> SchemaFragment {
    debug_assert_eq!(t.kind, TypeKind::Class);
    let mut references = Vec::new();
    let mut complex = XsdComplexType::new(&t.name);

    for member in &t.members {
        let occurs = Occurs::for_member(member.is_required);
        let element = match member.shape() {
            Shape::Primitive(kind) => XsdElement::new(&member.name, primitive_xml_name(*kind)),
            Shape::List(item) => {
                let array = match primitive_kind_of(item) {
                    Some(kind) => array_type_name(kind.xsd_local_name()),
                    None => {
                        let short = item.simple_name().to_string();
                        let array = array_type_name(&short);
                        references.push(short);
                        array
                    }
                };
                references.push(array.clone());
                XsdElement::new(&member.name, QName::local(array))
            }
            Shape::Nullable(item) => {
                let type_name = nullable_type_name(item, &mut references);
                XsdElement::new(&member.name, type_name).with_nillable(true)
            }
            Shape::Named(name) => {
                references.push(name.clone());
                XsdElement::new(&member.name, QName::local(name))
            }
        };
        complex.push(element.with_occurs(occurs));
    }

    let mut fragment =
        SchemaFragment::new(SchemaItem::ComplexType(complex), t.declared_namespace.clone());
    for name in references {
        fragment.reference(name);
    }
    fragment
}

fn nullable_type_name(item: &TypeToken, references: &mut Vec<String>) -> QName {
    match primitive_kind_of(item) {
        Some(kind) => primitive_xml_name(kind),
        None => {
            let short = item.simple_name().to_string();
            references.push(short.clone());
            QName::local(short)
        }
    }
}

/// Emit the `ArrayOf` wrapper of a custom type
pub fn emit_list(t: &TypeDescriptor) -> SchemaFragment {
    let mut complex = XsdComplexType::new(array_type_name(&t.name));
    complex.push(
        XsdElement::new(&t.name, QName::local(&t.name)).with_occurs(Occurs::zero_or_more()),
    );
    SchemaFragment::new(SchemaItem::ComplexType(complex), t.declared_namespace.clone())
}

/// Emit the `ArrayOf` wrapper of a primitive
pub fn emit_primitive_list(kind: PrimitiveKind) -> SchemaFragment {
    let local = kind.xsd_local_name();
    let mut complex = XsdComplexType::new(array_type_name(local));
    complex.push(
        XsdElement::new(local, primitive_xml_name(kind)).with_occurs(Occurs::zero_or_more()),
    );
    SchemaFragment::new(SchemaItem::ComplexType(complex), None)
}

/// Emit the fragment for a type, or its list wrapper
pub fn emit(t: &TypeDescriptor, is_list_wrapper: bool) -> SchemaFragment {
    if is_list_wrapper {
        return emit_list(t);
    }
    match t.kind {
        TypeKind::Class => emit_class(t),
        TypeKind::Enum => emit_enum(t),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MemberDescriptor;
    use pretty_assertions::assert_eq;

    fn member(name: &str, token: &str, required: bool) -> MemberDescriptor {
        MemberDescriptor::parse(name, token, required).unwrap()
    }

    fn sequence(fragment: &SchemaFragment) -> &[XsdElement] {
        &fragment
            .definition
            .as_ref()
            .and_then(SchemaItem::as_complex_type)
            .unwrap()
            .sequence
    }

    #[test]
    fn test_emit_enum() {
        let color = TypeDescriptor::enumeration("Color", ["A", "B", "C"])
            .contract(Some("http://example.com/zoo"));
        let fragment = emit_enum(&color);

        let simple = fragment
            .definition
            .as_ref()
            .and_then(SchemaItem::as_simple_type)
            .unwrap();
        assert_eq!(simple.name, "Color");
        assert_eq!(simple.base_type, QName::xsd("string"));
        assert_eq!(simple.enumerations, vec!["A", "B", "C"]);
        assert!(fragment.referenced_type_names.is_empty());
        assert_eq!(fragment.target_namespace.as_deref(), Some("http://example.com/zoo"));
    }

    #[test]
    fn test_emit_simple_class() {
        let person = TypeDescriptor::class("Person")
            .contract(None)
            .with_member(member("Name", "System.String", true))
            .with_member(member("Age", "System.Int32", false));
        let fragment = emit_class(&person);

        assert_eq!(fragment.name(), Some("Person"));
        let seq = sequence(&fragment);
        assert_eq!(seq.len(), 2);
        assert_eq!(seq[0].name, "Name");
        assert_eq!(seq[0].occurs.min, 1);
        assert_eq!(seq[0].type_name, QName::xsd("string"));
        assert_eq!(seq[1].name, "Age");
        assert_eq!(seq[1].occurs.min, 0);
        assert_eq!(seq[1].type_name, QName::xsd("int"));
        assert!(fragment.referenced_type_names.is_empty());
        assert_eq!(fragment.target_namespace, None);
    }

    #[test]
    fn test_emit_class_list_of_custom_type() {
        let person = TypeDescriptor::class("Person")
            .with_member(member("Pets", "System.Collections.Generic.List<Zoo.Animal>", false));
        let fragment = emit_class(&person);

        let seq = sequence(&fragment);
        assert_eq!(seq[0].type_name, QName::local("ArrayOfAnimal"));
        assert_eq!(seq[0].occurs.min, 0);
        let refs: Vec<_> = fragment.referenced_type_names.iter().cloned().collect();
        assert_eq!(refs, vec!["Animal", "ArrayOfAnimal"]);
    }

    #[test]
    fn test_emit_class_list_of_primitive() {
        let person =
            TypeDescriptor::class("Person").with_member(member("Scores", "List<int>", false));
        let fragment = emit_class(&person);

        assert_eq!(sequence(&fragment)[0].type_name, QName::local("ArrayOfint"));
        let refs: Vec<_> = fragment.referenced_type_names.iter().cloned().collect();
        assert_eq!(refs, vec!["ArrayOfint"]);
    }

    #[test]
    fn test_emit_class_nullable() {
        let person = TypeDescriptor::class("Person")
            .with_member(member("Born", "DateTime?", false))
            .with_member(member("Favorite", "System.Nullable`1[[Zoo.Color, Zoo]]", true));
        let fragment = emit_class(&person);

        let seq = sequence(&fragment);
        assert_eq!(seq[0].type_name, QName::xsd("dateTime"));
        assert!(seq[0].nillable);
        assert_eq!(seq[1].type_name, QName::local("Color"));
        assert!(seq[1].nillable);
        assert_eq!(seq[1].occurs.min, 1);
        let refs: Vec<_> = fragment.referenced_type_names.iter().cloned().collect();
        assert_eq!(refs, vec!["Color"]);
    }

    #[test]
    fn test_emit_class_named_and_duplicate_references() {
        let person = TypeDescriptor::class("Person")
            .with_member(member("Home", "Zoo.Address", false))
            .with_member(member("Work", "Zoo.Address", false));
        let fragment = emit_class(&person);

        let seq = sequence(&fragment);
        assert_eq!(seq[0].type_name, QName::local("Address"));
        assert!(!seq[0].nillable);
        assert_eq!(fragment.referenced_type_names.len(), 1);
    }

    #[test]
    fn test_emit_list_wrapper() {
        let animal = TypeDescriptor::class("Animal");
        let fragment = emit(&animal, true);

        assert_eq!(fragment.name(), Some("ArrayOfAnimal"));
        let seq = sequence(&fragment);
        assert_eq!(seq.len(), 1);
        assert_eq!(seq[0].name, "Animal");
        assert_eq!(seq[0].type_name, QName::local("Animal"));
        assert_eq!(seq[0].occurs, Occurs::zero_or_more());
        assert!(fragment.referenced_type_names.is_empty());
    }

    #[test]
    fn test_emit_primitive_list_wrapper() {
        let fragment = emit_primitive_list(PrimitiveKind::Int32);
        assert_eq!(fragment.name(), Some("ArrayOfint"));
        let seq = sequence(&fragment);
        assert_eq!(seq[0].name, "int");
        assert_eq!(seq[0].type_name, QName::xsd("int"));
        assert!(seq[0].occurs.is_unbounded());
    }

    #[test]
    fn test_emit_dispatch() {
        let color = TypeDescriptor::enumeration("Color", ["Red"]);
        assert!(emit(&color, false)
            .definition
            .unwrap()
            .as_simple_type()
            .is_some());

        let animal = TypeDescriptor::class("Animal");
        assert_eq!(emit(&animal, false).name(), Some("Animal"));
        assert_eq!(emit(&color, true).name(), Some("ArrayOfColor"));
    }
}
