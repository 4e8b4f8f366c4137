//! Type descriptors
//!
//! The type model is a read-only snapshot of the candidate types. The
//! generator never mutates it; loaders and tests build it up front.

use crate::error::Result;
use crate::shapes::{classify, Shape};
use indexmap::IndexMap;
use serde::Deserialize;
use std::fmt;

use super::tokens::TypeToken;

/// Kind of a candidate type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    /// Class or struct with members
    Class,
    /// Enumeration with named values
    Enum,
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeKind::Class => write!(f, "class"),
            TypeKind::Enum => write!(f, "enum"),
        }
    }
}

/// One property of a class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDescriptor {
    /// Member name
    pub name: String,
    /// Declared type
    pub declared_type: TypeToken,
    /// Whether the member annotation marks it required
    pub is_required: bool,
    shape: Shape,
    ambiguity: Option<String>,
}

impl MemberDescriptor {
    /// Create a member and classify its declared type
    pub fn new(name: impl Into<String>, declared_type: TypeToken, is_required: bool) -> Self {
        let classified = classify(&declared_type);
        Self {
            name: name.into(),
            declared_type,
            is_required,
            shape: classified.shape,
            ambiguity: classified.ambiguity,
        }
    }

    /// Create a member from a raw type token
    pub fn parse(name: impl Into<String>, declared_type: &str, is_required: bool) -> Result<Self> {
        Ok(Self::new(name, TypeToken::parse(declared_type)?, is_required))
    }

    /// Shape of the declared type
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Why the shape is a fallback, if it is one
    pub fn ambiguity(&self) -> Option<&str> {
        self.ambiguity.as_deref()
    }
}

/// One candidate type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    /// Simple name
    pub name: String,
    /// Name including the code namespace
    pub full_name: String,
    /// Class or enum
    pub kind: TypeKind,
    /// Whether the type carries the contract annotation
    pub is_schema_eligible: bool,
    /// XML namespace declared by the contract annotation
    pub declared_namespace: Option<String>,
    /// Members in declaration order (classes only)
    pub members: Vec<MemberDescriptor>,
    /// Value names in declaration order (enums only)
    pub enum_values: Vec<String>,
}

impl TypeDescriptor {
    fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        let name = name.into();
        Self {
            full_name: name.clone(),
            name,
            kind,
            is_schema_eligible: false,
            declared_namespace: None,
            members: Vec::new(),
            enum_values: Vec::new(),
        }
    }

    /// Create a class descriptor
    pub fn class(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Class)
    }

    /// Create an enum descriptor
    pub fn enumeration<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut desc = Self::new(name, TypeKind::Enum);
        desc.enum_values = values.into_iter().map(Into::into).collect();
        desc
    }

    /// Place the type in a code namespace
    pub fn with_code_namespace(mut self, namespace: &str) -> Self {
        self.full_name = if namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", namespace, self.name)
        };
        self
    }

    /// Mark the type with the contract annotation
    pub fn contract(mut self, namespace: Option<&str>) -> Self {
        self.is_schema_eligible = true;
        self.declared_namespace = namespace.map(str::to_string);
        self
    }

    /// Append a member
    pub fn with_member(mut self, member: MemberDescriptor) -> Self {
        self.members.push(member);
        self
    }

    /// Check if this is a class
    pub fn is_class(&self) -> bool {
        self.kind == TypeKind::Class
    }

    /// Check if this is an enum
    pub fn is_enum(&self) -> bool {
        self.kind == TypeKind::Enum
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Own(usize),
    Dependency(usize),
}

/// The set of candidate types for one input
///
/// Own types can seed schema generation when eligible. Dependency types only
/// satisfy references.
#[derive(Debug, Clone, Default)]
pub struct TypeModel {
    name: String,
    types: Vec<TypeDescriptor>,
    dependencies: Vec<TypeDescriptor>,
    by_name: IndexMap<String, Slot>,
}

impl TypeModel {
    /// Create an empty model
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Create a model from its own types
    pub fn with_types(name: impl Into<String>, types: impl IntoIterator<Item = TypeDescriptor>) -> Self {
        let mut model = Self::new(name);
        for desc in types {
            model.add_type(desc);
        }
        model
    }

    /// Model name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add an own type
    ///
    /// The first own type with a given simple name wins lookups, ahead of any
    /// dependency type of the same name.
    pub fn add_type(&mut self, desc: TypeDescriptor) {
        let slot = Slot::Own(self.types.len());
        if !matches!(self.by_name.get(&desc.name), Some(Slot::Own(_))) {
            self.by_name.insert(desc.name.clone(), slot);
        }
        self.types.push(desc);
    }

    /// Add a type that only satisfies references
    pub fn add_dependency_type(&mut self, desc: TypeDescriptor) {
        let slot = Slot::Dependency(self.dependencies.len());
        self.by_name.entry(desc.name.clone()).or_insert(slot);
        self.dependencies.push(desc);
    }

    /// Merge another model's types in as dependency types
    pub fn add_dependency(&mut self, other: TypeModel) {
        for desc in other.types.into_iter().chain(other.dependencies) {
            self.add_dependency_type(desc);
        }
    }

    /// Own types in model order
    pub fn types(&self) -> &[TypeDescriptor] {
        &self.types
    }

    /// Dependency types in load order
    pub fn dependency_types(&self) -> &[TypeDescriptor] {
        &self.dependencies
    }

    /// Every known type, own types first
    pub fn known_types(&self) -> impl Iterator<Item = &TypeDescriptor> {
        self.types.iter().chain(self.dependencies.iter())
    }

    /// Own types carrying the contract annotation
    pub fn eligible_types(&self) -> impl Iterator<Item = &TypeDescriptor> {
        self.types.iter().filter(|t| t.is_schema_eligible)
    }

    /// Look up a known type by simple name
    pub fn find(&self, name: &str) -> Option<&TypeDescriptor> {
        match self.by_name.get(name)? {
            Slot::Own(i) => self.types.get(*i),
            Slot::Dependency(i) => self.dependencies.get(*i),
        }
    }

    /// Number of known types
    pub fn len(&self) -> usize {
        self.types.len() + self.dependencies.len()
    }

    /// Check if no type is known
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::PrimitiveKind;

    #[test]
    fn test_member_shape_computed_once() {
        let member = MemberDescriptor::parse("Pets", "List<Zoo.Animal>", false).unwrap();
        assert_eq!(member.shape(), &Shape::List(TypeToken::simple("Zoo.Animal")));
        assert!(member.ambiguity().is_none());

        let member = MemberDescriptor::parse("Age", "System.Int32", true).unwrap();
        assert_eq!(member.shape(), &Shape::Primitive(PrimitiveKind::Int32));
        assert!(member.is_required);
    }

    #[test]
    fn test_member_ambiguity() {
        let member = MemberDescriptor::parse("Tags", "Dictionary<string, int>", false).unwrap();
        assert_eq!(member.shape(), &Shape::Named("Dictionary".to_string()));
        assert!(member.ambiguity().is_some());
    }

    #[test]
    fn test_member_parse_error() {
        assert!(MemberDescriptor::parse("Broken", "List<", false).is_err());
    }

    #[test]
    fn test_descriptor_builders() {
        let desc = TypeDescriptor::class("Person")
            .with_code_namespace("Zoo.Model")
            .contract(Some("http://example.com/zoo"));
        assert_eq!(desc.full_name, "Zoo.Model.Person");
        assert!(desc.is_schema_eligible);
        assert!(desc.is_class());
        assert_eq!(desc.declared_namespace.as_deref(), Some("http://example.com/zoo"));

        let color = TypeDescriptor::enumeration("Color", ["Red", "Green"]);
        assert!(color.is_enum());
        assert!(!color.is_schema_eligible);
        assert_eq!(color.enum_values, vec!["Red", "Green"]);
    }

    #[test]
    fn test_model_lookup_prefers_own_types() {
        let mut model = TypeModel::new("Zoo");
        model.add_dependency_type(TypeDescriptor::class("Address").with_code_namespace("Common"));
        model.add_type(TypeDescriptor::class("Address").with_code_namespace("Zoo"));
        model.add_type(TypeDescriptor::class("Address").with_code_namespace("Zoo.Other"));

        assert_eq!(model.find("Address").unwrap().full_name, "Zoo.Address");
        assert_eq!(model.len(), 3);
        assert!(model.find("Ghost").is_none());
    }

    #[test]
    fn test_model_eligible_types_exclude_dependencies() {
        let mut common = TypeModel::new("Common");
        common.add_type(TypeDescriptor::class("Address").contract(None));

        let mut model = TypeModel::with_types(
            "Zoo",
            [
                TypeDescriptor::class("Person").contract(None),
                TypeDescriptor::class("Helper"),
            ],
        );
        model.add_dependency(common);

        let eligible: Vec<_> = model.eligible_types().map(|t| t.name.as_str()).collect();
        assert_eq!(eligible, vec!["Person"]);
        assert!(model.find("Address").is_some());
        assert_eq!(model.dependency_types().len(), 1);
        assert_eq!(model.known_types().count(), 3);
    }
}
