//! # contract-xsd
//!
//! Generates XML Schema (XSD) type definitions from a model of annotated data
//! contract types.
//!
//! Every type carrying the contract annotation seeds the schema. The closure
//! resolver then follows member references (plain custom types, list element
//! types and nullable payload types) until no new name turns up, emitting one
//! definition per distinct type name. Names nothing defines are reported once
//! and never emitted.
//!
//! ## Features
//!
//! - Primitive mapping to the built-in XSD types
//! - `ArrayOf<Name>` wrapper types for list members
//! - Nillable elements for nullable members
//! - Root element declarations
//! - Structural compile checks with severity-tagged diagnostics
//! - JSON type models with transitive dependency loading
//!
//! ## Example
//!
//! ```rust
//! use contract_xsd::model::{MemberDescriptor, TypeDescriptor, TypeModel};
//! use contract_xsd::{generate_schema, to_xsd_string, Diagnostic};
//!
//! let model = TypeModel::with_types(
//!     "Zoo",
//!     [
//!         TypeDescriptor::class("Person")
//!             .contract(None)
//!             .with_member(MemberDescriptor::parse("Pets", "List<Animal>", false)?),
//!         TypeDescriptor::class("Animal"),
//!     ],
//! );
//!
//! let mut diagnostics: Vec<Diagnostic> = Vec::new();
//! let schema = generate_schema(&model, &["Person".to_string()], &mut diagnostics);
//! assert!(diagnostics.is_empty());
//!
//! let xsd = to_xsd_string(&schema)?;
//! assert!(xsd.contains(r#"<xs:complexType name="ArrayOfAnimal">"#));
//! # Ok::<(), contract_xsd::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Foundation
pub mod error;
pub mod names;
pub mod namespaces;

// Type model
pub mod model;
pub mod primitives;
pub mod shapes;

// Schema components and generation
pub mod assembler;
pub mod components;
pub mod emitter;
pub mod resolver;

// Input and output
pub mod exports;
pub mod generator;
pub mod loaders;
pub mod writer;

// Re-exports for convenience
pub use assembler::{assemble, CompiledSchema, SchemaSet};
pub use emitter::SchemaFragment;
pub use error::{Diagnostic, DiagnosticKind, DiagnosticSink, Diagnostics, Error, Result, Severity};
pub use generator::{generate_schema, Generator, GeneratorConfig};
pub use loaders::TypeModelLoader;
pub use resolver::{resolve, ClosureResolver, Resolution};
pub use writer::{to_xsd_string, write_schema};

/// Version of the contract-xsd library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// XML Schema namespace
pub const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";
