//! Error and diagnostic types for contract-xsd
//!
//! Two channels exist. [`Error`] is fatal for one input (a model file that
//! cannot be read, an output file that already exists). [`Diagnostic`] is
//! never fatal: the schema generator reports it through a [`DiagnosticSink`]
//! and keeps going.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{error, warn};

/// Result type alias using contract-xsd Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for contract-xsd operations
#[derive(Error, Debug)]
pub enum Error {
    /// Type model could not be loaded
    #[error("load error: {0}")]
    Load(String),

    /// Type token could not be parsed
    #[error("type token error: {0}")]
    Token(String),

    /// Namespace error
    #[error("namespace error: {0}")]
    Namespace(String),

    /// Output file exists and overwriting was not requested
    #[error("{} exists. Use -f to overwrite", .0.display())]
    OutputExists(PathBuf),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// XML writing error
    #[error("XML error: {0}")]
    Xml(String),
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Xml(err.to_string())
    }
}

/// Severity of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    /// Suspicious but the schema is still usable
    Warning,
    /// The compiled schema will not validate as-is
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "WARNING"),
            Severity::Error => write!(f, "ERROR"),
        }
    }
}

/// What a diagnostic is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// A referenced custom type name has no matching descriptor
    UndefinedTypeReference,
    /// A member's declared type does not fit a recognized shape
    AmbiguousShape,
    /// Two eligible descriptors share a simple name
    DuplicateTypeName,
    /// Structural problem found while compiling the schema set
    SchemaCompile,
}

/// A non-fatal problem found while generating a schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Category
    pub kind: DiagnosticKind,
    /// Severity
    pub severity: Severity,
    /// Human readable message
    pub message: String,
    /// Type name the diagnostic is about
    pub type_name: Option<String>,
    /// Member name, when the diagnostic concerns a single member
    pub member: Option<String>,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(kind: DiagnosticKind, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity,
            message: message.into(),
            type_name: None,
            member: None,
        }
    }

    /// A reference to a type that nothing defines
    pub fn undefined_type(reference: impl Into<String>, lookup: &str) -> Self {
        let reference = reference.into();
        Self::new(
            DiagnosticKind::UndefinedTypeReference,
            Severity::Error,
            format!("Type {} is not defined", lookup),
        )
        .with_type_name(reference)
    }

    /// A member whose declared type was classified by fallback
    pub fn ambiguous_shape(owner: &str, member: &str, reason: &str) -> Self {
        Self::new(
            DiagnosticKind::AmbiguousShape,
            Severity::Warning,
            format!("{}.{}: {}", owner, member, reason),
        )
        .with_type_name(owner)
        .with_member(member)
    }

    /// A structural compile error
    pub fn compile_error(message: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::SchemaCompile, Severity::Error, message)
    }

    /// A structural compile warning
    pub fn compile_warning(message: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::SchemaCompile, Severity::Warning, message)
    }

    /// Set the type name
    pub fn with_type_name(mut self, name: impl Into<String>) -> Self {
        self.type_name = Some(name.into());
        self
    }

    /// Set the member name
    pub fn with_member(mut self, member: impl Into<String>) -> Self {
        self.member = Some(member.into());
        self
    }

    /// Check if this is an error-severity diagnostic
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)
    }
}

/// Receiver of diagnostics
pub trait DiagnosticSink {
    /// Report one diagnostic
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Collecting sink that also mirrors every diagnostic to the log
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// All diagnostics in report order
    pub fn items(&self) -> &[Diagnostic] {
        &self.items
    }

    /// Diagnostics of one kind
    pub fn of_kind(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter().filter(move |d| d.kind == kind)
    }

    /// Number of error-severity diagnostics
    pub fn error_count(&self) -> usize {
        self.items.iter().filter(|d| d.is_error()).count()
    }

    /// Number of warning-severity diagnostics
    pub fn warning_count(&self) -> usize {
        self.items.len() - self.error_count()
    }

    /// Check if any error was reported
    pub fn has_errors(&self) -> bool {
        self.items.iter().any(Diagnostic::is_error)
    }

    /// Number of diagnostics
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if nothing was reported
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl DiagnosticSink for Diagnostics {
    fn report(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Error => error!(kind = ?diagnostic.kind, "{}", diagnostic.message),
            Severity::Warning => warn!(kind = ?diagnostic.kind, "{}", diagnostic.message),
        }
        self.items.push(diagnostic);
    }
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}
