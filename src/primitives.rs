//! Built-in scalar kinds and their XML Schema names
//!
//! A fixed table maps the scalar kinds a contract member may declare to the
//! XSD built-in type it is written as. Lookup by type token accepts the
//! spellings a type model uses for those kinds.

use crate::model::TypeToken;
use crate::namespaces::QName;
use std::collections::HashMap;
use std::fmt;

/// XSD string type name
pub const XSD_STRING: &str = "string";
/// XSD int type name
pub const XSD_INT: &str = "int";
/// XSD boolean type name
pub const XSD_BOOLEAN: &str = "boolean";
/// XSD float type name
pub const XSD_FLOAT: &str = "float";
/// XSD double type name
pub const XSD_DOUBLE: &str = "double";
/// XSD dateTime type name
pub const XSD_DATETIME: &str = "dateTime";

/// Scalar kinds with a fixed XSD mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    /// Text
    Text,
    /// 32-bit signed integer
    Int32,
    /// Boolean
    Boolean,
    /// Single precision float
    Single,
    /// Double precision float
    Double,
    /// Timestamp
    Timestamp,
}

impl PrimitiveKind {
    /// All kinds, in table order
    pub const ALL: [PrimitiveKind; 6] = [
        PrimitiveKind::Text,
        PrimitiveKind::Int32,
        PrimitiveKind::Boolean,
        PrimitiveKind::Single,
        PrimitiveKind::Double,
        PrimitiveKind::Timestamp,
    ];

    /// Local name of the XSD built-in type
    pub fn xsd_local_name(self) -> &'static str {
        match self {
            PrimitiveKind::Text => XSD_STRING,
            PrimitiveKind::Int32 => XSD_INT,
            PrimitiveKind::Boolean => XSD_BOOLEAN,
            PrimitiveKind::Single => XSD_FLOAT,
            PrimitiveKind::Double => XSD_DOUBLE,
            PrimitiveKind::Timestamp => XSD_DATETIME,
        }
    }

    /// Find the kind whose XSD local name is `name`
    pub fn from_xsd_local_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.xsd_local_name() == name)
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.xsd_local_name())
    }
}

lazy_static::lazy_static! {
    /// Type token spellings of each primitive kind, keyed by full name
    static ref TOKEN_TABLE: HashMap<&'static str, PrimitiveKind> = {
        let mut m = HashMap::new();
        for token in ["string", "String", "System.String", "str"] {
            m.insert(token, PrimitiveKind::Text);
        }
        for token in ["int", "Int32", "System.Int32", "i32"] {
            m.insert(token, PrimitiveKind::Int32);
        }
        for token in ["bool", "Boolean", "System.Boolean"] {
            m.insert(token, PrimitiveKind::Boolean);
        }
        for token in ["float", "Single", "System.Single", "f32"] {
            m.insert(token, PrimitiveKind::Single);
        }
        for token in ["double", "Double", "System.Double", "f64"] {
            m.insert(token, PrimitiveKind::Double);
        }
        for token in ["DateTime", "System.DateTime"] {
            m.insert(token, PrimitiveKind::Timestamp);
        }
        m
    };
}

/// XSD qualified name of a primitive kind
pub fn primitive_xml_name(kind: PrimitiveKind) -> QName {
    QName::xsd(kind.xsd_local_name())
}

/// Primitive kind spelled by a parsed token, if any
///
/// Only non-generic tokens qualify, and the whole dotted name must match:
/// `System.Int32` is a primitive, `Zoo.Int32` is not.
pub fn primitive_kind_of(token: &TypeToken) -> Option<PrimitiveKind> {
    if token.is_generic() {
        return None;
    }
    TOKEN_TABLE.get(token.full_name().as_str()).copied()
}

/// XSD qualified name of the primitive spelled by a raw type token
pub fn primitive_xml_name_by_type_token(token: &str) -> Option<QName> {
    let parsed = TypeToken::parse(token).ok()?;
    primitive_kind_of(&parsed).map(primitive_xml_name)
}
