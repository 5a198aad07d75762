//! Schema type definitions.
//!
//! This module contains the schema root, the primitive type table, type
//! references and parameter default values.

use crate::classes::ClassDef;
use crate::error::ParseError;
use std::collections::HashMap;
use std::fmt;

/// Complete reflection schema.
#[derive(Debug, Clone)]
pub struct Schema {
    /// Engine API version string.
    pub version: String,
    /// Class definitions in document order.
    pub classes: Vec<ClassDef>,
    /// Class lookup map, filled by `add_class`.
    class_map: HashMap<String, usize>,
}

impl Schema {
    /// Creates a new empty schema.
    #[must_use]
    pub fn new(version: String) -> Self {
        Self {
            version,
            classes: Vec::new(),
            class_map: HashMap::new(),
        }
    }

    /// Adds a class definition to the schema.
    ///
    /// # Errors
    /// Returns `ParseError::DuplicateDefinition` if a class with the same
    /// name was already added.
    pub fn add_class(&mut self, class: ClassDef) -> Result<(), ParseError> {
        if self.class_map.contains_key(&class.name) {
            return Err(ParseError::duplicate("class", &class.name));
        }
        self.class_map.insert(class.name.clone(), self.classes.len());
        self.classes.push(class);
        Ok(())
    }

    /// Looks up a class by name.
    #[must_use]
    pub fn get_class(&self, name: &str) -> Option<&ClassDef> {
        self.class_map.get(name).map(|&idx| &self.classes[idx])
    }

    /// Returns true if a class with the given name exists.
    #[must_use]
    pub fn has_class(&self, name: &str) -> bool {
        self.class_map.contains_key(name)
    }
}

/// Primitive types a reflection schema can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    /// Boolean.
    Bool,
    /// Engine default integer (64-bit).
    Int,
    /// Signed 8-bit integer.
    Int8,
    /// Signed 16-bit integer.
    Int16,
    /// Signed 32-bit integer.
    Int32,
    /// Signed 64-bit integer.
    Int64,
    /// Unsigned 8-bit integer.
    Uint8,
    /// Unsigned 16-bit integer.
    Uint16,
    /// Unsigned 32-bit integer.
    Uint32,
    /// Unsigned 64-bit integer.
    Uint64,
    /// Engine default float (64-bit).
    Float,
    /// 32-bit floating point.
    Float32,
    /// 64-bit floating point.
    Float64,
    /// Alias of 64-bit floating point.
    Double,
    /// Build-dependent real number.
    Real,
    /// Owned string.
    String,
    /// Interned string.
    StringName,
    /// Path into the engine's object tree.
    NodePath,
}

impl PrimitiveType {
    /// Every primitive tag, in declaration order.
    pub const ALL: [Self; 18] = [
        Self::Bool,
        Self::Int,
        Self::Int8,
        Self::Int16,
        Self::Int32,
        Self::Int64,
        Self::Uint8,
        Self::Uint16,
        Self::Uint32,
        Self::Uint64,
        Self::Float,
        Self::Float32,
        Self::Float64,
        Self::Double,
        Self::Real,
        Self::String,
        Self::StringName,
        Self::NodePath,
    ];

    /// Returns the schema name of this primitive.
    #[must_use]
    pub const fn schema_name(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Uint8 => "uint8",
            Self::Uint16 => "uint16",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
            Self::Float => "float",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::Double => "double",
            Self::Real => "real",
            Self::String => "String",
            Self::StringName => "StringName",
            Self::NodePath => "NodePath",
        }
    }

    /// Parses a primitive type from its schema name.
    #[must_use]
    pub fn from_schema_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.schema_name() == name)
    }
}

/// Deepest `Array[...]` nesting accepted in a type reference.
pub const MAX_TYPE_NESTING: usize = 64;

/// A single type mention inside the schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// No value.
    Void,
    /// Primitive value.
    Primitive(PrimitiveType),
    /// Engine class by name.
    Class(String),
    /// Enum group by name. A missing owner refers to the enclosing class.
    Enum {
        /// Owning class, if qualified.
        owner: Option<String>,
        /// Group name.
        name: String,
    },
    /// Homogeneous container.
    Array(Box<TypeRef>),
    /// Dynamically typed slot, possibly null.
    Variant,
}

impl TypeRef {
    /// Parses a type reference from its schema text.
    ///
    /// Container nesting is unwrapped iteratively and capped at
    /// [`MAX_TYPE_NESTING`] levels.
    ///
    /// # Arguments
    /// * `text` - Type text such as `float`, `Array[Node]` or `enum::Node.ProcessMode`
    /// * `context` - Location used in error messages
    ///
    /// # Errors
    /// Returns `ParseError::InvalidTypeRef` if the text is not a valid
    /// reference or nests containers too deeply.
    pub fn parse(text: &str, context: &str) -> Result<Self, ParseError> {
        let mut leaf = text.trim();
        let mut depth = 0usize;
        while let Some(inner) = leaf
            .strip_prefix("Array[")
            .and_then(|rest| rest.strip_suffix(']'))
        {
            depth += 1;
            if depth > MAX_TYPE_NESTING {
                return Err(ParseError::invalid_type(text, context));
            }
            leaf = inner.trim();
        }

        let mut parsed =
            Self::parse_leaf(leaf).ok_or_else(|| ParseError::invalid_type(text, context))?;
        if depth > 0 && parsed.is_void() {
            return Err(ParseError::invalid_type(text, context));
        }
        for _ in 0..depth {
            parsed = Self::Array(Box::new(parsed));
        }
        Ok(parsed)
    }

    /// Parses a reference that is not an `Array[...]` wrapper.
    fn parse_leaf(leaf: &str) -> Option<Self> {
        match leaf {
            "" => None,
            "void" => Some(Self::Void),
            "Variant" => Some(Self::Variant),
            "Array" => Some(Self::Array(Box::new(Self::Variant))),
            _ => {
                if let Some(path) = leaf.strip_prefix("enum::") {
                    return Self::parse_enum(path);
                }
                if let Some(prim) = PrimitiveType::from_schema_name(leaf) {
                    return Some(Self::Primitive(prim));
                }
                is_identifier(leaf).then(|| Self::Class(leaf.to_string()))
            }
        }
    }

    /// Parses an enum path of the form `Owner.Group` or `Group`.
    #[must_use]
    pub fn parse_enum(path: &str) -> Option<Self> {
        match path.rsplit_once('.') {
            Some((owner, name)) if is_identifier(owner) && is_identifier(name) => Some(Self::Enum {
                owner: Some(owner.to_string()),
                name: name.to_string(),
            }),
            None if is_identifier(path) => Some(Self::Enum {
                owner: None,
                name: path.to_string(),
            }),
            _ => None,
        }
    }

    /// Returns true for the void type.
    #[must_use]
    pub fn is_void(&self) -> bool {
        matches!(self, Self::Void)
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Void => f.write_str("void"),
            Self::Primitive(p) => f.write_str(p.schema_name()),
            Self::Class(name) => f.write_str(name),
            Self::Enum {
                owner: Some(owner),
                name,
            } => write!(f, "enum::{owner}.{name}"),
            Self::Enum { owner: None, name } => write!(f, "enum::{name}"),
            Self::Array(inner) => write!(f, "Array[{inner}]"),
            Self::Variant => f.write_str("Variant"),
        }
    }
}

/// Default value of an optional parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultValue {
    /// Value expressible as a static literal (number, boolean, null, string).
    Literal(String),
    /// Engine-constructed value; only its text is known.
    Opaque(String),
}

impl DefaultValue {
    /// Classifies raw default text.
    #[must_use]
    pub fn classify(raw: &str) -> Self {
        let text = raw.trim();
        let is_literal = matches!(text, "true" | "false" | "null")
            || is_numeric_literal(text)
            || is_string_literal(text);
        if is_literal {
            Self::Literal(text.to_string())
        } else {
            Self::Opaque(text.to_string())
        }
    }

    /// Returns the raw text of the default.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Literal(text) | Self::Opaque(text) => text,
        }
    }

    /// Returns true if the value is a static literal.
    #[must_use]
    pub const fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }
}

fn is_numeric_literal(text: &str) -> bool {
    if text.parse::<i64>().is_ok() || text.parse::<u64>().is_ok() {
        return true;
    }
    // `inf`/`nan` parse as f64 but have no literal spelling in the output.
    text.parse::<f64>().is_ok_and(f64::is_finite)
        && text
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
}

fn is_string_literal(text: &str) -> bool {
    let Some(body) = text
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    else {
        return false;
    };
    let mut escaped = false;
    for c in body.chars() {
        match (escaped, c) {
            (true, _) => escaped = false,
            (false, '\\') => escaped = true,
            (false, '"') => return false,
            _ => {}
        }
    }
    !escaped
}

/// Returns true if `name` is a plain identifier (`[A-Za-z_][A-Za-z0-9_]*`).
#[must_use]
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
