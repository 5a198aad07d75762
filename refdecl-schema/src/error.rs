//! Error types for schema parsing and validation.

use thiserror::Error;

/// Error type for schema parsing operations.
///
/// Every variant is a structural defect of the input document and is
/// reported before any code generation starts.
#[derive(Debug, Error)]
pub enum ParseError {
    /// XML parsing error.
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Malformed attribute syntax.
    #[error("XML attribute error: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    /// Invalid escape sequence in an attribute value.
    #[error("XML escape error: {0}")]
    Escape(#[from] quick_xml::escape::EscapeError),

    /// Missing required attribute.
    #[error("missing required attribute '{attribute}' on element '{element}'")]
    MissingAttribute {
        /// Element name.
        element: String,
        /// Attribute name.
        attribute: String,
    },

    /// Invalid attribute value.
    #[error("invalid value '{value}' for attribute '{attribute}' on element '{element}'")]
    InvalidAttribute {
        /// Element name.
        element: String,
        /// Attribute name.
        attribute: String,
        /// Invalid value.
        value: String,
    },

    /// Unknown element encountered.
    #[error("unknown element '{element}' in context '{context}'")]
    UnknownElement {
        /// Element name.
        element: String,
        /// Parent context.
        context: String,
    },

    /// Malformed type reference text.
    #[error("malformed type reference '{text}' in {context}")]
    InvalidTypeRef {
        /// Offending type text.
        text: String,
        /// Where the reference appeared (`Class.member`).
        context: String,
    },

    /// Duplicate definition.
    #[error("duplicate {kind} definition: '{name}'")]
    DuplicateDefinition {
        /// Kind of definition (class, constant, ...).
        kind: String,
        /// Name of the duplicate.
        name: String,
    },

    /// A class declares more than one base class.
    #[error("class '{class}' declares multiple base classes: '{bases}'")]
    MultipleInheritance {
        /// Class name.
        class: String,
        /// Raw `inherits` value.
        bases: String,
    },

    /// Invalid schema structure.
    #[error("invalid schema structure: {message}")]
    InvalidStructure {
        /// Error message.
        message: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// UTF-8 decoding error.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

/// Error type for schema validation.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// A base class reference that names no class of the schema.
    #[error("class '{class}' inherits from unknown class '{base}'")]
    UnresolvedBase {
        /// Class declaring the base.
        class: String,
        /// Missing base name.
        base: String,
    },

    /// The class graph contains a cycle.
    #[error("circular inheritance detected: {path}")]
    CircularInheritance {
        /// Cycle path, `A -> B -> A`.
        path: String,
    },

    /// A required parameter follows an optional one.
    #[error(
        "method '{class}.{method}': required parameter '{param}' follows an optional parameter"
    )]
    RequiredAfterOptional {
        /// Owning class.
        class: String,
        /// Method name.
        method: String,
        /// First offending parameter.
        param: String,
    },

    /// A name that cannot be used as a declaration identifier.
    #[error("invalid {kind} name '{name}' in class '{class}'")]
    InvalidName {
        /// Kind of name (class, constant, enum, ...).
        kind: String,
        /// Owning class.
        class: String,
        /// The offending name.
        name: String,
    },

    /// Validation error.
    #[error("validation error in class '{class}': {message}")]
    Validation {
        /// Owning class.
        class: String,
        /// Error message.
        message: String,
    },
}

impl ParseError {
    /// Creates a missing attribute error.
    pub fn missing_attr(element: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::MissingAttribute {
            element: element.into(),
            attribute: attribute.into(),
        }
    }

    /// Creates an invalid attribute error.
    pub fn invalid_attr(
        element: impl Into<String>,
        attribute: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::InvalidAttribute {
            element: element.into(),
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    /// Creates an unknown element error.
    pub fn unknown_element(element: impl Into<String>, context: impl Into<String>) -> Self {
        Self::UnknownElement {
            element: element.into(),
            context: context.into(),
        }
    }

    /// Creates a duplicate definition error.
    pub fn duplicate(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self::DuplicateDefinition {
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// Creates a malformed type reference error.
    pub fn invalid_type(text: impl Into<String>, context: impl Into<String>) -> Self {
        Self::InvalidTypeRef {
            text: text.into(),
            context: context.into(),
        }
    }
}

impl SchemaError {
    /// Creates a validation error for a class.
    pub fn validation(class: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            class: class.into(),
            message: message.into(),
        }
    }

    /// Creates an invalid name error.
    pub fn invalid_name(
        kind: impl Into<String>,
        class: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self::InvalidName {
            kind: kind.into(),
            class: class.into(),
            name: name.into(),
        }
    }
}
