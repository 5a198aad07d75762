//! Error types for code generation.

use thiserror::Error;

/// Error type for code generation operations.
///
/// Every variant is fatal for the run: no partial file set is produced.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Schema parsing error.
    #[error("schema parse error: {0}")]
    Parse(#[from] refdecl_schema::ParseError),

    /// Schema validation error.
    #[error("schema error: {0}")]
    Schema(#[from] refdecl_schema::SchemaError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A type reference names a class or enum absent from the schema.
    #[error("unresolved type '{name}' referenced by '{class}.{member}'")]
    UnresolvedReference {
        /// Class being generated.
        class: String,
        /// Member holding the reference.
        member: String,
        /// Missing class or enum name.
        name: String,
    },

    /// Members of one class cannot be rendered consistently.
    #[error("inconsistent signature for '{class}.{member}': {reason}")]
    SignatureInconsistency {
        /// Owning class.
        class: String,
        /// Offending member.
        member: String,
        /// What is inconsistent.
        reason: String,
    },

    /// Two units render to the same output file, or a class takes a name
    /// the prelude declares.
    #[error("output file '{file}' claimed by both '{first}' and '{second}'")]
    OutputCollision {
        /// Colliding file name.
        file: String,
        /// Unit that claimed the file first.
        first: String,
        /// Unit that collided.
        second: String,
    },
}

impl CodegenError {
    /// Creates an unresolved reference error.
    pub fn unresolved(
        class: impl Into<String>,
        member: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self::UnresolvedReference {
            class: class.into(),
            member: member.into(),
            name: name.into(),
        }
    }

    /// Creates a signature inconsistency error.
    pub fn inconsistent(
        class: impl Into<String>,
        member: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::SignatureInconsistency {
            class: class.into(),
            member: member.into(),
            reason: reason.into(),
        }
    }
}
