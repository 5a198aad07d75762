//! Indexed representation for code generation.
//!
//! This module wraps a validated schema with the lookups the generator
//! needs: classes by name, enum groups by owner, and naming helpers.

use crate::classes::ClassDef;
use crate::error::SchemaError;
use crate::types::Schema;
use crate::validation::validate_schema;
use std::collections::HashMap;

/// Validated, read-only view of a schema for code generation.
#[derive(Debug, Clone)]
pub struct SchemaIr {
    /// Engine API version string.
    pub version: String,
    /// Classes in schema order.
    pub classes: Vec<ClassDef>,
    class_index: HashMap<String, usize>,
}

impl SchemaIr {
    /// Validates a parsed schema and builds its indexed representation.
    ///
    /// # Errors
    /// Returns `SchemaError` if the schema violates any invariant checked
    /// by [`validate_schema`].
    pub fn from_schema(schema: Schema) -> Result<Self, SchemaError> {
        validate_schema(&schema)?;

        let class_index = schema
            .classes
            .iter()
            .enumerate()
            .map(|(idx, class)| (class.name.clone(), idx))
            .collect();

        Ok(Self {
            version: schema.version,
            classes: schema.classes,
            class_index,
        })
    }

    /// Gets a class by name.
    #[must_use]
    pub fn get_class(&self, name: &str) -> Option<&ClassDef> {
        self.class_index.get(name).map(|&idx| &self.classes[idx])
    }

    /// Returns true if the class exists.
    #[must_use]
    pub fn has_class(&self, name: &str) -> bool {
        self.class_index.contains_key(name)
    }

    /// Returns true if `owner` declares a named enum group `name`.
    #[must_use]
    pub fn has_enum(&self, owner: &str, name: &str) -> bool {
        self.get_class(owner)
            .is_some_and(|class| class.get_enum(name).is_some())
    }

    /// Returns the number of classes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Returns true if the schema has no classes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

/// Converts a class name to snake_case.
///
/// Acronyms stay together (`HTTPRequest` becomes `http_request`) and digits
/// attach to the preceding word (`Node3D` becomes `node3d`).
#[must_use]
pub fn to_snake_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c == '-' || c == ' ' {
            result.push('_');
            continue;
        }
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || (prev.is_uppercase() && next_is_lower) {
                result.push('_');
            }
        }
        result.extend(c.to_lowercase());
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_schema;

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("AudioStreamPlayer"), "audio_stream_player");
        assert_eq!(to_snake_case("HTTPRequest"), "http_request");
        assert_eq!(to_snake_case("HttpRequest"), "http_request");
        assert_eq!(to_snake_case("Node3D"), "node3d");
        assert_eq!(to_snake_case("Object"), "object");
        assert_eq!(to_snake_case("GLTFDocument"), "gltf_document");
    }

    #[test]
    fn test_schema_ir_from_schema() {
        let xml = r#"<api version="4.3">
    <class name="Object"/>
    <class name="Node" inherits="Object">
        <constants>
            <constant name="PROCESS_MODE_INHERIT" value="0" enum="ProcessMode"/>
        </constants>
    </class>
</api>"#;

        let schema = parse_schema(xml).expect("Failed to parse");
        let ir = SchemaIr::from_schema(schema).expect("Failed to validate");

        assert_eq!(ir.version, "4.3");
        assert_eq!(ir.len(), 2);
        assert!(ir.has_class("Node"));
        assert!(ir.has_enum("Node", "ProcessMode"));
        assert!(!ir.has_enum("Object", "ProcessMode"));
        assert!(!ir.has_enum("Missing", "ProcessMode"));
        assert_eq!(ir.get_class("Node").unwrap().base.as_deref(), Some("Object"));
    }

    #[test]
    fn test_schema_ir_rejects_invalid_schema() {
        let xml = r#"<api><class name="A" inherits="B"/></api>"#;
        let schema = parse_schema(xml).expect("Failed to parse");
        assert!(SchemaIr::from_schema(schema).is_err());
    }
}
