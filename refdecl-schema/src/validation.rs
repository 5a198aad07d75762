//! Schema validation utilities.
//!
//! This module checks the invariants code generation relies on: an acyclic,
//! fully resolved inheritance graph, well-ordered optional parameters and
//! names usable as declaration identifiers.

use crate::classes::{ClassDef, MethodDef};
use crate::error::SchemaError;
use crate::types::{Schema, is_identifier};
use std::collections::HashSet;

/// Validates a parsed schema for correctness.
///
/// # Arguments
/// * `schema` - The schema to validate
///
/// # Returns
/// Ok(()) if valid, or SchemaError describing the issue.
///
/// # Errors
/// Returns `SchemaError` if validation fails.
pub fn validate_schema(schema: &Schema) -> Result<(), SchemaError> {
    validate_inheritance(schema)?;
    for class in &schema.classes {
        validate_class(class)?;
    }
    Ok(())
}

/// Checks that every base resolves and that no class reaches itself.
///
/// Each walk is bounded by the number of classes, so a cycle is reported
/// instead of looping.
fn validate_inheritance(schema: &Schema) -> Result<(), SchemaError> {
    for class in &schema.classes {
        if let Some(base) = &class.base
            && !schema.has_class(base)
        {
            return Err(SchemaError::UnresolvedBase {
                class: class.name.clone(),
                base: base.clone(),
            });
        }
    }

    let mut acyclic: HashSet<&str> = HashSet::new();
    for class in &schema.classes {
        let mut path: Vec<&str> = vec![class.name.as_str()];
        let mut current = class;

        while let Some(base) = current.base.as_deref() {
            if acyclic.contains(base) {
                break;
            }
            if path.contains(&base) || path.len() > schema.classes.len() {
                path.push(base);
                return Err(SchemaError::CircularInheritance {
                    path: path.join(" -> "),
                });
            }
            path.push(base);
            match schema.get_class(base) {
                Some(next) => current = next,
                None => break,
            }
        }

        acyclic.extend(path);
    }

    Ok(())
}

/// Validates the members of one class.
fn validate_class(class: &ClassDef) -> Result<(), SchemaError> {
    let mut properties = HashSet::new();
    for property in &class.properties {
        if property.name.is_empty()
            || property
                .name
                .contains(|c: char| c == '"' || c == '\\' || c.is_control())
        {
            return Err(SchemaError::invalid_name("property", &class.name, &property.name));
        }
        if !properties.insert(property.name.as_str()) {
            return Err(SchemaError::validation(
                &class.name,
                format!("duplicate property '{}'", property.name),
            ));
        }
    }

    for method in &class.methods {
        validate_method(class, method)?;
    }

    for group in &class.enums {
        if let Some(name) = &group.name
            && !is_identifier(name)
        {
            return Err(SchemaError::invalid_name("enum", &class.name, name));
        }
        let mut constants = HashSet::new();
        for constant in &group.constants {
            if !is_identifier(&constant.name) {
                return Err(SchemaError::invalid_name("constant", &class.name, &constant.name));
            }
            if !constants.insert(constant.name.as_str()) {
                return Err(SchemaError::validation(
                    &class.name,
                    format!(
                        "duplicate constant '{}' in {}",
                        constant.name,
                        group.name.as_deref().unwrap_or("class constants")
                    ),
                ));
            }
        }
    }

    let mut signals = HashSet::new();
    for signal in &class.signals {
        if !is_identifier(&signal.name) {
            return Err(SchemaError::invalid_name("signal", &class.name, &signal.name));
        }
        if !signals.insert(signal.name.as_str()) {
            return Err(SchemaError::validation(
                &class.name,
                format!("duplicate signal '{}'", signal.name),
            ));
        }
        for param in &signal.params {
            if !is_identifier(&param.name) {
                return Err(SchemaError::invalid_name("parameter", &class.name, &param.name));
            }
        }
    }

    Ok(())
}

/// Validates one method: identifiers and optional-parameter ordering.
fn validate_method(class: &ClassDef, method: &MethodDef) -> Result<(), SchemaError> {
    if !is_identifier(&method.name) {
        return Err(SchemaError::invalid_name("method", &class.name, &method.name));
    }

    let mut params = HashSet::new();
    for param in &method.params {
        if !is_identifier(&param.name) {
            return Err(SchemaError::invalid_name("parameter", &class.name, &param.name));
        }
        if !params.insert(param.name.as_str()) {
            return Err(SchemaError::validation(
                &class.name,
                format!("duplicate parameter '{}' in method '{}'", param.name, method.name),
            ));
        }
    }

    if let Some(param) = method.required_after_optional() {
        return Err(SchemaError::RequiredAfterOptional {
            class: class.name.clone(),
            method: method.name.clone(),
            param: param.name.clone(),
        });
    }

    Ok(())
}
