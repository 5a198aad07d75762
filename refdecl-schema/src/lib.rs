//! # RefDecl Schema
//!
//! Reflection schema parser and class model.
//!
//! This crate provides:
//! - XML parsing of an engine's reflected class database
//! - Type definitions for classes, members, enums and signals
//! - Schema validation (inheritance graph, parameter ordering, names)
//! - Indexed representation for code generation

pub mod classes;
pub mod error;
pub mod ir;
pub mod parser;
pub mod types;
pub mod validation;

pub use classes::{
    Access, ClassDef, ConstantDef, EnumGroupDef, MethodDef, ParamDef, PropertyDef, SignalDef,
    SignalParam, Visibility,
};
pub use error::{ParseError, SchemaError};
pub use ir::SchemaIr;
pub use parser::{parse_schema, parse_schema_file};
pub use types::{DefaultValue, PrimitiveType, Schema, TypeRef};
pub use validation::validate_schema;
