//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and functions.
//!
//! ```ignore
//! use refdecl::prelude::*;
//! ```

// Schema types
pub use refdecl_schema::{
    Access, ClassDef, ConstantDef, DefaultValue, EnumGroupDef, MethodDef, ParamDef, ParseError,
    PrimitiveType, PropertyDef, Schema, SchemaError, SchemaIr, SignalDef, SignalParam, TypeRef,
    Visibility, parse_schema, parse_schema_file, validate_schema,
};

// Generation
pub use refdecl_codegen::ts::{
    ClassEmitter, ImportSet, MemberDecl, MemberKind, ModuleAssembler, SignatureRenderer,
    TypeMapper,
};
pub use refdecl_codegen::{
    CodegenError, DeclarationUnit, FileSet, GeneratedFile, Generator, GeneratorConfig,
    GeneratorConfigBuilder, generate_from_file, generate_from_xml, generate_to_dir,
};
