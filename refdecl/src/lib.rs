//! # RefDecl
//!
//! TypeScript ambient declaration generator for reflected engine APIs.
//!
//! RefDecl reads the reflection schema an engine publishes about its class
//! database and emits one `.d.ts` unit per class, a shared prelude of
//! numeric aliases and signal types, and an index re-exporting everything.
//!
//! ## Features
//!
//! - **Faithful inheritance** - Single-base class graph, validated acyclic
//! - **Typed surface** - Primitives, containers, enums and variants mapped to TypeScript
//! - **Overload disambiguation** - Stable positional suffixes for same-name methods
//! - **Reproducible output** - Byte-identical files for unchanged input
//!
//! ## Quick Start
//!
//! ```ignore
//! use refdecl::prelude::*;
//! use std::path::Path;
//!
//! let files = generate_from_file(Path::new("api.xml"))?;
//! files.write_to(Path::new("types"))?;
//! ```
//!
//! ## Crate Organization
//!
//! - [`schema`] - Reflection schema parsing and validation
//! - [`codegen`] - Declaration generation

pub mod prelude;

/// Reflection schema parsing and validation.
pub mod schema {
    pub use refdecl_schema::*;
}

/// Declaration generation from reflection schemas.
pub mod codegen {
    pub use refdecl_codegen::*;
}

pub use refdecl_codegen::{
    CodegenError, FileSet, Generator, GeneratorConfig, generate_from_file, generate_from_xml,
    generate_from_xml_with_config, generate_to_dir,
};

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    const SCHEMA: &str = r#"<api version="4.3">
    <class name="Object"/>
    <class name="Node" inherits="Object">
        <members>
            <member name="children" type="Array[Node]" setter=""/>
        </members>
    </class>
</api>"#;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("refdecl_codegen=debug")
            .with_test_writer()
            .try_init();
    }

    #[test]
    fn test_prelude_pipeline() {
        init_tracing();

        let schema = parse_schema(SCHEMA).expect("Failed to parse");
        let ir = SchemaIr::from_schema(schema).expect("Failed to validate");
        let config = GeneratorConfig::builder().emit_docs(false).build();
        let files = Generator::with_config(&ir, config)
            .generate()
            .expect("Failed to generate");

        let node = files.get("node.d.ts").unwrap();
        assert!(node.contains("export declare class Node extends Object {\n"));
        assert!(node.contains("    readonly children: Array<Node>;\n"));
    }

    #[test]
    fn test_facade_write_to_dir() {
        init_tracing();

        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let files = crate::generate_from_xml(SCHEMA).expect("Failed to generate");
        files.write_to(dir.path()).expect("Failed to write");

        assert!(dir.path().join("object.d.ts").is_file());
        assert!(dir.path().join("index.d.ts").is_file());
    }
}
