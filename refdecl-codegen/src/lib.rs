//! # RefDecl Codegen
//!
//! TypeScript declaration generation from reflection schemas.
//!
//! This crate provides:
//! - Type mapping from schema references to TypeScript types
//! - Member signature rendering with overload disambiguation
//! - One ambient declaration unit per class
//! - Output assembly with a shared prelude and an index

pub mod config;
pub mod error;
pub mod generator;
pub mod ts;

pub use config::{GeneratorConfig, GeneratorConfigBuilder};
pub use error::CodegenError;
pub use generator::Generator;
pub use ts::{DeclarationUnit, FileSet, GeneratedFile};

use std::path::Path;

/// Generates declarations from a reflection schema string.
///
/// # Arguments
/// * `xml` - Reflection schema content
///
/// # Returns
/// The generated file set.
///
/// # Errors
/// Returns `CodegenError` if parsing, validation or generation fails.
pub fn generate_from_xml(xml: &str) -> Result<FileSet, CodegenError> {
    generate_from_xml_with_config(xml, GeneratorConfig::default())
}

/// Generates declarations from a reflection schema string with a custom
/// configuration.
///
/// # Errors
/// Returns `CodegenError` if parsing, validation or generation fails.
pub fn generate_from_xml_with_config(
    xml: &str,
    config: GeneratorConfig,
) -> Result<FileSet, CodegenError> {
    let schema = refdecl_schema::parse_schema(xml)?;
    let ir = refdecl_schema::SchemaIr::from_schema(schema)?;
    Generator::with_config(&ir, config).generate()
}

/// Generates declarations from a reflection schema file.
///
/// # Arguments
/// * `path` - Path to the reflection schema file
///
/// # Returns
/// The generated file set.
///
/// # Errors
/// Returns `CodegenError` if reading, parsing, or generation fails.
pub fn generate_from_file(path: &Path) -> Result<FileSet, CodegenError> {
    let xml = std::fs::read_to_string(path)?;
    generate_from_xml(&xml)
}

/// Generates declarations from a schema file and writes them to a directory.
///
/// Nothing is written unless the whole file set was generated.
///
/// # Errors
/// Returns `CodegenError` if generation fails or the output cannot be written.
pub fn generate_to_dir(schema_path: &Path, out_dir: &Path) -> Result<FileSet, CodegenError> {
    let files = generate_from_file(schema_path)?;
    files.write_to(out_dir)?;
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAYER_SCHEMA: &str = r#"<api version="4.3">
    <class name="AudioPlayer">
        <members>
            <member name="volume" type="float"/>
        </members>
        <methods>
            <method name="play">
                <param name="from" type="float" default="0.0"/>
            </method>
        </methods>
    </class>
</api>"#;

    #[test]
    fn test_generate_single_class() {
        let files = generate_from_xml(PLAYER_SCHEMA).expect("Failed to generate");

        assert_eq!(files.len(), 3);
        let unit = files.get("audio_player.d.ts").expect("Missing unit");
        assert!(unit.contains("import { float } from \"./_primitives\";\n"));
        assert!(unit.contains(
            "export declare class AudioPlayer {\n\
             \x20   volume: float;\n\
             \x20   play(from?: float /* = 0.0 */): void;\n\
             }\n"
        ));
        assert!(!unit.contains("extends"));
        assert!(
            files
                .get("index.d.ts")
                .unwrap()
                .contains("export * from \"./audio_player\";\n")
        );
    }

    #[test]
    fn test_generate_mutual_reference() {
        let xml = r#"<api>
    <class name="A"><members><member name="b" type="B"/></members></class>
    <class name="B"><members><member name="a" type="A"/></members></class>
</api>"#;

        let files = generate_from_xml(xml).expect("Failed to generate");
        let a = files.get("a.d.ts").unwrap();
        let b = files.get("b.d.ts").unwrap();

        assert!(a.contains("import { B } from \"./b\";\n"));
        assert!(a.contains("    b: B;\n"));
        assert!(b.contains("import { A } from \"./a\";\n"));
        assert!(b.contains("    a: A;\n"));
    }

    #[test]
    fn test_generate_overloads() {
        let xml = r#"<api>
    <class name="Range">
        <methods>
            <method name="get_value"><return type="float"/></method>
            <method name="get_value"><return type="float"/><param name="idx" type="int"/></method>
        </methods>
    </class>
</api>"#;

        let files = generate_from_xml(xml).expect("Failed to generate");
        let unit = files.get("range.d.ts").unwrap();

        assert!(unit.contains("    get_value(): float;\n"));
        assert!(unit.contains("    get_value_1(idx: int64): float;\n"));
    }

    #[test]
    fn test_class_shadowing_prelude_is_rejected() {
        let xml = r#"<api>
    <class name="Signal">
        <signals><signal name="fired"/></signals>
    </class>
    <class name="float">
        <members><member name="x" type="float"/></members>
    </class>
</api>"#;

        assert!(matches!(
            generate_from_xml(xml),
            Err(CodegenError::OutputCollision { ref second, .. }) if second == "Signal"
        ));
    }

    #[test]
    fn test_unresolved_class_writes_nothing() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let schema_path = dir.path().join("api.xml");
        let out_dir = dir.path().join("out");
        std::fs::write(
            &schema_path,
            r#"<api><class name="Node"><members><member name="tree" type="SceneTree"/></members></class></api>"#,
        )
        .expect("Failed to write schema");

        let err = generate_to_dir(&schema_path, &out_dir).unwrap_err();
        match err {
            CodegenError::UnresolvedReference {
                class,
                member,
                name,
            } => {
                assert_eq!(class, "Node");
                assert_eq!(member, "tree");
                assert_eq!(name, "SceneTree");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(!out_dir.exists());
    }

    #[test]
    fn test_generate_to_dir() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let schema_path = dir.path().join("api.xml");
        let out_dir = dir.path().join("out");
        std::fs::write(&schema_path, PLAYER_SCHEMA).expect("Failed to write schema");

        let files = generate_to_dir(&schema_path, &out_dir).expect("Failed to generate");
        for name in files.names() {
            assert!(out_dir.join(name).is_file(), "{name} not written");
        }
    }

    #[test]
    fn test_generate_is_deterministic() {
        let first = generate_from_xml(PLAYER_SCHEMA).expect("Failed to generate");
        let second = generate_from_xml(PLAYER_SCHEMA).expect("Failed to generate");
        assert_eq!(first, second);
    }

    #[test]
    fn test_round_trip_member_counts() {
        let xml = r#"<api>
    <class name="Skeleton">
        <members>
            <member name="name" type="String"/>
            <member name="bone_pose" type="float" indexed="true"/>
        </members>
        <methods>
            <method name="reset"/>
            <method name="find"><param name="n" type="String"/></method>
            <method name="find"><param name="i" type="int"/></method>
        </methods>
        <constants>
            <constant name="MODE_A" value="0" enum="Mode"/>
            <constant name="MODE_B" value="7" enum="Mode"/>
            <constant name="FLAG_X" value="-4" enum="Flags"/>
        </constants>
    </class>
</api>"#;

        let files = generate_from_xml(xml).expect("Failed to generate");
        let unit = files.get("skeleton.d.ts").unwrap();

        assert!(unit.contains("    name: string;\n"));
        assert!(unit.contains("    get_bone_pose(index: int64): float;\n"));
        assert!(unit.contains("    set_bone_pose(index: int64, value: float): void;\n"));
        assert!(unit.contains("    reset(): void;\n"));
        assert!(unit.contains("    find(n: string): void;\n"));
        assert!(unit.contains("    find_1(i: int64): void;\n"));
        assert_eq!(unit.matches("export enum ").count(), 2);
        assert!(unit.contains("        MODE_B = 7,\n"));
        assert!(unit.contains("        FLAG_X = -4,\n"));
    }

    #[test]
    fn test_malformed_schema_is_parse_error() {
        assert!(matches!(
            generate_from_xml("<api><class></api>"),
            Err(CodegenError::Parse(_))
        ));
    }

    #[test]
    fn test_inheritance_cycle_is_schema_error() {
        let xml = r#"<api><class name="A" inherits="B"/><class name="B" inherits="A"/></api>"#;
        assert!(matches!(
            generate_from_xml(xml),
            Err(CodegenError::Schema(_))
        ));
    }
}
