//! Type reference mapping.
//!
//! Translates schema type references into TypeScript type expressions and
//! records the import edges each translation needs.

use crate::error::CodegenError;
use refdecl_schema::ir::SchemaIr;
use refdecl_schema::types::{PrimitiveType, TypeRef};
use refdecl_schema::ClassDef;
use std::collections::BTreeSet;

/// Numeric aliases declared by the prelude unit.
pub const PRELUDE_ALIASES: [&str; 3] = ["float", "int32", "int64"];

/// Name of the signal wrapper declared by the prelude unit.
pub const SIGNAL_TYPE: &str = "Signal";

/// Rendering of a dynamically typed slot.
pub const VARIANT_TYPE: &str = "unknown | null";

/// Import edges recorded while mapping the members of one class.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSet {
    classes: BTreeSet<String>,
    prelude: BTreeSet<&'static str>,
}

impl ImportSet {
    /// Creates an empty import set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an edge to another class unit. Self edges are dropped.
    pub fn add_class(&mut self, current: &str, target: &str) {
        if current != target {
            self.classes.insert(target.to_string());
        }
    }

    /// Records a prelude name.
    pub fn add_prelude(&mut self, name: &'static str) {
        self.prelude.insert(name);
    }

    /// Returns the imported class names in sorted order.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }

    /// Returns the imported prelude names in sorted order.
    pub fn prelude(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.prelude.iter().copied()
    }

    /// Returns true if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty() && self.prelude.is_empty()
    }
}

/// Returns the TypeScript spelling of a primitive.
///
/// Numeric primitives collapse onto the three prelude aliases; every tag
/// has exactly one mapping.
#[must_use]
pub const fn primitive_alias(primitive: PrimitiveType) -> &'static str {
    match primitive {
        PrimitiveType::Bool => "boolean",
        PrimitiveType::Int8
        | PrimitiveType::Int16
        | PrimitiveType::Int32
        | PrimitiveType::Uint8
        | PrimitiveType::Uint16
        | PrimitiveType::Uint32 => "int32",
        PrimitiveType::Int | PrimitiveType::Int64 | PrimitiveType::Uint64 => "int64",
        PrimitiveType::Float
        | PrimitiveType::Float32
        | PrimitiveType::Float64
        | PrimitiveType::Double
        | PrimitiveType::Real => "float",
        PrimitiveType::String | PrimitiveType::StringName | PrimitiveType::NodePath => "string",
    }
}

/// Returns true if the alias is declared by the prelude.
#[must_use]
pub fn is_prelude_alias(alias: &str) -> bool {
    PRELUDE_ALIASES.contains(&alias)
}

/// Maps schema type references to TypeScript type expressions.
#[derive(Debug, Clone, Copy)]
pub struct TypeMapper<'a> {
    ir: &'a SchemaIr,
}

impl<'a> TypeMapper<'a> {
    /// Creates a new type mapper over a validated schema.
    #[must_use]
    pub fn new(ir: &'a SchemaIr) -> Self {
        Self { ir }
    }

    /// Maps a type reference appearing in `member` of `class`.
    ///
    /// # Arguments
    /// * `type_ref` - Reference to translate
    /// * `class` - Class whose unit is being generated
    /// * `member` - Member holding the reference, for error reporting
    /// * `imports` - Import edges of the current unit
    ///
    /// # Returns
    /// The TypeScript type expression.
    ///
    /// # Errors
    /// Returns `CodegenError::UnresolvedReference` if a class or enum is
    /// absent from the schema.
    pub fn map_type(
        &self,
        type_ref: &TypeRef,
        class: &ClassDef,
        member: &str,
        imports: &mut ImportSet,
    ) -> Result<String, CodegenError> {
        match type_ref {
            TypeRef::Void => Ok("void".to_string()),
            TypeRef::Variant => Ok(VARIANT_TYPE.to_string()),
            TypeRef::Primitive(primitive) => {
                let alias = primitive_alias(*primitive);
                if is_prelude_alias(alias) {
                    imports.add_prelude(alias);
                }
                Ok(alias.to_string())
            }
            TypeRef::Class(name) => {
                if !self.ir.has_class(name) {
                    return Err(CodegenError::unresolved(&class.name, member, name));
                }
                imports.add_class(&class.name, name);
                Ok(name.clone())
            }
            TypeRef::Enum { owner, name } => {
                let owner = owner.as_deref().unwrap_or(&class.name);
                if !self.ir.has_enum(owner, name) {
                    return Err(CodegenError::unresolved(
                        &class.name,
                        member,
                        format!("{owner}.{name}"),
                    ));
                }
                imports.add_class(&class.name, owner);
                Ok(format!("{owner}.{name}"))
            }
            TypeRef::Array(element) => {
                let inner = self.map_type(element, class, member, imports)?;
                Ok(format!("Array<{inner}>"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use refdecl_schema::parser::parse_schema;

    fn create_test_ir() -> SchemaIr {
        let xml = r#"<api version="4.3">
    <class name="Object"/>
    <class name="Node" inherits="Object">
        <constants>
            <constant name="PROCESS_MODE_INHERIT" value="0" enum="ProcessMode"/>
        </constants>
    </class>
    <class name="Timer" inherits="Node"/>
</api>"#;
        let schema = parse_schema(xml).expect("Failed to parse");
        SchemaIr::from_schema(schema).expect("Failed to validate")
    }

    fn map(ir: &SchemaIr, class: &str, text: &str, imports: &mut ImportSet) -> String {
        let mapper = TypeMapper::new(ir);
        let class = ir.get_class(class).unwrap();
        let type_ref = TypeRef::parse(text, "test").unwrap();
        mapper
            .map_type(&type_ref, class, "member", imports)
            .expect("Failed to map")
    }

    #[test]
    fn test_primitive_table_is_total() {
        for primitive in PrimitiveType::ALL {
            let alias = primitive_alias(primitive);
            assert!(
                matches!(alias, "boolean" | "string") || is_prelude_alias(alias),
                "{primitive:?} mapped to {alias}"
            );
        }
        assert_eq!(primitive_alias(PrimitiveType::Uint16), "int32");
        assert_eq!(primitive_alias(PrimitiveType::Uint64), "int64");
        assert_eq!(primitive_alias(PrimitiveType::Real), "float");
        assert_eq!(primitive_alias(PrimitiveType::StringName), "string");
    }

    #[test]
    fn test_map_primitive_records_prelude_import() {
        let ir = create_test_ir();
        let mut imports = ImportSet::new();

        assert_eq!(map(&ir, "Timer", "float", &mut imports), "float");
        assert_eq!(map(&ir, "Timer", "bool", &mut imports), "boolean");
        assert_eq!(map(&ir, "Timer", "String", &mut imports), "string");

        assert_eq!(imports.prelude().collect::<Vec<_>>(), vec!["float"]);
        assert_eq!(imports.classes().count(), 0);
    }

    #[test]
    fn test_map_class_records_import_without_self_edge() {
        let ir = create_test_ir();
        let mut imports = ImportSet::new();

        assert_eq!(map(&ir, "Node", "Timer", &mut imports), "Timer");
        assert_eq!(map(&ir, "Node", "Node", &mut imports), "Node");

        assert_eq!(imports.classes().collect::<Vec<_>>(), vec!["Timer"]);
    }

    #[test]
    fn test_map_nested_array_and_variant() {
        let ir = create_test_ir();
        let mut imports = ImportSet::new();

        assert_eq!(
            map(&ir, "Timer", "Array[Array[Node]]", &mut imports),
            "Array<Array<Node>>"
        );
        assert_eq!(map(&ir, "Timer", "Array", &mut imports), "Array<unknown | null>");
        assert_eq!(map(&ir, "Timer", "Variant", &mut imports), "unknown | null");
        assert_eq!(imports.classes().collect::<Vec<_>>(), vec!["Node"]);
    }

    #[test]
    fn test_map_enum_qualified_and_local() {
        let ir = create_test_ir();
        let mut imports = ImportSet::new();

        assert_eq!(
            map(&ir, "Timer", "enum::Node.ProcessMode", &mut imports),
            "Node.ProcessMode"
        );
        assert_eq!(imports.classes().collect::<Vec<_>>(), vec!["Node"]);

        let mut local = ImportSet::new();
        assert_eq!(map(&ir, "Node", "enum::ProcessMode", &mut local), "Node.ProcessMode");
        assert!(local.is_empty());
    }

    #[test]
    fn test_map_unresolved_class() {
        let ir = create_test_ir();
        let mapper = TypeMapper::new(&ir);
        let class = ir.get_class("Timer").unwrap();
        let mut imports = ImportSet::new();

        let err = mapper
            .map_type(
                &TypeRef::Array(Box::new(TypeRef::Class("Missing".to_string()))),
                class,
                "children",
                &mut imports,
            )
            .unwrap_err();

        match err {
            CodegenError::UnresolvedReference {
                class,
                member,
                name,
            } => {
                assert_eq!(class, "Timer");
                assert_eq!(member, "children");
                assert_eq!(name, "Missing");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(imports.is_empty());
    }

    #[test]
    fn test_map_unresolved_enum() {
        let ir = create_test_ir();
        let mapper = TypeMapper::new(&ir);
        let class = ir.get_class("Timer").unwrap();
        let mut imports = ImportSet::new();

        let type_ref = TypeRef::parse("enum::Object.ProcessMode", "test").unwrap();
        let result = mapper.map_type(&type_ref, class, "mode", &mut imports);
        assert!(matches!(
            result,
            Err(CodegenError::UnresolvedReference { ref name, .. }) if name == "Object.ProcessMode"
        ));
    }
}
