//! Class declaration unit generation.

use crate::config::GeneratorConfig;
use crate::error::CodegenError;
use crate::ts::enums::EnumGenerator;
use crate::ts::members::SignatureRenderer;
use crate::ts::generated_header;
use crate::ts::types::{ImportSet, TypeMapper};
use refdecl_schema::ClassDef;
use refdecl_schema::ir::SchemaIr;

/// Contract note attached to singleton classes.
pub const SINGLETON_NOTE: &str =
    "Singleton: exactly one instance exists, obtained through the engine's singleton accessor.";

/// Rendered declaration file for one class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationUnit {
    /// Class the unit declares.
    pub class_name: String,
    /// File stem, without extension.
    pub file_stem: String,
    /// File contents.
    pub contents: String,
}

/// Emitter for per-class declaration units.
pub struct ClassEmitter<'a> {
    ir: &'a SchemaIr,
    config: &'a GeneratorConfig,
    mapper: TypeMapper<'a>,
}

impl<'a> ClassEmitter<'a> {
    /// Creates a new class emitter.
    #[must_use]
    pub fn new(ir: &'a SchemaIr, config: &'a GeneratorConfig) -> Self {
        Self {
            ir,
            config,
            mapper: TypeMapper::new(ir),
        }
    }

    /// Emits the declaration unit for a class.
    ///
    /// # Arguments
    /// * `class` - Class to emit
    ///
    /// # Returns
    /// The unit with its imports, class body and enum namespace.
    ///
    /// # Errors
    /// Returns `CodegenError` if a referenced type is unresolved or member
    /// signatures are inconsistent.
    pub fn emit(&self, class: &ClassDef) -> Result<DeclarationUnit, CodegenError> {
        let mut imports = ImportSet::new();

        if let Some(base) = &class.base {
            if !self.ir.has_class(base) {
                return Err(CodegenError::unresolved(&class.name, "extends", base));
            }
            imports.add_class(&class.name, base);
        }

        let renderer = SignatureRenderer::new(self.mapper, self.config);
        let members = renderer.render_members(class, &mut imports)?;
        let enums = EnumGenerator::new(class);

        let mut output = String::new();
        output.push_str(&generated_header(&self.ir.version));
        output.push_str(&self.generate_imports(&imports));
        output.push_str(&self.generate_doc(class));

        output.push_str("export declare ");
        if class.is_abstract {
            output.push_str("abstract ");
        }
        output.push_str(&format!("class {}", class.name));
        if let Some(base) = &class.base {
            output.push_str(&format!(" extends {base}"));
        }
        output.push_str(" {\n");

        for line in enums.generate_constants() {
            output.push_str(&format!("    {line}\n"));
        }
        for member in &members {
            output.push_str(&format!("    {}\n", member.text));
        }
        output.push_str("}\n");

        if let Some(namespace) = enums.generate_namespace() {
            output.push('\n');
            output.push_str(&namespace);
        }

        Ok(DeclarationUnit {
            class_name: class.name.clone(),
            file_stem: self.config.class_stem(&class.name),
            contents: output,
        })
    }

    fn generate_imports(&self, imports: &ImportSet) -> String {
        let mut output = String::new();

        let prelude: Vec<&str> = imports.prelude().collect();
        if !prelude.is_empty() {
            output.push_str(&format!(
                "import {{ {} }} from \"./{}\";\n",
                prelude.join(", "),
                self.config.prelude_stem
            ));
        }
        for name in imports.classes() {
            output.push_str(&format!(
                "import {{ {name} }} from \"./{}\";\n",
                self.config.class_stem(name)
            ));
        }
        if !imports.is_empty() {
            output.push('\n');
        }

        output
    }

    fn generate_doc(&self, class: &ClassDef) -> String {
        let mut lines = Vec::new();
        if self.config.emit_docs
            && let Some(description) = class.description.as_deref()
            && !description.trim().is_empty()
        {
            lines.push(single_line(description));
        }
        if class.singleton {
            lines.push(SINGLETON_NOTE.to_string());
        }
        if lines.is_empty() {
            return String::new();
        }

        let mut output = String::from("/**\n");
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                output.push_str(" *\n");
            }
            output.push_str(&format!(" * {line}\n"));
        }
        output.push_str(" */\n");
        output
    }
}

/// Keeps a summary on one line and out of comment terminators.
fn single_line(text: &str) -> String {
    text.trim()
        .replace("\r\n", " ")
        .replace(['\n', '\r'], " ")
        .replace("*/", "*\\/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use refdecl_schema::parser::parse_schema;

    fn create_ir(xml: &str) -> SchemaIr {
        let schema = parse_schema(xml).expect("Failed to parse");
        SchemaIr::from_schema(schema).expect("Failed to validate")
    }

    fn emit(ir: &SchemaIr, config: &GeneratorConfig, class: &str) -> DeclarationUnit {
        let emitter = ClassEmitter::new(ir, config);
        emitter
            .emit(ir.get_class(class).unwrap())
            .expect("Failed to emit")
    }

    const NODE_SCHEMA: &str = r#"<api version="4.3">
    <class name="Object"/>
    <class name="Node" inherits="Object" description="Base scene element.">
        <members>
            <member name="owner" type="Node" setter=""/>
            <member name="process_mode" type="int" enum="Node.ProcessMode"/>
        </members>
        <methods>
            <method name="_ready" qualifiers="virtual"/>
            <method name="get_tree"><return type="SceneTree"/></method>
        </methods>
        <constants>
            <constant name="NOTIFICATION_READY" value="13"/>
            <constant name="PROCESS_MODE_INHERIT" value="0" enum="ProcessMode"/>
        </constants>
        <signals>
            <signal name="ready"/>
        </signals>
    </class>
    <class name="SceneTree" inherits="Object" singleton="true" abstract="true"/>
</api>"#;

    #[test]
    fn test_emit_full_unit() {
        let ir = create_ir(NODE_SCHEMA);
        let config = GeneratorConfig::default();
        let unit = emit(&ir, &config, "Node");

        assert_eq!(unit.class_name, "Node");
        assert_eq!(unit.file_stem, "node");
        assert_eq!(
            unit.contents,
            "// Generated by refdecl from API 4.3. Do not edit.\n\
             \n\
             import { Signal } from \"./_primitives\";\n\
             import { Object } from \"./object\";\n\
             import { SceneTree } from \"./scene_tree\";\n\
             \n\
             /**\n\
             \x20* Base scene element.\n\
             \x20*/\n\
             export declare class Node extends Object {\n\
             \x20   static readonly NOTIFICATION_READY = 13;\n\
             \x20   readonly owner: Node;\n\
             \x20   process_mode: Node.ProcessMode;\n\
             \x20   protected _ready(): void;\n\
             \x20   get_tree(): SceneTree;\n\
             \x20   readonly ready: Signal<[]>;\n\
             }\n\
             \n\
             export declare namespace Node {\n\
             \x20   export enum ProcessMode {\n\
             \x20       PROCESS_MODE_INHERIT = 0,\n\
             \x20   }\n\
             }\n"
        );
    }

    #[test]
    fn test_emit_singleton_abstract() {
        let ir = create_ir(NODE_SCHEMA);
        let config = GeneratorConfig::default();
        let unit = emit(&ir, &config, "SceneTree");

        assert!(unit.contents.contains(&format!(" * {SINGLETON_NOTE}\n")));
        assert!(
            unit.contents
                .contains("export declare abstract class SceneTree extends Object {\n}\n")
        );
        assert!(!unit.contents.contains("namespace"));
    }

    #[test]
    fn test_emit_without_docs_keeps_singleton_note() {
        let ir = create_ir(NODE_SCHEMA);
        let config = GeneratorConfig::builder().emit_docs(false).build();

        let node = emit(&ir, &config, "Node");
        assert!(!node.contents.contains("Base scene element."));
        assert!(!node.contents.contains("/**"));

        let tree = emit(&ir, &config, "SceneTree");
        assert!(tree.contents.contains(SINGLETON_NOTE));
    }

    #[test]
    fn test_emit_root_class_has_no_imports() {
        let ir = create_ir(NODE_SCHEMA);
        let config = GeneratorConfig::default();
        let unit = emit(&ir, &config, "Object");

        assert!(!unit.contents.contains("import"));
        assert!(unit.contents.ends_with("export declare class Object {\n}\n"));
    }

    #[test]
    fn test_emit_is_deterministic() {
        let ir = create_ir(NODE_SCHEMA);
        let config = GeneratorConfig::default();

        let first = emit(&ir, &config, "Node");
        let second = emit(&ir, &config, "Node");
        assert_eq!(first, second);
    }

    #[test]
    fn test_emit_mutual_references() {
        let ir = create_ir(
            r#"<api>
    <class name="A"><members><member name="b" type="B"/></members></class>
    <class name="B"><members><member name="a" type="A"/></members></class>
</api>"#,
        );
        let config = GeneratorConfig::default();

        let a = emit(&ir, &config, "A");
        let b = emit(&ir, &config, "B");
        assert!(a.contents.contains("import { B } from \"./b\";\n"));
        assert!(b.contents.contains("import { A } from \"./a\";\n"));
        assert!(a.contents.starts_with("// Generated by refdecl. Do not edit.\n"));
    }

    #[test]
    fn test_single_line_summary() {
        assert_eq!(single_line(" a\nb */ c \r\n"), "a b *\\/ c");
    }
}
