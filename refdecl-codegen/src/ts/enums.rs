//! Constant and enum group generation.

use refdecl_schema::{ClassDef, EnumGroupDef};

/// Generator for the integer constants of one class.
pub struct EnumGenerator<'a> {
    class: &'a ClassDef,
}

impl<'a> EnumGenerator<'a> {
    /// Creates a new enum generator.
    #[must_use]
    pub fn new(class: &'a ClassDef) -> Self {
        Self { class }
    }

    /// Generates the flat constants as static class fields.
    ///
    /// Lines carry no indentation.
    #[must_use]
    pub fn generate_constants(&self) -> Vec<String> {
        self.class
            .flat_constants()
            .map(|group| {
                group
                    .constants
                    .iter()
                    .map(|c| format!("static readonly {} = {};", c.name, c.value))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Generates the namespace holding the named enum groups.
    ///
    /// Returns `None` when the class declares no named group.
    #[must_use]
    pub fn generate_namespace(&self) -> Option<String> {
        let mut groups = self.class.named_enums().peekable();
        groups.peek()?;

        let mut output = String::new();
        output.push_str(&format!(
            "export declare namespace {} {{\n",
            self.class.name
        ));
        for group in groups {
            output.push_str(&self.generate_enum(group));
        }
        output.push_str("}\n");

        Some(output)
    }

    fn generate_enum(&self, group: &EnumGroupDef) -> String {
        let mut output = String::new();
        let name = group.name.as_deref().unwrap_or_default();

        output.push_str(&format!("    export enum {name} {{\n"));
        for constant in &group.constants {
            output.push_str(&format!("        {} = {},\n", constant.name, constant.value));
        }
        output.push_str("    }\n");

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use refdecl_schema::parser::parse_schema;

    fn create_test_class() -> ClassDef {
        let xml = r#"<api>
    <class name="Node">
        <constants>
            <constant name="NOTIFICATION_READY" value="13"/>
            <constant name="PROCESS_MODE_INHERIT" value="0" enum="ProcessMode"/>
            <constant name="FLAG_BIG" value="-9223372036854775808" enum="Flags"/>
            <constant name="PROCESS_MODE_ALWAYS" value="3" enum="ProcessMode"/>
            <constant name="NOTIFICATION_EXIT" value="11"/>
        </constants>
    </class>
</api>"#;
        let schema = parse_schema(xml).expect("Failed to parse");
        schema.get_class("Node").unwrap().clone()
    }

    #[test]
    fn test_generate_constants() {
        let class = create_test_class();
        let generator = EnumGenerator::new(&class);

        assert_eq!(
            generator.generate_constants(),
            vec![
                "static readonly NOTIFICATION_READY = 13;",
                "static readonly NOTIFICATION_EXIT = 11;",
            ]
        );
    }

    #[test]
    fn test_generate_namespace() {
        let class = create_test_class();
        let generator = EnumGenerator::new(&class);

        let namespace = generator.generate_namespace().expect("Expected namespace");
        assert_eq!(
            namespace,
            "export declare namespace Node {\n\
             \x20   export enum ProcessMode {\n\
             \x20       PROCESS_MODE_INHERIT = 0,\n\
             \x20       PROCESS_MODE_ALWAYS = 3,\n\
             \x20   }\n\
             \x20   export enum Flags {\n\
             \x20       FLAG_BIG = -9223372036854775808,\n\
             \x20   }\n\
             }\n"
        );
    }

    #[test]
    fn test_class_without_enums() {
        let class = ClassDef::new("Object".to_string());
        let generator = EnumGenerator::new(&class);

        assert!(generator.generate_constants().is_empty());
        assert!(generator.generate_namespace().is_none());
    }
}
