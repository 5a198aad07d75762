//! Synthetic schema generation.

/// Shape of a synthetic schema.
#[derive(Debug, Clone, Copy)]
pub struct SchemaShape {
    /// Number of classes.
    pub classes: usize,
    /// Properties per class.
    pub properties: usize,
    /// Methods per class; every third one is an overload of the previous.
    pub methods: usize,
    /// Constants per class, split across two enum groups.
    pub constants: usize,
}

impl SchemaShape {
    /// Small schema suitable for quick iterations.
    #[must_use]
    pub const fn small() -> Self {
        Self {
            classes: 10,
            properties: 4,
            methods: 6,
            constants: 4,
        }
    }

    /// Schema comparable in size to a full engine API.
    #[must_use]
    pub const fn large() -> Self {
        Self {
            classes: 1000,
            properties: 12,
            methods: 30,
            constants: 10,
        }
    }
}

/// Builds a schema document with the given shape.
///
/// Classes form a single inheritance chain and each references its
/// neighbours, so generation exercises imports and forward references.
#[must_use]
pub fn synthetic_schema(shape: SchemaShape) -> String {
    let mut xml = String::from("<api version=\"bench\">\n");

    for c in 0..shape.classes {
        let name = class_name(c);
        let next = class_name((c + 1) % shape.classes.max(1));

        if c == 0 {
            xml.push_str(&format!("  <class name=\"{name}\">\n"));
        } else {
            let base = class_name(c - 1);
            xml.push_str(&format!("  <class name=\"{name}\" inherits=\"{base}\">\n"));
        }

        xml.push_str("    <members>\n");
        for p in 0..shape.properties {
            let ty = match p % 4 {
                0 => "float".to_string(),
                1 => format!("Array[{next}]"),
                2 => "String".to_string(),
                _ => "Variant".to_string(),
            };
            xml.push_str(&format!(
                "      <member name=\"prop_{c}_{p}\" type=\"{ty}\"/>\n"
            ));
        }
        xml.push_str("    </members>\n");

        xml.push_str("    <methods>\n");
        for m in 0..shape.methods {
            let method = if m % 3 == 2 { m - 1 } else { m };
            xml.push_str(&format!("      <method name=\"call_{c}_{method}\">\n"));
            xml.push_str(&format!("        <return type=\"{next}\"/>\n"));
            for a in 0..(m % 3) {
                xml.push_str(&format!(
                    "        <param name=\"arg{a}\" type=\"int\" default=\"{a}\"/>\n"
                ));
            }
            xml.push_str("      </method>\n");
        }
        xml.push_str("    </methods>\n");

        xml.push_str("    <constants>\n");
        for k in 0..shape.constants {
            let group = if k % 2 == 0 { "Even" } else { "Odd" };
            xml.push_str(&format!(
                "      <constant name=\"K_{k}\" value=\"{k}\" enum=\"{group}\"/>\n"
            ));
        }
        xml.push_str("    </constants>\n");

        xml.push_str("  </class>\n");
    }

    xml.push_str("</api>\n");
    xml
}

fn class_name(index: usize) -> String {
    format!("Class{index}")
}
