//! TypeScript declaration generation modules.

pub mod classes;
pub mod enums;
pub mod members;
pub mod module;
pub mod types;

pub use classes::{ClassEmitter, DeclarationUnit};
pub use enums::EnumGenerator;
pub use members::{MemberDecl, MemberKind, SignatureRenderer};
pub use module::{FileSet, GeneratedFile, ModuleAssembler};
pub use types::{ImportSet, TypeMapper};

/// Returns the banner placed at the top of every generated file.
#[must_use]
pub fn generated_header(version: &str) -> String {
    if version.is_empty() {
        "// Generated by refdecl. Do not edit.\n\n".to_string()
    } else {
        format!("// Generated by refdecl from API {version}. Do not edit.\n\n")
    }
}
