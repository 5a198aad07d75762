//! Output tree assembly.
//!
//! Collects per-class units into one file set together with the shared
//! primitive prelude and the aggregate index.

use crate::config::GeneratorConfig;
use crate::error::CodegenError;
use crate::ts::classes::DeclarationUnit;
use crate::ts::generated_header;
use crate::ts::types::{PRELUDE_ALIASES, SIGNAL_TYPE, is_prelude_alias};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// One file of generated output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// File name relative to the output directory.
    pub name: String,
    /// File contents.
    pub contents: String,
}

/// Complete output of one generator run.
///
/// Files are ordered: prelude, class units in schema order, index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSet {
    files: Vec<GeneratedFile>,
}

impl FileSet {
    /// Gets the contents of a file by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.files
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.contents.as_str())
    }

    /// Returns an iterator over the files in order.
    pub fn iter(&self) -> impl Iterator<Item = &GeneratedFile> {
        self.files.iter()
    }

    /// Returns the file names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(|f| f.name.as_str())
    }

    /// Returns the number of files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns true if the set holds no files.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Writes every file into `dir`, creating the directory if needed.
    ///
    /// # Errors
    /// Returns `CodegenError::Io` if the directory or a file cannot be written.
    pub fn write_to(&self, dir: &Path) -> Result<(), CodegenError> {
        fs::create_dir_all(dir)?;
        for file in &self.files {
            fs::write(dir.join(&file.name), &file.contents)?;
        }
        tracing::info!(
            files = self.files.len(),
            dir = %dir.display(),
            "wrote declaration files"
        );
        Ok(())
    }
}

impl<'a> IntoIterator for &'a FileSet {
    type Item = &'a GeneratedFile;
    type IntoIter = std::slice::Iter<'a, GeneratedFile>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}

/// Assembler for the output file set.
pub struct ModuleAssembler<'a> {
    config: &'a GeneratorConfig,
    version: &'a str,
}

impl<'a> ModuleAssembler<'a> {
    /// Creates a new module assembler.
    #[must_use]
    pub fn new(config: &'a GeneratorConfig, version: &'a str) -> Self {
        Self { config, version }
    }

    /// Assembles class units into a file set.
    ///
    /// # Arguments
    /// * `units` - Class units in schema order
    ///
    /// # Returns
    /// The prelude, one file per unit and the index.
    ///
    /// # Errors
    /// Returns `CodegenError::OutputCollision` if two units, or a unit and
    /// the prelude or index, map to the same file name.
    pub fn assemble(&self, units: Vec<DeclarationUnit>) -> Result<FileSet, CodegenError> {
        let prelude_name = self.config.file_name(&self.config.prelude_stem);
        let index_name = self.config.file_name(&self.config.index_stem);

        let mut owners: HashMap<String, String> = HashMap::with_capacity(units.len() + 2);
        claim(&mut owners, &prelude_name, "prelude")?;
        claim(&mut owners, &index_name, "index")?;
        for unit in &units {
            // Class files import these names from the prelude.
            if is_prelude_alias(&unit.class_name) || unit.class_name == SIGNAL_TYPE {
                return Err(CodegenError::OutputCollision {
                    file: prelude_name,
                    first: "prelude".to_string(),
                    second: unit.class_name.clone(),
                });
            }
            claim(&mut owners, &self.config.file_name(&unit.file_stem), &unit.class_name)?;
        }

        let mut files = Vec::with_capacity(units.len() + 2);
        files.push(GeneratedFile {
            name: prelude_name,
            contents: self.generate_prelude(),
        });
        let index = self.generate_index(&units);
        for unit in units {
            files.push(GeneratedFile {
                name: self.config.file_name(&unit.file_stem),
                contents: unit.contents,
            });
        }
        files.push(GeneratedFile {
            name: index_name,
            contents: index,
        });

        Ok(FileSet { files })
    }

    /// Generates the shared prelude: numeric aliases and the signal wrapper.
    #[must_use]
    pub fn generate_prelude(&self) -> String {
        let mut output = generated_header(self.version);

        for alias in PRELUDE_ALIASES {
            output.push_str(&format!("export type {alias} = number;\n"));
        }
        output.push('\n');

        output.push_str(&format!(
            "export interface {SIGNAL_TYPE}<Args extends unknown[] = []> {{\n"
        ));
        output.push_str("    connect(callback: (...args: Args) => void): void;\n");
        output.push_str("    disconnect(callback: (...args: Args) => void): void;\n");
        output.push_str("    is_connected(callback: (...args: Args) => void): boolean;\n");
        output.push_str("    emit(...args: Args): void;\n");
        output.push_str("}\n");

        output
    }

    /// Generates the index re-exporting the prelude and every unit.
    #[must_use]
    pub fn generate_index(&self, units: &[DeclarationUnit]) -> String {
        let mut output = generated_header(self.version);

        output.push_str(&format!(
            "export * from \"./{}\";\n",
            self.config.prelude_stem
        ));
        for unit in units {
            output.push_str(&format!("export * from \"./{}\";\n", unit.file_stem));
        }

        output
    }
}

fn claim(
    owners: &mut HashMap<String, String>,
    file: &str,
    owner: &str,
) -> Result<(), CodegenError> {
    if let Some(first) = owners.get(file) {
        return Err(CodegenError::OutputCollision {
            file: file.to_string(),
            first: first.clone(),
            second: owner.to_string(),
        });
    }
    owners.insert(file.to_string(), owner.to_string());
    Ok(())
}
