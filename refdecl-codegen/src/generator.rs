//! Main code generator.

use crate::config::GeneratorConfig;
use crate::error::CodegenError;
use crate::ts::{ClassEmitter, DeclarationUnit, FileSet, ModuleAssembler};
use refdecl_schema::ir::SchemaIr;

/// Main declaration generator.
pub struct Generator<'a> {
    ir: &'a SchemaIr,
    config: GeneratorConfig,
}

impl<'a> Generator<'a> {
    /// Creates a new generator with the default configuration.
    #[must_use]
    pub fn new(ir: &'a SchemaIr) -> Self {
        Self::with_config(ir, GeneratorConfig::default())
    }

    /// Creates a new generator with a custom configuration.
    #[must_use]
    pub fn with_config(ir: &'a SchemaIr, config: GeneratorConfig) -> Self {
        Self { ir, config }
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generates the complete file set.
    ///
    /// Classes are emitted in schema order; the first error aborts the run
    /// and no file set is returned.
    ///
    /// # Errors
    /// Returns `CodegenError` if any class fails to emit or two units
    /// collide on a file name.
    pub fn generate(&self) -> Result<FileSet, CodegenError> {
        let result = self.emit_units().and_then(|units| {
            ModuleAssembler::new(&self.config, &self.ir.version).assemble(units)
        });

        match &result {
            Ok(files) => tracing::info!(
                classes = self.ir.len(),
                files = files.len(),
                "generated declarations"
            ),
            Err(err) => tracing::error!(error = %err, "declaration generation failed"),
        }

        result
    }

    /// Emits one declaration unit per class, in schema order.
    ///
    /// # Errors
    /// Returns the first `CodegenError` raised by a class.
    pub fn emit_units(&self) -> Result<Vec<DeclarationUnit>, CodegenError> {
        let emitter = ClassEmitter::new(self.ir, &self.config);
        let mut units = Vec::with_capacity(self.ir.len());

        for class in &self.ir.classes {
            let unit = emitter.emit(class)?;
            tracing::debug!(
                class = %class.name,
                file = %unit.file_stem,
                bytes = unit.contents.len(),
                "emitted class"
            );
            units.push(unit);
        }

        Ok(units)
    }
}
