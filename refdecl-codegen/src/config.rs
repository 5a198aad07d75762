//! Generator configuration.

use refdecl_schema::ir::to_snake_case;

/// Output options for a generator run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Whether class documentation summaries are emitted.
    pub emit_docs: bool,
    /// Extension appended to every declaration file stem.
    pub extension: String,
    /// Stem of the aggregate index unit.
    pub index_stem: String,
    /// Stem of the shared primitive/signal prelude unit.
    pub prelude_stem: String,
    /// Separator between an overloaded method name and its position suffix.
    pub overload_separator: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            emit_docs: true,
            extension: ".d.ts".to_string(),
            index_stem: "index".to_string(),
            prelude_stem: "_primitives".to_string(),
            overload_separator: "_".to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Creates a builder starting from the default configuration.
    #[must_use]
    pub fn builder() -> GeneratorConfigBuilder {
        GeneratorConfigBuilder::new()
    }

    /// Returns the file stem for a class.
    #[must_use]
    pub fn class_stem(&self, class_name: &str) -> String {
        to_snake_case(class_name)
    }

    /// Returns the file name for a stem.
    #[must_use]
    pub fn file_name(&self, stem: &str) -> String {
        format!("{stem}{}", self.extension)
    }
}

/// Builder for [`GeneratorConfig`].
#[derive(Debug, Clone, Default)]
pub struct GeneratorConfigBuilder {
    config: GeneratorConfig,
}

impl GeneratorConfigBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables class documentation summaries.
    #[must_use]
    pub fn emit_docs(mut self, emit: bool) -> Self {
        self.config.emit_docs = emit;
        self
    }

    /// Sets the declaration file extension.
    #[must_use]
    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.config.extension = extension.into();
        self
    }

    /// Sets the index unit stem.
    #[must_use]
    pub fn index_stem(mut self, stem: impl Into<String>) -> Self {
        self.config.index_stem = stem.into();
        self
    }

    /// Sets the prelude unit stem.
    #[must_use]
    pub fn prelude_stem(mut self, stem: impl Into<String>) -> Self {
        self.config.prelude_stem = stem.into();
        self
    }

    /// Sets the overload suffix separator.
    #[must_use]
    pub fn overload_separator(mut self, separator: impl Into<String>) -> Self {
        self.config.overload_separator = separator.into();
        self
    }

    /// Builds the configuration.
    #[must_use]
    pub fn build(self) -> GeneratorConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GeneratorConfig::default();
        assert!(config.emit_docs);
        assert_eq!(config.file_name("node"), "node.d.ts");
        assert_eq!(config.class_stem("HTTPRequest"), "http_request");
    }

    #[test]
    fn test_builder_overrides() {
        let config = GeneratorConfig::builder()
            .emit_docs(false)
            .extension(".ts")
            .index_stem("all")
            .prelude_stem("prelude")
            .overload_separator("__")
            .build();

        assert!(!config.emit_docs);
        assert_eq!(config.file_name(&config.index_stem), "all.ts");
        assert_eq!(config.prelude_stem, "prelude");
        assert_eq!(config.overload_separator, "__");
    }
}
