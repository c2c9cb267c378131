//! Static analyzer registry.
//!
//! An explicit table from analyzer id to constructor, assembled once at
//! startup. There is no runtime discovery: if an id is not in the table,
//! it does not exist.

use std::sync::Arc;

use lintmux_core::errors::ConfigError;
use lintmux_core::types::collections::FxHashMap;

use super::tool::Tool;

/// Constructor for one registered analyzer.
pub type ToolFactory = fn() -> Arc<dyn Tool>;

/// Mapping from analyzer id to factory.
#[derive(Default)]
pub struct ToolRegistry {
    factories: FxHashMap<String, ToolFactory>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a static `(id, factory)` table.
    pub fn from_table(table: &[(&str, ToolFactory)]) -> Self {
        let mut registry = Self::new();
        for (id, factory) in table {
            registry.register(id, *factory);
        }
        registry
    }

    /// Register a factory. Later registrations for the same id win.
    pub fn register(&mut self, id: &str, factory: ToolFactory) {
        self.factories.insert(id.to_string(), factory);
    }

    /// Instantiate the analyzer registered under `id`.
    pub fn create(&self, id: &str) -> Result<Arc<dyn Tool>, ConfigError> {
        self.factories
            .get(id)
            .map(|factory| factory())
            .ok_or_else(|| ConfigError::UnknownTool(id.to_string()))
    }

    /// Instantiate every analyzer in `ids`, failing on the first unknown id.
    pub fn create_all(&self, ids: &[&str]) -> Result<Vec<Arc<dyn Tool>>, ConfigError> {
        ids.iter().map(|id| self.create(id)).collect()
    }

    /// All registered ids, sorted.
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.factories.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glob::Pattern;
    use lintmux_core::errors::ToolError;
    use lintmux_core::types::Violation;
    use std::path::PathBuf;
    use std::sync::OnceLock;

    struct NullTool;

    impl Tool for NullTool {
        fn id(&self) -> &str {
            "null"
        }
        fn file_filter(&self) -> &Pattern {
            static FILTER: OnceLock<Pattern> = OnceLock::new();
            FILTER.get_or_init(|| Pattern::new("*").expect("valid glob"))
        }
        fn version(&self) -> &str {
            "0.0.0"
        }
        fn setup(&self) -> Result<(), ToolError> {
            Ok(())
        }
        fn run(&self, _files: &[PathBuf]) -> Result<String, ToolError> {
            Ok(String::new())
        }
        fn parse(&self, _raw: &str) -> Result<Vec<Violation>, ToolError> {
            Ok(Vec::new())
        }
    }

    fn null_factory() -> std::sync::Arc<dyn Tool> {
        std::sync::Arc::new(NullTool)
    }

    #[test]
    fn table_lookup_and_creation() {
        let registry = ToolRegistry::from_table(&[("null", null_factory)]);
        assert_eq!(registry.ids(), vec!["null".to_string()]);
        assert_eq!(registry.create("null").unwrap().id(), "null");
    }

    #[test]
    fn unknown_id_is_a_config_error() {
        let registry = ToolRegistry::from_table(&[("null", null_factory)]);
        let err = registry.create("ghost").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownTool(id) if id == "ghost"));
    }

    #[test]
    fn create_all_fails_on_first_unknown_id() {
        let registry = ToolRegistry::from_table(&[("null", null_factory)]);
        assert!(registry.create_all(&["null"]).is_ok());
        assert!(registry.create_all(&["null", "ghost"]).is_err());
    }
}
