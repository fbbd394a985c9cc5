//! Content factory for loading rules data from a directory.

use std::path::{Path, PathBuf};

use rules_core::RulesConfig;

use crate::loaders::{ConfigLoader, LoadResult, Tables, TablesLoader};

/// Content factory that loads all rules content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// └── tables.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load rules configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<RulesConfig> {
        let path = self.data_dir.join("config.toml");
        ConfigLoader::load(&path)
    }

    /// Load rules tables from `tables.ron`.
    pub fn load_tables(&self) -> LoadResult<Tables> {
        let path = self.data_dir.join("tables.ron");
        TablesLoader::load(&path)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn loads_files_from_the_data_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.toml"), "synergy_bonus = 3\n").unwrap();
        let tables = "(modifier_types: [(name: \"luck\")])";
        std::fs::write(dir.path().join("tables.ron"), tables).unwrap();

        let factory = ContentFactory::new(dir.path());
        assert_eq!(factory.load_config().unwrap().synergy_bonus, 3);
        assert_eq!(factory.load_tables().unwrap().modifier_types.len(), 1);
    }

    #[test]
    fn missing_tables_are_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let factory = ContentFactory::new(dir.path());
        assert!(factory.load_tables().is_err());
    }
}
