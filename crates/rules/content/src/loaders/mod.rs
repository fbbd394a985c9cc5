//! Content loaders for reading rules data from files.
//!
//! Configuration is TOML, tables are RON. Both deserialize straight into
//! `rules-core` types through their serde derives.

pub mod config;
pub mod factory;
pub mod tables;

pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use tables::{Tables, TablesLoader};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
