//! Rules tables loader.

use std::collections::BTreeMap;
use std::path::Path;

use rules_core::{ModifierType, Progression};
use serde::{Deserialize, Serialize};

use crate::concepts::Size;
use crate::loaders::{LoadResult, read_file};

/// Rules tables structure for RON files.
///
/// Every section is optional, so a campaign can override only the tables
/// it changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tables {
    pub modifier_types: Vec<ModifierType>,
    /// Progressions by name, e.g. `good_base_save`.
    pub progressions: BTreeMap<String, Progression>,
    pub sizes: Vec<Size>,
}

impl Tables {
    /// The SRD tables.
    pub fn srd() -> Self {
        use crate::srd;

        let progressions = [
            ("good_base_save", srd::good_base_save()),
            ("poor_base_save", srd::poor_base_save()),
            ("good_base_attack", srd::good_base_attack()),
            ("average_base_attack", srd::average_base_attack()),
            ("poor_base_attack", srd::poor_base_attack()),
        ];
        Self {
            modifier_types: srd::modifier_types(),
            progressions: progressions
                .into_iter()
                .map(|(name, progression)| (name.to_owned(), progression))
                .collect(),
            sizes: srd::SIZES.to_vec(),
        }
    }

    pub fn modifier_type(&self, name: &str) -> Option<&ModifierType> {
        self.modifier_types.iter().find(|t| t.name() == name)
    }

    pub fn progression(&self, name: &str) -> Option<&Progression> {
        self.progressions.get(name)
    }

    pub fn size(&self, name: &str) -> Option<&Size> {
        self.sizes.iter().find(|size| size.name() == name)
    }
}

/// Loader for rules tables from RON files.
pub struct TablesLoader;

impl TablesLoader {
    /// Load tables from a RON file.
    pub fn load(path: &Path) -> LoadResult<Tables> {
        let content = read_file(path)?;
        let tables: Tables = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse tables RON: {}", e))?;

        tracing::debug!(
            path = %path.display(),
            modifier_types = tables.modifier_types.len(),
            progressions = tables.progressions.len(),
            sizes = tables.sizes.len(),
            "loaded rules tables"
        );
        Ok(tables)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rules_core::Modifier;
    use std::io::Write;

    const TABLES: &str = r#"(
        modifier_types: [
            (name: "untyped", stacks: true),
            (name: "luck"),
        ],
        progressions: {
            "good_base_save": (type: (name: "base save", stacks: true), values: [2, 3, 3]),
        },
        sizes: [
            (name: "Small", value: -1),
            (name: "Medium", value: 0),
        ],
    )"#;

    #[test]
    fn loads_tables_from_ron() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(TABLES.as_bytes()).unwrap();

        let tables = TablesLoader::load(file.path()).unwrap();
        assert!(tables.modifier_type("untyped").unwrap().stacks());
        assert!(!tables.modifier_type("luck").unwrap().stacks());

        let save = tables.progression("good_base_save").unwrap();
        assert_eq!(save.at_level(2).map(|m| m.value()), Some(3));
        assert_eq!(tables.size("Small").unwrap().hide(), Modifier::new(4, Size::MODIFIER_TYPE));
    }

    #[test]
    fn sections_are_optional() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"(sizes: [(name: \"Huge\", value: 2)])").unwrap();

        let tables = TablesLoader::load(file.path()).unwrap();
        assert!(tables.modifier_types.is_empty());
        assert_eq!(tables.sizes.len(), 1);
    }

    #[test]
    fn srd_tables_match_the_srd_module() {
        let tables = Tables::srd();
        assert_eq!(tables.sizes.len(), 9);
        assert_eq!(tables.progressions.len(), 5);
        assert!(tables.modifier_type("dodge").unwrap().stacks());
        assert_eq!(tables.size("Colossal").unwrap().value(), 8);
    }
}
