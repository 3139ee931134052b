//! Technical combo table loader.

use std::path::Path;

use battle_core::{TechnicalRule, TechnicalTable};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Technical table structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TechnicalCatalog {
    pub rules: Vec<TechnicalRule>,
}

/// Loader for a replacement technical table.
pub struct TechnicalTableLoader;

impl TechnicalTableLoader {
    pub fn load(path: &Path) -> LoadResult<TechnicalTable> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<TechnicalTable> {
        let catalog: TechnicalCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse technical table RON: {}", e))?;

        if let Some(rule) = catalog.rules.iter().find(|rule| rule.multiplier < 100) {
            anyhow::bail!(
                "technical '{}' has multiplier {} below 100",
                rule.combo,
                rule.multiplier
            );
        }

        Ok(TechnicalTable::new(catalog.rules))
    }
}
