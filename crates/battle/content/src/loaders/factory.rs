//! Content factory for building a registry from a data directory.

use std::path::{Path, PathBuf};

use battle_core::BattleConfig;

use crate::loaders::{
    AiPatternLoader, CharacterLoader, ConfigLoader, ItemLoader, LoadResult, ShowtimeLoader,
    SkillLoader, TechnicalTableLoader,
};
use crate::registry::ContentRegistry;

/// Content factory that loads all battle content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── battle.toml        (optional, defaults otherwise)
/// ├── skills.ron
/// ├── items.ron          (optional)
/// ├── ai_patterns.ron    (optional)
/// ├── characters.ron
/// ├── technicals.ron     (optional, standard table otherwise)
/// └── showtimes.ron      (optional)
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load battle configuration from `battle.toml`, or defaults when absent.
    pub fn load_config(&self) -> LoadResult<BattleConfig> {
        let path = self.data_dir.join("battle.toml");
        if !path.exists() {
            return Ok(BattleConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load every catalog into one registry.
    pub fn load_registry(&self) -> LoadResult<ContentRegistry> {
        let mut registry = ContentRegistry::new();

        registry.extend_skills(SkillLoader::load(&self.data_dir.join("skills.ron"))?);

        if let Some(path) = self.optional("items.ron") {
            registry.extend_items(ItemLoader::load(&path)?);
        }

        let patterns = match self.optional("ai_patterns.ron") {
            Some(path) => AiPatternLoader::load(&path)?,
            None => Default::default(),
        };
        registry.extend_characters(CharacterLoader::load(
            &self.data_dir.join("characters.ron"),
            &patterns,
        )?);

        if let Some(path) = self.optional("technicals.ron") {
            registry.set_technicals(TechnicalTableLoader::load(&path)?);
        }
        if let Some(path) = self.optional("showtimes.ron") {
            registry.set_showtimes(ShowtimeLoader::load(&path)?);
        }

        Ok(registry)
    }

    fn optional(&self, file: &str) -> Option<PathBuf> {
        let path = self.data_dir.join(file);
        path.exists().then_some(path)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
