//! Content loaders for reading battle data from files.
//!
//! Every loader has a `load(path)` entry point for files and a `parse(text)`
//! entry point for inline data. RON is used for catalogs, TOML for config.

pub mod ai;
pub mod character;
pub mod config;
pub mod factory;
pub mod item;
pub mod showtime;
pub mod skill;
pub mod technical;

pub use ai::AiPatternLoader;
pub use character::{CharacterLoader, CharacterRecord};
pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use item::ItemLoader;
pub use showtime::ShowtimeLoader;
pub use skill::SkillLoader;
pub use technical::TechnicalTableLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
