//! Data-driven battle content.
//!
//! This crate provides the static data a battle consumes and the loaders for
//! its RON/TOML files:
//! - Skill and item catalogs (RON)
//! - Character templates with AI pattern references (RON)
//! - AI patterns (RON)
//! - The technical combo table (RON)
//! - Showtime definitions (RON)
//! - Battle configuration (TOML)
//!
//! [`ContentRegistry`] holds the loaded data and serves it to the battle
//! through the `battle-core` oracles.

pub mod registry;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use registry::ContentRegistry;

#[cfg(feature = "loaders")]
pub use loaders::{
    AiPatternLoader, CharacterLoader, CharacterRecord, ConfigLoader, ContentFactory, ItemLoader,
    LoadResult, ShowtimeLoader, SkillLoader, TechnicalTableLoader,
};
