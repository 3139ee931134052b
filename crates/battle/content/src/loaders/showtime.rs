//! Showtime definition loader.

use std::path::Path;

use battle_core::ShowtimeDefinition;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Showtime catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShowtimeCatalog {
    pub showtimes: Vec<ShowtimeDefinition>,
}

pub struct ShowtimeLoader;

impl ShowtimeLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<ShowtimeDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<ShowtimeDefinition>> {
        let catalog: ShowtimeCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse showtime RON: {}", e))?;

        for showtime in &catalog.showtimes {
            if showtime.first == showtime.second {
                anyhow::bail!("showtime '{}' pairs a character with itself", showtime.name);
            }
            if showtime.hits == 0 {
                anyhow::bail!("showtime '{}' has no hits", showtime.name);
            }
        }

        Ok(catalog.showtimes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::CharacterId;

    #[test]
    fn parses_pairs() {
        let showtimes = ShowtimeLoader::parse(
            r#"(showtimes: [(name: "Moonlight Duet", first: 1, second: 2, power: 150, hits: 2, chance_percent: 30, hp_threshold_percent: 50)])"#,
        )
        .unwrap();
        assert_eq!(showtimes[0].second, CharacterId(2));
        assert_eq!(showtimes[0].hits, 2);
    }

    #[test]
    fn self_pair_is_rejected() {
        assert!(ShowtimeLoader::parse(
            r#"(showtimes: [(name: "Solo", first: 1, second: 1, power: 150, hits: 2, chance_percent: 30, hp_threshold_percent: 50)])"#,
        )
        .is_err());
    }
}
