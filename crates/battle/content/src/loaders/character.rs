//! Character catalog loader.
//!
//! Characters reference AI patterns by name; the loader resolves the names
//! against a pattern catalog loaded beforehand.

use std::collections::BTreeMap;
use std::path::Path;

use battle_core::{
    AffinityTable, AiPattern, CharacterId, CharacterStats, CharacterTemplate, SkillId, StatusKind,
};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// On-disk shape of a character template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterRecord {
    pub id: CharacterId,
    pub name: String,
    pub stats: CharacterStats,
    #[serde(default)]
    pub affinities: AffinityTable,
    #[serde(default)]
    pub status_resistances: BTreeMap<StatusKind, u32>,
    #[serde(default)]
    pub skills: Vec<SkillId>,
    #[serde(default)]
    pub ai_pattern: Option<String>,
}

/// Character catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterCatalog {
    pub characters: Vec<CharacterRecord>,
}

/// Loader for character templates from RON files.
pub struct CharacterLoader;

impl CharacterLoader {
    pub fn load(
        path: &Path,
        patterns: &BTreeMap<String, AiPattern>,
    ) -> LoadResult<Vec<CharacterTemplate>> {
        let content = read_file(path)?;
        Self::parse(&content, patterns)
    }

    pub fn parse(
        content: &str,
        patterns: &BTreeMap<String, AiPattern>,
    ) -> LoadResult<Vec<CharacterTemplate>> {
        let catalog: CharacterCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse character catalog RON: {}", e))?;

        catalog
            .characters
            .into_iter()
            .map(|record| Self::resolve(record, patterns))
            .collect()
    }

    fn resolve(
        record: CharacterRecord,
        patterns: &BTreeMap<String, AiPattern>,
    ) -> LoadResult<CharacterTemplate> {
        let ai_pattern = match record.ai_pattern {
            Some(name) => Some(patterns.get(&name).cloned().ok_or_else(|| {
                anyhow::anyhow!(
                    "Character '{}' references unknown AI pattern '{}'",
                    record.name,
                    name
                )
            })?),
            None => None,
        };

        let mut stats = record.stats;
        stats.clamp();
        let status_resistances = record
            .status_resistances
            .into_iter()
            .map(|(kind, percent)| (kind, percent.min(100)))
            .collect();

        Ok(CharacterTemplate {
            id: record.id,
            name: record.name,
            stats,
            affinities: record.affinities,
            status_resistances,
            skills: record.skills,
            ai_pattern,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{Affinity, Element};

    const STATS: &str = "(level: 5, hp: 80, max_hp: 80, mp: 20, max_mp: 20, attack: 14, defense: 9, magic_attack: 12, magic_defense: 8, speed: 11)";

    fn patterns() -> BTreeMap<String, AiPattern> {
        let mut patterns = BTreeMap::new();
        patterns.insert("slime".to_string(), AiPattern::default());
        patterns
    }

    #[test]
    fn resolves_pattern_and_affinities() {
        let content = format!(
            r#"(characters: [
                (id: 10, name: "Jack Frost", stats: {STATS},
                 affinities: {{ Fire: Weak, Ice: Absorb }},
                 status_resistances: {{ Freeze: 150 }},
                 skills: [3, 4],
                 ai_pattern: Some("slime")),
                (id: 1, name: "Joker", stats: {STATS}),
            ])"#
        );
        let characters = CharacterLoader::parse(&content, &patterns()).unwrap();

        let frost = &characters[0];
        assert_eq!(frost.affinities.get(Element::Fire), Affinity::Weak);
        assert_eq!(frost.affinities.get(Element::Ice), Affinity::Absorb);
        assert_eq!(frost.status_resistances[&StatusKind::Freeze], 100);
        assert!(frost.ai_pattern.is_some());

        assert!(characters[1].ai_pattern.is_none());
        assert!(characters[1].skills.is_empty());
    }

    #[test]
    fn unknown_pattern_is_an_error() {
        let content = format!(
            r#"(characters: [(id: 2, name: "Ghost", stats: {STATS}, ai_pattern: Some("missing"))])"#
        );
        let err = CharacterLoader::parse(&content, &patterns()).unwrap_err();
        assert!(err.to_string().contains("missing"));
    }
}
