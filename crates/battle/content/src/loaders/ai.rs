//! AI pattern loader.

use std::collections::BTreeMap;
use std::path::Path;

use battle_core::AiPattern;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// AI pattern catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiPatternCatalog {
    pub patterns: Vec<AiPattern>,
}

/// Loader for named AI patterns.
///
/// Patterns are validated on load; a malformed pattern fails the whole file.
pub struct AiPatternLoader;

impl AiPatternLoader {
    pub fn load(path: &Path) -> LoadResult<BTreeMap<String, AiPattern>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<BTreeMap<String, AiPattern>> {
        let catalog: AiPatternCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse AI pattern RON: {}", e))?;

        let mut patterns = BTreeMap::new();
        for pattern in catalog.patterns {
            pattern
                .validate()
                .map_err(|e| anyhow::anyhow!("Invalid AI pattern: {}", e))?;
            let name = pattern.name.clone();
            if patterns.insert(name.clone(), pattern).is_some() {
                anyhow::bail!("duplicate AI pattern '{}'", name);
            }
        }

        Ok(patterns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{AiCapabilities, BehaviorType, TargetPriority};

    #[test]
    fn parses_capabilities_and_phases() {
        let patterns = AiPatternLoader::parse(
            r#"(patterns: [
                (
                    name: "shadow_boss",
                    behavior: Tactical,
                    target_priority: MostVulnerable,
                    capabilities: "WEAKNESS_EXPLOIT | PERSONALITY_PHASES",
                    boss_phase: true,
                    phases: [
                        (hp_threshold: 50, behavior: Berserk, target_priority: Random),
                    ],
                ),
                (name: "slime"),
            ])"#,
        )
        .unwrap();

        let boss = &patterns["shadow_boss"];
        assert_eq!(boss.behavior, BehaviorType::Tactical);
        assert!(boss.has(AiCapabilities::WEAKNESS_EXPLOIT));
        assert!(boss.has(AiCapabilities::PERSONALITY_PHASES));
        assert!(!boss.has(AiCapabilities::ADAPTIVE_LEARNING));
        assert_eq!(boss.profile_at(40).1, TargetPriority::Random);

        let slime = &patterns["slime"];
        assert_eq!(slime.behavior, BehaviorType::Balanced);
        assert_eq!(slime.heal_threshold, 40);
    }

    #[test]
    fn malformed_pattern_fails_the_file() {
        let err = AiPatternLoader::parse(
            r#"(patterns: [(name: "broken", capabilities: "PERSONALITY_PHASES")])"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("broken"));
    }
}
