//! Skill catalog loader.

use std::collections::BTreeSet;
use std::path::Path;

use battle_core::{BattleConfig, SkillData, SkillId};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Skill catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillCatalog {
    pub skills: Vec<SkillData>,
}

/// Loader for skill catalog from RON files.
pub struct SkillLoader;

impl SkillLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<SkillData>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<SkillData>> {
        let catalog: SkillCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse skill catalog RON: {}", e))?;

        let mut seen = BTreeSet::new();
        for skill in &catalog.skills {
            if skill.id == SkillId::BASIC_ATTACK {
                anyhow::bail!("skill '{}' uses the reserved basic attack id", skill.name);
            }
            if !seen.insert(skill.id) {
                anyhow::bail!("duplicate skill id {}", skill.id);
            }
            if skill.hits == 0 || skill.hits > BattleConfig::MAX_HITS {
                anyhow::bail!(
                    "skill '{}' has {} hits (allowed 1..={})",
                    skill.name,
                    skill.hits,
                    BattleConfig::MAX_HITS
                );
            }
        }

        Ok(catalog.skills)
    }
}
