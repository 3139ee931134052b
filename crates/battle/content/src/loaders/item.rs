//! Item catalog loader.

use std::path::Path;

use battle_core::ItemData;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Item catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemCatalog {
    pub items: Vec<ItemData>,
}

/// Loader for item catalog from RON files.
pub struct ItemLoader;

impl ItemLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<ItemData>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<ItemData>> {
        let catalog: ItemCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse item catalog RON: {}", e))?;

        Ok(catalog.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{Element, ItemEffect, ItemId, TargetSide};

    #[test]
    fn parses_effects() {
        let items = ItemLoader::parse(
            r#"(items: [
                (id: 1, name: "Medicine", target: (scope: Single, side: Ally), effect: HealHp(50)),
                (id: 2, name: "Revival Bead", target: (scope: Single, side: DeadAlly), effect: Revive(50)),
                (id: 3, name: "Molotov", target: (scope: All, side: Enemy), effect: Damage(element: Fire, power: 30)),
            ])"#,
        )
        .unwrap();

        assert_eq!(items.len(), 3);
        assert_eq!(items[0].id, ItemId(1));
        assert_eq!(items[1].target.side, TargetSide::DeadAlly);
        assert_eq!(
            items[2].effect,
            ItemEffect::Damage {
                element: Element::Fire,
                power: 30
            }
        );
    }
}
