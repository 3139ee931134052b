//! In-memory content registry.

use std::collections::BTreeMap;

use battle_core::{
    CharacterId, CharacterOracle, CharacterTemplate, ItemData, ItemId, ItemOracle,
    ShowtimeDefinition, SkillData, SkillId, SkillOracle, TechnicalTable,
};

/// Catalog of every definition a battle can look up.
#[derive(Clone, Debug, Default)]
pub struct ContentRegistry {
    characters: BTreeMap<CharacterId, CharacterTemplate>,
    skills: BTreeMap<SkillId, SkillData>,
    items: BTreeMap<ItemId, ItemData>,
    showtimes: Vec<ShowtimeDefinition>,
    technicals: TechnicalTable,
}

impl ContentRegistry {
    /// Empty registry using the standard technical table.
    pub fn new() -> Self {
        Self {
            technicals: TechnicalTable::standard(),
            ..Self::default()
        }
    }

    pub fn insert_character(&mut self, template: CharacterTemplate) {
        self.characters.insert(template.id, template);
    }

    pub fn insert_skill(&mut self, skill: SkillData) {
        self.skills.insert(skill.id, skill);
    }

    pub fn insert_item(&mut self, item: ItemData) {
        self.items.insert(item.id, item);
    }

    pub fn with_character(mut self, template: CharacterTemplate) -> Self {
        self.insert_character(template);
        self
    }

    pub fn with_skill(mut self, skill: SkillData) -> Self {
        self.insert_skill(skill);
        self
    }

    pub fn with_item(mut self, item: ItemData) -> Self {
        self.insert_item(item);
        self
    }

    pub fn with_showtime(mut self, showtime: ShowtimeDefinition) -> Self {
        self.showtimes.push(showtime);
        self
    }

    pub fn with_technicals(mut self, table: TechnicalTable) -> Self {
        self.technicals = table;
        self
    }

    pub fn extend_skills(&mut self, skills: impl IntoIterator<Item = SkillData>) {
        for skill in skills {
            self.insert_skill(skill);
        }
    }

    pub fn extend_items(&mut self, items: impl IntoIterator<Item = ItemData>) {
        for item in items {
            self.insert_item(item);
        }
    }

    pub fn extend_characters(&mut self, templates: impl IntoIterator<Item = CharacterTemplate>) {
        for template in templates {
            self.insert_character(template);
        }
    }

    pub fn set_showtimes(&mut self, showtimes: Vec<ShowtimeDefinition>) {
        self.showtimes = showtimes;
    }

    pub fn set_technicals(&mut self, table: TechnicalTable) {
        self.technicals = table;
    }

    pub fn showtimes(&self) -> &[ShowtimeDefinition] {
        &self.showtimes
    }

    pub fn technicals(&self) -> &TechnicalTable {
        &self.technicals
    }

    pub fn character_count(&self) -> usize {
        self.characters.len()
    }

    pub fn skill_count(&self) -> usize {
        self.skills.len()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

impl CharacterOracle for ContentRegistry {
    fn character(&self, id: CharacterId) -> Option<CharacterTemplate> {
        self.characters.get(&id).cloned()
    }
}

impl SkillOracle for ContentRegistry {
    fn skill(&self, id: SkillId) -> Option<SkillData> {
        self.skills.get(&id).cloned()
    }
}

impl ItemOracle for ContentRegistry {
    fn item(&self, id: ItemId) -> Option<ItemData> {
        self.items.get(&id).cloned()
    }
}
