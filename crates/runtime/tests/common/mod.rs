//! Shared roster, content and deterministic rolls for battle tests.
#![allow(dead_code)]

use std::sync::Arc;

use battle_content::ContentRegistry;
use battle_core::{
    Affinity, AffinityTable, AiPattern, BattleAction, BehaviorType, CharacterId, CharacterStats,
    CharacterTemplate, DamageKind, Element, ItemData, ItemEffect, ItemId, MemberId, RngOracle,
    SkillCost, SkillData, SkillId, StatusKind, TargetPriority, TargetShape,
};
use battle_runtime::providers::ai::AiContext;
use battle_runtime::{BattleBuilder, BattleManager, BattlePhase, MemoryInventory, TurnStart};

pub const AGI: SkillId = SkillId(10);
pub const GARU: SkillId = SkillId(11);
pub const BASH: SkillId = SkillId(12);
pub const DIA: SkillId = SkillId(13);
pub const TOXIC_MIST: SkillId = SkillId(14);

pub const MEDICINE: ItemId = ItemId(1);

pub const JOKER: CharacterId = CharacterId(1);
pub const SKULL: CharacterId = CharacterId(2);
pub const MONA: CharacterId = CharacterId(3);
pub const SHADOW: CharacterId = CharacterId(100);
pub const PIXIE: CharacterId = CharacterId(101);

/// Every roll returns the same value: d100 rolls land on 50 and the
/// formula variance band resolves to exactly 100%.
pub struct FixedRng(pub u32);

impl RngOracle for FixedRng {
    fn next_u32(&self, _seed: u64) -> u32 {
        self.0
    }
}

pub fn rolls_fifty() -> Arc<FixedRng> {
    Arc::new(FixedRng(49))
}

pub fn hero(id: CharacterId, name: &str, speed: u32, skills: Vec<SkillId>) -> CharacterTemplate {
    let stats = CharacterStats::new(10, 200, 50)
        .with_offense(20, 20)
        .with_defense(10, 10)
        .with_speed(speed);
    CharacterTemplate::new(id, name, stats).with_skills(skills)
}

pub fn registry() -> ContentRegistry {
    let shadow = CharacterStats::new(5, 2000, 0)
        .with_offense(10, 10)
        .with_defense(10, 10)
        .with_speed(5);
    let pixie = CharacterStats::new(5, 300, 20)
        .with_offense(10, 10)
        .with_defense(10, 10)
        .with_speed(8);

    ContentRegistry::new()
        .with_skill(
            SkillData::new(AGI, "Agi", DamageKind::Magical, 100)
                .with_element(Element::Fire)
                .with_cost(SkillCost::Mp(4)),
        )
        .with_skill(
            SkillData::new(GARU, "Garu", DamageKind::Magical, 100)
                .with_element(Element::Wind)
                .with_cost(SkillCost::Mp(4)),
        )
        .with_skill(SkillData::new(BASH, "Bash", DamageKind::Physical, 100).knocking_down())
        .with_skill(
            SkillData::new(DIA, "Dia", DamageKind::Recovery, 30)
                .with_target(TargetShape::SINGLE_ALLY)
                .with_cost(SkillCost::Mp(3)),
        )
        .with_skill(
            SkillData::new(TOXIC_MIST, "Toxic Mist", DamageKind::Support, 0)
                .with_status(StatusKind::Poison, 100, 3)
                .with_cost(SkillCost::Mp(2)),
        )
        .with_item(ItemData::new(
            MEDICINE,
            "Medicine",
            TargetShape::SINGLE_ALLY,
            ItemEffect::HealHp(50),
        ))
        .with_character(hero(JOKER, "Joker", 30, vec![AGI, GARU, BASH, DIA, TOXIC_MIST]))
        .with_character(hero(SKULL, "Skull", 20, vec![AGI, BASH, TOXIC_MIST]))
        .with_character(hero(MONA, "Mona", 15, vec![AGI, GARU, DIA]))
        .with_character(
            CharacterTemplate::new(SHADOW, "Shadow", shadow).with_affinities(
                AffinityTable::new()
                    .with(Element::Fire, Affinity::Weak)
                    .with(Element::Ice, Affinity::Immune),
            ),
        )
        .with_character(
            CharacterTemplate::new(PIXIE, "Pixie", pixie)
                .with_affinities(AffinityTable::new().with(Element::Wind, Affinity::Weak))
                .with_ai(AiPattern::new("pixie", BehaviorType::Balanced, TargetPriority::LowestHp)),
        )
}

/// Scripted enemy policy: basic attack on the first standing opponent.
pub fn strike_first(ctx: &AiContext<'_>) -> BattleAction {
    match ctx.opponents().first() {
        Some(target) => BattleAction::attack(ctx.actor.id, target.id),
        None => BattleAction::guard(ctx.actor.id),
    }
}

pub fn builder(
    registry: ContentRegistry,
    party: &[CharacterId],
    enemies: &[CharacterId],
) -> BattleBuilder {
    BattleManager::builder()
        .registry(Arc::new(registry))
        .party(party.iter().copied())
        .enemies(enemies.iter().copied())
        .rng(rolls_fifty())
        .ai_provider(Arc::new(strike_first))
        .inventory(MemoryInventory::new(100).with_item(MEDICINE, 1))
        .seed(7)
}

/// Started battle with the standard registry.
pub fn battle(party: &[CharacterId], enemies: &[CharacterId]) -> BattleManager {
    let mut battle = builder(registry(), party, enemies)
        .build()
        .expect("battle builds");
    battle.start().expect("battle starts");
    battle
}

pub fn next_turn(battle: &mut BattleManager) -> TurnStart {
    battle.start_next_turn().expect("turn starts")
}

/// Advances through AI turns until a player decision is pending or the
/// battle ends.
pub fn run_until_player(battle: &mut BattleManager) {
    for _ in 0..64 {
        match battle.phase() {
            BattlePhase::AwaitingTurnStart => {
                battle.start_next_turn().expect("turn starts");
            }
            BattlePhase::AiDeciding(_) => {
                battle.run_ai_turn().expect("AI acts");
            }
            _ => return,
        }
    }
    panic!("no player turn came up");
}

pub fn hp(battle: &BattleManager, id: MemberId) -> u32 {
    battle.member(id).expect("member exists").stats.hp
}
