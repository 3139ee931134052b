//! Utility AI driving members inside real battles.

mod common;

use std::sync::Arc;

use battle_core::{
    ActionKind, Affinity, AiCapabilities, AiPattern, BattleAction, BehaviorType, CharacterId,
    CharacterStats, CharacterTemplate, Element, MemberId, PcgRng, TargetPriority,
};
use battle_runtime::{BattleOutcome, BattlePhase, UtilityAiProvider};
use common::*;
use strum::IntoEnumIterator;

const CASTER: CharacterId = CharacterId(102);
const COWARD: CharacterId = CharacterId(103);

fn enemy_stats(max_mp: u32) -> CharacterStats {
    CharacterStats::new(5, 300, max_mp)
        .with_offense(10, 10)
        .with_defense(10, 10)
        .with_speed(8)
}

#[test]
fn member_without_mp_attacks_under_every_behavior() {
    for behavior in BehaviorType::iter() {
        let caster = CharacterTemplate::new(CASTER, "Caster", enemy_stats(0))
            .with_skills(vec![AGI])
            .with_ai(
                AiPattern::new("caster", behavior, TargetPriority::LowestHp)
                    .with_skill_pool(vec![AGI]),
            );
        let mut battle = builder(registry().with_character(caster), &[JOKER], &[CASTER])
            .ai_provider(Arc::new(UtilityAiProvider))
            .build()
            .unwrap();
        battle.start().unwrap();
        // Hard to dent: guarding would otherwise look attractive.
        battle.member_mut(MemberId(0)).unwrap().stats.defense = 60;

        next_turn(&mut battle);
        battle.execute_action(BattleAction::guard(MemberId(0))).unwrap();
        next_turn(&mut battle);
        assert_eq!(battle.phase(), BattlePhase::AiDeciding(MemberId(1)));

        let report = battle.run_ai_turn().unwrap();
        assert_eq!(report.kind, ActionKind::Attack, "{behavior} did not attack");
        assert!(!report.substituted);
        assert_eq!(battle.member(MemberId(1)).unwrap().stats.mp, 0);
    }
}

#[test]
fn malformed_pattern_is_replaced_with_the_default() {
    let broken = AiPattern::new("broken", BehaviorType::Berserk, TargetPriority::Random)
        .with_capabilities(AiCapabilities::PERSONALITY_PHASES);
    assert!(broken.validate().is_err());
    let enemy = CharacterTemplate::new(CASTER, "Broken", enemy_stats(0)).with_ai(broken);

    let mut battle = builder(registry().with_character(enemy), &[JOKER], &[CASTER])
        .ai_provider(Arc::new(UtilityAiProvider))
        .build()
        .unwrap();
    let member = battle.member(MemberId(1)).unwrap();
    assert_eq!(member.ai_pattern.as_deref(), Some(&AiPattern::default()));
    assert!(member.is_ai_controlled());

    battle.start().unwrap();
    next_turn(&mut battle);
    battle.execute_action(BattleAction::guard(MemberId(0))).unwrap();
    next_turn(&mut battle);
    let report = battle.run_ai_turn().unwrap();
    assert_eq!(report.kind, ActionKind::Attack);
}

#[test]
fn cowardly_member_tries_to_flee_when_hurt() {
    let mut pattern = AiPattern::new("coward", BehaviorType::Cowardly, TargetPriority::LowestHp);
    pattern.flee_threshold = 50;
    let coward = CharacterTemplate::new(COWARD, "Coward", enemy_stats(0)).with_ai(pattern);
    let mut battle = builder(registry().with_character(coward), &[JOKER], &[COWARD])
        .ai_provider(Arc::new(UtilityAiProvider))
        .build()
        .unwrap();
    battle.start().unwrap();
    battle.member_mut(MemberId(1)).unwrap().stats.hp = 30;

    next_turn(&mut battle);
    battle.execute_action(BattleAction::guard(MemberId(0))).unwrap();
    next_turn(&mut battle);
    let report = battle.run_ai_turn().unwrap();

    assert_eq!(report.kind, ActionKind::Escape);
    // Slower and lower level than Joker: the chance bottoms out at 5%.
    assert_eq!(battle.escape_chance(MemberId(1)), Ok(5));
    assert_eq!(report.escaped, Some(false));
    assert!(battle.member(MemberId(1)).unwrap().is_alive());
}

#[test]
fn enemy_memory_records_player_actions_and_revealed_affinities() {
    let mut battle = battle(&[JOKER, SKULL], &[SHADOW]);
    let shadow = MemberId(2);

    next_turn(&mut battle);
    battle
        .execute_action(BattleAction::skill(MemberId(0), AGI, vec![shadow]))
        .unwrap();
    next_turn(&mut battle);
    battle
        .execute_action(BattleAction::attack(MemberId(0), shadow))
        .unwrap();
    next_turn(&mut battle);
    battle.execute_action(BattleAction::guard(MemberId(1))).unwrap();

    let memory = battle.ai_memory(shadow).unwrap();
    assert_eq!(memory.player_pattern().len(), 3);
    assert_eq!(memory.known_count(), 0);

    next_turn(&mut battle);
    battle.run_ai_turn().unwrap();
    let memory = battle.ai_memory(shadow).unwrap();
    assert_eq!(
        memory.known_affinity(JOKER, Element::Physical),
        Some(Affinity::Normal)
    );
}

#[test]
fn carried_memory_survives_into_the_next_battle() {
    let mut pattern = AiPattern::new("rival", BehaviorType::Balanced, TargetPriority::LowestHp);
    pattern.carry_memory = true;
    let rival = CharacterTemplate::new(PIXIE, "Rival", enemy_stats(0)).with_ai(pattern);
    let content = registry().with_character(rival);

    let mut first = builder(content.clone(), &[JOKER], &[PIXIE]).build().unwrap();
    first.start().unwrap();
    next_turn(&mut first);
    first
        .execute_action(BattleAction::attack(MemberId(0), MemberId(1)))
        .unwrap();
    let carried = first.export_memories();
    assert_eq!(carried.len(), 1);
    assert_eq!(carried[&PIXIE].player_pattern().len(), 1);

    let second = builder(content, &[JOKER], &[PIXIE])
        .carried_memories(carried)
        .build()
        .unwrap();
    let memory = second.ai_memory(MemberId(1)).unwrap();
    assert_eq!(memory.player_pattern().len(), 1);
}

#[test]
fn all_ai_battle_reaches_an_outcome_within_bounds() {
    let mut content = registry();
    for (id, name, speed, skills) in [
        (JOKER, "Joker", 30, vec![AGI, GARU, BASH, DIA]),
        (SKULL, "Skull", 20, vec![AGI, BASH]),
    ] {
        let pattern = AiPattern::new(name, BehaviorType::Tactical, TargetPriority::MostVulnerable);
        content.insert_character(hero(id, name, speed, skills).with_ai(pattern));
    }

    let mut battle = builder(content, &[JOKER, SKULL], &[SHADOW, PIXIE])
        .rng(Arc::new(PcgRng))
        .ai_provider(Arc::new(UtilityAiProvider))
        .seed(0x5eed)
        .build()
        .unwrap();
    battle.start().unwrap();

    for _ in 0..2_000 {
        match battle.phase() {
            BattlePhase::AwaitingTurnStart => {
                battle.start_next_turn().unwrap();
            }
            BattlePhase::AiDeciding(_) => {
                battle.run_ai_turn().unwrap();
            }
            BattlePhase::AwaitingAllOutAttack(_) => {
                battle.confirm_all_out_attack().unwrap();
            }
            BattlePhase::Ended(_) => break,
            other => panic!("unexpected phase {other:?}"),
        }

        for member in battle.members() {
            assert!(member.stats.is_within_bounds(), "{} out of bounds", member.id);
            if !member.is_alive() {
                assert!(!member.is_knocked_down);
            }
        }
        assert!(battle.living_enemies().iter().all(|m| m.stats.hp > 0));
        assert!(battle.living_allies().iter().all(|m| m.stats.hp > 0));
    }

    assert!(matches!(
        battle.outcome(),
        Some(BattleOutcome::Victory | BattleOutcome::Defeat)
    ));
    assert!(!battle.results().members.is_empty());
}
