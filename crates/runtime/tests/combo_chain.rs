//! Knockdowns, One More, baton passes, technicals and finishers.

mod common;

use battle_core::{
    BattleAction, BattleError, CharacterId, MemberId, ShowtimeDefinition, StatusKind,
    StatusReapply,
};
use battle_runtime::{ActionCategory, BattleEvent, BattlePhase, Topic, TurnKind};
use common::*;

const JOKER_ID: MemberId = MemberId(0);
const SKULL_ID: MemberId = MemberId(1);

#[test]
fn knocking_down_every_enemy_offers_an_all_out_attack() {
    let mut battle = battle(&[JOKER, SKULL], &[SHADOW]);
    let shadow = MemberId(2);
    let mut combo = battle.subscribe(Topic::Combo);

    next_turn(&mut battle);
    let report = battle
        .execute_action(BattleAction::skill(JOKER_ID, BASH, vec![shadow]))
        .unwrap();
    assert_eq!(report.total_damage, 200);
    assert!(report.hits[0].knocked_down);
    assert!(report.all_out_ready);
    assert!(!report.one_more);
    assert_eq!(battle.phase(), BattlePhase::AwaitingAllOutAttack(JOKER_ID));
    assert!(battle.is_player_turn());
    assert_eq!(combo.try_recv().unwrap(), BattleEvent::Knockdown { target: shadow });
    assert_eq!(
        combo.try_recv().unwrap(),
        BattleEvent::AllOutAttackReady { actor: JOKER_ID }
    );

    // Only the prompt's action is accepted while it is open.
    let err = battle
        .execute_action(BattleAction::attack(JOKER_ID, shadow))
        .unwrap_err();
    assert_eq!(err, BattleError::NotAwaitingAction);

    let finisher = battle.confirm_all_out_attack().unwrap();
    // (20 + 20) attack × 150% × 124% variance roll.
    assert_eq!(finisher.total_damage, 74);
    assert_eq!(finisher.category, ActionCategory::Finisher);
    assert_eq!(hp(&battle, shadow), 2000 - 200 - 74);
    assert!(battle.living_enemies().iter().all(|enemy| !enemy.is_knocked_down));
    assert_eq!(battle.phase(), BattlePhase::AwaitingTurnStart);
    assert_eq!(next_turn(&mut battle).actor, SKULL_ID);
}

#[test]
fn declining_the_all_out_attack_resumes_the_round() {
    let mut battle = battle(&[JOKER, SKULL], &[SHADOW]);
    let shadow = MemberId(2);

    next_turn(&mut battle);
    battle
        .execute_action(BattleAction::skill(JOKER_ID, BASH, vec![shadow]))
        .unwrap();
    battle.decline_all_out_attack().unwrap();

    assert_eq!(battle.phase(), BattlePhase::AwaitingTurnStart);
    assert!(battle.member(shadow).unwrap().is_knocked_down);
    assert_eq!(
        battle.confirm_all_out_attack().unwrap_err(),
        BattleError::AllOutAttackUnavailable
    );
    assert_eq!(next_turn(&mut battle).actor, SKULL_ID);
}

#[test]
fn a_standing_enemy_blocks_the_all_out_attack() {
    let mut battle = battle(&[JOKER, SKULL], &[SHADOW, SHADOW]);

    next_turn(&mut battle);
    let report = battle
        .execute_action(BattleAction::skill(JOKER_ID, BASH, vec![MemberId(2)]))
        .unwrap();
    assert!(report.hits[0].knocked_down);
    assert!(!report.all_out_ready);
    assert_eq!(battle.phase(), BattlePhase::AwaitingTurnStart);
}

#[test]
fn baton_passes_chain_the_damage_bonus() {
    let mut battle = battle(&[JOKER, SKULL, MONA], &[SHADOW]);
    let mona = MemberId(2);
    let shadow = MemberId(3);
    let mut combo = battle.subscribe(Topic::Combo);

    next_turn(&mut battle);
    assert!(!battle.can_baton_pass(), "nothing to pass before a One More");
    battle
        .execute_action(BattleAction::skill(JOKER_ID, AGI, vec![shadow]))
        .unwrap();
    assert_eq!(battle.baton_holder(), Some(JOKER_ID));
    assert_eq!(battle.baton_pass_targets(), vec![SKULL_ID, mona]);

    let turn = battle.baton_pass(SKULL_ID).unwrap();
    assert_eq!(turn.actor, SKULL_ID);
    assert_eq!(turn.kind, TurnKind::BatonPass);
    assert_eq!(battle.phase(), BattlePhase::AwaitingAction(SKULL_ID));

    let relayed = battle
        .execute_action(BattleAction::skill(SKULL_ID, AGI, vec![shadow]))
        .unwrap();
    assert_eq!(relayed.total_damage, 450);
    assert!(relayed.one_more);

    // Joker already passed this round, so only Mona can take it.
    assert_eq!(battle.baton_pass_targets(), vec![mona]);
    assert_eq!(
        battle.baton_pass(JOKER_ID).unwrap_err(),
        BattleError::BatonPassUnavailable {
            reason: "ally cannot receive the baton",
        }
    );
    battle.baton_pass(mona).unwrap();
    let chained = battle
        .execute_action(BattleAction::skill(mona, AGI, vec![shadow]))
        .unwrap();
    assert_eq!(chained.total_damage, 600);
    assert_eq!(hp(&battle, shadow), 2000 - 300 - 450 - 600);
    assert!(!battle.can_baton_pass());

    let passes: Vec<u8> = std::iter::from_fn(|| combo.try_recv().ok())
        .filter_map(|event| match event {
            BattleEvent::BatonPassExecuted { pass_level, .. } => Some(pass_level),
            _ => None,
        })
        .collect();
    assert_eq!(passes, vec![1, 2]);
}

#[test]
fn relay_level_restarts_with_the_next_round() {
    let mut battle = battle(&[JOKER, SKULL, MONA], &[SHADOW, SHADOW]);
    let mona = MemberId(2);
    let first_shadow = MemberId(3);
    let second_shadow = MemberId(4);
    let mut combo = battle.subscribe(Topic::Combo);
    let agi = |actor, target| BattleAction::skill(actor, AGI, vec![target]);

    // Joker and Skull spend their turns so the relay reaches members that already acted.
    next_turn(&mut battle);
    battle.execute_action(BattleAction::guard(JOKER_ID)).unwrap();
    next_turn(&mut battle);
    battle.execute_action(BattleAction::guard(SKULL_ID)).unwrap();
    next_turn(&mut battle);
    battle.execute_action(agi(mona, first_shadow)).unwrap();
    battle.baton_pass(JOKER_ID).unwrap();
    let relayed = battle.execute_action(agi(JOKER_ID, first_shadow)).unwrap();
    assert_eq!(relayed.total_damage, 450);
    battle.baton_pass(SKULL_ID).unwrap();
    let chained = battle.execute_action(agi(SKULL_ID, first_shadow)).unwrap();
    assert_eq!(chained.total_damage, 600);
    assert!(!battle.can_baton_pass());

    assert_eq!(next_turn(&mut battle).kind, TurnKind::OneMore);
    battle.execute_action(BattleAction::guard(SKULL_ID)).unwrap();
    assert_eq!(battle.member(SKULL_ID).unwrap().baton_pass.pass_count, 2);
    assert_eq!(battle.round(), 1);

    run_until_player(&mut battle);
    assert_eq!(battle.round(), 2);
    assert_eq!(battle.current_actor(), Some(JOKER_ID));
    let skull = battle.member(SKULL_ID).unwrap();
    assert!(!skull.baton_pass.is_active);
    assert_eq!(skull.baton_pass.pass_count, 0);
    assert!(
        [JOKER_ID, SKULL_ID, mona]
            .iter()
            .all(|id| !battle.member(*id).unwrap().passed_baton_this_round)
    );

    battle.execute_action(agi(JOKER_ID, second_shadow)).unwrap();
    assert_eq!(battle.baton_pass_targets(), vec![SKULL_ID, mona]);
    battle.baton_pass(SKULL_ID).unwrap();
    let fresh = battle.execute_action(agi(SKULL_ID, second_shadow)).unwrap();
    assert_eq!(fresh.total_damage, 450);

    let passes: Vec<u8> = std::iter::from_fn(|| combo.try_recv().ok())
        .filter_map(|event| match event {
            BattleEvent::BatonPassExecuted { pass_level, .. } => Some(pass_level),
            _ => None,
        })
        .collect();
    assert_eq!(passes, vec![1, 2, 1]);
}

#[test]
fn technical_consumes_the_status_and_earns_a_one_more() {
    let mut battle = battle(&[JOKER, SKULL], &[SHADOW]);
    let shadow = MemberId(2);
    battle
        .member_mut(shadow)
        .unwrap()
        .statuses
        .apply(StatusKind::Burn, 3, None, StatusReapply::Refresh);

    next_turn(&mut battle);
    let report = battle
        .execute_action(BattleAction::skill(JOKER_ID, GARU, vec![shadow]))
        .unwrap();

    assert_eq!(report.technicals, vec![String::from("Firestorm")]);
    assert_eq!(report.total_damage, 300);
    assert!(!report.weakness);
    assert!(report.one_more);
    assert!(!battle.member(shadow).unwrap().statuses.has(StatusKind::Burn));
}

#[test]
fn showtime_fires_once_per_battle() {
    let showtime = ShowtimeDefinition {
        name: String::from("Crossfire"),
        first: JOKER,
        second: SKULL,
        power: 100,
        hits: 1,
        chance_percent: 100,
        hp_threshold_percent: 100,
    };
    let mut battle = builder(registry().with_showtime(showtime), &[JOKER, SKULL], &[SHADOW])
        .build()
        .unwrap();
    battle.start().unwrap();
    let shadow = MemberId(2);
    let mut combo = battle.subscribe(Topic::Combo);

    next_turn(&mut battle);
    let report = battle
        .execute_action(BattleAction::attack(JOKER_ID, shadow))
        .unwrap();
    assert_eq!(report.showtime.as_deref(), Some("Crossfire"));
    // 100 from the attack, 200 from the showtime strike.
    assert_eq!(report.total_damage, 300);
    assert_eq!(
        combo.try_recv().unwrap(),
        BattleEvent::ShowtimeTriggered {
            name: String::from("Crossfire"),
            first: JOKER_ID,
            second: SKULL_ID,
        }
    );

    next_turn(&mut battle);
    let report = battle
        .execute_action(BattleAction::attack(SKULL_ID, shadow))
        .unwrap();
    assert_eq!(report.showtime, None);
}

#[test]
fn showtime_needs_both_partners_standing() {
    let showtime = ShowtimeDefinition {
        name: String::from("Crossfire"),
        first: JOKER,
        second: CharacterId(3),
        power: 100,
        hits: 1,
        chance_percent: 100,
        hp_threshold_percent: 100,
    };
    let mut battle = builder(registry().with_showtime(showtime), &[JOKER, SKULL], &[SHADOW])
        .build()
        .unwrap();
    battle.start().unwrap();

    next_turn(&mut battle);
    let report = battle
        .execute_action(BattleAction::attack(JOKER_ID, MemberId(2)))
        .unwrap();
    assert_eq!(report.showtime, None);
}
