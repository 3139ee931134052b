//! Battles assembled from on-disk content.

use std::sync::Arc;

use battle_content::ContentFactory;
use battle_core::{BattleAction, CharacterId, MemberId, SkillId};
use battle_runtime::{BattleManager, BattlePhase, RuntimeError};

const SKILLS: &str = r#"(skills: [
    (id: 7, name: "Zio", target: (scope: Single, side: Enemy), damage_kind: Magical, power: 50, element: Electric, cost: Mp(3)),
])"#;

const CHARACTERS: &str = r#"(characters: [
    (id: 1, name: "Ryuji", stats: (level: 3, hp: 60, max_hp: 60, mp: 10, max_mp: 10, attack: 15, defense: 8, magic_attack: 12, magic_defense: 6, speed: 9), skills: [7]),
    (id: 50, name: "Slime", stats: (level: 1, hp: 40, max_hp: 40, mp: 0, max_mp: 0, attack: 5, defense: 4, magic_attack: 2, magic_defense: 4, speed: 2), affinities: {Electric: Weak}),
])"#;

fn write_content(dir: &std::path::Path) {
    std::fs::write(dir.join("skills.ron"), SKILLS).unwrap();
    std::fs::write(dir.join("characters.ron"), CHARACTERS).unwrap();
    std::fs::write(dir.join("battle.toml"), "weakness_multiplier = 200\n").unwrap();
}

#[test]
fn loaded_content_drives_a_battle() {
    let dir = tempfile::tempdir().unwrap();
    write_content(dir.path());

    let factory = ContentFactory::new(dir.path());
    let registry = Arc::new(factory.load_registry().unwrap());
    let config = factory.load_config().unwrap();
    assert_eq!(config.weakness_multiplier, 200);

    let mut battle = BattleManager::builder()
        .registry(registry)
        .config(config)
        .party([CharacterId(1)])
        .enemies([CharacterId(50)])
        .seed(11)
        .build()
        .unwrap();
    battle.start().unwrap();
    battle.start_next_turn().unwrap();
    assert_eq!(battle.phase(), BattlePhase::AwaitingAction(MemberId(0)));

    let report = battle
        .execute_action(BattleAction::skill(MemberId(0), SkillId(7), vec![MemberId(1)]))
        .unwrap();
    // 50 × 12 / 4 = 150, doubled by the configured weakness multiplier.
    assert!(report.weakness);
    assert_eq!(report.total_damage, 300);
    assert!(battle.outcome().is_some_and(|outcome| outcome.is_victory()));
}

#[test]
fn unknown_roster_entries_fail_the_build() {
    let dir = tempfile::tempdir().unwrap();
    write_content(dir.path());
    let registry = Arc::new(ContentFactory::new(dir.path()).load_registry().unwrap());

    let err = BattleManager::builder()
        .registry(registry.clone())
        .party([CharacterId(1)])
        .enemies([CharacterId(404)])
        .build()
        .unwrap_err();
    assert!(matches!(err, RuntimeError::Battle(_)));

    let err = BattleManager::builder()
        .registry(registry)
        .party([CharacterId(1)])
        .build()
        .unwrap_err();
    assert!(matches!(err, RuntimeError::EmptyRoster { .. }));
}
