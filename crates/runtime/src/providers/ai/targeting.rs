//! Target ranking strategies.
//!
//! Every [`TargetPriority`] resolves to a ranking function through a lookup
//! table. A ranker maps a candidate to a sort key where lower ranks first;
//! remaining ties fall back to roster order.

use battle_core::{
    Affinity, BattleMember, BuffStat, Element, MemberId, RngOracle, TargetPriority,
};

use super::{AiContext, AiMemory};

type RankKey = [u64; 3];

/// Inputs shared by every ranker.
pub struct RankInput<'a, 'b> {
    pub ctx: &'a AiContext<'b>,
    pub memory: &'a AiMemory,
    pub rng: &'a dyn RngOracle,
    pub seed: u64,
}

type Ranker = fn(&RankInput<'_, '_>, &BattleMember) -> RankKey;

static RANKERS: [(TargetPriority, Ranker); 9] = [
    (TargetPriority::MostVulnerable, most_vulnerable),
    (TargetPriority::HighestThreat, highest_threat),
    (TargetPriority::LowestHp, lowest_hp),
    (TargetPriority::HighestHp, highest_hp),
    (TargetPriority::Random, random),
    (TargetPriority::Leader, leader),
    (TargetPriority::Healer, healer),
    (TargetPriority::LowestDefense, lowest_defense),
    (TargetPriority::Weakest, weakest),
];

fn ranker(priority: TargetPriority) -> Ranker {
    RANKERS
        .iter()
        .find(|(p, _)| *p == priority)
        .map(|(_, ranker)| *ranker)
        .unwrap_or(lowest_hp)
}

/// Orders `candidates` best-first for `priority`.
pub fn rank_targets(
    priority: TargetPriority,
    input: &RankInput<'_, '_>,
    candidates: &[&BattleMember],
) -> Vec<MemberId> {
    let rank = ranker(priority);
    let mut keyed: Vec<(RankKey, usize, MemberId)> = candidates
        .iter()
        .map(|member| (rank(input, member), member.roster_index, member.id))
        .collect();
    keyed.sort();
    keyed.into_iter().map(|(_, _, id)| id).collect()
}

fn inverted(value: u32) -> u64 {
    u64::from(u32::MAX - value)
}

/// Elements the deciding member can hit with.
fn attack_elements(ctx: &AiContext<'_>) -> Vec<Element> {
    let mut elements = vec![Element::Physical];
    elements.extend(
        ctx.actor
            .skills
            .iter()
            .filter_map(|id| ctx.env.skill(*id).ok())
            .filter(|skill| skill.damage_kind.is_damaging())
            .map(|skill| skill.element),
    );
    elements
}

fn most_vulnerable(input: &RankInput<'_, '_>, member: &BattleMember) -> RankKey {
    let known_weak = attack_elements(input.ctx).into_iter().any(|element| {
        input.memory.known_affinity(member.template_id, element) == Some(Affinity::Weak)
    });
    [
        u64::from(!known_weak),
        u64::from(!member.is_knocked_down),
        u64::from(member.stats.hp_ratio()),
    ]
}

fn highest_threat(_: &RankInput<'_, '_>, member: &BattleMember) -> RankKey {
    let attack = member.buffs.effective(&member.stats, BuffStat::Attack);
    let magic = member.buffs.effective(&member.stats, BuffStat::MagicAttack);
    [inverted(attack.max(magic)), 0, 0]
}

fn lowest_hp(_: &RankInput<'_, '_>, member: &BattleMember) -> RankKey {
    [u64::from(member.stats.hp_ratio()), u64::from(member.stats.hp), 0]
}

fn highest_hp(_: &RankInput<'_, '_>, member: &BattleMember) -> RankKey {
    [inverted(member.stats.hp), 0, 0]
}

fn random(input: &RankInput<'_, '_>, member: &BattleMember) -> RankKey {
    let seed = input.seed ^ u64::from(member.id.0).wrapping_mul(0x9e3779b97f4a7c15);
    [u64::from(input.rng.next_u32(seed)), 0, 0]
}

fn leader(_: &RankInput<'_, '_>, member: &BattleMember) -> RankKey {
    [member.roster_index as u64, 0, 0]
}

fn healer(input: &RankInput<'_, '_>, member: &BattleMember) -> RankKey {
    let healing = input.ctx.recovery_skill_count(member) as u32;
    [inverted(healing), u64::from(member.stats.hp_ratio()), 0]
}

fn lowest_defense(_: &RankInput<'_, '_>, member: &BattleMember) -> RankKey {
    [
        u64::from(member.buffs.effective(&member.stats, BuffStat::Defense)),
        u64::from(member.buffs.effective(&member.stats, BuffStat::MagicDefense)),
        0,
    ]
}

fn weakest(_: &RankInput<'_, '_>, member: &BattleMember) -> RankKey {
    let stats = &member.stats;
    let total = u64::from(stats.max_hp)
        + u64::from(stats.attack)
        + u64::from(stats.defense)
        + u64::from(stats.magic_attack)
        + u64::from(stats.magic_defense)
        + u64::from(stats.speed);
    [u64::from(stats.level), total, 0]
}
