//! Candidate generation and selection.
//!
//! One decision runs in four steps:
//!
//! 1. Resolve the active profile (personality phase) and its [`Strategy`].
//! 2. Rank opponents with the profile's target priority.
//! 3. Generate candidates (attacks, usable skills, guard, escape) and score
//!    each one, folding every enabled capability into the modifier.
//! 4. Pick the highest score; the first candidate wins ties.
//!
//! A member that cannot pay for any of its skills only weighs basic attacks.
//! When nothing scores above zero the member falls back to a basic attack on
//! its top-ranked opponent, or guards if no opponent stands.

use battle_core::{
    Affinity, AffinityTable, AiCapabilities as Caps, BattleAction, BattleMember, BuffStat,
    Combatant, DamageKind, Element, MemberId, RngOracle, RollKind, SkillData, TargetScope,
    TargetSide, calculate, compute_seed, roll_context,
};
use tracing::{debug, info};

use super::coordination::CoordinationBoard;
use super::memory::{AiMemory, PlanStep};
use super::scoring::Score;
use super::strategy::{Intent, Strategy};
use super::targeting::{RankInput, rank_targets};
use super::AiContext;

/// Top-ranked opponents considered for single-target attacks.
const TARGET_FANOUT: usize = 3;

/// The chosen action and why.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decision {
    pub action: BattleAction,
    pub score: Score,
    pub label: String,
}

#[derive(Clone, Debug)]
struct Candidate {
    action: BattleAction,
    label: String,
    intent: Intent,
    skill: Option<SkillData>,
    primary: Option<MemberId>,
    score: Score,
}

impl Candidate {
    fn costly(&self) -> bool {
        self.skill.as_ref().is_some_and(|skill| !skill.cost.is_free())
    }
}

/// Seed for one roll inside a decision, keyed by purpose and candidate index.
fn decision_roll(seed: u64, actor: MemberId, kind: RollKind, index: usize) -> u64 {
    compute_seed(seed, 0, actor.0, roll_context(kind, index as u32))
}

/// Chooses an action for `ctx.actor`.
pub fn decide(
    ctx: &AiContext<'_>,
    memory: &mut AiMemory,
    board: &mut CoordinationBoard,
    rng: &dyn RngOracle,
    seed: u64,
) -> Decision {
    let pattern = ctx.pattern();
    let actor = ctx.actor;
    let hp_ratio = actor.stats.hp_ratio();

    let (behavior, priority, phase) = pattern.profile_at(hp_ratio);
    if memory.enter_phase(phase) && phase.is_some() {
        info!(actor = %actor.id, %behavior, %priority, "AI personality phase changed");
    }
    if pattern.has(Caps::MULTI_TURN_PLANNING) {
        memory.validate_plan(ctx.members);
    }
    let strategy = Strategy::for_behavior(behavior);

    let opponents = ctx.opponents();
    let mut ranked = rank_targets(
        priority,
        &RankInput {
            ctx,
            memory,
            rng,
            seed,
        },
        &opponents,
    );
    if pattern.has(Caps::PARTY_COORDINATION) {
        // Stable partition: unclaimed targets first.
        ranked.sort_by_key(|id| board.attack_claimed(*id, actor.id, actor.side));
    }

    let planner = Planner {
        ctx,
        memory,
        board,
        strategy,
        rng,
        seed,
        ranked: &ranked,
        hp_ratio,
    };
    let mut candidates = planner.generate();
    planner.adjust(&mut candidates);

    debug!(
        actor = %actor.id,
        candidates = candidates.len(),
        %behavior,
        "AI: evaluating candidates"
    );
    let mut best: Option<&Candidate> = None;
    for candidate in &candidates {
        debug!(
            "  {}: score={} (possible={}, sit={}, pers={}, mod={})",
            candidate.label,
            candidate.score.value(),
            candidate.score.is_possible,
            candidate.score.situation,
            candidate.score.personality,
            candidate.score.modifier
        );
        // In case of tie, first candidate wins (stable ordering)
        if candidate.score.value() > best.map_or(0, |b| b.score.value()) {
            best = Some(candidate);
        }
    }

    let Some(chosen) = best.cloned() else {
        let action = fallback(actor, &ranked);
        debug!(actor = %actor.id, ?action.kind, "AI: no viable candidate, falling back");
        return Decision {
            action,
            score: Score::impossible(),
            label: String::from("fallback"),
        };
    };

    debug!(
        actor = %actor.id,
        choice = %chosen.label,
        score = chosen.score.value(),
        "AI: chose action"
    );
    remember(ctx, memory, board, &chosen);

    Decision {
        action: chosen.action,
        score: chosen.score,
        label: chosen.label,
    }
}

/// Basic attack on the top-ranked opponent for the actor's pattern, or Guard.
pub fn fallback_action(
    ctx: &AiContext<'_>,
    memory: &AiMemory,
    rng: &dyn RngOracle,
    seed: u64,
) -> BattleAction {
    let (_, priority, _) = ctx.pattern().profile_at(ctx.actor.stats.hp_ratio());
    let opponents = ctx.opponents();
    let ranked = rank_targets(
        priority,
        &RankInput {
            ctx,
            memory,
            rng,
            seed,
        },
        &opponents,
    );
    fallback(ctx.actor, &ranked)
}

fn fallback(actor: &BattleMember, ranked: &[MemberId]) -> BattleAction {
    match ranked.first() {
        Some(target) => BattleAction::attack(actor.id, *target),
        None => BattleAction::guard(actor.id),
    }
}

/// Post-selection bookkeeping: plan progress, new plan steps, coordination claims.
fn remember(
    ctx: &AiContext<'_>,
    memory: &mut AiMemory,
    board: &mut CoordinationBoard,
    chosen: &Candidate,
) {
    let pattern = ctx.pattern();
    let actor = ctx.actor;

    if pattern.has(Caps::MULTI_TURN_PLANNING) {
        let skill_id = chosen.skill.as_ref().map(|skill| skill.id);
        if let Some(step) = memory.next_step().copied()
            && Some(step.skill) == skill_id
            && Some(step.target) == chosen.primary
        {
            memory.complete_step();
        }

        if let (Some(skill), Some(target)) = (&chosen.skill, chosen.primary) {
            let usable = ctx.usable_skills();
            for infliction in &skill.statuses {
                let finisher = usable.iter().find(|candidate| {
                    candidate.damage_kind.is_damaging()
                        && ctx.technicals.pairs(infliction.kind, candidate.element)
                });
                if let Some(finisher) = finisher {
                    let step = PlanStep {
                        skill: finisher.id,
                        target,
                        premise: infliction.kind,
                    };
                    if memory.push_step(step, pattern.planning_depth) {
                        debug!(actor = %actor.id, ?step, "AI: planned technical follow-up");
                    }
                }
            }
        }
    }

    if pattern.has(Caps::PARTY_COORDINATION)
        && let Some(target) = chosen.primary
    {
        match chosen.intent {
            Intent::Damage => board.claim_attack(target, actor.id, actor.side),
            Intent::Heal => board.claim_heal(target, actor.id, actor.side),
            _ => {}
        }
    }
}

struct Planner<'p, 'a> {
    ctx: &'p AiContext<'a>,
    memory: &'p AiMemory,
    board: &'p CoordinationBoard,
    strategy: &'static Strategy,
    rng: &'p dyn RngOracle,
    seed: u64,
    ranked: &'p [MemberId],
    hp_ratio: u32,
}

impl Planner<'_, '_> {
    fn has(&self, capability: Caps) -> bool {
        self.ctx.pattern().has(capability)
    }

    fn generate(&self) -> Vec<Candidate> {
        let mut candidates = Vec::new();
        let basic = SkillData::basic_attack();

        for (rank, target) in self.targets().into_iter().enumerate() {
            let score = self.damage_score(&basic, target, rank, candidates.len());
            candidates.push(Candidate {
                action: BattleAction::attack(self.ctx.actor.id, target.id),
                label: format!("attack -> {}", target.id),
                intent: Intent::Damage,
                skill: None,
                primary: Some(target.id),
                score,
            });
        }

        // Nothing else is worth weighing when no skill can be paid for.
        if self.ctx.out_of_resources() {
            debug!(actor = %self.ctx.actor.id, "AI: no affordable skill, attacking");
            return candidates;
        }

        for skill in self.ctx.usable_skills() {
            if self.withheld(&skill) {
                debug!(actor = %self.ctx.actor.id, skill = %skill.name, "AI: conserving MP");
                continue;
            }
            self.skill_candidates(&skill, &mut candidates);
        }

        candidates.push(self.guard_candidate());
        if let Some(escape) = self.escape_candidate() {
            candidates.push(escape);
        }
        candidates
    }

    fn targets(&self) -> Vec<&BattleMember> {
        self.ranked
            .iter()
            .take(TARGET_FANOUT)
            .filter_map(|id| self.ctx.member(*id))
            .collect()
    }

    fn withheld(&self, skill: &SkillData) -> bool {
        let pattern = self.ctx.pattern();
        self.has(Caps::RESOURCE_MANAGEMENT)
            && !pattern.boss_phase
            && skill.cost.mp() > 0
            && self.ctx.actor.stats.mp_ratio() < pattern.mp_conservation_threshold
    }

    fn skill_candidates(&self, skill: &SkillData, out: &mut Vec<Candidate>) {
        let actor = self.ctx.actor.id;
        let single = matches!(skill.target.scope, TargetScope::Single);

        match (skill.damage_kind, skill.target.side) {
            (_, TargetSide::DeadAlly) => {
                if !skill.revives {
                    return;
                }
                if let Some(fallen) = self.ctx.fallen_allies().first() {
                    out.push(Candidate {
                        action: BattleAction::skill(actor, skill.id, vec![fallen.id]),
                        label: format!("{} -> {}", skill.name, fallen.id),
                        intent: Intent::Heal,
                        skill: Some(skill.clone()),
                        primary: Some(fallen.id),
                        score: Score::new(true, 90, self.strategy.heal, 100),
                    });
                }
            }
            (DamageKind::Recovery, _) => {
                if let Some(candidate) = self.heal_candidate(skill) {
                    out.push(candidate);
                }
            }
            (DamageKind::Support, TargetSide::Ally | TargetSide::SelfOnly) => {
                out.push(self.buff_candidate(skill));
            }
            (DamageKind::Support, TargetSide::Enemy | TargetSide::Everyone) => {
                if let Some(target) = self.targets().first() {
                    out.push(self.debuff_candidate(skill, target));
                }
            }
            (_, TargetSide::Enemy | TargetSide::Everyone) if single => {
                for (rank, target) in self.targets().into_iter().enumerate() {
                    let score = self.damage_score(skill, target, rank, out.len());
                    out.push(Candidate {
                        action: BattleAction::skill(actor, skill.id, vec![target.id]),
                        label: format!("{} -> {}", skill.name, target.id),
                        intent: Intent::Damage,
                        skill: Some(skill.clone()),
                        primary: Some(target.id),
                        score,
                    });
                }
            }
            (_, TargetSide::Enemy | TargetSide::Everyone) => {
                let targets = self.targets();
                let Some(top) = targets.first() else {
                    return;
                };
                let mut score = self.damage_score(skill, top, 0, out.len());
                let spread = 10 * (self.ranked.len() as u32).saturating_sub(1);
                score.situation = (score.situation + spread).min(100);
                out.push(Candidate {
                    action: BattleAction::skill(actor, skill.id, Vec::new()),
                    label: format!("{} -> all", skill.name),
                    intent: Intent::Damage,
                    skill: Some(skill.clone()),
                    primary: Some(top.id),
                    score,
                });
            }
            // Damaging skills aimed at the actor's own side are never chosen.
            _ => {}
        }
    }

    fn estimate_damage(&self, skill: &SkillData, target: &BattleMember) -> u32 {
        let neutral = AffinityTable::new();
        let attacker = self.ctx.actor.combatant();
        let defender = Combatant::new(&target.stats, &target.buffs, &neutral);
        let outcome = calculate(
            self.ctx.config.formula_for(skill.formula),
            &attacker,
            &defender,
            skill,
            false,
            100,
            self.ctx.config,
        );
        outcome.amount.saturating_mul(u32::from(skill.hits))
    }

    fn damage_score(
        &self,
        skill: &SkillData,
        target: &BattleMember,
        rank: usize,
        index: usize,
    ) -> Score {
        let estimate = self.estimate_damage(skill, target);
        let situation = (u64::from(estimate) * 100 / u64::from(target.stats.hp.max(1)))
            .clamp(5, 100) as u32;
        let mut score = Score::new(true, situation, self.strategy.damage, 100);

        if self.has(Caps::WEAKNESS_EXPLOIT) && skill.damage_kind.uses_formula() {
            match self.memory.known_affinity(target.template_id, skill.element) {
                Some(Affinity::Weak) => score.boost_modifier(self.strategy.weakness),
                Some(Affinity::Resist) => score.scale_modifier(40),
                Some(Affinity::Immune | Affinity::Absorb) => score.scale_modifier(5),
                Some(Affinity::Normal) => {}
                None if matches!(skill.element, Element::Physical | Element::Almighty) => {}
                None => {
                    let probe_seed =
                        decision_roll(self.seed, self.ctx.actor.id, RollKind::AiProbe, index);
                    if self.rng.chance(probe_seed, self.ctx.pattern().probe_risk) {
                        score.boost_modifier(10);
                    } else {
                        score.scale_modifier(80);
                    }
                }
            }
        }

        if self.has(Caps::TECHNICAL_EXPLOIT)
            && skill.damage_kind.is_damaging()
            && self
                .ctx
                .technicals
                .find(&target.statuses, target.is_knocked_down, skill.element)
                .is_some()
        {
            score.boost_modifier(self.strategy.technical * 7 / 10);
        }

        if self.has(Caps::TECHNICAL_EXPLOIT) {
            score.boost_modifier(self.setup_bonus(skill, target));
        }

        score.scale_modifier(match rank {
            0 => 120,
            1 => 105,
            2 => 100,
            _ => 95,
        });

        if self.has(Caps::PARTY_COORDINATION)
            && estimate < target.stats.hp
            && self.board.attack_claimed(target.id, self.ctx.actor.id, self.ctx.actor.side)
        {
            score.scale_modifier(70);
        }

        score
    }

    /// Bonus for inflicting a status that a known finisher can cash in.
    fn setup_bonus(&self, skill: &SkillData, target: &BattleMember) -> u32 {
        let finishers: Vec<Element> = self
            .ctx
            .actor
            .skills
            .iter()
            .filter(|id| **id != skill.id)
            .filter_map(|id| self.ctx.env.skill(*id).ok())
            .filter(|finisher| finisher.damage_kind.is_damaging())
            .map(|finisher| finisher.element)
            .chain(std::iter::once(Element::Physical))
            .collect();

        let sets_up = skill.statuses.iter().any(|infliction| {
            !target.statuses.has(infliction.kind)
                && finishers
                    .iter()
                    .any(|element| self.ctx.technicals.pairs(infliction.kind, *element))
        });
        if sets_up { 40 } else { 0 }
    }

    fn heal_candidate(&self, skill: &SkillData) -> Option<Candidate> {
        let actor = self.ctx.actor;
        let pattern = self.ctx.pattern();
        let allies = match skill.target.side {
            TargetSide::SelfOnly => vec![actor],
            _ => self.ctx.allies(),
        };
        let wounded: Vec<&BattleMember> = allies
            .into_iter()
            .filter(|ally| ally.stats.hp < ally.stats.max_hp)
            .collect();
        let neediest = wounded
            .iter()
            .min_by_key(|ally| (ally.stats.hp_ratio(), ally.roster_index))?;

        let single = matches!(skill.target.scope, TargetScope::Single);
        let situation = if single {
            100 - neediest.stats.hp_ratio()
        } else {
            let missing: u32 = wounded.iter().map(|ally| 100 - ally.stats.hp_ratio()).sum();
            (missing / wounded.len() as u32 + 10 * (wounded.len() as u32 - 1)).min(100)
        };

        let mut score = Score::new(true, situation, self.strategy.heal, 100);
        if neediest.stats.hp_ratio() > pattern.heal_threshold {
            score.scale_modifier(30);
        }
        if self.has(Caps::PARTY_COORDINATION)
            && self.board.heal_claimed(neediest.id, actor.id, actor.side)
        {
            score.scale_modifier(30);
        }

        let targets = if single && skill.target.side != TargetSide::SelfOnly {
            vec![neediest.id]
        } else {
            Vec::new()
        };
        Some(Candidate {
            action: BattleAction::skill(actor.id, skill.id, targets),
            label: format!("{} -> {}", skill.name, neediest.id),
            intent: Intent::Heal,
            skill: Some(skill.clone()),
            primary: Some(neediest.id),
            score,
        })
    }

    fn buff_candidate(&self, skill: &SkillData) -> Candidate {
        let actor = self.ctx.actor;
        let target = match skill.target.side {
            TargetSide::SelfOnly => actor,
            _ => self
                .ctx
                .allies()
                .into_iter()
                .min_by_key(|ally| ally.buffs.percent(BuffStat::Attack))
                .unwrap_or(actor),
        };
        let fresh = skill
            .buffs
            .iter()
            .any(|buff| target.buffs.get(buff.stat).is_none());
        let situation = if fresh { 40 } else { 10 };

        let targets = match (skill.target.scope, skill.target.side) {
            (TargetScope::Single, TargetSide::Ally) => vec![target.id],
            _ => Vec::new(),
        };
        Candidate {
            action: BattleAction::skill(actor.id, skill.id, targets),
            label: format!("{} -> {}", skill.name, target.id),
            intent: Intent::Buff,
            skill: Some(skill.clone()),
            primary: Some(target.id),
            score: Score::new(true, situation, self.strategy.buff, 100),
        }
    }

    fn debuff_candidate(&self, skill: &SkillData, target: &BattleMember) -> Candidate {
        let fresh = skill
            .statuses
            .iter()
            .any(|infliction| !target.statuses.has(infliction.kind))
            || skill
                .buffs
                .iter()
                .any(|buff| target.buffs.get(buff.stat).is_none());
        let mut score = Score::new(true, if fresh { 50 } else { 5 }, self.strategy.buff, 100);
        if self.has(Caps::TECHNICAL_EXPLOIT) {
            score.boost_modifier(self.setup_bonus(skill, target));
        }

        let targets = match skill.target.scope {
            TargetScope::Single => vec![target.id],
            _ => Vec::new(),
        };
        Candidate {
            action: BattleAction::skill(self.ctx.actor.id, skill.id, targets),
            label: format!("{} -> {}", skill.name, target.id),
            intent: Intent::Buff,
            skill: Some(skill.clone()),
            primary: Some(target.id),
            score,
        }
    }

    fn guard_candidate(&self) -> Candidate {
        let situation = (100 - self.hp_ratio.min(100)).max(10);
        Candidate {
            action: BattleAction::guard(self.ctx.actor.id),
            label: String::from("guard"),
            intent: Intent::Guard,
            skill: None,
            primary: None,
            score: Score::new(true, situation, self.strategy.guard, 100),
        }
    }

    fn escape_candidate(&self) -> Option<Candidate> {
        let pattern = self.ctx.pattern();
        let possible = self.ctx.escape_allowed
            && self.strategy.escape > 0
            && self.hp_ratio <= pattern.flee_threshold;
        possible.then(|| Candidate {
            action: BattleAction::escape(self.ctx.actor.id),
            label: String::from("escape"),
            intent: Intent::Escape,
            skill: None,
            primary: None,
            score: Score::new(true, 100, self.strategy.escape, 100),
        })
    }

    /// Cross-candidate adjustments: risk, adaptation, plan, jitter.
    fn adjust(&self, candidates: &mut [Candidate]) {
        let pattern = self.ctx.pattern();

        if self.has(Caps::RISK_ASSESSMENT) {
            let opponents = self.ctx.opponents();
            let opponent_ratio = if opponents.is_empty() {
                0
            } else {
                let total: u32 = opponents.iter().map(|m| m.stats.hp_ratio()).sum();
                total / opponents.len() as u32
            };
            let desperate = self.hp_ratio < 30;
            let winning = self.hp_ratio > 70 && opponent_ratio < self.hp_ratio;

            for candidate in candidates.iter_mut() {
                if desperate && candidate.costly() {
                    candidate.score.scale_modifier(100 + pattern.risk_tolerance / 2);
                } else if desperate && candidate.intent == Intent::Guard {
                    candidate.score.scale_modifier(50);
                } else if winning && candidate.costly() {
                    candidate.score.scale_modifier(100 - (100 - pattern.risk_tolerance) / 2);
                }
            }
        }

        if self.has(Caps::ADAPTIVE_LEARNING) && self.memory.player_pattern().len() >= 3 {
            let observed = self.memory.player_pattern();
            let healer_focus = observed.share(crate::manager::ActionCategory::Heal) >= 30;
            let under_pressure = observed.aggression() >= 60 && self.hp_ratio < 50;

            for candidate in candidates.iter_mut() {
                let targets_healer = candidate
                    .primary
                    .and_then(|id| self.ctx.member(id))
                    .is_some_and(|m| {
                        m.side != self.ctx.actor.side && self.ctx.recovery_skill_count(m) > 0
                    });
                if healer_focus && candidate.intent == Intent::Damage && targets_healer {
                    candidate.score.scale_modifier(130);
                }
                if under_pressure && candidate.intent == Intent::Guard {
                    candidate.score.scale_modifier(150);
                }
            }
        }

        if self.has(Caps::MULTI_TURN_PLANNING)
            && let Some(step) = self.memory.next_step()
        {
            for candidate in candidates.iter_mut() {
                let planned = candidate.skill.as_ref().map(|s| s.id) == Some(step.skill)
                    && candidate.primary == Some(step.target);
                if planned {
                    candidate.score.scale_modifier(150);
                }
            }
        }

        if self.strategy.randomness > 0 {
            for (index, candidate) in candidates.iter_mut().enumerate() {
                let jitter_seed =
                    decision_roll(self.seed, self.ctx.actor.id, RollKind::AiChoice, index + 1);
                let jitter = self.rng.range(jitter_seed, 0, self.strategy.randomness);
                candidate.score.boost_modifier(jitter);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use battle_content::ContentRegistry;
    use battle_core::{
        ActionKind, AiPattern, BattleConfig, BattleEnv, BehaviorType, CharacterId, CharacterStats,
        CharacterTemplate, Side, SkillCost, SkillId, StatModifiers, StatusKind, StatusReapply,
        TargetPriority, TargetShape, TechnicalTable,
    };

    use super::*;
    use crate::manager::{ActionCategory, ActionReport};

    const FIRE: SkillId = SkillId(1);
    const ICE: SkillId = SkillId(2);
    const MEND: SkillId = SkillId(3);
    const ACTOR: usize = 2;

    /// Every roll lands on the lowest face: chances succeed and jitter is zero.
    struct LowRolls;

    impl RngOracle for LowRolls {
        fn next_u32(&self, _seed: u64) -> u32 {
            0
        }
    }

    struct Arena {
        env: BattleEnv,
        config: BattleConfig,
        technicals: TechnicalTable,
    }

    impl Arena {
        fn new() -> Self {
            let registry = ContentRegistry::new()
                .with_skill(
                    SkillData::new(FIRE, "Fire", DamageKind::Magical, 50)
                        .with_element(Element::Fire)
                        .with_cost(SkillCost::Mp(10)),
                )
                .with_skill(
                    SkillData::new(ICE, "Ice", DamageKind::Magical, 50)
                        .with_element(Element::Ice)
                        .with_cost(SkillCost::Mp(10)),
                )
                .with_skill(
                    SkillData::new(MEND, "Mend", DamageKind::Recovery, 50)
                        .with_target(TargetShape::SINGLE_ALLY)
                        .with_cost(SkillCost::Mp(5)),
                );
            Self {
                env: BattleEnv::from_registry(Arc::new(registry)),
                config: BattleConfig::default(),
                technicals: TechnicalTable::standard(),
            }
        }

        fn context<'a>(&'a self, members: &'a [BattleMember], actor: usize) -> AiContext<'a> {
            AiContext::new(&members[actor], members, &self.env, &self.config, &self.technicals)
        }

        fn decide(
            &self,
            members: &[BattleMember],
            actor: usize,
            memory: &mut AiMemory,
            board: &mut CoordinationBoard,
        ) -> Decision {
            decide(&self.context(members, actor), memory, board, &LowRolls, 7)
        }

        /// Scored candidates of the actor, before selection.
        fn evaluate(&self, members: &[BattleMember], memory: &AiMemory) -> Vec<Candidate> {
            let ctx = self.context(members, ACTOR);
            let hp_ratio = ctx.actor.stats.hp_ratio();
            let (behavior, priority, _) = ctx.pattern().profile_at(hp_ratio);
            let input = RankInput {
                ctx: &ctx,
                memory,
                rng: &LowRolls,
                seed: 7,
            };
            let ranked = rank_targets(priority, &input, &ctx.opponents());
            let board = CoordinationBoard::new();
            let planner = Planner {
                ctx: &ctx,
                memory,
                board: &board,
                strategy: Strategy::for_behavior(behavior),
                rng: &LowRolls,
                seed: 7,
                ranked: &ranked,
                hp_ratio,
            };
            let mut candidates = planner.generate();
            planner.adjust(&mut candidates);
            candidates
        }
    }

    fn member(
        id: u32,
        side: Side,
        skills: Vec<SkillId>,
        pattern: Option<AiPattern>,
    ) -> BattleMember {
        let stats = CharacterStats::new(10, 200, 50).with_offense(10, 20);
        let mut template =
            CharacterTemplate::new(CharacterId(id), format!("m{id}"), stats).with_skills(skills);
        if let Some(pattern) = pattern {
            template = template.with_ai(pattern);
        }
        BattleMember::from_template(
            MemberId(id),
            side,
            id as usize,
            &template,
            &StatModifiers::default(),
        )
    }

    fn tactical(capabilities: Caps) -> AiPattern {
        AiPattern::new("tactician", BehaviorType::Tactical, TargetPriority::LowestHp)
            .with_capabilities(capabilities)
    }

    /// Two party members facing one caster that knows Fire and Ice.
    fn roster(pattern: AiPattern) -> Vec<BattleMember> {
        vec![
            member(0, Side::Party, Vec::new(), None),
            member(1, Side::Party, Vec::new(), None),
            member(2, Side::Enemy, vec![FIRE, ICE], Some(pattern)),
        ]
    }

    fn modifier(candidates: &[Candidate], skill: Option<SkillId>, target: MemberId) -> u32 {
        candidates
            .iter()
            .find(|c| c.skill.as_ref().map(|s| s.id) == skill && c.primary == Some(target))
            .map(|c| c.score.modifier)
            .unwrap()
    }

    fn guard_modifier(candidates: &[Candidate]) -> u32 {
        candidates
            .iter()
            .find(|c| c.intent == Intent::Guard)
            .map(|c| c.score.modifier)
            .unwrap()
    }

    fn offers(candidates: &[Candidate], skill: SkillId) -> bool {
        candidates
            .iter()
            .any(|c| c.skill.as_ref().is_some_and(|s| s.id == skill))
    }

    #[test]
    fn low_mp_withholds_costly_skills() {
        let arena = Arena::new();
        let memory = AiMemory::new();
        let starve = |pattern: AiPattern| {
            let mut members = roster(pattern);
            members[ACTOR].stats.mp = 10;
            members
        };

        let conserving = arena.evaluate(&starve(tactical(Caps::RESOURCE_MANAGEMENT)), &memory);
        assert!(!offers(&conserving, FIRE));
        assert!(!offers(&conserving, ICE));
        assert!(conserving.iter().any(|c| c.intent == Intent::Damage));

        let careless = arena.evaluate(&starve(tactical(Caps::empty())), &memory);
        assert!(offers(&careless, FIRE));

        let mut boss = tactical(Caps::RESOURCE_MANAGEMENT);
        boss.boss_phase = true;
        assert!(offers(&arena.evaluate(&starve(boss), &memory), FIRE));
    }

    #[test]
    fn planned_step_is_followed_while_its_premise_holds() {
        let arena = Arena::new();
        let mut members = roster(tactical(Caps::MULTI_TURN_PLANNING));
        members[0]
            .statuses
            .apply(StatusKind::Freeze, 2, None, StatusReapply::Refresh);
        let mut memory = AiMemory::new();
        let step = PlanStep {
            skill: ICE,
            target: MemberId(0),
            premise: StatusKind::Freeze,
        };
        assert!(memory.push_step(step, 2));

        let decision = arena.decide(&members, ACTOR, &mut memory, &mut CoordinationBoard::new());
        assert_eq!(decision.action.kind, ActionKind::Skill(ICE));
        assert_eq!(decision.action.targets, vec![MemberId(0)]);
        assert_eq!(memory.plan_len(), 0);
    }

    #[test]
    fn broken_premise_discards_the_plan() {
        let arena = Arena::new();
        let members = roster(tactical(Caps::MULTI_TURN_PLANNING));
        let mut memory = AiMemory::new();
        let step = PlanStep {
            skill: ICE,
            target: MemberId(0),
            premise: StatusKind::Freeze,
        };
        assert!(memory.push_step(step, 2));

        // Nobody is frozen, so Ice earns no plan bonus and Fire wins the tie.
        let decision = arena.decide(&members, ACTOR, &mut memory, &mut CoordinationBoard::new());
        assert_eq!(memory.plan_len(), 0);
        assert_eq!(decision.action.kind, ActionKind::Skill(FIRE));
    }

    #[test]
    fn desperation_favours_costly_skills_and_a_lead_spares_them() {
        let arena = Arena::new();
        let memory = AiMemory::new();
        let target = MemberId(0);

        let desperate = |capabilities| {
            let mut members = roster(tactical(capabilities));
            members[ACTOR].stats.hp = 40;
            arena.evaluate(&members, &memory)
        };
        let calm = desperate(Caps::empty());
        let risky = desperate(Caps::RISK_ASSESSMENT);
        assert!(modifier(&risky, Some(FIRE), target) > modifier(&calm, Some(FIRE), target));
        assert_eq!(modifier(&risky, None, target), modifier(&calm, None, target));
        assert_eq!(guard_modifier(&risky), guard_modifier(&calm) / 2);

        let winning = |capabilities| {
            let mut members = roster(tactical(capabilities));
            members[0].stats.hp = 100;
            members[1].stats.hp = 100;
            arena.evaluate(&members, &memory)
        };
        let calm = winning(Caps::empty());
        let risky = winning(Caps::RISK_ASSESSMENT);
        assert!(modifier(&risky, Some(FIRE), target) < modifier(&calm, Some(FIRE), target));
        assert_eq!(modifier(&risky, None, target), modifier(&calm, None, target));
    }

    #[test]
    fn frequent_healing_draws_attacks_to_the_healer() {
        let arena = Arena::new();
        let healer = MemberId(0);
        let bystander = MemberId(1);
        let with = |capabilities| {
            let mut members = roster(tactical(capabilities));
            members[0].skills = vec![MEND];
            members
        };

        let mut memory = AiMemory::new();
        let members = with(Caps::ADAPTIVE_LEARNING);
        for _ in 0..3 {
            let report = ActionReport::new(healer, ActionKind::Skill(MEND), ActionCategory::Heal);
            memory.observe(&report, Side::Enemy, &members);
        }
        assert_eq!(memory.player_pattern().share(ActionCategory::Heal), 100);

        let adaptive = arena.evaluate(&members, &memory);
        let fixed = arena.evaluate(&with(Caps::empty()), &memory);
        assert_eq!(
            modifier(&adaptive, None, healer),
            modifier(&fixed, None, healer) * 130 / 100
        );
        assert_eq!(modifier(&adaptive, None, bystander), modifier(&fixed, None, bystander));
    }

    #[test]
    fn coordinated_attackers_split_their_targets() {
        let arena = Arena::new();
        let pattern = tactical(Caps::PARTY_COORDINATION);
        let mut members = vec![
            member(0, Side::Party, Vec::new(), None),
            member(1, Side::Party, Vec::new(), None),
            member(2, Side::Enemy, Vec::new(), Some(pattern.clone())),
            member(3, Side::Enemy, Vec::new(), Some(pattern)),
        ];
        members[0].stats.hp = 150;
        let mut board = CoordinationBoard::new();
        board.begin_round(1);

        let first = arena.decide(&members, 2, &mut AiMemory::new(), &mut board);
        assert_eq!(first.action.kind, ActionKind::Attack);
        assert_eq!(first.action.targets, vec![MemberId(0)]);
        assert!(board.attack_claimed(MemberId(0), MemberId(3), Side::Enemy));

        let second = arena.decide(&members, 3, &mut AiMemory::new(), &mut board);
        assert_eq!(second.action.kind, ActionKind::Attack);
        assert_eq!(second.action.targets, vec![MemberId(1)]);
    }

    #[test]
    fn known_weakness_picks_the_matching_element() {
        let arena = Arena::new();
        let members = roster(tactical(Caps::WEAKNESS_EXPLOIT));
        let mut memory = AiMemory::new();
        memory.learn(CharacterId(0), Element::Ice, Affinity::Weak);

        let decision = arena.decide(&members, ACTOR, &mut memory, &mut CoordinationBoard::new());
        assert_eq!(decision.action.kind, ActionKind::Skill(ICE));
        assert_eq!(decision.action.targets, vec![MemberId(0)]);

        let blind = arena.decide(
            &roster(tactical(Caps::empty())),
            ACTOR,
            &mut memory,
            &mut CoordinationBoard::new(),
        );
        assert_eq!(blind.action.kind, ActionKind::Skill(FIRE));
    }
}
