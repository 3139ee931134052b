//! Per-member AI memory.
//!
//! Memory is owned by the battle manager, one entry per AI-controlled member,
//! and fed every [`ActionReport`] after it resolves. Patterns flagged with
//! `carry_memory` get their memory exported at battle end and handed back to
//! the next battle's builder.

use std::collections::{BTreeMap, VecDeque};

use battle_core::{
    Affinity, BattleMember, CharacterId, Element, MemberId, Side, SkillId, StatusKind,
};
use tracing::debug;

use crate::manager::{ActionCategory, ActionReport};

/// Rolling window over the opposing side's recent action categories.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlayerPattern {
    recent: VecDeque<ActionCategory>,
}

impl PlayerPattern {
    pub const WINDOW: usize = 10;

    pub fn record(&mut self, category: ActionCategory) {
        if self.recent.len() == Self::WINDOW {
            self.recent.pop_front();
        }
        self.recent.push_back(category);
    }

    /// Percent of the window taken by `category`.
    pub fn share(&self, category: ActionCategory) -> u32 {
        if self.recent.is_empty() {
            return 0;
        }
        let count = self.recent.iter().filter(|c| **c == category).count();
        (count * 100 / self.recent.len()) as u32
    }

    /// Share of actions that dealt damage.
    pub fn aggression(&self) -> u32 {
        [
            ActionCategory::Attack,
            ActionCategory::DamageSkill,
            ActionCategory::Finisher,
        ]
        .into_iter()
        .map(|category| self.share(category))
        .sum()
    }

    pub fn len(&self) -> usize {
        self.recent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recent.is_empty()
    }
}

/// One buffered step of a multi-turn plan.
///
/// The step is only valid while `target` still carries `premise`; otherwise
/// the plan is discarded and rebuilt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlanStep {
    pub skill: SkillId,
    pub target: MemberId,
    pub premise: StatusKind,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AiMemory {
    affinities: BTreeMap<(CharacterId, Element), Affinity>,
    pattern: PlayerPattern,
    plan: VecDeque<PlanStep>,
    phase: Option<usize>,
}

impl AiMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn learn(&mut self, character: CharacterId, element: Element, affinity: Affinity) {
        self.affinities.insert((character, element), affinity);
    }

    pub fn known_affinity(&self, character: CharacterId, element: Element) -> Option<Affinity> {
        self.affinities.get(&(character, element)).copied()
    }

    /// Number of learned (character, element) affinities.
    pub fn known_count(&self) -> usize {
        self.affinities.len()
    }

    pub fn player_pattern(&self) -> &PlayerPattern {
        &self.pattern
    }

    pub fn next_step(&self) -> Option<&PlanStep> {
        self.plan.front()
    }

    pub fn plan_len(&self) -> usize {
        self.plan.len()
    }

    /// Queues a step unless the buffer already holds `depth` steps.
    pub fn push_step(&mut self, step: PlanStep, depth: u8) -> bool {
        if self.plan.len() >= depth as usize || self.plan.contains(&step) {
            return false;
        }
        self.plan.push_back(step);
        true
    }

    pub fn complete_step(&mut self) -> Option<PlanStep> {
        self.plan.pop_front()
    }

    /// Drops the whole plan if any step's premise no longer holds.
    ///
    /// Returns true when the plan was discarded.
    pub fn validate_plan(&mut self, members: &[BattleMember]) -> bool {
        let broken = self.plan.iter().any(|step| {
            !members
                .iter()
                .find(|member| member.id == step.target)
                .is_some_and(|target| target.is_alive() && target.statuses.has(step.premise))
        });
        if broken {
            debug!(steps = self.plan.len(), "plan premise failed, replanning");
            self.plan.clear();
        }
        broken
    }

    /// Records the active personality phase. Returns true on a transition.
    pub fn enter_phase(&mut self, phase: Option<usize>) -> bool {
        let changed = self.phase != phase;
        self.phase = phase;
        changed
    }

    pub fn phase(&self) -> Option<usize> {
        self.phase
    }

    /// Updates memory from a resolved action seen by a member of `observer`.
    ///
    /// Opposing actions feed the player-pattern window; the observer side's
    /// own hits teach the affinities they revealed.
    pub fn observe(&mut self, report: &ActionReport, observer: Side, members: &[BattleMember]) {
        let find = |id: MemberId| members.iter().find(|member| member.id == id);
        let Some(actor) = find(report.actor) else {
            return;
        };

        if actor.side != observer {
            self.pattern.record(report.category);
            return;
        }

        let Some(element) = report.element else {
            return;
        };
        for hit in report.landed() {
            let (Some(affinity), Some(target)) = (hit.affinity, find(hit.target)) else {
                continue;
            };
            if target.side != observer {
                self.learn(target.template_id, element, affinity);
            }
        }
    }

    /// Forgets per-battle state, keeping learned affinities and the pattern window.
    pub fn carry_over(mut self) -> Self {
        self.plan.clear();
        self.phase = None;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_window_rolls() {
        let mut pattern = PlayerPattern::default();
        for _ in 0..PlayerPattern::WINDOW {
            pattern.record(ActionCategory::Heal);
        }
        assert_eq!(pattern.share(ActionCategory::Heal), 100);

        for _ in 0..5 {
            pattern.record(ActionCategory::Attack);
        }
        assert_eq!(pattern.len(), PlayerPattern::WINDOW);
        assert_eq!(pattern.share(ActionCategory::Heal), 50);
        assert_eq!(pattern.aggression(), 50);
    }

    #[test]
    fn plan_respects_depth() {
        let mut memory = AiMemory::new();
        let step = |skill| PlanStep {
            skill: SkillId(skill),
            target: MemberId(0),
            premise: StatusKind::Burn,
        };
        assert!(memory.push_step(step(1), 2));
        assert!(!memory.push_step(step(1), 2));
        assert!(memory.push_step(step(2), 2));
        assert!(!memory.push_step(step(3), 2));
        assert_eq!(memory.complete_step().map(|s| s.skill), Some(SkillId(1)));
    }

    #[test]
    fn carry_over_keeps_knowledge() {
        let mut memory = AiMemory::new();
        memory.learn(CharacterId(1), Element::Fire, Affinity::Weak);
        memory.enter_phase(Some(2));
        let carried = memory.carry_over();
        assert_eq!(
            carried.known_affinity(CharacterId(1), Element::Fire),
            Some(Affinity::Weak)
        );
        assert_eq!(carried.phase(), None);
    }
}
