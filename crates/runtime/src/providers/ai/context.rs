//! Read-only blackboard for one AI decision.
//!
//! The [`AiContext`] is built by the battle manager right before an
//! AI-controlled member acts and dropped once the action is chosen. It borrows
//! the roster and content; everything the AI carries between turns lives in
//! [`AiMemory`](super::AiMemory) instead.

use std::sync::Arc;

use battle_core::{
    AiPattern, BattleConfig, BattleEnv, BattleMember, DamageKind, MemberId, SkillCost, SkillData,
    SkillId, TechnicalTable,
};
use tracing::warn;

/// Context for AI decision-making.
pub struct AiContext<'a> {
    /// The member making the decision.
    pub actor: &'a BattleMember,
    /// Every member of the battle, in roster order.
    pub members: &'a [BattleMember],
    pub env: &'a BattleEnv,
    pub config: &'a BattleConfig,
    pub technicals: &'a TechnicalTable,
    pub round: u32,
    pub escape_allowed: bool,
    /// Gold available for gold-costed skills.
    pub gold: u32,
    pattern: Arc<AiPattern>,
}

impl<'a> AiContext<'a> {
    pub fn new(
        actor: &'a BattleMember,
        members: &'a [BattleMember],
        env: &'a BattleEnv,
        config: &'a BattleConfig,
        technicals: &'a TechnicalTable,
    ) -> Self {
        let pattern = actor
            .ai_pattern
            .clone()
            .unwrap_or_else(|| Arc::new(AiPattern::default()));

        Self {
            actor,
            members,
            env,
            config,
            technicals,
            round: 0,
            escape_allowed: false,
            gold: 0,
            pattern,
        }
    }

    pub fn with_round(mut self, round: u32) -> Self {
        self.round = round;
        self
    }

    pub fn with_escape(mut self, allowed: bool) -> Self {
        self.escape_allowed = allowed;
        self
    }

    pub fn with_gold(mut self, gold: u32) -> Self {
        self.gold = gold;
        self
    }

    pub fn pattern(&self) -> &AiPattern {
        &self.pattern
    }

    pub fn member(&self, id: MemberId) -> Option<&'a BattleMember> {
        self.members.iter().find(|member| member.id == id)
    }

    /// Living members of the opposing side.
    pub fn opponents(&self) -> Vec<&'a BattleMember> {
        let side = self.actor.side.opponent();
        self.members
            .iter()
            .filter(|member| member.side == side && member.is_alive())
            .collect()
    }

    /// Living members of the actor's side, the actor included.
    pub fn allies(&self) -> Vec<&'a BattleMember> {
        self.members
            .iter()
            .filter(|member| member.side == self.actor.side && member.is_alive())
            .collect()
    }

    pub fn fallen_allies(&self) -> Vec<&'a BattleMember> {
        self.members
            .iter()
            .filter(|member| member.side == self.actor.side && member.is_fallen())
            .collect()
    }

    pub fn can_afford(&self, cost: SkillCost) -> bool {
        let stats = &self.actor.stats;
        match cost {
            SkillCost::None => true,
            SkillCost::Mp(amount) => stats.mp >= amount,
            SkillCost::HpPercent(percent) => {
                let amount = (stats.max_hp as u64 * percent as u64 / 100).max(1) as u32;
                stats.hp > amount
            }
            SkillCost::Gold(amount) => self.gold >= amount,
        }
    }

    /// Skills the actor may use this turn: in the pattern pool, learned, known
    /// to the content registry and affordable.
    pub fn usable_skills(&self) -> Vec<SkillData> {
        let pool = &self.pattern.skill_pool;
        self.actor
            .skills
            .iter()
            .filter(|id| pool.is_empty() || pool.contains(id))
            .filter_map(|id| match self.env.skill(*id) {
                Ok(skill) => Some(skill),
                Err(err) => {
                    warn!(actor = %self.actor.id, %err, "skipping skill missing from content");
                    None
                }
            })
            .filter(|skill| self.can_afford(skill.cost))
            .collect()
    }

    /// Whether the actor has costed skills in its pool and can pay for none.
    ///
    /// Such a member only weighs basic attacks.
    pub fn out_of_resources(&self) -> bool {
        let pool = &self.pattern.skill_pool;
        let mut known = self
            .actor
            .skills
            .iter()
            .filter(|id| **id != SkillId::BASIC_ATTACK)
            .filter(|id| pool.is_empty() || pool.contains(id))
            .filter_map(|id| self.env.skill(*id).ok())
            .peekable();
        known.peek().is_some()
            && known.all(|skill| !skill.cost.is_free() && !self.can_afford(skill.cost))
    }

    /// Number of recovery skills a member knows; used to spot healers.
    pub fn recovery_skill_count(&self, member: &BattleMember) -> usize {
        member
            .skills
            .iter()
            .filter_map(|id| self.env.skill(*id).ok())
            .filter(|skill| skill.damage_kind == DamageKind::Recovery || skill.revives)
            .count()
    }
}
