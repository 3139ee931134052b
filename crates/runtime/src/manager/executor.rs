//! Action validation and resolution.
//!
//! Validation never mutates: every user error is detected before the first
//! state change, so a rejected action leaves the battle exactly as it was.

use battle_core::{
    ActionKind, Affinity, BattleAction, BattleError, BattleMember, DamageKind, ErrorSeverity,
    HitEffect, ItemData, ItemEffect, MemberId, RollKind, Side, SkillCost, SkillData, SkillId,
    StatusKind, StatusReapply, TargetScope, TargetShape, TargetSide, TechnicalRule,
    TechnicalTrigger, calculate, check_critical, check_hit, infliction_chance,
};
use tracing::{debug, info, warn};

use super::report::{ActionCategory, ActionReport, HitReport};
use super::{BattleManager, BattlePhase};
use crate::events::BattleEvent;
use crate::providers::DecisionRequest;
use crate::providers::ai::{self, AiContext};

/// Resolved target set, before random draws.
#[derive(Clone, Debug)]
pub(super) enum Targets {
    Fixed(Vec<MemberId>),
    Random { candidates: Vec<MemberId>, draws: u8 },
}

/// A validated action, ready to resolve.
#[derive(Clone, Debug)]
pub(super) enum Plan {
    Skill { skill: SkillData, targets: Targets },
    Item { item: ItemData, targets: Targets },
    Guard,
    Escape,
    AllOut,
}

/// Offset between targets in roll contexts; hits of one target stay below it.
const TARGET_STRIDE: u32 = 32;

impl BattleManager {
    /// Validates and resolves one action for the current actor.
    ///
    /// User errors leave the battle untouched and the phase unchanged.
    /// Actions referencing missing content are replaced by a basic attack.
    pub fn execute_action(&mut self, action: BattleAction) -> Result<ActionReport, BattleError> {
        self.check_turn(&action)?;

        let (action, plan, substituted) = match self.plan(&action) {
            Ok(plan) => (action, plan, false),
            Err(err) if err.severity() == ErrorSeverity::Configuration => {
                warn!(actor = %action.actor, %err, "content missing, substituting basic attack");
                let fallback = self.fallback_attack(&action).ok_or(err)?;
                let plan = self.plan(&fallback)?;
                (fallback, plan, true)
            }
            Err(err) => {
                debug!(actor = %action.actor, code = err.error_code(), %err, "action rejected");
                return Err(err);
            }
        };

        let actor = action.actor;
        self.nonce += 1;
        self.phase = BattlePhase::Resolving(actor);

        let mut report = ActionReport::new(actor, action.kind, categorize(&action.kind, &plan));
        report.substituted = substituted;

        let resolved = match plan {
            Plan::Skill { skill, targets } => {
                self.resolve_skill(actor, &skill, targets, &mut report)
            }
            Plan::Item { item, targets } => self.resolve_item(actor, &item, targets, &mut report),
            Plan::Guard => self.resolve_guard(actor),
            Plan::Escape => self.resolve_escape(actor, &mut report),
            Plan::AllOut => self.resolve_all_out(actor, &mut report),
        };

        if let Err(violation) = resolved.and_then(|()| self.verify_invariants()) {
            self.abort(violation.to_string());
            return Err(violation);
        }

        self.phase = BattlePhase::PostResolution(actor);
        debug!(
            %actor,
            action = action.kind.label(),
            damage = report.total_damage,
            weakness = report.weakness,
            critical = report.critical,
            "action resolved"
        );
        self.publish(BattleEvent::ActionExecuted {
            actor,
            action: action.kind,
            damage: report.total_damage,
            weakness: report.weakness,
            critical: report.critical,
        });

        self.finish_action(actor, &mut report);
        self.observe(&report);
        Ok(report)
    }

    /// Lets the current AI-controlled member decide and act.
    ///
    /// An illegal AI choice is logged and replaced by a basic attack on the
    /// top-ranked opponent.
    pub fn run_ai_turn(&mut self) -> Result<ActionReport, BattleError> {
        let actor = match self.phase {
            BattlePhase::AiDeciding(actor) => actor,
            BattlePhase::Ended(_) => return Err(BattleError::BattleOver),
            _ => return Err(BattleError::NotAwaitingAction),
        };
        let index = self
            .index(actor)
            .ok_or(BattleError::NotCurrentActor { actor })?;

        let seed = self.roll_seed(actor, RollKind::AiChoice, 0);
        let mut memory = self.memories.remove(&actor).unwrap_or_default();
        let gold = self.inventory.gold();

        let ctx = AiContext::new(
            &self.members[index],
            &self.members,
            &self.env,
            &self.config,
            &self.technicals,
        )
        .with_round(self.round)
        .with_escape(self.escape_allowed)
        .with_gold(gold);

        let action = self.provider.provide_action(DecisionRequest {
            ctx: &ctx,
            memory: &mut memory,
            board: &mut self.board,
            rng: self.rng.as_ref(),
            seed,
        });
        let fallback = ai::fallback_action(&ctx, &memory, self.rng.as_ref(), seed);
        self.memories.insert(actor, memory);

        match self.execute_action(action) {
            Ok(report) => Ok(report),
            Err(err)
                if err.severity() == ErrorSeverity::User
                    && self.phase == BattlePhase::AiDeciding(actor) =>
            {
                warn!(%actor, %err, "AI chose an illegal action, falling back");
                self.execute_action(fallback)
            }
            Err(err) => Err(err),
        }
    }

    fn check_turn(&self, action: &BattleAction) -> Result<(), BattleError> {
        let all_out = action.kind == ActionKind::AllOutAttack;
        let pending = match self.phase {
            BattlePhase::Ended(_) => return Err(BattleError::BattleOver),
            BattlePhase::AwaitingAction(id) | BattlePhase::AiDeciding(id) if !all_out => id,
            BattlePhase::AwaitingAllOutAttack(id) if all_out => id,
            BattlePhase::AwaitingAction(_) | BattlePhase::AiDeciding(_) => {
                return Err(BattleError::AllOutAttackUnavailable);
            }
            _ => return Err(BattleError::NotAwaitingAction),
        };
        if pending != action.actor {
            return Err(BattleError::NotCurrentActor {
                actor: action.actor,
            });
        }

        let actor = self.get(action.actor)?;
        if !actor.is_alive() {
            return Err(BattleError::ActorFallen { actor: actor.id });
        }
        if actor.is_locked() {
            return Err(BattleError::ActorLocked { actor: actor.id });
        }
        Ok(())
    }

    fn plan(&self, action: &BattleAction) -> Result<Plan, BattleError> {
        let actor = self.get(action.actor)?;

        match action.kind {
            ActionKind::Attack => {
                let skill = self.env.skill(SkillId::BASIC_ATTACK)?;
                let targets = self.resolve_targets(actor, skill.target, &action.targets)?;
                Ok(Plan::Skill { skill, targets })
            }
            ActionKind::Skill(id) => {
                if id != SkillId::BASIC_ATTACK && !actor.skills.contains(&id) {
                    return Err(BattleError::SkillNotLearned {
                        actor: actor.id,
                        skill: id,
                    });
                }
                let skill = self.env.skill(id)?;
                self.check_cost(actor, skill.cost)?;
                let targets = self.resolve_targets(actor, skill.target, &action.targets)?;
                Ok(Plan::Skill { skill, targets })
            }
            ActionKind::Item(id) => {
                if !self.inventory.has_item(id) {
                    return Err(BattleError::MissingItem { item: id });
                }
                let item = self.env.item(id)?;
                let targets = self.resolve_targets(actor, item.target, &action.targets)?;
                Ok(Plan::Item { item, targets })
            }
            ActionKind::Guard => Ok(Plan::Guard),
            ActionKind::Escape => {
                if self.escape_allowed {
                    Ok(Plan::Escape)
                } else {
                    Err(BattleError::EscapeForbidden)
                }
            }
            ActionKind::AllOutAttack => {
                if actor.side == Side::Party && self.all_enemies_down() {
                    Ok(Plan::AllOut)
                } else {
                    Err(BattleError::AllOutAttackUnavailable)
                }
            }
        }
    }

    /// Basic attack replacing an action whose content is missing.
    fn fallback_attack(&self, action: &BattleAction) -> Option<BattleAction> {
        let actor = self.member(action.actor)?;
        let opponents = self.living(actor.side.opponent());
        let target = action
            .targets
            .iter()
            .find(|id| opponents.iter().any(|m| m.id == **id))
            .copied()
            .or_else(|| opponents.first().map(|m| m.id))?;
        Some(BattleAction::attack(actor.id, target))
    }

    fn check_cost(&self, actor: &BattleMember, cost: SkillCost) -> Result<(), BattleError> {
        match cost {
            SkillCost::None => Ok(()),
            SkillCost::Mp(required) if actor.stats.mp < required => {
                Err(BattleError::InsufficientMp {
                    actor: actor.id,
                    required,
                    available: actor.stats.mp,
                })
            }
            SkillCost::HpPercent(percent) => {
                let required = hp_cost(actor, percent);
                if actor.stats.hp > required {
                    Ok(())
                } else {
                    Err(BattleError::InsufficientHp {
                        actor: actor.id,
                        required,
                        available: actor.stats.hp,
                    })
                }
            }
            SkillCost::Gold(required) if self.inventory.gold() < required => {
                Err(BattleError::InsufficientGold {
                    required,
                    available: self.inventory.gold(),
                })
            }
            SkillCost::Mp(_) | SkillCost::Gold(_) => Ok(()),
        }
    }

    fn pay_cost(&mut self, actor: MemberId, cost: SkillCost) -> Result<(), BattleError> {
        let paid = match cost {
            SkillCost::None => true,
            SkillCost::Mp(amount) => self.get_mut(actor)?.stats.spend_mp(amount),
            SkillCost::HpPercent(percent) => {
                let member = self.get_mut(actor)?;
                let amount = hp_cost(member, percent);
                member.stats.spend_hp(amount)
            }
            SkillCost::Gold(amount) => self.inventory.remove_gold(amount),
        };
        if paid {
            Ok(())
        } else {
            Err(BattleError::InvariantViolation(format!(
                "{actor} could not pay a validated cost {cost:?}"
            )))
        }
    }

    fn resolve_targets(
        &self,
        actor: &BattleMember,
        shape: TargetShape,
        requested: &[MemberId],
    ) -> Result<Targets, BattleError> {
        let candidates = self.candidates(actor, shape.side);

        match shape.scope {
            TargetScope::Single if shape.side == TargetSide::SelfOnly => {
                Ok(Targets::Fixed(vec![actor.id]))
            }
            TargetScope::Single => {
                let target = *requested.first().ok_or(BattleError::InvalidTarget {
                    target: None,
                    reason: "a target is required",
                })?;
                if candidates.contains(&target) {
                    Ok(Targets::Fixed(vec![target]))
                } else {
                    Err(BattleError::InvalidTarget {
                        target: Some(target),
                        reason: match shape.side {
                            TargetSide::DeadAlly => "target is not a fallen ally",
                            TargetSide::Ally => "target is not a living ally",
                            _ => "target is not a living opponent",
                        },
                    })
                }
            }
            _ if candidates.is_empty() => Err(BattleError::InvalidTarget {
                target: None,
                reason: "no valid targets",
            }),
            TargetScope::All => Ok(Targets::Fixed(candidates)),
            TargetScope::Random(draws) => Ok(Targets::Random {
                candidates,
                draws: draws.max(1),
            }),
        }
    }

    fn candidates(&self, actor: &BattleMember, side: TargetSide) -> Vec<MemberId> {
        let select = |filter: &dyn Fn(&BattleMember) -> bool| {
            self.members
                .iter()
                .filter(|member| filter(member))
                .map(|member| member.id)
                .collect::<Vec<_>>()
        };
        match side {
            TargetSide::Ally => select(&|m| m.side == actor.side && m.is_alive()),
            TargetSide::Enemy => select(&|m| m.side != actor.side && m.is_alive()),
            TargetSide::SelfOnly => vec![actor.id],
            TargetSide::Everyone => select(&|m| m.is_alive()),
            TargetSide::DeadAlly => select(&|m| m.side == actor.side && m.is_fallen()),
        }
    }

    /// Draws random targets with seeded rolls; fixed sets pass through.
    fn draw_targets(&self, actor: MemberId, targets: Targets) -> Vec<MemberId> {
        match targets {
            Targets::Fixed(ids) => ids,
            Targets::Random { candidates, draws } => (0..u32::from(draws))
                .map(|draw| {
                    let seed = self.roll_seed(actor, RollKind::Targeting, draw);
                    let index = self.rng.next_u32(seed) as usize % candidates.len();
                    candidates[index]
                })
                .collect(),
        }
    }

    fn resolve_skill(
        &mut self,
        actor: MemberId,
        skill: &SkillData,
        targets: Targets,
        report: &mut ActionReport,
    ) -> Result<(), BattleError> {
        self.pay_cost(actor, skill.cost)?;
        report.element = Some(skill.element);

        let relay = {
            let member = self.get(actor)?;
            member
                .baton_pass
                .is_active
                .then(|| self.config.baton_pass_multiplier(member.baton_pass.pass_count))
        };

        let targets = self.draw_targets(actor, targets);
        for (index, target) in targets.into_iter().enumerate() {
            self.resolve_skill_on(actor, skill, target, index as u32, relay, report)?;
        }

        // The pass count stays so a further pass this turn chains one level higher.
        if relay.is_some() {
            debug!(%actor, "baton pass bonus consumed");
            self.get_mut(actor)?.baton_pass.is_active = false;
        }
        Ok(())
    }

    /// Resolves every hit of `skill` on one target, then its statuses and buffs.
    pub(super) fn resolve_skill_on(
        &mut self,
        actor: MemberId,
        skill: &SkillData,
        target: MemberId,
        slot: u32,
        relay: Option<u32>,
        report: &mut ActionReport,
    ) -> Result<(), BattleError> {
        if skill.revives {
            let member = self.get_mut(target)?;
            if member.is_fallen() {
                member.stats.revive(skill.power.clamp(1, 100));
                let restored = member.stats.hp;
                info!(%actor, %target, hp = restored, "member revived");
                report.push_hit(HitReport::effect(target, HitEffect::Heal, restored));
            }
            return Ok(());
        }

        let (actor_side, target_side) = (self.get(actor)?.side, self.get(target)?.side);
        let opposing = actor_side != target_side;
        let mut landed = false;

        for hit in 0..u32::from(skill.hits) {
            if !self.is_living(target) {
                break;
            }
            let offset = slot * TARGET_STRIDE + hit;

            let (outcome, technical) = {
                let attacker = self.get(actor)?;
                let defender = self.get(target)?;

                if opposing {
                    let roll = self
                        .rng
                        .roll_d100(self.roll_seed(actor, RollKind::Accuracy, offset));
                    let lands = check_hit(
                        skill.accuracy,
                        attacker.effective_speed(),
                        defender.effective_speed(),
                        roll,
                    );
                    if !lands {
                        debug!(%actor, %target, roll, "missed");
                        report.push_hit(HitReport::miss(target));
                        continue;
                    }
                }

                let critical = opposing
                    && skill.damage_kind.uses_formula()
                    && check_critical(
                        skill.crit_rate,
                        self.rng.roll_d100(self.roll_seed(actor, RollKind::Critical, offset)),
                    );
                let variance = self.rng.variance(
                    self.roll_seed(actor, RollKind::Variance, offset),
                    self.config.variance_percent,
                );
                let mut outcome = calculate(
                    self.config.formula_for(skill.formula),
                    &attacker.combatant(),
                    &defender.combatant(),
                    skill,
                    critical,
                    variance,
                    &self.config,
                );

                let damaging =
                    outcome.effect == HitEffect::Damage && skill.damage_kind.is_damaging();
                let technical = damaging
                    .then(|| {
                        self.technicals
                            .find(&defender.statuses, defender.is_knocked_down, skill.element)
                            .cloned()
                    })
                    .flatten();
                if let Some(rule) = &technical {
                    outcome = outcome.scaled(rule.multiplier);
                }
                if let Some(percent) = relay {
                    outcome = outcome.scaled(percent);
                }
                if outcome.effect == HitEffect::Damage && defender.is_guarding() {
                    outcome = outcome.scaled(self.config.guard_damage_factor);
                }
                (outcome, technical)
            };

            landed = true;
            let revealed = skill.damage_kind.uses_formula().then_some(outcome.affinity);
            self.apply_hit(
                actor,
                target,
                skill,
                HitReport {
                    target,
                    amount: outcome.amount,
                    effect: outcome.effect,
                    affinity: revealed,
                    critical: outcome.critical,
                    missed: false,
                    technical: None,
                    knocked_down: false,
                    fell: false,
                },
                technical,
                report,
            )?;
        }

        if landed || !opposing {
            self.apply_side_effects(actor, skill, target, slot, report)?;
        }
        Ok(())
    }

    /// Applies one landed hit and raises its combo events.
    fn apply_hit(
        &mut self,
        actor: MemberId,
        target: MemberId,
        skill: &SkillData,
        mut hit: HitReport,
        technical: Option<TechnicalRule>,
        report: &mut ActionReport,
    ) -> Result<(), BattleError> {
        let knockdown_on_critical = self.config.knockdown_on_critical;
        let actor_side = self.get(actor)?.side;
        let member = self.get_mut(target)?;

        match hit.effect {
            HitEffect::Damage => {
                member.stats.take_damage(hit.amount);
            }
            HitEffect::Heal => {
                member.stats.heal(hit.amount);
            }
            HitEffect::Nullified | HitEffect::NoChange => {}
        }

        if let Some(rule) = &technical
            && rule.consumes_status
            && let TechnicalTrigger::Status(kind) = rule.trigger
        {
            member.statuses.remove(kind);
        }

        let knocks = skill.knocks_down || (hit.critical && knockdown_on_critical);
        if hit.effect == HitEffect::Damage
            && knocks
            && member.is_alive()
            && !member.is_guarding()
            && !member.is_knocked_down
        {
            member.is_knocked_down = true;
            hit.knocked_down = true;
        }

        if hit.effect == HitEffect::Damage && !member.stats.is_alive() {
            member.is_knocked_down = false;
            hit.knocked_down = false;
            hit.fell = true;
        }
        let target_side = member.side;

        if let Some(rule) = technical {
            info!(%actor, %target, combo = %rule.combo, "technical");
            self.publish(BattleEvent::TechnicalDamage {
                attacker: actor,
                target,
                combo: rule.combo.clone(),
            });
            hit.technical = Some(rule.combo);
        }
        if hit.effect == HitEffect::Damage && hit.affinity == Some(Affinity::Weak) {
            info!(%actor, %target, element = %skill.element, "weakness hit");
            report.weakness = true;
            self.publish(BattleEvent::WeaknessHit {
                attacker: actor,
                target,
                element: skill.element,
            });
        }
        if let Some(affinity) = hit.affinity
            && actor_side == Side::Party
            && target_side == Side::Enemy
        {
            self.discovered.insert((target, skill.element), affinity);
        }
        if hit.knocked_down {
            debug!(%target, "knocked down");
            self.publish(BattleEvent::Knockdown { target });
        }
        if hit.fell {
            info!(member = %target, "member fell");
            self.publish(BattleEvent::MemberFell { member: target });
        }

        report.push_hit(hit);
        Ok(())
    }

    fn apply_side_effects(
        &mut self,
        actor: MemberId,
        skill: &SkillData,
        target: MemberId,
        slot: u32,
        report: &mut ActionReport,
    ) -> Result<(), BattleError> {
        let policy: StatusReapply = self.config.status_reapply;

        for (index, infliction) in skill.statuses.iter().enumerate() {
            let member = self.get(target)?;
            if !member.is_alive() {
                break;
            }
            let resistance = member.status_resistance(infliction.kind);
            let chance = infliction_chance(infliction.chance, resistance);
            let seed = self.roll_seed(actor, RollKind::Status, slot * TARGET_STRIDE + index as u32);
            if !self.rng.chance(seed, chance) {
                continue;
            }
            let applied = self
                .get_mut(target)?
                .statuses
                .apply(infliction.kind, infliction.duration, Some(actor), policy);
            if applied.took_effect() {
                debug!(%target, status = %infliction.kind, ?applied, "status inflicted");
                report.statuses.push((target, infliction.kind));
                self.publish(BattleEvent::StatusInflicted {
                    target,
                    status: infliction.kind,
                });
            }
        }

        let member = self.get_mut(target)?;
        if member.is_alive() {
            for buff in &skill.buffs {
                member.buffs.apply(*buff);
            }
        }
        Ok(())
    }

    fn resolve_item(
        &mut self,
        actor: MemberId,
        item: &ItemData,
        targets: Targets,
        report: &mut ActionReport,
    ) -> Result<(), BattleError> {
        if !self.inventory.remove_item(item.id) {
            return Err(BattleError::InvariantViolation(format!(
                "validated {} vanished from the inventory",
                item.id
            )));
        }

        let targets = self.draw_targets(actor, targets);
        for (slot, target) in targets.into_iter().enumerate() {
            match item.effect {
                ItemEffect::Damage { element, power } => {
                    report.element = Some(element);
                    let id = SkillId(u32::MAX - 1);
                    let skill = SkillData::new(id, item.name.clone(), DamageKind::Fixed, power)
                        .with_element(element)
                        .with_target(item.target);
                    self.resolve_skill_on(actor, &skill, target, slot as u32, None, report)?;
                }
                ItemEffect::Revive(percent) => {
                    let member = self.get_mut(target)?;
                    if member.is_fallen() {
                        member.stats.revive(percent);
                        let restored = member.stats.hp;
                        report.push_hit(HitReport::effect(target, HitEffect::Heal, restored));
                    }
                }
                ItemEffect::HealHp(amount) => {
                    let member = self.get_mut(target)?;
                    if member.is_alive() {
                        let restored = member.stats.heal(amount);
                        report.push_hit(HitReport::effect(target, HitEffect::Heal, restored));
                    }
                }
                ItemEffect::HealMp(amount) => {
                    let member = self.get_mut(target)?;
                    if member.is_alive() {
                        let restored = member.stats.restore_mp(amount);
                        report.push_hit(HitReport::effect(target, HitEffect::NoChange, restored));
                    }
                }
                ItemEffect::Cure(kind) => {
                    if self.get_mut(target)?.statuses.remove(kind) {
                        self.publish_expired(target, &[kind]);
                        report.push_hit(HitReport::effect(target, HitEffect::NoChange, 0));
                    }
                }
            }
        }
        Ok(())
    }

    fn resolve_guard(&mut self, actor: MemberId) -> Result<(), BattleError> {
        self.get_mut(actor)?.statuses.apply(
            StatusKind::Guard,
            1,
            Some(actor),
            StatusReapply::Refresh,
        );
        debug!(%actor, "guarding");
        self.publish(BattleEvent::StatusInflicted {
            target: actor,
            status: StatusKind::Guard,
        });
        Ok(())
    }

    fn resolve_escape(
        &mut self,
        actor: MemberId,
        report: &mut ActionReport,
    ) -> Result<(), BattleError> {
        let chance = self.escape_chance(actor)?;
        let success = self.rng.chance(self.roll_seed(actor, RollKind::Escape, 0), chance);
        info!(%actor, chance, success, "escape attempt");
        report.escaped = Some(success);

        let member = self.get_mut(actor)?;
        if success && member.side == Side::Enemy {
            member.escaped = true;
            member.is_knocked_down = false;
        }
        Ok(())
    }

    /// Escape chance in percent against the strongest living opponent.
    pub fn escape_chance(&self, actor: MemberId) -> Result<u32, BattleError> {
        let member = self.get(actor)?;
        let opponents = self.living(member.side.opponent());
        let Some(fastest) = opponents.iter().map(|m| m.effective_speed()).max() else {
            return Ok(100);
        };
        let highest_level = opponents.iter().map(|m| m.stats.level).max().unwrap_or(0);
        let speed = member.effective_speed();

        if u64::from(speed) >= 2 * u64::from(fastest) {
            return Ok(100);
        }
        let chance = 50 + 2 * (i64::from(speed) - i64::from(fastest))
            + 5 * (i64::from(member.stats.level) - i64::from(highest_level));
        Ok(chance.clamp(
            i64::from(self.config.escape_min_chance),
            i64::from(self.config.escape_max_chance),
        ) as u32)
    }

    /// Feeds a resolved action to every AI memory.
    fn observe(&mut self, report: &ActionReport) {
        for (id, memory) in self.memories.iter_mut() {
            let Some(observer) = self.members.get(id.0 as usize) else {
                continue;
            };
            memory.observe(report, observer.side, &self.members);
        }
    }
}

fn hp_cost(member: &BattleMember, percent: u32) -> u32 {
    (u64::from(member.stats.max_hp) * u64::from(percent) / 100).max(1) as u32
}

fn categorize(kind: &ActionKind, plan: &Plan) -> ActionCategory {
    match (kind, plan) {
        (ActionKind::Attack, _) => ActionCategory::Attack,
        (ActionKind::Guard, _) => ActionCategory::Guard,
        (ActionKind::Escape, _) => ActionCategory::Escape,
        (ActionKind::AllOutAttack, _) => ActionCategory::Finisher,
        (ActionKind::Item(_), _) => ActionCategory::Item,
        (_, Plan::Skill { skill, .. }) if skill.revives => ActionCategory::Heal,
        (_, Plan::Skill { skill, .. }) => match skill.damage_kind {
            DamageKind::Recovery => ActionCategory::Heal,
            DamageKind::Support => ActionCategory::Support,
            _ => ActionCategory::DamageSkill,
        },
        _ => ActionCategory::Support,
    }
}
