//! Combo chain: One More, All-Out Attack, baton pass and showtimes.

use battle_core::{
    ActionKind, BattleAction, BattleError, BuffStat, CharacterId, HitEffect, MemberId, RollKind,
    ShowtimeDefinition, Side,
};
use tracing::{debug, info};

use super::report::{ActionReport, HitReport};
use super::{BattleManager, BattleOutcome, BattlePhase, TurnKind, TurnStart};
use crate::events::BattleEvent;

impl BattleManager {
    /// Runs the combo chain after an action and decides where the turn goes.
    pub(super) fn finish_action(&mut self, actor: MemberId, report: &mut ActionReport) {
        let side = self.member(actor).map(|member| member.side);

        if side == Some(Side::Party) && report.escaped == Some(true) {
            self.end_battle(BattleOutcome::Fled);
            report.outcome = self.outcome();
            return;
        }
        if self.settle(report) {
            return;
        }
        if !self.is_living(actor) {
            self.end_turn(actor);
            report.outcome = self.outcome();
            return;
        }

        let earned = report.weakness || report.technical();
        let finisher = report.kind == ActionKind::AllOutAttack;

        if side == Some(Side::Party) && report.kind != ActionKind::Escape {
            self.try_showtime(actor, report);
            if self.settle(report) {
                return;
            }
        }

        if finisher {
            self.pending_one_more = false;
            self.end_turn(actor);
            report.outcome = self.outcome();
            return;
        }

        if earned {
            report.one_more = self.grant_one_more(actor);
        }

        if side == Some(Side::Party) && self.all_enemies_down() {
            info!(%actor, "all enemies down, All-Out Attack ready");
            self.phase = BattlePhase::AwaitingAllOutAttack(actor);
            self.publish(BattleEvent::AllOutAttackReady { actor });
            report.all_out_ready = true;
            return;
        }

        if self.pending_one_more {
            self.phase = BattlePhase::AwaitingTurnStart;
        } else {
            self.end_turn(actor);
            report.outcome = self.outcome();
        }
    }

    /// Ends the battle if a side is wiped. Returns whether it ended.
    fn settle(&mut self, report: &mut ActionReport) -> bool {
        match self.check_battle_end() {
            Some(outcome) => {
                self.end_battle(outcome);
                report.outcome = Some(outcome);
                true
            }
            None => false,
        }
    }

    fn grant_one_more(&mut self, actor: MemberId) -> bool {
        let cap = self.config.max_one_more_per_round;
        let Some(member) = self.member_mut(actor) else {
            return false;
        };
        if member.extra_actions_this_round >= cap {
            debug!(%actor, cap, "One More cap reached");
            return false;
        }
        member.extra_actions_this_round += 1;
        self.pending_one_more = true;
        info!(%actor, "One More");
        self.publish(BattleEvent::OneMoreTriggered { actor });
        true
    }

    /// Whether at least one enemy stands and every standing enemy is down.
    pub(super) fn all_enemies_down(&self) -> bool {
        let enemies = self.living_enemies();
        !enemies.is_empty() && enemies.iter().all(|enemy| enemy.is_knocked_down)
    }

    /// Confirms the All-Out Attack offered to the current actor.
    pub fn confirm_all_out_attack(&mut self) -> Result<ActionReport, BattleError> {
        match self.phase {
            BattlePhase::AwaitingAllOutAttack(actor) => {
                self.execute_action(BattleAction::all_out_attack(actor))
            }
            BattlePhase::Ended(_) => Err(BattleError::BattleOver),
            _ => Err(BattleError::AllOutAttackUnavailable),
        }
    }

    /// Declines the All-Out Attack; a pending One More is kept.
    pub fn decline_all_out_attack(&mut self) -> Result<(), BattleError> {
        let actor = match self.phase {
            BattlePhase::AwaitingAllOutAttack(actor) => actor,
            BattlePhase::Ended(_) => return Err(BattleError::BattleOver),
            _ => return Err(BattleError::AllOutAttackUnavailable),
        };
        debug!(%actor, "All-Out Attack declined");
        if self.pending_one_more {
            self.phase = BattlePhase::AwaitingTurnStart;
        } else {
            self.end_turn(actor);
        }
        Ok(())
    }

    /// Summed party attack against every standing enemy, then knockdowns clear.
    pub(super) fn resolve_all_out(
        &mut self,
        actor: MemberId,
        report: &mut ActionReport,
    ) -> Result<(), BattleError> {
        let attack: u64 = self
            .living_allies()
            .iter()
            .map(|member| u64::from(member.buffs.effective(&member.stats, BuffStat::Attack)))
            .sum();
        let global = u64::from(self.config.global_multiplier);
        let power = u64::from(self.config.all_out_power);
        let spread = self.config.all_out_variance_percent;

        let targets: Vec<MemberId> = self.living_enemies().iter().map(|enemy| enemy.id).collect();
        for (slot, target) in targets.into_iter().enumerate() {
            let variance = self
                .rng
                .variance(self.roll_seed(actor, RollKind::Variance, slot as u32), spread);
            let amount = (attack * power * u64::from(variance) * global / 1_000_000).max(1);
            let amount = u32::try_from(amount).unwrap_or(u32::MAX);

            let member = self.get_mut(target)?;
            member.stats.take_damage(amount);
            let fell = !member.stats.is_alive();

            let mut hit = HitReport::effect(target, HitEffect::Damage, amount);
            hit.fell = fell;
            report.push_hit(hit);
            if fell {
                info!(member = %target, "member fell");
                self.publish(BattleEvent::MemberFell { member: target });
            }
        }

        for enemy in self.members.iter_mut().filter(|m| m.side == Side::Enemy) {
            enemy.is_knocked_down = false;
        }
        info!(%actor, damage = report.total_damage, "All-Out Attack");
        Ok(())
    }

    /// Rolls every unused showtime whose pair includes the actor's side.
    fn try_showtime(&mut self, actor: MemberId, report: &mut ActionReport) {
        let candidates: Vec<(usize, ShowtimeDefinition, MemberId, MemberId)> = self
            .showtimes
            .iter()
            .enumerate()
            .filter(|(index, _)| !self.used_showtimes.contains(index))
            .filter_map(|(index, def)| {
                let first = self.living_party_member(def.first)?;
                let second = self.living_party_member(def.second)?;
                let threatened = self
                    .living_enemies()
                    .iter()
                    .any(|enemy| enemy.stats.hp_ratio() <= def.hp_threshold_percent);
                threatened.then(|| (index, def.clone(), first, second))
            })
            .collect();

        for (index, def, first, second) in candidates {
            let seed = self.roll_seed(actor, RollKind::Showtime, index as u32);
            if !self.rng.chance(seed, def.chance_percent) {
                continue;
            }
            self.used_showtimes.insert(index);
            info!(name = %def.name, %first, %second, "showtime");
            self.publish(BattleEvent::ShowtimeTriggered {
                name: def.name.clone(),
                first,
                second,
            });

            let skill = def.skill();
            let targets: Vec<MemberId> =
                self.living_enemies().iter().map(|enemy| enemy.id).collect();
            for (slot, target) in targets.into_iter().enumerate() {
                if let Err(violation) =
                    self.resolve_skill_on(first, &skill, target, 64 + slot as u32, None, report)
                {
                    self.abort(violation.to_string());
                    return;
                }
            }
            report.showtime = Some(def.name);
            return;
        }
    }

    fn living_party_member(&self, template: CharacterId) -> Option<MemberId> {
        self.members
            .iter()
            .find(|m| m.side == Side::Party && m.template_id == template && m.is_alive())
            .map(|m| m.id)
    }

    /// Member currently holding a One More that could be handed over.
    pub fn baton_holder(&self) -> Option<MemberId> {
        let holder = match self.phase {
            BattlePhase::AwaitingTurnStart if self.pending_one_more => self.current?,
            BattlePhase::AwaitingAction(id) if self.turn_kind == TurnKind::OneMore => id,
            _ => return None,
        };
        let member = self.member(holder)?;
        (member.side == Side::Party && member.is_alive()).then_some(holder)
    }

    pub fn can_baton_pass(&self) -> bool {
        !self.baton_pass_targets().is_empty()
    }

    /// Allies that can receive the baton from the current holder.
    pub fn baton_pass_targets(&self) -> Vec<MemberId> {
        let Some(holder) = self.baton_holder() else {
            return Vec::new();
        };
        self.living_allies()
            .into_iter()
            .filter(|m| m.id != holder && !m.passed_baton_this_round && !m.is_locked())
            .map(|m| m.id)
            .collect()
    }

    /// Hands the holder's One More to `to`, raising the relay bonus one level.
    pub fn baton_pass(&mut self, to: MemberId) -> Result<TurnStart, BattleError> {
        if self.phase.is_ended() {
            return Err(BattleError::BattleOver);
        }
        let holder = self.baton_holder().ok_or(BattleError::BatonPassUnavailable {
            reason: "no One More to pass",
        })?;
        if !self.baton_pass_targets().contains(&to) {
            return Err(BattleError::BatonPassUnavailable {
                reason: "ally cannot receive the baton",
            });
        }

        let passer = self.get_mut(holder)?;
        let level = passer.baton_pass.pass_count.saturating_add(1);
        passer.passed_baton_this_round = true;
        passer.baton_pass.reset();

        self.end_turn(holder);
        if self.phase.is_ended() {
            return Err(BattleError::BattleOver);
        }

        let receiver = self.get_mut(to)?;
        receiver.baton_pass.is_active = true;
        receiver.baton_pass.pass_count = level;
        let expired = receiver.begin_turn(true);
        self.publish_expired(to, &expired);

        info!(from = %holder, %to, level, "baton pass");
        self.publish(BattleEvent::BatonPassExecuted {
            from: holder,
            to,
            pass_level: level,
        });
        Ok(self.open_turn(to, TurnKind::BatonPass))
    }
}
