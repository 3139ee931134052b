//! Round and turn scheduling.

use battle_core::{BattleError, MemberId, StatusKind};
use tracing::{debug, info};

use super::{BattleManager, BattlePhase, TurnKind, TurnStart};
use crate::events::BattleEvent;

impl BattleManager {
    /// Announces the battle and builds the first round order.
    pub fn start(&mut self) -> Result<(), BattleError> {
        match self.phase {
            BattlePhase::NotStarted => {}
            BattlePhase::Ended(_) => return Err(BattleError::BattleOver),
            _ => return Err(BattleError::NotAwaitingAction),
        }

        let names = |side| {
            self.living(side)
                .into_iter()
                .map(|member| member.name.clone())
                .collect::<Vec<_>>()
        };
        let party = names(battle_core::Side::Party);
        let enemies = names(battle_core::Side::Enemy);
        info!(?party, ?enemies, seed = self.seed, "battle started");
        self.publish(BattleEvent::BattleStarted { party, enemies });

        self.begin_round();
        self.phase = BattlePhase::AwaitingTurnStart;
        Ok(())
    }

    /// Advances to the next turn.
    ///
    /// A pending One More resumes the same actor. Otherwise the next living
    /// member leaves the round queue, starting a new round when it is empty.
    /// A member locked by Freeze, Shock or Sleep forfeits: its turn ends
    /// immediately and the returned [`TurnStart`] says so.
    pub fn start_next_turn(&mut self) -> Result<TurnStart, BattleError> {
        match self.phase {
            BattlePhase::AwaitingTurnStart => {}
            BattlePhase::Ended(_) => return Err(BattleError::BattleOver),
            _ => return Err(BattleError::NotAwaitingAction),
        }

        if self.pending_one_more {
            self.pending_one_more = false;
            if let Some(actor) = self.current.filter(|id| self.is_living(*id)) {
                debug!(%actor, "resuming One More");
                return Ok(self.open_turn(actor, TurnKind::OneMore));
            }
        }

        let Some(actor) = self.next_from_queue() else {
            let violation = BattleError::InvariantViolation(String::from(
                "no living member can take a turn",
            ));
            self.abort(violation.to_string());
            return Err(violation);
        };

        let expired = self.get_mut(actor)?.begin_turn(false);
        self.publish_expired(actor, &expired);

        if self.get(actor)?.is_locked() {
            let start = self.announce(actor, TurnKind::Forfeited);
            debug!(%actor, "turn forfeited to a locking status");
            self.end_turn(actor);
            return Ok(start);
        }

        Ok(self.open_turn(actor, TurnKind::Normal))
    }

    /// Returns the member whose action is pending without changing anything.
    pub fn cancel_selection(&self) -> Result<MemberId, BattleError> {
        match self.phase {
            BattlePhase::AwaitingAction(actor) => Ok(actor),
            BattlePhase::Ended(_) => Err(BattleError::BattleOver),
            _ => Err(BattleError::NotAwaitingAction),
        }
    }

    fn next_from_queue(&mut self) -> Option<MemberId> {
        // At most one refill: a fresh round with nobody alive means the
        // battle should already have ended.
        for _ in 0..2 {
            while let Some(id) = self.queue.pop_front() {
                if self.is_living(id) {
                    return Some(id);
                }
            }
            self.begin_round();
        }
        None
    }

    pub(super) fn begin_round(&mut self) {
        self.round += 1;
        for member in &mut self.members {
            member.begin_round();
        }

        let mut order: Vec<(u32, usize, MemberId)> = self
            .members
            .iter()
            .filter(|member| member.is_alive())
            .map(|member| (member.effective_speed(), member.roster_index, member.id))
            .collect();
        order.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));

        self.turn_order = order.into_iter().map(|(_, _, id)| id).collect();
        self.queue = self.turn_order.iter().copied().collect();
        self.board.begin_round(self.round);
        debug!(round = self.round, order = ?self.turn_order, "round order built");
    }

    /// Makes `actor` current and waits for its decision.
    pub(super) fn open_turn(&mut self, actor: MemberId, kind: TurnKind) -> TurnStart {
        let start = self.announce(actor, kind);
        self.phase = if start.player_controlled {
            BattlePhase::AwaitingAction(actor)
        } else {
            BattlePhase::AiDeciding(actor)
        };
        start
    }

    fn announce(&mut self, actor: MemberId, kind: TurnKind) -> TurnStart {
        self.current = Some(actor);
        self.turn_kind = kind;

        let (name, player_controlled) = self
            .member(actor)
            .map(|member| (member.name.clone(), member.player_controlled))
            .unwrap_or_default();
        debug!(%actor, %name, round = self.round, ?kind, "turn started");
        self.publish(BattleEvent::TurnStarted {
            actor,
            actor_name: name.clone(),
            round: self.round,
        });

        TurnStart {
            actor,
            name,
            round: self.round,
            kind,
            player_controlled,
        }
    }

    /// Closes `actor`'s turn: damage over time, status and buff ticks, end check.
    pub(super) fn end_turn(&mut self, actor: MemberId) {
        self.tick_turn_end(actor);

        self.pending_one_more = false;
        self.current = None;
        self.turn_kind = TurnKind::Normal;

        match self.check_battle_end() {
            Some(outcome) => self.end_battle(outcome),
            None => self.phase = BattlePhase::AwaitingTurnStart,
        }
    }

    fn tick_turn_end(&mut self, actor: MemberId) {
        let Some(index) = self.index(actor) else {
            return;
        };
        if !self.members[index].is_alive() {
            return;
        }

        let ticking: Vec<(StatusKind, u32)> = self.members[index]
            .statuses
            .iter()
            .filter_map(|status| {
                status
                    .kind
                    .damage_over_time_percent()
                    .map(|percent| (status.kind, percent))
            })
            .collect();

        for (kind, percent) in ticking {
            let member = &mut self.members[index];
            let raw = (member.stats.max_hp as u64 * percent as u64 / 100).max(1) as u32;
            let damage = if kind.damage_over_time_is_lethal() {
                raw
            } else {
                raw.min(member.stats.hp.saturating_sub(1))
            };
            if damage == 0 {
                continue;
            }
            member.stats.take_damage(damage);
            let fell = !member.stats.is_alive();
            if fell {
                member.is_knocked_down = false;
            }

            debug!(target = %actor, status = %kind, damage, "status tick");
            self.publish(BattleEvent::StatusTicked {
                target: actor,
                status: kind,
                damage,
            });
            if fell {
                info!(member = %actor, status = %kind, "member fell to a status");
                self.publish(BattleEvent::MemberFell { member: actor });
                return;
            }
        }

        let member = &mut self.members[index];
        let expired = member.statuses.tick_turn_end();
        member.buffs.tick_turn_end();
        self.publish_expired(actor, &expired);
    }

    pub(super) fn publish_expired(&self, target: MemberId, expired: &[StatusKind]) {
        for status in expired {
            self.publish(BattleEvent::StatusExpired {
                target,
                status: *status,
            });
        }
    }
}
