//! Battle manager: turn scheduler, action executor and combo chain.
//!
//! # Phases
//!
//! ```text
//! NotStarted ──start()──▶ AwaitingTurnStart ──start_next_turn()──▶ AwaitingAction(actor)
//!                               ▲                                 │ AiDeciding(actor)
//!                               │                                 ▼
//!                               │                         Resolving ─▶ PostResolution
//!                               │                                 │
//!                               ├──────── turn ends / One More ◀──┤
//!                               │                                 ├─▶ AwaitingAllOutAttack(actor)
//!                               │                                 └─▶ Ended(outcome)
//! ```
//!
//! Player-controlled members wait in `AwaitingAction` until
//! [`BattleManager::execute_action`] is called; AI-controlled members wait in
//! `AiDeciding` until [`BattleManager::run_ai_turn`]. Every roll is derived
//! from the battle seed, the action nonce and the roll context, so a battle
//! replays identically from the same seed and inputs.

mod builder;
mod combo;
mod executor;
mod report;
mod turns;

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::sync::Arc;

use battle_core::{
    Affinity, BattleConfig, BattleEnv, BattleError, BattleMember, CharacterId, Element,
    InventoryOracle, MemberId, RngOracle, RollKind, ShowtimeDefinition, Side, TechnicalTable,
    compute_seed, roll_context,
};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::{error, info};

pub use builder::BattleBuilder;
pub use report::{ActionCategory, ActionReport, BattleResults, HitReport, MemberResult};

use crate::events::{BattleEvent, EventBus, Topic};
use crate::providers::ActionProvider;
use crate::providers::ai::{AiMemory, CoordinationBoard};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum BattleOutcome {
    Victory,
    Defeat,
    /// The party escaped.
    Fled,
    /// An internal invariant failed and the battle was stopped.
    Aborted,
}

impl BattleOutcome {
    pub fn is_victory(self) -> bool {
        matches!(self, BattleOutcome::Victory)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattlePhase {
    NotStarted,
    AwaitingTurnStart,
    AwaitingAction(MemberId),
    AiDeciding(MemberId),
    Resolving(MemberId),
    PostResolution(MemberId),
    AwaitingAllOutAttack(MemberId),
    Ended(BattleOutcome),
}

impl BattlePhase {
    pub fn is_ended(&self) -> bool {
        matches!(self, BattlePhase::Ended(_))
    }

    /// Member the phase is waiting on or resolving for.
    pub fn actor(&self) -> Option<MemberId> {
        match *self {
            BattlePhase::AwaitingAction(id)
            | BattlePhase::AiDeciding(id)
            | BattlePhase::Resolving(id)
            | BattlePhase::PostResolution(id)
            | BattlePhase::AwaitingAllOutAttack(id) => Some(id),
            _ => None,
        }
    }
}

/// How the current turn was obtained.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnKind {
    Normal,
    /// Extra action earned through a weakness or technical.
    OneMore,
    /// Turn handed over by an ally's baton pass.
    BatonPass,
    /// A locking status consumed the turn.
    Forfeited,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnStart {
    pub actor: MemberId,
    pub name: String,
    pub round: u32,
    pub kind: TurnKind,
    pub player_controlled: bool,
}

pub struct BattleManager {
    config: BattleConfig,
    env: BattleEnv,
    rng: Arc<dyn RngOracle>,
    inventory: Box<dyn InventoryOracle>,
    provider: Arc<dyn ActionProvider>,
    technicals: TechnicalTable,
    showtimes: Vec<ShowtimeDefinition>,
    escape_allowed: bool,
    seed: u64,

    /// Indexed by `MemberId`; party first, then enemies.
    members: Vec<BattleMember>,
    phase: BattlePhase,
    round: u32,
    queue: VecDeque<MemberId>,
    turn_order: Vec<MemberId>,
    current: Option<MemberId>,
    turn_kind: TurnKind,
    pending_one_more: bool,
    nonce: u64,

    /// Affinities the party has uncovered on enemies.
    discovered: BTreeMap<(MemberId, Element), Affinity>,
    used_showtimes: BTreeSet<usize>,
    memories: BTreeMap<MemberId, AiMemory>,
    board: CoordinationBoard,
    events: EventBus,
}

impl BattleManager {
    pub fn builder() -> BattleBuilder {
        BattleBuilder::new()
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    /// Speed order of the current round.
    pub fn turn_order(&self) -> &[MemberId] {
        &self.turn_order
    }

    pub fn current_actor(&self) -> Option<MemberId> {
        self.current
    }

    pub fn turn_kind(&self) -> TurnKind {
        self.turn_kind
    }

    pub fn has_pending_one_more(&self) -> bool {
        self.pending_one_more
    }

    pub fn is_over(&self) -> bool {
        self.phase.is_ended()
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        match self.phase {
            BattlePhase::Ended(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn member(&self, id: MemberId) -> Option<&BattleMember> {
        self.index(id).map(|index| &self.members[index])
    }

    /// Direct mutable access for scripted scenarios and tools.
    ///
    /// Stat bounds are re-verified after the next action; a violation aborts
    /// the battle.
    pub fn member_mut(&mut self, id: MemberId) -> Option<&mut BattleMember> {
        self.index(id).map(|index| &mut self.members[index])
    }

    pub fn members(&self) -> &[BattleMember] {
        &self.members
    }

    pub fn living(&self, side: Side) -> Vec<&BattleMember> {
        self.members
            .iter()
            .filter(|member| member.side == side && member.is_alive())
            .collect()
    }

    pub fn living_allies(&self) -> Vec<&BattleMember> {
        self.living(Side::Party)
    }

    pub fn living_enemies(&self) -> Vec<&BattleMember> {
        self.living(Side::Enemy)
    }

    /// Whether the battle is waiting on a player decision.
    pub fn is_player_turn(&self) -> bool {
        match self.phase {
            BattlePhase::AwaitingAction(id) | BattlePhase::AwaitingAllOutAttack(id) => {
                self.member(id).is_some_and(|member| member.player_controlled)
            }
            _ => false,
        }
    }

    pub fn discovered_affinity(&self, target: MemberId, element: Element) -> Option<Affinity> {
        self.discovered.get(&(target, element)).copied()
    }

    pub fn is_affinity_known(&self, target: MemberId, element: Element) -> bool {
        self.discovered.contains_key(&(target, element))
    }

    pub fn ai_memory(&self, id: MemberId) -> Option<&AiMemory> {
        self.memories.get(&id)
    }

    /// Memories of members whose pattern carries memory across battles,
    /// keyed by template for the next battle's builder.
    pub fn export_memories(&self) -> BTreeMap<CharacterId, AiMemory> {
        self.memories
            .iter()
            .filter_map(|(id, memory)| {
                let member = self.member(*id)?;
                let carries = member.ai_pattern.as_ref().is_some_and(|p| p.carry_memory);
                carries.then(|| (member.template_id, memory.clone().carry_over()))
            })
            .collect()
    }

    pub fn inventory(&self) -> &dyn InventoryOracle {
        self.inventory.as_ref()
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<BattleEvent> {
        self.events.subscribe(topic)
    }

    /// Member state for copy-back once the battle is over (or at any point).
    pub fn results(&self) -> BattleResults {
        BattleResults {
            outcome: self.outcome(),
            rounds: self.round,
            members: self
                .members
                .iter()
                .map(|member| MemberResult {
                    id: member.id,
                    template_id: member.template_id,
                    side: member.side,
                    hp: member.stats.hp,
                    mp: member.stats.mp,
                    fallen: member.is_fallen(),
                    escaped: member.escaped,
                })
                .collect(),
        }
    }

    fn index(&self, id: MemberId) -> Option<usize> {
        let index = id.0 as usize;
        (self.members.get(index)?.id == id).then_some(index)
    }

    fn get(&self, id: MemberId) -> Result<&BattleMember, BattleError> {
        self.member(id).ok_or(BattleError::InvalidTarget {
            target: Some(id),
            reason: "no such member",
        })
    }

    fn get_mut(&mut self, id: MemberId) -> Result<&mut BattleMember, BattleError> {
        self.member_mut(id).ok_or(BattleError::InvalidTarget {
            target: Some(id),
            reason: "no such member",
        })
    }

    fn is_living(&self, id: MemberId) -> bool {
        self.member(id).is_some_and(BattleMember::is_alive)
    }

    fn publish(&self, event: BattleEvent) {
        self.events.publish(event);
    }

    /// Seed for one roll of the current action.
    fn roll_seed(&self, actor: MemberId, kind: RollKind, offset: u32) -> u64 {
        compute_seed(self.seed, self.nonce, actor.0, roll_context(kind, offset))
    }

    /// Enemies are checked first: a simultaneous wipe is a victory.
    fn check_battle_end(&self) -> Option<BattleOutcome> {
        if self.living_enemies().is_empty() {
            Some(BattleOutcome::Victory)
        } else if self.living_allies().is_empty() {
            Some(BattleOutcome::Defeat)
        } else {
            None
        }
    }

    fn end_battle(&mut self, outcome: BattleOutcome) {
        if self.phase.is_ended() {
            return;
        }
        self.phase = BattlePhase::Ended(outcome);
        self.queue.clear();
        self.current = None;
        self.pending_one_more = false;
        info!(%outcome, round = self.round, "battle ended");
        self.publish(BattleEvent::BattleEnded {
            victory: outcome.is_victory(),
            outcome,
        });
    }

    fn abort(&mut self, reason: String) {
        error!(%reason, round = self.round, "battle aborted");
        self.phase = BattlePhase::Ended(BattleOutcome::Aborted);
        self.queue.clear();
        self.current = None;
        self.pending_one_more = false;
        self.publish(BattleEvent::BattleAborted { reason });
    }

    fn verify_invariants(&self) -> Result<(), BattleError> {
        for member in &self.members {
            if !member.stats.is_within_bounds() {
                return Err(BattleError::InvariantViolation(format!(
                    "{} has hp {}/{} mp {}/{}",
                    member.id,
                    member.stats.hp,
                    member.stats.max_hp,
                    member.stats.mp,
                    member.stats.max_mp
                )));
            }
            if member.is_knocked_down && !member.is_alive() {
                return Err(BattleError::InvariantViolation(format!(
                    "{} is knocked down while off the field",
                    member.id
                )));
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for BattleManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BattleManager")
            .field("phase", &self.phase)
            .field("round", &self.round)
            .field("members", &self.members.len())
            .field("seed", &self.seed)
            .finish_non_exhaustive()
    }
}
