//! Action providers for AI-controlled members.
//!
//! The battle manager asks its [`ActionProvider`] for an action whenever an
//! AI-controlled member's turn comes up. [`UtilityAiProvider`] is the default;
//! tests and tools plug in scripted policies (any matching closure works).

pub mod ai;

use battle_core::{BattleAction, RngOracle};

use ai::{AiContext, AiMemory, CoordinationBoard};

/// Everything a provider may read or update for one decision.
pub struct DecisionRequest<'r, 'a> {
    pub ctx: &'r AiContext<'a>,
    pub memory: &'r mut AiMemory,
    pub board: &'r mut CoordinationBoard,
    pub rng: &'r dyn RngOracle,
    pub seed: u64,
}

/// Source of actions for AI-controlled members.
pub trait ActionProvider: Send + Sync {
    fn provide_action(&self, request: DecisionRequest<'_, '_>) -> BattleAction;
}

impl<F> ActionProvider for F
where
    F: Fn(&AiContext<'_>) -> BattleAction + Send + Sync,
{
    fn provide_action(&self, request: DecisionRequest<'_, '_>) -> BattleAction {
        self(request.ctx)
    }
}

/// Default provider running the full utility pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct UtilityAiProvider;

impl ActionProvider for UtilityAiProvider {
    fn provide_action(&self, request: DecisionRequest<'_, '_>) -> BattleAction {
        ai::decide(
            request.ctx,
            request.memory,
            request.board,
            request.rng,
            request.seed,
        )
        .action
    }
}
