//! Battle assembly.

use std::collections::BTreeMap;
use std::sync::Arc;

use battle_content::ContentRegistry;
use battle_core::{
    AiPattern, BattleConfig, BattleEnv, BattleError, BattleMember, CharacterId, InventoryOracle,
    MemberId, PcgRng, RngOracle, ShowtimeDefinition, Side, TechnicalTable,
};
use tracing::{debug, warn};

use super::{BattleManager, BattlePhase, TurnKind};
use crate::error::{Result, RuntimeError};
use crate::events::EventBus;
use crate::inventory::MemoryInventory;
use crate::providers::ai::{AiMemory, CoordinationBoard};
use crate::providers::{ActionProvider, UtilityAiProvider};

/// Builder for [`BattleManager`].
///
/// Only the oracles and both rosters are required; everything else has a
/// default (standard technical table, no showtimes, empty inventory, utility
/// AI, seed 0, escape allowed).
///
/// Malformed AI patterns are replaced with [`AiPattern::default`] and invalid
/// escape bounds with the default bounds; both are logged.
pub struct BattleBuilder {
    env: Option<BattleEnv>,
    config: BattleConfig,
    party: Vec<CharacterId>,
    enemies: Vec<CharacterId>,
    escape_allowed: bool,
    seed: u64,
    inventory: Option<Box<dyn InventoryOracle>>,
    rng: Option<Arc<dyn RngOracle>>,
    provider: Option<Arc<dyn ActionProvider>>,
    technicals: Option<TechnicalTable>,
    showtimes: Vec<ShowtimeDefinition>,
    memories: BTreeMap<CharacterId, AiMemory>,
    events: Option<EventBus>,
}

impl BattleBuilder {
    pub const MAX_MEMBERS: usize = 16;

    pub fn new() -> Self {
        Self {
            env: None,
            config: BattleConfig::default(),
            party: Vec::new(),
            enemies: Vec::new(),
            escape_allowed: true,
            seed: 0,
            inventory: None,
            rng: None,
            provider: None,
            technicals: None,
            showtimes: Vec::new(),
            memories: BTreeMap::new(),
            events: None,
        }
    }

    /// Uses a content registry as every oracle and takes its technical table
    /// and showtimes.
    pub fn registry(mut self, registry: Arc<ContentRegistry>) -> Self {
        self.technicals = Some(registry.technicals().clone());
        self.showtimes = registry.showtimes().to_vec();
        self.env = Some(BattleEnv::from_registry(registry));
        self
    }

    pub fn env(mut self, env: BattleEnv) -> Self {
        self.env = Some(env);
        self
    }

    pub fn config(mut self, config: BattleConfig) -> Self {
        self.config = config;
        self
    }

    pub fn party(mut self, members: impl IntoIterator<Item = CharacterId>) -> Self {
        self.party = members.into_iter().collect();
        self
    }

    pub fn enemies(mut self, members: impl IntoIterator<Item = CharacterId>) -> Self {
        self.enemies = members.into_iter().collect();
        self
    }

    pub fn escape_allowed(mut self, allowed: bool) -> Self {
        self.escape_allowed = allowed;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn inventory(mut self, inventory: impl InventoryOracle + 'static) -> Self {
        self.inventory = Some(Box::new(inventory));
        self
    }

    pub fn rng(mut self, rng: Arc<dyn RngOracle>) -> Self {
        self.rng = Some(rng);
        self
    }

    pub fn ai_provider(mut self, provider: Arc<dyn ActionProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn technicals(mut self, table: TechnicalTable) -> Self {
        self.technicals = Some(table);
        self
    }

    pub fn showtimes(mut self, showtimes: Vec<ShowtimeDefinition>) -> Self {
        self.showtimes = showtimes;
        self
    }

    /// Memories exported from a previous battle. Only members whose pattern
    /// sets `carry_memory` pick them up.
    pub fn carried_memories(mut self, memories: BTreeMap<CharacterId, AiMemory>) -> Self {
        self.memories = memories;
        self
    }

    pub fn event_bus(mut self, events: EventBus) -> Self {
        self.events = Some(events);
        self
    }

    pub fn build(self) -> Result<BattleManager> {
        let env = self.env.ok_or(RuntimeError::MissingEnv)?;
        if self.party.is_empty() {
            return Err(RuntimeError::EmptyRoster { side: Side::Party });
        }
        if self.enemies.is_empty() {
            return Err(RuntimeError::EmptyRoster { side: Side::Enemy });
        }
        let count = self.party.len() + self.enemies.len();
        if count > Self::MAX_MEMBERS {
            return Err(RuntimeError::RosterTooLarge {
                count,
                max: Self::MAX_MEMBERS,
            });
        }

        let roster = self
            .party
            .iter()
            .map(|id| (Side::Party, *id))
            .chain(self.enemies.iter().map(|id| (Side::Enemy, *id)));

        let mut members = Vec::with_capacity(count);
        for (index, (side, template_id)) in roster.enumerate() {
            let mut template = env.character(template_id)?;
            if let Some(pattern) = &template.ai_pattern
                && let Err(reason) = pattern.validate()
            {
                let err = BattleError::MalformedPattern(reason);
                warn!(character = %template_id, %err, "substituting the default AI pattern");
                template.ai_pattern = Some(AiPattern::default());
            }
            let equipment = env.equipment(template_id);
            members.push(BattleMember::from_template(
                MemberId(index as u32),
                side,
                index,
                &template,
                &equipment,
            ));
        }

        let config = match self.config.validate() {
            Ok(()) => self.config,
            Err(reason) => {
                let err = BattleError::InvalidConfig(reason);
                warn!(%err, "using the default escape bounds");
                self.config.with_default_escape_bounds()
            }
        };

        let memories = members
            .iter()
            .filter(|member| member.is_ai_controlled())
            .map(|member| {
                let carries = member.ai_pattern.as_ref().is_some_and(|p| p.carry_memory);
                let memory = match self.memories.get(&member.template_id) {
                    Some(prior) if carries => prior.clone().carry_over(),
                    _ => AiMemory::new(),
                };
                (member.id, memory)
            })
            .collect();

        debug!(
            party = self.party.len(),
            enemies = self.enemies.len(),
            seed = self.seed,
            "battle assembled"
        );

        Ok(BattleManager {
            config,
            env,
            rng: self.rng.unwrap_or_else(|| Arc::new(PcgRng)),
            inventory: self
                .inventory
                .unwrap_or_else(|| Box::new(MemoryInventory::default())),
            provider: self.provider.unwrap_or_else(|| Arc::new(UtilityAiProvider)),
            technicals: self.technicals.unwrap_or_else(TechnicalTable::standard),
            showtimes: self.showtimes,
            escape_allowed: self.escape_allowed,
            seed: self.seed,
            members,
            phase: BattlePhase::NotStarted,
            round: 0,
            queue: Default::default(),
            turn_order: Vec::new(),
            current: None,
            turn_kind: TurnKind::Normal,
            pending_one_more: false,
            nonce: 0,
            discovered: Default::default(),
            used_showtimes: Default::default(),
            memories,
            board: CoordinationBoard::new(),
            events: self.events.unwrap_or_default(),
        })
    }
}

impl Default for BattleBuilder {
    fn default() -> Self {
        Self::new()
    }
}
