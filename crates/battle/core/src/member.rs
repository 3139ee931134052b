//! Battle members: the runtime combat wrapper around a stat block.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::ai::AiPattern;
use crate::combat::Combatant;
use crate::element::AffinityTable;
use crate::env::{CharacterId, CharacterTemplate};
use crate::skill::SkillId;
use crate::stats::{BuffLedger, BuffStat, CharacterStats, StatModifiers};
use crate::status::{StatusKind, StatusLedger};

/// Identifier of a member within one battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct MemberId(pub u32);

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "member#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Party,
    Enemy,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Party => Side::Enemy,
            Side::Enemy => Side::Party,
        }
    }
}

/// Relay ("baton pass") state of a member.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BatonPassData {
    pub is_active: bool,
    pub pass_count: u8,
}

impl BatonPassData {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Runtime combat state of one participant.
#[derive(Clone, Debug)]
pub struct BattleMember {
    pub id: MemberId,
    pub template_id: CharacterId,
    pub name: String,
    pub side: Side,
    /// Position in the original roster; breaks speed ties.
    pub roster_index: usize,
    pub stats: CharacterStats,
    pub affinities: AffinityTable,
    /// Percent resistance per status kind.
    pub status_resistances: BTreeMap<StatusKind, u32>,
    pub statuses: StatusLedger,
    pub buffs: BuffLedger,
    pub skills: Vec<SkillId>,
    pub is_knocked_down: bool,
    pub baton_pass: BatonPassData,
    pub ai_pattern: Option<Arc<AiPattern>>,
    pub player_controlled: bool,
    pub escaped: bool,
    pub extra_actions_this_round: u8,
    pub passed_baton_this_round: bool,
}

impl BattleMember {
    /// Builds a member from a template with equipment bonuses applied once.
    pub fn from_template(
        id: MemberId,
        side: Side,
        roster_index: usize,
        template: &CharacterTemplate,
        equipment: &StatModifiers,
    ) -> Self {
        let mut stats = template.stats.clone();
        stats.apply_modifiers(equipment);

        Self {
            id,
            template_id: template.id,
            name: template.name.clone(),
            side,
            roster_index,
            stats,
            affinities: template.affinities.clone(),
            status_resistances: template.status_resistances.clone(),
            statuses: StatusLedger::new(),
            buffs: BuffLedger::new(),
            skills: template.skills.clone(),
            is_knocked_down: false,
            baton_pass: BatonPassData::default(),
            ai_pattern: template.ai_pattern.clone().map(Arc::new),
            player_controlled: side == Side::Party && template.ai_pattern.is_none(),
            escaped: false,
            extra_actions_this_round: 0,
            passed_baton_this_round: false,
        }
    }

    /// Living and still on the field.
    pub fn is_alive(&self) -> bool {
        self.stats.is_alive() && !self.escaped
    }

    /// Fallen (HP 0) but not escaped; the only state revival can target.
    pub fn is_fallen(&self) -> bool {
        !self.stats.is_alive() && !self.escaped
    }

    pub fn is_locked(&self) -> bool {
        self.statuses.is_locked()
    }

    pub fn is_guarding(&self) -> bool {
        self.statuses.has(StatusKind::Guard)
    }

    pub fn is_ai_controlled(&self) -> bool {
        !self.player_controlled
    }

    pub fn effective_speed(&self) -> u32 {
        self.buffs.effective(&self.stats, BuffStat::Speed)
    }

    pub fn status_resistance(&self, kind: StatusKind) -> u32 {
        self.status_resistances.get(&kind).copied().unwrap_or(0)
    }

    pub fn combatant(&self) -> Combatant<'_> {
        Combatant::new(&self.stats, &self.buffs, &self.affinities)
    }

    /// Clears per-turn combo state when this member's turn begins.
    ///
    /// A turn received through a baton pass keeps its relay bonus until the
    /// receiver's next action consumes it. Returns statuses that expired.
    pub fn begin_turn(&mut self, received_baton: bool) -> Vec<StatusKind> {
        self.is_knocked_down = false;
        if !received_baton {
            self.baton_pass.reset();
        }
        self.statuses.expire_at_turn_start()
    }

    /// Resets per-round counters at a round boundary.
    pub fn begin_round(&mut self) {
        self.extra_actions_this_round = 0;
        self.passed_baton_this_round = false;
        self.baton_pass.reset();
    }
}
