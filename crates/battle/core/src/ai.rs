//! AI pattern templates.
//!
//! An [`AiPattern`] is read-only configuration attached to a character
//! template. Everything an AI learns during a battle lives in the runtime's
//! per-member memory, never here.

use bitflags::bitflags;

use crate::skill::SkillId;

/// Baseline behaviour of an AI-controlled member.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum BehaviorType {
    /// Sets up and lands weaknesses and technicals.
    Tactical,
    /// Guards and heals before attacking.
    Defensive,
    #[default]
    Balanced,
    /// Heals and buffs allies.
    Supportive,
    /// Near-random, high aggression.
    Berserk,
    /// Flees below its flee threshold.
    Cowardly,
}

/// How an AI ranks opposing members.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TargetPriority {
    /// Known weaknesses first, then knocked down, then lowest HP ratio.
    MostVulnerable,
    /// Highest offensive stat.
    HighestThreat,
    #[default]
    LowestHp,
    HighestHp,
    Random,
    /// First member of the opposing roster.
    Leader,
    /// Member with the most recovery skills.
    Healer,
    LowestDefense,
    /// Lowest level, then lowest total stats.
    Weakest,
}

bitflags! {
    /// Optional decision layers, each independently togglable.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct AiCapabilities: u16 {
        const WEAKNESS_EXPLOIT     = 1 << 0;
        const TECHNICAL_EXPLOIT    = 1 << 1;
        const RESOURCE_MANAGEMENT  = 1 << 2;
        const MULTI_TURN_PLANNING  = 1 << 3;
        const RISK_ASSESSMENT      = 1 << 4;
        const ADAPTIVE_LEARNING    = 1 << 5;
        const PERSONALITY_PHASES   = 1 << 6;
        const PARTY_COORDINATION   = 1 << 7;
    }
}

/// Behaviour profile swapped in at or below an HP threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PersonalityPhase {
    /// HP percent at or below which this phase is active.
    pub hp_threshold: u32,
    pub behavior: BehaviorType,
    pub target_priority: TargetPriority,
}

/// Immutable AI configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AiPattern {
    pub name: String,
    pub behavior: BehaviorType,
    pub target_priority: TargetPriority,
    /// Skills the AI may use; empty means every skill the member knows.
    pub skill_pool: Vec<SkillId>,
    pub capabilities: AiCapabilities,
    /// HP percent at or below which allies are considered in need of healing.
    pub heal_threshold: u32,
    /// HP percent at or below which Cowardly members try to flee.
    pub flee_threshold: u32,
    /// MP percent below which MP-costly skills are withheld.
    pub mp_conservation_threshold: u32,
    /// Permits spending MP freely regardless of conservation.
    pub boss_phase: bool,
    /// Percent chance to try an element whose affinity is still unknown.
    pub probe_risk: u32,
    /// Plan buffer depth for multi-turn planning.
    pub planning_depth: u8,
    /// 0 (never gambles) to 100 (always gambles) on costly, swingy actions.
    pub risk_tolerance: u32,
    /// Sorted by descending threshold when resolved.
    pub phases: Vec<PersonalityPhase>,
    /// Keep learned memory across battles (tutorial/rival encounters).
    pub carry_memory: bool,
}

impl AiPattern {
    pub fn new(
        name: impl Into<String>,
        behavior: BehaviorType,
        target_priority: TargetPriority,
    ) -> Self {
        Self {
            name: name.into(),
            behavior,
            target_priority,
            ..Self::default()
        }
    }

    pub fn with_capabilities(mut self, capabilities: AiCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn with_skill_pool(mut self, pool: Vec<SkillId>) -> Self {
        self.skill_pool = pool;
        self
    }

    pub fn with_phases(mut self, phases: Vec<PersonalityPhase>) -> Self {
        self.phases = phases;
        self
    }

    pub fn has(&self, capability: AiCapabilities) -> bool {
        self.capabilities.contains(capability)
    }

    /// Behaviour and priority active at the given HP percent.
    ///
    /// Without the phases capability the base profile always applies.
    pub fn profile_at(&self, hp_ratio: u32) -> (BehaviorType, TargetPriority, Option<usize>) {
        if !self.has(AiCapabilities::PERSONALITY_PHASES) {
            return (self.behavior, self.target_priority, None);
        }
        self.phases
            .iter()
            .enumerate()
            .filter(|(_, phase)| hp_ratio <= phase.hp_threshold)
            .min_by_key(|(_, phase)| phase.hp_threshold)
            .map(|(index, phase)| (phase.behavior, phase.target_priority, Some(index)))
            .unwrap_or((self.behavior, self.target_priority, None))
    }

    /// Structural validation used by loaders.
    pub fn validate(&self) -> Result<(), String> {
        if self.has(AiCapabilities::MULTI_TURN_PLANNING) && self.planning_depth == 0 {
            return Err(format!("pattern '{}' plans with depth 0", self.name));
        }
        if self.has(AiCapabilities::PERSONALITY_PHASES) && self.phases.is_empty() {
            return Err(format!("pattern '{}' enables phases but defines none", self.name));
        }
        if let Some(phase) = self.phases.iter().find(|p| p.hp_threshold > 100) {
            return Err(format!(
                "pattern '{}' has phase threshold {} above 100",
                self.name, phase.hp_threshold
            ));
        }
        for (label, value) in [
            ("heal_threshold", self.heal_threshold),
            ("flee_threshold", self.flee_threshold),
            ("mp_conservation_threshold", self.mp_conservation_threshold),
            ("probe_risk", self.probe_risk),
            ("risk_tolerance", self.risk_tolerance),
        ] {
            if value > 100 {
                return Err(format!("pattern '{}' has {label} {value} above 100", self.name));
            }
        }
        Ok(())
    }
}

impl Default for AiPattern {
    fn default() -> Self {
        Self {
            name: String::from("default"),
            behavior: BehaviorType::Balanced,
            target_priority: TargetPriority::LowestHp,
            skill_pool: Vec::new(),
            capabilities: AiCapabilities::empty(),
            heal_threshold: 40,
            flee_threshold: 25,
            mp_conservation_threshold: 30,
            boss_phase: false,
            probe_risk: 30,
            planning_depth: 2,
            risk_tolerance: 50,
            phases: Vec::new(),
            carry_memory: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn four_phase_boss() -> AiPattern {
        AiPattern::new("boss", BehaviorType::Balanced, TargetPriority::LowestHp)
            .with_capabilities(AiCapabilities::PERSONALITY_PHASES)
            .with_phases(vec![
                PersonalityPhase {
                    hp_threshold: 100,
                    behavior: BehaviorType::Balanced,
                    target_priority: TargetPriority::LowestHp,
                },
                PersonalityPhase {
                    hp_threshold: 75,
                    behavior: BehaviorType::Tactical,
                    target_priority: TargetPriority::MostVulnerable,
                },
                PersonalityPhase {
                    hp_threshold: 50,
                    behavior: BehaviorType::Defensive,
                    target_priority: TargetPriority::HighestThreat,
                },
                PersonalityPhase {
                    hp_threshold: 25,
                    behavior: BehaviorType::Berserk,
                    target_priority: TargetPriority::Random,
                },
            ])
    }

    #[test]
    fn phases_follow_hp_thresholds() {
        let pattern = four_phase_boss();
        assert_eq!(pattern.profile_at(100).0, BehaviorType::Balanced);
        assert_eq!(pattern.profile_at(75).0, BehaviorType::Tactical);
        assert_eq!(pattern.profile_at(51).0, BehaviorType::Tactical);
        assert_eq!(pattern.profile_at(50).0, BehaviorType::Defensive);
        assert_eq!(pattern.profile_at(3), (BehaviorType::Berserk, TargetPriority::Random, Some(3)));
    }

    #[test]
    fn phases_ignored_without_capability() {
        let mut pattern = four_phase_boss();
        pattern.capabilities = AiCapabilities::empty();
        assert_eq!(
            pattern.profile_at(10),
            (BehaviorType::Balanced, TargetPriority::LowestHp, None)
        );
    }

    #[test]
    fn validation_rejects_malformed_patterns() {
        assert!(AiPattern::default().validate().is_ok());
        assert!(four_phase_boss().validate().is_ok());

        let mut broken = AiPattern::default().with_capabilities(AiCapabilities::PERSONALITY_PHASES);
        assert!(broken.validate().is_err());

        broken.capabilities = AiCapabilities::MULTI_TURN_PLANNING;
        broken.planning_depth = 0;
        assert!(broken.validate().is_err());

        let mut over = AiPattern::default();
        over.probe_risk = 150;
        assert!(over.validate().is_err());
    }
}
