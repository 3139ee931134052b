//! Damage formula library.
//!
//! # Pipeline
//!
//! ```text
//! base          = formula(attack, defense, power, levels)     (Physical / Magical)
//!               | power                                       (Fixed)
//!               | round(target_max_hp × power / 100)          (Percentage)
//! varied        = base × variance                             (formulas with variance)
//! scaled        = varied × affinity multiplier                (Weak / Resist / Immune)
//! critical      = scaled × crit multiplier                    (formula kinds only)
//! final         = floor(critical × global multiplier), min 1 unless Immune
//! ```
//!
//! Absorb turns the final amount into healing on the defender. Fixed and
//! Percentage skip the formula, variance and critical steps and only honour
//! Immune and Absorb.
//!
//! All functions are pure; the only randomness is the variance factor, which
//! the caller draws from a seeded roll and passes in.

use crate::config::BattleConfig;
use crate::element::{Affinity, AffinityTable};
use crate::skill::{DamageKind, SkillData};
use crate::stats::{BuffLedger, BuffStat, CharacterStats};

/// Formula families selectable per skill or globally.
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
pub enum DamageFormula {
    /// `power × atk / def`, no variance.
    #[default]
    Simple,
    /// `5 × √(power × atk / def)`; flat curve that favours power over stats.
    Classic,
    /// Simple ratio scaled by `1.05^(level difference)`, difference clamped to ±20.
    LevelScaled,
    /// `power × atk × 100 / (100 + def) / 10`; defense has diminishing returns.
    Saturating,
}

impl DamageFormula {
    const LEVEL_BASE: f64 = 1.05;
    const LEVEL_CLAMP: i64 = 20;

    /// Whether the caller's variance roll applies to this formula.
    pub fn has_variance(self) -> bool {
        !matches!(self, DamageFormula::Simple)
    }

    /// Raw, unrounded base damage.
    pub fn base(
        self,
        attack: u32,
        defense: u32,
        power: u32,
        attacker_level: u32,
        defender_level: u32,
    ) -> f64 {
        let attack = attack as f64;
        let defense = defense.max(1) as f64;
        let power = power as f64;

        match self {
            DamageFormula::Simple => power * attack / defense,
            DamageFormula::Classic => 5.0 * (power * attack / defense).sqrt(),
            DamageFormula::LevelScaled => {
                let diff = (attacker_level as i64 - defender_level as i64)
                    .clamp(-Self::LEVEL_CLAMP, Self::LEVEL_CLAMP);
                power * attack / defense * Self::LEVEL_BASE.powi(diff as i32)
            }
            DamageFormula::Saturating => power * attack * 100.0 / (100.0 + defense) / 10.0,
        }
    }
}

/// Read-only view of one side of a hit.
#[derive(Clone, Copy, Debug)]
pub struct Combatant<'a> {
    pub stats: &'a CharacterStats,
    pub buffs: &'a BuffLedger,
    pub affinities: &'a AffinityTable,
}

impl<'a> Combatant<'a> {
    pub fn new(
        stats: &'a CharacterStats,
        buffs: &'a BuffLedger,
        affinities: &'a AffinityTable,
    ) -> Self {
        Self {
            stats,
            buffs,
            affinities,
        }
    }

    /// Buffed offensive stat for the damage kind.
    pub fn offense(&self, kind: DamageKind) -> u32 {
        match kind {
            DamageKind::Magical | DamageKind::Recovery => {
                self.buffs.effective(self.stats, BuffStat::MagicAttack)
            }
            _ => self.buffs.effective(self.stats, BuffStat::Attack),
        }
    }

    /// Buffed defensive stat for the damage kind.
    pub fn defense(&self, kind: DamageKind) -> u32 {
        match kind {
            DamageKind::Magical => self.buffs.effective(self.stats, BuffStat::MagicDefense),
            _ => self.buffs.effective(self.stats, BuffStat::Defense),
        }
    }
}

/// What a resolved hit does to its target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HitEffect {
    Damage,
    Heal,
    /// Immune: the hit landed but changed nothing.
    Nullified,
    /// Support skills: statuses and buffs only.
    NoChange,
}

/// Outcome of one damage computation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageOutcome {
    pub amount: u32,
    pub effect: HitEffect,
    pub affinity: Affinity,
    pub critical: bool,
}

impl DamageOutcome {
    pub fn is_weakness(&self) -> bool {
        self.affinity == Affinity::Weak && self.effect == HitEffect::Damage
    }

    /// Scales a damaging amount by a percent multiplier (technical, baton pass, guard).
    pub fn scaled(mut self, percent: u32) -> Self {
        if matches!(self.effect, HitEffect::Damage | HitEffect::Heal) {
            let scaled = (self.amount as u64 * percent as u64 / 100) as u32;
            self.amount = scaled.max(1);
        }
        self
    }
}

/// Computes damage or healing of `skill` from `attacker` onto `defender`.
///
/// `variance` is a percent factor (100 = none) drawn by the caller; it is
/// ignored by formulas without variance and by non-formula kinds.
pub fn calculate(
    formula: DamageFormula,
    attacker: &Combatant<'_>,
    defender: &Combatant<'_>,
    skill: &SkillData,
    is_critical: bool,
    variance: u32,
    config: &BattleConfig,
) -> DamageOutcome {
    let global = config.global_multiplier as f64 / 100.0;

    match skill.damage_kind {
        DamageKind::Support => DamageOutcome {
            amount: 0,
            effect: HitEffect::NoChange,
            affinity: Affinity::Normal,
            critical: false,
        },
        DamageKind::Recovery => {
            let magic = attacker.offense(DamageKind::Recovery) as f64;
            let amount = (skill.power as f64 * (100.0 + magic) / 100.0 * global).floor() as u32;
            DamageOutcome {
                amount: amount.max(1),
                effect: HitEffect::Heal,
                affinity: Affinity::Normal,
                critical: false,
            }
        }
        DamageKind::Fixed | DamageKind::Percentage => {
            let affinity = match defender.affinities.get(skill.element) {
                nullifying @ (Affinity::Immune | Affinity::Absorb) => nullifying,
                _ => Affinity::Normal,
            };
            let base = if skill.damage_kind == DamageKind::Fixed {
                skill.power as f64
            } else {
                (defender.stats.max_hp as f64 * skill.power as f64 / 100.0).round()
            };
            finish(base * global, affinity, false)
        }
        DamageKind::Physical | DamageKind::Magical => {
            let affinity = defender.affinities.get(skill.element);
            let mut amount = formula.base(
                attacker.offense(skill.damage_kind),
                defender.defense(skill.damage_kind),
                skill.power,
                attacker.stats.level,
                defender.stats.level,
            );

            if formula.has_variance() {
                amount *= variance as f64 / 100.0;
            }

            amount *= match affinity {
                Affinity::Weak => config.weakness_multiplier as f64 / 100.0,
                Affinity::Resist => config.resist_multiplier as f64 / 100.0,
                Affinity::Immune => 0.0,
                Affinity::Normal | Affinity::Absorb => 1.0,
            };

            if is_critical {
                amount *= config.crit_multiplier as f64 / 100.0;
            }

            finish(amount * global, affinity, is_critical)
        }
    }
}

fn finish(amount: f64, affinity: Affinity, critical: bool) -> DamageOutcome {
    if affinity == Affinity::Immune {
        return DamageOutcome {
            amount: 0,
            effect: HitEffect::Nullified,
            affinity,
            critical,
        };
    }

    let amount = (amount.max(0.0).floor() as u32).max(1);
    let effect = if affinity == Affinity::Absorb {
        HitEffect::Heal
    } else {
        HitEffect::Damage
    };

    DamageOutcome {
        amount,
        effect,
        affinity,
        critical,
    }
}
