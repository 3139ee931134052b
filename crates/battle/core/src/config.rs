use crate::combat::DamageFormula;
use crate::status::StatusReapply;

/// Battle configuration constants and tunable parameters.
///
/// Multipliers are expressed in percent (150 = ×1.5) so that every rule stays
/// in integer arithmetic except the formula curves themselves.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    /// Damage multiplier applied on a Weak affinity hit (percent).
    pub weakness_multiplier: u32,
    /// Damage multiplier applied on a Resist affinity hit (percent).
    pub resist_multiplier: u32,
    /// Multiplier applied to critical hits after affinity scaling (percent).
    pub crit_multiplier: u32,
    /// Multiplier applied to every damage and healing amount (percent).
    pub global_multiplier: u32,
    /// Formula used by skills that do not select one.
    pub default_formula: DamageFormula,
    /// Forces every skill to use this formula regardless of its own selection.
    pub formula_override: Option<DamageFormula>,
    /// Half-width of the random damage band for formulas with variance (percent).
    pub variance_percent: u32,
    /// Incoming damage factor while guarding (percent).
    pub guard_damage_factor: u32,
    /// Maximum One More grants per member per round.
    pub max_one_more_per_round: u8,
    /// Baton pass multiplier step per pass (percent). `1 + count × step`.
    pub baton_pass_step: u32,
    /// All-Out Attack power relative to the summed party attack (percent).
    pub all_out_power: u32,
    /// Half-width of the All-Out Attack damage band (percent).
    pub all_out_variance_percent: u32,
    /// Whether critical hits knock the target down.
    pub knockdown_on_critical: bool,
    /// What happens when a status is applied to a member that already has it.
    pub status_reapply: StatusReapply,
    /// Lower bound for escape chance (percent).
    pub escape_min_chance: u32,
    /// Upper bound for escape chance (percent).
    pub escape_max_chance: u32,
}

impl BattleConfig {
    // ===== compile-time constants used as type parameters =====
    pub const MAX_STATUS_EFFECTS: usize = 8;
    pub const MAX_HITS: u8 = 8;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_WEAKNESS_MULTIPLIER: u32 = 150;
    pub const DEFAULT_RESIST_MULTIPLIER: u32 = 50;
    pub const DEFAULT_CRIT_MULTIPLIER: u32 = 150;
    pub const DEFAULT_VARIANCE_PERCENT: u32 = 5;
    pub const DEFAULT_GUARD_FACTOR: u32 = 50;
    pub const DEFAULT_MAX_ONE_MORE: u8 = 1;
    pub const DEFAULT_BATON_PASS_STEP: u32 = 50;
    pub const DEFAULT_ALL_OUT_POWER: u32 = 150;
    pub const DEFAULT_ALL_OUT_VARIANCE: u32 = 25;

    pub fn new() -> Self {
        Self {
            weakness_multiplier: Self::DEFAULT_WEAKNESS_MULTIPLIER,
            resist_multiplier: Self::DEFAULT_RESIST_MULTIPLIER,
            crit_multiplier: Self::DEFAULT_CRIT_MULTIPLIER,
            global_multiplier: 100,
            default_formula: DamageFormula::Simple,
            formula_override: None,
            variance_percent: Self::DEFAULT_VARIANCE_PERCENT,
            guard_damage_factor: Self::DEFAULT_GUARD_FACTOR,
            max_one_more_per_round: Self::DEFAULT_MAX_ONE_MORE,
            baton_pass_step: Self::DEFAULT_BATON_PASS_STEP,
            all_out_power: Self::DEFAULT_ALL_OUT_POWER,
            all_out_variance_percent: Self::DEFAULT_ALL_OUT_VARIANCE,
            knockdown_on_critical: true,
            status_reapply: StatusReapply::Refresh,
            escape_min_chance: 5,
            escape_max_chance: 95,
        }
    }

    /// Selects the formula a skill resolves with.
    ///
    /// The global override wins over the skill's own choice.
    pub fn formula_for(&self, skill_formula: Option<DamageFormula>) -> DamageFormula {
        self.formula_override
            .or(skill_formula)
            .unwrap_or(self.default_formula)
    }

    /// Structural validation used by loaders and the battle builder.
    pub fn validate(&self) -> Result<(), String> {
        if self.escape_max_chance > 100 {
            return Err(format!(
                "escape_max_chance {} is above 100",
                self.escape_max_chance
            ));
        }
        if self.escape_min_chance > self.escape_max_chance {
            return Err(format!(
                "escape_min_chance {} exceeds escape_max_chance {}",
                self.escape_min_chance, self.escape_max_chance
            ));
        }
        Ok(())
    }

    /// Replaces invalid escape bounds with the defaults.
    pub fn with_default_escape_bounds(mut self) -> Self {
        let defaults = Self::new();
        self.escape_min_chance = defaults.escape_min_chance;
        self.escape_max_chance = defaults.escape_max_chance;
        self
    }

    /// Baton pass damage multiplier (percent) for the given pass count.
    pub fn baton_pass_multiplier(&self, pass_count: u8) -> u32 {
        100 + pass_count as u32 * self.baton_pass_step
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baton_pass_multiplier_grows_with_pass_count() {
        let config = BattleConfig::default();
        assert_eq!(config.baton_pass_multiplier(0), 100);
        assert_eq!(config.baton_pass_multiplier(1), 150);
        assert_eq!(config.baton_pass_multiplier(2), 200);

        let mut previous = 0;
        for count in 0..8 {
            let current = config.baton_pass_multiplier(count);
            assert!(current >= previous);
            previous = current;
        }
    }

    #[test]
    fn escape_bounds_must_be_ordered() {
        assert!(BattleConfig::default().validate().is_ok());

        let inverted = BattleConfig {
            escape_min_chance: 90,
            escape_max_chance: 10,
            ..BattleConfig::default()
        };
        assert!(inverted.validate().unwrap_err().contains("escape_min_chance"));

        let repaired = inverted.with_default_escape_bounds();
        assert!(repaired.validate().is_ok());
        assert_eq!(repaired.escape_min_chance, 5);
        assert_eq!(repaired.escape_max_chance, 95);

        let over = BattleConfig {
            escape_max_chance: 120,
            ..BattleConfig::default()
        };
        assert!(over.validate().is_err());
    }

    #[test]
    fn override_beats_skill_formula() {
        let mut config = BattleConfig::default();
        assert_eq!(
            config.formula_for(Some(DamageFormula::Classic)),
            DamageFormula::Classic
        );
        assert_eq!(config.formula_for(None), DamageFormula::Simple);

        config.formula_override = Some(DamageFormula::Saturating);
        assert_eq!(
            config.formula_for(Some(DamageFormula::Classic)),
            DamageFormula::Saturating
        );
    }
}
