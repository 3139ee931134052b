//! Utility score shared by every AI candidate.
//!
//! # Score Components
//!
//! - **is_possible**: Binary feasibility (can this be done at all?)
//! - **situation**: Battle state favorability (0-100)
//! - **personality**: Strategy weight for the candidate's category (0-100)
//! - **modifier**: Capability adjustments (0-200, typically 100)
//!
//! ```text
//! final_score = is_possible × situation × personality × modifier / 10000
//! ```

/// Generic scoring result for one candidate action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    /// Can this candidate be executed at all?
    ///
    /// Examples:
    /// - Skill: known, in the pool and affordable
    /// - Escape: encounter allows it and HP is below the flee threshold
    pub is_possible: bool,

    /// Battle state favorability (0-100).
    ///
    /// Examples:
    /// - Damage: expected damage relative to the target's remaining HP
    /// - Heal: missing HP of the most wounded ally
    pub situation: u32,

    /// Strategy preference (0-100), taken from the active behaviour's weights.
    pub personality: u32,

    /// Contextual adjustment factor (0-200, typically 100).
    ///
    /// Weakness and technical exploitation, risk assessment, plan bonuses and
    /// adaptive counters all fold into this one component.
    pub modifier: u32,
}

impl Score {
    pub const MAX_MODIFIER: u32 = 200;

    pub const fn new(is_possible: bool, situation: u32, personality: u32, modifier: u32) -> Self {
        Self {
            is_possible,
            situation,
            personality,
            modifier,
        }
    }

    /// Creates an impossible score (all components zero).
    pub const fn impossible() -> Self {
        Self {
            is_possible: false,
            situation: 0,
            personality: 0,
            modifier: 0,
        }
    }

    /// Computes the final score value.
    ///
    /// Max theoretical: 100 × 100 × 200 / 10000 = 200.
    pub const fn value(&self) -> u32 {
        if !self.is_possible {
            return 0;
        }
        (self.situation * self.personality * self.modifier) / 10000
    }

    /// Scales the modifier by a percent factor, clamped to `[0, MAX_MODIFIER]`.
    pub fn scale_modifier(&mut self, percent: u32) {
        self.modifier = (self.modifier * percent / 100).min(Self::MAX_MODIFIER);
    }

    /// Adds flat points to the modifier, clamped to `MAX_MODIFIER`.
    pub fn boost_modifier(&mut self, points: u32) {
        self.modifier = (self.modifier + points).min(Self::MAX_MODIFIER);
    }
}

impl Default for Score {
    /// Neutral score: possible, mid situation, neutral modifier.
    fn default() -> Self {
        Self::new(true, 50, 50, 100)
    }
}
