//! Behaviour strategy table.
//!
//! Each [`BehaviorType`] maps to one [`Strategy`]: a row of category weights
//! that feed the `personality` component of every candidate's [`Score`].
//!
//! | Behaviour  | Damage | Weakness | Technical | Heal | Buff | Guard | Escape | Jitter |
//! |------------|--------|----------|-----------|------|------|-------|--------|--------|
//! | Tactical   | 60     | 100      | 100       | 40   | 60   | 20    | 0      | 5      |
//! | Defensive  | 50     | 60       | 50        | 90   | 70   | 80    | 0      | 5      |
//! | Balanced   | 70     | 70       | 60        | 60   | 50   | 30    | 0      | 10     |
//! | Supportive | 40     | 50       | 40        | 100  | 90   | 40    | 0      | 5      |
//! | Berserk    | 100    | 40       | 20        | 10   | 20   | 0     | 0      | 60     |
//! | Cowardly   | 50     | 50       | 40        | 70   | 40   | 60    | 100    | 10     |
//!
//! [`Score`]: super::Score

use battle_core::BehaviorType;

/// Candidate categories the strategy table weighs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Intent {
    Damage,
    Heal,
    Buff,
    Guard,
    Escape,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Strategy {
    pub behavior: BehaviorType,
    pub damage: u32,
    /// Bonus points for a known weakness.
    pub weakness: u32,
    /// Bonus points for completing a technical.
    pub technical: u32,
    pub heal: u32,
    pub buff: u32,
    pub guard: u32,
    pub escape: u32,
    /// Upper bound of the random modifier jitter.
    pub randomness: u32,
}

const fn row(behavior: BehaviorType, weights: [u32; 8]) -> Strategy {
    Strategy {
        behavior,
        damage: weights[0],
        weakness: weights[1],
        technical: weights[2],
        heal: weights[3],
        buff: weights[4],
        guard: weights[5],
        escape: weights[6],
        randomness: weights[7],
    }
}

static STRATEGIES: [Strategy; 6] = [
    row(BehaviorType::Tactical, [60, 100, 100, 40, 60, 20, 0, 5]),
    row(BehaviorType::Defensive, [50, 60, 50, 90, 70, 80, 0, 5]),
    row(BehaviorType::Balanced, [70, 70, 60, 60, 50, 30, 0, 10]),
    row(BehaviorType::Supportive, [40, 50, 40, 100, 90, 40, 0, 5]),
    row(BehaviorType::Berserk, [100, 40, 20, 10, 20, 0, 0, 60]),
    row(BehaviorType::Cowardly, [50, 50, 40, 70, 40, 60, 100, 10]),
];

impl Strategy {
    pub fn for_behavior(behavior: BehaviorType) -> &'static Strategy {
        STRATEGIES
            .iter()
            .find(|strategy| strategy.behavior == behavior)
            .unwrap_or(&STRATEGIES[2])
    }

    pub fn weight(&self, intent: Intent) -> u32 {
        match intent {
            Intent::Damage => self.damage,
            Intent::Heal => self.heal,
            Intent::Buff => self.buff,
            Intent::Guard => self.guard,
            Intent::Escape => self.escape,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn every_behavior_has_a_row() {
        for behavior in BehaviorType::iter() {
            assert_eq!(Strategy::for_behavior(behavior).behavior, behavior);
        }
    }

    #[test]
    fn only_cowardly_flees() {
        for behavior in BehaviorType::iter() {
            let flees = Strategy::for_behavior(behavior).weight(Intent::Escape) > 0;
            assert_eq!(flees, behavior == BehaviorType::Cowardly);
        }
    }
}
