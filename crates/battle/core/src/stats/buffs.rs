//! Timed percentage modifiers (buffs and debuffs).
//!
//! Each stat carries at most one entry. Re-applying adds the new delta to the
//! running total and resets the duration to the new application's duration.

use std::collections::BTreeMap;

use super::CharacterStats;

/// Stats that buffs can modify.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum BuffStat {
    Attack,
    Defense,
    MagicAttack,
    MagicDefense,
    Speed,
}

/// A buff carried by a skill definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuffDelta {
    pub stat: BuffStat,
    /// Percent points, negative for debuffs.
    pub percent: i32,
    pub duration: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuffEntry {
    pub percent: i32,
    pub remaining_turns: u8,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuffLedger {
    entries: BTreeMap<BuffStat, BuffEntry>,
}

impl BuffLedger {
    pub const MIN_PERCENT: i32 = -90;
    pub const MAX_PERCENT: i32 = 200;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, delta: BuffDelta) {
        if delta.duration == 0 {
            return;
        }
        let entry = self.entries.entry(delta.stat).or_insert(BuffEntry {
            percent: 0,
            remaining_turns: 0,
        });
        entry.percent =
            (entry.percent + delta.percent).clamp(Self::MIN_PERCENT, Self::MAX_PERCENT);
        entry.remaining_turns = delta.duration;
    }

    pub fn percent(&self, stat: BuffStat) -> i32 {
        self.entries.get(&stat).map(|e| e.percent).unwrap_or(0)
    }

    pub fn get(&self, stat: BuffStat) -> Option<&BuffEntry> {
        self.entries.get(&stat)
    }

    /// Scales a base value by the active modifier for `stat`, never below 1.
    pub fn modify(&self, stat: BuffStat, base: u32) -> u32 {
        let percent = 100 + self.percent(stat);
        ((base as i64 * percent as i64) / 100).max(1) as u32
    }

    /// Effective value of a stat on the given stat block.
    pub fn effective(&self, stats: &CharacterStats, stat: BuffStat) -> u32 {
        let base = match stat {
            BuffStat::Attack => stats.attack,
            BuffStat::Defense => stats.defense,
            BuffStat::MagicAttack => stats.magic_attack,
            BuffStat::MagicDefense => stats.magic_defense,
            BuffStat::Speed => stats.speed,
        };
        self.modify(stat, base)
    }

    /// Decrements every entry once; returns the stats whose modifiers ended.
    pub fn tick_turn_end(&mut self) -> Vec<BuffStat> {
        let mut expired = Vec::new();
        for (stat, entry) in self.entries.iter_mut() {
            entry.remaining_turns = entry.remaining_turns.saturating_sub(1);
            if entry.remaining_turns == 0 {
                expired.push(*stat);
            }
        }
        self.entries.retain(|_, e| e.remaining_turns > 0);
        expired
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
