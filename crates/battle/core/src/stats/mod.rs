//! Runtime stat blocks.
//!
//! [`CharacterStats`] is the mutable record owned by one battle member.
//! [`BuffLedger`] layers timed percentage modifiers on top of it; equipment
//! arrives once as flat [`StatModifiers`] when the member is created.

pub mod buffs;
pub mod character;

pub use buffs::{BuffDelta, BuffEntry, BuffLedger, BuffStat};
pub use character::{CharacterStats, StatModifiers};
