//! Round-scoped coordination between AI members of the same side.
//!
//! Members claim the opponent they attack and the ally they heal; later
//! deciders in the same round see the claims and spread out instead of
//! overkilling one target or double-healing one ally.

use std::collections::BTreeMap;

use battle_core::{MemberId, Side};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CoordinationBoard {
    round: u32,
    /// target -> (claimer, claimer's side)
    attacks: BTreeMap<MemberId, (MemberId, Side)>,
    heals: BTreeMap<MemberId, (MemberId, Side)>,
}

impl CoordinationBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears every claim when a new round starts.
    pub fn begin_round(&mut self, round: u32) {
        self.round = round;
        self.attacks.clear();
        self.heals.clear();
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn claim_attack(&mut self, target: MemberId, by: MemberId, side: Side) {
        self.attacks.entry(target).or_insert((by, side));
    }

    pub fn claim_heal(&mut self, ally: MemberId, by: MemberId, side: Side) {
        self.heals.entry(ally).or_insert((by, side));
    }

    /// Whether another member of `side` already attacks `target` this round.
    pub fn attack_claimed(&self, target: MemberId, me: MemberId, side: Side) -> bool {
        Self::claimed_by_other(&self.attacks, target, me, side)
    }

    /// Whether another member of `side` already heals `ally` this round.
    pub fn heal_claimed(&self, ally: MemberId, me: MemberId, side: Side) -> bool {
        Self::claimed_by_other(&self.heals, ally, me, side)
    }

    fn claimed_by_other(
        claims: &BTreeMap<MemberId, (MemberId, Side)>,
        target: MemberId,
        me: MemberId,
        side: Side,
    ) -> bool {
        claims
            .get(&target)
            .is_some_and(|(by, claimer_side)| *by != me && *claimer_side == side)
    }
}
