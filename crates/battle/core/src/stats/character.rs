/// Mutable combat stats of one battle member.
///
/// Current HP/MP are always kept within `[0, max]` by the mutators below;
/// fields are public for templates and tests, so callers that write them
/// directly must call [`CharacterStats::clamp`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterStats {
    pub level: u32,
    pub hp: u32,
    pub max_hp: u32,
    pub mp: u32,
    pub max_mp: u32,
    pub attack: u32,
    pub defense: u32,
    pub magic_attack: u32,
    pub magic_defense: u32,
    pub speed: u32,
}

impl CharacterStats {
    /// Creates stats at full HP/MP.
    pub fn new(level: u32, max_hp: u32, max_mp: u32) -> Self {
        Self {
            level,
            hp: max_hp,
            max_hp,
            mp: max_mp,
            max_mp,
            attack: 10,
            defense: 10,
            magic_attack: 10,
            magic_defense: 10,
            speed: 10,
        }
    }

    pub fn with_offense(mut self, attack: u32, magic_attack: u32) -> Self {
        self.attack = attack;
        self.magic_attack = magic_attack;
        self
    }

    pub fn with_defense(mut self, defense: u32, magic_defense: u32) -> Self {
        self.defense = defense;
        self.magic_defense = magic_defense;
        self
    }

    pub fn with_speed(mut self, speed: u32) -> Self {
        self.speed = speed;
        self
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// HP as a percentage of max HP (0-100).
    pub fn hp_ratio(&self) -> u32 {
        if self.max_hp == 0 {
            return 0;
        }
        ((self.hp as u64 * 100) / self.max_hp as u64) as u32
    }

    /// MP as a percentage of max MP (0-100). Members without MP report 100.
    pub fn mp_ratio(&self) -> u32 {
        if self.max_mp == 0 {
            return 100;
        }
        ((self.mp as u64 * 100) / self.max_mp as u64) as u32
    }

    /// Reduces HP, clamped at zero. Returns the HP actually lost.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.hp);
        self.hp -= lost;
        lost
    }

    /// Restores HP, clamped at max. Returns the HP actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let restored = amount.min(self.max_hp - self.hp.min(self.max_hp));
        self.hp += restored;
        restored
    }

    /// Sets HP from zero for revival effects.
    pub fn revive(&mut self, percent: u32) {
        if self.hp == 0 {
            let amount = ((self.max_hp as u64 * percent.min(100) as u64) / 100).max(1) as u32;
            self.hp = amount.min(self.max_hp);
        }
    }

    pub fn restore_mp(&mut self, amount: u32) -> u32 {
        let restored = amount.min(self.max_mp - self.mp.min(self.max_mp));
        self.mp += restored;
        restored
    }

    /// Spends MP if affordable. Returns false without mutation otherwise.
    pub fn spend_mp(&mut self, amount: u32) -> bool {
        if self.mp < amount {
            return false;
        }
        self.mp -= amount;
        true
    }

    /// Spends HP if the member would survive. Returns false without mutation otherwise.
    pub fn spend_hp(&mut self, amount: u32) -> bool {
        if self.hp <= amount {
            return false;
        }
        self.hp -= amount;
        true
    }

    /// Re-establishes the `[0, max]` invariant after direct writes.
    pub fn clamp(&mut self) {
        self.hp = self.hp.min(self.max_hp);
        self.mp = self.mp.min(self.max_mp);
    }

    /// Whether current values respect their bounds.
    pub fn is_within_bounds(&self) -> bool {
        self.hp <= self.max_hp && self.mp <= self.max_mp
    }

    /// Applies flat equipment deltas once, keeping current values proportional
    /// to their new maximums only when they were full.
    pub fn apply_modifiers(&mut self, modifiers: &StatModifiers) {
        fn add(value: u32, delta: i32, floor: u32) -> u32 {
            (value as i64 + delta as i64).max(floor as i64) as u32
        }

        let was_full_hp = self.hp == self.max_hp;
        let was_full_mp = self.mp == self.max_mp;

        self.max_hp = add(self.max_hp, modifiers.max_hp, 1);
        self.max_mp = add(self.max_mp, modifiers.max_mp, 0);
        self.attack = add(self.attack, modifiers.attack, 1);
        self.defense = add(self.defense, modifiers.defense, 1);
        self.magic_attack = add(self.magic_attack, modifiers.magic_attack, 1);
        self.magic_defense = add(self.magic_defense, modifiers.magic_defense, 1);
        self.speed = add(self.speed, modifiers.speed, 1);

        if was_full_hp {
            self.hp = self.max_hp;
        }
        if was_full_mp {
            self.mp = self.max_mp;
        }
        self.clamp();
    }
}

impl Default for CharacterStats {
    fn default() -> Self {
        Self::new(1, 100, 20)
    }
}

/// Flat additive deltas derived from equipment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StatModifiers {
    pub max_hp: i32,
    pub max_mp: i32,
    pub attack: i32,
    pub defense: i32,
    pub magic_attack: i32,
    pub magic_defense: i32,
    pub speed: i32,
}
