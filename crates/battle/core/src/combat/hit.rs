//! Accuracy and critical-hit checks.

/// Hit chance in percent for a skill accuracy against attacker/defender speed.
///
/// # Formula
///
/// ```text
/// hit_chance = accuracy + (attacker_speed - defender_speed) / 5
/// clamped to [5, 99]
/// ```
///
/// Skills with accuracy of 100 or more never miss.
pub fn calculate_hit_chance(accuracy: u32, attacker_speed: u32, defender_speed: u32) -> u32 {
    if accuracy >= 100 {
        return 100;
    }
    let speed_diff = (attacker_speed as i64 - defender_speed as i64) / 5;
    (accuracy as i64 + speed_diff).clamp(5, 99) as u32
}

/// Check if a hit lands given a d100 roll (1-100).
pub fn check_hit(accuracy: u32, attacker_speed: u32, defender_speed: u32, roll: u32) -> bool {
    roll <= calculate_hit_chance(accuracy, attacker_speed, defender_speed)
}

/// Check for a critical hit given the skill's crit rate and a d100 roll.
pub fn check_critical(crit_rate: u32, roll: u32) -> bool {
    crit_rate > 0 && roll <= crit_rate
}

/// Effective status infliction chance after resistance.
///
/// Resistance caps the chance: `min(chance, 100 - resistance)`.
pub fn infliction_chance(chance: u32, resistance: u32) -> u32 {
    chance.min(100u32.saturating_sub(resistance))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sure_hit_ignores_speed() {
        assert_eq!(calculate_hit_chance(100, 1, 999), 100);
        assert!(check_hit(100, 1, 999, 100));
    }

    #[test]
    fn speed_shifts_and_clamps() {
        assert_eq!(calculate_hit_chance(90, 30, 10), 94);
        assert_eq!(calculate_hit_chance(90, 10, 30), 86);
        assert_eq!(calculate_hit_chance(90, 500, 0), 99);
        assert_eq!(calculate_hit_chance(10, 0, 500), 5);
    }

    #[test]
    fn critical_needs_positive_rate() {
        assert!(!check_critical(0, 1));
        assert!(check_critical(10, 10));
        assert!(!check_critical(10, 11));
    }

    #[test]
    fn resistance_caps_infliction() {
        assert_eq!(infliction_chance(80, 0), 80);
        assert_eq!(infliction_chance(80, 50), 50);
        assert_eq!(infliction_chance(80, 100), 0);
    }
}
