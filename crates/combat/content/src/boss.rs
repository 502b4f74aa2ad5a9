//! Boss scaling by level.

use combat_core::Stats;

/// Full-health boss stats for `level`.
///
/// Attack climbs 2 / 6 / 10 over the first three levels and then by 5 per
/// level. Health is 1 at level 1 and `50 * level` afterwards. Level 0 is
/// treated as level 1.
pub fn boss_stats(level: u32) -> Stats {
    let level = i32::try_from(level.max(1)).unwrap_or(i32::MAX / 50);
    let attack = match level {
        1 => 2,
        2 => 6,
        3 => 10,
        _ => 10 + (level - 3).saturating_mul(5),
    };
    let health = if level == 1 { 1 } else { level.saturating_mul(50) };
    Stats::full(health, attack)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_levels_follow_the_fixed_curve() {
        assert_eq!(boss_stats(1), Stats::full(1, 2));
        assert_eq!(boss_stats(2), Stats::full(100, 6));
        assert_eq!(boss_stats(3), Stats::full(150, 10));
    }

    #[test]
    fn later_levels_scale_linearly() {
        assert_eq!(boss_stats(4), Stats::full(200, 15));
        assert_eq!(boss_stats(10), Stats::full(500, 45));
    }

    #[test]
    fn level_zero_is_level_one() {
        assert_eq!(boss_stats(0), boss_stats(1));
    }
}
