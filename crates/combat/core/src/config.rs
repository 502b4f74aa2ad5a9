/// Combat configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Share of the actor's max health used as the base heal amount (percent).
    pub heal_ratio_percent: i32,
    /// Share of the actor's attack used as the base buff value (percent).
    pub buff_ratio_percent: i32,
    /// Share of the actor's attack used as the base debuff value (percent).
    pub debuff_ratio_percent: i32,
    /// Duration stamped on populated buff/debuff contexts, in rounds.
    pub status_duration: u32,
    /// How long a cosmetic marker stays visible before its clear fires.
    pub marker_lifetime_ms: u64,
}

impl CombatConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum party size.
    pub const MAX_HEROES: usize = 5;
    /// Maximum nesting of modifier pipelines triggered from inside an effect.
    pub const MAX_MODIFIER_CHAIN_DEPTH: u8 = 8;
    /// Reserved id prefix marking damage-over-time modifiers.
    pub const DOT_PREFIX: &'static str = "burn_";

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_HEAL_RATIO_PERCENT: i32 = 20;
    pub const DEFAULT_BUFF_RATIO_PERCENT: i32 = 20;
    pub const DEFAULT_DEBUFF_RATIO_PERCENT: i32 = 20;
    pub const DEFAULT_STATUS_DURATION: u32 = 3;
    pub const DEFAULT_MARKER_LIFETIME_MS: u64 = 1500;

    pub fn new() -> Self {
        Self {
            heal_ratio_percent: Self::DEFAULT_HEAL_RATIO_PERCENT,
            buff_ratio_percent: Self::DEFAULT_BUFF_RATIO_PERCENT,
            debuff_ratio_percent: Self::DEFAULT_DEBUFF_RATIO_PERCENT,
            status_duration: Self::DEFAULT_STATUS_DURATION,
            marker_lifetime_ms: Self::DEFAULT_MARKER_LIFETIME_MS,
        }
    }

    pub fn with_marker_lifetime_ms(mut self, marker_lifetime_ms: u64) -> Self {
        self.marker_lifetime_ms = marker_lifetime_ms;
        self
    }

    /// Applies an integer percentage and floors the result.
    pub(crate) fn portion(value: i32, percent: i32) -> i32 {
        (value * percent).div_euclid(100)
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}
