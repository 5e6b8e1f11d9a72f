use core::time::Duration;

/// Global upper bound on any combatant's maximum SP.
pub const SP_CAP: u32 = 9;

/// Battle configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    /// Upper bound on SP for this battle. Loaders clamp authored `max_sp` to
    /// it and basic-attack SP gains stop at it. Values above [`SP_CAP`] are
    /// clamped.
    pub sp_cap: u32,

    /// SP granted to the actor at the end of a basic attack.
    pub basic_attack_sp_gain: u32,

    /// Timing used by combatants that do not author their own.
    pub default_timing: ActionTiming,

    /// Balance parameters for the damage resolver.
    pub damage: DamageParams,
}

impl BattleConfig {
    pub const DEFAULT_BASIC_ATTACK_SP_GAIN: u32 = 1;

    pub fn new() -> Self {
        Self {
            sp_cap: SP_CAP,
            basic_attack_sp_gain: Self::DEFAULT_BASIC_ATTACK_SP_GAIN,
            default_timing: ActionTiming::default(),
            damage: DamageParams::default(),
        }
    }

    /// Effective SP cap, never above [`SP_CAP`].
    pub fn sp_cap(&self) -> u32 {
        self.sp_cap.min(SP_CAP)
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Windup and recover delays framing an action's impact moment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionTiming {
    pub windup_ms: u64,
    pub recover_ms: u64,
}

impl ActionTiming {
    pub const DEFAULT_WINDUP_MS: u64 = 350;
    pub const DEFAULT_RECOVER_MS: u64 = 250;

    pub const fn new(windup_ms: u64, recover_ms: u64) -> Self {
        Self {
            windup_ms,
            recover_ms,
        }
    }

    /// Timing with no delays, handy for tests and instant simulations.
    pub const fn instant() -> Self {
        Self::new(0, 0)
    }

    pub const fn windup(&self) -> Duration {
        Duration::from_millis(self.windup_ms)
    }

    pub const fn recover(&self) -> Duration {
        Duration::from_millis(self.recover_ms)
    }
}

impl Default for ActionTiming {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WINDUP_MS, Self::DEFAULT_RECOVER_MS)
    }
}

/// Balance parameters consumed by [`crate::combat::physical`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DamageParams {
    /// Defense is divided by this before being subtracted (0 disables mitigation).
    pub defense_divisor: u32,

    /// Floor applied to any hit whose raw damage is positive.
    pub minimum_damage: u32,

    /// Extra power added to basic attacks (they carry no skill power).
    pub basic_attack_power: u32,
}

impl Default for DamageParams {
    fn default() -> Self {
        Self {
            defense_divisor: 2,
            minimum_damage: 1,
            basic_attack_power: 0,
        }
    }
}
