//! Battle state: combatants, their resources and the roster that owns them.
//!
//! Combatants are owned by a [`Roster`] and referenced everywhere else by
//! [`CombatantId`]. Sequencers and selectors borrow the roster for the
//! duration of a single tick only.
pub mod combatant;
pub mod inventory;
pub mod observer;
pub mod roster;
pub mod status;

use std::fmt;

pub use combatant::{CombatStats, Combatant};
pub use inventory::{Inventory, ItemStack};
pub use observer::{ResourceChanged, ResourceKind, ResourceObserver, SubscriptionId};
pub use roster::Roster;
pub use status::StatusSet;

/// Unique identifier for a combatant within a roster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantId(pub u32);

impl CombatantId {
    /// Placeholder carried by combatants that have not joined a roster yet.
    pub const UNASSIGNED: Self = Self(u32::MAX);
}

impl fmt::Display for CombatantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which team a combatant fights for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Party,
    Enemy,
}

impl Side {
    pub const fn opponent(self) -> Self {
        match self {
            Side::Party => Side::Enemy,
            Side::Enemy => Side::Party,
        }
    }
}

/// Integer resource meter (health, skill points) tracked per combatant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    pub current: u32,
    pub maximum: u32,
}

impl ResourceMeter {
    /// Creates a meter, clamping `current` to `maximum`.
    pub fn new(current: u32, maximum: u32) -> Self {
        Self {
            current: current.min(maximum),
            maximum,
        }
    }

    pub fn full(maximum: u32) -> Self {
        Self::new(maximum, maximum)
    }

    /// Stores `value` clamped into `[0, maximum]` and returns the previous value.
    pub fn set_clamped(&mut self, value: i64) -> u32 {
        let previous = self.current;
        self.current = value.clamp(0, i64::from(self.maximum)) as u32;
        previous
    }
}
