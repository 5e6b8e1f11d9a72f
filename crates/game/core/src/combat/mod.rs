//! Numeric effect resolution.
//!
//! This module provides pure functions for resolving combat numbers.
//! Nothing here suspends or touches combatant state.
//!
//! # Core Functions
//!
//! - `physical`: Damage from attacker/defender stats with optional power override
//! - `heal_amount`: Flat or percent-of-max-HP healing

pub mod damage;

pub use damage::{heal_amount, physical};
