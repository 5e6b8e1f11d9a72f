//! Runtime orchestration for battles.
//!
//! `battle-core` tasks never keep time; this crate supplies the external
//! scheduler that elapses their waits, and composes them into whole turns
//! and battles.
//!
//! Modules are organized by responsibility:
//! - [`scheduler`] drives any [`battle_core::Task`] on a virtual or tokio clock
//! - [`turn`] chains menu, target selection and sequencing into a player turn
//! - [`battle`] runs the round loop with per-side controllers
//! - [`presentation`] adapts hooks and resource notifications to `tracing`
//! - [`config`] and [`error`] are the runtime's configuration and failures
pub mod battle;
pub mod config;
pub mod context;
pub mod error;
pub mod presentation;
pub mod scheduler;
pub mod turn;

pub use battle::{
    Battle, BattleOutcome, Controller, Decision, GuardController, MAX_CANCELLED_TURNS, TurnRecord,
};
pub use config::RuntimeConfig;
pub use context::TurnContext;
pub use error::{Result, RuntimeError};
pub use presentation::{ResourceLogger, TracingPresentation, attach_resource_logging};
pub use scheduler::{RealtimeScheduler, SchedulerStats, VirtualScheduler};
pub use turn::{PlayerTurn, TurnOutcome, target_side};
