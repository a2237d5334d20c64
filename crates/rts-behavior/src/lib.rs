//! `rts-behavior`: per-unit tactical action chains.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                      |
//! |----------------|---------------------------------------------------------------|
//! | [`context`]    | `Goal`, `UnitGroup`: read-only squad context for one tick    |
//! | [`action`]     | `TacticalAction` trait, `BoundUnit`, `Completion`, built-ins  |
//! | [`factory`]    | `ActionKind`, `ActionFactory`, `NoopActionFactory`            |
//! | [`priorities`] | Default chain policy and first-priority target sets           |
//! | [`chain`]      | `ActionChain`: priority dispatch, reaping, detach            |
//!
//! # Design notes
//!
//! Each tick every controlled unit's chain is offered the tick once:
//!
//! 1. **Dispatch**: actions are asked in priority order; the first one that
//!    reports "handled" owns the unit for this tick and the rest are skipped.
//! 2. **Reap**: every action reporting `has_ended()` is dropped, whether or
//!    not it ran this tick.
//!
//! Chains share nothing mutable with each other, so the driver may update
//! them in any order (or in parallel).  That is why `TacticalAction` is
//! `Send`.

pub mod action;
pub mod chain;
pub mod context;
pub mod factory;
pub mod priorities;

#[cfg(test)]
mod tests;

pub use action::{BoundUnit, Completion, ForcedRetreat, PassiveAction, TacticalAction};
pub use chain::ActionChain;
pub use context::{Goal, GoalKind, UnitGroup};
pub use factory::{ActionFactory, ActionKind, NoopActionFactory};
pub use priorities::{TargetPriorities, default_actions, first_targets};
