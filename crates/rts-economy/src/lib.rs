//! `rts-economy`: the per-tick reconciliation loop.
//!
//! For each economic category the loop computes a target, subtracts the work
//! already committed through tracked tasks, and issues or cancels tasks to
//! close the gap:
//!
//! ```text
//! update(ctx, issuer)
//!   ① refineries : free geysers at mature bases   (if the build order allows)
//!   ② defense    : static defense per mining base (if the build order allows)
//!   ③ expansions : one new base while saturated   (if the build order allows)
//! ```
//!
//! The order is fixed: later categories may observe resources committed by
//! earlier ones through the issuer.
//!
//! Repeating a tick with no state change issues and cancels nothing: work
//! that is tracked but not yet started always counts against the target.

pub mod context;
pub mod manager;
pub mod tracked;


pub use context::{
    AllTech, BaseSnapshot, BuildOrderFlags, BuildingSnapshot, EconomyContext, ResourceSignals,
    TechTree,
};
pub use manager::{ExpansionManager, Outcome, ReconcileReport};
pub use tracked::{Commitment, TrackedTasks};
