//! `rts-core`: foundational types for the rts reconciliation core.
//!
//! This crate is a dependency of every other `rts-*` crate.  It intentionally
//! has no `rts-*` dependencies and minimal external ones (only `thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `UnitId`, `BaseId`, `TaskId`                          |
//! | [`time`]        | `Tick`                                                |
//! | [`position`]    | `Position` (build-tile coordinates)                   |
//! | [`race`]        | `Race`                                                |
//! | [`unit_type`]   | `UnitType` capability and build metadata              |
//! | [`config`]      | `AgentConfig`                                         |
//! | [`error`]       | `RtsError`, `RtsResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod ids;
pub mod position;
pub mod race;
pub mod time;
pub mod unit_type;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::AgentConfig;
pub use error::{RtsError, RtsResult};
pub use ids::{BaseId, TaskId, UnitId};
pub use position::Position;
pub use race::Race;
pub use time::Tick;
pub use unit_type::UnitType;
