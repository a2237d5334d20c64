//! `rts-task`: handles to outstanding build commitments.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                         |
//! |-------------|------------------------------------------------------------------|
//! | [`task`]    | `Task` trait, `TaskState`, `TaskKind`, `BuildLocation`, `TaskHandle` |
//! | [`issuer`]  | `TaskIssuer` and `Placement` traits                              |
//! | [`manager`] | `TaskManager`: reference issuer with a resource `Bank`          |
//! | [`error`]   | `TaskError`, `TaskResult<T>`                                     |
//!
//! # Lifecycle
//!
//! ```text
//! Queued ──start──▶ InProgress ──finish──▶ Completed
//!    │                   │
//!    └──────cancel───────┴──────────────▶ Cancelled
//! ```
//!
//! `Completed` and `Cancelled` are both terminal and both report
//! [`Task::has_ended`].  Consumers only poll; nothing blocks.

pub mod error;
pub mod issuer;
pub mod manager;
pub mod task;

#[cfg(test)]
mod tests;

pub use error::{TaskError, TaskResult};
pub use issuer::{AnywherePlacement, Placement, TaskIssuer};
pub use manager::{Bank, CompletedBuild, TaskEvents, TaskManager};
pub use task::{BuildLocation, Task, TaskHandle, TaskKind, TaskState};
