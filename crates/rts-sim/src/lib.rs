//! `rts-sim`: per-tick driver for the rts decision core.
//!
//! # Tick
//!
//! ```text
//! on_tick(input, issuer, observer):
//!   ① Units   : update every controlled unit's ActionChain with its squad's
//!               goal and group (parallel with the `parallel` feature).
//!   ② Economy : ExpansionManager::update: refineries → defense → expansions.
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the unit phase on Rayon's thread pool.            |
//! | `fx-hash`  | Uses FxHash for the per-unit chain map.                |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use rts_behavior::NoopActionFactory;
//! use rts_sim::{AgentBuilder, NoopObserver, SquadAssignments, TickInput};
//!
//! let mut agent = AgentBuilder::new().config(config).build()?;
//! agent.on_unit_created(unit, UnitType::Zealot, &NoopActionFactory)?;
//! let squads = SquadAssignments::default();
//! agent.on_tick(&TickInput { economy: ctx, squads: &squads }, &mut tasks, &mut NoopObserver);
//! ```

pub mod agent;
pub mod builder;
pub mod error;
pub mod observer;
pub mod placement;
pub mod squads;


pub use agent::{Agent, TickInput, TickSummary};
pub use builder::AgentBuilder;
pub use error::{AgentError, AgentResult};
pub use observer::{AgentObserver, NoopObserver};
pub use placement::SiteIndex;
pub use squads::SquadAssignments;
