//! Simulation rules for the cryptfield engine.
//!
//! Each rule is a small, stateless value built with a builder and
//! applied to borrowed state, with randomness threaded in explicitly:
//!
//! 1. [`CryptoDiffusion`]: in-place stochastic growth and ignition of
//!    the fine resource grid.
//! 2. [`PathFieldSolver`]: worklist label-correcting relaxation of a
//!    cost field over the aggregate grid, one attractor at a time.
//! 3. [`MovementPolicy`]: one greedy step down an attractor's cost
//!    field, with coin-flip tie breaking and optional exploration.
//! 4. [`HarvestMode`]: what an agent does to the resource under it.
//! 5. [`SpawnPolicy`]: new agents on a configured edge, sent to a
//!    popularity-weighted attractor.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod diffusion;
pub mod harvest;
pub mod movement;
pub mod path_field;
pub mod spawn;

pub use diffusion::{CryptoDiffusion, DiffusionStats};
pub use harvest::HarvestMode;
pub use movement::MovementPolicy;
pub use path_field::{PathField, PathFieldSolver, SolveStats};
pub use spawn::{SpawnEdge, SpawnPlan, SpawnPolicy};
