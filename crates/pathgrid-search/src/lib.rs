//! **pathgrid-search** — Best-first search over occupancy grids.
//!
//! This crate implements the informed-search core of the *pathgrid*
//! workspace: a [`Search`] is configured once with a grid, endpoints, and
//! three pluggable strategies, then driven to a terminal outcome.
//!
//! - [`Heuristic`] — the remaining-cost estimate (Manhattan / Euclidean)
//! - [`MoveSet`] / [`MoveOrder`] — legal transitions and their enumeration
//!   order (4-way / 8-way, fixed / shuffled)
//! - [`EvalPolicy`] — how cost-so-far and estimate combine into the
//!   frontier ordering key
//!
//! # Evaluation policies
//!
//! | Policy | Score | Behavior |
//! |---|---|---|
//! | [`EvalPolicy::Greedy`] | `h` | fast, not guaranteed optimal |
//! | [`EvalPolicy::AStar`] | `g + h` | optimal for admissible heuristics |
//! | [`EvalPolicy::Weighted`] | `α·g + β·h` | tunable blend of the two |
//!
//! Ties between equal scores resolve in FIFO insertion order, so runs
//! without shuffled move order are fully deterministic.
//!
//! ```
//! use pathgrid_core::{Grid, Point};
//! use pathgrid_search::{Search, SearchConfig, SearchOutcome};
//!
//! let grid = Grid::parse("...\n.#.\n...").unwrap();
//! let mut search = Search::new(
//!     &grid,
//!     Point::new(0, 0),
//!     Point::new(2, 2),
//!     SearchConfig::default(),
//! )
//! .unwrap();
//! match search.run() {
//!     SearchOutcome::Succeeded { cost, .. } => assert_eq!(cost, 4.0),
//!     SearchOutcome::Exhausted => unreachable!(),
//! }
//! ```

mod bestfirst;
mod bfs;
mod heuristic;
mod moves;
mod policy;
mod search;

pub use bfs::bfs_distance;
pub use heuristic::{Heuristic, euclidean, manhattan};
pub use moves::{MoveOrder, MoveSet, Step};
pub use policy::EvalPolicy;
pub use search::{ConfigError, Search, SearchConfig, SearchOutcome, SearchState};
