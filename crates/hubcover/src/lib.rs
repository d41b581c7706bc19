//! Exact minimum set cover for facility siting.
//!
//! Given a pairwise distance matrix and a service range, threshold the
//! distances into a binary coverage relation, then find a smallest family of
//! candidate hubs covering every demand point — exactly, by branch-and-bound
//! with admissible pruning bounds, not by a greedy approximation and not by
//! handing the integer program to an external solver.
//!
//! Pipeline: `CoverageMatrix::from_distances` → `ProblemModel::from_coverage`
//! → `search::solve` (consulting `bounds`) → validated `Cover`.

pub mod bounds;
pub mod coverage;
pub mod error;
pub mod model;
pub mod search;
pub mod synth;
pub mod validate;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::bounds::BoundStrategy;
    pub use crate::coverage::CoverageMatrix;
    pub use crate::error::{CoverError, CoverResult};
    pub use crate::model::{CandidateSet, ProblemModel};
    pub use crate::search::{cover_within_range, solve, solve_with_defaults};
    pub use crate::search::{CancelToken, Cover, SolveCfg};
    pub use crate::validate::validate_cover;
}
