//! Post-solve sanity checks on a produced cover.
//!
//! Two checks: the union of the selected coverages equals the universe, and
//! no selected candidate is removable. Failure means an accounting bug in
//! the search, never a user error, and surfaces as
//! [`CoverError::InvariantViolation`]. Global optimality is guaranteed by
//! the search's exhaustiveness, not re-proved here.

use bit_set::BitSet;

use crate::error::{CoverError, CoverResult};
use crate::model::ProblemModel;
use crate::search::Cover;

/// Validate a cover against its model.
pub fn validate_cover(model: &ProblemModel, cover: &Cover) -> CoverResult<()> {
    let m = model.universe_size();
    for &i in &cover.selected {
        if i >= model.num_candidates() {
            return Err(CoverError::InvariantViolation(format!(
                "cover references candidate {i}, but the model has {}",
                model.num_candidates()
            )));
        }
    }
    let mut union = BitSet::with_capacity(m);
    for &i in &cover.selected {
        union.union_with(model.coverage(i));
    }
    if union.len() != m {
        let hole = (0..m).find(|j| !union.contains(*j)).unwrap_or(m);
        return Err(CoverError::InvariantViolation(format!(
            "cover of size {} leaves element {hole} uncovered",
            cover.len()
        )));
    }
    // Minimality spot check: dropping any one selection must leave a hole.
    for &skip in &cover.selected {
        let mut rest = BitSet::with_capacity(m);
        for &i in &cover.selected {
            if i != skip {
                rest.union_with(model.coverage(i));
            }
        }
        if rest.len() == m {
            return Err(CoverError::InvariantViolation(format!(
                "candidate {skip} is redundant in a cover claimed minimal"
            )));
        }
    }
    Ok(())
}
