//! Lower bounds and the greedy heuristic used to prune the search.
//!
//! Both strategies answer the same question for a partial solution: at least
//! how many *additional* candidates does covering the remainder take? Every
//! answer is admissible (never exceeds the true optimum), so pruning with it
//! can only discard subtrees that provably cannot improve the incumbent.
//! Bounds are never used to accept a solution as final.

use bit_set::BitSet;
use good_lp::{microlp, variable, variables, Expression, Solution, SolverModel};

use crate::model::ProblemModel;

/// Bound strategy selection.
///
/// `Greedy` is the cheap default; `LpRelaxation` solves the fractional
/// relaxation of the remaining sub-instance in process (microlp) and is
/// tighter on instances with much overlap between candidates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BoundStrategy {
    #[default]
    Greedy,
    LpRelaxation,
}

/// Elements of candidate `i` not yet covered.
fn marginal(model: &ProblemModel, i: usize, covered: &BitSet) -> usize {
    model.coverage(i).difference(covered).count()
}

/// Greedy cover of the remainder: repeatedly take the available candidate
/// with the largest marginal coverage (ties to the lowest id).
///
/// Returns the picked ids in pick order, or `None` if the available
/// candidates cannot complete the cover. The pick count is an upper bound on
/// the optimal number of additional candidates; the root call seeds the
/// search incumbent with it.
pub fn greedy_cover(
    model: &ProblemModel,
    covered: &BitSet,
    excluded: &BitSet,
) -> Option<Vec<usize>> {
    let m = model.universe_size();
    let mut covered = covered.clone();
    let mut picks = Vec::new();
    while covered.len() < m {
        let mut best = None;
        let mut best_gain = 0;
        for i in 0..model.num_candidates() {
            if excluded.contains(i) {
                continue;
            }
            let gain = marginal(model, i, &covered);
            if gain > best_gain {
                best_gain = gain;
                best = Some(i);
            }
        }
        let pick = best?; // no candidate makes progress: remainder uncoverable
        covered.union_with(model.coverage(pick));
        picks.push(pick);
    }
    Some(picks)
}

/// Lower bound on the additional candidates needed to cover the remainder.
///
/// `None` means the remainder cannot be covered by the available candidates
/// at all (the caller prunes the branch outright).
pub fn lower_bound(
    model: &ProblemModel,
    covered: &BitSet,
    excluded: &BitSet,
    strategy: BoundStrategy,
) -> Option<usize> {
    let uncovered = model.universe_size() - covered.len();
    if uncovered == 0 {
        return Some(0);
    }
    // An uncovered element whose every coverer is excluded makes the
    // remainder uncoverable, no matter what the other candidates still
    // offer. Screened here so both strategies share the prune-outright
    // signal.
    for j in 0..model.universe_size() {
        if !covered.contains(j) && model.covering(j).iter().all(|&i| excluded.contains(i)) {
            return None;
        }
    }
    match strategy {
        BoundStrategy::Greedy => greedy_bound(model, covered, excluded, uncovered),
        // After the screen above, a `None` from the LP means the microlp
        // solve failed, which is not a reason to lose admissible pruning.
        BoundStrategy::LpRelaxation => lp_bound(model, covered, excluded)
            .or_else(|| greedy_bound(model, covered, excluded, uncovered)),
    }
}

/// `ceil(uncovered / max_marginal)`: even the best remaining candidate
/// covers at most `max_marginal` new elements per pick.
fn greedy_bound(
    model: &ProblemModel,
    covered: &BitSet,
    excluded: &BitSet,
    uncovered: usize,
) -> Option<usize> {
    let max_marginal = (0..model.num_candidates())
        .filter(|i| !excluded.contains(*i))
        .map(|i| marginal(model, i, covered))
        .max()
        .unwrap_or(0);
    if max_marginal == 0 {
        return None;
    }
    Some(uncovered.div_ceil(max_marginal))
}

/// `ceil` of the fractional set-cover optimum of the remaining sub-instance.
///
/// Valid because the integral optimum is at least the LP optimum, and the
/// integral optimum is an integer. Returns `None` when some uncovered
/// element has no available coverer or the LP solve fails (caller falls back
/// to the greedy bound or prunes).
fn lp_bound(model: &ProblemModel, covered: &BitSet, excluded: &BitSet) -> Option<usize> {
    let avail: Vec<usize> = (0..model.num_candidates())
        .filter(|i| !excluded.contains(*i))
        .collect();
    let mut vars = variables!();
    let xs: Vec<_> = avail
        .iter()
        .map(|_| vars.add(variable().min(0.0).max(1.0)))
        .collect();
    let objective: Expression = xs.iter().sum();
    let mut problem = vars.minimise(objective).using(microlp);
    for j in 0..model.universe_size() {
        if covered.contains(j) {
            continue;
        }
        let mut row = Expression::with_capacity(model.covering(j).len());
        let mut any = false;
        for (k, &i) in avail.iter().enumerate() {
            if model.coverage(i).contains(j) {
                row.add_mul(1.0, xs[k]);
                any = true;
            }
        }
        if !any {
            return None;
        }
        problem = problem.with(row.geq(1.0));
    }
    let sol = problem.solve().ok()?;
    let obj: f64 = xs.iter().map(|x| sol.value(*x)).sum();
    Some((obj - 1e-6).ceil().max(0.0) as usize)
}
