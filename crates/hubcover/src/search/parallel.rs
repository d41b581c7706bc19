//! Parallel branch exploration on rayon workers.
//!
//! The root element's include branches are independent subtrees; each worker
//! explores one with its own `PartialSolution`. The incumbent is shared: a
//! mutex holds the cover, an atomic mirrors its length so pruning can read
//! it without locking. A stale length only weakens pruning (extra work),
//! never correctness; commits re-check under the lock.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use rayon::prelude::*;
use tracing::debug;

use crate::bounds::lower_bound;
use crate::error::{CoverError, CoverResult};
use crate::model::ProblemModel;

use super::types::{CancelToken, Incumbent, PartialSolution, SolveCfg};

struct SharedIncumbent {
    best_len: AtomicUsize,
    best: Mutex<Incumbent>,
}

impl SharedIncumbent {
    fn new(seed: Incumbent) -> Self {
        Self {
            best_len: AtomicUsize::new(seed.len()),
            best: Mutex::new(seed),
        }
    }

    /// Possibly-stale length for pruning reads.
    fn len(&self) -> usize {
        self.best_len.load(Ordering::Relaxed)
    }

    /// Commit a feasible leaf against the true incumbent. `selected` must be
    /// sorted ascending; the lexicographic tie-break under the lock makes the
    /// final incumbent independent of the thread schedule.
    fn try_commit(&self, selected: Vec<usize>) {
        let mut guard = match self.best.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        if guard.is_improved_by(&selected) {
            debug!(size = selected.len(), "incumbent replaced");
            self.best_len.store(selected.len(), Ordering::Relaxed);
            *guard = Incumbent { selected };
        }
    }

    fn into_inner(self) -> Incumbent {
        match self.best.into_inner() {
            Ok(inc) => inc,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

/// Exhaust the tree with the root split across rayon workers.
pub(crate) fn run(
    model: &ProblemModel,
    cfg: SolveCfg,
    cancel: &CancelToken,
    seed: Incumbent,
) -> CoverResult<Incumbent> {
    let root = PartialSolution::root(model.num_candidates(), model.universe_size());
    // Universe is nonempty here, so element 0 exists and has coverers.
    let mut branches = Vec::new();
    let mut sibling_excluded = root.excluded.clone();
    for &c in model.covering(0) {
        let mut child = root.clone();
        child.excluded = sibling_excluded.clone();
        child.selected.push(c);
        child.covered.union_with(model.coverage(c));
        branches.push(child);
        sibling_excluded.insert(c);
    }
    let shared = SharedIncumbent::new(seed);
    branches
        .into_par_iter()
        .map(|branch| {
            let mut worker = Worker {
                model,
                cfg,
                cancel,
                shared: &shared,
                nodes: 0,
                pruned: 0,
            };
            let out = worker.recur(branch);
            debug!(nodes = worker.nodes, pruned = worker.pruned, "worker done");
            out
        })
        .collect::<CoverResult<()>>()?;
    Ok(shared.into_inner())
}

/// Per-thread search frame; mirrors the sequential runner but prunes against
/// the shared incumbent.
struct Worker<'a> {
    model: &'a ProblemModel,
    cfg: SolveCfg,
    cancel: &'a CancelToken,
    shared: &'a SharedIncumbent,
    nodes: u64,
    pruned: u64,
}

impl<'a> Worker<'a> {
    fn recur(&mut self, node: PartialSolution) -> CoverResult<()> {
        if self.cancel.is_cancelled() {
            return Err(CoverError::Cancelled);
        }
        self.nodes += 1;
        if node.covered.len() == self.model.universe_size() {
            let mut selected = node.selected;
            selected.sort_unstable();
            self.shared.try_commit(selected);
            return Ok(());
        }
        match lower_bound(self.model, &node.covered, &node.excluded, self.cfg.bound) {
            None => {
                self.pruned += 1;
                return Ok(());
            }
            Some(bound) => {
                // `>` as in the sequential runner: equal-size completions
                // stay reachable for the lexicographic tie-break.
                if node.selected.len() + bound > self.shared.len() {
                    self.pruned += 1;
                    return Ok(());
                }
            }
        }
        let Some(element) = (0..self.model.universe_size()).find(|j| !node.covered.contains(*j))
        else {
            return Ok(());
        };
        let mut sibling_excluded = node.excluded.clone();
        for &c in self.model.covering(element) {
            if sibling_excluded.contains(c) {
                continue;
            }
            let mut child = node.clone();
            child.excluded = sibling_excluded.clone();
            child.selected.push(c);
            child.covered.union_with(self.model.coverage(c));
            self.recur(child)?;
            sibling_excluded.insert(c);
        }
        Ok(())
    }
}
