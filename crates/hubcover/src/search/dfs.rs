//! Sequential depth-first branch-and-bound with incumbent pruning.
//!
//! Branch rule: take the first still-uncovered universe element and try each
//! of its covering candidates in ascending id order; each sibling excludes
//! the candidates tried before it, so sibling subtrees are disjoint and the
//! exploration order is lexicographic in the selected id sets. Every branch
//! covers at least one new element, so depth is bounded by the universe size
//! and the search terminates.

use tracing::debug;

use crate::bounds::lower_bound;
use crate::error::{CoverError, CoverResult};
use crate::model::ProblemModel;

use super::types::{CancelToken, Incumbent, PartialSolution, SolveCfg};

/// DFS runner carrying shared context and accumulators.
pub(crate) struct DfsRunner<'a> {
    model: &'a ProblemModel,
    cfg: SolveCfg,
    cancel: &'a CancelToken,
    best: Incumbent,
    nodes: u64,
    pruned: u64,
}

impl<'a> DfsRunner<'a> {
    pub fn new(
        model: &'a ProblemModel,
        cfg: SolveCfg,
        cancel: &'a CancelToken,
        seed: Incumbent,
    ) -> Self {
        Self {
            model,
            cfg,
            cancel,
            best: seed,
            nodes: 0,
            pruned: 0,
        }
    }

    /// Exhaust the tree; the returned incumbent is the exact minimum cover.
    pub fn run(mut self) -> CoverResult<Incumbent> {
        let root = PartialSolution::root(self.model.num_candidates(), self.model.universe_size());
        self.recur(root)?;
        debug!(
            nodes = self.nodes,
            pruned = self.pruned,
            best = self.best.len(),
            "search exhausted"
        );
        Ok(self.best)
    }

    fn recur(&mut self, node: PartialSolution) -> CoverResult<()> {
        if self.cancel.is_cancelled() {
            return Err(CoverError::Cancelled);
        }
        self.nodes += 1;
        if node.covered.len() == self.model.universe_size() {
            // Feasible leaf. An equal-size cover is kept only when it wins
            // the lexicographic tie-break.
            let mut selected = node.selected;
            selected.sort_unstable();
            if self.best.is_improved_by(&selected) {
                debug!(size = selected.len(), "incumbent replaced");
                self.best = Incumbent { selected };
            }
            return Ok(());
        }
        match lower_bound(self.model, &node.covered, &node.excluded, self.cfg.bound) {
            // Remainder uncoverable with the available candidates.
            None => {
                self.pruned += 1;
                return Ok(());
            }
            Some(bound) => {
                // `>` rather than `>=`: an equal-size completion may still
                // beat the incumbent on the lexicographic tie-break.
                if node.selected.len() + bound > self.best.len() {
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
