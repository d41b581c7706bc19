//! Data types for the branch-and-bound search.
//!
//! Kept small and explicit to make the `dfs` and `parallel` runners easy to
//! read.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use bit_set::BitSet;

use crate::bounds::BoundStrategy;

/// Search configuration.
#[derive(Clone, Copy, Debug, Default)]
pub struct SolveCfg {
    /// Lower-bound strategy used for pruning.
    pub bound: BoundStrategy,
    /// Explore the root branches on rayon workers. Same covers, same sizes;
    /// only the wall-clock changes.
    pub parallel: bool,
}

/// Caller-supplied cancellation handle: a shared flag and an optional
/// deadline, checked at every branch node. Cloning shares the flag.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl CancelToken {
    /// A token that never fires unless [`cancel`](Self::cancel) is called.
    pub fn new() -> Self {
        Self::default()
    }

    /// A token that also fires once `timeout` has elapsed from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            flag: Arc::new(AtomicBool::new(false)),
            deadline: Some(Instant::now() + timeout),
        }
    }

    /// Request cancellation. Safe to call from another thread.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Has the flag been set or the deadline passed?
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
            || self.deadline.is_some_and(|d| Instant::now() >= d)
    }
}

/// The returned cover: selected candidate ids, ascending.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cover {
    /// Selected candidate ids in ascending order.
    pub selected: Vec<usize>,
}

impl Cover {
    /// Number of selected candidates.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// True for the empty cover (empty-universe instances).
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}

/// One node of the search tree. Owned by the frame that created it; branches
/// clone it rather than share it.
#[derive(Clone, Debug)]
pub(crate) struct PartialSolution {
    /// Selected candidate ids in selection order.
    pub selected: Vec<usize>,
    /// Union of the selected candidates' coverages.
    pub covered: BitSet,
    /// Candidates decided *against* on this path. Sibling branches at a node
    /// exclude the candidates tried before them, so subtrees are disjoint.
    pub excluded: BitSet,
}

impl PartialSolution {
    pub fn root(n: usize, m: usize) -> Self {
        Self {
            selected: Vec::new(),
            covered: BitSet::with_capacity(m),
            excluded: BitSet::with_capacity(n),
        }
    }
}

/// Best cover found so far; `selected` is kept sorted ascending so
/// equal-size ties compare lexicographically. In the parallel runner this
/// lives behind a mutex, with the length mirrored in an atomic for cheap
/// pruning reads.
#[derive(Clone, Debug)]
pub(crate) struct Incumbent {
    pub selected: Vec<usize>,
}

impl Incumbent {
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Should a feasible leaf with sorted ids `candidate` replace this one?
    /// Smaller size wins; equal size breaks to the lexicographically smaller
    /// id set, which fixes the returned cover among equal-size optima.
    pub fn is_improved_by(&self, candidate: &[usize]) -> bool {
        candidate.len() < self.selected.len()
            || (candidate.len() == self.selected.len() && candidate < self.selected.as_slice())
    }
}
