//! Abstract set-cover instance built from a coverage relation.
//!
//! Built once per solve call and read-only for the duration of the search.
//! Infeasibility (an element no candidate covers) is a property of the data
//! and is rejected here, before any search runs.

use bit_set::BitSet;

use crate::coverage::CoverageMatrix;
use crate::error::{CoverError, CoverResult};

/// One selectable subset of the universe.
#[derive(Clone, Debug)]
pub struct CandidateSet {
    /// Index in `0..n`.
    pub id: usize,
    /// Universe elements this candidate covers.
    pub coverage: BitSet,
    /// Selection cost. Defaults to 1.0; the solver currently minimizes
    /// cardinality only, so this is an extension point, not an input to the
    /// search.
    pub cost: f64,
}

/// Read-only set-cover instance: universe size, candidate sets, and the
/// inverted covering-candidates index used for branching.
#[derive(Clone, Debug)]
pub struct ProblemModel {
    m: usize,
    sets: Vec<CandidateSet>,
    covering: Vec<Vec<usize>>, // covering[j]: ascending candidate ids covering element j
}

impl ProblemModel {
    /// Wrap a coverage relation into a solvable instance with uniform costs.
    ///
    /// Fails with [`CoverError::Infeasible`] naming the lowest-index element
    /// that no candidate covers. An empty universe is a valid (trivial)
    /// instance regardless of the candidate count.
    pub fn from_coverage(cov: CoverageMatrix) -> CoverResult<Self> {
        let n = cov.candidates();
        Self::build(cov, vec![1.0; n])
    }

    /// As [`from_coverage`](Self::from_coverage) with explicit per-candidate
    /// costs (length must match; entries must be finite and non-negative).
    pub fn from_coverage_with_costs(cov: CoverageMatrix, costs: Vec<f64>) -> CoverResult<Self> {
        if costs.len() != cov.candidates() {
            return Err(CoverError::InvalidInput(format!(
                "expected {} candidate costs, got {}",
                cov.candidates(),
                costs.len()
            )));
        }
        if let Some((i, &c)) = costs
            .iter()
            .enumerate()
            .find(|(_, c)| !c.is_finite() || **c < 0.0)
        {
            return Err(CoverError::InvalidInput(format!(
                "candidate {i} has invalid cost {c}"
            )));
        }
        Self::build(cov, costs)
    }

    fn build(cov: CoverageMatrix, costs: Vec<f64>) -> CoverResult<Self> {
        let m = cov.elements();
        let rows = cov.into_rows();
        let mut covering = vec![Vec::new(); m];
        for (i, row) in rows.iter().enumerate() {
            for j in row.iter() {
                covering[j].push(i);
            }
        }
        // Rows were scanned in ascending id order, so each list is sorted.
        if let Some(j) = covering.iter().position(|c| c.is_empty()) {
            return Err(CoverError::Infeasible { element: j });
        }
        let sets = rows
            .into_iter()
            .zip(costs)
            .enumerate()
            .map(|(id, (coverage, cost))| CandidateSet { id, coverage, cost })
            .collect();
        Ok(Self { m, sets, covering })
    }

    /// Universe size `m`.
    pub fn universe_size(&self) -> usize {
        self.m
    }

    /// Candidate count `n`.
    pub fn num_candidates(&self) -> usize {
        self.sets.len()
    }

    /// Candidate set by id.
    pub fn candidate(&self, i: usize) -> &CandidateSet {
        &self.sets[i]
    }

    /// Coverage bitset of candidate `i`.
    pub fn coverage(&self, i: usize) -> &BitSet {
        &self.sets[i].coverage
    }

    /// Ascending ids of the candidates covering element `j`. Non-empty for
    /// every element of a constructed model.
    pub fn covering(&self, j: usize) -> &[usize] {
        &self.covering[j]
    }

    /// Bitset of the full universe, `{0, .., m-1}`.
    pub fn full_universe(&self) -> BitSet {
        let mut all = BitSet::with_capacity(self.m);
        for j in 0..self.m {
            all.insert(j);
        }
        all
    }
}
