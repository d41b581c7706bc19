//! Coverage thresholding: distance matrix → binary incidence relation.
//!
//! Rows are candidate hub locations, columns are demand points. Entry
//! `(i, j)` is set iff candidate `i` serves element `j` within the service
//! range, i.e. `D[i][j] <= r` (closed threshold: ties at exactly `r` count
//! as in range). The relation is rectangular; candidates and demand points
//! need not be the same point set.

use bit_set::BitSet;
use nalgebra::DMatrix;

use crate::error::{CoverError, CoverResult};

/// Binary `n × m` incidence relation between candidates and universe elements.
#[derive(Clone, Debug, PartialEq)]
pub struct CoverageMatrix {
    n: usize,
    m: usize,
    rows: Vec<BitSet>,
}

impl CoverageMatrix {
    /// Threshold a distance (or generic cost) matrix at service range `r`.
    ///
    /// Rows of `d` are candidates, columns are universe elements. Fails with
    /// [`CoverError::InvalidInput`] on a negative or non-finite threshold, or
    /// on any negative or non-finite matrix entry.
    pub fn from_distances(d: &DMatrix<f64>, r: f64) -> CoverResult<Self> {
        if !r.is_finite() || r < 0.0 {
            return Err(CoverError::InvalidInput(format!(
                "threshold must be finite and non-negative, got {r}"
            )));
        }
        let (n, m) = d.shape();
        let mut rows = Vec::with_capacity(n);
        for i in 0..n {
            let mut row = BitSet::with_capacity(m);
            for j in 0..m {
                let v = d[(i, j)];
                if !v.is_finite() || v < 0.0 {
                    return Err(CoverError::InvalidInput(format!(
                        "distance entry ({i}, {j}) must be finite and non-negative, got {v}"
                    )));
                }
                if v <= r {
                    row.insert(j);
                }
            }
            rows.push(row);
        }
        Ok(Self { n, m, rows })
    }

    /// Build directly from explicit element lists, one per candidate.
    ///
    /// For callers that already hold abstract sets rather than distances.
    /// Fails if any element index is out of `0..m`.
    pub fn from_rows(m: usize, sets: &[Vec<usize>]) -> CoverResult<Self> {
        let mut rows = Vec::with_capacity(sets.len());
        for (i, set) in sets.iter().enumerate() {
            let mut row = BitSet::with_capacity(m);
            for &j in set {
                if j >= m {
                    return Err(CoverError::InvalidInput(format!(
                        "candidate {i} covers element {j}, outside universe 0..{m}"
                    )));
                }
                row.insert(j);
            }
            rows.push(row);
        }
        Ok(Self { n: sets.len(), m, rows })
    }

    /// Number of candidate sets (rows).
    pub fn candidates(&self) -> usize {
        self.n
    }

    /// Universe size (columns).
    pub fn elements(&self) -> usize {
        self.m
    }

    /// Does candidate `i` cover element `j`?
    pub fn covers(&self, i: usize, j: usize) -> bool {
        self.rows[i].contains(j)
    }

    /// Coverage bitset of candidate `i`.
    pub fn row(&self, i: usize) -> &BitSet {
        &self.rows[i]
    }

    pub(crate) fn into_rows(self) -> Vec<BitSet> {
        self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::dmatrix;

    #[test]
    fn closed_threshold_includes_ties() {
        let d = dmatrix![0.0, 5.0, 7.5; 5.0, 0.0, 2.5];
        let cov = CoverageMatrix::from_distances(&d, 5.0).unwrap();
        assert_eq!((cov.candidates(), cov.elements()), (2, 3));
        assert!(cov.covers(0, 1)); // exactly at r
        assert!(!cov.covers(0, 2));
        assert!(cov.covers(1, 2));
    }

    #[test]
    fn rejects_bad_entries_and_thresholds() {
        let d = dmatrix![0.0, -1.0; 1.0, 2.0];
        assert!(matches!(
            CoverageMatrix::from_distances(&d, 1.0),
            Err(CoverError::InvalidInput(_))
        ));
        let nan = dmatrix![0.0, f64::NAN];
        assert!(matches!(
            CoverageMatrix::from_distances(&nan, 1.0),
            Err(CoverError::InvalidInput(_))
        ));
        let ok = dmatrix![0.0, 1.0];
        assert!(matches!(
            CoverageMatrix::from_distances(&ok, -0.5),
            Err(CoverError::InvalidInput(_))
        ));
        assert!(matches!(
            CoverageMatrix::from_distances(&ok, f64::INFINITY),
            Err(CoverError::InvalidInput(_))
        ));
    }

    #[test]
    fn from_rows_bounds_checks() {
        let cov = CoverageMatrix::from_rows(3, &[vec![0, 2], vec![1]]).unwrap();
        assert!(cov.covers(0, 2) && !cov.covers(1, 2));
        assert!(matches!(
            CoverageMatrix::from_rows(3, &[vec![3]]),
            Err(CoverError::InvalidInput(_))
        ));
    }
}
