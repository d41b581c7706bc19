//! Synthetic siting instances (seeded uniform sites + distance matrices).
//!
//! A small deterministic sampler for benches, property tests, and demos:
//! draw sites uniformly in a box, then take Euclidean pairwise distances.
//! Reproducibility comes from a caller-supplied seed; the same seed always
//! yields the same instance.

use nalgebra::{DMatrix, Vector2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Uniform-box sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct SiteCfg {
    /// Number of sites to draw.
    pub count: usize,
    /// Half-width of the centered square box sites are drawn from.
    pub extent: f64,
}

impl Default for SiteCfg {
    fn default() -> Self {
        Self {
            count: 16,
            extent: 100.0,
        }
    }
}

/// Draw `cfg.count` sites uniformly in `[-extent, extent]²`.
pub fn draw_sites(cfg: SiteCfg, seed: u64) -> Vec<Vector2<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let e = cfg.extent.abs().max(f64::MIN_POSITIVE);
    (0..cfg.count)
        .map(|_| Vector2::new(rng.gen_range(-e..=e), rng.gen_range(-e..=e)))
        .collect()
}

/// Square Euclidean distance matrix over one point set (candidates and
/// demand points coincide, the symmetric siting case).
pub fn distance_matrix(sites: &[Vector2<f64>]) -> DMatrix<f64> {
    distance_matrix_between(sites, sites)
}

/// Rectangular Euclidean distance matrix: rows are candidate locations,
/// columns are demand points.
pub fn distance_matrix_between(
    candidates: &[Vector2<f64>],
    demands: &[Vector2<f64>],
) -> DMatrix<f64> {
    DMatrix::from_fn(candidates.len(), demands.len(), |i, j| {
        (candidates[i] - demands[j]).norm()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sites() {
        let cfg = SiteCfg::default();
        assert_eq!(draw_sites(cfg, 7), draw_sites(cfg, 7));
        assert_ne!(draw_sites(cfg, 7), draw_sites(cfg, 8));
    }

    #[test]
    fn square_matrix_is_symmetric_with_zero_diagonal() {
        let sites = draw_sites(SiteCfg { count: 5, extent: 10.0 }, 42);
        let d = distance_matrix(&sites);
        for i in 0..5 {
            assert_eq!(d[(i, i)], 0.0);
            for j in 0..5 {
                assert!((d[(i, j)] - d[(j, i)]).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn rectangular_shape_matches_inputs() {
        let cands = draw_sites(SiteCfg { count: 3, extent: 1.0 }, 1);
        let dems = draw_sites(SiteCfg { count: 6, extent: 1.0 }, 2);
        let d = distance_matrix_between(&cands, &dems);
        assert_eq!(d.shape(), (3, 6));
    }
}
