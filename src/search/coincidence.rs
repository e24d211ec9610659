use nalgebra::{Matrix2, Vector2};
use rayon::prelude::*;

use crate::math::{apply, distance, rotate};

/// An ordered 4-tuple `(m1, m2, n1, n2)` satisfying the coincidence
/// tolerance predicate (spec.md §3, "Coincidence tuple").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coincidence {
    pub m1: i64,
    pub m2: i64,
    pub n1: i64,
    pub n2: i64,
}

/// Enumerate every coincidence tuple in `[nmin, nmax]^4` for the rotation
/// `theta` (radians), excluding the all-equal degenerate tuple (spec.md
/// §4.4, C4). The four nested loops are flattened to a `rayon` parallel-for
/// over the outer index `m1`; each worker accumulates a private buffer that
/// is concatenated by `collect` (spec.md §9, "ordered parallel appends").
pub fn search_coincidences(
    a: &Matrix2<f64>,
    b: &Matrix2<f64>,
    theta: f64,
    nmin: i64,
    nmax: i64,
    tol: f64,
) -> Vec<Coincidence> {
    log::debug!(
        "search_coincidences: theta={:.4} rad, range=[{},{}], tol={}",
        theta,
        nmin,
        nmax,
        tol
    );

    (nmin..=nmax)
        .into_par_iter()
        .flat_map(|m1| {
            let mut local = Vec::new();
            for m2 in nmin..=nmax {
                let av = apply(a, Vector2::new(m1, m2));
                for n1 in nmin..=nmax {
                    for n2 in nmin..=nmax {
                        if m1 == m2 && m2 == n1 && n1 == n2 {
                            continue;
                        }
                        let bv = rotate(apply(b, Vector2::new(n1, n2)), theta);
                        if distance(av, bv) < tol {
                            local.push(Coincidence { m1, m2, n1, n2 });
                        }
                    }
                }
            }
            local
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_s1_identity_bases_zero_angle() {
        let a = Matrix2::identity();
        let b = Matrix2::identity();
        let coincidences = search_coincidences(&a, &b, 0.0, 0, 1, 1e-6);
        assert!(coincidences.contains(&Coincidence { m1: 1, m2: 0, n1: 1, n2: 0 }));
        assert!(coincidences.contains(&Coincidence { m1: 0, m2: 1, n1: 0, n2: 1 }));
        assert!(!coincidences.contains(&Coincidence { m1: 1, m2: 1, n1: 1, n2: 1 }));
        assert!(!coincidences.contains(&Coincidence { m1: 0, m2: 0, n1: 0, n2: 0 }));
    }

    #[test]
    fn test_s2_ninety_degree_rotation() {
        let a = Matrix2::identity();
        let b = Matrix2::identity();
        let coincidences = search_coincidences(&a, &b, std::f64::consts::FRAC_PI_2, -1, 1, 1e-6);
        assert!(coincidences.contains(&Coincidence { m1: 1, m2: 0, n1: 0, n2: -1 }));
    }

    #[test]
    fn test_s3_scaled_basis() {
        let a = Matrix2::identity();
        let b = Matrix2::identity() * 2.0;
        let coincidences = search_coincidences(&a, &b, 0.0, 0, 2, 1e-6);
        assert!(coincidences.contains(&Coincidence { m1: 2, m2: 0, n1: 1, n2: 0 }));
        assert!(coincidences.contains(&Coincidence { m1: 0, m2: 2, n1: 0, n2: 1 }));
    }

    #[test]
    fn test_p1_every_result_satisfies_tolerance() {
        let a = Matrix2::identity();
        let b = Matrix2::identity();
        let tol = 1e-6;
        let coincidences = search_coincidences(&a, &b, 0.3, -2, 2, tol);
        for c in &coincidences {
            assert!(!(c.m1 == c.m2 && c.m2 == c.n1 && c.n1 == c.n2));
            let av = apply(&a, Vector2::new(c.m1, c.m2));
            let bv = rotate(apply(&b, Vector2::new(c.n1, c.n2)), 0.3);
            assert!(distance(av, bv) < tol);
        }
    }
}
