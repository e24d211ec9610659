use rayon::prelude::*;

use super::coincidence::Coincidence;
use crate::base::{HetbuildError, SupercellMatrix2};
use crate::math::{det2, gcd_of_list};

/// A primitive, orientation-preserving pair of supercell matrices derived
/// from two coincidence tuples (spec.md §3, "Primitive pair").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimitivePair {
    pub m1: i64,
    pub m2: i64,
    pub m3: i64,
    pub m4: i64,
    pub n1: i64,
    pub n2: i64,
    pub n3: i64,
    pub n4: i64,
}

impl PrimitivePair {
    pub fn supercell_matrices(&self) -> Result<(SupercellMatrix2, SupercellMatrix2), HetbuildError> {
        let m = SupercellMatrix2::new([[self.m1, self.m2], [self.m3, self.m4]])?;
        let n = SupercellMatrix2::new([[self.n1, self.n2], [self.n3, self.n4]])?;
        Ok((m, n))
    }
}

/// Combine every ordered `i < j` pair of coincidence tuples (in the input's
/// natural order) into a primitive pair, keeping those with both
/// determinants strictly positive and 8-entry GCD equal to 1 (spec.md
/// §4.5, C5). Parallelized over the outer index.
pub fn reduce_to_primitive_pairs(coincidences: &[Coincidence]) -> Vec<PrimitivePair> {
    let n = coincidences.len();
    (0..n)
        .into_par_iter()
        .flat_map(|i| {
            let mut local = Vec::new();
            let ci = coincidences[i];
            for j in (i + 1)..n {
                let cj = coincidences[j];
                let m = [[ci.m1, ci.m2], [cj.m1, cj.m2]];
                let nn = [[ci.n1, ci.n2], [cj.n1, cj.n2]];
                if det2(m) <= 0 || det2(nn) <= 0 {
                    continue;
                }
                let entries = [m[0][0], m[0][1], m[1][0], m[1][1], nn[0][0], nn[0][1], nn[1][0], nn[1][1]];
                if gcd_of_list(&entries).abs() != 1 {
                    continue;
                }
                local.push(PrimitivePair {
                    m1: m[0][0],
                    m2: m[0][1],
                    m3: m[1][0],
                    m4: m[1][1],
                    n1: nn[0][0],
                    n2: nn[0][1],
                    n3: nn[1][0],
                    n4: nn[1][1],
                });
            }
            local
        })
        .collect()
}
