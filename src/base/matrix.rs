use nalgebra::{Matrix2, Matrix3};

use super::error::HetbuildError;
use crate::math::intutil::det2;

/// A 2x2 integer supercell matrix with strictly positive determinant
/// (spec.md §3, "Supercell matrix").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupercellMatrix2 {
    entries: Matrix2<i64>,
}

impl SupercellMatrix2 {
    /// `entries` are given row-major: `[[m1, m2], [m3, m4]]`.
    pub fn new(entries: [[i64; 2]; 2]) -> Result<Self, HetbuildError> {
        let det = det2(entries);
        if det <= 0 {
            return Err(HetbuildError::DegenerateCell {
                determinant: det as f64,
            });
        }
        Ok(Self {
            entries: Matrix2::new(
                entries[0][0],
                entries[0][1],
                entries[1][0],
                entries[1][1],
            ),
        })
    }

    pub fn determinant(&self) -> i64 {
        self.entries.m11 * self.entries.m22 - self.entries.m12 * self.entries.m21
    }

    pub fn as_matrix2(&self) -> Matrix2<i64> {
        self.entries
    }

    pub fn entries(&self) -> [[i64; 2]; 2] {
        [
            [self.entries.m11, self.entries.m12],
            [self.entries.m21, self.entries.m22],
        ]
    }

    /// Lift to a 3x3 integer matrix with `1` at `(3,3)` (spec.md §4.6).
    pub fn lift_to_3x3(&self) -> Matrix3<i64> {
        Matrix3::new(
            self.entries.m11,
            self.entries.m12,
            0,
            self.entries.m21,
            self.entries.m22,
            0,
            0,
            0,
            1,
        )
    }
}
