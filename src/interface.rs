use nalgebra::Matrix3;
use serde::{Deserialize, Serialize};

use crate::base::Atoms;

/// An immutable candidate heterostructure interface (spec.md §3,
/// "Interface"). `angle` is stored in radians, the convention used
/// internally from C4 onward (spec.md §4.9); the public `run` boundary
/// converts to/from degrees.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interface {
    pub bottom: Atoms,
    pub top_rotated: Atoms,
    pub stacked: Atoms,
    pub angle_radians: f64,
    pub bottom_matrix: Matrix3<i64>,
    pub top_matrix: Matrix3<i64>,
    pub space_group: i32,
}

impl Interface {
    /// Area of the interface's in-plane cell (spec.md §4.8).
    pub fn area(&self) -> f64 {
        let basis = self.stacked.in_plane_basis();
        (basis.m11 * basis.m22 - basis.m12 * basis.m21).abs()
    }

    pub fn num_atoms(&self) -> usize {
        self.stacked.num_atoms()
    }
}
