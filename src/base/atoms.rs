use nalgebra::{Matrix2, Matrix3, RowVector3, Vector3};
use serde::{Deserialize, Serialize};

use super::error::HetbuildError;

const BOUNDARY_EPS: f64 = 1e-8;

/// A finite collection of atoms (spec.md §3). Rows of `cell` are lattice
/// vectors; the third is taken along z for 2D layers. `positions` are
/// Cartesian. `positions` and `species` always have the same length
/// (invariant I5); `pbc` is one flag per cell axis (x, y, z), `(true, true,
/// false)` for a 2D layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Atoms {
    pub cell: Matrix3<f64>,
    pub positions: Vec<Vector3<f64>>,
    pub species: Vec<String>,
    pub pbc: [bool; 3],
}

impl Atoms {
    pub fn new(
        cell: Matrix3<f64>,
        positions: Vec<Vector3<f64>>,
        species: Vec<String>,
        pbc: [bool; 3],
    ) -> Self {
        assert_eq!(positions.len(), species.len(), "positions/species length mismatch");
        Self {
            cell,
            positions,
            species,
            pbc,
        }
    }

    pub fn num_atoms(&self) -> usize {
        self.positions.len()
    }

    /// Top-left 2x2 submatrix of `cell` (spec.md §3, "Lattice basis").
    pub fn in_plane_basis(&self) -> Matrix2<f64> {
        Matrix2::new(self.cell.m11, self.cell.m12, self.cell.m21, self.cell.m22)
    }

    fn fractional(cell_inv: &Matrix3<f64>, cart: &Vector3<f64>) -> Vector3<f64> {
        cell_inv.transpose() * *cart
    }

    /// Build the supercell described by the 3x3 integer matrix `m3`
    /// (spec.md §4.3). Requires `det(m3) > 0`.
    pub fn make_supercell(&self, m3: &Matrix3<i64>) -> Result<Atoms, HetbuildError> {
        let det = m3.map(|e| e as f64).determinant();
        if det <= 0.0 {
            return Err(HetbuildError::DegenerateCell { determinant: det });
        }
        let m3_f64 = m3.map(|e| e as f64);
        let new_cell = m3_f64 * self.cell;
        let new_cell_inv = new_cell
            .try_inverse()
            .ok_or(HetbuildError::DegenerateCell { determinant: det })?;

        // Bounding box of the image of the unit cube under m3^T, padded by
        // one cell in each direction to stay conservative at the boundary.
        let m3t = m3.transpose();
        let mut lo = [i64::MAX; 3];
        let mut hi = [i64::MIN; 3];
        for c0 in 0..=1i64 {
            for c1 in 0..=1i64 {
                for c2 in 0..=1i64 {
                    let corner = Vector3::new(c0, c1, c2);
                    let v = m3t * corner;
                    for axis in 0..3 {
                        lo[axis] = lo[axis].min(v[axis]);
                        hi[axis] = hi[axis].max(v[axis]);
                    }
                }
            }
        }
        for axis in 0..3 {
            lo[axis] -= 1;
            hi[axis] += 1;
        }

        let mut new_positions = Vec::new();
        let mut new_species = Vec::new();
        for t0 in lo[0]..=hi[0] {
            for t1 in lo[1]..=hi[1] {
                for t2 in lo[2]..=hi[2] {
                    let shift_cart = self.cell.transpose() * Vector3::new(t0 as f64, t1 as f64, t2 as f64);
                    for (pos, sp) in self.positions.iter().zip(self.species.iter()) {
                        let new_cart = *pos + shift_cart;
                        let frac = Self::fractional(&new_cell_inv, &new_cart);
                        if frac
                            .iter()
                            .all(|&f| f >= -BOUNDARY_EPS && f < 1.0 - BOUNDARY_EPS)
                        {
                            new_positions.push(new_cart);
                            new_species.push(sp.clone());
                        }
                    }
                }
            }
        }

        let expected = (det.round() as usize) * self.num_atoms();
        log::debug!(
            "make_supercell: det={}, input atoms={}, output atoms={} (expected {})",
            det,
            self.num_atoms(),
            new_positions.len(),
            expected
        );

        Ok(Atoms::new(new_cell, new_positions, new_species, self.pbc))
    }

    /// Rotate cell and Cartesian positions by `theta` radians about z
    /// (spec.md §4.3).
    pub fn rotate_atoms_around_z(&self, theta: f64) -> Atoms {
        let (sin, cos) = theta.sin_cos();
        let r = Matrix3::new(cos, -sin, 0.0, sin, cos, 0.0, 0.0, 0.0, 1.0);

        let mut new_cell = Matrix3::zeros();
        for i in 0..3 {
            let row: Vector3<f64> = self.cell.row(i).transpose().into();
            let rotated = r * row;
            new_cell.set_row(i, &RowVector3::from(rotated.transpose()));
        }

        let new_positions = self.positions.iter().map(|p| r * *p).collect();

        Atoms::new(new_cell, new_positions, self.species.clone(), self.pbc)
    }

    /// Stack `bottom` and `top` into one interface cell (spec.md §4.3).
    /// `weight` blends the in-plane cell between `bottom` (0.0) and `top`
    /// (1.0); `distance` is the vertical gap above the bottom layer's
    /// topmost atom.
    pub fn stack_atoms(
        bottom: &Atoms,
        top: &Atoms,
        weight: f64,
        distance: f64,
    ) -> Result<Atoms, HetbuildError> {
        let a = bottom.in_plane_basis();
        let b = top.in_plane_basis();
        if a.determinant().abs() < 1e-12 || b.determinant().abs() < 1e-12 {
            return Err(HetbuildError::IncompatibleLayers {
                reason: "singular in-plane cell".to_string(),
            });
        }

        let c_inplane = a + weight * (b - a);
        let mut new_cell = bottom.cell;
        new_cell.m11 = c_inplane.m11;
        new_cell.m12 = c_inplane.m12;
        new_cell.m21 = c_inplane.m21;
        new_cell.m22 = c_inplane.m22;

        let bottom_top_z = bottom
            .positions
            .iter()
            .map(|p| p.z)
            .fold(f64::NEG_INFINITY, f64::max);
        let top_bottom_z = top
            .positions
            .iter()
            .map(|p| p.z)
            .fold(f64::INFINITY, f64::min);
        let shift_z = bottom_top_z + distance - top_bottom_z;

        let mut positions = bottom.positions.clone();
        let mut species = bottom.species.clone();
        positions.extend(top.positions.iter().map(|p| Vector3::new(p.x, p.y, p.z + shift_z)));
        species.extend(top.species.iter().cloned());

        Ok(Atoms::new(new_cell, positions, species, [true, true, false]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn identity_atoms() -> Atoms {
        Atoms::new(
            Matrix3::identity(),
            vec![Vector3::new(0.0, 0.0, 0.0)],
            vec!["C".to_string()],
            [true, true, false],
        )
    }

    #[test]
    fn test_make_supercell_count() {
        let atoms = identity_atoms();
        let m3 = Matrix3::new(2, 0, 0, 0, 2, 0, 0, 0, 1);
        let sc = atoms.make_supercell(&m3).unwrap();
        assert_eq!(sc.num_atoms(), 4);
    }

    #[test]
    fn test_make_supercell_rejects_nonpositive_det() {
        let atoms = identity_atoms();
        let m3 = Matrix3::new(1, 0, 0, 0, 0, 0, 0, 0, 1);
        assert!(atoms.make_supercell(&m3).is_err());
    }

    #[test]
    fn test_rotation_is_isometry() {
        let atoms = Atoms::new(
            Matrix3::identity(),
            vec![Vector3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 0.3, 0.0)],
            vec!["C".to_string(), "N".to_string()],
            [true, true, false],
        );
        let d0 = (atoms.positions[0] - atoms.positions[1]).norm();
        let rotated = atoms.rotate_atoms_around_z(0.7);
        let d1 = (rotated.positions[0] - rotated.positions[1]).norm();
        assert_relative_eq!(d0, d1, epsilon = 1e-10);
    }

    #[test]
    fn test_stack_preserves_count_and_gap() {
        let bottom = identity_atoms();
        let top = identity_atoms();
        let iface = Atoms::stack_atoms(&bottom, &top, 0.5, 4.0).unwrap();
        assert_eq!(iface.num_atoms(), 2);
        assert_eq!(iface.pbc, [true, true, false]);
        let dz = (iface.positions[1].z - iface.positions[0].z).abs();
        assert!(dz >= 4.0 - 1e-9);
    }
}
