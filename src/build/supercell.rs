use rayon::prelude::*;

use crate::base::Atoms;
use crate::interface::Interface;
use crate::search::PrimitivePair;
use crate::symmetrize::standardize;

/// Build every candidate `Interface` for one angle from its primitive pairs
/// (spec.md §4.6, C6). Independent across pairs; parallelized with `rayon`
/// the same way as C4 (spec.md §5, R2).
pub fn build_interfaces_for_angle(
    bottom: &Atoms,
    top: &Atoms,
    theta: f64,
    pairs: &[PrimitivePair],
    weight: f64,
    distance: f64,
    to_primitive: bool,
    no_idealize: bool,
    symprec: f64,
    angle_tolerance_deg: f64,
) -> Vec<Interface> {
    pairs
        .par_iter()
        .filter_map(|pair| {
            let (m, n) = match pair.supercell_matrices() {
                Ok(matrices) => matrices,
                Err(err) => {
                    log::debug!("build_interfaces_for_angle: invalid primitive pair ({err})");
                    return None;
                }
            };
            let bottom_matrix = m.lift_to_3x3();
            let top_matrix = n.lift_to_3x3();

            let bottom_sc = match bottom.make_supercell(&bottom_matrix) {
                Ok(atoms) => atoms,
                Err(err) => {
                    log::debug!("build_interfaces_for_angle: bottom supercell failed ({err})");
                    return None;
                }
            };
            let top_sc = match top.make_supercell(&top_matrix) {
                Ok(atoms) => atoms,
                Err(err) => {
                    log::debug!("build_interfaces_for_angle: top supercell failed ({err})");
                    return None;
                }
            };
            let top_rotated = top_sc.rotate_atoms_around_z(theta);

            let stacked = match Atoms::stack_atoms(&bottom_sc, &top_rotated, weight, distance) {
                Ok(atoms) => atoms,
                Err(err) => {
                    log::debug!("build_interfaces_for_angle: stacking failed ({err})");
                    return None;
                }
            };

            let (space_group, standardized) =
                standardize(&stacked, to_primitive, no_idealize, symprec, angle_tolerance_deg);
            if space_group == 0 {
                log::debug!("build_interfaces_for_angle: standardization failed, dropping candidate");
                return None;
            }

            Some(Interface {
                bottom: bottom_sc,
                top_rotated,
                stacked: standardized,
                angle_radians: theta,
                bottom_matrix,
                top_matrix,
                space_group,
            })
        })
        .collect()
}
