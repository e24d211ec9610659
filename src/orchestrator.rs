use crate::base::{Atoms, HetbuildError};
use crate::build::build_interfaces_for_angle;
use crate::config::RunConfig;
use crate::dedup::dedup_interfaces;
use crate::interface::Interface;
use crate::search::{reduce_to_primitive_pairs, search_coincidences, PrimitivePair};

/// Drive the coincidence search across angles and funnel into the
/// pair-reducer, builder, standardizer and dedup stages (spec.md §4.9, C9).
/// Angle unit is degrees at this boundary; everything from C4 onward works
/// in radians (spec.md §6.1).
pub fn run(bottom: &Atoms, top: &Atoms, config: &RunConfig) -> Result<Vec<Interface>, HetbuildError> {
    config.validate()?;

    let a = bottom.in_plane_basis();
    let b = top.in_plane_basis();

    let angles_deg = config.angle_set_degrees();
    if angles_deg.is_empty() {
        return Err(HetbuildError::InvalidParameter {
            message: "angle set is empty".to_string(),
        });
    }

    let angle_pairs = angles_for_pairs(&a, &b, &angles_deg, config);
    if angle_pairs.is_empty() {
        log::debug!("run: no angle produced any primitive pair, returning empty result");
        return Ok(Vec::new());
    }

    let mut interfaces: Vec<Interface> = angle_pairs
        .iter()
        .flat_map(|(theta, pairs)| {
            build_interfaces_for_angle(
                bottom,
                top,
                *theta,
                pairs,
                config.weight,
                config.distance,
                config.to_primitive,
                config.no_idealize,
                config.symprec,
                config.angle_tolerance,
            )
        })
        .collect();

    interfaces = dedup_interfaces(interfaces);
    sort_deterministically(&mut interfaces);

    Ok(interfaces)
}

/// Steps 3 of spec.md §4.9: for each angle, run C4 then C5, dropping angles
/// that yield no primitive pair.
fn angles_for_pairs(
    a: &nalgebra::Matrix2<f64>,
    b: &nalgebra::Matrix2<f64>,
    angles_deg: &[f64],
    config: &RunConfig,
) -> Vec<(f64, Vec<PrimitivePair>)> {
    angles_deg
        .iter()
        .filter_map(|&deg| {
            let theta = deg.to_radians();
            let coincidences = search_coincidences(a, b, theta, config.nmin, config.nmax, config.tolerance);
            let pairs = reduce_to_primitive_pairs(&coincidences);
            log::debug!(
                "run: angle={:.3} deg, {} coincidences, {} primitive pairs",
                deg,
                coincidences.len(),
                pairs.len()
            );
            if pairs.is_empty() {
                None
            } else {
                Some((theta, pairs))
            }
        })
        .collect()
}

/// Sort by `(space_group, atom_count, area)` so repeated runs over
/// identical inputs return results in the same order (spec.md §5, P8).
fn sort_deterministically(interfaces: &mut [Interface]) {
    interfaces.sort_by(|x, y| {
        x.space_group
            .cmp(&y.space_group)
            .then(x.num_atoms().cmp(&y.num_atoms()))
            .then(x.area().partial_cmp(&y.area()).unwrap())
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Matrix3, Vector3};

    fn single_atom_layer() -> Atoms {
        Atoms::new(
            Matrix3::identity(),
            vec![Vector3::new(0.0, 0.0, 0.0)],
            vec!["C".to_string()],
            [true, true, false],
        )
    }

    #[test]
    fn test_p7_empty_angle_limits_is_invalid_parameter() {
        let config = RunConfig {
            angle_limits: (90.0, 0.0),
            angle_stepsize: 1.0,
            angles: Vec::new(),
            ..RunConfig::default()
        };
        let bottom = single_atom_layer();
        let top = single_atom_layer();
        let result = run(&bottom, &top, &config);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_when_angles_produce_no_pairs() {
        let config = RunConfig {
            angles: vec![0.0],
            nmin: 0,
            nmax: 0,
            tolerance: 1e-9,
            ..RunConfig::default()
        };
        let bottom = single_atom_layer();
        let top = single_atom_layer();
        let result = run(&bottom, &top, &config).unwrap();
        assert!(result.is_empty());
    }
}
