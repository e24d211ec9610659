use std::collections::HashMap;

use moyo::base::{AngleTolerance, Cell as MoyoCell, Lattice as MoyoLattice};
use moyo::data::Setting;
use moyo::MoyoDataset;
use nalgebra::Vector3;

use crate::base::Atoms;

/// Bidirectional mapping between chemical species labels and the integer
/// atomic species `moyo` requires, assigned in first-seen order.
struct SpeciesTable {
    labels: Vec<String>,
    ids: HashMap<String, i32>,
}

impl SpeciesTable {
    fn from_labels(species: &[String]) -> Self {
        let mut labels = Vec::new();
        let mut ids = HashMap::new();
        for label in species {
            if !ids.contains_key(label) {
                ids.insert(label.clone(), labels.len() as i32 + 1);
                labels.push(label.clone());
            }
        }
        Self { labels, ids }
    }

    fn number_of(&self, label: &str) -> i32 {
        self.ids[label]
    }

    fn label_of(&self, number: i32) -> String {
        self.labels[(number - 1) as usize].clone()
    }
}

/// Call the external symmetry standardizer (spec.md §4.7, §6.5) against the
/// real `moyo` crate. Returns the international space-group number (1..230)
/// or `0` on failure (spec.md `StandardizationFailed`, recovered locally by
/// the caller dropping the candidate). When `no_idealize` is false and
/// standardization succeeds, the returned atoms are the idealized
/// standardized cell; otherwise the input atoms are returned unchanged.
pub fn standardize(
    atoms: &Atoms,
    to_primitive: bool,
    no_idealize: bool,
    symprec: f64,
    angle_tolerance_deg: f64,
) -> (i32, Atoms) {
    let cell_inv = match atoms.cell.try_inverse() {
        Some(inv) => inv,
        None => {
            log::debug!("standardize: input cell is singular, dropping candidate");
            return (0, atoms.clone());
        }
    };

    let table = SpeciesTable::from_labels(&atoms.species);
    let positions: Vec<Vector3<f64>> = atoms
        .positions
        .iter()
        .map(|cart| cell_inv.transpose() * *cart)
        .collect();
    let numbers: Vec<i32> = atoms.species.iter().map(|s| table.number_of(s)).collect();

    let moyo_cell = MoyoCell::new(MoyoLattice::new(atoms.cell), positions, numbers);
    let angle_tolerance = AngleTolerance::Radian(angle_tolerance_deg.to_radians());

    let dataset = match MoyoDataset::new(
        &moyo_cell,
        symprec,
        angle_tolerance,
        Setting::Spglib,
        to_primitive,
    ) {
        Ok(dataset) => dataset,
        Err(err) => {
            log::debug!("standardize: moyo failed ({err}), dropping candidate");
            return (0, atoms.clone());
        }
    };

    if no_idealize {
        return (dataset.number, atoms.clone());
    }

    let basis = dataset.std_cell.lattice.basis;
    let std_atoms = Atoms::new(
        basis.transpose(),
        dataset
            .std_cell
            .positions
            .iter()
            .map(|frac| basis * *frac)
            .collect(),
        dataset
            .std_cell
            .numbers
            .iter()
            .map(|&n| table.label_of(n))
            .collect(),
        atoms.pbc,
    );
    (dataset.number, std_atoms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_species_table_roundtrip() {
        let table = SpeciesTable::from_labels(&[
            "Mo".to_string(),
            "S".to_string(),
            "S".to_string(),
            "Mo".to_string(),
        ]);
        assert_eq!(table.number_of("Mo"), 1);
        assert_eq!(table.number_of("S"), 2);
        assert_eq!(table.label_of(1), "Mo");
        assert_eq!(table.label_of(2), "S");
    }

    #[test]
    fn test_singular_cell_fails_locally() {
        let atoms = Atoms::new(
            nalgebra::Matrix3::zeros(),
            vec![Vector3::new(0.0, 0.0, 0.0)],
            vec!["C".to_string()],
            [true, true, false],
        );
        let (number, out) = standardize(&atoms, false, false, 1e-5, 5.0);
        assert_eq!(number, 0);
        assert_eq!(out, atoms);
    }
}
