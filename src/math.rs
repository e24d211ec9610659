pub mod intutil;
pub mod lattice2;

pub use intutil::{det2, det3, gcd_of_list};
pub use lattice2::{apply, distance, rotate};
