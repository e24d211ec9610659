mod supercell;

pub use supercell::build_interfaces_for_angle;
