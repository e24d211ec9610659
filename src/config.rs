use crate::base::HetbuildError;

/// Parameters for `run` (spec.md §4.9, §6.1). Defaults mirror the CLI
/// surface documented in spec.md §6.2 so an embedding CLI only has to parse
/// flags into this struct.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub nmax: i64,
    pub nmin: i64,
    /// Explicit angle list in degrees. Non-empty overrides `angle_limits`
    /// (spec.md §9, Open Questions: "non-empty angles ⇒ use only angles").
    pub angles: Vec<f64>,
    pub angle_limits: (f64, f64),
    pub angle_stepsize: f64,
    pub tolerance: f64,
    pub weight: f64,
    pub distance: f64,
    pub no_idealize: bool,
    pub symprec: f64,
    pub angle_tolerance: f64,
    /// Whether the symmetry standardizer is asked to return the primitive
    /// cell. Not exposed on the spec.md §6.2 CLI surface; fixed here rather
    /// than guessed per-call (see DESIGN.md).
    pub to_primitive: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            nmax: 10,
            nmin: 0,
            angles: Vec::new(),
            angle_limits: (0.0, 90.0),
            angle_stepsize: 1.0,
            tolerance: 0.1,
            weight: 0.5,
            distance: 4.0,
            no_idealize: false,
            symprec: 1e-5,
            angle_tolerance: 5.0,
            to_primitive: true,
        }
    }
}

impl RunConfig {
    /// Validate against spec.md §7's `InvalidParameter` conditions.
    pub fn validate(&self) -> Result<(), HetbuildError> {
        if self.nmax < self.nmin {
            return Err(HetbuildError::InvalidParameter {
                message: format!("Nmax ({}) < Nmin ({})", self.nmax, self.nmin),
            });
        }
        if self.angles.is_empty() && self.angle_stepsize <= 0.0 {
            return Err(HetbuildError::InvalidParameter {
                message: "angle_stepsize must be positive when angles is empty".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.weight) {
            return Err(HetbuildError::InvalidParameter {
                message: format!("weight ({}) not in [0, 1]", self.weight),
            });
        }
        if self.tolerance <= 0.0 {
            return Err(HetbuildError::InvalidParameter {
                message: format!("tolerance ({}) must be positive", self.tolerance),
            });
        }
        if self.distance <= 0.0 {
            return Err(HetbuildError::InvalidParameter {
                message: format!("distance ({}) must be positive", self.distance),
            });
        }
        if self.symprec <= 0.0 {
            return Err(HetbuildError::InvalidParameter {
                message: format!("symprec ({}) must be positive", self.symprec),
            });
        }
        Ok(())
    }

    /// The angle set in degrees (spec.md §4.9 step 1).
    pub fn angle_set_degrees(&self) -> Vec<f64> {
        if !self.angles.is_empty() {
            return self.angles.clone();
        }
        let (lo, hi) = self.angle_limits;
        let mut angles = Vec::new();
        let mut angle = lo;
        while angle <= hi + 1e-9 {
            angles.push(angle.min(hi));
            angle += self.angle_stepsize;
        }
        angles
    }
}
