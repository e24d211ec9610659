use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
/// Error types for the **hetbuild** crate
pub enum HetbuildError {
    #[error("invalid parameter: {message}")]
    InvalidParameter { message: String },
    #[error("degenerate cell: determinant {determinant} is not strictly positive")]
    DegenerateCell { determinant: f64 },
    #[error("incompatible layers: {reason}")]
    IncompatibleLayers { reason: String },
}
