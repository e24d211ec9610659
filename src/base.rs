mod atoms;
mod error;
mod matrix;

pub use atoms::Atoms;
pub use error::HetbuildError;
pub use matrix::SupercellMatrix2;
