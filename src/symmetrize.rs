mod standardize;

pub use standardize::standardize;
