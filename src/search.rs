mod coincidence;
mod primitive_pair;

pub use coincidence::{search_coincidences, Coincidence};
pub use primitive_pair::{reduce_to_primitive_pairs, PrimitivePair};
