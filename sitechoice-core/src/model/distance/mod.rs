mod distance_matrix;

pub use distance_matrix::{DistanceMatrix, DISTANCE_TABLE};
