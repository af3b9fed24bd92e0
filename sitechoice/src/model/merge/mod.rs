mod layered_distances;
pub mod merge_ops;

pub use layered_distances::LayeredDistances;
pub use merge_ops::MergedSites;
