#[allow(clippy::module_inception)]
mod block_group;
mod block_group_centroids;

pub use block_group::BlockGroup;
pub use block_group_centroids::BlockGroupCentroids;
