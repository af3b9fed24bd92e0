#[allow(clippy::module_inception)]
mod population;

pub use population::{Population, POPULATION_TABLE};
