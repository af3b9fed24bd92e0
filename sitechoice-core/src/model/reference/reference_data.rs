use super::{read_ops, DataLoadError, ReferenceDataConfig};
use crate::model::{
    block_group::{BlockGroup, BlockGroupCentroids},
    calibration::BaselineVisitation,
    distance::{DistanceMatrix, DISTANCE_TABLE},
    population::Population,
    site::{Site, SiteCoefficients},
};
use geo::Point;
use kdam::BarBuilder;
use std::collections::BTreeMap;

/// the immutable reference tables shared by every model evaluation.
///
/// population rows are reordered on construction so that index `i` of every
/// population vector refers to column `i` of the distance matrix.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    pub sites: BTreeMap<String, Site>,
    pub coefficients: SiteCoefficients,
    pub distances: DistanceMatrix,
    pub population: Population,
    pub baseline_visits: BaselineVisitation,
    pub centroids: Option<BlockGroupCentroids>,
}

impl ReferenceData {
    pub fn new(
        sites: BTreeMap<String, Site>,
        coefficients: SiteCoefficients,
        distances: DistanceMatrix,
        population: Population,
        baseline_visits: BaselineVisitation,
        centroids: Option<BlockGroupCentroids>,
    ) -> Result<ReferenceData, DataLoadError> {
        if let Some(missing) = sites.keys().find(|name| !distances.contains(name)) {
            return Err(DataLoadError::MissingKey {
                table: DISTANCE_TABLE.to_string(),
                key: missing.clone(),
            });
        }
        let population = population.aligned_to(distances.block_groups())?;
        Ok(ReferenceData {
            sites,
            coefficients,
            distances,
            population,
            baseline_visits,
            centroids,
        })
    }

    /// reads every reference table named in the configuration.
    pub fn load(config: &ReferenceDataConfig) -> Result<ReferenceData, DataLoadError> {
        log::info!("reading site table from {}", config.sites_file);
        let sites = read_ops::read_sites(
            read_ops::open_table(read_ops::SITE_TABLE, &config.sites_file)?,
            Some(BarBuilder::default().desc("sites")),
        )?;
        log::info!("reading coefficients from {}", config.coefficients_file);
        let coefficients = read_ops::read_coefficients(read_ops::open_table(
            read_ops::COEFFICIENTS_TABLE,
            &config.coefficients_file,
        )?)?;
        log::info!("reading distance matrix from {}", config.distances_file);
        let distances = read_ops::read_distance_matrix(
            read_ops::open_table(DISTANCE_TABLE, &config.distances_file)?,
            Some(BarBuilder::default().desc("distances")),
        )?;
        log::info!("reading population from {}", config.population_file);
        let population = read_ops::read_population(read_ops::open_table(
            crate::model::population::POPULATION_TABLE,
            &config.population_file,
        )?)?;
        log::info!("reading baseline visits from {}", config.baseline_visits_file);
        let baseline_visits = read_ops::read_baseline_visits(read_ops::open_table(
            read_ops::BASELINE_VISITS_TABLE,
            &config.baseline_visits_file,
        )?)?;
        let centroids = match &config.centroids_file {
            Some(f) => {
                log::info!("reading block group centroids from {f}");
                Some(BlockGroupCentroids::from_geojson_file(f)?)
            }
            None => None,
        };
        log::info!(
            "loaded {} sites, {} distance rows, {} block groups, {} demographic groups",
            sites.len(),
            distances.n_rows(),
            distances.n_block_groups(),
            population.group_names().count()
        );
        ReferenceData::new(
            sites,
            coefficients,
            distances,
            population,
            baseline_visits,
            centroids,
        )
    }

    /// reference coordinate of a block group: the coordinate carried by its
    /// label, otherwise its centroid by GEOID.
    pub fn block_group_point(&self, block_group: &BlockGroup) -> Option<Point<f64>> {
        block_group.coordinate.or_else(|| {
            self.centroids
                .as_ref()
                .and_then(|c| c.get(block_group.id.trim()).copied())
        })
    }

    pub fn centroid(&self, geoid: &str) -> Option<Point<f64>> {
        self.centroids.as_ref().and_then(|c| c.get(geoid).copied())
    }
}
