use crate::model::{config::AcreagePolicy, merge::LayeredDistances, ChoiceModelError, SiteMatrix};
use sitechoice_core::model::site::{Site, SiteAttributes, SiteCoefficients};
use std::collections::BTreeMap;

/// a copy of the attributes with the large-site acreage damping applied.
pub fn adjust_acreage(attributes: &SiteAttributes, policy: &AcreagePolicy) -> SiteAttributes {
    attributes.with_acres(policy.adjust(attributes.acres))
}

/// linear utility of each site's adjusted attributes.
pub fn site_products(
    sites: &BTreeMap<String, Site>,
    coefficients: &SiteCoefficients,
    policy: &AcreagePolicy,
) -> BTreeMap<String, f64> {
    sites
        .iter()
        .map(|(name, site)| {
            let adjusted = adjust_acreage(&site.attributes, policy);
            (name.clone(), coefficients.dot(&adjusted))
        })
        .collect()
}

/// distance-decay utility of one distance row
pub fn distance_product(row: &[f64], distance_coefficient: f64) -> Vec<f64> {
    row.iter().map(|d| d * distance_coefficient).collect()
}

/// site product broadcast across block groups plus the distance product, for
/// every site with both a site product and a distance row, ordered by name.
pub fn raw_utility(
    site_products: &BTreeMap<String, f64>,
    distances: &LayeredDistances,
    distance_coefficient: f64,
) -> Result<SiteMatrix, ChoiceModelError> {
    let mut sites = vec![];
    let mut values = vec![];
    for (name, product) in site_products.iter() {
        if let Some(row) = distances.row(name) {
            let utility = distance_product(row, distance_coefficient)
                .into_iter()
                .map(|d| product + d)
                .collect::<Vec<_>>();
            sites.push(name.clone());
            values.push(utility);
        }
    }
    log::debug!(
        "raw utility covers {} of {} sites and {} distance rows",
        sites.len(),
        site_products.len(),
        distances.n_rows()
    );
    SiteMatrix::new(sites, distances.block_group_ids(), values)
}
