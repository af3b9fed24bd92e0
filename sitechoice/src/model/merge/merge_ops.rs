use crate::model::ChoiceModelError;
use geo::Point;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use sitechoice_core::{
    model::{
        reference::ReferenceData,
        site::{ModifiedSite, Site, SiteLocation},
    },
    util::geo_utils::haversine_miles,
};
use std::collections::BTreeMap;

/// the baseline site table merged with a scenario's edits, along with the
/// distance rows synthesized for sites the baseline matrix does not know.
#[derive(Debug, Clone, Default)]
pub struct MergedSites {
    pub sites: BTreeMap<String, Site>,
    pub added_distances: BTreeMap<String, Vec<f64>>,
}

/// latitude and longitude of one site
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct SiteCoordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// applies modified sites to the baseline catalog by name. an existing name
/// replaces the baseline attributes and keeps the baseline coordinates; a new
/// name adds a custom site at its resolved location. when a scenario edits
/// the same name twice the later edit wins.
///
/// every custom site absent from the baseline distance matrix gets one
/// synthesized haversine row.
pub fn merge_scenario(
    reference: &ReferenceData,
    modified_sites: &[ModifiedSite],
) -> Result<MergedSites, ChoiceModelError> {
    let mut sites = reference.sites.clone();
    let mut n_overrides = 0;
    let mut custom: BTreeMap<String, Site> = BTreeMap::new();
    for modified in modified_sites.iter() {
        match reference.sites.get(&modified.name) {
            Some(baseline) => {
                let site = Site {
                    attributes: modified.attributes,
                    ..baseline.clone()
                };
                sites.insert(site.name.clone(), site);
                n_overrides += 1;
            }
            None => {
                let point = resolve_location(reference, modified)?;
                let site = Site {
                    name: modified.name.clone(),
                    latitude: point.y(),
                    longitude: point.x(),
                    attributes: modified.attributes,
                };
                if custom.insert(site.name.clone(), site.clone()).is_some() {
                    log::debug!("scenario edits custom site '{}' more than once", site.name);
                }
                sites.insert(site.name.clone(), site);
            }
        }
    }

    let added_distances = custom
        .par_iter()
        .filter(|(name, _)| !reference.distances.contains(name))
        .map(|(name, site)| {
            synthesize_distance_row(reference, site).map(|row| (name.clone(), row))
        })
        .collect::<Result<BTreeMap<_, _>, _>>()?;

    log::debug!(
        "merged {} baseline sites with {} overrides and {} custom sites, synthesized {} distance rows",
        reference.sites.len(),
        n_overrides,
        custom.len(),
        added_distances.len()
    );
    Ok(MergedSites {
        sites,
        added_distances,
    })
}

/// the coordinate of a modified site: explicit coordinates, or the internal
/// point of the block group it names.
pub fn resolve_location(
    reference: &ReferenceData,
    modified: &ModifiedSite,
) -> Result<Point<f64>, ChoiceModelError> {
    match &modified.location {
        Some(SiteLocation::Coordinates {
            latitude,
            longitude,
        }) => {
            let valid = (-90.0..=90.0).contains(latitude) && (-180.0..=180.0).contains(longitude);
            if valid {
                Ok(Point::new(*longitude, *latitude))
            } else {
                Err(ChoiceModelError::UnknownSite {
                    site: modified.name.clone(),
                    msg: format!("coordinate ({latitude}, {longitude}) is out of range"),
                })
            }
        }
        Some(SiteLocation::BlockGroup { geoid }) => {
            reference
                .centroid(geoid)
                .ok_or_else(|| ChoiceModelError::UnknownSite {
                    site: modified.name.clone(),
                    msg: format!("no centroid found for block group '{geoid}'"),
                })
        }
        None => Err(ChoiceModelError::UnknownSite {
            site: modified.name.clone(),
            msg: String::from("a new site requires a location"),
        }),
    }
}

/// haversine miles from a site to every block group's reference coordinate,
/// in distance matrix column order.
pub fn synthesize_distance_row(
    reference: &ReferenceData,
    site: &Site,
) -> Result<Vec<f64>, ChoiceModelError> {
    let origin = site.point();
    reference
        .distances
        .block_groups()
        .iter()
        .map(|bg| {
            reference
                .block_group_point(bg)
                .map(|p| haversine_miles(origin, p))
                .ok_or_else(|| ChoiceModelError::UnknownSite {
                    site: site.name.clone(),
                    msg: format!("block group '{bg}' has no reference coordinate"),
                })
        })
        .collect()
}

/// coordinates of every merged site
pub fn site_locations(sites: &BTreeMap<String, Site>) -> BTreeMap<String, SiteCoordinates> {
    sites
        .iter()
        .map(|(name, site)| {
            let coords = SiteCoordinates {
                latitude: site.latitude,
                longitude: site.longitude,
            };
            (name.clone(), coords)
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::test_fixtures::{self, attributes, reference_data};
    use sitechoice_core::model::block_group::BlockGroupCentroids;
    use std::collections::HashMap;

    fn custom(name: &str, latitude: f64, longitude: f64) -> ModifiedSite {
        ModifiedSite::new(
            name,
            Some(SiteLocation::Coordinates {
                latitude,
                longitude,
            }),
            attributes(10.0, 1.0, 1.0),
        )
    }

    #[test]
    fn test_empty_scenario_is_baseline() {
        let reference = reference_data();
        let merged = merge_scenario(&reference, &[]).expect("merge succeeds");
        assert_eq!(merged.sites, reference.sites);
        assert!(merged.added_distances.is_empty());
    }

    #[test]
    fn test_new_site_adds_one_haversine_row() {
        let reference = reference_data();
        let merged =
            merge_scenario(&reference, &[custom("D", 35.5, -78.5)]).expect("merge succeeds");
        assert_eq!(merged.sites.len(), 4);
        assert_eq!(merged.added_distances.len(), 1);
        let row = merged.added_distances.get("D").expect("row for D");
        let origin = Point::new(-78.5, 35.5);
        let expected = [
            haversine_miles(origin, Point::new(-78.0, 35.0)),
            haversine_miles(origin, Point::new(-79.0, 36.0)),
        ];
        assert_eq!(row.as_slice(), expected.as_slice());
        // 0.5 degrees of latitude and longitude near 35N is roughly 44 miles
        test_fixtures::assert_close(row[0], 44.4, 1.0);
    }

    #[test]
    fn test_override_replaces_row() {
        let reference = reference_data();
        let edit = ModifiedSite::new("B", None, attributes(10.0, 5.0, 1.0));
        let merged = merge_scenario(&reference, &[edit]).expect("merge succeeds");
        assert_eq!(merged.sites.len(), 3);
        assert!(merged.added_distances.is_empty());
        let b = merged.sites.get("B").expect("B is present");
        assert_eq!(b.attributes.trails, 5.0);
        assert_eq!((b.latitude, b.longitude), (35.8, -78.9));
    }

    #[test]
    fn test_later_edit_wins() {
        let reference = reference_data();
        let merged = merge_scenario(
            &reference,
            &[custom("D", 35.5, -78.5), custom("D", 35.6, -78.6)],
        )
        .expect("merge succeeds");
        assert_eq!(merged.added_distances.len(), 1);
        assert_eq!(merged.sites.get("D").map(|s| s.latitude), Some(35.6));
    }

    #[test]
    fn test_new_site_without_location_is_unknown() {
        let reference = reference_data();
        let edit = ModifiedSite::new("D", None, attributes(10.0, 1.0, 1.0));
        assert!(matches!(
            merge_scenario(&reference, &[edit]),
            Err(ChoiceModelError::UnknownSite { .. })
        ));
    }

    #[test]
    fn test_block_group_location_resolves_through_centroids() {
        let mut reference = reference_data();
        let geoid = String::from("371830501001");
        let edit = ModifiedSite::new(
            "D",
            Some(SiteLocation::BlockGroup {
                geoid: geoid.clone(),
            }),
            attributes(10.0, 1.0, 1.0),
        );
        assert!(matches!(
            merge_scenario(&reference, std::slice::from_ref(&edit)),
            Err(ChoiceModelError::UnknownSite { .. })
        ));
        reference.centroids = Some(BlockGroupCentroids::new(HashMap::from([(
            geoid,
            Point::new(-78.64, 35.78),
        )])));
        let merged = merge_scenario(&reference, &[edit]).expect("merge succeeds");
        let d = merged.sites.get("D").expect("D is present");
        assert_eq!((d.latitude, d.longitude), (35.78, -78.64));
    }

    #[test]
    fn test_site_locations_include_custom_sites() {
        let reference = reference_data();
        let merged =
            merge_scenario(&reference, &[custom("D", 35.5, -78.5)]).expect("merge succeeds");
        let locations = site_locations(&merged.sites);
        assert_eq!(locations.len(), 4);
        assert_eq!(
            locations.get("D"),
            Some(&SiteCoordinates {
                latitude: 35.5,
                longitude: -78.5
            })
        );
        assert_eq!(locations.get("A").map(|c| c.latitude), Some(35.2));
    }
}
