use super::{site_attributes::coerce_f64, SiteAttributes};
use geo::Point;
use serde::{Deserialize, Serialize};

/// a baseline catalog entry: a recreation area with coordinates and its amenity attributes.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Site {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(flatten)]
    pub attributes: SiteAttributes,
}

impl Site {
    /// coordinate in x=longitude, y=latitude order
    pub fn point(&self) -> Point<f64> {
        Point::new(self.longitude, self.latitude)
    }
}

/// flat row of the site table, since csv rows cannot be deserialized into flattened structs.
#[derive(Deserialize, Debug, Clone)]
pub struct SiteRecord {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(deserialize_with = "coerce_f64")]
    pub acres: f64,
    #[serde(deserialize_with = "coerce_f64")]
    pub trails: f64,
    #[serde(deserialize_with = "coerce_f64")]
    pub trail_miles: f64,
    #[serde(deserialize_with = "coerce_f64")]
    pub picnic_area: f64,
    #[serde(deserialize_with = "coerce_f64")]
    pub sports_facilities: f64,
    #[serde(deserialize_with = "coerce_f64")]
    pub swimming_facilities: f64,
    #[serde(deserialize_with = "coerce_f64")]
    pub boat_launch: f64,
    #[serde(deserialize_with = "coerce_f64")]
    pub waterbody: f64,
    #[serde(deserialize_with = "coerce_f64")]
    pub bathrooms: f64,
    #[serde(deserialize_with = "coerce_f64")]
    pub playgrounds: f64,
}

impl From<SiteRecord> for Site {
    fn from(r: SiteRecord) -> Self {
        Site {
            name: r.name,
            latitude: r.latitude,
            longitude: r.longitude,
            attributes: SiteAttributes {
                acres: r.acres,
                trails: r.trails,
                trail_miles: r.trail_miles,
                picnic_area: r.picnic_area,
                sports_facilities: r.sports_facilities,
                swimming_facilities: r.swimming_facilities,
                boat_launch: r.boat_launch,
                waterbody: r.waterbody,
                bathrooms: r.bathrooms,
                playgrounds: r.playgrounds,
            },
        }
    }
}
