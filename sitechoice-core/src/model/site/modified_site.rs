use super::SiteAttributes;
use geo::Point;
use serde::{Deserialize, Serialize};

/// where a user-proposed site sits. a site may be placed either with explicit
/// coordinates or at the internal point of a census block group.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum SiteLocation {
    Coordinates { latitude: f64, longitude: f64 },
    BlockGroup { geoid: String },
}

impl SiteLocation {
    /// the explicit coordinate of this location, if it has one.
    pub fn point(&self) -> Option<Point<f64>> {
        match self {
            SiteLocation::Coordinates {
                latitude,
                longitude,
            } => Some(Point::new(*longitude, *latitude)),
            SiteLocation::BlockGroup { .. } => None,
        }
    }
}

/// a user edit within a scenario. when `name` matches a baseline site this
/// overrides that site's attributes, otherwise it adds a new custom site.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ModifiedSite {
    pub name: String,
    #[serde(default)]
    pub location: Option<SiteLocation>,
    #[serde(flatten)]
    pub attributes: SiteAttributes,
}

impl ModifiedSite {
    pub fn new(name: &str, location: Option<SiteLocation>, attributes: SiteAttributes) -> Self {
        ModifiedSite {
            name: name.to_string(),
            location,
            attributes,
        }
    }
}
