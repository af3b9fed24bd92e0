use geo::Point;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// a census block group column of the distance matrix.
///
/// block group labels may carry their reference coordinate as the two trailing
/// comma-separated fields, for example `"37183, 0501, 1, 35.79, -78.64"`. when
/// present, that coordinate is used to synthesize distances to new sites.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BlockGroup {
    pub id: String,
    pub coordinate: Option<Point<f64>>,
}

impl BlockGroup {
    pub fn new(id: &str, coordinate: Option<Point<f64>>) -> BlockGroup {
        BlockGroup {
            id: id.to_string(),
            coordinate,
        }
    }

    /// builds a block group from a column label, reading any trailing "lat, lon" pair.
    pub fn from_label(label: &str) -> BlockGroup {
        let coordinate = parse_label_coordinate(label);
        BlockGroup {
            id: label.to_string(),
            coordinate,
        }
    }
}

impl Display for BlockGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// reads the last two comma-delimited fields of a label as latitude, longitude.
fn parse_label_coordinate(label: &str) -> Option<Point<f64>> {
    let mut fields = label.rsplit(',').map(str::trim);
    let lon = fields.next()?.parse::<f64>().ok()?;
    let lat = fields.next()?.parse::<f64>().ok()?;
    let valid = (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon);
    if valid {
        Some(Point::new(lon, lat))
    } else {
        None
    }
}

#[cfg(test)]
mod test {
    use super::BlockGroup;

    #[test]
    fn test_label_with_coordinates() {
        let bg = BlockGroup::from_label("371830501001, 35.7796, -78.6382");
        let coord = bg.coordinate.expect("label should carry a coordinate");
        assert_eq!(coord.y(), 35.7796);
        assert_eq!(coord.x(), -78.6382);
        assert_eq!(bg.id, "371830501001, 35.7796, -78.6382");
    }

    #[test]
    fn test_label_without_coordinates() {
        assert!(BlockGroup::from_label("371830501001").coordinate.is_none());
        assert!(BlockGroup::from_label("a, b").coordinate.is_none());
        assert!(BlockGroup::from_label("bg, 135.0, 10.0").coordinate.is_none());
    }
}
