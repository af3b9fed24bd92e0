use serde::{de, Deserialize, Deserializer, Serialize};

pub const N_ATTRIBUTES: usize = 10;

/// column names of the site attribute table, in coefficient order.
pub const ATTRIBUTE_NAMES: [&str; N_ATTRIBUTES] = [
    "acres",
    "trails",
    "trail_miles",
    "picnic_area",
    "sports_facilities",
    "swimming_facilities",
    "boat_launch",
    "waterbody",
    "bathrooms",
    "playgrounds",
];

/// the ten physical and amenity attributes of a recreation site. every field
/// is held as a float; counts and presence flags are coerced on read.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct SiteAttributes {
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

impl SiteAttributes {
    pub fn to_array(&self) -> [f64; N_ATTRIBUTES] {
        [
            self.acres,
            self.trails,
            self.trail_miles,
            self.picnic_area,
            self.sports_facilities,
            self.swimming_facilities,
            self.boat_launch,
            self.waterbody,
            self.bathrooms,
            self.playgrounds,
        ]
    }

    pub fn from_array(values: [f64; N_ATTRIBUTES]) -> SiteAttributes {
        let [
            acres,
            trails,
            trail_miles,
            picnic_area,
            sports_facilities,
            swimming_facilities,
            boat_launch,
            waterbody,
            bathrooms,
            playgrounds,
        ] = values;
        SiteAttributes {
            acres,
            trails,
            trail_miles,
            picnic_area,
            sports_facilities,
            swimming_facilities,
            boat_launch,
            waterbody,
            bathrooms,
            playgrounds,
        }
    }

    /// copy of these attributes with a replaced acreage value
    pub fn with_acres(&self, acres: f64) -> SiteAttributes {
        SiteAttributes { acres, ..*self }
    }
}

/// raw cell values accepted for a numeric attribute
#[derive(Deserialize)]
#[serde(untagged)]
enum AttributeValue {
    Number(f64),
    Flag(bool),
    Text(String),
}

/// deserializes numbers, booleans and numeric/boolean strings into an f64.
pub fn coerce_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match AttributeValue::deserialize(deserializer)? {
        AttributeValue::Number(n) if n.is_finite() => Ok(n),
        AttributeValue::Number(n) => Err(de::Error::custom(format!(
            "expected a finite value, found '{n}'"
        ))),
        AttributeValue::Flag(b) => Ok(if b { 1.0 } else { 0.0 }),
        AttributeValue::Text(s) => parse_attribute_str(&s).ok_or_else(|| {
            de::Error::custom(format!("expected numeric or boolean value, found '{s}'"))
        }),
    }
}

/// parses a numeric or boolean token. empty strings, NaN and infinities are
/// not accepted.
pub fn parse_attribute_str(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    match trimmed.to_lowercase().as_str() {
        "true" | "yes" => Some(1.0),
        "false" | "no" => Some(0.0),
        _ => trimmed.parse::<f64>().ok().filter(|v| v.is_finite()),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_coerce_mixed_json_types() {
        let json = serde_json::json!({
            "acres": 100,
            "trails": "3",
            "trail_miles": 10.5,
            "picnic_area": true,
            "sports_facilities": false,
            "swimming_facilities": "no",
            "boat_launch": 0,
            "waterbody": "True",
            "bathrooms": 2,
            "playgrounds": 1
        });
        let attrs: SiteAttributes = serde_json::from_value(json).expect("should deserialize");
        assert_eq!(
            attrs.to_array(),
            [100.0, 3.0, 10.5, 1.0, 0.0, 0.0, 0.0, 1.0, 2.0, 1.0]
        );
    }

    #[test]
    fn test_reject_non_numeric_text() {
        let json = serde_json::json!({
            "acres": "lots",
            "trails": 0, "trail_miles": 0, "picnic_area": 0, "sports_facilities": 0,
            "swimming_facilities": 0, "boat_launch": 0, "waterbody": 0, "bathrooms": 0,
            "playgrounds": 0
        });
        let result = serde_json::from_value::<SiteAttributes>(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_reject_non_finite_text() {
        assert_eq!(parse_attribute_str("NaN"), None);
        assert_eq!(parse_attribute_str("inf"), None);
        assert_eq!(parse_attribute_str("-infinity"), None);
        assert_eq!(parse_attribute_str(" 2.5 "), Some(2.5));
        let json = serde_json::json!({
            "acres": "NaN",
            "trails": 0, "trail_miles": 0, "picnic_area": 0, "sports_facilities": 0,
            "swimming_facilities": 0, "boat_launch": 0, "waterbody": 0, "bathrooms": 0,
            "playgrounds": 0
        });
        assert!(serde_json::from_value::<SiteAttributes>(json).is_err());
    }

    #[test]
    fn test_array_order_matches_names() {
        let attrs = SiteAttributes::from_array([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]);
        assert_eq!(attrs.acres, 1.0);
        assert_eq!(attrs.playgrounds, 10.0);
        assert_eq!(ATTRIBUTE_NAMES[2], "trail_miles");
        assert_eq!(attrs.trail_miles, 3.0);
        assert_eq!(attrs.with_acres(50.0).to_array()[0], 50.0);
    }
}
