use super::{AcreagePolicy, CalibrationPolicy, NormalizationPolicy};
use crate::model::ChoiceModelError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_DISTANCE_COEFFICIENT: f64 = -0.011;

/// numeric parameters of the choice model.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct ModelParameters {
    /// utility per mile of travel, expected to be negative
    pub distance_coefficient: f64,
    /// trips generated per resident when projecting population onto sites.
    /// a value of `10 * 15.79 / 11.29` reproduces the legacy utility variant.
    pub trips_per_person: f64,
    pub acreage: AcreagePolicy,
    pub calibration: CalibrationPolicy,
    pub normalization: NormalizationPolicy,
}

impl Default for ModelParameters {
    fn default() -> Self {
        Self {
            distance_coefficient: DEFAULT_DISTANCE_COEFFICIENT,
            trips_per_person: 1.0,
            acreage: AcreagePolicy::default(),
            calibration: CalibrationPolicy::default(),
            normalization: NormalizationPolicy::default(),
        }
    }
}

impl ModelParameters {
    pub fn validate(&self) -> Result<(), ChoiceModelError> {
        let finite = [
            ("distance_coefficient", self.distance_coefficient),
            ("trips_per_person", self.trips_per_person),
            ("acreage.threshold", self.acreage.threshold),
            ("acreage.large_site_scalar", self.acreage.large_site_scalar),
            ("calibration.observed_visit_scale", self.calibration.observed_visit_scale),
            ("calibration.min_slope_magnitude", self.calibration.min_slope_magnitude),
        ];
        if let Some((name, value)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ChoiceModelError::Configuration(format!(
                "{name} must be finite, found {value}"
            )));
        }
        if self.trips_per_person <= 0.0 {
            return Err(ChoiceModelError::Configuration(format!(
                "trips_per_person must be positive, found {}",
                self.trips_per_person
            )));
        }
        if self.calibration.min_slope_magnitude < 0.0 {
            return Err(ChoiceModelError::Configuration(format!(
                "calibration.min_slope_magnitude must be non-negative, found {}",
                self.calibration.min_slope_magnitude
            )));
        }
        if self.distance_coefficient > 0.0 {
            log::warn!(
                "distance_coefficient {} is positive, sites will become more attractive with distance",
                self.distance_coefficient
            );
        }
        Ok(())
    }
}

impl TryFrom<&String> for ModelParameters {
    type Error = ChoiceModelError;

    /// reads model parameters from a standalone `.toml` or `.json` file.
    fn try_from(f: &String) -> Result<Self, Self::Error> {
        let s = std::fs::read_to_string(f)
            .map_err(|e| ChoiceModelError::Configuration(format!("failure reading {f}: {e}")))?;
        let params: ModelParameters = if f.ends_with(".toml") {
            toml::from_str(&s).map_err(|e| {
                ChoiceModelError::Configuration(format!("failure decoding {f}: {e}"))
            })?
        } else if f.ends_with(".json") {
            serde_json::from_str(&s).map_err(|e| {
                ChoiceModelError::Configuration(format!("failure decoding {f}: {e}"))
            })?
        } else {
            return Err(ChoiceModelError::Configuration(format!(
                "unsupported file type: {f}"
            )));
        };
        params.validate()?;
        Ok(params)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::config::{AcreageBoundary, DegenerateCalibrationPolicy};

    #[test]
    fn test_partial_toml_uses_defaults() {
        let params: ModelParameters = toml::from_str(
            r#"
            trips_per_person = 2.5

            [acreage]
            boundary = "small"

            [normalization]
            type = "fill"
            value = 1.0
            "#,
        )
        .expect("valid toml");
        assert_eq!(params.trips_per_person, 2.5);
        assert_eq!(params.distance_coefficient, DEFAULT_DISTANCE_COEFFICIENT);
        assert_eq!(params.acreage.boundary, AcreageBoundary::Small);
        assert_eq!(params.acreage.threshold, 3000.0);
        assert_eq!(params.normalization, NormalizationPolicy::Fill { value: 1.0 });
        assert_eq!(
            params.calibration.degenerate_policy,
            DegenerateCalibrationPolicy::Identity
        );
    }

    #[test]
    fn test_validate_rejects_negative_trips() {
        let params = ModelParameters {
            trips_per_person: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ChoiceModelError::Configuration(_))
        ));
    }
}
