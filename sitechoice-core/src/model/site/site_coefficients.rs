use super::{site_attributes::N_ATTRIBUTES, SiteAttributes};
use serde::{Deserialize, Serialize};

/// one weight per site attribute, used in the linear site utility.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(from = "SiteAttributes", into = "SiteAttributes")]
pub struct SiteCoefficients {
    weights: [f64; N_ATTRIBUTES],
}

impl SiteCoefficients {
    pub fn new(weights: [f64; N_ATTRIBUTES]) -> SiteCoefficients {
        SiteCoefficients { weights }
    }

    pub fn weights(&self) -> &[f64; N_ATTRIBUTES] {
        &self.weights
    }

    /// sum of attribute × weight over all attributes
    pub fn dot(&self, attributes: &SiteAttributes) -> f64 {
        attributes
            .to_array()
            .iter()
            .zip(self.weights.iter())
            .map(|(a, w)| a * w)
            .sum()
    }
}

impl From<SiteAttributes> for SiteCoefficients {
    fn from(value: SiteAttributes) -> Self {
        SiteCoefficients {
            weights: value.to_array(),
        }
    }
}

impl From<SiteCoefficients> for SiteAttributes {
    fn from(value: SiteCoefficients) -> Self {
        SiteAttributes::from_array(value.weights)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_dot() {
        let coefficients =
            SiteCoefficients::new([0.001, 0.1, 0.05, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8]);
        let attributes =
            SiteAttributes::from_array([100.0, 2.0, 4.0, 1.0, 0.0, 0.0, 0.0, 1.0, 1.0, 0.0]);
        // 0.1 + 0.2 + 0.2 + 0.2 + 0.6 + 0.7
        assert!((coefficients.dot(&attributes) - 2.0).abs() < 1e-12);
    }
}
