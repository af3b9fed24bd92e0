use serde::{Deserialize, Serialize};

/// which side of the threshold an acreage exactly equal to it falls on.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum AcreageBoundary {
    /// `acres >= threshold` is a large site
    #[default]
    Large,
    /// `acres > threshold` is a large site
    Small,
}

/// damping applied to the acreage of very large sites before the linear utility.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct AcreagePolicy {
    pub threshold: f64,
    pub large_site_scalar: f64,
    pub boundary: AcreageBoundary,
}

impl Default for AcreagePolicy {
    fn default() -> Self {
        Self {
            threshold: 3000.0,
            large_site_scalar: 0.2,
            boundary: AcreageBoundary::Large,
        }
    }
}

impl AcreagePolicy {
    pub fn is_large(&self, acres: f64) -> bool {
        match self.boundary {
            AcreageBoundary::Large => acres >= self.threshold,
            AcreageBoundary::Small => acres > self.threshold,
        }
    }

    pub fn adjust(&self, acres: f64) -> f64 {
        if self.is_large(acres) {
            acres * self.large_site_scalar
        } else {
            acres
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_threshold_is_large_by_default() {
        let policy = AcreagePolicy::default();
        assert_eq!(policy.adjust(3000.0), 600.0);
        assert_eq!(policy.adjust(2999.0), 2999.0);
        assert_eq!(policy.adjust(5000.0), 1000.0);
    }

    #[test]
    fn test_small_boundary_keeps_threshold_unscaled() {
        let policy = AcreagePolicy {
            boundary: AcreageBoundary::Small,
            ..Default::default()
        };
        assert_eq!(policy.adjust(3000.0), 3000.0);
        assert!((policy.adjust(3000.5) - 600.1).abs() < 1e-9);
    }
}
