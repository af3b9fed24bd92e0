use serde::{Deserialize, Serialize};

/// how a block group column is normalized when its attractiveness values
/// cannot be divided by their sum, i.e. the column holds a non-finite value
/// or sums to zero or less.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NormalizationPolicy {
    /// sites with infinite attractiveness share the column equally. otherwise
    /// negatives are clamped to zero and the column is rescaled, falling back
    /// to a uniform split when nothing positive remains.
    #[default]
    Limit,
    /// every non-finite quotient is replaced with `value`.
    Fill { value: f64 },
    /// raise a normalization error
    Fail,
}
