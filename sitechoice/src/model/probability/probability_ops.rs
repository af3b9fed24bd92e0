use crate::model::{config::NormalizationPolicy, ChoiceModelError, SiteMatrix};
use indexmap::IndexMap;
use std::collections::BTreeMap;

/// share of each block group's trips that go to each site. every column is
/// normalized on its own; see [`normalize_column`].
pub fn visitation_probability(
    calibrated: &SiteMatrix,
    policy: &NormalizationPolicy,
) -> Result<SiteMatrix, ChoiceModelError> {
    let columns = calibrated
        .block_groups()
        .iter()
        .enumerate()
        .map(|(idx, bg)| normalize_column(&calibrated.column(idx), bg, policy))
        .collect::<Result<Vec<_>, _>>()?;
    calibrated.with_columns(columns)
}

/// divides a column by its sum and clamps negative shares to zero,
/// rescaling the column when anything was clamped.
///
/// a column holding a non-finite value, or summing to zero or less, is
/// degenerate and is resolved by `policy`.
pub fn normalize_column(
    column: &[f64],
    block_group: &str,
    policy: &NormalizationPolicy,
) -> Result<Vec<f64>, ChoiceModelError> {
    if column.is_empty() {
        return Ok(vec![]);
    }
    let sum: f64 = column.iter().sum();
    let degenerate = column.iter().any(|v| !v.is_finite()) || !sum.is_finite() || sum <= 0.0;
    if !degenerate {
        let shares = column.iter().map(|v| v / sum).collect::<Vec<_>>();
        return Ok(clamp_and_rescale(shares));
    }

    match policy {
        NormalizationPolicy::Limit => {
            log::warn!(
                "block group '{block_group}' has degenerate attractiveness {column:?}, using limit shares"
            );
            Ok(limit_shares(column))
        }
        NormalizationPolicy::Fill { value } => {
            log::warn!(
                "block group '{block_group}' has degenerate attractiveness {column:?}, filling with {value}"
            );
            let filled = column
                .iter()
                .map(|v| {
                    let share = v / sum;
                    if share.is_finite() {
                        share.max(0.0)
                    } else {
                        *value
                    }
                })
                .collect();
            Ok(filled)
        }
        NormalizationPolicy::Fail => Err(ChoiceModelError::NormalizationDegenerate {
            block_group: block_group.to_string(),
            msg: format!("attractiveness {column:?} cannot be normalized"),
        }),
    }
}

fn clamp_and_rescale(shares: Vec<f64>) -> Vec<f64> {
    if shares.iter().all(|s| *s >= 0.0) {
        return shares;
    }
    let clamped = shares.into_iter().map(|s| s.max(0.0)).collect::<Vec<_>>();
    let total: f64 = clamped.iter().sum();
    if total > 0.0 {
        clamped.into_iter().map(|s| s / total).collect()
    } else {
        clamped
    }
}

/// the limiting shares of a degenerate column: sites at +inf split the column
/// equally, otherwise the positive finite values are rescaled, otherwise every
/// site gets an equal share.
fn limit_shares(column: &[f64]) -> Vec<f64> {
    let n_infinite = column.iter().filter(|v| **v == f64::INFINITY).count();
    if n_infinite > 0 {
        let share = 1.0 / n_infinite as f64;
        return column
            .iter()
            .map(|v| if *v == f64::INFINITY { share } else { 0.0 })
            .collect();
    }
    let positive = column
        .iter()
        .map(|v| if v.is_finite() && *v > 0.0 { *v } else { 0.0 })
        .collect::<Vec<_>>();
    let max = positive.iter().copied().fold(0.0, f64::max);
    if max > 0.0 {
        // scaled by the max so that the sum cannot overflow
        let scaled = positive.into_iter().map(|v| v / max).collect::<Vec<_>>();
        let total: f64 = scaled.iter().sum();
        scaled.into_iter().map(|v| v / total).collect()
    } else {
        vec![1.0 / column.len() as f64; column.len()]
    }
}

/// projected visits per site: Σ over block groups of probability × total
/// population × trips per person.
pub fn site_visits(
    probability: &SiteMatrix,
    block_group_population: &[f64],
    trips_per_person: f64,
) -> Result<BTreeMap<String, f64>, ChoiceModelError> {
    if block_group_population.len() != probability.n_block_groups() {
        return Err(ChoiceModelError::InternalError(format!(
            "{} block group population totals for {} probability columns",
            block_group_population.len(),
            probability.n_block_groups()
        )));
    }
    let visits = probability
        .sites()
        .iter()
        .zip(probability.rows().iter())
        .map(|(site, row)| {
            let v = row
                .iter()
                .zip(block_group_population.iter())
                .map(|(p, pop)| p * pop * trips_per_person)
                .sum();
            (site.clone(), v)
        })
        .collect();
    Ok(visits)
}

/// mean probability of each site across block groups
pub fn mean_probability(probability: &SiteMatrix) -> IndexMap<String, f64> {
    let n = probability.n_block_groups().max(1) as f64;
    probability
        .sites()
        .iter()
        .cloned()
        .zip(probability.row_sums().into_iter().map(|s| s / n))
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::test_fixtures::{
        assert_close, EXPECTED_CALIBRATED, EXPECTED_PROBABILITY, EXPECTED_VISITS,
    };

    fn calibrated() -> SiteMatrix {
        SiteMatrix::new(
            EXPECTED_CALIBRATED.iter().map(|(s, _)| s.to_string()).collect(),
            vec![String::from("bg1"), String::from("bg2")],
            EXPECTED_CALIBRATED.iter().map(|(_, r)| r.to_vec()).collect(),
        )
        .expect("valid matrix")
    }

    #[test]
    fn test_fixture_probability_and_visits() {
        let prob = visitation_probability(&calibrated(), &NormalizationPolicy::Limit)
            .expect("regular columns");
        for (site, expected) in EXPECTED_PROBABILITY {
            let row = prob.row(site).expect("site row");
            assert_close(row[0], expected[0], 1e-9);
            assert_close(row[1], expected[1], 1e-9);
        }
        for sum in prob.column_sums() {
            assert_close(sum, 1.0, 1e-12);
        }
        let visits = site_visits(&prob, &[400.0, 300.0], 1.0).expect("shapes agree");
        for (site, expected) in EXPECTED_VISITS {
            assert_close(visits[site], expected, 1e-6);
        }
    }

    #[test]
    fn test_negative_share_is_clamped_and_rescaled() {
        let shares = normalize_column(&[3.0, -1.0, 2.0], "bg", &NormalizationPolicy::Limit)
            .expect("regular column");
        assert_eq!(shares[1], 0.0);
        assert_close(shares[0], 0.6, 1e-12);
        assert_close(shares[2], 0.4, 1e-12);
    }

    #[test]
    fn test_infinite_sites_share_the_column() {
        let shares = normalize_column(
            &[f64::INFINITY, 1.0, f64::INFINITY],
            "bg",
            &NormalizationPolicy::Limit,
        )
        .expect("limit policy");
        assert_eq!(shares, vec![0.5, 0.0, 0.5]);
    }

    #[test]
    fn test_zero_sum_column_is_uniform_under_limit() {
        let shares = normalize_column(&[0.0, 0.0, 0.0, 0.0], "bg", &NormalizationPolicy::Limit)
            .expect("limit policy");
        assert_eq!(shares, vec![0.25; 4]);
        let shares = normalize_column(&[-2.0, 1.0], "bg", &NormalizationPolicy::Limit)
            .expect("limit policy");
        assert_eq!(shares, vec![0.0, 1.0]);
    }

    #[test]
    fn test_fill_policy_matches_legacy_behavior() {
        let shares = normalize_column(
            &[f64::INFINITY, 1.0],
            "bg",
            &NormalizationPolicy::Fill { value: 1.0 },
        )
        .expect("fill policy");
        assert_eq!(shares, vec![1.0, 0.0]);
    }

    #[test]
    fn test_fail_policy() {
        assert!(matches!(
            normalize_column(&[f64::NAN, 1.0], "bg", &NormalizationPolicy::Fail),
            Err(ChoiceModelError::NormalizationDegenerate { .. })
        ));
    }

    #[test]
    fn test_probabilities_are_never_negative_or_nan() {
        let columns: [&[f64]; 4] = [
            &[-5.0, -1.0],
            &[f64::NAN, 2.0],
            &[f64::NEG_INFINITY, 2.0],
            &[1e308, 1e308],
        ];
        for column in columns {
            let shares = normalize_column(column, "bg", &NormalizationPolicy::Limit)
                .expect("limit policy");
            assert!(shares.iter().all(|s| s.is_finite() && *s >= 0.0), "{shares:?}");
            assert_close(shares.iter().sum(), 1.0, 1e-12);
        }
    }

    #[test]
    fn test_mean_probability() {
        let prob = SiteMatrix::new(
            vec![String::from("a"), String::from("b")],
            vec![String::from("bg1"), String::from("bg2")],
            vec![vec![0.2, 0.6], vec![0.8, 0.4]],
        )
        .expect("valid matrix");
        let mean = mean_probability(&prob);
        assert_close(mean["a"], 0.4, 1e-12);
        assert_close(mean["b"], 0.6, 1e-12);
    }
}
