use super::{BlockGroupUtility, EquityEvaluation};
use crate::model::{ChoiceModelError, SiteMatrix};
use indexmap::IndexMap;
use sitechoice_core::model::population::Population;

/// ln of calibrated attractiveness. non-positive and NaN values are floored
/// to 1 (utility 0) and +inf is capped at the largest finite float.
pub fn utility_index(calibrated: &SiteMatrix) -> SiteMatrix {
    calibrated.map(|v| {
        if v.is_nan() || v <= 0.0 {
            0.0
        } else {
            v.min(f64::MAX).ln()
        }
    })
}

/// trips × utility index for one demographic group, per site and block group.
/// trips are `group population × trips per person × probability`.
fn weighted_trips(
    probability: &SiteMatrix,
    utility: &SiteMatrix,
    counts: &[f64],
    trips_per_person: f64,
) -> Vec<Vec<f64>> {
    probability
        .rows()
        .iter()
        .zip(utility.rows().iter())
        .map(|(p_row, u_row)| {
            p_row
                .iter()
                .zip(u_row.iter())
                .zip(counts.iter())
                .map(|((p, u), pop)| pop * trips_per_person * p * u)
                .collect()
        })
        .collect()
}

fn check_shapes(
    calibrated: &SiteMatrix,
    probability: &SiteMatrix,
    population: &Population,
) -> Result<(), ChoiceModelError> {
    let aligned = calibrated.sites() == probability.sites()
        && calibrated.n_block_groups() == probability.n_block_groups()
        && population.block_groups().len() == probability.n_block_groups();
    if aligned {
        Ok(())
    } else {
        Err(ChoiceModelError::InternalError(format!(
            "equity inputs disagree: {}x{} calibrated, {}x{} probability, {} population block groups",
            calibrated.n_sites(),
            calibrated.n_block_groups(),
            probability.n_sites(),
            probability.n_block_groups(),
            population.block_groups().len()
        )))
    }
}

/// average utility per trip of each demographic group and the softmax of
/// those averages across groups.
pub fn equity_evaluation(
    calibrated: &SiteMatrix,
    probability: &SiteMatrix,
    population: &Population,
    trips_per_person: f64,
) -> Result<EquityEvaluation, ChoiceModelError> {
    check_shapes(calibrated, probability, population)?;
    let utility = utility_index(calibrated);
    let mut average_utility = IndexMap::new();
    for (group, counts) in population.iter_groups() {
        let group_trips = counts.iter().sum::<f64>() * trips_per_person;
        if group_trips <= 0.0 {
            return Err(ChoiceModelError::EmptyDemographicGroup(group.clone()));
        }
        let total: f64 = weighted_trips(probability, &utility, counts, trips_per_person)
            .iter()
            .flatten()
            .sum();
        average_utility.insert(group.clone(), total / group_trips);
    }
    let ratio = average_utility
        .keys()
        .cloned()
        .zip(softmax(&average_utility.values().copied().collect::<Vec<_>>()))
        .collect();
    log::debug!("average utility by group: {average_utility:?}");
    Ok(EquityEvaluation {
        average_utility,
        ratio,
    })
}

/// utility-weighted trips per block group, summed over sites, for every
/// demographic group.
pub fn utility_by_block_group(
    calibrated: &SiteMatrix,
    probability: &SiteMatrix,
    population: &Population,
    trips_per_person: f64,
) -> Result<BlockGroupUtility, ChoiceModelError> {
    check_shapes(calibrated, probability, population)?;
    let utility = utility_index(calibrated);
    let groups = population.group_names().cloned().collect::<Vec<_>>();
    let per_group = population
        .iter_groups()
        .map(|(_, counts)| {
            let weighted = weighted_trips(probability, &utility, counts, trips_per_person);
            (0..probability.n_block_groups())
                .map(|bg| weighted.iter().map(|row| row[bg]).sum::<f64>())
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();
    let block_groups = probability
        .block_groups()
        .iter()
        .enumerate()
        .map(|(bg, id)| (id.clone(), per_group.iter().map(|g| g[bg]).collect()))
        .collect();
    Ok(BlockGroupUtility {
        groups,
        block_groups,
    })
}

/// exp(x_i) / Σ exp(x_j), shifted by the max for stability
pub fn softmax(values: &[f64]) -> Vec<f64> {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps = values.iter().map(|v| (v - max).exp()).collect::<Vec<_>>();
    let total: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / total).collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::test_fixtures::{
        assert_close, reference_data, BG1, BG2, EXPECTED_AVERAGE_UTILITY,
        EXPECTED_BLOCK_GROUP_UTILITY, EXPECTED_CALIBRATED, EXPECTED_EQUITY_RATIO,
        EXPECTED_PROBABILITY,
    };

    fn matrix(rows: &[(&str, [f64; 2])]) -> SiteMatrix {
        SiteMatrix::new(
            rows.iter().map(|(s, _)| s.to_string()).collect(),
            vec![BG1.to_string(), BG2.to_string()],
            rows.iter().map(|(_, r)| r.to_vec()).collect(),
        )
        .expect("valid matrix")
    }

    #[test]
    fn test_fixture_equity() {
        let reference = reference_data();
        let equity = equity_evaluation(
            &matrix(&EXPECTED_CALIBRATED),
            &matrix(&EXPECTED_PROBABILITY),
            &reference.population,
            1.0,
        )
        .expect("equity evaluation");
        for (group, expected) in EXPECTED_AVERAGE_UTILITY {
            assert_close(equity.average_utility[group], expected, 1e-9);
        }
        for (group, expected) in EXPECTED_EQUITY_RATIO {
            assert_close(equity.ratio(group).expect("group exists"), expected, 1e-9);
        }
        assert_close(equity.ratio.values().sum(), 1.0, 1e-12);
    }

    #[test]
    fn test_fixture_block_group_utility() {
        let reference = reference_data();
        let by_bg = utility_by_block_group(
            &matrix(&EXPECTED_CALIBRATED),
            &matrix(&EXPECTED_PROBABILITY),
            &reference.population,
            1.0,
        )
        .expect("block group utility");
        assert_eq!(by_bg.groups, vec![String::from("Black"), String::from("Other")]);
        for (bg, expected) in EXPECTED_BLOCK_GROUP_UTILITY {
            assert_close(by_bg.get(bg, "Black").expect("value"), expected[0], 1e-6);
            assert_close(by_bg.get(bg, "Other").expect("value"), expected[1], 1e-6);
        }
    }

    #[test]
    fn test_trips_per_person_does_not_change_averages() {
        let reference = reference_data();
        let calibrated = matrix(&EXPECTED_CALIBRATED);
        let probability = matrix(&EXPECTED_PROBABILITY);
        let one = equity_evaluation(&calibrated, &probability, &reference.population, 1.0)
            .expect("equity evaluation");
        let legacy = equity_evaluation(
            &calibrated,
            &probability,
            &reference.population,
            10.0 * 15.79 / 11.29,
        )
        .expect("equity evaluation");
        for (group, avg) in one.average_utility.iter() {
            assert_close(legacy.average_utility[group], *avg, 1e-9);
        }
    }

    #[test]
    fn test_utility_index_floors_non_positive_values() {
        let m = SiteMatrix::new(
            vec![String::from("a")],
            vec![String::from("bg1"), String::from("bg2"), String::from("bg3")],
            vec![vec![-3.0, 0.0, std::f64::consts::E]],
        )
        .expect("valid matrix");
        let index = utility_index(&m);
        let row = index.row("a").expect("site row");
        assert_eq!(&row[..2], &[0.0, 0.0]);
        assert_close(row[2], 1.0, 1e-12);
    }

    #[test]
    fn test_empty_group_is_an_error() {
        let population = Population::new(
            vec![BG1.to_string(), BG2.to_string()],
            IndexMap::from([
                (String::from("Black"), vec![0.0, 0.0]),
                (String::from("Other"), vec![300.0, 100.0]),
            ]),
        )
        .expect("valid population");
        let result = equity_evaluation(
            &matrix(&EXPECTED_CALIBRATED),
            &matrix(&EXPECTED_PROBABILITY),
            &population,
            1.0,
        );
        match result {
            Err(ChoiceModelError::EmptyDemographicGroup(group)) => assert_eq!(group, "Black"),
            other => panic!("expected empty group error, found {other:?}"),
        }
    }

    #[test]
    fn test_softmax_is_stable_for_large_values() {
        let ratios = softmax(&[1000.0, 1000.0]);
        assert_eq!(ratios, vec![0.5, 0.5]);
        let ratios = softmax(&[0.0, 2.0_f64.ln()]);
        assert_close(ratios[0], 1.0 / 3.0, 1e-12);
    }
}
