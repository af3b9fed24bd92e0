use crate::model::{
    config::ModelParameters, equity::EquityEvaluation, ChoiceModel, ChoiceModelError,
    ModelEvaluation,
};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use sitechoice_core::model::{calibration::CalibrationSet, reference::ReferenceData, site::Scenario};
use std::{collections::BTreeMap, sync::Arc};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SiteVisitDelta {
    pub site: String,
    pub baseline_visits: f64,
    pub scenario_visits: f64,
    pub delta: f64,
}

/// a scenario evaluated next to the baseline it edits
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ScenarioComparison {
    pub scenario_id: String,
    pub sites: Vec<SiteVisitDelta>,
    pub baseline_equity: EquityEvaluation,
    pub scenario_equity: EquityEvaluation,
}

/// evaluates the baseline and `scenario` concurrently against the same
/// reference tables and calibration target.
pub fn compare_scenario(
    reference: Arc<ReferenceData>,
    scenario: &Scenario,
    calibration_set: Option<&CalibrationSet>,
    params: ModelParameters,
) -> Result<ScenarioComparison, ChoiceModelError> {
    let (baseline, modified) = rayon::join(
        || evaluate(reference.clone(), None, calibration_set, params),
        || evaluate(reference.clone(), Some(scenario), calibration_set, params),
    );
    let baseline = baseline?;
    let modified = modified?;
    Ok(ScenarioComparison {
        scenario_id: scenario.id.clone(),
        sites: visit_deltas(&baseline.visits, &modified.visits),
        baseline_equity: baseline.equity,
        scenario_equity: modified.equity,
    })
}

fn evaluate(
    reference: Arc<ReferenceData>,
    scenario: Option<&Scenario>,
    calibration_set: Option<&CalibrationSet>,
    params: ModelParameters,
) -> Result<ModelEvaluation, ChoiceModelError> {
    ChoiceModel::new(reference, scenario, calibration_set, params)?.evaluate()
}

/// per-site visit change. a site missing from one side counts as zero visits there.
pub fn visit_deltas(
    baseline: &BTreeMap<String, f64>,
    scenario: &BTreeMap<String, f64>,
) -> Vec<SiteVisitDelta> {
    baseline
        .keys()
        .merge(scenario.keys())
        .dedup()
        .map(|site| {
            let baseline_visits = baseline.get(site).copied().unwrap_or_default();
            let scenario_visits = scenario.get(site).copied().unwrap_or_default();
            SiteVisitDelta {
                site: site.clone(),
                baseline_visits,
                scenario_visits,
                delta: scenario_visits - baseline_visits,
            }
        })
        .collect()
}
