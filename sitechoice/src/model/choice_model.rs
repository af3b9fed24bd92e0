use super::{
    attractiveness::attractiveness_ops,
    calibration::calibration_ops::{self, SiteCalibration},
    config::ModelParameters,
    equity::{equity_ops, BlockGroupUtility, EquityEvaluation},
    merge::{
        merge_ops::{self, SiteCoordinates},
        LayeredDistances, MergedSites,
    },
    probability::probability_ops,
    ChoiceModelError, ModelEvaluation, SiteMatrix, SiteSummary,
};
use sitechoice_core::model::{
    calibration::CalibrationSet,
    reference::ReferenceData,
    site::{Scenario, Site},
};
use std::{collections::BTreeMap, sync::Arc};

/// the site choice model for one user and an optional scenario.
///
/// construction merges the scenario into the shared reference tables and
/// synthesizes distance rows for new sites. every accessor recomputes its
/// result from that merged state and never mutates it, so a model may be
/// queried repeatedly or from several threads.
#[derive(Debug, Clone)]
pub struct ChoiceModel {
    reference: Arc<ReferenceData>,
    calibration_set: Option<CalibrationSet>,
    merged: MergedSites,
    params: ModelParameters,
}

impl ChoiceModel {
    pub fn new(
        reference: Arc<ReferenceData>,
        scenario: Option<&Scenario>,
        calibration_set: Option<&CalibrationSet>,
        params: ModelParameters,
    ) -> Result<ChoiceModel, ChoiceModelError> {
        params.validate()?;
        let modified_sites = scenario.map(|s| s.sites.as_slice()).unwrap_or_default();
        let merged = merge_ops::merge_scenario(&reference, modified_sites)?;
        log::info!(
            "built choice model for scenario '{}' with {} sites, calibrated against {}",
            scenario.map(|s| s.id.as_str()).unwrap_or("baseline"),
            merged.sites.len(),
            calibration_set
                .map(|c| format!("calibration set '{}'", c.name))
                .unwrap_or_else(|| String::from("baseline visitation"))
        );
        Ok(ChoiceModel {
            reference,
            calibration_set: calibration_set.cloned(),
            merged,
            params,
        })
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    pub fn params(&self) -> &ModelParameters {
        &self.params
    }

    pub fn calibration_set(&self) -> Option<&CalibrationSet> {
        self.calibration_set.as_ref()
    }

    /// the baseline site table with the scenario applied
    pub fn sites(&self) -> &BTreeMap<String, Site> {
        &self.merged.sites
    }

    /// distance rows created for this scenario's new sites
    pub fn added_distances(&self) -> &BTreeMap<String, Vec<f64>> {
        &self.merged.added_distances
    }

    pub fn distances(&self) -> LayeredDistances<'_> {
        LayeredDistances::new(&self.reference.distances, &self.merged.added_distances)
    }

    pub fn raw_utility(&self) -> Result<SiteMatrix, ChoiceModelError> {
        let products = attractiveness_ops::site_products(
            &self.merged.sites,
            &self.reference.coefficients,
            &self.params.acreage,
        );
        attractiveness_ops::raw_utility(
            &products,
            &self.distances(),
            self.params.distance_coefficient,
        )
    }

    pub fn calibration(
        &self,
        raw_utility: &SiteMatrix,
    ) -> Result<SiteCalibration, ChoiceModelError> {
        let observed = calibration_ops::observed_visits(
            raw_utility.sites(),
            &self.reference.baseline_visits,
            self.calibration_set.as_ref(),
            self.params.calibration.observed_visit_scale,
        );
        calibration_ops::calibration_adjustment(raw_utility, &observed, &self.params.calibration)
    }

    pub fn calibrated_attractiveness(&self) -> Result<SiteMatrix, ChoiceModelError> {
        let raw = self.raw_utility()?;
        let calibration = self.calibration(&raw)?;
        calibration_ops::apply_calibration(&raw, &calibration)
    }

    /// site → block group → probability of a trip from that block group
    /// going to that site.
    pub fn get_site_visitation_probability(&self) -> Result<SiteMatrix, ChoiceModelError> {
        let calibrated = self.calibrated_attractiveness()?;
        probability_ops::visitation_probability(&calibrated, &self.params.normalization)
    }

    pub fn get_site_visits(&self) -> Result<BTreeMap<String, f64>, ChoiceModelError> {
        let probability = self.get_site_visitation_probability()?;
        self.site_visits(&probability)
    }

    pub fn get_equity_evaluation(&self) -> Result<EquityEvaluation, ChoiceModelError> {
        let calibrated = self.calibrated_attractiveness()?;
        let probability =
            probability_ops::visitation_probability(&calibrated, &self.params.normalization)?;
        equity_ops::equity_evaluation(
            &calibrated,
            &probability,
            &self.reference.population,
            self.params.trips_per_person,
        )
    }

    pub fn get_utility_by_block_group(&self) -> Result<BlockGroupUtility, ChoiceModelError> {
        let calibrated = self.calibrated_attractiveness()?;
        let probability =
            probability_ops::visitation_probability(&calibrated, &self.params.normalization)?;
        equity_ops::utility_by_block_group(
            &calibrated,
            &probability,
            &self.reference.population,
            self.params.trips_per_person,
        )
    }

    /// baseline site coordinates plus those of the scenario's new sites
    pub fn get_site_locations(&self) -> BTreeMap<String, SiteCoordinates> {
        merge_ops::site_locations(&self.merged.sites)
    }

    pub fn get_site_summary(&self) -> Result<Vec<SiteSummary>, ChoiceModelError> {
        let probability = self.get_site_visitation_probability()?;
        let visits = self.site_visits(&probability)?;
        Ok(self.summarize(&probability, &visits))
    }

    /// computes every output from a single pass through the pipeline
    pub fn evaluate(&self) -> Result<ModelEvaluation, ChoiceModelError> {
        let raw = self.raw_utility()?;
        let calibration = self.calibration(&raw)?;
        let calibrated = calibration_ops::apply_calibration(&raw, &calibration)?;
        let probability =
            probability_ops::visitation_probability(&calibrated, &self.params.normalization)?;
        let visits = self.site_visits(&probability)?;
        let equity = equity_ops::equity_evaluation(
            &calibrated,
            &probability,
            &self.reference.population,
            self.params.trips_per_person,
        )?;
        let block_group_utility = equity_ops::utility_by_block_group(
            &calibrated,
            &probability,
            &self.reference.population,
            self.params.trips_per_person,
        )?;
        let summary = self.summarize(&probability, &visits);
        Ok(ModelEvaluation {
            calibration,
            calibrated,
            probability,
            visits,
            equity,
            block_group_utility,
            summary,
        })
    }

    /// a new calibration set holding the projected visits of the baseline
    /// sites, named `name`. scenario edits of this model are not applied. the
    /// set is not selected.
    pub fn recalibrate(&self, name: &str) -> Result<CalibrationSet, ChoiceModelError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ChoiceModelError::Configuration(String::from(
                "a calibration set requires a non-empty name",
            )));
        }
        let baseline = ChoiceModel::new(
            self.reference.clone(),
            None,
            self.calibration_set.as_ref(),
            self.params,
        )?;
        let visits = baseline.get_site_visits()?;
        Ok(CalibrationSet::new(trimmed, trimmed, visits))
    }

    fn site_visits(
        &self,
        probability: &SiteMatrix,
    ) -> Result<BTreeMap<String, f64>, ChoiceModelError> {
        probability_ops::site_visits(
            probability,
            &self.reference.population.totals(),
            self.params.trips_per_person,
        )
    }

    fn summarize(
        &self,
        probability: &SiteMatrix,
        visits: &BTreeMap<String, f64>,
    ) -> Vec<SiteSummary> {
        probability_ops::mean_probability(probability)
            .into_iter()
            .filter_map(|(name, mean_probability)| {
                let site = self.merged.sites.get(&name)?;
                Some(SiteSummary {
                    latitude: site.latitude,
                    longitude: site.longitude,
                    mean_probability,
                    visits: visits.get(&name).copied().unwrap_or_default(),
                    name,
                })
            })
            .collect()
    }
}
