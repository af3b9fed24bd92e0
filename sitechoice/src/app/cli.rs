use super::{output_ops, AppError, SiteChoiceConfig};
use crate::model::{comparison, config::ModelParameters, ChoiceModel};
use clap::{Parser, Subcommand};
use sitechoice_core::model::{
    calibration::CalibrationSets,
    reference::ReferenceData,
    site::Scenario,
};
use std::{io::Write, sync::Arc};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct CliArgs {
    /// TOML or JSON file with [reference] table paths and optional [model] parameters
    #[arg(long)]
    pub config: String,
    /// JSON scenario of modified sites to apply to the baseline
    #[arg(long)]
    pub scenario: Option<String>,
    /// JSON list of saved calibration sets. the selected set, if any, replaces
    /// baseline visitation as the calibration target.
    #[arg(long)]
    pub calibration_sets: Option<String>,
    /// TOML or JSON file of model parameters, replacing the [model] section
    #[arg(long)]
    pub parameters: Option<String>,
    /// file to write results to. writes to stdout when omitted.
    #[arg(long)]
    pub output: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    #[command(about = "projected visits per site (CSV)")]
    Visits,
    #[command(about = "visitation probability per site and block group (CSV)")]
    Probability,
    #[command(about = "relative utility ratio per demographic group (JSON)")]
    Equity,
    #[command(about = "utility-weighted trips per block group and demographic group (CSV)")]
    Utility,
    #[command(about = "coordinates of baseline and custom sites (CSV)")]
    Locations,
    #[command(about = "coordinates, mean probability and visits per site (CSV)")]
    Summary,
    #[command(about = "every model output from one run (JSON)")]
    Evaluate,
    #[command(about = "baseline against the scenario, per site and per group (JSON)")]
    Compare,
    #[command(about = "save the modeled baseline visits as a new calibration set (JSON)")]
    Recalibrate {
        /// name of the new calibration set
        #[arg(long)]
        name: String,
        /// make the new set the selected calibration target
        #[arg(long, default_value_t = false)]
        select: bool,
    },
}

impl CliArgs {
    pub fn run(&self) -> Result<(), AppError> {
        let conf = SiteChoiceConfig::from_file(&self.config)?;
        let params = match &self.parameters {
            Some(f) => {
                log::info!("reading model parameters from {f}");
                ModelParameters::try_from(f)?
            }
            None => conf.model,
        };
        let reference = Arc::new(ReferenceData::load(&conf.reference)?);
        let scenario = match &self.scenario {
            Some(f) => Some(Scenario::from_json_file(f)?),
            None => None,
        };
        let calibration_sets = match &self.calibration_sets {
            Some(f) => CalibrationSets::from_json_file(f)?,
            None => CalibrationSets::default(),
        };
        let calibration_set = calibration_sets.selected();
        let mut writer = output_ops::open_output(self.output.as_deref())?;

        match &self.command {
            Command::Compare => {
                let scenario = scenario.as_ref().ok_or_else(|| {
                    AppError::InvalidArguments(String::from("compare requires --scenario"))
                })?;
                let result =
                    comparison::compare_scenario(reference, scenario, calibration_set, params)?;
                output_ops::write_json(&result, &mut writer)?;
            }
            command => {
                let model =
                    ChoiceModel::new(reference, scenario.as_ref(), calibration_set, params)?;
                run_model_command(command, &model, &calibration_sets, &mut writer)?;
            }
        }
        writer.flush().map_err(|e| AppError::WriteError {
            filepath: self.output.clone().unwrap_or_else(|| String::from("<stdout>")),
            source: e,
        })
    }
}

fn run_model_command<W: Write>(
    command: &Command,
    model: &ChoiceModel,
    calibration_sets: &CalibrationSets,
    writer: W,
) -> Result<(), AppError> {
    match command {
        Command::Visits => output_ops::write_visits(&model.get_site_visits()?, writer),
        Command::Probability => {
            output_ops::write_site_matrix(&model.get_site_visitation_probability()?, writer)
        }
        Command::Equity => output_ops::write_json(&model.get_equity_evaluation()?, writer),
        Command::Utility => {
            output_ops::write_block_group_utility(&model.get_utility_by_block_group()?, writer)
        }
        Command::Locations => output_ops::write_locations(&model.get_site_locations(), writer),
        Command::Summary => output_ops::write_summary(&model.get_site_summary()?, writer),
        Command::Evaluate => output_ops::write_json(&model.evaluate()?, writer),
        Command::Compare => Err(AppError::InvalidArguments(String::from(
            "compare does not run against a single model",
        ))),
        Command::Recalibrate { name, select } => {
            let mut set = model.recalibrate(name)?;
            set.selected = *select;
            let mut updated = calibration_sets.clone();
            updated.insert(set);
            log::info!(
                "calibration sets now hold {} entries, selected: {}",
                updated.len(),
                updated.selected().map(|s| s.name.as_str()).unwrap_or("none")
            );
            output_ops::write_json(&updated, writer)
        }
    }
}
