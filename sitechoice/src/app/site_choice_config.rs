use super::AppError;
use crate::model::config::ModelParameters;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use sitechoice_core::model::reference::ReferenceDataConfig;
use std::path::Path;

/// environment variables such as `SITECHOICE_MODEL__TRIPS_PER_PERSON`
/// override values read from the configuration file.
pub const ENV_PREFIX: &str = "SITECHOICE";

/// top-level application configuration
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SiteChoiceConfig {
    pub reference: ReferenceDataConfig,
    #[serde(default)]
    pub model: ModelParameters,
}

impl SiteChoiceConfig {
    /// reads a TOML or JSON configuration file. relative reference table
    /// paths are resolved against the directory of the file.
    pub fn from_file(filepath: &str) -> Result<SiteChoiceConfig, AppError> {
        let builder = Config::builder()
            .add_source(File::with_name(filepath))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );
        let conf = Self::build(builder, filepath)?;
        let base = Path::new(filepath).parent().unwrap_or_else(|| Path::new(""));
        Ok(SiteChoiceConfig {
            reference: resolve_paths(&conf.reference, base),
            ..conf
        })
    }

    pub fn from_contents(
        contents: &str,
        format: FileFormat,
    ) -> Result<SiteChoiceConfig, AppError> {
        let builder = Config::builder().add_source(File::from_str(contents, format));
        Self::build(builder, "<string>")
    }

    fn build(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
        source_name: &str,
    ) -> Result<SiteChoiceConfig, AppError> {
        let config = builder.build().map_err(|e| AppError::ConfigReadError {
            msg: format!("failed reading '{source_name}'"),
            source: e,
        })?;
        let conf = config
            .try_deserialize::<SiteChoiceConfig>()
            .map_err(|e| AppError::ConfigReadError {
                msg: format!("failed decoding '{source_name}'"),
                source: e,
            })?;
        conf.model.validate()?;
        Ok(conf)
    }
}

fn resolve_paths(reference: &ReferenceDataConfig, base: &Path) -> ReferenceDataConfig {
    let resolve = |f: &String| -> String {
        let path = Path::new(f);
        if path.is_absolute() || base.as_os_str().is_empty() {
            f.clone()
        } else {
            base.join(path).to_string_lossy().to_string()
        }
    };
    ReferenceDataConfig {
        sites_file: resolve(&reference.sites_file),
        coefficients_file: resolve(&reference.coefficients_file),
        distances_file: resolve(&reference.distances_file),
        population_file: resolve(&reference.population_file),
        baseline_visits_file: resolve(&reference.baseline_visits_file),
        centroids_file: reference.centroids_file.as_ref().map(resolve),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::config::NormalizationPolicy;

    const REFERENCE: &str = r#"
        [reference]
        sites_file = "sites.csv"
        coefficients_file = "coefficients.csv"
        distances_file = "distances.csv.gz"
        population_file = "population.csv"
        baseline_visits_file = "visits.csv"
    "#;

    #[test]
    fn test_model_section_defaults() {
        let conf =
            SiteChoiceConfig::from_contents(REFERENCE, FileFormat::Toml).expect("valid config");
        assert_eq!(conf.model, ModelParameters::default());
        assert_eq!(conf.reference.distances_file, "distances.csv.gz");
        assert!(conf.reference.centroids_file.is_none());
    }

    #[test]
    fn test_model_section_overrides() {
        let contents = format!(
            "{REFERENCE}\n[model]\ntrips_per_person = 13.986\n[model.normalization]\ntype = \"fail\"\n"
        );
        let conf =
            SiteChoiceConfig::from_contents(&contents, FileFormat::Toml).expect("valid config");
        assert_eq!(conf.model.trips_per_person, 13.986);
        assert_eq!(conf.model.normalization, NormalizationPolicy::Fail);
    }

    #[test]
    fn test_invalid_model_section_is_rejected() {
        let contents = format!("{REFERENCE}\n[model]\ntrips_per_person = 0.0\n");
        assert!(SiteChoiceConfig::from_contents(&contents, FileFormat::Toml).is_err());
    }

    #[test]
    fn test_relative_paths_resolve_against_config_directory() {
        let conf =
            SiteChoiceConfig::from_contents(REFERENCE, FileFormat::Toml).expect("valid config");
        let resolved = resolve_paths(&conf.reference, Path::new("/data/durham"));
        assert_eq!(resolved.sites_file, "/data/durham/sites.csv");
        let absolute = ReferenceDataConfig {
            sites_file: String::from("/elsewhere/sites.csv"),
            ..resolved.clone()
        };
        assert_eq!(
            resolve_paths(&absolute, Path::new("/data")).sites_file,
            "/elsewhere/sites.csv"
        );
    }
}
