use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::io::RawProfile;
use crate::model::condition::{ScoringRules, SiteProfile};
use crate::search::DEFAULT_GROUP_SIZE;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct FileConfig {
    group_size: Option<usize>,
    profile: Option<RawProfile>,
    #[serde(default)]
    scoring: FileScoring,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct FileScoring {
    #[serde(default)]
    undesired_trait_check: bool,
}

/// Everything one selection run needs besides the candidate pool.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub group_size: usize,
    pub profile: SiteProfile,
    pub rules: ScoringRules,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            group_size: DEFAULT_GROUP_SIZE,
            profile: SiteProfile::default(),
            rules: ScoringRules::default(),
        }
    }
}

impl RunConfig {
    pub fn from_toml_str(content: &str) -> Result<RunConfig> {
        let file: FileConfig = toml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        let profile = match file.profile {
            Some(raw) => SiteProfile::try_from(raw)?,
            None => SiteProfile::default(),
        };
        Ok(RunConfig {
            group_size: file.group_size.unwrap_or(DEFAULT_GROUP_SIZE),
            profile,
            rules: ScoringRules { undesired_trait_check: file.scoring.undesired_trait_check },
        })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<RunConfig> {
        let path = path.as_ref();
        debug!("Reading configuration from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ModelError;
    use crate::model::condition::Range;

    #[test]
    fn empty_file_uses_defaults() {
        assert_eq!(RunConfig::from_toml_str("").unwrap(), RunConfig::default());
    }

    #[test]
    fn parses_full_config() {
        let config = RunConfig::from_toml_str(
            r#"
            group-size = 4

            [profile]
            permeability = [0.5, 1.5]
            mobility = [1, 3]
            energy = [6, 9]
            desirable = ["Aerobic", "Spore"]
            undesirable = ["Toxic"]

            [scoring]
            undesired-trait-check = true
            "#,
        )
        .unwrap();
        assert_eq!(config.group_size, 4);
        assert_eq!(config.profile.permeability, Range::new(0.5, 1.5));
        assert_eq!(config.profile.mobility, Range::new(1.0, 3.0));
        assert_eq!(config.profile.desirable.len(), 2);
        assert!(config.profile.undesirable.contains("Toxic"));
        assert!(config.rules.undesired_trait_check);
    }

    #[test]
    fn incomplete_profile_reports_missing_field() {
        let err = RunConfig::from_toml_str("[profile]\npermeability = [1, 2]\n").unwrap_err();
        assert!(matches!(err, Error::Model(ModelError::MissingField { field: "mobility", .. })));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = RunConfig::from_toml_str("group_size = 3\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
