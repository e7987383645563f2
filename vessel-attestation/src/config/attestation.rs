use rst_common::standard::serde::{self, Deserialize};

use crate::attestation::types::{AllowList, DEFAULT_ATTESTATION_CRED_DEF_IDS, DEFAULT_MAX_AGE_DAYS};
use crate::common::types::{CommonError, ToValidate};

fn default_max_age_days() -> i64 {
    DEFAULT_MAX_AGE_DAYS
}

/// `Attestation` holds the recognized attestation credential definitions of a deployment
/// and the maximum age of an attestation credential
#[derive(Deserialize, Debug, Clone)]
#[serde(crate = "self::serde")]
pub struct Attestation {
    pub(super) cred_def_ids: Vec<String>,

    #[serde(default = "default_max_age_days")]
    pub(super) max_age_days: i64,
}

impl Attestation {
    pub fn get_cred_def_ids(&self) -> Vec<String> {
        self.cred_def_ids.to_owned()
    }

    pub fn get_max_age_days(&self) -> i64 {
        self.max_age_days.to_owned()
    }

    pub fn allow_list(&self) -> AllowList {
        AllowList::from(self.get_cred_def_ids())
    }
}

impl Default for Attestation {
    fn default() -> Self {
        Self {
            cred_def_ids: DEFAULT_ATTESTATION_CRED_DEF_IDS
                .iter()
                .map(|id| id.to_string())
                .collect(),
            max_age_days: DEFAULT_MAX_AGE_DAYS,
        }
    }
}

impl ToValidate for Attestation {
    fn validate(&self) -> Result<(), CommonError> {
        if self.cred_def_ids.is_empty() {
            return Err(CommonError::ValidationError(
                "config: attestation:cred_def_ids is missing".to_string(),
            ));
        }

        if self.cred_def_ids.iter().any(|id| id.trim().is_empty()) {
            return Err(CommonError::ValidationError(
                "config: attestation:cred_def_ids contains an empty id".to_string(),
            ));
        }

        if self.max_age_days <= 0 {
            return Err(CommonError::ValidationError(
                "config: attestation:max_age_days must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::env;
    use std::path::PathBuf;

    use rstdev_config::format::use_toml;
    use rstdev_config::parser::from_file;
    use rstdev_config::{types::ConfigError, Builder};

    use crate::common::helpers;

    #[test]
    fn test_parse_attestation_config() -> Result<(), ConfigError> {
        let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        path.push("src/config/fixtures");

        let toml_file = format!("{}/config_attestation.toml", path.display());
        let config_toml = {
            let config_builder: Result<Attestation, ConfigError> =
                Builder::new(from_file(toml_file)).fetch()?.parse(use_toml);

            config_builder
        };

        assert!(!config_toml.is_err());

        let config_attestation = config_toml.unwrap();
        assert_eq!(
            config_attestation.get_cred_def_ids(),
            vec!["XqaRXJt4sXE6TRpfGpVbGw:3:CL:655:bcwallet".to_string()]
        );
        assert_eq!(config_attestation.get_max_age_days(), DEFAULT_MAX_AGE_DAYS);
        Ok(())
    }

    #[test]
    fn test_default_is_valid() {
        let config = Attestation::default();
        assert!(helpers::validate(config.clone()).is_ok());
        assert_eq!(config.allow_list(), AllowList::default());
    }

    #[test]
    fn test_validation_failed() {
        let table = vec![
            (vec![], 14),
            (vec!["D1".to_string(), " ".to_string()], 14),
            (vec!["D1".to_string()], 0),
            (vec!["D1".to_string()], -1),
        ];

        for (cred_def_ids, max_age_days) in table {
            let validation = helpers::validate(Attestation {
                cred_def_ids,
                max_age_days,
            });

            assert!(validation.is_err());
            assert!(matches!(
                validation.unwrap_err(),
                CommonError::ValidationError(_)
            ))
        }
    }
}
