use rstdev_config::format::use_toml;
use rstdev_config::parser::from_file;
use rstdev_config::{types::ConfigError, Builder};

use super::Config;

pub struct Parser {
    conf_file: String,
}

impl Parser {
    pub fn new(conf_file: String) -> Self {
        Self { conf_file }
    }

    pub fn parse(&self) -> Result<Config, ConfigError> {
        let config_toml = {
            let config_builder: Result<Config, ConfigError> =
                Builder::new(from_file(self.conf_file.to_owned()))
                    .fetch()?
                    .parse(use_toml);

            config_builder
        };

        config_toml
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::path::PathBuf;

    use crate::common::helpers;
    use crate::common::types::CommonError;

    fn fixture(name: &str) -> String {
        let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        path.push("src/config/fixtures");

        format!("{}/{}", path.display(), name)
    }

    #[test]
    fn test_parse_config() {
        let parser = Parser::new(fixture("config.toml"));
        let config_builder = parser.parse();

        assert!(!config_builder.is_err());

        let config_attestation = config_builder.as_ref().unwrap().attestation();
        assert_eq!(
            config_attestation.get_cred_def_ids(),
            vec![
                "NXp6XcGeCR2MviWuY51Dva:3:CL:33557:bcwallet".to_string(),
                "RycQpZ9b4NaXuT5ZGjXkUE:3:CL:120:bcwallet".to_string(),
            ]
        );
        assert_eq!(config_attestation.get_max_age_days(), 7);

        let allow_list = config_attestation.allow_list();
        assert!(allow_list.contains("RycQpZ9b4NaXuT5ZGjXkUE:3:CL:120:bcwallet"));
        assert!(!allow_list.contains("XqaRXJt4sXE6TRpfGpVbGw:3:CL:655:bcwallet"));
    }

    #[test]
    fn test_parse_invalid_config() {
        let parser = Parser::new(fixture("config_invalid.toml"));
        let config = parser.parse();
        assert!(!config.is_err());

        let validation = helpers::validate(config.unwrap());
        assert!(matches!(
            validation.unwrap_err(),
            CommonError::ValidationError(_)
        ))
    }

    #[test]
    fn test_parse_missing_file() {
        let parser = Parser::new(fixture("not_exists.toml"));
        assert!(parser.parse().is_err());
    }
}
