use rst_common::standard::serde::{self, Deserialize};

use crate::common::types::{CommonError, ToValidate};

use super::Attestation;

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(crate = "self::serde")]
pub struct Config {
    pub(super) attestation: Attestation,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attestation(&self) -> &Attestation {
        &self.attestation
    }
}

impl ToValidate for Config {
    fn validate(&self) -> Result<(), CommonError> {
        self.attestation.validate()
    }
}
