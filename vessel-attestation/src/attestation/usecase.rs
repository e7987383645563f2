use rst_common::standard::async_trait::async_trait;
use rst_common::standard::chrono::{Local, NaiveDateTime};
use rst_common::with_logging::log::{debug, info, warn};

use crate::common::helpers;
use crate::config::Config;

use super::credential::CredentialRecord;
use super::format::{self, ProofFormatsConfig};
use super::proof::ProofExchangeRecord;
use super::types::{
    AllowList, AttestationAPI, AttestationError, CredentialsAPI, ProofsAPI, UsecaseBuilder,
    DEFAULT_MAX_AGE_DAYS,
};
use super::{detector, matcher, reaper};

/// `Clock` gives the current local wall-clock time used to age credentials
pub type Clock = fn() -> NaiveDateTime;

pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

#[derive(Clone)]
pub struct Usecase<TProofs, TCredentials>
where
    TProofs: ProofsAPI,
    TCredentials: CredentialsAPI,
{
    proofs: TProofs,
    credentials: TCredentials,
    allow_list: AllowList,
    max_age_days: i64,
    clock: Clock,
}

impl<TProofs, TCredentials> Usecase<TProofs, TCredentials>
where
    TProofs: ProofsAPI,
    TCredentials: CredentialsAPI,
{
    pub fn new(proofs: TProofs, credentials: TCredentials, allow_list: AllowList) -> Self {
        Self {
            proofs,
            credentials,
            allow_list,
            max_age_days: DEFAULT_MAX_AGE_DAYS,
            clock: local_now,
        }
    }

    pub fn from_config(
        proofs: TProofs,
        credentials: TCredentials,
        config: &Config,
    ) -> Result<Self, AttestationError> {
        helpers::validate(config.clone())
            .map_err(|err| AttestationError::ConfigError(err.to_string()))?;

        let attestation = config.attestation();
        let usecase = Self::new(proofs, credentials, attestation.allow_list())
            .with_max_age_days(attestation.get_max_age_days());

        Ok(usecase)
    }

    pub fn with_max_age_days(mut self, max_age_days: i64) -> Self {
        self.max_age_days = max_age_days;
        self
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// `credentials_match_for_attestation_proof_default` runs the satisfiability check with the
    /// revocation filtering enabled
    pub async fn credentials_match_for_attestation_proof_default(
        &self,
        proof: &ProofExchangeRecord,
    ) -> Result<bool, AttestationError> {
        self.credentials_match_for_attestation_proof(proof, true)
            .await
    }
}

impl<TProofs, TCredentials> UsecaseBuilder for Usecase<TProofs, TCredentials>
where
    TProofs: ProofsAPI,
    TCredentials: CredentialsAPI,
{
    type ProofsImplementer = TProofs;
    type CredentialsImplementer = TCredentials;

    fn proofs(&self) -> &Self::ProofsImplementer {
        &self.proofs
    }

    fn credentials(&self) -> &Self::CredentialsImplementer {
        &self.credentials
    }

    fn allow_list(&self) -> &AllowList {
        &self.allow_list
    }
}

#[async_trait]
impl<TProofs, TCredentials> AttestationAPI for Usecase<TProofs, TCredentials>
where
    TProofs: ProofsAPI,
    TCredentials: CredentialsAPI,
{
    async fn format_for_proof(
        &self,
        proof_id: String,
        filter_by_non_revocation_requirements: bool,
    ) -> Result<ProofFormatsConfig, AttestationError> {
        let data = self.proofs().get_format_data(proof_id.clone()).await?;
        let config = format::resolve(&data, filter_by_non_revocation_requirements)?;

        debug!(
            "[attestation:format_for_proof] proof: {} | format: {:?}",
            proof_id,
            config.kind()
        );

        Ok(config)
    }

    async fn is_proof_requesting_attestation(
        &self,
        proof: &ProofExchangeRecord,
    ) -> Result<bool, AttestationError> {
        let data = self.proofs().get_format_data(proof.get_id()).await?;
        let requested = detector::requests_attestation(&data, self.allow_list());

        debug!(
            "[attestation:is_proof_requesting_attestation] proof: {} | requested: {}",
            proof.get_id(),
            requested
        );

        Ok(requested)
    }

    async fn retrieve_and_trim_available_attestation_credentials(
        &self,
    ) -> Result<Vec<CredentialRecord>, AttestationError> {
        let records = self.credentials().get_all().await?;
        let now = (self.clock)();

        let classification = reaper::classify(records, self.allow_list(), self.max_age_days, now);

        for (record, reason) in classification.invalid.iter() {
            info!(
                "[attestation:trim] removing credential: {} | reason: {:?}",
                record.get_id(),
                reason
            );

            // a failed removal is retried by the next pass, the record stays excluded
            if let Err(err) = self.credentials().delete_by_id(record.get_id()).await {
                warn!(
                    "[attestation:trim] unable to remove credential: {} | err: {}",
                    record.get_id(),
                    err
                );
            }
        }

        debug!(
            "[attestation:trim] valid: {} | removed: {}",
            classification.valid.len(),
            classification.invalid.len()
        );

        Ok(classification.valid)
    }

    async fn credentials_match_for_attestation_proof(
        &self,
        proof: &ProofExchangeRecord,
        filter_by_non_revocation_requirements: bool,
    ) -> Result<bool, AttestationError> {
        let proof_formats = self
            .format_for_proof(proof.get_id(), filter_by_non_revocation_requirements)
            .await?;

        let credentials = self
            .proofs()
            .get_credentials_for_request(proof.get_id(), proof_formats)
            .await?;

        Ok(matcher::has_attestation_match(credentials.as_ref()))
    }

    async fn is_attestation_required(
        &self,
        proof: &ProofExchangeRecord,
    ) -> Result<bool, AttestationError> {
        if !self.is_proof_requesting_attestation(proof).await? {
            return Ok(false);
        }

        let available = self
            .retrieve_and_trim_available_attestation_credentials()
            .await?;

        if available.is_empty() {
            return Ok(true);
        }

        let matched = self
            .credentials_match_for_attestation_proof(proof, true)
            .await?;

        Ok(!matched)
    }
}
