use derive_more::{AsRef, From, Into};
use the_newtype::Newtype;

use rst_common::standard::async_trait::async_trait;
use rst_common::standard::serde::{self, Deserialize, Serialize};
use rst_common::with_errors::thiserror::{self, Error};

use super::credential::CredentialRecord;
use super::format::ProofFormatsConfig;
use super::proof::{CredentialsForRequest, ProofExchangeRecord, ProofFormatData};

/// The referent name used by verifiers for the attestation attribute group
pub const ATTESTATION_REFERENT: &str = "attestationInfo";

/// The credential attribute holding the issuance date formatted as `YYYYMMDD`
pub const ISSUE_DATE_ATTRIBUTE: &str = "issue_date_dateint";

/// Credentials older than this many days are considered stale
pub const DEFAULT_MAX_AGE_DAYS: i64 = 14;

/// Credential definitions of the BC Wallet attestation credentials
pub const DEFAULT_ATTESTATION_CRED_DEF_IDS: [&str; 3] = [
    "NXp6XcGeCR2MviWuY51Dva:3:CL:33557:bcwallet",
    "RycQpZ9b4NaXuT5ZGjXkUE:3:CL:120:bcwallet",
    "XqaRXJt4sXE6TRpfGpVbGw:3:CL:655:bcwallet",
];

/// `AttestationError` is a base error type for the `attestation` domain
///
/// Only infrastructure failures are errors. A request that can't be satisfied or a credential
/// that fails the validity rules is reported through a `false` or an empty list instead
#[derive(Debug, PartialEq, Error, Clone)]
pub enum AttestationError {
    #[error("unable to lookup proof request format: {0}")]
    LookupError(String),

    #[error("agent error: {0}")]
    AgentError(String),

    #[error("config error: {0}")]
    ConfigError(String),
}

/// Credential definition identifier, e.g `NXp6XcGeCR2MviWuY51Dva:3:CL:33557:bcwallet`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Newtype, From, Into, AsRef)]
#[serde(crate = "self::serde")]
pub struct CredDefID(String);

impl CredDefID {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// `AllowList` is the closed set of credential definitions recognized as attestation credentials
///
/// It is built once, from the configuration or from [`DEFAULT_ATTESTATION_CRED_DEF_IDS`], and never
/// changes afterwards
#[derive(Debug, Clone, PartialEq)]
pub struct AllowList {
    ids: Vec<CredDefID>,
}

impl AllowList {
    pub fn new(ids: Vec<CredDefID>) -> Self {
        let mut unique: Vec<CredDefID> = Vec::with_capacity(ids.len());
        for id in ids {
            if !unique.contains(&id) {
                unique.push(id);
            }
        }

        Self { ids: unique }
    }

    pub fn contains(&self, cred_def_id: &str) -> bool {
        self.ids.iter().any(|known| known.as_str() == cred_def_id)
    }

    pub fn ids(&self) -> &[CredDefID] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl Default for AllowList {
    fn default() -> Self {
        Self::from(
            DEFAULT_ATTESTATION_CRED_DEF_IDS
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<String>>(),
        )
    }
}

impl From<Vec<String>> for AllowList {
    fn from(ids: Vec<String>) -> Self {
        Self::new(ids.into_iter().map(CredDefID::from).collect())
    }
}

/// `ProofsAPI` is the proof exchange module of the external agent
#[async_trait]
pub trait ProofsAPI: Clone + Sync + Send {
    /// `get_format_data` loads the raw format data of an in-flight proof exchange
    async fn get_format_data(&self, proof_id: String) -> Result<ProofFormatData, AttestationError>;

    /// `get_credentials_for_request` asks the agent which stored credentials are able to satisfy
    /// the proof request. `None` means the agent has nothing to report at all
    async fn get_credentials_for_request(
        &self,
        proof_id: String,
        proof_formats: ProofFormatsConfig,
    ) -> Result<Option<CredentialsForRequest>, AttestationError>;
}

/// `CredentialsAPI` is the credential exchange module of the external agent
#[async_trait]
pub trait CredentialsAPI: Clone + Sync + Send {
    async fn get_all(&self) -> Result<Vec<CredentialRecord>, AttestationError>;
    async fn delete_by_id(&self, id: String) -> Result<(), AttestationError>;
}

/// `AttestationAPI` is the entrypoint to the attestation policy
#[async_trait]
pub trait AttestationAPI: Clone {
    /// `format_for_proof` detects the sub-format used by the proof request and builds the proof formats
    /// configuration carrying only that sub-format key
    ///
    /// Setting `filter_by_non_revocation_requirements` to `false` makes the agent return all credentials
    /// even when they are revocable and revoked
    async fn format_for_proof(
        &self,
        proof_id: String,
        filter_by_non_revocation_requirements: bool,
    ) -> Result<ProofFormatsConfig, AttestationError>;

    /// `is_proof_requesting_attestation` checks whether any `attestationInfo` restriction of the proof
    /// request points to a known attestation credential definition
    async fn is_proof_requesting_attestation(
        &self,
        proof: &ProofExchangeRecord,
    ) -> Result<bool, AttestationError>;

    /// `retrieve_and_trim_available_attestation_credentials` removes every stale or revoked attestation
    /// credential from the wallet and returns the remaining valid ones
    async fn retrieve_and_trim_available_attestation_credentials(
        &self,
    ) -> Result<Vec<CredentialRecord>, AttestationError>;

    /// `credentials_match_for_attestation_proof` checks whether the agent found a credential for the
    /// `attestationInfo` group of the proof request
    ///
    /// It doesn't check the credential age. Callers must trim the wallet first through
    /// [`AttestationAPI::retrieve_and_trim_available_attestation_credentials`]
    async fn credentials_match_for_attestation_proof(
        &self,
        proof: &ProofExchangeRecord,
        filter_by_non_revocation_requirements: bool,
    ) -> Result<bool, AttestationError>;

    /// `is_attestation_required` tells whether the holder needs to obtain a new attestation credential
    /// before answering the proof request
    async fn is_attestation_required(
        &self,
        proof: &ProofExchangeRecord,
    ) -> Result<bool, AttestationError>;
}

/// `UsecaseBuilder` exposes the agent implementers and the allow list used by an [`AttestationAPI`]
pub trait UsecaseBuilder: AttestationAPI {
    type ProofsImplementer: ProofsAPI;
    type CredentialsImplementer: CredentialsAPI;

    fn proofs(&self) -> &Self::ProofsImplementer;
    fn credentials(&self) -> &Self::CredentialsImplementer;
    fn allow_list(&self) -> &AllowList;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_allow_list() {
        let allow_list = AllowList::default();
        assert_eq!(allow_list.len(), 3);
        assert!(allow_list.contains("RycQpZ9b4NaXuT5ZGjXkUE:3:CL:120:bcwallet"));
        assert!(!allow_list.contains("RycQpZ9b4NaXuT5ZGjXkUE:3:CL:121:bcwallet"));
    }

    #[test]
    fn test_allow_list_removes_duplicates() {
        let allow_list = AllowList::from(vec![
            "D1".to_string(),
            "D2".to_string(),
            "D1".to_string(),
        ]);

        assert_eq!(allow_list.len(), 2);
        assert_eq!(allow_list.ids()[0].as_str(), "D1");
        assert_eq!(allow_list.ids()[1].as_str(), "D2");
    }

    #[test]
    fn test_empty_allow_list_matches_nothing() {
        let allow_list = AllowList::new(vec![]);
        assert!(allow_list.is_empty());
        assert!(!allow_list.contains(""));
    }
}
