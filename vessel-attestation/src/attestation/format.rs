use rst_common::standard::serde::{self, Deserialize, Serialize};
use rst_common::standard::serde_json;

use rstdev_domain::entity::ToJSON;
use rstdev_domain::BaseError;

use super::proof::{ProofFormatData, ProofRequest};
use super::types::AttestationError;

/// `ProofFormatKind` is the proof sub-format used by a proof request
///
/// - `Indy` is the legacy format
/// - `AnonCreds` is the current format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProofFormatKind {
    Indy,
    AnonCreds,
}

impl ProofFormatKind {
    /// `detect` resolves the sub-format from the raw format data. When both keys are filled,
    /// the current format wins
    pub fn detect(data: &ProofFormatData) -> Option<Self> {
        let request = data.request.as_ref()?;

        if request.anoncreds.is_some() {
            return Some(Self::AnonCreds);
        }

        if request.indy.is_some() {
            return Some(Self::Indy);
        }

        None
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::Indy => "indy",
            Self::AnonCreds => "anoncreds",
        }
    }

    /// `select` returns the proof request stored under this sub-format key
    pub fn select<'a>(&self, data: &'a ProofFormatData) -> Option<&'a ProofRequest> {
        let request = data.request.as_ref()?;
        match self {
            Self::Indy => request.indy.as_ref(),
            Self::AnonCreds => request.anoncreds.as_ref(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(crate = "self::serde")]
pub struct FormatFilter {
    #[serde(rename = "filterByNonRevocationRequirements")]
    pub filter_by_non_revocation_requirements: bool,
}

/// `ProofFormatsConfig` is sent to the agent when asking for the credentials of a proof request
///
/// The agent selects the format by key presence, even when the value is empty, so the key of
/// the unused sub-format must never be serialized. Build it through [`ProofFormatsConfig::for_kind`]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(crate = "self::serde")]
pub struct ProofFormatsConfig {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    indy: Option<FormatFilter>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    anoncreds: Option<FormatFilter>,
}

impl ProofFormatsConfig {
    pub fn for_kind(kind: ProofFormatKind, filter_by_non_revocation_requirements: bool) -> Self {
        let filter = FormatFilter {
            filter_by_non_revocation_requirements,
        };

        match kind {
            ProofFormatKind::Indy => Self {
                indy: Some(filter),
                anoncreds: None,
            },
            ProofFormatKind::AnonCreds => Self {
                indy: None,
                anoncreds: Some(filter),
            },
        }
    }

    pub fn kind(&self) -> Option<ProofFormatKind> {
        match (&self.indy, &self.anoncreds) {
            (_, Some(_)) => Some(ProofFormatKind::AnonCreds),
            (Some(_), None) => Some(ProofFormatKind::Indy),
            (None, None) => None,
        }
    }

    pub fn indy(&self) -> Option<&FormatFilter> {
        self.indy.as_ref()
    }

    pub fn anoncreds(&self) -> Option<&FormatFilter> {
        self.anoncreds.as_ref()
    }
}

impl ToJSON for ProofFormatsConfig {
    fn to_json(&self) -> Result<String, BaseError> {
        let json_str =
            serde_json::to_string(&self).map_err(|err| BaseError::ToJSONError(err.to_string()))?;

        Ok(json_str)
    }
}

/// `resolve` builds the proof formats configuration matching the sub-format of the request
pub fn resolve(
    data: &ProofFormatData,
    filter_by_non_revocation_requirements: bool,
) -> Result<ProofFormatsConfig, AttestationError> {
    let kind = ProofFormatKind::detect(data).ok_or_else(|| {
        AttestationError::LookupError(
            "proof request contains neither indy nor anoncreds format".to_string(),
        )
    })?;

    Ok(ProofFormatsConfig::for_kind(
        kind,
        filter_by_non_revocation_requirements,
    ))
}
