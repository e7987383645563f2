use super::proof::{CredentialsForProofRequest, CredentialsForRequest};
use super::types::ATTESTATION_REFERENT;

/// `select_format` picks the credentials reported for the current sub-format, falling back to
/// the legacy one
pub fn select_format(credentials: &CredentialsForRequest) -> Option<&CredentialsForProofRequest> {
    let formats = &credentials.proof_formats;
    formats.anoncreds.as_ref().or(formats.indy.as_ref())
}

/// `has_attestation_match` reads the agent's answer and tells whether at least one stored
/// credential satisfies the `attestationInfo` group
pub fn has_attestation_match(credentials: Option<&CredentialsForRequest>) -> bool {
    let Some(format) = credentials.and_then(select_format) else {
        return false;
    };

    format
        .attributes
        .get(ATTESTATION_REFERENT)
        .is_some_and(|matches| !matches.is_empty())
}
