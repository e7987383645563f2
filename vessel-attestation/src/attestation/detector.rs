use super::format::ProofFormatKind;
use super::proof::ProofFormatData;
use super::types::{AllowList, ATTESTATION_REFERENT};

/// `requests_attestation` checks whether the proof request restricts its `attestationInfo` group
/// to one of the known attestation credential definitions
///
/// Only restriction identifiers are considered, attribute names are ignored. A request without
/// any recognizable sub-format, group or restriction doesn't ask for an attestation
pub fn requests_attestation(data: &ProofFormatData, allow_list: &AllowList) -> bool {
    let Some(request) = ProofFormatKind::detect(data).and_then(|kind| kind.select(data)) else {
        return false;
    };

    request
        .requested_attribute(ATTESTATION_REFERENT)
        .and_then(|group| group.restrictions.as_ref())
        .map(|restrictions| {
            restrictions.iter().any(|restriction| {
                restriction
                    .cred_def_id
                    .as_deref()
                    .is_some_and(|cred_def_id| allow_list.contains(cred_def_id))
            })
        })
        .unwrap_or(false)
}
