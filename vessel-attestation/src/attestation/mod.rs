//! `attestation` is a sub-domain used to decide whether a verifier asks the holder for an
//! attestation credential, and whether the holder's wallet still holds a valid one
//!
//! An attestation credential is issued to a wallet instance to prove it is a legitimate one
//! (bot mitigation). It is recognized only by its credential definition id, which must belong
//! to the configured [`AllowList`].
//!
//! ---
//!
//! The sub-domain never talks to the network or the wallet storage by itself. Everything goes
//! through the external agent, abstracted by two traits:
//!
//! - [`types::ProofsAPI`], the proof exchange module (format data and credential matching)
//! - [`types::CredentialsAPI`], the credential exchange module (listing and deletion)
//!
//! ---
//!
//! There are four components, all wired by the [`Usecase`]:
//!
//! - `format`, resolves the proof sub-format, legacy `indy` or current `anoncreds`
//! - `detector`, checks the `attestationInfo` restrictions of a proof request
//! - `reaper`, classifies the stored attestation credentials and removes the stale or revoked ones
//! - `matcher`, reads the agent's matching result for the `attestationInfo` group
pub mod credential;
pub mod detector;
pub mod format;
pub mod matcher;
pub mod proof;
pub mod reaper;
pub mod types;

mod usecase;
pub use usecase::{local_now, Clock, Usecase};

pub use credential::CredentialRecord;
pub use proof::ProofExchangeRecord;
pub use types::{AllowList, AttestationAPI, AttestationError};
