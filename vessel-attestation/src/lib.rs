//! `prople-vessel-attestation` maintains the attestation credentials of a holder's wallet
//!
//! It is a thin policy layer on top of an external `DIDComm` / `AnonCreds` agent. The agent owns
//! the protocols, the storage and the cryptography, this crate only decides:
//!
//! - whether a proof request is asking for an attestation credential
//! - which stored attestation credentials are still valid (not older than the configured
//!   maximum age and not revoked), removing the invalid ones from the wallet
//! - whether the wallet is able to satisfy an attestation proof request
//!
//! The recognized attestation credential definitions are loaded from a TOML configuration
//! through [`config::Parser`], or taken from the built in defaults.
pub mod attestation;
pub mod common;
pub mod config;
