mod attestation;
pub use attestation::Attestation;

mod config;
pub use config::Config;

mod parser;
pub use parser::Parser;
