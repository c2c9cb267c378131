//! Finding identity and the accepted-findings baseline.

pub mod archive;
pub mod fingerprint;

pub use archive::Baseline;
pub use fingerprint::fingerprint;
