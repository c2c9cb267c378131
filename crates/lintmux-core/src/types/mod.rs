//! Shared data types for lintmux.

pub mod collections;
pub mod violation;

pub use violation::{Severity, Violation, ViolationRecord};
