//! Path matching — ignore-file semantics over a cached directory walk.
//!
//! The matcher is the entry point of every run: it decides which files the
//! analyzers are allowed to see. An ignored directory is pruned, never
//! opened; a surviving directory is walked even when some of its children
//! are excluded.

pub mod pattern;
pub mod walker;

pub use pattern::PatternSet;
pub use walker::{Entry, PathMatcher};
