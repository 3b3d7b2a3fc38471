//! # palmist-core
//!
//! The palm-reading engine: feature generation, text composition, the
//! optional remote providers and the [`PalmAnalyzer`] orchestrator that
//! ties them together.

pub mod analyzer;
pub mod compose;
pub mod content;
pub mod generator;
pub mod interpret;
pub mod narrative;
pub mod personalize;
pub mod preprocess;
pub mod remote;

pub use analyzer::PalmAnalyzer;
