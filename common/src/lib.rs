//! # Palmist Common
//!
//! Shared vocabulary of the workspace: the palm and reading models, the
//! configuration surface, the error taxonomy, the random-source seam and
//! the provider ports implemented by `palmist-core`.

pub mod analysis;
pub mod config;
pub mod error;
pub mod image;
pub mod palm;
pub mod providers;
pub mod random;
pub mod reading;
pub mod user;
