//! Acquisition-score engine: normalizes per-category company signals,
//! merges review samples and blends everything into one weighted score.

pub mod analyze;
pub mod config;
pub mod error;
pub mod report;
pub mod types;

pub use analyze::{evaluate_company, score, try_score, Scored};
pub use error::{Result, ScoreError};
