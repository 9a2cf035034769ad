pub mod config;
pub(crate) mod lenient;
pub mod metrics;
pub mod report;
pub mod scoring;
