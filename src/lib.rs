//! Aggregate peak analysis (APA) heatmap series.
//!
//! Loads `<stem>intra_<k>_apa.npy` and `<stem>inter_apa.npy` matrices, scores
//! each one and renders them as a single row of heatmap panels.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;

pub use crate::core::series::{compose_series, compose_series_with};
pub use crate::error::ApaError;
