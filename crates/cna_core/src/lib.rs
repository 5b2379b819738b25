//! cna_core: core types and deterministic ordering helpers for CNA survey data.
//!
//! This crate is **I/O-free**. It defines the stable types/APIs used across the
//! engine (`cna_stats`, `cna_report`, `cna_cli`):
//!
//! - `SurveyResponse`: one officer's rating of one survey item
//! - Question-code helpers: section keys and natural (numeric-aware) ordering
//!
//! Serialization derives are gated behind the `serde` feature.

#![forbid(unsafe_code)]

pub mod codes;
pub mod survey;

pub use codes::{natural_cmp, section_key};
pub use survey::SurveyResponse;
