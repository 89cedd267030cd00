//! Test helpers shared across the yaml-overlay crates.
//!
//! Provides document construction from `serde_json::json!` literals, scratch
//! directories for overlay files, `figment::Jail` plumbing and text helpers
//! for behavioural step arguments.

pub mod document;
pub mod figment;
pub mod fs;
pub mod text;
