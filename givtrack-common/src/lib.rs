//! # givtrack Common Library
//!
//! Shared code for the givtrack contribution-tracking client including:
//! - Contribution record models and wire types
//! - Error taxonomy
//! - Configuration loading
//! - Persistent seen-set storage (SQLite)
//! - Time formatting helpers

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod time;

pub use error::{Error, Result};
pub use models::{ContributionRecord, StoryEntry};
