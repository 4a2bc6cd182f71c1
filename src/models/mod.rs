// src/models/mod.rs

//! Domain models for the harvester.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod article;
mod config;
mod token;

// Re-export all public types
pub use article::{Article, ArticleMeta, ArtifactKind};
pub use config::{Config, CrawlTarget, CrawlerConfig, PathsConfig, validate_config};
pub use token::MorphologicalToken;

/// Largest article count a configuration may request.
pub const MAX_ARTICLES: u64 = 200;
