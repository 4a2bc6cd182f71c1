//! Service layer for the harvester.
//!
//! This module contains the business logic for:
//! - Archive traversal (`RecursiveCrawler`)
//! - Article extraction (`ArticleExtractor`)
//! - Corpus indexing (`CorpusManager`)
//! - Morphological annotation (`AnnotationPipeline`)

mod annotator;
mod corpus;
mod crawler;
mod extractor;
pub mod morphology;

pub use annotator::{AnnotationPipeline, render};
pub use corpus::CorpusManager;
pub use crawler::RecursiveCrawler;
pub use extractor::{ArticleExtractor, ExtractionOutcome, document_url, landing_url, parse_date};
