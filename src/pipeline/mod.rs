//! Pipeline entry points for the harvester.
//!
//! - `run_crawl`: Discover article URLs and persist the raw corpus
//! - `run_annotate`: Produce annotation artifacts for a validated corpus
//! - `run_scan`: Collect second-person singular verbs from the artifacts
//! - `run_validate`: Check the configuration and any existing corpus

pub mod annotate;
pub mod crawl;
pub mod scan;
pub mod validate;

pub use annotate::run_annotate;
pub use crawl::{CrawlSummary, run_crawl};
pub use scan::{find_second_person, run_scan};
pub use validate::run_validate;
