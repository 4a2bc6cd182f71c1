//! Persistence for the crawl cache and the numbered article corpus.
//!
//! ## Directory Structure
//!
//! ```text
//! cache.txt                   # discovered article URLs, one per line
//! tmp/articles/
//! ├── 1_raw.txt               # extracted document text
//! ├── 1_meta.json             # title, author, topics, date
//! ├── 1_cleaned.txt           # annotation artifacts
//! ├── 1_single_tagged.txt
//! └── 1_multiple_tagged.txt
//! ```

pub mod cache;
pub mod dataset;
pub mod local;

// Re-export for convenience
pub use cache::{CachePolicy, FileCache, NoCache, UrlCache};
pub use dataset::{id_from_path, validate_dataset};
pub use local::LocalStorage;
