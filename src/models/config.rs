//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AppError, ConfigError, Result};
use crate::models::MAX_ARTICLES;

static SEED_URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://").expect("valid seed url pattern"));

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Where to start crawling and how many articles to collect
    pub target: CrawlTarget,

    /// HTTP and crawling behavior settings
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// Filesystem locations
    #[serde(default)]
    pub paths: PathsConfig,
}

/// Ambient sections that may accompany the required keys.
#[derive(Debug, Default, Deserialize)]
struct Sections {
    #[serde(default)]
    crawler: CrawlerConfig,
    #[serde(default)]
    paths: PathsConfig,
}

impl Config {
    /// Load and validate configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse and validate configuration from JSON text.
    ///
    /// The required keys are checked before anything else is read, so a bad
    /// seed list or article count never reaches the crawler.
    pub fn from_json(content: &str) -> Result<Self> {
        let raw: Value = serde_json::from_str(content)?;
        let target = validate_config(&raw)?;
        let sections: Sections = serde_json::from_value(raw)?;

        Ok(Self {
            target,
            crawler: sections.crawler,
            paths: sections.paths,
        })
    }

    /// Validate ambient configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.crawler.user_agent.trim().is_empty() {
            return Err(AppError::validation("crawler.user_agent is empty"));
        }
        if self.crawler.timeout_secs == 0 {
            return Err(AppError::validation("crawler.timeout_secs must be > 0"));
        }
        if self.crawler.max_concurrent == 0 {
            return Err(AppError::validation("crawler.max_concurrent must be > 0"));
        }
        if self.crawler.issue_marker.is_empty() || self.crawler.archive_marker.is_empty() {
            return Err(AppError::validation("crawler page markers must not be empty"));
        }
        Ok(())
    }
}

/// Validated crawl target taken from the required configuration keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlTarget {
    /// Archive or issue pages to start from
    pub seed_urls: Vec<String>,

    /// Exact cap on discovered article URLs
    pub max_articles: usize,
}

/// Validate the required keys of a crawler configuration document.
///
/// The article count is checked first, then the seed URLs.
pub fn validate_config(raw: &Value) -> std::result::Result<CrawlTarget, ConfigError> {
    let Some(seed_urls) = raw.get("seed_urls") else {
        return Err(ConfigError::IncorrectUrl("seed_urls is missing".into()));
    };
    let Some(count) = raw.get("total_articles_to_find_and_parse") else {
        return Err(ConfigError::IncorrectNumberOfArticles(
            "total_articles_to_find_and_parse is missing".into(),
        ));
    };

    let max_articles = match count.as_u64() {
        Some(0) | None => {
            return Err(ConfigError::IncorrectNumberOfArticles(count.to_string()));
        }
        Some(n) if n > MAX_ARTICLES => return Err(ConfigError::NumberOfArticlesOutOfRange(n)),
        Some(n) => n as usize,
    };

    let seeds = match seed_urls.as_array() {
        Some(list) if !list.is_empty() => list,
        _ => return Err(ConfigError::IncorrectUrl(seed_urls.to_string())),
    };

    let seed_urls = seeds
        .iter()
        .map(|seed| match seed.as_str() {
            Some(url) if SEED_URL_PATTERN.is_match(url) => Ok(url.to_string()),
            _ => Err(ConfigError::IncorrectUrl(seed.to_string())),
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(CrawlTarget {
        seed_urls,
        max_articles,
    })
}

/// HTTP client and crawling behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Maximum articles extracted at once
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,

    /// URL fragment identifying an issue (table of contents) page
    #[serde(default = "defaults::issue_marker")]
    pub issue_marker: String,

    /// URL fragment identifying an archive page
    #[serde(default = "defaults::archive_marker")]
    pub archive_marker: String,

    /// File links containing this fragment point at whole issues and are skipped
    #[serde(default = "defaults::skip_marker")]
    pub skip_marker: String,

    /// CSS selector for article file links on an issue page
    #[serde(default = "defaults::file_link_selector")]
    pub file_link_selector: String,

    /// Persist discovered URLs so an interrupted crawl can resume
    #[serde(default = "defaults::use_cache")]
    pub use_cache: bool,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            max_concurrent: defaults::max_concurrent(),
            issue_marker: defaults::issue_marker(),
            archive_marker: defaults::archive_marker(),
            skip_marker: defaults::skip_marker(),
            file_link_selector: defaults::file_link_selector(),
            use_cache: defaults::use_cache(),
        }
    }
}

/// Filesystem locations used by the crawl and annotate phases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory holding the numbered corpus
    #[serde(default = "defaults::assets_dir")]
    pub assets_dir: PathBuf,

    /// Newline-delimited URL cache
    #[serde(default = "defaults::cache_file")]
    pub cache_file: PathBuf,

    /// Output of the second-person scan
    #[serde(default = "defaults::second_person_file")]
    pub second_person_file: PathBuf,

    /// JSON lexicon for the secondary tagger
    #[serde(default)]
    pub lexicon_file: Option<PathBuf>,

    /// Primary analyzer executable
    #[serde(default = "defaults::mystem_binary")]
    pub mystem_binary: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            assets_dir: defaults::assets_dir(),
            cache_file: defaults::cache_file(),
            second_person_file: defaults::second_person_file(),
            lexicon_file: None,
            mystem_binary: defaults::mystem_binary(),
        }
    }
}

mod defaults {
    use std::path::PathBuf;

    // Crawler defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; harvester/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn max_concurrent() -> usize {
        1
    }
    pub fn issue_marker() -> String {
        "showToc".into()
    }
    pub fn archive_marker() -> String {
        "archive".into()
    }
    pub fn skip_marker() -> String {
        "issue".into()
    }
    pub fn file_link_selector() -> String {
        "a.file".into()
    }
    pub fn use_cache() -> bool {
        true
    }

    // Path defaults
    pub fn assets_dir() -> PathBuf {
        PathBuf::from("tmp").join("articles")
    }
    pub fn cache_file() -> PathBuf {
        PathBuf::from("cache.txt")
    }
    pub fn second_person_file() -> PathBuf {
        PathBuf::from("2sg.txt")
    }
    pub fn mystem_binary() -> PathBuf {
        PathBuf::from("mystem")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn target(value: Value) -> std::result::Result<CrawlTarget, ConfigError> {
        validate_config(&value)
    }

    #[test]
    fn validate_accepts_minimal_config() {
        let config = Config::from_json(
            r#"{"seed_urls": ["http://example.com/archive"], "total_articles_to_find_and_parse": 3}"#,
        )
        .unwrap();
        assert_eq!(config.target.max_articles, 3);
        assert_eq!(config.target.seed_urls, vec!["http://example.com/archive"]);
        assert_eq!(config.crawler.issue_marker, "showToc");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_reads_ambient_sections() {
        let config = Config::from_json(
            r#"{
                "seed_urls": ["https://journal.example/archive"],
                "total_articles_to_find_and_parse": 200,
                "crawler": {"max_concurrent": 4, "use_cache": false},
                "paths": {"assets_dir": "out"}
            }"#,
        )
        .unwrap();
        assert_eq!(config.crawler.max_concurrent, 4);
        assert!(!config.crawler.use_cache);
        assert_eq!(config.paths.assets_dir, PathBuf::from("out"));
        assert_eq!(config.paths.cache_file, PathBuf::from("cache.txt"));
    }

    #[test]
    fn validate_rejects_bad_counts() {
        let seeds = json!(["http://example.com"]);
        for count in [json!(0), json!(-5), json!(2.5), json!("10"), json!(null)] {
            let err = target(json!({"seed_urls": seeds, "total_articles_to_find_and_parse": count}))
                .unwrap_err();
            assert!(matches!(err, ConfigError::IncorrectNumberOfArticles(_)));
        }
    }

    #[test]
    fn validate_rejects_count_above_range() {
        let err = target(json!({
            "seed_urls": ["http://example.com"],
            "total_articles_to_find_and_parse": 201
        }))
        .unwrap_err();
        assert_eq!(err, ConfigError::NumberOfArticlesOutOfRange(201));
    }

    #[test]
    fn validate_rejects_bad_seeds() {
        for seeds in [
            json!([]),
            json!("http://example.com"),
            json!(["ftp://example.com"]),
            json!(["http://example.com", "example.com"]),
            json!([42]),
        ] {
            let err = target(json!({"seed_urls": seeds, "total_articles_to_find_and_parse": 5}))
                .unwrap_err();
            assert!(matches!(err, ConfigError::IncorrectUrl(_)));
        }
    }

    #[test]
    fn validate_rejects_missing_keys() {
        assert!(matches!(
            target(json!({"total_articles_to_find_and_parse": 5})),
            Err(ConfigError::IncorrectUrl(_))
        ));
        assert!(matches!(
            target(json!({"seed_urls": ["http://example.com"]})),
            Err(ConfigError::IncorrectNumberOfArticles(_))
        ));
    }

    #[test]
    fn validate_rejects_zero_concurrency() {
        let mut config = Config::from_json(
            r#"{"seed_urls": ["http://example.com"], "total_articles_to_find_and_parse": 1}"#,
        )
        .unwrap();
        config.crawler.max_concurrent = 0;
        assert!(config.validate().is_err());
    }
}
