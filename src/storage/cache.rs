//! Resumable cache of discovered article URLs.

use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::error::{AppError, Result};

/// How the crawler saves and restores its discoveries.
pub trait CachePolicy: Send + Sync {
    /// Previously discovered URLs in discovery order.
    fn restore(&self) -> Result<Vec<String>>;

    /// Replace the saved state with `urls`.
    fn persist(&self, urls: &[String]) -> Result<()>;
}

/// Newline-delimited cache file, rewritten in full on every discovery.
#[derive(Debug, Clone)]
pub struct FileCache {
    path: PathBuf,
}

impl FileCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CachePolicy for FileCache {
    fn restore(&self) -> Result<Vec<String>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(AppError::Io(e)),
        };
        Ok(content
            .lines()
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    /// Write to a temporary file, then rename over the cache.
    fn persist(&self, urls: &[String]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, urls.join("\n"))?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// Crawl without remembering anything between runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCache;

impl CachePolicy for NoCache {
    fn restore(&self) -> Result<Vec<String>> {
        Ok(Vec::new())
    }

    fn persist(&self, _urls: &[String]) -> Result<()> {
        Ok(())
    }
}

/// Discovered article URLs plus the pages already visited.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct UrlCache {
    urls: Vec<String>,
    visited: HashSet<String>,
}

impl UrlCache {
    /// Seed both the URL list and the visited set from `policy`.
    pub fn restore(policy: &dyn CachePolicy) -> Result<Self> {
        let urls = policy.restore()?;
        let visited = urls.iter().cloned().collect();
        Ok(Self { urls, visited })
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    pub fn into_urls(self) -> Vec<String> {
        self.urls
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    /// Keep only the first `len` URLs in discovery order.
    ///
    /// Dropped URLs leave the visited set so they can be rediscovered.
    pub fn truncate(&mut self, len: usize) {
        for url in self.urls.drain(len.min(self.urls.len())..) {
            self.visited.remove(&url);
        }
    }

    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    /// Mark a page as visited. Returns `false` if it already was.
    pub fn mark_visited(&mut self, url: &str) -> bool {
        self.visited.insert(url.to_string())
    }

    /// Whether `url` was already recorded as an article.
    pub fn contains(&self, url: &str) -> bool {
        self.urls.iter().any(|u| u == url)
    }

    /// Record a discovered article URL and persist the full list.
    ///
    /// Returns `false` without persisting if the URL is already recorded.
    pub fn record(&mut self, url: String, policy: &dyn CachePolicy) -> Result<bool> {
        if self.contains(&url) {
            return Ok(false);
        }
        self.urls.push(url);
        policy.persist(&self.urls)?;
        Ok(true)
    }
}
