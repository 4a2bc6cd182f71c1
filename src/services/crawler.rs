// src/services/crawler.rs

//! Recursive archive crawler.
//!
//! Walks archive pages depth-first, descending into issue (table of contents)
//! pages before following pagination, and collects article file links until
//! the configured cap is reached.

use scraper::{Html, Selector};

use crate::error::{AppError, Result};
use crate::models::{CrawlTarget, CrawlerConfig};
use crate::storage::{CachePolicy, UrlCache};
use crate::utils::http::PageFetcher;
use crate::utils::resolve;

/// What a fetched page contributes to the traversal.
#[derive(Debug, PartialEq, Eq)]
enum PageLinks {
    /// Issue page: candidate article links as `(href, resolved url)`.
    Articles(Vec<(String, String)>),
    /// Archive page: pages to visit next, issues first.
    Pages(Vec<String>),
}

/// Depth-first crawler bounded by an exact article count.
pub struct RecursiveCrawler<'a> {
    fetcher: &'a dyn PageFetcher,
    cache: &'a dyn CachePolicy,
    config: CrawlerConfig,
    seed_urls: Vec<String>,
    max_articles: usize,
    state: UrlCache,
    file_link_selector: Selector,
    link_selector: Selector,
}

impl<'a> RecursiveCrawler<'a> {
    /// Create a crawler, restoring earlier discoveries from `cache`.
    pub fn new(
        fetcher: &'a dyn PageFetcher,
        cache: &'a dyn CachePolicy,
        config: &CrawlerConfig,
        target: &CrawlTarget,
    ) -> Result<Self> {
        let mut state = UrlCache::restore(cache)?;
        if state.len() > target.max_articles {
            log::info!(
                "Cache holds {} URLs, keeping the first {}",
                state.len(),
                target.max_articles
            );
            state.truncate(target.max_articles);
        }
        if !state.is_empty() {
            log::info!("Restored {} article URLs from cache", state.len());
        }

        Ok(Self {
            fetcher,
            cache,
            config: config.clone(),
            seed_urls: target.seed_urls.clone(),
            max_articles: target.max_articles,
            state,
            file_link_selector: parse_selector(&config.file_link_selector)?,
            link_selector: parse_selector("a[href]")?,
        })
    }

    /// Crawl from the last seed URL until the cap is reached or the
    /// hierarchy is exhausted.
    pub async fn find_articles(&mut self) -> Result<()> {
        let Some(seed) = self.seed_urls.pop() else {
            return Ok(());
        };
        log::info!(
            "Crawling from {} (target: {} articles)",
            seed,
            self.max_articles
        );
        self.visit(seed).await?;
        log::info!("Discovered {} article URLs", self.state.len());
        Ok(())
    }

    /// Article URLs discovered so far, in discovery order.
    pub fn urls(&self) -> &[String] {
        self.state.urls()
    }

    pub fn into_urls(self) -> Vec<String> {
        self.state.into_urls()
    }

    /// Seeds that have not been crawled yet.
    pub fn search_urls(&self) -> &[String] {
        &self.seed_urls
    }

    fn is_full(&self) -> bool {
        self.state.len() >= self.max_articles
    }

    async fn visit(&mut self, url: String) -> Result<()> {
        if self.is_full() {
            return Ok(());
        }
        if !self.state.mark_visited(&url) {
            return Ok(());
        }

        let page = match self.fetcher.fetch_page(&url).await {
            Ok(Some(page)) => page,
            Ok(None) => return Ok(()),
            Err(e) if e.is_network() => {
                log::warn!("Skipping {}: {}", url, e);
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        match self.classify(&url, page) {
            PageLinks::Articles(links) => self.extract_urls(links),
            PageLinks::Pages(next) => {
                for href in next {
                    if self.is_full() {
                        break;
                    }
                    Box::pin(self.visit(href)).await?;
                }
                Ok(())
            }
        }
    }

    /// Sort the links of a fetched page into what to do next.
    fn classify(&self, url: &str, page: Html) -> PageLinks {
        if url.contains(&self.config.issue_marker) {
            let links = page
                .select(&self.file_link_selector)
                .filter_map(|link| link.value().attr("href"))
                .map(|href| (href.to_string(), resolve(url, href)))
                .collect();
            return PageLinks::Articles(links);
        }

        let is_archive = url.contains(&self.config.archive_marker);
        let mut issues = Vec::new();
        let mut archives = Vec::new();
        for href in page
            .select(&self.link_selector)
            .filter_map(|link| link.value().attr("href"))
        {
            if is_archive && href.contains(&self.config.issue_marker) {
                issues.push(resolve(url, href));
            }
            if href.contains(&self.config.archive_marker) {
                archives.push(resolve(url, href));
            }
        }

        issues.extend(archives);
        PageLinks::Pages(issues)
    }

    /// Record article links from an issue page until the cap is reached.
    fn extract_urls(&mut self, links: Vec<(String, String)>) -> Result<()> {
        for (href, url) in links {
            // Whole-issue files repeat articles that are linked individually.
            if href.contains(&self.config.skip_marker) {
                continue;
            }
            if self.is_full() {
                break;
            }
            if self.state.record(url, self.cache)? {
                log::info!("Found article {}/{}", self.state.len(), self.max_articles);
            }
        }
        Ok(())
    }
}

fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}
