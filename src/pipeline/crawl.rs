// src/pipeline/crawl.rs

//! Article harvesting pipeline.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::Config;
use crate::services::{ArticleExtractor, RecursiveCrawler};
use crate::storage::{CachePolicy, FileCache, LocalStorage, NoCache};
use crate::utils::document::PdfTextExtractor;
use crate::utils::http::HttpFetcher;

/// Outcome of a crawl run.
#[derive(Debug, Clone)]
pub struct CrawlSummary {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Article URLs discovered (including ones restored from cache)
    pub discovered: usize,
    /// Articles written to the corpus
    pub saved: usize,
    /// Articles that could not be extracted
    pub failed: usize,
}

/// Crawl the configured archive and write a fresh numbered corpus.
pub async fn run_crawl(config: &Config) -> Result<CrawlSummary> {
    let start_time = Utc::now();
    config.validate()?;

    let storage = LocalStorage::new(&config.paths.assets_dir);
    storage.prepare()?;
    log::info!("Prepared corpus directory {}", storage.root().display());

    let fetcher = HttpFetcher::new(&config.crawler)?;
    let cache: Box<dyn CachePolicy> = if config.crawler.use_cache {
        Box::new(FileCache::new(&config.paths.cache_file))
    } else {
        Box::new(NoCache)
    };

    let mut crawler =
        RecursiveCrawler::new(&fetcher, cache.as_ref(), &config.crawler, &config.target)?;
    crawler.find_articles().await?;
    let urls = crawler.into_urls();

    let extractor = ArticleExtractor::new(&fetcher, &fetcher, Arc::new(PdfTextExtractor))?;
    let outcome = extractor
        .extract_all(&urls, config.crawler.max_concurrent)
        .await;

    for article in &outcome.articles {
        storage.save_raw(article)?;
    }

    let summary = CrawlSummary {
        start_time,
        end_time: Utc::now(),
        discovered: urls.len(),
        saved: outcome.articles.len(),
        failed: outcome.failures.len(),
    };

    log::info!(
        "Saved {} of {} articles to {} in {}s",
        summary.saved,
        summary.discovered,
        storage.root().display(),
        (summary.end_time - summary.start_time).num_seconds()
    );
    for (url, reason) in &outcome.failures {
        log::warn!("Skipped {}: {}", url, reason);
    }

    Ok(summary)
}
