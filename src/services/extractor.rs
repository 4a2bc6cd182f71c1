// src/services/extractor.rs

//! Article extraction service.
//!
//! Downloads an article's document, extracts its text and fills in metadata
//! scraped from the article landing page.

use std::sync::{Arc, LazyLock};

use chrono::NaiveDate;
use futures::stream::{self, StreamExt};
use regex::Regex;
use scraper::{Html, Node, Selector};

use crate::error::{AppError, Result};
use crate::models::Article;
use crate::utils::clean_text;
use crate::utils::document::TextExtractor;
use crate::utils::http::{DocumentSource, PageFetcher};

/// "Подписано в печать 12.03.2019." style imprint line.
static IMPRINT_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"печат[ьи] ([0-9.]*)").expect("valid imprint pattern"));

/// Summary of an extraction run.
#[derive(Debug, Default)]
pub struct ExtractionOutcome {
    /// Successfully extracted articles, numbered 1..=N in discovery order
    pub articles: Vec<Article>,
    /// Article URLs that failed, with the reason
    pub failures: Vec<(String, String)>,
}

/// Builds [`Article`] records from article view URLs.
pub struct ArticleExtractor<'a> {
    pages: &'a dyn PageFetcher,
    documents: &'a dyn DocumentSource,
    text: Arc<dyn TextExtractor>,
    title_sel: Selector,
    author_sel: Selector,
    subject_sel: Selector,
    subject_list_sel: Selector,
}

impl<'a> ArticleExtractor<'a> {
    pub fn new(
        pages: &'a dyn PageFetcher,
        documents: &'a dyn DocumentSource,
        text: Arc<dyn TextExtractor>,
    ) -> Result<Self> {
        Ok(Self {
            pages,
            documents,
            text,
            title_sel: parse_selector("h1")?,
            author_sel: parse_selector("div#authorString a")?,
            subject_sel: parse_selector("div#articleSubject")?,
            subject_list_sel: parse_selector("div")?,
        })
    }

    /// Extract a single article. Any missing piece fails the whole article.
    pub async fn extract(&self, article_url: &str, id: usize) -> Result<Article> {
        let document_url = document_url(article_url);
        let mut article = Article::new(&document_url, id);

        let bytes = self.documents.download(&document_url).await?;
        article.text = self.extract_text(bytes, &document_url).await?;

        let landing = landing_url(article_url);
        let page = self
            .pages
            .fetch_page(&landing)
            .await?
            .ok_or_else(|| AppError::parse(&landing, "article page unavailable"))?;

        self.fill_meta(&mut article, &page, &landing)?;
        article.date = Some(parse_date(&article.text, &document_url)?);
        Ok(article)
    }

    /// Extract every URL, isolating failures per article.
    ///
    /// At most `concurrency` articles are in flight at once. Successful
    /// articles are renumbered so ids stay contiguous in discovery order.
    pub async fn extract_all(&self, urls: &[String], concurrency: usize) -> ExtractionOutcome {
        let mut results = stream::iter(urls.iter().enumerate())
            .map(|(idx, url)| async move { (url, self.extract(url, idx + 1).await) })
            .buffered(concurrency.max(1));

        let mut outcome = ExtractionOutcome::default();
        while let Some((url, result)) = results.next().await {
            match result {
                Ok(mut article) => {
                    article.id = outcome.articles.len() + 1;
                    log::info!("Extracted article {}: {}", article.id, article.title);
                    outcome.articles.push(article);
                }
                Err(error) => {
                    log::warn!("Failed to extract {}: {}", url, error);
                    outcome.failures.push((url.clone(), error.to_string()));
                }
            }
        }
        outcome
    }

    /// Extract document text on the blocking pool.
    async fn extract_text(&self, bytes: Vec<u8>, context: &str) -> Result<String> {
        let text = Arc::clone(&self.text);
        tokio::task::spawn_blocking(move || text.extract_text(&bytes))
            .await
            .map_err(|e| AppError::Extraction(format!("{context}: {e}")))?
    }

    fn fill_meta(&self, article: &mut Article, page: &Html, context: &str) -> Result<()> {
        let title = page
            .select(&self.title_sel)
            .next()
            .ok_or_else(|| AppError::parse(context, "title heading missing"))?;
        article.title = title.text().collect::<String>();

        let author = page
            .select(&self.author_sel)
            .next()
            .ok_or_else(|| AppError::parse(context, "author link missing"))?;
        let author_text = author.text().collect::<String>();
        article.author = if author_text.is_empty() {
            clean_text(author.value().attr("title").unwrap_or_default())
        } else {
            clean_text(&author_text)
        };

        let subjects = page
            .select(&self.subject_sel)
            .next()
            .and_then(|subject| subject.select(&self.subject_list_sel).next())
            .ok_or_else(|| AppError::parse(context, "subject list missing"))?;
        article.topics = subjects
            .children()
            .map(|node| match node.value() {
                Node::Text(text) => clean_text(text),
                Node::Element(_) => scraper::ElementRef::wrap(node)
                    .map(|el| clean_text(&el.text().collect::<String>()))
                    .unwrap_or_default(),
                _ => String::new(),
            })
            .filter(|topic| !topic.is_empty() && !topic.contains(','))
            .collect();

        Ok(())
    }
}

/// Document download URL for an article view URL.
pub fn document_url(article_url: &str) -> String {
    format!("{}.pdf", article_url.replace("view", "download"))
}

/// Landing page URL: the view URL without its last path segment.
pub fn landing_url(article_url: &str) -> String {
    match article_url.rsplit_once('/') {
        Some((head, _)) => head.to_string(),
        None => article_url.to_string(),
    }
}

/// Publication date from the imprint line embedded in the document text.
pub fn parse_date(text: &str, context: &str) -> Result<NaiveDate> {
    let raw = IMPRINT_DATE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim_end_matches('.'))
        .ok_or_else(|| AppError::parse(context, "publication date missing"))?;

    NaiveDate::parse_from_str(raw, "%d.%m.%Y")
        .map_err(|e| AppError::parse(context, format!("bad publication date '{raw}': {e}")))
}

fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}
