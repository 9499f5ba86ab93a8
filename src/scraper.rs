//! Web scraping module for content extraction.
//!
//! Uses reqwest for fetching and scraper for HTML parsing.

use async_trait::async_trait;
use lazy_static::lazy_static;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

/// Title used when the document has no usable `<title>` element
pub const NO_TITLE: &str = "No title found";

lazy_static! {
    static ref TITLE_SELECTOR: Selector = Selector::parse("title").unwrap();
    static ref BODY_SELECTOR: Selector = Selector::parse("body").unwrap();
    /// Elements whose text never reaches the model
    static ref IRRELEVANT_SELECTOR: Selector = Selector::parse("script, style, img, input").unwrap();
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("failed to fetch URL: {0}")]
    Network(#[from] reqwest::Error),
    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("{url} is not an HTML page (content type: {content_type})")]
    NotHtml { url: String, content_type: String },
}

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("malformed document: no <body> element to extract text from")]
    MalformedDocument,
}

/// Extracted content from a webpage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// The original URL
    pub url: String,
    /// Page title, or [`NO_TITLE`]
    pub title: String,
    /// Body text, one text node per line
    pub text: String,
}

impl Page {
    pub fn new(url: impl Into<String>, title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            text: text.into(),
        }
    }

    /// Build a page from the raw bytes fetched for `url`
    pub fn from_bytes(url: &str, raw: &[u8]) -> Result<Self, ExtractError> {
        let (title, text) = extract(raw)?;
        Ok(Self::new(url, title, text))
    }

    /// Length of the body text in characters, not bytes
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// Retrieves the raw bytes of a page.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// Plain HTTP GET fetcher.
///
/// The client is left at reqwest's defaults: no extra headers, default
/// redirect policy and no timeout override.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, FetchError> {
        let client = Client::builder().build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        tracing::debug!(url, "fetching page");
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        // A missing content type is given the benefit of the doubt
        if let Some(value) = response.headers().get(CONTENT_TYPE) {
            let content_type = value.to_str().unwrap_or_default().to_ascii_lowercase();
            if !is_html(&content_type) {
                return Err(FetchError::NotHtml {
                    url: url.to_string(),
                    content_type,
                });
            }
        }

        let bytes = response.bytes().await?;
        tracing::debug!(url, status = status.as_u16(), bytes = bytes.len(), "page fetched");
        Ok(bytes.to_vec())
    }
}

fn is_html(content_type: &str) -> bool {
    let essence = content_type.split(';').next().unwrap_or_default().trim();
    matches!(essence, "text/html" | "application/xhtml+xml")
}

/// Extract the title and the cleaned body text from a raw HTML document.
///
/// The source must contain a `<body>` start tag; the HTML parser would
/// otherwise synthesize an empty body. Script, style, image and input elements are detached from the body before
/// any text is collected. Remaining text nodes are trimmed, empty ones
/// dropped, and the rest joined with newlines in document order.
pub fn extract(raw: &[u8]) -> Result<(String, String), ExtractError> {
    let html = String::from_utf8_lossy(raw);
    if !has_body_tag(&html) {
        return Err(ExtractError::MalformedDocument);
    }
    let mut document = Html::parse_document(&html);

    let title = extract_title(&document);

    let body_id = document
        .select(&BODY_SELECTOR)
        .next()
        .map(|body| body.id())
        .ok_or(ExtractError::MalformedDocument)?;

    let irrelevant = document
        .tree
        .get(body_id)
        .and_then(ElementRef::wrap)
        .map(|body| body.select(&IRRELEVANT_SELECTOR).map(|e| e.id()).collect::<Vec<_>>())
        .unwrap_or_default();
    for id in irrelevant {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }

    let body = document
        .tree
        .get(body_id)
        .and_then(ElementRef::wrap)
        .ok_or(ExtractError::MalformedDocument)?;
    let text = body
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    tracing::debug!(title = %title, chars = text.len(), "extracted page text");
    Ok((title, text))
}

/// Whether the source has a `<body` start tag, in any case
fn has_body_tag(html: &str) -> bool {
    let bytes = html.as_bytes();
    bytes.windows(6).any(|w| {
        w[0] == b'<'
            && w[1..5].eq_ignore_ascii_case(b"body")
            && (w[5].is_ascii_whitespace() || w[5] == b'>' || w[5] == b'/')
    })
}

/// Extract the page title from the first <title>
fn extract_title(document: &Html) -> String {
    document
        .select(&TITLE_SELECTOR)
        .next()
        .map(|element| element.text().collect::<String>())
        .map(|title| title.trim().to_string())
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| NO_TITLE.to_string())
}
