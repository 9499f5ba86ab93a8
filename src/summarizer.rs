//! The summarisation pipeline: fetch, extract, prompt, model call.

use crate::agent::{AgentError, ChatModel, OllamaClient};
use crate::config::AgentConfig;
use crate::prompt;
use crate::scraper::{ExtractError, FetchError, Fetcher, HttpFetcher, Page};
use crate::ui::Renderer;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SummarizeError {
    #[error(transparent)]
    Network(#[from] FetchError),
    #[error(transparent)]
    MalformedDocument(#[from] ExtractError),
    #[error(transparent)]
    ModelInvocation(#[from] AgentError),
    #[error("failed to render summary: {0}")]
    Render(#[from] std::io::Error),
}

/// Summarises single pages with one model configuration.
///
/// Nothing is cached between calls; each call fetches the page and queries
/// the model exactly once.
pub struct Summarizer<F = HttpFetcher, M = OllamaClient> {
    config: AgentConfig,
    fetcher: F,
    model: M,
}

impl Summarizer {
    /// Wire the HTTP fetcher and the Ollama client for `config`
    pub fn from_config(config: AgentConfig) -> Result<Self, SummarizeError> {
        let fetcher = HttpFetcher::new()?;
        let model = OllamaClient::new(&config.host)?;
        Ok(Self::new(config, fetcher, model))
    }
}

impl<F: Fetcher, M: ChatModel> Summarizer<F, M> {
    pub fn new(config: AgentConfig, fetcher: F, model: M) -> Self {
        Self {
            config,
            fetcher,
            model,
        }
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Fetch `url` and extract its title and text
    pub async fn extract_page(&self, url: &str) -> Result<Page, SummarizeError> {
        let raw = self.fetcher.fetch(url).await.inspect_err(|e| {
            tracing::warn!(url, error = %e, "fetch failed");
        })?;
        let page = Page::from_bytes(url, &raw).inspect_err(|e| {
            tracing::warn!(url, error = %e, "extraction failed");
        })?;
        Ok(page)
    }

    /// The two messages that would be sent to the model for `url`
    pub async fn messages(&self, url: &str) -> Result<[prompt::Message; 2], SummarizeError> {
        let page = self.extract_page(url).await?;
        Ok(prompt::build(&page, &self.config))
    }

    /// Summarise `url` and return the model's reply unchanged
    pub async fn summarize(&self, url: &str) -> Result<String, SummarizeError> {
        let messages = self.messages(url).await?;
        let summary = self
            .model
            .chat(&self.config.model, &messages)
            .await
            .inspect_err(|e| tracing::warn!(model = %self.config.model, error = %e, "model call failed"))?;
        Ok(summary)
    }

    /// Summarise `url` and hand the result to `renderer`
    pub async fn display_summary<R: Renderer>(
        &self,
        url: &str,
        renderer: &mut R,
    ) -> Result<(), SummarizeError> {
        let summary = self.summarize(url).await?;
        renderer.render(&summary)?;
        Ok(())
    }
}
