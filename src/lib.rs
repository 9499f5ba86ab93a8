//! # websum
//!
//! Summarise a single webpage with a locally hosted LLM.
//!
//! ## Pipeline
//!
//! - **Fetch**: one HTTP GET through [`scraper::HttpFetcher`]
//! - **Extract**: title plus body text, without scripts, styles, images and inputs
//! - **Prompt**: a fixed system + user message pair
//! - **Summarise**: one chat call to an Ollama server via [`agent::OllamaClient`]
//! - **Render**: the reply printed to the terminal

pub mod agent;
pub mod config;
pub mod prompt;
pub mod scraper;
pub mod summarizer;
pub mod ui;

pub use config::Config;
pub use crate::scraper::Page;
pub use summarizer::{SummarizeError, Summarizer};
