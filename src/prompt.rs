//! Prompt construction for the summarisation request.

use crate::config::AgentConfig;
use crate::scraper::Page;
use serde::{Deserialize, Serialize};

/// Who a message is attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// A role-tagged unit of the chat exchange
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Instruction placed in the system message
pub fn system_prompt(language: &str) -> String {
    format!(
        "You are an assistant that analyzes the contents of a website and provides a short summary. \
         Ignore text related to navigation, ads, or images. Respond in {language}."
    )
}

/// Page content placed in the user message.
///
/// The body text is appended verbatim; large pages produce large prompts.
pub fn user_prompt(page: &Page, language: &str) -> String {
    format!(
        "You are looking at a website titled '{}'. The contents of this website are as follows:\n\
         Please summarize the content in {language}. If there are any news or announcements, include them as well.\n\n\
         {}",
        page.title, page.text
    )
}

/// Build the system + user exchange sent to the model, in that order.
pub fn build(page: &Page, config: &AgentConfig) -> [Message; 2] {
    [
        Message::system(system_prompt(&config.language)),
        Message::user(user_prompt(page, &config.language)),
    ]
}
