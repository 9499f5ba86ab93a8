#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use websum::agent::{AgentError, ChatModel};
use websum::prompt::Message;
use websum::scraper::{FetchError, Fetcher};

/// A URL nothing is listening on.
pub fn refused_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().expect("addr").port();
    drop(listener);
    format!("http://127.0.0.1:{port}/")
}

/// Serves canned HTML, or a real connection error.
pub struct FakeFetcher {
    pub html: Option<&'static str>,
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl FakeFetcher {
    pub fn serving(html: &'static str) -> Self {
        Self {
            html: Some(html),
            calls: Arc::default(),
        }
    }

    pub fn failing() -> Self {
        Self {
            html: None,
            calls: Arc::default(),
        }
    }
}

#[async_trait]
impl Fetcher for FakeFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self.calls.lock().unwrap().push(url.to_string());
        match self.html {
            Some(html) => Ok(html.as_bytes().to_vec()),
            None => {
                // Produce a genuine reqwest connection error
                let err = reqwest::get(refused_url()).await.unwrap_err();
                Err(FetchError::Network(err))
            }
        }
    }
}

/// Records every chat call and answers with a fixed reply.
pub struct FakeModel {
    pub reply: Result<String, String>,
    pub calls: Arc<Mutex<Vec<(String, Vec<Message>)>>>,
}

impl FakeModel {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            calls: Arc::default(),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            calls: Arc::default(),
        }
    }
}

#[async_trait]
impl ChatModel for FakeModel {
    async fn chat(&self, model: &str, messages: &[Message]) -> Result<String, AgentError> {
        self.calls
            .lock()
            .unwrap()
            .push((model.to_string(), messages.to_vec()));
        self.reply.clone().map_err(AgentError::RequestFailed)
    }
}
