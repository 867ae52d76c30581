use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, warn};

use super::config::Settings;
use super::payload::render_rows;
use super::view::ResultView;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("HTTP error! status: {0}")]
    Status(StatusCode),
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, PartialEq)]
pub enum Outcome {
    Cleared,
    Rendered { rows: usize },
}

/// What `encodeURIComponent` leaves alone: alphanumerics and `-_.!~*'()`.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub fn query_url(base_url: &str, text: &str) -> String {
    format!("{}?query={}", base_url, utf8_percent_encode(text, QUERY_COMPONENT))
}

/// Turns one settled input value into either a clear or a rendered response.
///
/// Every call gets a generation number. Responses are rendered in completion
/// order, so an older request finishing last still wins the view; that case is
/// logged as stale.
pub struct Dispatcher {
    client: Client,
    base_url: String,
    min_chars: usize,
    issued: AtomicU64,
    newest_shown: AtomicU64,
}

impl Dispatcher {
    pub fn new(settings: &Settings) -> Result<Self, DispatchError> {
        let client = Client::builder()
            .user_agent(concat!("typeahead/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Dispatcher {
            client,
            base_url: settings.base_url.clone(),
            min_chars: settings.min_chars,
            issued: AtomicU64::new(0),
            newest_shown: AtomicU64::new(0),
        })
    }

    /// Runs the query and logs any failure. Nothing is rendered on failure.
    pub async fn dispatch(&self, text: String, view: Arc<dyn ResultView>) {
        if let Err(e) = self.run(&text, view.as_ref()).await {
            error!("Error fetching data for {:?}: {}", text, e);
        }
    }

    pub async fn run(&self, text: &str, view: &dyn ResultView) -> Result<Outcome, DispatchError> {
        debug!("input: {:?}", text);
        let generation = self.issued.fetch_add(1, Ordering::SeqCst) + 1;

        if text.chars().count() < self.min_chars {
            self.mark_shown(generation);
            view.clear();
            return Ok(Outcome::Cleared);
        }

        let url = query_url(&self.base_url, text);
        debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DispatchError::Status(status));
        }
        let body = response.bytes().await?;
        let payload: Value = serde_json::from_slice(&body)?;

        self.mark_shown(generation);
        view.show(&payload);
        Ok(Outcome::Rendered {
            rows: render_rows(&payload).len(),
        })
    }

    fn mark_shown(&self, generation: u64) {
        let newest = self.newest_shown.fetch_max(generation, Ordering::SeqCst);
        if newest > generation {
            warn!(
                "stale response: request #{} completed after #{} was already shown",
                generation, newest
            );
        }
    }
}
