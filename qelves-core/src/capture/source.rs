//! Response body retrieval
//!
//! Browser inspectors hand over response bodies lazily, through a callback
//! that fires once the body has been read. [`ContentSource`] is that fetch.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::warn;

use super::transaction::Transaction;

/// A fetched response body and its declared encoding
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchedContent {
    pub text: Option<String>,
    /// `base64` when the inspector could not hand over text directly
    pub encoding: Option<String>,
}

impl FetchedContent {
    /// Plain-text body
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            encoding: None,
        }
    }

    /// Body text with any base64 transfer encoding removed
    ///
    /// Undecodable base64 yields `None`; non-UTF-8 bytes are replaced.
    pub fn into_decoded(self) -> Option<String> {
        let text = self.text?;
        match self.encoding.as_deref() {
            Some(encoding) if encoding.eq_ignore_ascii_case("base64") => {
                match STANDARD.decode(text.trim()) {
                    Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
                    Err(e) => {
                        warn!(error = %e, "Response body is not valid base64");
                        None
                    }
                }
            }
            _ => Some(text),
        }
    }
}

/// Asynchronous access to a transaction's response body
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Fetch the response body; an unavailable body is empty content
    async fn content(&self) -> FetchedContent;
}

/// HAR entries embed their response body
#[async_trait]
impl ContentSource for Transaction {
    async fn content(&self) -> FetchedContent {
        self.response
            .content
            .as_ref()
            .map(|c| FetchedContent {
                text: c.text.clone(),
                encoding: c.encoding.clone(),
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl ContentSource for FetchedContent {
    async fn content(&self) -> FetchedContent {
        self.clone()
    }
}
