//! Conversation fetch client
//!
//! Thin HTTP boundary to the chat platform API. It pages through
//! `conversations.history`-style endpoints and hands the raw messages to
//! the analytics pipeline untouched; the normalizer owns all validation.
//! Retry, backoff, and rate limiting belong to the operator of this
//! client, not here.

use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::config::ApiConfig;
use crate::config::FetchConfig;
use crate::models::RawRecord;
use crate::ConvoPulseError;
use crate::Result;

/// Envelope shared by the history and replies endpoints.
#[derive(Debug, Deserialize)]
struct ApiEnvelope {
    ok: bool,
    error: Option<String>,
    #[serde(default)]
    messages: Vec<RawRecord>,
    #[serde(default)]
    response_metadata: Option<ResponseMetadata>,
}

#[derive(Debug, Default, Deserialize)]
struct ResponseMetadata {
    next_cursor: Option<String>,
}

/// HTTP client for the conversation fetch API.
pub struct ConversationClient {
    http: reqwest::Client,
    base_url: Url,
    token: String,
    page_size: u32,
    max_pages: u32,
}

impl ConversationClient {
    pub fn new(api: &ApiConfig, fetch: &FetchConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(api.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: Url::parse(&api.base_url)?,
            token: api.token.clone(),
            page_size: fetch.page_size,
            max_pages: fetch.max_pages,
        })
    }

    /// Fetch a channel's message history inside an optional time window.
    pub async fn fetch_history(
        &self,
        channel: &str,
        oldest: Option<f64>,
        latest: Option<f64>,
    ) -> Result<Vec<RawRecord>> {
        let mut params = vec![("channel".to_string(), channel.to_string())];
        if let Some(oldest) = oldest {
            params.push(("oldest".to_string(), format!("{oldest:.6}")));
        }
        if let Some(latest) = latest {
            params.push(("latest".to_string(), format!("{latest:.6}")));
        }

        self.fetch_paginated("conversations.history", params).await
    }

    /// Fetch every reply in a thread, identified by its root timestamp.
    pub async fn fetch_replies(&self, channel: &str, thread_root: &str) -> Result<Vec<RawRecord>> {
        let params = vec![
            ("channel".to_string(), channel.to_string()),
            ("ts".to_string(), thread_root.to_string()),
        ];

        self.fetch_paginated("conversations.replies", params).await
    }

    async fn fetch_paginated(
        &self,
        method: &str,
        params: Vec<(String, String)>,
    ) -> Result<Vec<RawRecord>> {
        let endpoint = self.base_url.join(method)?;
        let mut messages = Vec::new();
        let mut cursor: Option<String> = None;

        for page in 0..self.max_pages {
            let mut query = params.clone();
            query.push(("limit".to_string(), self.page_size.to_string()));
            if let Some(cursor) = &cursor {
                query.push(("cursor".to_string(), cursor.clone()));
            }

            let envelope: ApiEnvelope = self
                .http
                .get(endpoint.clone())
                .bearer_auth(&self.token)
                .query(&query)
                .send()
                .await?
                .error_for_status()?
                .json()
                .await?;

            if !envelope.ok {
                return Err(ConvoPulseError::ApiError(
                    envelope.error.unwrap_or_else(|| "unknown error".to_string()),
                ));
            }

            tracing::info!(
                "Fetched page {} from {}: {} messages (total: {})",
                page + 1,
                method,
                envelope.messages.len(),
                messages.len() + envelope.messages.len()
            );
            messages.extend(envelope.messages);

            cursor = envelope
                .response_metadata
                .and_then(|meta| meta.next_cursor)
                .filter(|c| !c.is_empty());
            if cursor.is_none() {
                break;
            }
        }

        if cursor.is_some() {
            tracing::warn!(
                "Stopping {} fetch at {} pages with more data available",
                method,
                self.max_pages
            );
        }

        Ok(messages)
    }
}
