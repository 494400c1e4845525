use reqwest::{header, Client, RequestBuilder, Response, StatusCode};
use serde_json::Value;
use thiserror::Error;
use time::OffsetDateTime;

use crate::dev_backend::DevBackend;
use crate::domain::{self, normalize_entries, normalize_tags, EntryId, Tag, TagId, TimeEntry};
use crate::dto::{CreateEntryRequest, CreateTagRequest};
use crate::endpoints::ApiEndpoints;

/// HTTP client for the time-tracking REST backend.
///
/// Cloning is cheap; every clone shares the same connection pool (and, in
/// dev mode, the same in-memory backend).
#[derive(Debug, Clone)]
pub struct TrackerClient {
    client: Client,
    endpoints: ApiEndpoints,
    dev_backend: Option<DevBackend>,
}

impl TrackerClient {
    pub fn new(endpoints: ApiEndpoints) -> Result<Self, TrackerError> {
        let client = Client::builder().build().map_err(TrackerError::Client)?;

        Ok(Self {
            client,
            endpoints,
            dev_backend: None,
        })
    }

    /// A client that never touches the network and serves seeded sample data.
    pub fn dev() -> Self {
        Self {
            client: Client::new(),
            endpoints: ApiEndpoints::new("http://localhost"),
            dev_backend: Some(DevBackend::new()),
        }
    }

    pub fn endpoints(&self) -> &ApiEndpoints {
        &self.endpoints
    }

    pub fn is_dev(&self) -> bool {
        self.dev_backend.is_some()
    }

    async fn send(
        &self,
        request: RequestBuilder,
        call: &'static str,
    ) -> Result<Response, TrackerError> {
        let response = request
            .send()
            .await
            .map_err(|source| TrackerError::Transport { call, source })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("{} returned {}", call, status);
            return Err(TrackerError::Status { call, status, body });
        }

        Ok(response)
    }

    async fn get_json(&self, url: &str, call: &'static str) -> Result<Value, TrackerError> {
        let request = self
            .client
            .get(url)
            .header(header::CACHE_CONTROL, "no-store");
        let response = self.send(request, call).await?;

        response
            .json::<Value>()
            .await
            .map_err(|source| TrackerError::Parse { call, source })
    }

    pub async fn list_tags(&self) -> Result<Vec<Tag>, TrackerError> {
        if let Some(dev) = &self.dev_backend {
            return Ok(dev.tags());
        }

        let payload = self.get_json(self.endpoints.tags(), "GET /api/tags").await?;
        let tags = normalize_tags(&payload);
        tracing::debug!("Fetched {} tags", tags.len());
        Ok(tags)
    }

    pub async fn create_tag(&self, request: &CreateTagRequest) -> Result<Tag, TrackerError> {
        if let Some(dev) = &self.dev_backend {
            return Ok(dev.create_tag(request));
        }

        const CALL: &str = "POST /api/tags";
        let response = self
            .send(self.client.post(self.endpoints.tags()).json(request), CALL)
            .await?;
        let payload = response
            .json::<Value>()
            .await
            .map_err(|source| TrackerError::Parse { call: CALL, source })?;

        Tag::from_json(&payload).ok_or(TrackerError::InvalidResponse { call: CALL })
    }

    pub async fn list_time_entries(&self) -> Result<Vec<TimeEntry>, TrackerError> {
        if let Some(dev) = &self.dev_backend {
            return Ok(dev.time_entries());
        }

        let payload = self
            .get_json(self.endpoints.time_entries(), "GET /api/time-entries")
            .await?;
        let entries = normalize_entries(&payload);
        tracing::debug!("Fetched {} time entries", entries.len());
        Ok(entries)
    }

    /// Record a closed interval. The response body, if any, is ignored.
    pub async fn create_time_entry(
        &self,
        start_at: OffsetDateTime,
        end_at: OffsetDateTime,
        tag_ids: &[TagId],
    ) -> Result<(), TrackerError> {
        if let Some(dev) = &self.dev_backend {
            dev.create_entry(start_at, end_at, tag_ids);
            return Ok(());
        }

        let body = CreateEntryRequest {
            start_at: domain::format_timestamp(start_at)?,
            end_at: domain::format_timestamp(end_at)?,
            tag_ids,
        };
        let response = self
            .send(
                self.client.post(self.endpoints.time_entries()).json(&body),
                "POST /api/time-entries",
            )
            .await?;
        let _ = response.bytes().await;
        Ok(())
    }

    pub async fn delete_time_entry(&self, id: &EntryId) -> Result<(), TrackerError> {
        if let Some(dev) = &self.dev_backend {
            return if dev.delete_entry(id) {
                Ok(())
            } else {
                Err(TrackerError::Status {
                    call: "DELETE /api/time-entries/:id",
                    status: StatusCode::NOT_FOUND,
                    body: format!("Time entry {} not found", id),
                })
            };
        }

        let response = self
            .send(
                self.client.delete(self.endpoints.time_entry(id)),
                "DELETE /api/time-entries/:id",
            )
            .await?;
        let _ = response.bytes().await;
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("Failed to call {call}: {source}")]
    Transport {
        call: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{call} returned {status}")]
    Status {
        call: &'static str,
        status: StatusCode,
        body: String,
    },
    #[error("Failed to parse {call} response: {source}")]
    Parse {
        call: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{call} returned an unusable payload")]
    InvalidResponse { call: &'static str },
    #[error("Failed to format timestamp: {0}")]
    Timestamp(#[from] time::error::Format),
}

impl TrackerError {
    /// The server's own error text when it sent one, otherwise `fallback`.
    pub fn message_or(&self, fallback: &str) -> String {
        match self {
            TrackerError::Status { body, .. } if !body.trim().is_empty() => body.trim().to_string(),
            _ => fallback.to_string(),
        }
    }
}
