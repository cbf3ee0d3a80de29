//! Async client for the backend admin API.
//!
//! Every request carries the configured `x-api-key` header. There is no
//! retry or backoff: a failed call returns the error and the caller's
//! in-memory state is left untouched so the operation can be retried.

pub mod config;
pub mod types;

pub use config::ApiConfig;
pub use types::*;

use crate::error::ApiError;
use crate::flow::Autoresponder;
use reqwest::{RequestBuilder, Response};
use serde_json::json;
use std::time::Duration;
use tokio::time::sleep;
use tracing::debug;
use url::Url;

/// Pause between template listing pages. The backend proxies the SES
/// template API, which rate-limits rapid listing calls.
const TEMPLATE_PAGE_DELAY: Duration = Duration::from_secs(1);

pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Creates or updates an autoresponder. The body is the full
    /// definition with empty strings normalized to null.
    pub async fn put_autoresponder(&self, autoresponder: &Autoresponder) -> Result<(), ApiError> {
        let body = autoresponder.to_api_json()?;
        let url = self.endpoint("/admin/autoresponder")?;
        self.send(self.http.post(url).json(&body)).await?;
        Ok(())
    }

    pub async fn get_autoresponder(&self, autoresponder_id: &str) -> Result<Autoresponder, ApiError> {
        let mut url = self.endpoint("/admin/autoresponder")?;
        url.query_pairs_mut()
            .append_pair("autoresponderId", autoresponder_id);
        let response = self.send(self.http.get(url)).await?;
        Ok(response.json().await?)
    }

    pub async fn delete_autoresponder(&self, autoresponder_id: &str) -> Result<(), ApiError> {
        let url = self.endpoint("/admin/autoresponder")?;
        let body = json!({ "autoresponderId": autoresponder_id });
        self.send(self.http.delete(url).json(&body)).await?;
        Ok(())
    }

    /// Fetches one page of the autoresponder listing.
    pub async fn list_autoresponders(
        &self,
        next_token: Option<&str>,
    ) -> Result<Vec<AutoresponderSummary>, ApiError> {
        let mut url = self.endpoint("/admin/autoresponders")?;
        if let Some(token) = next_token.filter(|t| !t.is_empty()) {
            url.query_pairs_mut().append_pair("nextToken", token);
        }
        let response = self.send(self.http.get(url)).await?;
        Ok(response.json().await?)
    }

    /// Fetches the complete template listing, following `nextToken`
    /// pagination with a fixed delay between page requests.
    pub async fn list_templates(&self) -> Result<Vec<TemplateSummary>, ApiError> {
        let mut templates = Vec::new();
        let mut next_token: Option<String> = None;
        loop {
            let mut url = self.endpoint("/admin/templates")?;
            if let Some(token) = next_token.as_deref().filter(|t| !t.is_empty()) {
                url.query_pairs_mut().append_pair("nextToken", token);
            }
            let response = self.send(self.http.get(url)).await?;
            let page: TemplatePage = response.json().await?;
            templates.extend(page.templates);
            match page.next_token.filter(|t| !t.is_empty()) {
                Some(token) => {
                    next_token = Some(token);
                    sleep(TEMPLATE_PAGE_DELAY).await;
                }
                None => break,
            }
        }
        Ok(templates)
    }

    pub async fn get_auto_confirm_tags(&self) -> Result<String, ApiError> {
        let url = self.endpoint("/admin/auto-confirm-tags")?;
        let response = self.send(self.http.get(url)).await?;
        let tags: AutoConfirmTags = response.json().await?;
        Ok(tags.auto_confirm_tags.unwrap_or_default())
    }

    pub async fn set_auto_confirm_tags(&self, tags: &str) -> Result<(), ApiError> {
        let url = self.endpoint("/admin/auto-confirm-tags")?;
        let body = AutoConfirmTags {
            auto_confirm_tags: Some(tags.to_string()),
        };
        self.send(self.http.post(url).json(&body)).await?;
        Ok(())
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.config.base_url.join(path)?)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let request = request.header("x-api-key", &self.config.api_key).build()?;
        debug!(method = %request.method(), url = %request.url(), "making api request");
        let response = self.http.execute(request).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("").to_string(),
            });
        }
        Ok(response)
    }
}
