//! PostgREST provider (Supabase tables)

use super::{ContentProvider, FetchResult};
use crate::error::FetchError;
use crate::types::ContentItem;
use async_trait::async_trait;
use std::time::Duration;

/// Reads the content table over the PostgREST API
pub struct RestProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    table: String,
}

impl RestProvider {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        table: impl Into<String>,
    ) -> FetchResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("estante/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            table: table.into(),
        })
    }

    /// URL of the ordered select query
    pub fn query_url(&self) -> String {
        format!(
            "{}/rest/v1/{}?select=*&order=created_at.desc",
            self.base_url, self.table
        )
    }
}

#[async_trait]
impl ContentProvider for RestProvider {
    async fn list_contents(&self) -> FetchResult<Vec<ContentItem>> {
        let url = self.query_url();
        tracing::debug!("Querying {}", url);

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                message,
            });
        }

        // PostgREST answers `null` for some empty selects
        let rows: Option<Vec<ContentItem>> = response
            .json()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))?;
        Ok(rows.unwrap_or_default())
    }

    fn name(&self) -> &'static str {
        "postgrest"
    }
}
