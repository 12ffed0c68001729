//! Provider backed by a remote HTTP character catalog.

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::Deserialize;

use guess_core::CharacterName;

use crate::api::{CharacterProvider, ProviderError};

/// Default catalog endpoint (paginated character listing).
pub const DEFAULT_CATALOG_URL: &str = "https://api.jikan.moe/v4/characters";

/// Default bound on one catalog request, connect included.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct CatalogPage {
    #[serde(default)]
    data: Vec<CatalogEntry>,
}

#[derive(Debug, Deserialize)]
struct CatalogEntry {
    name: Option<String>,
}

/// Fetches a random page of a remote catalog and picks one name from it.
///
/// Each request is bounded by `request_timeout`, so an unresponsive server
/// fails the attempt instead of stalling it. Whether the attempt is retried
/// is up to the [`RetryPolicy`](super::RetryPolicy).
pub struct RemoteCatalogProvider {
    base_url: String,
    page_count: u32,
    http_client: reqwest::Client,
}

impl RemoteCatalogProvider {
    pub fn new(
        base_url: impl Into<String>,
        page_count: u32,
        request_timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let http_client = reqwest::Client::builder()
            .connect_timeout(request_timeout)
            .timeout(request_timeout)
            .build()?;

        Ok(Self {
            base_url: base_url.into(),
            page_count: page_count.max(1),
            http_client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn page_url(&self, page: u32) -> String {
        format!("{}?page={}", self.base_url, page)
    }
}

#[async_trait]
impl CharacterProvider for RemoteCatalogProvider {
    async fn fetch(&self) -> Result<CharacterName, ProviderError> {
        let page = rand::thread_rng().gen_range(1..=self.page_count);
        let url = self.page_url(page);

        tracing::debug!("Fetching character page: {}", url);

        let response = self.http_client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let names = parse_page(&body)?;

        names
            .choose(&mut rand::thread_rng())
            .cloned()
            .ok_or(ProviderError::NoCandidates)
    }
}

/// Extracts the usable character names from one catalog page.
///
/// Entries without a name, or with a blank one, are skipped.
pub fn parse_page(body: &str) -> Result<Vec<CharacterName>, ProviderError> {
    let page: CatalogPage = serde_json::from_str(body)
        .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

    Ok(page
        .data
        .into_iter()
        .filter_map(|entry| entry.name)
        .filter_map(|name| CharacterName::new(name).ok())
        .collect())
}
