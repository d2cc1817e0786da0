use std::time::Duration;

use jisho_types::ResultSet;
use tracing::{debug, warn};

use crate::{DictionaryLookup, LookupError};

#[derive(Clone)]
pub struct JishoClient {
    api_url: String,
    client: reqwest::Client,
}

impl JishoClient {
    pub fn new(api_url: String, timeout: Duration) -> Result<Self, LookupError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self { api_url, client })
    }
}

#[async_trait::async_trait]
impl DictionaryLookup for JishoClient {
    async fn search(&self, keyword: &str) -> Result<ResultSet, LookupError> {
        debug!(keyword = %keyword, "querying dictionary");

        let response = self
            .client
            .get(&self.api_url)
            .query(&[("keyword", keyword)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status(status));
        }

        // Read the body first so a bad payload surfaces as Decode, not Transport
        let body = response.bytes().await?;
        let result: ResultSet = serde_json::from_slice(&body)?;

        if result.meta.status != 200 {
            warn!(
                keyword = %keyword,
                status = result.meta.status,
                "dictionary reported non-200 meta status"
            );
        }

        debug!(keyword = %keyword, entries = result.len(), "dictionary answered");
        Ok(result)
    }
}
