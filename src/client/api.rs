use std::path::Path;
use std::time::Duration;

use reqwest::{multipart, Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::client::error::ClientError;
use crate::client::scanner::ItemDraft;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemRecord {
    pub id: i32,
    pub title: Option<String>,
    pub gtin: String,
    pub category: String,
    pub image: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreatedItem {
    pub id: i32,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: String,
}

/// Typed wrapper around the inventory HTTP API.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();

        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn list_items(
        &self,
        search: &str,
        category: &str,
    ) -> Result<Vec<ItemRecord>, ClientError> {
        let response = self
            .client
            .get(format!("{}/items", self.base_url))
            .query(&[("search", search), ("category", category)])
            .send()
            .await?;

        Self::parse(response).await
    }

    pub async fn item_by_gtin(&self, gtin: &str) -> Result<ItemRecord, ClientError> {
        let response = self
            .client
            .get(format!("{}/items/{}", self.base_url, gtin))
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound);
        }

        Self::parse(response).await
    }

    /// Submit a draft as one multipart request. The image part is attached
    /// only when the draft carries one.
    pub async fn add_item(&self, draft: &ItemDraft) -> Result<CreatedItem, ClientError> {
        let mut form = multipart::Form::new()
            .text("gtin", draft.gtin.clone())
            .text("category", draft.category.clone());

        if let Some(title) = &draft.title {
            form = form.text("title", title.clone());
        }

        if let Some(path) = &draft.image {
            form = form.part("image", Self::file_part(path).await?);
        }

        let response = self
            .client
            .post(format!("{}/items", self.base_url))
            .multipart(form)
            .send()
            .await?;

        Self::parse(response).await
    }

    /// Public URL of a stored image blob.
    pub fn image_url(&self, name: &str) -> String {
        format!("{}/images/{}", self.base_url, name)
    }

    async fn file_part(path: &Path) -> Result<multipart::Part, ClientError> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        Ok(multipart::Part::bytes(bytes).file_name(file_name))
    }

    async fn parse<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response.json().await?);
        }

        let message = response
            .json::<ApiErrorBody>()
            .await
            .map(|body| body.error)
            .unwrap_or_else(|_| status.to_string());

        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}
