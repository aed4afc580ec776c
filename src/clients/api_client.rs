//! # API Client
//!
//! HTTP implementation of [`CatalogService`] and [`StockService`] over the
//! storefront REST API (`GET /products/{id}`, `GET /stock/{id}`).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, instrument};

use super::services::{CatalogService, ServiceError, StockService};
use crate::model::{CatalogProduct, ProductId, Stock};

/// Client for the storefront API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a client rooted at `base_url` (e.g. `http://localhost:3333`).
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ServiceError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::Request(e.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, ServiceError> {
        self.http
            .get(url)
            .send()
            .await
            .map_err(|e| ServiceError::Request(e.to_string()))
    }
}

#[async_trait]
impl CatalogService for ApiClient {
    #[instrument(skip(self))]
    async fn fetch_product(&self, id: ProductId) -> Result<Option<CatalogProduct>, ServiceError> {
        let url = self.url(&format!("products/{id}"));
        let response = self.get(&url).await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!("Catalog has no such product");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(ServiceError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ServiceError::Request(e.to_string()))?;
        parse_catalog_body(&body)
    }
}

#[async_trait]
impl StockService for ApiClient {
    #[instrument(skip(self))]
    async fn fetch_stock(&self, id: ProductId) -> Result<Stock, ServiceError> {
        let url = self.url(&format!("stock/{id}"));
        let response = self.get(&url).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let stock: Stock = response
            .json()
            .await
            .map_err(|e| ServiceError::Decode(e.to_string()))?;
        debug!(available = stock.amount, "Fetched stock");
        Ok(stock)
    }
}

/// Decodes a catalog response body.
///
/// An empty body, `null` or `{}` all mean "no product".
fn parse_catalog_body(body: &str) -> Result<Option<CatalogProduct>, ServiceError> {
    if body.trim().is_empty() {
        return Ok(None);
    }

    let value: Value = serde_json::from_str(body).map_err(|e| ServiceError::Decode(e.to_string()))?;
    let absent = match &value {
        Value::Null => true,
        Value::Object(fields) => fields.is_empty(),
        _ => false,
    };
    if absent {
        return Ok(None);
    }

    serde_json::from_value(value)
        .map(Some)
        .map_err(|e| ServiceError::Decode(e.to_string()))
}
