//! Thin reqwest wrapper over the direction-scoped movement endpoints.
//!
//! No request is ever retried or aborted here: the entry engine treats
//! every call as fire-and-report. Transport timeouts are left at
//! reqwest's defaults.

use reqwest::Response;

use super::error::{extract_server_message, ApiError, Result};
use super::models::{CreateMovement, Page, ProductSuggestion, StockMovementRow, UpdateMovement};
use crate::engine::Direction;

/// Client for the inventory server. Cheap to clone; reqwest pools
/// connections internally.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    fn url(&self, direction: Direction, rest: &str) -> String {
        format!("{}/{}{}", self.base_url, direction.path_segment(), rest)
    }

    /// `GET /stock-{in|out}/search-products?q=` — ordered, bounded
    /// candidate list in server-defined relevance order.
    pub async fn search_products(
        &self,
        direction: Direction,
        query: &str,
    ) -> Result<Vec<ProductSuggestion>> {
        let url = self.url(direction, "/search-products");
        let resp = self.http.get(url).query(&[("q", query)]).send().await?;
        let resp = check(resp).await?;
        Ok(resp.json().await?)
    }

    /// `GET /stock-{in|out}?page=&per_page=` — one page of movement rows.
    pub async fn list_movements(
        &self,
        direction: Direction,
        page: u64,
        per_page: u64,
    ) -> Result<Page<StockMovementRow>> {
        let url = self.url(direction, "");
        let resp = self
            .http
            .get(url)
            .query(&[("page", page), ("per_page", per_page)])
            .send()
            .await?;
        let resp = check(resp).await?;
        Ok(resp.json().await?)
    }

    /// `POST /stock-{in|out}` — record a new movement. The server
    /// captures the price snapshot; the created row is returned.
    pub async fn create_movement(
        &self,
        direction: Direction,
        body: &CreateMovement,
    ) -> Result<StockMovementRow> {
        let url = self.url(direction, "");
        let resp = self.http.post(url).json(body).send().await?;
        let resp = check(resp).await?;
        Ok(resp.json().await?)
    }

    /// `PUT /stock-{in|out}/{id}` — full-payload row update.
    pub async fn update_movement(
        &self,
        direction: Direction,
        id: i64,
        body: &UpdateMovement,
    ) -> Result<StockMovementRow> {
        let url = self.url(direction, &format!("/{id}"));
        let resp = self.http.put(url).json(body).send().await?;
        let resp = check(resp).await?;
        Ok(resp.json().await?)
    }

    /// `DELETE /stock-{in|out}/{id}`.
    pub async fn delete_movement(&self, direction: Direction, id: i64) -> Result<()> {
        let url = self.url(direction, &format!("/{id}"));
        let resp = self.http.delete(url).send().await?;
        check(resp).await?;
        Ok(())
    }
}

/// Map non-2xx responses to [`ApiError::Server`] with the server's own
/// message text.
async fn check(resp: Response) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(ApiError::Server {
        status: status.as_u16(),
        message: extract_server_message(status.as_u16(), &body),
    })
}
