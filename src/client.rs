//! Typed HTTP client for the REST API.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::order::OrderStatus;
use crate::handlers::menu::{CreateMenuItemRequest, MenuItemResponse};
use crate::handlers::orders::{CreateOrderRequest, OrderResponse, UpdateOrderStatusRequest};
use crate::handlers::MessageResponse;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server answered {status}: {message}")]
    Api {
        status: u16,
        message: String,
        /// Present when an order was rejected for lack of stock.
        available: Option<i32>,
    },
}

pub struct RestaurantClient {
    http: reqwest::Client,
    base_url: String,
}

impl RestaurantClient {
    /// `base_url` is the API root, e.g. `http://localhost:8080/api`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn list_menu(&self) -> Result<Vec<MenuItemResponse>, ClientError> {
        decode(self.http.get(self.url("/menu")).send().await?).await
    }

    pub async fn get_menu_item(&self, id: i32) -> Result<MenuItemResponse, ClientError> {
        decode(self.http.get(self.url(&format!("/menu/{id}"))).send().await?).await
    }

    pub async fn create_menu_item(
        &self,
        item: &CreateMenuItemRequest,
    ) -> Result<MenuItemResponse, ClientError> {
        self.post("/menu", item).await
    }

    pub async fn delete_menu_item(&self, id: i32) -> Result<MessageResponse, ClientError> {
        decode(self.http.delete(self.url(&format!("/menu/{id}"))).send().await?).await
    }

    pub async fn list_orders(&self) -> Result<Vec<OrderResponse>, ClientError> {
        decode(self.http.get(self.url("/orders")).send().await?).await
    }

    pub async fn place_order(&self, order: &CreateOrderRequest) -> Result<OrderResponse, ClientError> {
        self.post("/orders", order).await
    }

    pub async fn update_order_status(
        &self,
        id: Uuid,
        status: OrderStatus,
    ) -> Result<OrderResponse, ClientError> {
        let resp = self
            .http
            .patch(self.url(&format!("/orders/{id}")))
            .json(&UpdateOrderStatusRequest { status })
            .send()
            .await?;
        decode(resp).await
    }

    pub async fn delete_order(&self, id: Uuid) -> Result<MessageResponse, ClientError> {
        decode(self.http.delete(self.url(&format!("/orders/{id}"))).send().await?).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        decode(self.http.post(self.url(path)).json(body).send().await?).await
    }
}

async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp.json().await?);
    }
    let body: Value = resp.json().await.unwrap_or_default();
    Err(ClientError::Api {
        status: status.as_u16(),
        message: body["message"]
            .as_str()
            .unwrap_or("unexpected response")
            .to_string(),
        available: body["available"].as_i64().and_then(|a| i32::try_from(a).ok()),
    })
}
