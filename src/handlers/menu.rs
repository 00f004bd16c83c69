use actix_web::{web, HttpResponse};
use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{run_blocking, MessageResponse};
use crate::domain::errors::DomainError;
use crate::domain::menu_item::{MenuItem, MenuItemChanges, NewMenuItem};
use crate::errors::AppError;
use crate::state::AppState;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMenuItemRequest {
    pub id: i32,
    pub item_name: String,
    pub available_quantity: i32,
    pub price: f64,
}

/// Every field is optional; omitted fields keep their stored value.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMenuItemRequest {
    pub item_name: Option<String>,
    pub available_quantity: Option<i32>,
    pub price: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemResponse {
    pub id: i32,
    pub item_name: String,
    pub available_quantity: i32,
    pub price: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<MenuItem> for MenuItemResponse {
    fn from(item: MenuItem) -> Self {
        MenuItemResponse {
            id: item.id,
            item_name: item.item_name,
            available_quantity: item.available_quantity,
            price: item.price.to_string().parse().unwrap_or_default(),
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

/// Prices are kept to the cent.
fn parse_price(price: f64) -> Result<BigDecimal, DomainError> {
    if !price.is_finite() {
        return Err(DomainError::invalid(format!("price `{price}` is not a number")));
    }
    BigDecimal::from_str(&format!("{price:.2}"))
        .map_err(|e| DomainError::invalid(format!("price `{price}` is not a number: {e}")))
}

impl TryFrom<CreateMenuItemRequest> for NewMenuItem {
    type Error = DomainError;

    fn try_from(req: CreateMenuItemRequest) -> Result<Self, Self::Error> {
        Ok(NewMenuItem {
            id: req.id,
            item_name: req.item_name,
            available_quantity: req.available_quantity,
            price: parse_price(req.price)?,
        })
    }
}

impl TryFrom<UpdateMenuItemRequest> for MenuItemChanges {
    type Error = DomainError;

    fn try_from(req: UpdateMenuItemRequest) -> Result<Self, Self::Error> {
        Ok(MenuItemChanges {
            item_name: req.item_name,
            available_quantity: req.available_quantity,
            price: req.price.map(parse_price).transpose()?,
        })
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET /api/menu
///
/// Returns every menu item, ordered by id.
#[utoipa::path(
    get,
    path = "/api/menu",
    responses(
        (status = 200, description = "All menu items", body = [MenuItemResponse]),
        (status = 500, description = "Internal server error", body = MessageResponse),
    ),
    tag = "menu"
)]
pub async fn list_menu_items(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let items = run_blocking(move || state.menu.list_items()).await?;
    let body: Vec<MenuItemResponse> = items.into_iter().map(MenuItemResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /api/menu/{id}
#[utoipa::path(
    get,
    path = "/api/menu/{id}",
    params(("id" = i32, Path, description = "Menu item id")),
    responses(
        (status = 200, description = "Menu item found", body = MenuItemResponse),
        (status = 404, description = "Menu item not found", body = MessageResponse),
    ),
    tag = "menu"
)]
pub async fn get_menu_item(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let item = run_blocking(move || state.menu.get_item(id)).await?;
    Ok(HttpResponse::Ok().json(MenuItemResponse::from(item)))
}

/// POST /api/menu
#[utoipa::path(
    post,
    path = "/api/menu",
    request_body = CreateMenuItemRequest,
    responses(
        (status = 201, description = "Menu item created", body = MenuItemResponse),
        (status = 400, description = "Validation failure or duplicate id", body = MessageResponse),
    ),
    tag = "menu"
)]
pub async fn create_menu_item(
    state: web::Data<AppState>,
    body: web::Json<CreateMenuItemRequest>,
) -> Result<HttpResponse, AppError> {
    let item = NewMenuItem::try_from(body.into_inner())?;
    let created = run_blocking(move || state.menu.create_item(item)).await?;
    Ok(HttpResponse::Created().json(MenuItemResponse::from(created)))
}

/// PUT /api/menu/{id}
///
/// Applies the provided fields; the id itself cannot be changed.
#[utoipa::path(
    put,
    path = "/api/menu/{id}",
    params(("id" = i32, Path, description = "Menu item id")),
    request_body = UpdateMenuItemRequest,
    responses(
        (status = 200, description = "Menu item updated", body = MenuItemResponse),
        (status = 400, description = "Validation failure", body = MessageResponse),
        (status = 404, description = "Menu item not found", body = MessageResponse),
    ),
    tag = "menu"
)]
pub async fn update_menu_item(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<UpdateMenuItemRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let changes = MenuItemChanges::try_from(body.into_inner())?;
    let updated = run_blocking(move || state.menu.update_item(id, changes)).await?;
    Ok(HttpResponse::Ok().json(MenuItemResponse::from(updated)))
}

/// DELETE /api/menu/{id}
#[utoipa::path(
    delete,
    path = "/api/menu/{id}",
    params(("id" = i32, Path, description = "Menu item id")),
    responses(
        (status = 200, description = "Menu item deleted", body = MessageResponse),
        (status = 404, description = "Menu item not found", body = MessageResponse),
    ),
    tag = "menu"
)]
pub async fn delete_menu_item(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    run_blocking(move || state.menu.delete_item(id)).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Menu item deleted")))
}
