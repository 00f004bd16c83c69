use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{run_blocking, MessageResponse};
use crate::domain::order::{NewOrder, Order, OrderStatus};
use crate::errors::AppError;
use crate::state::AppState;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub item_id: i32,
    pub quantity: i32,
    pub customer_name: String,
    /// Defaults to `pending`.
    #[serde(default)]
    pub status: OrderStatus,
}

impl From<CreateOrderRequest> for NewOrder {
    fn from(req: CreateOrderRequest) -> Self {
        NewOrder {
            item_id: req.item_id,
            quantity: req.quantity,
            customer_name: req.customer_name,
            status: req.status,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: Uuid,
    pub item_id: i32,
    pub quantity: i32,
    pub customer_name: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        OrderResponse {
            id: order.id,
            item_id: order.item_id,
            quantity: order.quantity,
            customer_name: order.customer_name,
            status: order.status,
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

/// Body of the 400 returned when an order asks for more than is in stock.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct InsufficientStockResponse {
    pub message: String,
    pub available: i32,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET /api/orders
///
/// Returns every order, oldest first.
#[utoipa::path(
    get,
    path = "/api/orders",
    responses(
        (status = 200, description = "All orders", body = [OrderResponse]),
        (status = 500, description = "Internal server error", body = MessageResponse),
    ),
    tag = "orders"
)]
pub async fn list_orders(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let orders = run_blocking(move || state.orders.list_orders()).await?;
    let body: Vec<OrderResponse> = orders.into_iter().map(OrderResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /api/orders/{id}
#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    params(("id" = Uuid, Path, description = "Order UUID")),
    responses(
        (status = 200, description = "Order found", body = OrderResponse),
        (status = 404, description = "Order not found", body = MessageResponse),
    ),
    tag = "orders"
)]
pub async fn get_order(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let order = run_blocking(move || state.orders.get_order(id)).await?;
    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}

/// POST /api/orders
///
/// Places an order and takes its quantity out of the menu item's stock.
#[utoipa::path(
    post,
    path = "/api/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created", body = OrderResponse),
        (status = 400, description = "Validation failure or not enough stock", body = InsufficientStockResponse),
        (status = 404, description = "Menu item not found", body = MessageResponse),
    ),
    tag = "orders"
)]
pub async fn create_order(
    state: web::Data<AppState>,
    body: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let order = NewOrder::from(body.into_inner());
    let created = run_blocking(move || state.orders.create_order(order)).await?;
    Ok(HttpResponse::Created().json(OrderResponse::from(created)))
}

/// PATCH /api/orders/{id}
///
/// Changes the order status only; stock is not touched.
#[utoipa::path(
    patch,
    path = "/api/orders/{id}",
    params(("id" = Uuid, Path, description = "Order UUID")),
    request_body = UpdateOrderStatusRequest,
    responses(
        (status = 200, description = "Order updated", body = OrderResponse),
        (status = 400, description = "Unknown status", body = MessageResponse),
        (status = 404, description = "Order not found", body = MessageResponse),
    ),
    tag = "orders"
)]
pub async fn update_order_status(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateOrderStatusRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let status = body.into_inner().status;
    let updated = run_blocking(move || state.orders.update_status(id, status)).await?;
    Ok(HttpResponse::Ok().json(OrderResponse::from(updated)))
}

/// DELETE /api/orders/{id}
///
/// Deletes the order and puts its quantity back on the menu item, if the
/// item still exists.
#[utoipa::path(
    delete,
    path = "/api/orders/{id}",
    params(("id" = Uuid, Path, description = "Order UUID")),
    responses(
        (status = 200, description = "Order deleted and inventory restored", body = MessageResponse),
        (status = 404, description = "Order not found", body = MessageResponse),
    ),
    tag = "orders"
)]
pub async fn delete_order(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    run_blocking(move || state.orders.delete_order(id)).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new(
        "Order deleted and inventory restored",
    )))
}
