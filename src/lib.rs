pub mod application;
pub mod client;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod schema;
pub mod seed;
pub mod state;

use std::error::Error;

use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use config::Config;
pub use db::{create_pool, DbPool};
pub use state::AppState;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) -> Result<(), Box<dyn Error + Send + Sync>> {
    let mut conn = pool.get()?;
    let applied = conn.run_pending_migrations(MIGRATIONS)?;
    for version in applied {
        log::info!("Applied migration {}", version);
    }
    Ok(())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::menu::list_menu_items,
        handlers::menu::get_menu_item,
        handlers::menu::create_menu_item,
        handlers::menu::update_menu_item,
        handlers::menu::delete_menu_item,
        handlers::orders::list_orders,
        handlers::orders::get_order,
        handlers::orders::create_order,
        handlers::orders::update_order_status,
        handlers::orders::delete_order,
    ),
    components(schemas(
        handlers::MessageResponse,
        handlers::menu::CreateMenuItemRequest,
        handlers::menu::UpdateMenuItemRequest,
        handlers::menu::MenuItemResponse,
        handlers::orders::CreateOrderRequest,
        handlers::orders::UpdateOrderStatusRequest,
        handlers::orders::OrderResponse,
        handlers::orders::InsufficientStockResponse,
        domain::order::OrderStatus,
    )),
    tags(
        (name = "menu", description = "Menu items and their stock"),
        (name = "orders", description = "Orders and inventory bookkeeping"),
    )
)]
pub struct ApiDoc;

/// Register the API routes, extractor error handlers and the Swagger UI.
/// Shared by [`build_server`] and the HTTP tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    use handlers::{menu, orders};

    cfg.app_data(web::JsonConfig::default().error_handler(errors::json_error_handler))
        .app_data(web::PathConfig::default().error_handler(errors::path_error_handler))
        .service(
            web::scope("/api/menu")
                .route("", web::get().to(menu::list_menu_items))
                .route("", web::post().to(menu::create_menu_item))
                .route("/{id}", web::get().to(menu::get_menu_item))
                .route("/{id}", web::put().to(menu::update_menu_item))
                .route("/{id}", web::delete().to(menu::delete_menu_item)),
        )
        .service(
            web::scope("/api/orders")
                .route("", web::get().to(orders::list_orders))
                .route("", web::post().to(orders::create_order))
                .route("/{id}", web::get().to(orders::get_order))
                .route("/{id}", web::patch().to(orders::update_order_status))
                .route("/{id}", web::delete().to(orders::delete_order)),
        )
        .service(
            SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
        );
}

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// All workers share the one `state`. The caller is responsible for
/// `.await`-ing (or `tokio::spawn`-ing) the returned server.
pub fn build_server(
    state: AppState,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    let state = web::Data::new(state);
    Ok(HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Logger::default())
            .configure(configure)
    })
    .bind((host.to_string(), port))?
    .run())
}
