use std::process;

use dotenvy::dotenv;
use restaurant_service::{build_server, create_pool, run_migrations, AppState, Config};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env().unwrap_or_else(|e| {
        log::error!("Invalid configuration: {}", e);
        process::exit(1);
    });

    let pool = create_pool(&config.database_url, config.pool_size).unwrap_or_else(|e| {
        log::error!("Failed to connect to the database: {}", e);
        process::exit(1);
    });
    if let Err(e) = run_migrations(&pool) {
        log::error!("Failed to run database migrations: {}", e);
        process::exit(1);
    }

    log::info!("Starting server at http://{}:{}", config.host, config.port);

    build_server(AppState::postgres(pool), &config.host, config.port)?.await
}
