use std::process;

use dotenvy::dotenv;
use restaurant_service::infrastructure::DieselOrderRepository;
use restaurant_service::seed::clear_orders;
use restaurant_service::{create_pool, Config};

fn main() {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env().unwrap_or_else(|e| {
        log::error!("Invalid configuration: {}", e);
        process::exit(1);
    });
    let pool = create_pool(&config.database_url, 1).unwrap_or_else(|e| {
        log::error!("Failed to connect to the database: {}", e);
        process::exit(1);
    });

    match clear_orders(&DieselOrderRepository::new(pool)) {
        Ok(removed) => log::info!("Deleted {} orders", removed),
        Err(e) => {
            log::error!("Error clearing orders: {}", e);
            process::exit(1);
        }
    }
}
