use std::process;

use dotenvy::dotenv;
use restaurant_service::infrastructure::{DieselMenuItemRepository, DieselOrderRepository};
use restaurant_service::seed::seed_database;
use restaurant_service::{create_pool, run_migrations, Config};

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
    if let Err(e) = run_migrations(&pool) {
        log::error!("Failed to run database migrations: {}", e);
        process::exit(1);
    }

    let menu = DieselMenuItemRepository::new(pool.clone());
    let orders = DieselOrderRepository::new(pool);
    match seed_database(&menu, &orders) {
        Ok(report) => {
            log::info!("Inserted {} menu items", report.menu_items);
            log::info!("Inserted {} orders", report.orders);
            log::info!("Database seeded successfully");
        }
        Err(e) => {
            log::error!("Error seeding database: {}", e);
            process::exit(1);
        }
    }
}
