//! Scripted console walk-through of the ordering API.

use std::env;
use std::io::{self, BufRead, Write};
use std::time::Duration;

use dotenvy::dotenv;
use restaurant_service::client::{ClientError, RestaurantClient};
use restaurant_service::domain::order::OrderStatus;
use restaurant_service::handlers::orders::CreateOrderRequest;

fn prompt(label: &str) -> io::Result<String> {
    print!("{label} ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn read_order_details() -> io::Result<(String, String, String)> {
    Ok((
        prompt("Enter the item ID you want to order:")?,
        prompt("Enter the quantity you want to order:")?,
        prompt("Enter your name:")?,
    ))
}

async fn show_menu(client: &RestaurantClient) -> Result<(), ClientError> {
    println!("Today's Menu:");
    for item in client.list_menu().await? {
        println!(
            "ID: {} | Name: {} | Available: {} | Price: ${:.2}",
            item.id, item.item_name, item.available_quantity, item.price
        );
    }
    Ok(())
}

async fn show_quantities(client: &RestaurantClient) -> Result<(), ClientError> {
    println!("Updated Menu Quantities:");
    for item in client.list_menu().await? {
        println!(
            "ID: {} | Name: {} | Available: {}",
            item.id, item.item_name, item.available_quantity
        );
    }
    Ok(())
}

async fn show_orders(client: &RestaurantClient) -> Result<(), ClientError> {
    println!("List of Orders:");
    for order in client.list_orders().await? {
        println!(
            "Customer: {} | Item ID: {} | Quantity: {} | Status: {}",
            order.customer_name, order.item_id, order.quantity, order.status
        );
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("warn"));

    let base_url = env::var("API_URL").unwrap_or_else(|_| "http://localhost:8080/api".to_string());
    let client = RestaurantClient::new(base_url);

    println!("Welcome to our Restaurant!");
    if let Err(e) = show_menu(&client).await {
        eprintln!("Error fetching menu: {e}");
        return;
    }

    let (item_id, quantity, customer_name) = match read_order_details() {
        Ok(answers) => answers,
        Err(e) => {
            eprintln!("Could not read input: {e}");
            return;
        }
    };
    let (Ok(item_id), Ok(quantity)) = (item_id.parse::<i32>(), quantity.parse::<i32>()) else {
        eprintln!("Item ID and quantity must be whole numbers.");
        return;
    };

    println!("Placing your order...");
    let order = CreateOrderRequest {
        item_id,
        quantity,
        customer_name,
        status: OrderStatus::Pending,
    };
    match client.place_order(&order).await {
        Ok(_) => println!("Order placed successfully!"),
        Err(ClientError::Api {
            available: Some(available),
            ..
        }) => {
            eprintln!("Failed to place order: only {available} left.");
            return;
        }
        Err(e) => {
            eprintln!("Failed to place order: {e}");
            return;
        }
    }

    tokio::time::sleep(Duration::from_secs(5)).await;
    println!("Order is ready! Thank you for shopping with us!");

    if let Err(e) = show_quantities(&client).await {
        eprintln!("Error checking available quantities: {e}");
    }
    if let Err(e) = show_orders(&client).await {
        eprintln!("Error fetching orders: {e}");
    }
}
