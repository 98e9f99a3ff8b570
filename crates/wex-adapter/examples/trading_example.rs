/*
[INPUT]:  API key/secret from the environment and order parameters
[OUTPUT]: Account info, open orders, order placement result
[POS]:    Examples - trading operations
[UPDATE]: When trading API changes
*/

use rust_decimal::Decimal;
use std::str::FromStr;
use wex_adapter::*;

/// Example: Trading operations (requires API key + HMAC-SHA512 body signature)
///
/// Reads WEX_API_KEY / WEX_API_SECRET. Places an order only when
/// WEX_PLACE_ORDER=1 is set.
#[tokio::main]
async fn main() {
    println!("=== WEX Trading Example ===\n");

    let (Ok(api_key), Ok(secret)) = (
        std::env::var("WEX_API_KEY"),
        std::env::var("WEX_API_SECRET"),
    ) else {
        eprintln!("Set WEX_API_KEY and WEX_API_SECRET to run this example");
        return;
    };

    let client = match WexClient::new() {
        Ok(c) => c.with_credentials(Credentials::new(api_key, secret)),
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };
    println!("✓ HTTP client created");

    match client.get_info().await {
        Ok(info) => println!("✓ Balances: {:?}", info.funds),
        Err(e) if e.is_auth_error() => {
            println!("✗ Credentials rejected: {}", e);
            return;
        }
        Err(e) => println!("✗ Error: {}", e),
    }

    match client.active_orders(Some("btc_usd")).await {
        Ok(orders) => println!("✓ {} open btc_usd orders", orders.len()),
        Err(e) => println!("✗ Error: {}", e),
    }

    if std::env::var("WEX_PLACE_ORDER").as_deref() != Ok("1") {
        println!("\nSkipping order placement (set WEX_PLACE_ORDER=1)");
        return;
    }

    let rate = Decimal::from_str("100").unwrap_or_default();
    let amount = Decimal::from_str("0.01").unwrap_or_default();
    match client.trade("btc_usd", Side::Buy, rate, amount).await {
        Ok(result) => {
            println!("✓ Order {} placed, remains {}", result.order_id, result.remains);
            if !result.is_filled() {
                match client.cancel_order(result.order_id).await {
                    Ok(cancelled) => println!("✓ Order {} cancelled", cancelled.order_id),
                    Err(e) => println!("✗ Cancel failed: {}", e),
                }
            }
        }
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\n✓ Trading example complete");
}
