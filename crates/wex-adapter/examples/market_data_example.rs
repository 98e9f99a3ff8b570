/*
[INPUT]:  Pair identifiers (e.g., "btc_usd")
[OUTPUT]: Market data (pair info, ticker, depth, trades)
[POS]:    Examples - public market data queries
[UPDATE]: When adding new market data endpoints
*/

use wex_adapter::*;

/// Example: Query market data (no authentication required)
#[tokio::main]
async fn main() {
    println!("=== WEX Market Data Example ===\n");

    let client = match WexClient::new() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };
    println!("✓ HTTP client created (no auth required for public endpoints)\n");

    let pairs = ["btc_usd", "eth_usd"];

    println!("Querying exchange info...");
    match client.info().await {
        Ok(info) => println!("✓ {} pairs listed", info.pairs.len()),
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\nQuerying tickers for {:?}...", pairs);
    match client.ticker(&pairs, true).await {
        Ok(tickers) => {
            for (pair, ticker) in tickers {
                println!("✓ {pair}: last {} (buy {}, sell {})", ticker.last, ticker.buy, ticker.sell);
            }
        }
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\nQuerying depth for btc_usd...");
    match client.depth(&["btc_usd"], Some(5), false).await {
        Ok(depth) => println!("✓ Depth: {:?}", depth.get("btc_usd")),
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\nQuerying recent trades for btc_usd...");
    match client.trades(&["btc_usd"], Some(10), false).await {
        Ok(trades) => println!(
            "✓ {} trades",
            trades.get("btc_usd").map(Vec::len).unwrap_or_default()
        ),
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\n✓ Market data example complete");
}
