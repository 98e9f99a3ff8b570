/*
[INPUT]:  CLI arguments, YAML configuration file, WEX_API_KEY / WEX_API_SECRET
[OUTPUT]: Pretty-printed JSON results of WEX API calls
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags, subcommands, or startup flow
*/

mod config;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use wex_adapter::{HistoryQuery, Side, SortOrder, WexClient};

use config::CliConfig;

#[derive(Parser, Debug)]
#[command(name = "wex", version, about = "WEX exchange API client")]
struct Cli {
    #[arg(long = "config", value_name = "PATH")]
    config_path: Option<PathBuf>,
    #[arg(long = "api-key", env = "WEX_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
    #[arg(long = "api-secret", env = "WEX_API_SECRET", hide_env_values = true)]
    api_secret: Option<String>,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "warn")]
    log_level: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Pair list with precision and limits
    Info,
    /// 24h statistics for one or more pairs
    Ticker {
        #[arg(required = true)]
        pairs: Vec<String>,
        #[arg(long)]
        ignore_invalid: bool,
    },
    /// Order book for one or more pairs
    Depth {
        #[arg(required = true)]
        pairs: Vec<String>,
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        ignore_invalid: bool,
    },
    /// Recent public trades for one or more pairs
    Trades {
        #[arg(required = true)]
        pairs: Vec<String>,
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        ignore_invalid: bool,
    },
    /// Balances and key privileges
    Account,
    /// Open orders
    Orders {
        #[arg(long)]
        pair: Option<String>,
    },
    /// Details of one order
    OrderInfo { order_id: u64 },
    /// Place a limit buy order
    Buy {
        pair: String,
        rate: Decimal,
        amount: Decimal,
    },
    /// Place a limit sell order
    Sell {
        pair: String,
        rate: Decimal,
        amount: Decimal,
    },
    /// Cancel an open order
    Cancel { order_id: u64 },
    /// Own trade history
    History {
        #[arg(long)]
        pair: Option<String>,
        #[arg(long)]
        count: Option<u32>,
        #[arg(long)]
        ascending: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(&args.log_level)?;

    let config = match &args.config_path {
        Some(path) => CliConfig::from_file(path).context("load config")?,
        None => CliConfig::default(),
    }
    .merge_overrides(args.api_key.clone(), args.api_secret.clone());

    debug!(
        public_url = %config.public_url,
        trade_url = %config.trade_url,
        authenticated = config.credentials().is_some(),
        "configuration loaded"
    );

    let client = config.build_client()?;
    run(&client, args.command).await
}

async fn run(client: &WexClient, command: Command) -> Result<()> {
    match command {
        Command::Info => print_json(&client.info().await?),
        Command::Ticker {
            pairs,
            ignore_invalid,
        } => print_json(&client.ticker(&as_strs(&pairs), ignore_invalid).await?),
        Command::Depth {
            pairs,
            limit,
            ignore_invalid,
        } => print_json(&client.depth(&as_strs(&pairs), limit, ignore_invalid).await?),
        Command::Trades {
            pairs,
            limit,
            ignore_invalid,
        } => print_json(&client.trades(&as_strs(&pairs), limit, ignore_invalid).await?),
        Command::Account => print_json(&client.get_info().await?),
        Command::Orders { pair } => print_json(&client.active_orders(pair.as_deref()).await?),
        Command::OrderInfo { order_id } => print_json(&client.order_info(order_id).await?),
        Command::Buy { pair, rate, amount } => {
            place(client, &pair, Side::Buy, rate, amount).await
        }
        Command::Sell { pair, rate, amount } => {
            place(client, &pair, Side::Sell, rate, amount).await
        }
        Command::Cancel { order_id } => print_json(&client.cancel_order(order_id).await?),
        Command::History {
            pair,
            count,
            ascending,
        } => {
            let mut query = HistoryQuery::new();
            if let Some(count) = count {
                query = query.count(count);
            }
            if ascending {
                query = query.order(SortOrder::Asc);
            }
            print_json(&client.trade_history(&query, pair.as_deref()).await?)
        }
    }
}

async fn place(
    client: &WexClient,
    pair: &str,
    side: Side,
    rate: Decimal,
    amount: Decimal,
) -> Result<()> {
    info!(pair, side = %side, %rate, %amount, "placing order");
    let result = client.trade(pair, side, rate, amount).await?;
    print_json(&result)
}

fn as_strs(values: &[String]) -> Vec<&str> {
    values.iter().map(String::as_str).collect()
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("render json")?;
    println!("{rendered}");
    Ok(())
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}
