use anyhow::Context;
use poloniex::{ExchangeConfig, PoloniexConnector};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Falls back to public-only access when no credentials are configured
    let config = load_config().unwrap_or_else(|e| {
        tracing::info!("No credentials loaded ({}), using public endpoints only", e);
        ExchangeConfig::read_only()
    });
    let authenticated = config.has_credentials();

    let connector = PoloniexConnector::new(config).context("building connector")?;

    let tickers = connector
        .market
        .get_tickers()
        .await
        .context("fetching tickers")?;
    println!("Found {} markets", tickers.len());

    let mut symbols: Vec<_> = tickers.keys().collect();
    symbols.sort();
    for symbol in symbols.into_iter().take(5) {
        let ticker = &tickers[symbol];
        println!(
            "{}: last {} bid {} ask {}",
            symbol, ticker.last, ticker.highest_bid, ticker.lowest_ask
        );
    }

    let book = connector
        .market
        .get_order_book("btc_eth", "both", 5)
        .await
        .context("fetching order book")?;
    println!("BTC_ETH book: {} asks, {} bids", book.asks.len(), book.bids.len());

    if authenticated {
        let balances = connector
            .account
            .get_non_zero_balances()
            .await
            .context("fetching balances")?;
        for (currency, balance) in balances {
            println!(
                "{}: available {} on orders {}",
                currency, balance.available, balance.on_orders
            );
        }
    }

    Ok(())
}

#[cfg(feature = "env-file")]
fn load_config() -> Result<ExchangeConfig, poloniex::core::config::ConfigError> {
    ExchangeConfig::from_env_file("POLONIEX")
}

#[cfg(not(feature = "env-file"))]
fn load_config() -> Result<ExchangeConfig, poloniex::core::config::ConfigError> {
    ExchangeConfig::from_env("POLONIEX")
}
