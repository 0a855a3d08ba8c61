//! Calls against the real exchange. Skipped unless `RUN_LIVE_TESTS=true`;
//! private endpoints additionally need `POLONIEX_API_KEY`/`POLONIEX_SECRET_KEY`.

use chrono::{Duration as ChronoDuration, Utc};
use poloniex::{ExchangeConfig, PoloniexConnector};
use std::env;
use std::time::Duration;
use tokio::time::timeout;

fn should_run_live_tests() -> bool {
    env::var("RUN_LIVE_TESTS").unwrap_or_default() == "true"
}

fn test_timeout() -> Duration {
    let seconds = env::var("TEST_TIMEOUT_SECONDS")
        .unwrap_or_default()
        .parse()
        .unwrap_or(30);
    Duration::from_secs(seconds)
}

fn public_connector() -> PoloniexConnector<poloniex::core::kernel::ReqwestRest> {
    PoloniexConnector::new_with_timeout(ExchangeConfig::read_only(), Duration::from_secs(15))
        .expect("connector")
}

#[cfg(test)]
mod live_tests {
    use super::*;

    #[tokio::test]
    async fn test_live_tickers() {
        if !should_run_live_tests() {
            println!("Skipping live ticker test (RUN_LIVE_TESTS != true)");
            return;
        }

        let connector = public_connector();
        match timeout(test_timeout(), connector.market.get_tickers()).await {
            Ok(Ok(tickers)) => {
                println!("✅ Poloniex: fetched {} tickers", tickers.len());
                assert!(!tickers.is_empty(), "Should have tickers");
            }
            Ok(Err(e)) => println!("⚠️ Poloniex tickers failed: {}", e),
            Err(_) => println!("⚠️ Poloniex tickers timed out"),
        }
    }

    #[tokio::test]
    async fn test_live_order_book() {
        if !should_run_live_tests() {
            return;
        }

        let connector = public_connector();
        match timeout(
            test_timeout(),
            connector.market.get_order_book("BTC_ETH", "both", 5),
        )
        .await
        {
            Ok(Ok(book)) => {
                println!("✅ Poloniex: {} asks / {} bids", book.asks.len(), book.bids.len());
                assert!(book.asks.len() <= 5);
            }
            Ok(Err(e)) => println!("⚠️ Poloniex order book failed: {}", e),
            Err(_) => println!("⚠️ Poloniex order book timed out"),
        }
    }

    #[tokio::test]
    async fn test_live_chart_data() {
        if !should_run_live_tests() {
            return;
        }

        let connector = public_connector();
        let end = Utc::now();
        let start = end - ChronoDuration::days(1);
        match timeout(
            test_timeout(),
            connector.market.get_chart_data("BTC_ETH", 7200, start, end),
        )
        .await
        {
            Ok(Ok(candles)) => println!("✅ Poloniex: {} candles", candles.len()),
            Ok(Err(e)) => println!("⚠️ Poloniex chart data failed: {}", e),
            Err(_) => println!("⚠️ Poloniex chart data timed out"),
        }
    }

    #[tokio::test]
    async fn test_live_balances() {
        if !should_run_live_tests() {
            return;
        }
        let Ok(config) = ExchangeConfig::from_env("POLONIEX") else {
            println!("Skipping live balance test (no credentials)");
            return;
        };

        let connector = PoloniexConnector::new(config).expect("connector");
        match timeout(test_timeout(), connector.account.get_balances()).await {
            Ok(Ok(balances)) => println!("✅ Poloniex: {} balances", balances.len()),
            Ok(Err(e)) => println!("⚠️ Poloniex balances failed: {}", e),
            Err(_) => println!("⚠️ Poloniex balances timed out"),
        }
    }
}
