use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use crate::exchanges::poloniex::conversions;
use crate::exchanges::poloniex::types::{
    Balance, BookSide, CandleStick, Currency, OrderBook, Ticker, Trade, VolumeCollection,
};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::{debug, instrument};

pub const PUBLIC_ENDPOINT: &str = "public";
pub const TRADING_ENDPOINT: &str = "tradingApi";

pub const MIN_BOOK_DEPTH: u32 = 1;
pub const MAX_BOOK_DEPTH: u32 = 100;

/// Candle widths, in seconds, that `returnChartData` accepts
pub const CHART_PERIODS: [u32; 6] = [300, 900, 1800, 7200, 14400, 86400];

/// Clamp a requested order book depth into `[1, 100]`
pub fn clamp_depth(depth: i64) -> u32 {
    depth.clamp(i64::from(MIN_BOOK_DEPTH), i64::from(MAX_BOOK_DEPTH)) as u32
}

/// Poloniex REST API client implementation
#[derive(Debug, Clone)]
pub struct PoloniexRest<R: RestClient> {
    rest_client: R,
}

impl<R: RestClient> PoloniexRest<R> {
    pub fn new(rest_client: R) -> Self {
        Self { rest_client }
    }

    async fn public(&self, command: &str, params: &[(&str, &str)]) -> Result<Vec<u8>, ExchangeError> {
        let mut query = Vec::with_capacity(params.len() + 1);
        query.push(("command", command));
        query.extend_from_slice(params);
        self.rest_client.get(PUBLIC_ENDPOINT, &query).await
    }

    async fn private(
        &self,
        command: &str,
        params: &[(&str, &str)],
    ) -> Result<Vec<u8>, ExchangeError> {
        let mut form = Vec::with_capacity(params.len() + 1);
        form.push(("command", command));
        form.extend_from_slice(params);
        self.rest_client.signed_post(TRADING_ENDPOINT, &form).await
    }

    /// Ticker for every market, keyed by pair
    #[instrument(skip(self), fields(command = "returnTicker"))]
    pub async fn get_tickers(&self) -> Result<HashMap<String, Ticker>, ExchangeError> {
        let raw = self.public("returnTicker", &[]).await?;
        conversions::decode_tickers(&raw)
    }

    #[instrument(skip(self), fields(command = "return24hVolume"))]
    pub async fn get_volumes(&self) -> Result<VolumeCollection, ExchangeError> {
        let raw = self.public("return24hVolume", &[]).await?;
        conversions::decode_volumes(&raw)
    }

    #[instrument(skip(self), fields(command = "returnCurrencies"))]
    pub async fn get_currencies(&self) -> Result<HashMap<String, Currency>, ExchangeError> {
        let raw = self.public("returnCurrencies", &[]).await?;
        conversions::decode_currencies(&raw)
    }

    /// Order book for one market
    ///
    /// `depth` is clamped into `[1, 100]`; `side` trims the decoded book.
    #[instrument(skip(self), fields(command = "returnOrderBook"))]
    pub async fn get_order_book(
        &self,
        market: &str,
        side: BookSide,
        depth: i64,
    ) -> Result<OrderBook, ExchangeError> {
        let effective_depth = clamp_depth(depth);
        if i64::from(effective_depth) != depth {
            debug!(requested = depth, effective = effective_depth, "Clamped order book depth");
        }

        let pair = market.to_uppercase();
        let depth_str = effective_depth.to_string();
        let raw = self
            .public(
                "returnOrderBook",
                &[("currencyPair", pair.as_str()), ("depth", depth_str.as_str())],
            )
            .await?;

        let mut book = conversions::decode_order_book(&raw)?;
        book.retain_side(side);
        Ok(book)
    }

    /// Candlesticks between `start` and `end`
    ///
    /// `period` should be one of [`CHART_PERIODS`]; the exchange rejects others
    /// and that rejection surfaces as an application error.
    #[instrument(skip(self), fields(command = "returnChartData"))]
    pub async fn get_chart_data(
        &self,
        currency_pair: &str,
        period: u32,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<CandleStick>, ExchangeError> {
        if !CHART_PERIODS.contains(&period) {
            debug!(period, "Chart period outside the documented set");
        }

        let pair = currency_pair.to_uppercase();
        let period = period.to_string();
        let start = start.timestamp().to_string();
        let end = end.timestamp().to_string();
        let raw = self
            .public(
                "returnChartData",
                &[
                    ("currencyPair", pair.as_str()),
                    ("period", period.as_str()),
                    ("start", start.as_str()),
                    ("end", end.as_str()),
                ],
            )
            .await?;

        conversions::decode_chart_data(&raw)
    }

    /// Balances for every currency, including amounts held in orders
    #[instrument(skip(self), fields(command = "returnCompleteBalances"))]
    pub async fn get_balances(&self) -> Result<HashMap<String, Balance>, ExchangeError> {
        let raw = self.private("returnCompleteBalances", &[]).await?;
        conversions::decode_balances(&raw)
    }

    /// Own trades across all markets since `since`
    #[instrument(skip(self), fields(command = "returnTradeHistory"))]
    pub async fn get_all_trade_history(
        &self,
        since: DateTime<Utc>,
    ) -> Result<HashMap<String, Vec<Trade>>, ExchangeError> {
        let start = since.timestamp().to_string();
        let raw = self
            .private(
                "returnTradeHistory",
                &[("currencyPair", "all"), ("start", start.as_str())],
            )
            .await?;
        conversions::decode_trade_history(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_clamping() {
        let cases = [(0, 1), (1, 1), (50, 50), (100, 100), (101, 100), (-5, 1), (i64::MAX, 100)];
        for (requested, expected) in cases {
            assert_eq!(clamp_depth(requested), expected, "depth {}", requested);
        }
    }
}
