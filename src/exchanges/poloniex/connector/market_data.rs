use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use crate::exchanges::poloniex::rest::PoloniexRest;
use crate::exchanges::poloniex::types::{
    BookSide, CandleStick, Currency, OrderBook, Ticker, VolumeCollection,
};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Public market data; no credentials needed
#[derive(Debug)]
pub struct MarketData<R: RestClient> {
    rest: PoloniexRest<R>,
}

impl<R: RestClient + Clone> MarketData<R> {
    pub fn new(rest: &R) -> Self {
        Self {
            rest: PoloniexRest::new(rest.clone()),
        }
    }
}

impl<R: RestClient> MarketData<R> {
    pub async fn get_tickers(&self) -> Result<HashMap<String, Ticker>, ExchangeError> {
        self.rest.get_tickers().await
    }

    pub async fn get_ticker(&self, market: &str) -> Result<Option<Ticker>, ExchangeError> {
        let mut tickers = self.rest.get_tickers().await?;
        Ok(tickers.remove(&market.to_uppercase()))
    }

    pub async fn get_volumes(&self) -> Result<VolumeCollection, ExchangeError> {
        self.rest.get_volumes().await
    }

    pub async fn get_currencies(&self) -> Result<HashMap<String, Currency>, ExchangeError> {
        self.rest.get_currencies().await
    }

    /// `side` accepts `bid`, `ask` or `both`; anything else means `both`
    ///
    /// The exchange always returns both sides; the side is applied client-side
    /// by emptying the other one.
    pub async fn get_order_book(
        &self,
        market: &str,
        side: &str,
        depth: i64,
    ) -> Result<OrderBook, ExchangeError> {
        self.rest
            .get_order_book(market, BookSide::from_selector(side), depth)
            .await
    }

    pub async fn get_chart_data(
        &self,
        currency_pair: &str,
        period: u32,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<CandleStick>, ExchangeError> {
        self.rest
            .get_chart_data(currency_pair, period, start, end)
            .await
    }
}
