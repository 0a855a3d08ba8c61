//! Typed async client for the Poloniex HTTP API
//!
//! Public market data (tickers, order books, candlesticks, volumes,
//! currencies) goes out as plain GET requests; account endpoints (balances,
//! trade history) are POSTed as HMAC-SHA512 signed forms.

pub mod core;
pub mod exchanges;

pub use crate::core::{config::ExchangeConfig, errors::ExchangeError};
pub use crate::exchanges::poloniex::{PoloniexBuilder, PoloniexConnector};
