use crate::core::config::ExchangeConfig;
use crate::core::errors::ExchangeError;
use crate::core::kernel::{ReqwestRest, RestClient};
use crate::exchanges::poloniex::builder::PoloniexBuilder;
use std::time::Duration;

pub mod account;
pub mod market_data;

pub use account::Account;
pub use market_data::MarketData;

/// Poloniex connector that composes the public and private facets
///
/// Both facets share one transport, so the nonce sequence of private calls is
/// shared too.
#[derive(Debug)]
pub struct PoloniexConnector<R: RestClient> {
    pub market: MarketData<R>,
    pub account: Account<R>,
}

impl<R: RestClient + Clone> PoloniexConnector<R> {
    /// Wrap an already configured transport
    pub fn from_rest(rest: R) -> Self {
        Self {
            market: MarketData::new(&rest),
            account: Account::new(&rest),
        }
    }
}

impl PoloniexConnector<ReqwestRest> {
    /// Connector with the default request timeout
    pub fn new(config: ExchangeConfig) -> Result<Self, ExchangeError> {
        PoloniexBuilder::new().with_config(config).build()
    }

    /// Connector whose requests give up after `timeout`
    pub fn new_with_timeout(
        config: ExchangeConfig,
        timeout: Duration,
    ) -> Result<Self, ExchangeError> {
        PoloniexBuilder::new()
            .with_config(config)
            .with_timeout(timeout)
            .build()
    }
}
