use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use crate::exchanges::poloniex::rest::PoloniexRest;
use crate::exchanges::poloniex::types::{Balance, Trade};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Signed account endpoints
#[derive(Debug)]
pub struct Account<R: RestClient> {
    rest: PoloniexRest<R>,
}

impl<R: RestClient + Clone> Account<R> {
    pub fn new(rest: &R) -> Self {
        Self {
            rest: PoloniexRest::new(rest.clone()),
        }
    }
}

impl<R: RestClient> Account<R> {
    pub async fn get_balances(&self) -> Result<HashMap<String, Balance>, ExchangeError> {
        self.rest.get_balances().await
    }

    /// Balances whose available plus on-order amount is non-zero
    pub async fn get_non_zero_balances(&self) -> Result<HashMap<String, Balance>, ExchangeError> {
        let mut non_zero = HashMap::new();
        for (currency, balance) in self.rest.get_balances().await? {
            if !balance.is_empty()? {
                non_zero.insert(currency, balance);
            }
        }
        Ok(non_zero)
    }

    pub async fn get_all_trade_history(
        &self,
        since: DateTime<Utc>,
    ) -> Result<HashMap<String, Vec<Trade>>, ExchangeError> {
        self.rest.get_all_trade_history(since).await
    }
}
