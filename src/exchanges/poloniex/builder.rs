use crate::core::config::ExchangeConfig;
use crate::core::errors::ExchangeError;
use crate::core::kernel::{ReqwestRest, RestClientBuilder, RestClientConfig};
use crate::exchanges::poloniex::{connector::PoloniexConnector, signer::PoloniexSigner};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Builder for creating Poloniex connectors
///
/// Without credentials the connector serves public endpoints only; private
/// calls then fail with `ExchangeError::AuthenticationRequired`.
pub struct PoloniexBuilder {
    config: ExchangeConfig,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl Default for PoloniexBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PoloniexBuilder {
    pub fn new() -> Self {
        Self {
            config: ExchangeConfig::read_only(),
            timeout: None,
            user_agent: None,
        }
    }

    /// Set the exchange configuration
    pub fn with_config(mut self, config: ExchangeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set API credentials, keeping any base URL or timeout already set
    pub fn with_credentials(mut self, api_key: String, secret_key: String) -> Self {
        let mut config = ExchangeConfig::new(api_key, secret_key);
        config.base_url = self.config.base_url.take();
        config.timeout = self.config.timeout;
        self.config = config;
        self
    }

    /// Point the connector at another deployment, e.g. a sandbox
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.config.base_url = Some(base_url);
        self
    }

    /// Per-request timeout; overrides the one in the config
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = Some(user_agent);
        self
    }

    pub fn build(self) -> Result<PoloniexConnector<ReqwestRest>, ExchangeError> {
        let timeout = self
            .timeout
            .unwrap_or_else(|| self.config.resolved_timeout());

        let mut rest_config =
            RestClientConfig::new(self.config.resolved_base_url(), "poloniex".to_string())
                .with_timeout(timeout);
        if let Some(user_agent) = self.user_agent {
            rest_config = rest_config.with_user_agent(user_agent);
        }

        let mut rest_builder = RestClientBuilder::new(rest_config);

        if self.config.has_credentials() {
            let signer = Arc::new(PoloniexSigner::new(
                self.config.api_key().to_string(),
                self.config.secret_key().to_string(),
            ));
            rest_builder = rest_builder.with_signer(signer);
        }

        let rest = rest_builder.build()?;
        debug!(
            base_url = %rest.config().base_url,
            timeout_ms = timeout.as_millis() as u64,
            authenticated = rest.has_signer(),
            "Built Poloniex connector"
        );

        Ok(PoloniexConnector::from_rest(rest))
    }
}

/// Create a Poloniex connector from a configuration
pub fn build_connector(
    config: ExchangeConfig,
) -> Result<PoloniexConnector<ReqwestRest>, ExchangeError> {
    PoloniexBuilder::new().with_config(config).build()
}
