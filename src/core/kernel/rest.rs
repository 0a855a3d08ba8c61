use crate::core::errors::ExchangeError;
use crate::core::kernel::signer::Signer;
use async_trait::async_trait;
use reqwest::{Client, Response};
use std::sync::Arc;
use std::time::Duration;
use tracing::{instrument, trace, warn};

/// REST client trait for making HTTP requests
///
/// The transport only moves bytes: it never parses JSON. A 2xx response
/// yields the raw body; anything else becomes `ExchangeError::Transport`.
#[async_trait]
pub trait RestClient: Send + Sync {
    /// Make an unauthenticated GET request
    ///
    /// # Arguments
    /// * `endpoint` - Path relative to the base URL
    /// * `query_params` - Query parameters as key-value pairs, sent in order
    async fn get(
        &self,
        endpoint: &str,
        query_params: &[(&str, &str)],
    ) -> Result<Vec<u8>, ExchangeError>;

    /// Make a signed form POST request
    ///
    /// # Arguments
    /// * `endpoint` - Path relative to the base URL
    /// * `form_params` - Form fields handed to the signer, in order
    async fn signed_post(
        &self,
        endpoint: &str,
        form_params: &[(&str, &str)],
    ) -> Result<Vec<u8>, ExchangeError>;
}

/// Configuration for the REST client
#[derive(Clone, Debug)]
pub struct RestClientConfig {
    /// Base URL for the API, ending with a slash
    pub base_url: String,
    /// Exchange name for logging and tracing
    pub exchange_name: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// User agent string to include in requests
    pub user_agent: String,
}

impl RestClientConfig {
    pub fn new(base_url: String, exchange_name: String) -> Self {
        Self {
            base_url,
            exchange_name,
            timeout: crate::core::config::DEFAULT_TIMEOUT,
            user_agent: concat!("poloniex-rs/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string
    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }
}

/// Builder for creating REST client instances
pub struct RestClientBuilder {
    config: RestClientConfig,
    signer: Option<Arc<dyn Signer>>,
}

impl RestClientBuilder {
    pub fn new(config: RestClientConfig) -> Self {
        Self {
            config,
            signer: None,
        }
    }

    /// Set the signer for authenticated requests
    pub fn with_signer(mut self, signer: Arc<dyn Signer>) -> Self {
        self.signer = Some(signer);
        self
    }

    pub fn build(self) -> Result<ReqwestRest, ExchangeError> {
        let client = Client::builder()
            .timeout(self.config.timeout)
            .user_agent(&self.config.user_agent)
            .build()
            .map_err(|e| {
                crate::core::config::ConfigError::InvalidConfiguration(format!(
                    "Failed to build HTTP client: {}",
                    e
                ))
            })?;

        Ok(ReqwestRest {
            client,
            config: self.config,
            signer: self.signer,
        })
    }
}

/// Implementation of `RestClient` using reqwest
#[derive(Clone)]
pub struct ReqwestRest {
    client: Client,
    config: RestClientConfig,
    signer: Option<Arc<dyn Signer>>,
}

impl std::fmt::Debug for ReqwestRest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestRest")
            .field("config", &self.config)
            .field("has_signer", &self.signer.is_some())
            .finish_non_exhaustive()
    }
}

impl ReqwestRest {
    pub fn config(&self) -> &RestClientConfig {
        &self.config
    }

    pub fn has_signer(&self) -> bool {
        self.signer.is_some()
    }

    fn build_url(&self, endpoint: &str) -> String {
        format!(
            "{}{}",
            self.config.base_url,
            endpoint.trim_start_matches('/')
        )
    }

    #[instrument(skip(self, response), fields(exchange = %self.config.exchange_name, status = %response.status()))]
    async fn handle_response(&self, response: Response) -> Result<Vec<u8>, ExchangeError> {
        let status = response.status();
        let body = response.bytes().await?;

        if status.is_success() {
            trace!(len = body.len(), "Response body: {}", String::from_utf8_lossy(&body));
            Ok(body.to_vec())
        } else {
            let text = String::from_utf8_lossy(&body);
            warn!(status = status.as_u16(), "Request rejected by server");
            Err(ExchangeError::http_status(status.as_u16(), &text))
        }
    }
}

#[async_trait]
impl RestClient for ReqwestRest {
    #[instrument(skip(self, query_params), fields(exchange = %self.config.exchange_name, endpoint = %endpoint, param_count = query_params.len()))]
    async fn get(
        &self,
        endpoint: &str,
        query_params: &[(&str, &str)],
    ) -> Result<Vec<u8>, ExchangeError> {
        let response = self
            .client
            .get(self.build_url(endpoint))
            .query(query_params)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "GET request failed");
                ExchangeError::from(e)
            })?;

        self.handle_response(response).await
    }

    #[instrument(skip(self, form_params), fields(exchange = %self.config.exchange_name, endpoint = %endpoint))]
    async fn signed_post(
        &self,
        endpoint: &str,
        form_params: &[(&str, &str)],
    ) -> Result<Vec<u8>, ExchangeError> {
        let signer = self
            .signer
            .as_ref()
            .ok_or(ExchangeError::AuthenticationRequired)?;
        let signed = signer.sign_request(form_params)?;

        let mut request = self.client.post(self.build_url(endpoint));
        for (key, value) in &signed.headers {
            request = request.header(key.as_str(), value.as_str());
        }

        let response = request.body(signed.body).send().await.map_err(|e| {
            warn!(error = %e, "POST request failed");
            ExchangeError::from(e)
        })?;

        self.handle_response(response).await
    }
}
