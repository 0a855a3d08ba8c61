#![allow(dead_code)]

use async_trait::async_trait;
use poloniex::core::errors::ExchangeError;
use poloniex::core::kernel::{RestClient, SignedRequest, Signer};
use poloniex::exchanges::poloniex::{PoloniexConnector, PoloniexSigner};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub const TEST_API_KEY: &str = "test_api_key";
pub const TEST_SECRET: &str = "test_secret_key";

/// What the fake exchange answers for a command
#[derive(Clone, Debug)]
pub enum Canned {
    Body(String),
    Status(u16, String),
}

#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub endpoint: String,
    pub params: Vec<(String, String)>,
    pub signed: Option<SignedRequest>,
}

impl RecordedRequest {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn nonce(&self) -> u64 {
        let body = &self.signed.as_ref().expect("signed request").body;
        body.split('&')
            .find_map(|pair| pair.strip_prefix("nonce="))
            .expect("nonce field")
            .parse()
            .expect("numeric nonce")
    }
}

struct Inner {
    responses: Mutex<HashMap<String, Canned>>,
    requests: Mutex<Vec<RecordedRequest>>,
    signer: Option<PoloniexSigner>,
}

/// In-memory transport that records requests and replays canned bodies
#[derive(Clone)]
pub struct MockRest {
    inner: Arc<Inner>,
}

impl MockRest {
    pub fn public_only() -> Self {
        Self::with_signer(None)
    }

    pub fn authenticated() -> Self {
        Self::with_signer(Some(PoloniexSigner::new(
            TEST_API_KEY.to_string(),
            TEST_SECRET.to_string(),
        )))
    }

    fn with_signer(signer: Option<PoloniexSigner>) -> Self {
        Self {
            inner: Arc::new(Inner {
                responses: Mutex::new(HashMap::new()),
                requests: Mutex::new(Vec::new()),
                signer,
            }),
        }
    }

    pub fn respond(self, command: &str, body: impl Into<String>) -> Self {
        self.inner
            .responses
            .lock()
            .unwrap()
            .insert(command.to_string(), Canned::Body(body.into()));
        self
    }

    pub fn fail(self, command: &str, status: u16, body: &str) -> Self {
        self.inner
            .responses
            .lock()
            .unwrap()
            .insert(command.to_string(), Canned::Status(status, body.to_string()));
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.inner.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests().pop().expect("at least one request")
    }

    pub fn connector(&self) -> PoloniexConnector<Self> {
        PoloniexConnector::from_rest(self.clone())
    }

    fn answer(&self, command: &str) -> Result<Vec<u8>, ExchangeError> {
        let canned = self
            .inner
            .responses
            .lock()
            .unwrap()
            .get(command)
            .cloned()
            .unwrap_or_else(|| Canned::Body(r#"{"error":"Invalid command."}"#.to_string()));

        match canned {
            Canned::Body(body) => Ok(body.into_bytes()),
            Canned::Status(status, body) => Err(ExchangeError::http_status(status, &body)),
        }
    }
}

fn owned(params: &[(&str, &str)]) -> Vec<(String, String)> {
    params
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

fn command_of(params: &[(&str, &str)]) -> String {
    params
        .iter()
        .find(|(k, _)| *k == "command")
        .map(|(_, v)| (*v).to_string())
        .unwrap_or_default()
}

#[async_trait]
impl RestClient for MockRest {
    async fn get(
        &self,
        endpoint: &str,
        query_params: &[(&str, &str)],
    ) -> Result<Vec<u8>, ExchangeError> {
        self.inner.requests.lock().unwrap().push(RecordedRequest {
            method: "GET",
            endpoint: endpoint.to_string(),
            params: owned(query_params),
            signed: None,
        });
        self.answer(&command_of(query_params))
    }

    async fn signed_post(
        &self,
        endpoint: &str,
        form_params: &[(&str, &str)],
    ) -> Result<Vec<u8>, ExchangeError> {
        let signer = self
            .inner
            .signer
            .as_ref()
            .ok_or(ExchangeError::AuthenticationRequired)?;

        // Sign while holding the log so recorded order equals nonce issue order
        {
            let mut requests = self.inner.requests.lock().unwrap();
            let signed = signer.sign_request(form_params)?;
            requests.push(RecordedRequest {
                method: "POST",
                endpoint: endpoint.to_string(),
                params: owned(form_params),
                signed: Some(signed),
            });
        }

        self.answer(&command_of(form_params))
    }
}
