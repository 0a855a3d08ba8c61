use crate::core::errors::ExchangeError;
use crate::core::kernel::{hmac_sha512_hex, NonceGenerator, SignatureResult, SignedRequest, Signer};
use tracing::trace;

pub const KEY_HEADER: &str = "Key";
pub const SIGN_HEADER: &str = "Sign";
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Signs trading API calls: `command` and `nonce` lead the form body, the
/// body is HMAC-SHA512'd with the API secret and the hex digest travels in the
/// `Sign` header next to the API key.
pub struct PoloniexSigner {
    api_key: String,
    secret_key: String,
    nonces: NonceGenerator,
}

impl PoloniexSigner {
    pub fn new(api_key: String, secret_key: String) -> Self {
        Self::with_nonce_generator(api_key, secret_key, NonceGenerator::new())
    }

    pub fn with_nonce_generator(
        api_key: String,
        secret_key: String,
        nonces: NonceGenerator,
    ) -> Self {
        Self {
            api_key,
            secret_key,
            nonces,
        }
    }

    /// Form-encode fields in the order given
    pub fn encode_form(fields: &[(&str, &str)]) -> Result<String, ExchangeError> {
        serde_urlencoded::to_string(fields)
            .map_err(|e| ExchangeError::AuthError(format!("Failed to encode form body: {}", e)))
    }

    /// Hex HMAC-SHA512 of the exact body bytes
    pub fn sign_body(&self, body: &str) -> Result<String, ExchangeError> {
        hmac_sha512_hex(self.secret_key.as_bytes(), body.as_bytes())
    }

    /// Build the signed body for `command` with extra parameters
    pub fn sign_command(&self, command: &str, params: &[(&str, &str)]) -> SignatureResult {
        let mut fields = Vec::with_capacity(params.len() + 1);
        fields.push(("command", command));
        fields.extend_from_slice(params);
        self.sign_request(&fields)
    }
}

impl std::fmt::Debug for PoloniexSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PoloniexSigner")
            .field("api_key", &"[REDACTED]")
            .field("last_nonce", &self.nonces.last())
            .finish_non_exhaustive()
    }
}

impl Signer for PoloniexSigner {
    fn sign_request(&self, params: &[(&str, &str)]) -> SignatureResult {
        let nonce = self.nonces.next().to_string();

        // command, nonce, then caller fields; a caller-supplied nonce is replaced
        let mut fields: Vec<(&str, &str)> = Vec::with_capacity(params.len() + 1);
        fields.extend(params.iter().filter(|(k, _)| *k == "command"));
        fields.push(("nonce", nonce.as_str()));
        fields.extend(
            params
                .iter()
                .filter(|(k, _)| *k != "command" && *k != "nonce"),
        );

        let body = Self::encode_form(&fields)?;
        let signature = self.sign_body(&body)?;
        trace!(nonce = %nonce, field_count = fields.len(), "Signed trading request");

        Ok(SignedRequest {
            body,
            headers: vec![
                (KEY_HEADER.to_string(), self.api_key.clone()),
                (SIGN_HEADER.to_string(), signature),
                ("Content-Type".to_string(), FORM_CONTENT_TYPE.to_string()),
            ],
        })
    }
}
