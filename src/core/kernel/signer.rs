use crate::core::errors::ExchangeError;
use hmac::{Hmac, Mac};
use sha2::Sha512;

type HmacSha512 = Hmac<Sha512>;

/// Result type for signing operations
pub type SignatureResult = Result<SignedRequest, ExchangeError>;

/// A request body together with the headers that authenticate it
///
/// `body` holds exactly the bytes that were signed; transports must send it
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    pub body: String,
    pub headers: Vec<(String, String)>,
}

impl SignedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Signer trait for request authentication
///
/// Implementations turn the caller's form parameters into a complete signed
/// body, adding whatever replay protection the exchange requires.
pub trait Signer: Send + Sync {
    /// Sign a form-encoded request
    ///
    /// # Arguments
    /// * `params` - Ordered form fields supplied by the caller
    fn sign_request(&self, params: &[(&str, &str)]) -> SignatureResult;
}

/// Hex encoded HMAC-SHA512 of `payload` keyed with `secret`
pub fn hmac_sha512_hex(secret: &[u8], payload: &[u8]) -> Result<String, ExchangeError> {
    let mut mac = HmacSha512::new_from_slice(secret)
        .map_err(|e| ExchangeError::AuthError(format!("Invalid secret key: {}", e)))?;
    mac.update(payload);
    Ok(hex::encode(mac.finalize().into_bytes()))
}
