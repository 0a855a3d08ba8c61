/// Kernel - exchange-agnostic transport layer
///
/// The kernel contains only transport and authentication plumbing. Exchange
/// modules decide which endpoints to call and how to decode the bytes that
/// come back.
///
/// # Architecture
///
/// ## Transport Layer
/// - `RestClient`: byte-level HTTP interface (public GET, signed POST)
/// - `ReqwestRest`: `reqwest`-backed implementation with a per-request timeout
///
/// ## Authentication
/// - `Signer`: turns ordered form fields into a signed body plus headers
/// - `NonceGenerator`: strictly increasing replay-protection counter
/// - `hmac_sha512_hex`: keyed digest helper shared by signers
///
/// # Example
/// ```rust,no_run
/// use poloniex::core::kernel::*;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = RestClientConfig::new("https://poloniex.com/".to_string(), "poloniex".to_string());
/// let rest = RestClientBuilder::new(config).build()?;
///
/// let raw = rest.get("public", &[("command", "returnTicker")]).await?;
/// println!("{} bytes", raw.len());
/// # Ok(())
/// # }
/// ```
pub mod nonce;
pub mod rest;
pub mod signer;

pub use nonce::NonceGenerator;
pub use rest::{ReqwestRest, RestClient, RestClientBuilder, RestClientConfig};
pub use signer::{hmac_sha512_hex, SignatureResult, SignedRequest, Signer};
