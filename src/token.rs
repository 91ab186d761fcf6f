//! Text token format.
//!
//! ```text
//! scrypt$NrpL<N>/<r>/<p>/<keyLen>$<base64(SALT || DERIVED_KEY)>
//! ```
//!
//! The payload uses the standard base64 alphabet with padding.

use std::fmt;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use zeroize::Zeroizing;

use crate::crypto::{KdfParams, constant_time_eq};
use crate::error::{Error, Result};

/// A self-describing password token.
///
/// Holds everything needed to verify a later password attempt except the
/// password itself.
#[derive(Clone)]
pub struct Token(String);

impl Token {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Tokens are not secret, but they are offline-crackable; keep them out of debug output.
impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(..)")
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<Token> for String {
    fn from(token: Token) -> Self {
        token.0
    }
}

/// Serialize salt and derived key behind the version header.
pub fn encode(header: &str, salt: &[u8], key: &[u8]) -> Token {
    let mut payload = Zeroizing::new(Vec::with_capacity(salt.len() + key.len()));
    payload.extend_from_slice(salt);
    payload.extend_from_slice(key);

    let mut token = String::with_capacity(header.len() + payload.len().div_ceil(3) * 4);
    token.push_str(header);
    STANDARD.encode_string(&*payload, &mut token);
    Token(token)
}

/// Returns `true` if `token` starts with `header`, compared in constant time.
pub fn has_header(header: &str, token: &str) -> bool {
    let token = token.as_bytes();
    // a token shorter than the header is compared whole, and fails on length
    let prefix = token.get(..header.len()).unwrap_or(token);
    constant_time_eq(prefix, header.as_bytes())
}

/// Check the header and decode the `SALT || DERIVED_KEY` payload.
///
/// # Errors
///
/// Returns an error if:
/// - The header does not match (`WrongVersion`)
/// - The payload is not valid base64 (`MalformedToken`)
/// - The payload is shorter than salt plus key (`MalformedToken`)
fn decode_payload(header: &str, token: &str, kdf: &KdfParams) -> Result<Zeroizing<Vec<u8>>> {
    if !has_header(header, token) {
        tracing::debug!("token header mismatch");
        return Err(Error::WrongVersion);
    }

    let encoded = &token.as_bytes()[header.len()..];
    let payload = Zeroizing::new(STANDARD.decode(encoded).map_err(|_| {
        tracing::debug!("token payload is not valid base64");
        Error::MalformedToken("payload is not valid base64")
    })?);

    if payload.len() < kdf.salt_len() + kdf.key_len() {
        tracing::debug!(len = payload.len(), "token payload too short");
        return Err(Error::MalformedToken("payload too short"));
    }

    Ok(payload)
}

/// Verify that a token is plausible and extract its salt.
pub fn decode_salt(header: &str, token: &str, kdf: &KdfParams) -> Result<Vec<u8>> {
    let payload = decode_payload(header, token, kdf)?;
    Ok(payload[..kdf.salt_len()].to_vec())
}
