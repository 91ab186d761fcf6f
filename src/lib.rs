//! Memory-hard password hashing into self-describing tokens.
//!
//! A token carries the scrypt parameter set, the salt and the derived key:
//!
//! ```text
//! scrypt$NrpL16384/8/1/32$<base64(salt || key)>
//! ```
//!
//! ```no_run
//! let token = pwtoken::hash(b"correct horse")?;
//! assert!(pwtoken::verify(b"correct horse", token.as_str())?);
//! assert!(!pwtoken::verify(b"battery staple", token.as_str())?);
//! # Ok::<(), pwtoken::Error>(())
//! ```
//!
//! Storing tokens, rate limiting and account handling are left to the caller.

pub mod crypto;
mod error;
mod hasher;
pub mod token;

pub use crate::crypto::KdfParams;
pub use crate::error::{Error, Result};
pub use crate::hasher::{Hasher, MAX_PASSWORD_LEN};
pub use crate::token::Token;

/// Hash `password` with the default parameter set.
pub fn hash(password: &[u8]) -> Result<Token> {
    Hasher::default().hash(password)
}

/// Verify `password` against `token` with the default parameter set.
pub fn verify(password: &[u8], token: &str) -> Result<bool> {
    Hasher::default().verify(password, token)
}
