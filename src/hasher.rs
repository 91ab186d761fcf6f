use zeroize::Zeroizing;

use crate::crypto::{self, KdfParams, constant_time_eq};
use crate::error::{Error, Result};
use crate::token::{self, Token};

/// Passwords longer than this are refused as a denial of service safeguard.
pub const MAX_PASSWORD_LEN: usize = 1024;

/// Hashes passwords into tokens and verifies passwords against them.
///
/// A `Hasher` holds an immutable parameter set and the version header derived
/// from it. It is cheap to clone and safe to share between threads; each call
/// allocates its own scrypt scratch memory.
#[derive(Debug, Clone)]
pub struct Hasher {
    kdf: KdfParams,
    header: String,
}

impl Default for Hasher {
    fn default() -> Self {
        let kdf = KdfParams::default();
        Self {
            header: kdf.version_header(),
            kdf,
        }
    }
}

impl Hasher {
    /// Creates a hasher for `kdf`, rejecting parameters scrypt cannot run with.
    pub fn new(kdf: KdfParams) -> Result<Self> {
        kdf.validate()?;
        Ok(Self {
            header: kdf.version_header(),
            kdf,
        })
    }

    pub fn params(&self) -> &KdfParams {
        &self.kdf
    }

    pub fn version_header(&self) -> &str {
        &self.header
    }

    /// Generate a salt of the configured length.
    pub fn generate_salt(&self) -> Result<Vec<u8>> {
        crypto::generate_salt(self.kdf.salt_len())
    }

    /// Derive the scrypt key for `password` and `salt`.
    pub fn derive_key(&self, password: &[u8], salt: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
        crypto::derive_key(password, salt, &self.kdf)
    }

    /// Hash `password` into a new token with a fresh random salt.
    pub fn hash(&self, password: &[u8]) -> Result<Token> {
        check_password_len(password)?;

        let salt = self.generate_salt()?;
        let key = self.derive_key(password, &salt)?;

        tracing::debug!(header = %self.header, "hashed password");
        Ok(token::encode(&self.header, &salt, &key))
    }

    /// Verify that `password` is consistent with `token`.
    ///
    /// A wrong password is `Ok(false)`. Errors mean the input was unusable or
    /// the KDF could not run.
    pub fn verify(&self, password: &[u8], token: &str) -> Result<bool> {
        check_password_len(password)?;

        let salt = token::decode_salt(&self.header, token, &self.kdf)?;
        let key = self.derive_key(password, &salt)?;
        let candidate = token::encode(&self.header, &salt, &key);

        let matched = constant_time_eq(candidate.as_str().as_bytes(), token.as_bytes());
        tracing::debug!(matched, "verified password");
        Ok(matched)
    }

    /// Returns `true` if `token` was produced with this hasher's parameters.
    ///
    /// A `false` result on a token that still verifies means it should be
    /// re-hashed and stored again.
    pub fn is_current(&self, token: &str) -> bool {
        token::has_header(&self.header, token)
    }
}

fn check_password_len(password: &[u8]) -> Result<()> {
    if password.len() > MAX_PASSWORD_LEN {
        return Err(Error::PasswordTooLong {
            len: password.len(),
            max: MAX_PASSWORD_LEN,
        });
    }
    Ok(())
}
