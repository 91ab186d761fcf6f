use serde::Serialize;
use zeroize::Zeroizing;

use super::{DEFAULT_KEY_LEN, DEFAULT_SALT_LEN, MAX_KDF_MEMORY, MAX_KEY_LEN, MIN_KEY_LEN, MIN_SALT_LEN};
use crate::error::{Error, Result};

/// Fixed scrypt parameter set, plus the salt length tokens are generated with.
///
/// Every field is part of the token format: changing any of them (other than the
/// salt length) changes the version header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KdfParams {
    n: u64,
    r: u32,
    p: u32,
    key_len: usize,
    salt_len: usize,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            // interactive login cost, 16 MiB of scratch memory
            n: 16384,
            r: 8,
            p: 1,
            key_len: DEFAULT_KEY_LEN,
            salt_len: DEFAULT_SALT_LEN,
        }
    }
}

impl KdfParams {
    pub fn new(n: u64, r: u32, p: u32, key_len: usize, salt_len: usize) -> Result<Self> {
        let params = Self {
            n,
            r,
            p,
            key_len,
            salt_len,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn n(&self) -> u64 {
        self.n
    }

    pub fn r(&self) -> u32 {
        self.r
    }

    pub fn p(&self) -> u32 {
        self.p
    }

    pub fn key_len(&self) -> usize {
        self.key_len
    }

    pub fn salt_len(&self) -> usize {
        self.salt_len
    }

    /// Scratch memory one derivation allocates, in bytes.
    pub fn memory_cost(&self) -> Option<u64> {
        128u64.checked_mul(self.r as u64)?.checked_mul(self.n)
    }

    /// The prefix every token produced with these parameters starts with.
    pub fn version_header(&self) -> String {
        format!(
            "scrypt$NrpL{}/{}/{}/{}$",
            self.n, self.r, self.p, self.key_len
        )
    }

    pub fn validate(&self) -> Result<()> {
        if self.n < 2 || !self.n.is_power_of_two() {
            return Err(kdf_failure("cost factor N must be a power of two greater than 1"));
        }
        if self.r < 1 {
            return Err(kdf_failure("block size r must be >= 1"));
        }
        if self.p < 1 {
            return Err(kdf_failure("parallelism p must be >= 1"));
        }
        if (self.r as u64) * (self.p as u64) >= 1 << 30 {
            return Err(kdf_failure("r * p must be below 2^30"));
        }
        if !(MIN_KEY_LEN..=MAX_KEY_LEN).contains(&self.key_len) {
            return Err(kdf_failure("derived key length must be between 10 and 64 bytes"));
        }
        if self.salt_len < MIN_SALT_LEN {
            return Err(kdf_failure("salt length must be at least 16 bytes"));
        }
        match self.memory_cost() {
            Some(mem) if mem <= MAX_KDF_MEMORY => {}
            _ => return Err(kdf_failure("memory cost 128 * r * N exceeds 1 GiB")),
        }
        // scrypt's own limits, e.g. log2(N) < 16 * r
        self.build_scrypt_params()?;
        Ok(())
    }

    fn scrypt_params(&self) -> Result<scrypt::Params> {
        self.validate()?;
        self.build_scrypt_params()
    }

    fn build_scrypt_params(&self) -> Result<scrypt::Params> {
        let log_n = self.n.trailing_zeros() as u8;
        scrypt::Params::new(log_n, self.r, self.p, self.key_len)
            .map_err(|e| Error::KdfFailure(format!("invalid scrypt params: {e}")))
    }
}

fn kdf_failure(msg: &str) -> Error {
    Error::KdfFailure(msg.to_string())
}

/// Derive a `key_len` byte key from password and salt with scrypt.
pub fn derive_key(password: &[u8], salt: &[u8], kdf: &KdfParams) -> Result<Zeroizing<Vec<u8>>> {
    let params = kdf.scrypt_params()?;

    let mut key = Zeroizing::new(vec![0u8; kdf.key_len]);
    scrypt::scrypt(password, salt, &params, &mut key)
        .map_err(|e| Error::KdfFailure(format!("scrypt rejected output length: {e}")))?;

    tracing::trace!(n = kdf.n, r = kdf.r, p = kdf.p, "derived scrypt key");
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast() -> KdfParams {
        KdfParams {
            n: 1024,
            r: 8,
            p: 1,
            key_len: 32,
            salt_len: 18,
        }
    }

    #[test]
    fn kdf_is_deterministic() {
        let salt = [42u8; 18];
        let kdf = fast();

        let k1 = derive_key(b"password", &salt, &kdf).unwrap();
        let k2 = derive_key(b"password", &salt, &kdf).unwrap();

        assert_eq!(k1, k2);
        assert_eq!(k1.len(), 32);
    }

    #[test]
    fn kdf_params_affect_output() {
        let salt = [7u8; 18];

        let kdf1 = fast();
        let kdf2 = KdfParams { n: 2048, ..fast() };

        let k1 = derive_key(b"pw", &salt, &kdf1).unwrap();
        let k2 = derive_key(b"pw", &salt, &kdf2).unwrap();

        assert_ne!(k1, k2);
    }

    #[test]
    fn kdf_matches_rfc7914_vector() {
        let kdf = KdfParams {
            n: 1024,
            r: 8,
            p: 16,
            key_len: 64,
            salt_len: 18,
        };
        let key = derive_key(b"password", b"NaCl", &kdf).unwrap();
        assert_eq!(
            hex::encode(&*key),
            "fdbabe1c9d3472007856e7190d01e9fe7c6ad7cbc8237830e77376634b373162\
             2eaf30d92e22a3886ff109279d9830dac727afb94a83ee6d8360cbdfa2cc0640"
        );
    }

    #[test]
    fn default_header_matches_wire_format() {
        assert_eq!(KdfParams::default().version_header(), "scrypt$NrpL16384/8/1/32$");
    }

    #[test]
    fn kdf_invalid_params_fail_gracefully() {
        assert!(KdfParams::new(0, 0, 0, 0, 0).is_err());
        assert!(KdfParams::new(1000, 8, 1, 32, 18).is_err());
        assert!(KdfParams::new(16384, 0, 1, 32, 18).is_err());
        assert!(KdfParams::new(16384, 8, 0, 32, 18).is_err());
        assert!(KdfParams::new(16384, 8, 1, 8, 18).is_err());
        assert!(KdfParams::new(16384, 8, 1, 65, 18).is_err());
        assert!(KdfParams::new(16384, 8, 1, 32, 8).is_err());
        assert!(KdfParams::new(1 << 40, 8, 1, 32, 18).is_err());
    }

    #[test]
    fn kdf_params_scrypt_rejects_are_caught_up_front() {
        // log2(N) = 16 is not below 16 * r for r = 1
        let err = KdfParams::new(1 << 16, 1, 1, 32, 18).unwrap_err();
        assert!(matches!(err, Error::KdfFailure(_)));

        let unchecked = KdfParams { n: 1 << 16, r: 1, ..fast() };
        assert!(crate::Hasher::new(unchecked).is_err());

        assert!(KdfParams::new(1 << 15, 1, 1, 32, 18).is_ok());
    }

    #[test]
    fn derive_with_invalid_params_is_kdf_failure() {
        let kdf = KdfParams { n: 3, ..fast() };
        let err = derive_key(b"pw", &[0u8; 18], &kdf).unwrap_err();
        assert!(matches!(err, Error::KdfFailure(_)));
    }
}
