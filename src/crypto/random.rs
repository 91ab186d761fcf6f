use getrandom::fill;

use crate::error::{Error, Result};

/// Fill buffer with cryptographically secure random bytes
fn secure_random(buf: &mut [u8]) -> Result<()> {
    fill(buf).map_err(|e| {
        tracing::error!(error = %e, "OS random generator unavailable");
        Error::EntropySourceUnavailable
    })
}

/// Generate a fresh salt of `len` bytes
pub fn generate_salt(len: usize) -> Result<Vec<u8>> {
    let mut salt = vec![0u8; len];
    secure_random(&mut salt)?;
    Ok(salt)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn salt_has_requested_length() {
        assert_eq!(generate_salt(18).unwrap().len(), 18);
        assert_eq!(generate_salt(16).unwrap().len(), 16);
    }

    #[test]
    fn random_salts_are_unique() {
        let salts: HashSet<Vec<u8>> = (0..10_000).map(|_| generate_salt(18).unwrap()).collect();
        assert_eq!(salts.len(), 10_000, "salt generator repeated an output");
    }
}
