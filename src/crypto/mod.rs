//! Cryptographic primitives for password tokens.
//!
//! Provides salt generation, scrypt key derivation, and constant-time comparison.

pub mod compare;
pub mod kdf;
pub mod random;

pub use compare::constant_time_eq;
pub use kdf::{KdfParams, derive_key};
pub use random::generate_salt;

/// Default length of the salt (18 bytes).
pub const DEFAULT_SALT_LEN: usize = 18;
/// Minimum accepted salt length (16 bytes / 128 bits).
pub const MIN_SALT_LEN: usize = 16;
/// Default length of the derived key (32 bytes / 256 bits).
pub const DEFAULT_KEY_LEN: usize = 32;
/// Shortest derived key scrypt will produce.
pub const MIN_KEY_LEN: usize = 10;
/// Longest derived key scrypt will produce.
pub const MAX_KEY_LEN: usize = 64;
/// Upper bound on scrypt scratch memory (`128 * r * N` bytes), 1 GiB.
pub const MAX_KDF_MEMORY: u64 = 1 << 30;
