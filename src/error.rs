use thiserror::Error;

/// Errors returned by hashing and verification.
///
/// A password that simply does not match its token is not an error: `verify`
/// returns `Ok(false)` for that case.
#[derive(Debug, Error)]
pub enum Error {
    #[error("password is {len} bytes, longer than the {max} byte limit")]
    PasswordTooLong { len: usize, max: usize },

    #[error("token header did not match the current version")]
    WrongVersion,

    #[error("malformed token: {0}")]
    MalformedToken(&'static str),

    #[error("OS random generator unavailable")]
    EntropySourceUnavailable,

    #[error("scrypt key derivation failed: {0}")]
    KdfFailure(String),
}

impl Error {
    /// Returns `true` for errors caused by the caller's password or token.
    ///
    /// These should be reported to end users as a plain authentication failure,
    /// never with the specific reason.
    pub fn is_authentication_failure(&self) -> bool {
        matches!(
            self,
            Error::PasswordTooLong { .. } | Error::WrongVersion | Error::MalformedToken(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
