//! Port for password digests.

use super::define_port_error;

define_port_error! {
    /// Errors raised while producing a digest.
    pub enum CredentialHasherError {
        /// The hasher could not produce a digest.
        Hashing { message: String } => "credential hashing failed: {message}",
    }
}

/// One-way password hashing with constant-time verification.
#[cfg_attr(test, mockall::automock)]
pub trait CredentialHasher: Send + Sync {
    /// Produce a self-describing digest for `plaintext`.
    fn hash(&self, plaintext: &str) -> Result<String, CredentialHasherError>;

    /// Whether `plaintext` matches `digest`. Unparseable digests never match.
    fn verify(&self, digest: &str, plaintext: &str) -> bool;
}
