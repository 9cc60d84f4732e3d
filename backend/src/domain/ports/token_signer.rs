//! Port for minting and verifying signed access tokens.

use crate::domain::TokenClaims;

use super::define_port_error;

define_port_error! {
    /// Errors raised by token signer adapters.
    pub enum TokenSignerError {
        /// The token is not well formed or its claims are missing or mistyped.
        Malformed { message: String } => "token is malformed: {message}",
        /// The signature does not match the token content.
        Signature => "token signature is invalid",
        /// The signer could not produce a token.
        Signing { message: String } => "token signing failed: {message}",
    }
}

/// Stateless token signing.
///
/// The expiry travels inside the claims; the signer never consults a clock.
#[cfg_attr(test, mockall::automock)]
pub trait TokenSigner: Send + Sync {
    /// Sign `claims` into a compact token string.
    fn sign(&self, claims: &TokenClaims) -> Result<String, TokenSignerError>;

    /// Check the signature and structure of `token` and return its claims.
    fn verify(&self, token: &str) -> Result<TokenClaims, TokenSignerError>;
}
