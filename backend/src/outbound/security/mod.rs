//! Token signing and credential hashing adapters.

mod hmac_token_signer;
mod sha256_credential_hasher;

pub use hmac_token_signer::HmacTokenSigner;
pub use sha256_credential_hasher::Sha256CredentialHasher;
