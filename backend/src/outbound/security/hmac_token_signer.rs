//! HS256 JSON Web Token signer.
//!
//! Tokens are `base64url(header).base64url(claims).base64url(mac)` with an
//! HMAC-SHA256 over the first two segments. Only `HS256` headers are
//! accepted and the `aud` claim must equal the configured audience.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::domain::TokenClaims;
use crate::domain::ports::{TokenSigner, TokenSignerError};

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "HS256";

#[derive(Debug, Serialize, Deserialize)]
struct Header {
    alg: String,
    typ: String,
}

/// Stateless HS256 signer keyed by a shared secret.
pub struct HmacTokenSigner {
    secret: Zeroizing<Vec<u8>>,
    audience: String,
}

impl HmacTokenSigner {
    /// Create a signer over `secret` accepting tokens for `audience`.
    ///
    /// # Examples
    /// ```
    /// use delivery_service::domain::{Application, TokenClaims, UserId, Username};
    /// use delivery_service::domain::ports::TokenSigner;
    /// use delivery_service::outbound::security::HmacTokenSigner;
    /// use uuid::Uuid;
    ///
    /// let signer = HmacTokenSigner::new(b"secret".to_vec(), "delivery-service");
    /// let claims = TokenClaims {
    ///     user_id: UserId::new(1),
    ///     username: Username::new("ops@example.com").unwrap(),
    ///     application: Application::new("console").unwrap(),
    ///     audience: "delivery-service".into(),
    ///     expires_at: 4_102_444_800,
    ///     token_id: Uuid::new_v4(),
    /// };
    /// let token = signer.sign(&claims).unwrap();
    /// assert_eq!(signer.verify(&token).unwrap(), claims);
    /// ```
    pub fn new(secret: Vec<u8>, audience: impl Into<String>) -> Self {
        Self {
            secret: Zeroizing::new(secret),
            audience: audience.into(),
        }
    }

    fn mac(&self) -> Result<HmacSha256, TokenSignerError> {
        HmacSha256::new_from_slice(&self.secret)
            .map_err(|err| TokenSignerError::signing(err.to_string()))
    }
}

fn encode_segment<T: Serialize>(value: &T) -> Result<String, TokenSignerError> {
    let bytes =
        serde_json::to_vec(value).map_err(|err| TokenSignerError::signing(err.to_string()))?;
    Ok(URL_SAFE_NO_PAD.encode(bytes))
}

fn decode_segment(segment: &str, name: &str) -> Result<Vec<u8>, TokenSignerError> {
    URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|err| TokenSignerError::malformed(format!("{name} is not base64url: {err}")))
}

impl TokenSigner for HmacTokenSigner {
    fn sign(&self, claims: &TokenClaims) -> Result<String, TokenSignerError> {
        let header = encode_segment(&Header {
            alg: ALGORITHM.to_owned(),
            typ: "JWT".to_owned(),
        })?;
        let payload = encode_segment(claims)?;
        let signing_input = format!("{header}.{payload}");

        let mut mac = self.mac()?;
        mac.update(signing_input.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());
        Ok(format!("{signing_input}.{signature}"))
    }

    fn verify(&self, token: &str) -> Result<TokenClaims, TokenSignerError> {
        let segments: Vec<&str> = token.split('.').collect();
        let [header, payload, signature] = segments.as_slice() else {
            return Err(TokenSignerError::malformed("expected three segments"));
        };

        let signature_bytes = decode_segment(signature, "signature")?;
        let mut mac = self.mac()?;
        mac.update(header.as_bytes());
        mac.update(b".");
        mac.update(payload.as_bytes());
        mac.verify_slice(&signature_bytes)
            .map_err(|_| TokenSignerError::signature())?;

        let parsed_header: Header = serde_json::from_slice(&decode_segment(header, "header")?)
            .map_err(|err| TokenSignerError::malformed(format!("header: {err}")))?;
        if parsed_header.alg != ALGORITHM {
            return Err(TokenSignerError::malformed(format!(
                "unsupported algorithm {}",
                parsed_header.alg
            )));
        }

        let claims: TokenClaims = serde_json::from_slice(&decode_segment(payload, "payload")?)
            .map_err(|err| TokenSignerError::malformed(format!("claims: {err}")))?;
        if claims.audience != self.audience {
            return Err(TokenSignerError::malformed(format!(
                "audience {} is not accepted",
                claims.audience
            )));
        }
        Ok(claims)
    }
}
