//! Service configuration loaded via OrthoConfig.
//!
//! Values come from `DELIVERY_*` environment variables, an optional
//! configuration file and command-line flags, in increasing precedence.
//! Absent values fall back to the defaults exposed by the accessors.

use std::net::{AddrParseError, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use rand::RngCore;
use serde::Deserialize;
use tracing::warn;
use zeroize::Zeroizing;

use crate::domain::{OrderPolicy, SessionPolicy};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_TOKEN_TTL_MINUTES: u64 = 60;
const DEFAULT_AUDIENCE: &str = "delivery-service";
const EPHEMERAL_SECRET_LEN: usize = 32;

/// Failures while turning raw settings into runtime values.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// `bind_addr` is not a socket address.
    #[error("invalid bind address {value:?}: {source}")]
    BindAddr {
        value: String,
        #[source]
        source: AddrParseError,
    },
    /// No token secret was configured and an ephemeral one is not allowed.
    #[error("DELIVERY_TOKEN_SECRET must be set")]
    MissingTokenSecret,
}

/// Runtime configuration for the delivery service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DELIVERY")]
pub struct DeliverySettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection URL; in-memory repositories are used when unset.
    pub database_url: Option<String>,
    /// Redis connection URL; an in-memory session store is used when unset.
    pub redis_url: Option<String>,
    /// HMAC key for access tokens.
    pub token_secret: Option<String>,
    /// Token and session lifetime in minutes.
    pub token_ttl_minutes: Option<u64>,
    /// Audience embedded in and required of access tokens.
    pub token_audience: Option<String>,
    /// Heaviest accepted package weight.
    pub max_package_weight: Option<u32>,
    /// Minutes after creation during which a cancellation may claim a refund.
    pub refund_window_minutes: Option<u32>,
}

impl DeliverySettings {
    /// Parsed bind address, defaulting to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|source| SettingsError::BindAddr {
            value: raw.to_owned(),
            source,
        })
    }

    /// Audience for minted tokens.
    pub fn token_audience(&self) -> &str {
        self.token_audience.as_deref().unwrap_or(DEFAULT_AUDIENCE)
    }

    /// Token secret bytes.
    ///
    /// Without a configured secret, a random one is generated when
    /// `allow_ephemeral` is set; tokens then die with the process.
    pub fn token_secret(
        &self,
        allow_ephemeral: bool,
    ) -> Result<Zeroizing<Vec<u8>>, SettingsError> {
        match self.token_secret.as_deref() {
            Some(secret) if !secret.is_empty() => Ok(Zeroizing::new(secret.as_bytes().to_vec())),
            _ if allow_ephemeral => {
                warn!("using an ephemeral token secret (dev only)");
                let mut secret = Zeroizing::new(vec![0_u8; EPHEMERAL_SECRET_LEN]);
                rand::thread_rng().fill_bytes(secret.as_mut_slice());
                Ok(secret)
            }
            _ => Err(SettingsError::MissingTokenSecret),
        }
    }

    /// Session lifetime and audience.
    pub fn session_policy(&self) -> SessionPolicy {
        let minutes = self.token_ttl_minutes.unwrap_or(DEFAULT_TOKEN_TTL_MINUTES);
        SessionPolicy {
            ttl: Duration::from_secs(minutes.saturating_mul(60)),
            audience: self.token_audience().to_owned(),
        }
    }

    /// Weight ceiling and refund window.
    pub fn order_policy(&self) -> OrderPolicy {
        let defaults = OrderPolicy::default();
        OrderPolicy {
            max_package_weight: self
                .max_package_weight
                .unwrap_or(defaults.max_package_weight),
            refund_window_minutes: self
                .refund_window_minutes
                .unwrap_or(defaults.refund_window_minutes),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const KEYS: [&str; 8] = [
        "DELIVERY_BIND_ADDR",
        "DELIVERY_DATABASE_URL",
        "DELIVERY_REDIS_URL",
        "DELIVERY_TOKEN_SECRET",
        "DELIVERY_TOKEN_TTL_MINUTES",
        "DELIVERY_TOKEN_AUDIENCE",
        "DELIVERY_MAX_PACKAGE_WEIGHT",
        "DELIVERY_REFUND_WINDOW_MINUTES",
    ];

    fn load_from_empty_args() -> DeliverySettings {
        DeliverySettings::load_from_iter([OsString::from("delivery-service")])
            .expect("config should load")
    }

    fn cleared() -> Vec<(&'static str, Option<String>)> {
        KEYS.iter().map(|key| (*key, None)).collect()
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(cleared());

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("default address"),
            "0.0.0.0:8080".parse::<SocketAddr>().expect("literal")
        );
        assert!(settings.database_url.is_none());
        assert!(settings.redis_url.is_none());
        assert_eq!(settings.session_policy(), SessionPolicy::default());
        assert_eq!(settings.order_policy(), OrderPolicy::default());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let mut vars = cleared();
        vars.retain(|(key, _)| {
            !matches!(
                *key,
                "DELIVERY_BIND_ADDR"
                    | "DELIVERY_TOKEN_TTL_MINUTES"
                    | "DELIVERY_TOKEN_AUDIENCE"
                    | "DELIVERY_MAX_PACKAGE_WEIGHT"
                    | "DELIVERY_REFUND_WINDOW_MINUTES"
                    | "DELIVERY_TOKEN_SECRET"
            )
        });
        vars.extend([
            ("DELIVERY_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            ("DELIVERY_TOKEN_TTL_MINUTES", Some("5".to_owned())),
            ("DELIVERY_TOKEN_AUDIENCE", Some("dispatch".to_owned())),
            ("DELIVERY_MAX_PACKAGE_WEIGHT", Some("40".to_owned())),
            ("DELIVERY_REFUND_WINDOW_MINUTES", Some("10".to_owned())),
            ("DELIVERY_TOKEN_SECRET", Some("s3cret".to_owned())),
        ]);
        let _guard = lock_env(vars);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("override address").port(),
            9000
        );
        assert_eq!(
            settings.session_policy(),
            SessionPolicy {
                ttl: Duration::from_secs(300),
                audience: "dispatch".to_owned(),
            }
        );
        assert_eq!(
            settings.order_policy(),
            OrderPolicy {
                max_package_weight: 40,
                refund_window_minutes: 10,
            }
        );
        assert_eq!(
            settings.token_secret(false).expect("configured").as_slice(),
            b"s3cret"
        );
    }

    #[rstest]
    fn invalid_bind_address_is_reported() {
        let mut vars = cleared();
        vars.retain(|(key, _)| *key != "DELIVERY_BIND_ADDR");
        vars.push(("DELIVERY_BIND_ADDR", Some("not-an-address".to_owned())));
        let _guard = lock_env(vars);

        let err = load_from_empty_args()
            .bind_addr()
            .expect_err("unparsable address");
        assert!(matches!(err, SettingsError::BindAddr { .. }));
    }

    #[rstest]
    #[case(true, true)]
    #[case(false, false)]
    fn missing_secret_depends_on_ephemeral_permission(
        #[case] allow_ephemeral: bool,
        #[case] expect_ok: bool,
    ) {
        let _guard = lock_env(cleared());

        let result = load_from_empty_args().token_secret(allow_ephemeral);
        assert_eq!(result.is_ok(), expect_ok);
        if let Ok(secret) = result {
            assert_eq!(secret.len(), EPHEMERAL_SECRET_LEN);
        }
    }
}
