//! Domain primitives, services and ports.
//!
//! Purpose: hold the order lifecycle rules and the session-bound
//! authentication gate behind transport-agnostic types. Adapters reach the
//! domain only through [`ports`].
//!
//! Public surface:
//! - [`Error`] / [`ErrorCode`]: classified failures returned by every use-case.
//! - [`AuthGate`] and [`SessionService`]: bearer validation and sign-in/out.
//! - [`OrderService`]: creation, transitions, cancellation and lookups.

pub mod auth;
pub mod auth_gate;
pub(crate) mod email;
pub mod error;
pub mod order_service;
pub mod orders;
pub mod package_size;
pub mod ports;
pub mod session_service;
pub mod trace_id;
pub mod user;

pub use self::auth::{
    BearerToken, IdentityContext, LoginCredentials, LoginValidationError, SessionGrant,
    TokenClaims,
};
pub use self::auth_gate::AuthGate;
pub use self::error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use self::order_service::{OrderPolicy, OrderService};
pub use self::orders::{
    AuditTrail, FieldViolation, Location, LocationDraft, NewOrder, Order, OrderDraft, OrderId,
    OrderStatus, OrderUpdate, Package, PackageDraft, PackageSize, ParseOrderStatusError, Party,
    PartyDraft, RecordStatus, ValidatedOrder,
};
pub use self::package_size::{SizeTier, resolve_tier};
pub use self::session_service::{SessionPolicy, SessionService};
pub use self::trace_id::TraceId;
pub use self::user::{
    Application, NewUserAccount, UserAccount, UserId, UserValidationError, Username,
};
