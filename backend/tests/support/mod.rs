//! Shared harness for the HTTP integration suites.
//!
//! Builds the production wiring (Auth Gate, session service, order service)
//! over in-memory adapters and a test-controlled clock, so each suite drives
//! the real HTTP stack without PostgreSQL or Redis.

use std::sync::Arc;
use std::time::Duration;

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, test, web};
use chrono::{TimeZone, Utc};
use delivery_service::Trace;
use delivery_service::domain::ports::{CredentialHasher, UserRepository};
use delivery_service::domain::{
    Application, AuthGate, NewUserAccount, OrderPolicy, OrderService, SessionPolicy,
    SessionService, TRACE_ID_HEADER, Username,
};
use delivery_service::inbound::http::configure_api;
use delivery_service::inbound::http::state::HttpState;
use delivery_service::inbound::http::validation::unknown_route;
use delivery_service::outbound::memory::{
    InMemoryOrderRepository, InMemoryUserRepository, StaticPackageSizeCatalog,
};
use delivery_service::outbound::security::{HmacTokenSigner, Sha256CredentialHasher};
use delivery_service::outbound::session::InMemorySessionStore;
use delivery_service::test_support::MutableClock;
use serde_json::{Value, json};

pub const USERNAME: &str = "ops@example.com";
pub const PASSWORD: &str = "correct horse battery staple";
pub const TOKEN_TTL_SECS: u64 = 600;

/// Wired handler state plus the clock and order store behind it.
pub struct Harness {
    pub state: HttpState,
    pub clock: Arc<MutableClock>,
    pub orders: Arc<InMemoryOrderRepository>,
}

/// Build the harness with one provisioned user.
pub async fn harness() -> Harness {
    let start = Utc
        .with_ymd_and_hms(2024, 5, 1, 9, 0, 0)
        .single()
        .expect("fixture instant");
    let clock = Arc::new(MutableClock::new(start));

    let hasher = Arc::new(Sha256CredentialHasher::with_rounds(4));
    let users = Arc::new(InMemoryUserRepository::new());
    users
        .insert(&NewUserAccount {
            username: Username::new(USERNAME).expect("username"),
            application: Application::new("dispatch-console").expect("application"),
            password_hash: hasher.hash(PASSWORD).expect("hash"),
            created_by: "integration-tests".to_owned(),
        })
        .await
        .expect("seed user");

    let signer = Arc::new(HmacTokenSigner::new(
        b"integration-secret".to_vec(),
        "delivery-service",
    ));
    let sessions = Arc::new(InMemorySessionStore::new(clock.clone()));
    let gate = Arc::new(AuthGate::new(signer.clone(), sessions.clone(), clock.clone()));
    let login = Arc::new(SessionService::new(
        users,
        hasher,
        signer,
        sessions,
        clock.clone(),
        SessionPolicy {
            ttl: Duration::from_secs(TOKEN_TTL_SECS),
            audience: "delivery-service".to_owned(),
        },
    ));
    let order_store = Arc::new(InMemoryOrderRepository::new());
    let orders = Arc::new(OrderService::new(
        order_store.clone(),
        Arc::new(StaticPackageSizeCatalog::default()),
        clock.clone(),
        OrderPolicy::default(),
    ));

    Harness {
        state: HttpState::new(gate, login, orders.clone(), orders),
        clock,
        orders: order_store,
    }
}

/// Initialise the full application around `state`.
pub async fn app(
    state: HttpState,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error> {
    test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .wrap(Trace)
            .configure(configure_api)
            .default_service(web::to(unknown_route)),
    )
    .await
}

/// Status, `trace-id` header and JSON body of a response.
pub struct Reply {
    pub status: u16,
    pub trace_id: Option<String>,
    pub body: Value,
}

/// Send `request` and capture the reply.
pub async fn send<S>(app: &S, request: test::TestRequest) -> Reply
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let response = test::call_service(app, request.to_request()).await;
    let status = response.status().as_u16();
    let trace_id = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let bytes = test::read_body(response).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("JSON body")
    };
    Reply {
        status,
        trace_id,
        body,
    }
}

/// `POST /api/v1/users/sign/in` request.
pub fn sign_in(username: &str, password: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/v1/users/sign/in")
        .set_json(json!({ "username": username, "password": password }))
}

/// Attach a bearer token.
pub fn bearer(request: test::TestRequest, token: &str) -> test::TestRequest {
    request.insert_header(("Authorization", format!("Bearer {token}")))
}

/// Sign in with the provisioned user and return the access token.
pub async fn token<S>(app: &S) -> String
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let reply = send(app, sign_in(USERNAME, PASSWORD)).await;
    assert_eq!(reply.status, 200, "sign-in failed: {}", reply.body);
    reply.body["data"]["accessToken"]
        .as_str()
        .expect("access token")
        .to_owned()
}

/// A creation payload from `sender_id` whose package is `size` at `weight`.
pub fn order_draft(sender_id: &str, size: &str, weight: i64) -> Value {
    let party = |id: &str| {
        json!({
            "id": id,
            "fullName": "Grace Hopper",
            "phone": "+1 555 0100",
            "email": "grace@example.com"
        })
    };
    let location = json!({
        "latitude": "40.7128",
        "longitude": "-74.0060",
        "address": "1 Centre Street",
        "country": "United States",
        "zip": "10007",
        "reference": "north entrance"
    });
    json!({
        "sender": party(sender_id),
        "recipient": party("recipient-9"),
        "origin": location.clone(),
        "destination": location,
        "package": { "size": size, "quantity": 2, "weight": weight }
    })
}
