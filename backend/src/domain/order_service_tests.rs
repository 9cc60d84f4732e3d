//! Tests for the order lifecycle service.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use mockall::predicate::eq;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{MockOrderRepository, MockPackageSizeCatalog};
use crate::domain::{
    Application, AuditTrail, ErrorCode, Location, LocationDraft, Package, PackageDraft,
    PackageSize, Party, PartyDraft, RecordStatus, SizeTier, UserId, Username,
};
use crate::test_support::MutableClock;

const ACTOR: &str = "ops@example.com";

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
        .single()
        .expect("valid instant")
}

#[fixture]
fn clock() -> Arc<MutableClock> {
    Arc::new(MutableClock::new(start()))
}

#[fixture]
fn identity() -> IdentityContext {
    IdentityContext {
        user_id: UserId::new(7),
        username: Username::new(ACTOR).expect("username"),
        application: Application::new("dispatch-console").expect("application"),
        audience: "delivery-service".to_owned(),
        expires_at: start() + chrono::TimeDelta::hours(1),
    }
}

fn party_draft(id: &str) -> PartyDraft {
    PartyDraft {
        id: id.to_owned(),
        full_name: "Ana Ruiz".to_owned(),
        phone: "+57 300 000 0000".to_owned(),
        email: "ana@example.com".to_owned(),
    }
}

fn location_draft() -> LocationDraft {
    LocationDraft {
        latitude: "4.6097".to_owned(),
        longitude: "-74.0817".to_owned(),
        address: "Calle 1 # 2-3".to_owned(),
        country: "CO".to_owned(),
        zip: "110111".to_owned(),
        reference: "blue door".to_owned(),
    }
}

fn draft(size: &str, weight: i64) -> OrderDraft {
    OrderDraft {
        sender: Some(party_draft("S-1")),
        recipient: Some(party_draft("R-1")),
        origin: Some(location_draft()),
        destination: Some(location_draft()),
        package: Some(PackageDraft {
            size: size.to_owned(),
            quantity: 1,
            weight,
        }),
    }
}

fn tier(code: i32, nickname: &str, threshold: u32) -> SizeTier {
    SizeTier {
        code,
        nickname: nickname.to_owned(),
        threshold,
    }
}

fn stored_order(id: i64, status: OrderStatus, created_at: DateTime<Utc>) -> Order {
    let party = |party_id: &str| Party {
        id: party_id.to_owned(),
        full_name: "Ana Ruiz".to_owned(),
        phone: "+57 300 000 0000".to_owned(),
        email: "ana@example.com".to_owned(),
    };
    let location = Location {
        latitude: "4.6097".to_owned(),
        longitude: "-74.0817".to_owned(),
        address: "Calle 1 # 2-3".to_owned(),
        country: "CO".to_owned(),
        zip: "110111".to_owned(),
        reference: "blue door".to_owned(),
    };
    Order {
        id: OrderId::new(id),
        sender: party("S-1"),
        recipient: party("R-1"),
        origin: location.clone(),
        destination: location,
        package: Package {
            size: PackageSize::Medium,
            quantity: 1,
            weight: 12,
        },
        status,
        audit: AuditTrail {
            created_by: "creator@example.com".to_owned(),
            created_at,
            updated_by: None,
            updated_at: None,
            record_status: RecordStatus::Active,
        },
    }
}

fn service(
    repo: MockOrderRepository,
    catalog: MockPackageSizeCatalog,
    clock: Arc<MutableClock>,
) -> OrderService<MockOrderRepository, MockPackageSizeCatalog> {
    OrderService::new(
        Arc::new(repo),
        Arc::new(catalog),
        clock,
        OrderPolicy {
            max_package_weight: 25,
            refund_window_minutes: 2,
        },
    )
}

fn repo_with(order: Order) -> MockOrderRepository {
    let mut repo = MockOrderRepository::new();
    let id = order.id;
    repo.expect_get_by_id()
        .with(eq(id))
        .times(1)
        .return_once(move |_| Ok(Some(order)));
    repo
}

#[rstest]
#[tokio::test]
async fn create_persists_order_in_created_status(clock: Arc<MutableClock>, identity: IdentityContext) {
    let mut catalog = MockPackageSizeCatalog::new();
    catalog
        .expect_lookup_tier_by_weight()
        .with(eq(12))
        .times(1)
        .return_once(|_| Ok(Some(tier(2, "M", 15))));
    let mut repo = MockOrderRepository::new();
    repo.expect_insert()
        .withf(|order| {
            order.created_by == ACTOR
                && order.created_at == start()
                && order.package.size == PackageSize::Medium
        })
        .times(1)
        .return_once(|_| Ok(OrderId::new(41)));

    let order = service(repo, catalog, clock)
        .create(draft("M", 12), &identity)
        .await
        .expect("order created");

    assert_eq!(order.id, OrderId::new(41));
    assert_eq!(order.status, OrderStatus::Created);
    assert_eq!(order.audit.created_by, ACTOR);
    assert_eq!(order.audit.created_at, start());
    assert!(order.audit.updated_by.is_none());
}

#[rstest]
#[tokio::test]
async fn declared_size_must_match_resolved_tier(clock: Arc<MutableClock>, identity: IdentityContext) {
    let mut catalog = MockPackageSizeCatalog::new();
    catalog
        .expect_lookup_tier_by_weight()
        .with(eq(20))
        .times(1)
        .return_once(|_| Ok(Some(tier(3, "L", 30))));
    let mut repo = MockOrderRepository::new();
    repo.expect_insert().times(0);

    let error = service(repo, catalog, clock)
        .create(draft("M", 20), &identity)
        .await
        .expect_err("size mismatch");

    assert_eq!(error.code(), ErrorCode::SizeMismatch);
    assert_eq!(
        error.details(),
        Some(&serde_json::json!({ "declared": "M", "resolved": "L" }))
    );
}

#[rstest]
#[tokio::test]
async fn uncovered_weight_is_a_size_mismatch(clock: Arc<MutableClock>, identity: IdentityContext) {
    let mut catalog = MockPackageSizeCatalog::new();
    catalog
        .expect_lookup_tier_by_weight()
        .times(1)
        .return_once(|_| Ok(None));
    let mut repo = MockOrderRepository::new();
    repo.expect_insert().times(0);

    let error = service(repo, catalog, clock)
        .create(draft("S", 3), &identity)
        .await
        .expect_err("no tier");

    assert_eq!(error.code(), ErrorCode::SizeMismatch);
}

#[rstest]
#[case(26)]
#[case(1_000)]
#[tokio::test]
async fn overweight_is_rejected_without_catalog_lookup(
    clock: Arc<MutableClock>,
    identity: IdentityContext,
    #[case] weight: i64,
) {
    let mut catalog = MockPackageSizeCatalog::new();
    catalog.expect_lookup_tier_by_weight().times(0);
    let mut repo = MockOrderRepository::new();
    repo.expect_insert().times(0);

    let error = service(repo, catalog, clock)
        .create(draft("L", weight), &identity)
        .await
        .expect_err("oversize");

    assert_eq!(error.code(), ErrorCode::OversizeReject);
}

#[rstest]
#[tokio::test]
async fn weight_at_ceiling_is_accepted(clock: Arc<MutableClock>, identity: IdentityContext) {
    let mut catalog = MockPackageSizeCatalog::new();
    catalog
        .expect_lookup_tier_by_weight()
        .with(eq(25))
        .times(1)
        .return_once(|_| Ok(Some(tier(3, "L", 30))));
    let mut repo = MockOrderRepository::new();
    repo.expect_insert()
        .times(1)
        .return_once(|_| Ok(OrderId::new(2)));

    let order = service(repo, catalog, clock)
        .create(draft("L", 25), &identity)
        .await
        .expect("ceiling is inclusive");
    assert_eq!(order.package.weight, 25);
}

#[rstest]
#[tokio::test]
async fn invalid_draft_fails_before_any_lookup(clock: Arc<MutableClock>, identity: IdentityContext) {
    let mut catalog = MockPackageSizeCatalog::new();
    catalog.expect_lookup_tier_by_weight().times(0);
    let mut repo = MockOrderRepository::new();
    repo.expect_insert().times(0);

    let mut invalid = draft("M", 12);
    invalid.origin = None;
    let error = service(repo, catalog, clock)
        .create(invalid, &identity)
        .await
        .expect_err("validation");

    assert_eq!(error.code(), ErrorCode::ValidationFailed);
    assert_eq!(
        error.details(),
        Some(&serde_json::json!({ "field": "origin", "code": "required" }))
    );
}

#[rstest]
#[tokio::test]
async fn catalog_outage_is_storage_unavailable(clock: Arc<MutableClock>, identity: IdentityContext) {
    let mut catalog = MockPackageSizeCatalog::new();
    catalog
        .expect_lookup_tier_by_weight()
        .times(1)
        .return_once(|_| Err(PackageSizeCatalogError::connection("pool exhausted")));
    let repo = MockOrderRepository::new();

    let error = service(repo, catalog, clock)
        .create(draft("M", 12), &identity)
        .await
        .expect_err("catalog down");

    assert_eq!(error.code(), ErrorCode::StorageUnavailable);
    assert!(error.message().contains("pool exhausted"));
}

#[rstest]
#[tokio::test]
async fn transition_follows_the_graph(clock: Arc<MutableClock>, identity: IdentityContext) {
    for from in OrderStatus::ALL {
        for to in OrderStatus::ALL {
            let mut repo = repo_with(stored_order(5, from, start()));
            let allowed = from.can_transition_to(to);
            repo.expect_update()
                .withf(move |id, update| {
                    *id == OrderId::new(5) && update.status == to && update.updated_by == ACTOR
                })
                .times(usize::from(allowed))
                .returning(|_, _| Ok(true));

            let outcome = service(repo, MockPackageSizeCatalog::new(), clock.clone())
                .transition(OrderId::new(5), to, &identity)
                .await;

            match outcome {
                Ok(order) => {
                    assert!(allowed, "{from:?} -> {to:?} should be rejected");
                    assert_eq!(order.status, to);
                    assert_eq!(order.audit.updated_by.as_deref(), Some(ACTOR));
                    assert_eq!(order.audit.updated_at, Some(start()));
                }
                Err(error) => {
                    assert!(!allowed, "{from:?} -> {to:?} should be accepted");
                    assert_eq!(error.code(), ErrorCode::InvalidTransition);
                }
            }
        }
    }
}

#[rstest]
#[tokio::test]
async fn rejected_transition_names_required_predecessor(
    clock: Arc<MutableClock>,
    identity: IdentityContext,
) {
    let mut repo = repo_with(stored_order(5, OrderStatus::Created, start()));
    repo.expect_update().times(0);

    let error = service(repo, MockPackageSizeCatalog::new(), clock)
        .transition(OrderId::new(5), OrderStatus::EnRoute, &identity)
        .await
        .expect_err("skip ahead");

    assert_eq!(error.code(), ErrorCode::InvalidTransition);
    assert!(error.message().contains("in station"));
    assert_eq!(
        error.details(),
        Some(&serde_json::json!({
            "from": "created",
            "to": "en_route",
            "requiredPredecessors": ["at_station"],
        }))
    );
}

#[rstest]
#[tokio::test]
async fn transition_of_missing_order_is_not_found(
    clock: Arc<MutableClock>,
    identity: IdentityContext,
) {
    let mut repo = MockOrderRepository::new();
    repo.expect_get_by_id().times(1).return_once(|_| Ok(None));

    let error = service(repo, MockPackageSizeCatalog::new(), clock)
        .transition(OrderId::new(99), OrderStatus::Collected, &identity)
        .await
        .expect_err("missing");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[case(OrderStatus::Created, true)]
#[case(OrderStatus::Collected, true)]
#[case(OrderStatus::AtStation, true)]
#[case(OrderStatus::EnRoute, false)]
#[case(OrderStatus::Delivered, false)]
#[case(OrderStatus::Cancelled, false)]
#[tokio::test]
async fn cancel_is_refused_once_dispatched(
    clock: Arc<MutableClock>,
    identity: IdentityContext,
    #[case] status: OrderStatus,
    #[case] cancellable: bool,
) {
    let mut repo = repo_with(stored_order(8, status, start()));
    repo.expect_update()
        .withf(|_, update| update.status == OrderStatus::Cancelled)
        .times(usize::from(cancellable))
        .returning(|_, _| Ok(true));

    let outcome = service(repo, MockPackageSizeCatalog::new(), clock)
        .cancel(OrderId::new(8), false, &identity)
        .await;

    if cancellable {
        let order = outcome.expect("cancelled");
        assert_eq!(order.status, OrderStatus::Cancelled);
    } else {
        let error = outcome.expect_err("terminal");
        assert_eq!(error.code(), ErrorCode::TerminalState);
    }
}

#[rstest]
#[case::fresh(0, true)]
#[case::just_inside(119, true)]
#[case::at_window(120, true)]
#[case::window_plus_partial_minute(179, true)]
#[case::window_plus_one(180, false)]
#[tokio::test]
async fn refund_window_is_whole_minute_inclusive(
    clock: Arc<MutableClock>,
    identity: IdentityContext,
    #[case] elapsed_seconds: i64,
    #[case] allowed: bool,
) {
    let mut repo = repo_with(stored_order(3, OrderStatus::Created, start()));
    repo.expect_update()
        .times(usize::from(allowed))
        .returning(|_, _| Ok(true));
    clock.advance_seconds(elapsed_seconds);

    let outcome = service(repo, MockPackageSizeCatalog::new(), clock)
        .cancel(OrderId::new(3), true, &identity)
        .await;

    if allowed {
        assert_eq!(outcome.expect("refund granted").status, OrderStatus::Cancelled);
    } else {
        let error = outcome.expect_err("window elapsed");
        assert_eq!(error.code(), ErrorCode::RefundWindowExpired);
        assert!(error.message().contains("2 minutes"));
    }
}

#[rstest]
#[tokio::test]
async fn cancel_without_refund_ignores_the_window(
    clock: Arc<MutableClock>,
    identity: IdentityContext,
) {
    let mut repo = repo_with(stored_order(3, OrderStatus::Collected, start()));
    repo.expect_update().times(1).returning(|_, _| Ok(true));
    clock.advance_minutes(60);

    let order = service(repo, MockPackageSizeCatalog::new(), clock)
        .cancel(OrderId::new(3), false, &identity)
        .await
        .expect("cancelled");

    assert_eq!(order.status, OrderStatus::Cancelled);
    assert_eq!(
        order.audit.updated_at,
        Some(start() + chrono::TimeDelta::minutes(60))
    );
}

#[rstest]
#[tokio::test]
async fn update_failure_is_storage_unavailable(clock: Arc<MutableClock>, identity: IdentityContext) {
    let mut repo = repo_with(stored_order(4, OrderStatus::Created, start()));
    repo.expect_update()
        .times(1)
        .return_once(|_, _| Err(OrderRepositoryError::query("deadlock detected")));

    let error = service(repo, MockPackageSizeCatalog::new(), clock)
        .transition(OrderId::new(4), OrderStatus::Collected, &identity)
        .await
        .expect_err("update failed");

    assert_eq!(error.code(), ErrorCode::StorageUnavailable);
}

#[rstest]
#[tokio::test]
async fn order_deactivated_before_update_is_not_found(
    clock: Arc<MutableClock>,
    identity: IdentityContext,
) {
    let mut repo = repo_with(stored_order(4, OrderStatus::Created, start()));
    repo.expect_update().times(1).return_once(|_, _| Ok(false));

    let error = service(repo, MockPackageSizeCatalog::new(), clock)
        .cancel(OrderId::new(4), false, &identity)
        .await
        .expect_err("order vanished");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn get_scoped_to_sender_uses_sender_lookup(clock: Arc<MutableClock>) {
    let mut repo = MockOrderRepository::new();
    repo.expect_get_by_id().times(0);
    repo.expect_get_by_id_and_sender()
        .withf(|id, sender| *id == OrderId::new(6) && sender == "S-1")
        .times(1)
        .return_once(|_, _| Ok(Some(stored_order(6, OrderStatus::Created, start()))));

    let found = service(repo, MockPackageSizeCatalog::new(), clock)
        .get(OrderId::new(6), Some("S-1"))
        .await
        .expect("lookup succeeds");

    assert_eq!(found.map(|order| order.id), Some(OrderId::new(6)));
}

#[rstest]
#[tokio::test]
async fn get_reports_absence_as_none(clock: Arc<MutableClock>) {
    let mut repo = MockOrderRepository::new();
    repo.expect_get_by_id()
        .with(eq(OrderId::new(6)))
        .times(1)
        .return_once(|_| Ok(None));

    let found = service(repo, MockPackageSizeCatalog::new(), clock)
        .get(OrderId::new(6), None)
        .await
        .expect("lookup succeeds");

    assert!(found.is_none());
}

#[rstest]
#[tokio::test]
async fn get_surfaces_connection_failures(clock: Arc<MutableClock>) {
    let mut repo = MockOrderRepository::new();
    repo.expect_get_by_id()
        .times(1)
        .return_once(|_| Err(OrderRepositoryError::connection("refused")));

    let error = service(repo, MockPackageSizeCatalog::new(), clock)
        .get(OrderId::new(6), None)
        .await
        .expect_err("connection failure");

    assert_eq!(error.code(), ErrorCode::StorageUnavailable);
}
