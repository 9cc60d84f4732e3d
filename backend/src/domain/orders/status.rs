//! Order status and the transition graph.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Lifecycle status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Registered, awaiting pickup.
    Created,
    /// Picked up from the sender.
    Collected,
    /// Received at a distribution station.
    AtStation,
    /// Out for delivery.
    EnRoute,
    /// Handed to the recipient.
    Delivered,
    /// Withdrawn before dispatch.
    Cancelled,
}

use OrderStatus::{AtStation, Cancelled, Collected, Created, Delivered, EnRoute};

/// Every permitted edge, keyed by the current status.
const TRANSITIONS: [(OrderStatus, &[OrderStatus]); 6] = [
    (Created, &[Collected, Cancelled]),
    (Collected, &[AtStation, Cancelled]),
    (AtStation, &[EnRoute, Cancelled]),
    (EnRoute, &[Delivered]),
    (Delivered, &[]),
    (Cancelled, &[]),
];

impl OrderStatus {
    /// All statuses in lifecycle order.
    pub const ALL: [Self; 6] = [Created, Collected, AtStation, EnRoute, Delivered, Cancelled];

    /// Statuses reachable in one step from `self`.
    #[must_use]
    pub fn permitted_targets(self) -> &'static [Self] {
        TRANSITIONS
            .iter()
            .find(|(from, _)| *from == self)
            .map(|(_, targets)| *targets)
            .unwrap_or(&[])
    }

    /// Whether `target` is reachable in one step from `self`.
    #[must_use]
    pub fn can_transition_to(self, target: Self) -> bool {
        self.permitted_targets().contains(&target)
    }

    /// Statuses with an edge into `target`; empty for `created`.
    #[must_use]
    pub fn predecessors_of(target: Self) -> Vec<Self> {
        TRANSITIONS
            .iter()
            .filter(|(_, targets)| targets.contains(&target))
            .map(|(from, _)| *from)
            .collect()
    }

    /// Wire and storage name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Created => "created",
            Collected => "collected",
            AtStation => "at_station",
            EnRoute => "en_route",
            Delivered => "delivered",
            Cancelled => "cancelled",
        }
    }

    /// Human-readable label used in error messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Created => "created",
            Collected => "collected",
            AtStation => "in station",
            EnRoute => "en route",
            Delivered => "delivered",
            Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a stored or supplied status name is unknown.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown order status: {0}")]
pub struct ParseOrderStatusError(pub String);

impl FromStr for OrderStatus {
    type Err = ParseOrderStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseOrderStatusError(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const EDGES: [(OrderStatus, OrderStatus); 7] = [
        (Created, Collected),
        (Collected, AtStation),
        (AtStation, EnRoute),
        (EnRoute, Delivered),
        (Created, Cancelled),
        (Collected, Cancelled),
        (AtStation, Cancelled),
    ];

    #[test]
    fn graph_matches_edge_list_exhaustively() {
        for from in OrderStatus::ALL {
            for to in OrderStatus::ALL {
                let expected = EDGES.contains(&(from, to));
                assert_eq!(
                    from.can_transition_to(to),
                    expected,
                    "{from} -> {to} should be {expected}"
                );
            }
        }
    }

    #[rstest]
    #[case(Created, vec![])]
    #[case(Collected, vec![Created])]
    #[case(AtStation, vec![Collected])]
    #[case(EnRoute, vec![AtStation])]
    #[case(Delivered, vec![EnRoute])]
    #[case(Cancelled, vec![Created, Collected, AtStation])]
    fn predecessors_follow_table(#[case] target: OrderStatus, #[case] expected: Vec<OrderStatus>) {
        assert_eq!(OrderStatus::predecessors_of(target), expected);
    }

    #[rstest]
    #[case(EnRoute)]
    #[case(Delivered)]
    #[case(Cancelled)]
    fn cancellation_unreachable_from_late_states(#[case] from: OrderStatus) {
        assert!(!from.can_transition_to(Cancelled));
    }

    #[test]
    fn names_round_trip() {
        for status in OrderStatus::ALL {
            assert_eq!(status.as_str().parse::<OrderStatus>(), Ok(status));
            let json = serde_json::to_value(status).expect("serialise status");
            assert_eq!(json, serde_json::json!(status.as_str()));
        }
    }

    #[test]
    fn unknown_name_is_rejected() {
        assert_eq!(
            "lost".parse::<OrderStatus>(),
            Err(ParseOrderStatusError("lost".to_owned()))
        );
    }
}
