// crates/poison-pill-core/src/fields.rs
// ============================================================================
// Module: Timing Fields
// Description: Closed set of validated PoisonPillConfig timing fields.
// Purpose: Provide typed field identifiers in fixed rule order.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! [`TimingField`] names the six duration fields that carry a safety floor.
//! The declaration order is the evaluation order of the rule table, so the
//! first variant wins when several fields violate their floors at once.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Serialize;

// ============================================================================
// SECTION: Field Identifiers
// ============================================================================

/// Timing field of a `PoisonPillConfig` spec that is subject to a floor.
///
/// # Invariants
/// - [`TimingField::ALL`] lists every variant in rule evaluation order.
/// - Labels are stable for audit records and error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum TimingField {
    /// Timeout for a peer's call to the API server.
    PeerApiServerTimeout,
    /// Timeout for the agent's own call to the API server.
    ApiServerTimeout,
    /// Timeout for dialing a peer.
    PeerDialTimeout,
    /// Timeout for a request to a peer.
    PeerRequestTimeout,
    /// Interval between API server health checks.
    ApiCheckInterval,
    /// Interval between peer list refreshes.
    PeerUpdateInterval,
}

impl TimingField {
    /// Every timing field in rule evaluation order.
    pub const ALL: [Self; 6] = [
        Self::PeerApiServerTimeout,
        Self::ApiServerTimeout,
        Self::PeerDialTimeout,
        Self::PeerRequestTimeout,
        Self::ApiCheckInterval,
        Self::PeerUpdateInterval,
    ];

    /// Returns the display name used in error messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PeerApiServerTimeout => "PeerApiServerTimeout",
            Self::ApiServerTimeout => "ApiServerTimeout",
            Self::PeerDialTimeout => "PeerDialTimeout",
            Self::PeerRequestTimeout => "PeerRequestTimeout",
            Self::ApiCheckInterval => "ApiCheckInterval",
            Self::PeerUpdateInterval => "PeerUpdateInterval",
        }
    }

    /// Returns the camelCase key used in the resource manifest.
    #[must_use]
    pub const fn json_key(self) -> &'static str {
        match self {
            Self::PeerApiServerTimeout => "peerApiServerTimeout",
            Self::ApiServerTimeout => "apiServerTimeout",
            Self::PeerDialTimeout => "peerDialTimeout",
            Self::PeerRequestTimeout => "peerRequestTimeout",
            Self::ApiCheckInterval => "apiCheckInterval",
            Self::PeerUpdateInterval => "peerUpdateInterval",
        }
    }
}

impl fmt::Display for TimingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
