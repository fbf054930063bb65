// crates/poison-pill-core/src/snapshot.rs
// ============================================================================
// Module: Configuration Snapshot
// Description: Immutable view of the timing fields under validation.
// Purpose: Give the timing validator a fully populated, typed input.
// Dependencies: crate::{duration, fields}
// ============================================================================

//! ## Overview
//! A [`ConfigurationSnapshot`] holds all six timing durations after defaults
//! have been applied. It is built per admission request, read once, and
//! dropped. Fields are addressed through [`TimingField`] rather than by name.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;

use crate::duration::TimingDuration;
use crate::fields::TimingField;

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Default peer API server timeout (5s).
pub const DEFAULT_PEER_API_SERVER_TIMEOUT: TimingDuration = TimingDuration::from_secs(5);
/// Default API server timeout (5s).
pub const DEFAULT_API_SERVER_TIMEOUT: TimingDuration = TimingDuration::from_secs(5);
/// Default peer dial timeout (5s).
pub const DEFAULT_PEER_DIAL_TIMEOUT: TimingDuration = TimingDuration::from_secs(5);
/// Default peer request timeout (5s).
pub const DEFAULT_PEER_REQUEST_TIMEOUT: TimingDuration = TimingDuration::from_secs(5);
/// Default API check interval (15s).
pub const DEFAULT_API_CHECK_INTERVAL: TimingDuration = TimingDuration::from_secs(15);
/// Default peer update interval (15m).
pub const DEFAULT_PEER_UPDATE_INTERVAL: TimingDuration = TimingDuration::from_mins(15);

// ============================================================================
// SECTION: Snapshot
// ============================================================================

/// Timing values of a single configuration object.
///
/// # Invariants
/// - Every field is populated; absent manifest values are defaulted upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationSnapshot {
    /// Peer API server timeout.
    pub peer_api_server_timeout: TimingDuration,
    /// API server timeout.
    pub api_server_timeout: TimingDuration,
    /// Peer dial timeout.
    pub peer_dial_timeout: TimingDuration,
    /// Peer request timeout.
    pub peer_request_timeout: TimingDuration,
    /// API check interval.
    pub api_check_interval: TimingDuration,
    /// Peer update interval.
    pub peer_update_interval: TimingDuration,
}

impl ConfigurationSnapshot {
    /// Returns the value of `field`.
    #[must_use]
    pub const fn get(&self, field: TimingField) -> TimingDuration {
        match field {
            TimingField::PeerApiServerTimeout => self.peer_api_server_timeout,
            TimingField::ApiServerTimeout => self.api_server_timeout,
            TimingField::PeerDialTimeout => self.peer_dial_timeout,
            TimingField::PeerRequestTimeout => self.peer_request_timeout,
            TimingField::ApiCheckInterval => self.api_check_interval,
            TimingField::PeerUpdateInterval => self.peer_update_interval,
        }
    }

    /// Replaces the value of `field` in place.
    pub const fn set(&mut self, field: TimingField, value: TimingDuration) {
        let slot = match field {
            TimingField::PeerApiServerTimeout => &mut self.peer_api_server_timeout,
            TimingField::ApiServerTimeout => &mut self.api_server_timeout,
            TimingField::PeerDialTimeout => &mut self.peer_dial_timeout,
            TimingField::PeerRequestTimeout => &mut self.peer_request_timeout,
            TimingField::ApiCheckInterval => &mut self.api_check_interval,
            TimingField::PeerUpdateInterval => &mut self.peer_update_interval,
        };
        *slot = value;
    }

    /// Returns a copy with `field` replaced by `value`.
    #[must_use]
    pub const fn with(mut self, field: TimingField, value: TimingDuration) -> Self {
        self.set(field, value);
        self
    }
}

impl Default for ConfigurationSnapshot {
    fn default() -> Self {
        Self {
            peer_api_server_timeout: DEFAULT_PEER_API_SERVER_TIMEOUT,
            api_server_timeout: DEFAULT_API_SERVER_TIMEOUT,
            peer_dial_timeout: DEFAULT_PEER_DIAL_TIMEOUT,
            peer_request_timeout: DEFAULT_PEER_REQUEST_TIMEOUT,
            api_check_interval: DEFAULT_API_CHECK_INTERVAL,
            peer_update_interval: DEFAULT_PEER_UPDATE_INTERVAL,
        }
    }
}
