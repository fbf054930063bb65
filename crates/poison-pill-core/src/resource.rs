// crates/poison-pill-core/src/resource.rs
// ============================================================================
// Module: PoisonPillConfig Resource
// Description: Serde model of the PoisonPillConfig custom resource.
// Purpose: Deserialize manifests and apply field defaults before validation.
// Dependencies: serde, crate::{duration, snapshot}
// ============================================================================

//! ## Overview
//! The resource model mirrors the `poison-pill.medik8s.io/v1alpha1` schema.
//! Every spec field is optional on the wire; [`PoisonPillConfigSpec::snapshot`]
//! and [`PoisonPillConfigSpec::resolved`] fill absent values with the schema
//! defaults so the timing validator never sees a missing field.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::duration::TimingDuration;
use crate::snapshot::ConfigurationSnapshot;
use crate::snapshot::DEFAULT_API_CHECK_INTERVAL;
use crate::snapshot::DEFAULT_API_SERVER_TIMEOUT;
use crate::snapshot::DEFAULT_PEER_API_SERVER_TIMEOUT;
use crate::snapshot::DEFAULT_PEER_DIAL_TIMEOUT;
use crate::snapshot::DEFAULT_PEER_REQUEST_TIMEOUT;
use crate::snapshot::DEFAULT_PEER_UPDATE_INTERVAL;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// API group/version served by the validator.
pub const API_VERSION: &str = "poison-pill.medik8s.io/v1alpha1";
/// Resource kind served by the validator.
pub const KIND: &str = "PoisonPillConfig";
/// Default watchdog device path.
pub const DEFAULT_WATCHDOG_FILE_PATH: &str = "/dev/watchdog";
/// Default time after which an unreachable node is assumed rebooted.
pub const DEFAULT_SAFE_TIME_TO_ASSUME_NODE_REBOOTED_SECONDS: u64 = 180;
/// Default number of consecutive API errors tolerated before peer checks.
pub const DEFAULT_MAX_API_ERROR_THRESHOLD: u32 = 3;
/// Default software reboot toggle.
pub const DEFAULT_IS_SOFTWARE_REBOOT_ENABLED: bool = true;

// ============================================================================
// SECTION: Resource Types
// ============================================================================

/// `PoisonPillConfig` custom resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoisonPillConfig {
    /// API group/version of the object.
    #[serde(default)]
    pub api_version: Option<String>,
    /// Resource kind of the object.
    #[serde(default)]
    pub kind: Option<String>,
    /// Object metadata.
    #[serde(default)]
    pub metadata: ObjectMeta,
    /// Desired configuration.
    #[serde(default)]
    pub spec: PoisonPillConfigSpec,
}

impl PoisonPillConfig {
    /// Creates an object with the given name and namespace and an empty spec.
    #[must_use]
    pub fn named(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            api_version: Some(API_VERSION.to_string()),
            kind: Some(KIND.to_string()),
            metadata: ObjectMeta {
                name: Some(name.into()),
                namespace: Some(namespace.into()),
            },
            spec: PoisonPillConfigSpec::default(),
        }
    }

    /// Returns the timing snapshot of this object with defaults applied.
    #[must_use]
    pub fn snapshot(&self) -> ConfigurationSnapshot {
        self.spec.snapshot()
    }
}

/// Subset of object metadata relevant to admission logging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMeta {
    /// Object name.
    #[serde(default)]
    pub name: Option<String>,
    /// Object namespace.
    #[serde(default)]
    pub namespace: Option<String>,
}

/// `PoisonPillConfig` spec as submitted; every field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoisonPillConfigSpec {
    /// Path to the watchdog device.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watchdog_file_path: Option<String>,
    /// Seconds after which an unreachable node is assumed rebooted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safe_time_to_assume_node_rebooted_seconds: Option<u64>,
    /// Timeout for a peer's call to the API server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peer_api_server_timeout: Option<TimingDuration>,
    /// Timeout for the agent's own call to the API server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_server_timeout: Option<TimingDuration>,
    /// Timeout for dialing a peer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peer_dial_timeout: Option<TimingDuration>,
    /// Timeout for a request to a peer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peer_request_timeout: Option<TimingDuration>,
    /// Interval between API server health checks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_check_interval: Option<TimingDuration>,
    /// Interval between peer list refreshes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peer_update_interval: Option<TimingDuration>,
    /// Consecutive API errors tolerated before falling back to peers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_api_error_threshold: Option<u32>,
    /// Whether software reboot is allowed when no watchdog is present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_software_reboot_enabled: Option<bool>,
}

impl PoisonPillConfigSpec {
    /// Returns the timing snapshot with absent fields defaulted.
    #[must_use]
    pub fn snapshot(&self) -> ConfigurationSnapshot {
        ConfigurationSnapshot {
            peer_api_server_timeout: self
                .peer_api_server_timeout
                .unwrap_or(DEFAULT_PEER_API_SERVER_TIMEOUT),
            api_server_timeout: self.api_server_timeout.unwrap_or(DEFAULT_API_SERVER_TIMEOUT),
            peer_dial_timeout: self.peer_dial_timeout.unwrap_or(DEFAULT_PEER_DIAL_TIMEOUT),
            peer_request_timeout: self.peer_request_timeout.unwrap_or(DEFAULT_PEER_REQUEST_TIMEOUT),
            api_check_interval: self.api_check_interval.unwrap_or(DEFAULT_API_CHECK_INTERVAL),
            peer_update_interval: self.peer_update_interval.unwrap_or(DEFAULT_PEER_UPDATE_INTERVAL),
        }
    }

    /// Returns the spec with every field populated.
    #[must_use]
    pub fn resolved(&self) -> ResolvedSpec {
        ResolvedSpec {
            watchdog_file_path: self
                .watchdog_file_path
                .clone()
                .unwrap_or_else(|| DEFAULT_WATCHDOG_FILE_PATH.to_string()),
            safe_time_to_assume_node_rebooted_seconds: self
                .safe_time_to_assume_node_rebooted_seconds
                .unwrap_or(DEFAULT_SAFE_TIME_TO_ASSUME_NODE_REBOOTED_SECONDS),
            timing: self.snapshot(),
            max_api_error_threshold: self
                .max_api_error_threshold
                .unwrap_or(DEFAULT_MAX_API_ERROR_THRESHOLD),
            is_software_reboot_enabled: self
                .is_software_reboot_enabled
                .unwrap_or(DEFAULT_IS_SOFTWARE_REBOOT_ENABLED),
        }
    }
}

/// Spec with schema defaults applied to every absent field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedSpec {
    /// Path to the watchdog device.
    pub watchdog_file_path: String,
    /// Seconds after which an unreachable node is assumed rebooted.
    pub safe_time_to_assume_node_rebooted_seconds: u64,
    /// Timing fields subject to safety floors.
    #[serde(flatten)]
    pub timing: ConfigurationSnapshot,
    /// Consecutive API errors tolerated before falling back to peers.
    pub max_api_error_threshold: u32,
    /// Whether software reboot is allowed when no watchdog is present.
    pub is_software_reboot_enabled: bool,
}
