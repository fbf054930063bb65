// crates/poison-pill-core/src/validator.rs
// ============================================================================
// Module: Timing Validator
// Description: First-violation check of timing fields against safety floors.
// Purpose: Decide accept/reject for a configuration snapshot.
// Dependencies: thiserror, crate::{audit, fields, rules, snapshot}
// ============================================================================

//! ## Overview
//! [`TimingValidator::validate`] walks the threshold table in its fixed order
//! and stops at the first field whose whole-millisecond value is below its
//! floor. Only that violation is reported; callers re-validate after fixing
//! it to discover the next one. Each rejection is handed to the injected
//! audit sink before it is returned. The sink cannot influence the outcome.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use thiserror::Error;

use crate::audit::NoopAuditSink;
use crate::audit::TimingRejectionEvent;
use crate::audit::ValidationAuditSink;
use crate::fields::TimingField;
use crate::rules::ThresholdError;
use crate::rules::ThresholdTable;
use crate::snapshot::ConfigurationSnapshot;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// A timing field was below its floor.
///
/// # Invariants
/// - Exactly one variant per [`TimingField`].
/// - Values are whole milliseconds; `observed_ms` may be negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// `PeerApiServerTimeout` below floor.
    #[error(
        "PeerApiServerTimeout can't be less than {minimum_ms}ms (time given in milliseconds: \
         {observed_ms})"
    )]
    PeerApiServerTimeoutBelowMinimum {
        /// Floor in milliseconds.
        minimum_ms: i64,
        /// Submitted value in milliseconds.
        observed_ms: i64,
    },
    /// `ApiServerTimeout` below floor.
    #[error(
        "ApiServerTimeout can't be less than {minimum_ms}ms (time given in milliseconds: \
         {observed_ms})"
    )]
    ApiServerTimeoutBelowMinimum {
        /// Floor in milliseconds.
        minimum_ms: i64,
        /// Submitted value in milliseconds.
        observed_ms: i64,
    },
    /// `PeerDialTimeout` below floor.
    #[error(
        "PeerDialTimeout can't be less than {minimum_ms}ms (time given in milliseconds: \
         {observed_ms})"
    )]
    PeerDialTimeoutBelowMinimum {
        /// Floor in milliseconds.
        minimum_ms: i64,
        /// Submitted value in milliseconds.
        observed_ms: i64,
    },
    /// `PeerRequestTimeout` below floor.
    #[error(
        "PeerRequestTimeout can't be less than {minimum_ms}ms (time given in milliseconds: \
         {observed_ms})"
    )]
    PeerRequestTimeoutBelowMinimum {
        /// Floor in milliseconds.
        minimum_ms: i64,
        /// Submitted value in milliseconds.
        observed_ms: i64,
    },
    /// `ApiCheckInterval` below floor.
    #[error(
        "ApiCheckInterval can't be less than {minimum_ms}ms (time given in milliseconds: \
         {observed_ms})"
    )]
    ApiCheckIntervalBelowMinimum {
        /// Floor in milliseconds.
        minimum_ms: i64,
        /// Submitted value in milliseconds.
        observed_ms: i64,
    },
    /// `PeerUpdateInterval` below floor.
    #[error(
        "PeerUpdateInterval can't be less than {minimum_ms}ms (time given in milliseconds: \
         {observed_ms})"
    )]
    PeerUpdateIntervalBelowMinimum {
        /// Floor in milliseconds.
        minimum_ms: i64,
        /// Submitted value in milliseconds.
        observed_ms: i64,
    },
}

impl ValidationError {
    /// Builds the error variant belonging to `field`.
    #[must_use]
    pub const fn below_minimum(field: TimingField, minimum_ms: i64, observed_ms: i64) -> Self {
        match field {
            TimingField::PeerApiServerTimeout => Self::PeerApiServerTimeoutBelowMinimum {
                minimum_ms,
                observed_ms,
            },
            TimingField::ApiServerTimeout => Self::ApiServerTimeoutBelowMinimum {
                minimum_ms,
                observed_ms,
            },
            TimingField::PeerDialTimeout => Self::PeerDialTimeoutBelowMinimum {
                minimum_ms,
                observed_ms,
            },
            TimingField::PeerRequestTimeout => Self::PeerRequestTimeoutBelowMinimum {
                minimum_ms,
                observed_ms,
            },
            TimingField::ApiCheckInterval => Self::ApiCheckIntervalBelowMinimum {
                minimum_ms,
                observed_ms,
            },
            TimingField::PeerUpdateInterval => Self::PeerUpdateIntervalBelowMinimum {
                minimum_ms,
                observed_ms,
            },
        }
    }

    /// Returns the field that violated its floor.
    #[must_use]
    pub const fn field(&self) -> TimingField {
        match self {
            Self::PeerApiServerTimeoutBelowMinimum {
                ..
            } => TimingField::PeerApiServerTimeout,
            Self::ApiServerTimeoutBelowMinimum {
                ..
            } => TimingField::ApiServerTimeout,
            Self::PeerDialTimeoutBelowMinimum {
                ..
            } => TimingField::PeerDialTimeout,
            Self::PeerRequestTimeoutBelowMinimum {
                ..
            } => TimingField::PeerRequestTimeout,
            Self::ApiCheckIntervalBelowMinimum {
                ..
            } => TimingField::ApiCheckInterval,
            Self::PeerUpdateIntervalBelowMinimum {
                ..
            } => TimingField::PeerUpdateInterval,
        }
    }

    /// Returns the floor in milliseconds.
    #[must_use]
    pub const fn minimum_ms(&self) -> i64 {
        self.values().0
    }

    /// Returns the submitted value in milliseconds.
    #[must_use]
    pub const fn observed_ms(&self) -> i64 {
        self.values().1
    }

    /// Returns `(minimum_ms, observed_ms)`.
    const fn values(&self) -> (i64, i64) {
        match *self {
            Self::PeerApiServerTimeoutBelowMinimum {
                minimum_ms,
                observed_ms,
            }
            | Self::ApiServerTimeoutBelowMinimum {
                minimum_ms,
                observed_ms,
            }
            | Self::PeerDialTimeoutBelowMinimum {
                minimum_ms,
                observed_ms,
            }
            | Self::PeerRequestTimeoutBelowMinimum {
                minimum_ms,
                observed_ms,
            }
            | Self::ApiCheckIntervalBelowMinimum {
                minimum_ms,
                observed_ms,
            }
            | Self::PeerUpdateIntervalBelowMinimum {
                minimum_ms,
                observed_ms,
            } => (minimum_ms, observed_ms),
        }
    }
}

// ============================================================================
// SECTION: Validator
// ============================================================================

/// Stateless timing floor check.
///
/// # Invariants
/// - Holds only the read-only threshold table and an audit sink handle.
/// - The same snapshot always yields the same result.
#[derive(Clone)]
pub struct TimingValidator {
    /// Process-wide threshold table.
    thresholds: &'static ThresholdTable,
    /// Advisory sink for rejection records.
    audit: Arc<dyn ValidationAuditSink>,
}

impl TimingValidator {
    /// Creates a validator that reports rejections to `audit`.
    ///
    /// # Errors
    ///
    /// Returns [`ThresholdError`] when the built-in floors cannot be parsed.
    pub fn new(audit: Arc<dyn ValidationAuditSink>) -> Result<Self, ThresholdError> {
        Ok(Self {
            thresholds: ThresholdTable::global()?,
            audit,
        })
    }

    /// Creates a validator that discards rejection records.
    ///
    /// # Errors
    ///
    /// Returns [`ThresholdError`] when the built-in floors cannot be parsed.
    pub fn without_audit() -> Result<Self, ThresholdError> {
        Self::new(Arc::new(NoopAuditSink))
    }

    /// Returns the threshold table used by this validator.
    #[must_use]
    pub const fn thresholds(&self) -> &'static ThresholdTable {
        self.thresholds
    }

    /// Checks every timing field against its floor.
    ///
    /// # Errors
    ///
    /// Returns the [`ValidationError`] of the first field, in rule order, whose
    /// value is below its floor.
    pub fn validate(&self, snapshot: &ConfigurationSnapshot) -> Result<(), ValidationError> {
        for rule in self.thresholds.rules() {
            let observed_ms = snapshot.get(rule.field).as_millis();
            if !rule.admits(observed_ms) {
                let error = rule.violation(observed_ms);
                self.audit.record_rejection(&TimingRejectionEvent::new(&error));
                return Err(error);
            }
        }
        Ok(())
    }
}
