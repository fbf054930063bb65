// crates/poison-pill-core/src/rules.rs
// ============================================================================
// Module: Timing Floor Rules
// Description: Fixed table of timing fields and their minimum durations.
// Purpose: Single source of truth for the safety floors.
// Dependencies: thiserror, crate::{duration, fields, validator}
// ============================================================================

//! ## Overview
//! Floors are written as duration literals and parsed once into whole
//! milliseconds. The parsed [`ThresholdTable`] is cached for the life of the
//! process and never mutated; validators compare against the cached integers.
//!
//! ## Invariants
//! - Rules appear in [`TimingField::ALL`] order.
//! - A malformed literal is reported at construction, never per request.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::OnceLock;

use serde::Serialize;
use thiserror::Error;

use crate::duration::DurationError;
use crate::duration::to_milliseconds;
use crate::fields::TimingField;
use crate::validator::ValidationError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Minimum peer API server timeout.
pub const MIN_DUR_PEER_API_SERVER_TIMEOUT: &str = "10ms";
/// Minimum API server timeout.
pub const MIN_DUR_API_SERVER_TIMEOUT: &str = "10ms";
/// Minimum peer dial timeout.
pub const MIN_DUR_PEER_DIAL_TIMEOUT: &str = "10ms";
/// Minimum peer request timeout.
pub const MIN_DUR_PEER_REQUEST_TIMEOUT: &str = "10ms";
/// Minimum API check interval.
pub const MIN_DUR_API_CHECK_INTERVAL: &str = "1s";
/// Minimum peer update interval.
pub const MIN_DUR_PEER_UPDATE_INTERVAL: &str = "10s";

/// Floor literals in [`TimingField::ALL`] order.
pub const THRESHOLD_LITERALS: [&str; 6] = [
    MIN_DUR_PEER_API_SERVER_TIMEOUT,
    MIN_DUR_API_SERVER_TIMEOUT,
    MIN_DUR_PEER_DIAL_TIMEOUT,
    MIN_DUR_PEER_REQUEST_TIMEOUT,
    MIN_DUR_API_CHECK_INTERVAL,
    MIN_DUR_PEER_UPDATE_INTERVAL,
];

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Raised when a floor literal cannot be materialized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid threshold literal '{literal}' for {field}: {source}")]
pub struct ThresholdError {
    /// Field whose floor failed to parse.
    pub field: TimingField,
    /// Offending literal.
    pub literal: &'static str,
    /// Underlying parse failure.
    pub source: DurationError,
}

// ============================================================================
// SECTION: Rules
// ============================================================================

/// Pairing of a timing field with its minimum duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ValidationRule {
    /// Field checked by this rule.
    pub field: TimingField,
    /// Floor as written in source.
    pub minimum_literal: &'static str,
    /// Floor in whole milliseconds.
    pub minimum_ms: i64,
}

impl ValidationRule {
    /// Materializes a rule from its floor literal.
    ///
    /// # Errors
    ///
    /// Returns [`ThresholdError`] when the literal is malformed.
    pub fn parse(field: TimingField, literal: &'static str) -> Result<Self, ThresholdError> {
        let minimum_ms = to_milliseconds(literal).map_err(|source| ThresholdError {
            field,
            literal,
            source,
        })?;
        Ok(Self {
            field,
            minimum_literal: literal,
            minimum_ms,
        })
    }

    /// Returns true when `observed_ms` satisfies the floor (inclusive).
    #[must_use]
    pub const fn admits(&self, observed_ms: i64) -> bool {
        observed_ms >= self.minimum_ms
    }

    /// Builds the field-specific error for an observed value.
    #[must_use]
    pub const fn violation(&self, observed_ms: i64) -> ValidationError {
        ValidationError::below_minimum(self.field, self.minimum_ms, observed_ms)
    }
}

/// Ordered, read-only set of validation rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThresholdTable {
    /// Rules in evaluation order.
    rules: Vec<ValidationRule>,
}

impl ThresholdTable {
    /// Parses floor literals given in [`TimingField::ALL`] order.
    ///
    /// # Errors
    ///
    /// Returns [`ThresholdError`] for the first malformed literal.
    pub fn from_literals(literals: [&'static str; 6]) -> Result<Self, ThresholdError> {
        let mut rules = Vec::with_capacity(literals.len());
        for (field, literal) in TimingField::ALL.into_iter().zip(literals) {
            rules.push(ValidationRule::parse(field, literal)?);
        }
        Ok(Self {
            rules,
        })
    }

    /// Returns the process-wide table built from [`THRESHOLD_LITERALS`].
    ///
    /// # Errors
    ///
    /// Returns [`ThresholdError`] when a built-in literal is malformed.
    pub fn global() -> Result<&'static Self, ThresholdError> {
        static TABLE: OnceLock<Result<ThresholdTable, ThresholdError>> = OnceLock::new();
        TABLE.get_or_init(|| Self::from_literals(THRESHOLD_LITERALS)).as_ref().map_err(Clone::clone)
    }

    /// Returns the rules in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &[ValidationRule] {
        &self.rules
    }

    /// Returns the floor for `field` in milliseconds.
    #[must_use]
    pub fn minimum_ms(&self, field: TimingField) -> Option<i64> {
        self.rules.iter().find(|rule| rule.field == field).map(|rule| rule.minimum_ms)
    }
}
