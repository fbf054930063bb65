// crates/poison-pill-core/src/admission.rs
// ============================================================================
// Module: Admission Validation
// Description: Create/update/delete entry points for PoisonPillConfig objects.
// Purpose: Map admission operations onto the timing validator.
// Dependencies: serde, crate::{audit, resource, rules, validator}
// ============================================================================

//! ## Overview
//! [`AdmissionValidator`] is what an admission pipeline calls for each
//! `PoisonPillConfig` request. Create and update run the timing floors on the
//! submitted object with defaults applied; delete is always allowed and never
//! touches the floors. Each call records an [`AdmissionAuditEvent`] first.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;

use crate::audit::AdmissionAuditEvent;
use crate::audit::ValidationAuditSink;
use crate::fields::TimingField;
use crate::resource::PoisonPillConfig;
use crate::rules::ThresholdError;
use crate::validator::TimingValidator;
use crate::validator::ValidationError;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Admission operation on a `PoisonPillConfig`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdmissionOperation {
    /// Object creation.
    Create,
    /// Object update.
    Update,
    /// Object deletion.
    Delete,
}

impl AdmissionOperation {
    /// Returns a stable label for the operation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

/// Details of a rejected timing field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Field that violated its floor.
    pub field: TimingField,
    /// Floor in milliseconds.
    pub minimum_ms: i64,
    /// Submitted value in milliseconds.
    pub observed_ms: i64,
}

impl From<&ValidationError> for Violation {
    fn from(error: &ValidationError) -> Self {
        Self {
            field: error.field(),
            minimum_ms: error.minimum_ms(),
            observed_ms: error.observed_ms(),
        }
    }
}

/// Outcome of an admission review.
///
/// # Invariants
/// - `message` and `violation` are `Some` exactly when `allowed` is false.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdmissionResponse {
    /// Operation that was reviewed.
    pub operation: AdmissionOperation,
    /// Object name when present.
    pub name: Option<String>,
    /// Whether the request may proceed.
    pub allowed: bool,
    /// Rejection message surfaced to the requester.
    pub message: Option<String>,
    /// Structured rejection details.
    pub violation: Option<Violation>,
}

// ============================================================================
// SECTION: Validator
// ============================================================================

/// Admission entry points for `PoisonPillConfig` objects.
#[derive(Clone)]
pub struct AdmissionValidator {
    /// Timing floor check shared by create and update.
    timing: TimingValidator,
    /// Sink for admission review records.
    audit: Arc<dyn ValidationAuditSink>,
}

impl AdmissionValidator {
    /// Creates an admission validator that reports to `audit`.
    ///
    /// # Errors
    ///
    /// Returns [`ThresholdError`] when the built-in floors cannot be parsed.
    pub fn new(audit: Arc<dyn ValidationAuditSink>) -> Result<Self, ThresholdError> {
        Ok(Self {
            timing: TimingValidator::new(Arc::clone(&audit))?,
            audit,
        })
    }

    /// Returns the underlying timing validator.
    #[must_use]
    pub const fn timing(&self) -> &TimingValidator {
        &self.timing
    }

    /// Validates a newly created object.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found on the object.
    pub fn validate_create(&self, object: &PoisonPillConfig) -> Result<(), ValidationError> {
        self.audit.record_admission(&AdmissionAuditEvent::new(AdmissionOperation::Create, object));
        self.timing.validate(&object.snapshot())
    }

    /// Validates the new state of an updated object.
    ///
    /// The previous state does not participate; floors apply to the result.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found on the object.
    pub fn validate_update(&self, object: &PoisonPillConfig) -> Result<(), ValidationError> {
        self.audit.record_admission(&AdmissionAuditEvent::new(AdmissionOperation::Update, object));
        self.timing.validate(&object.snapshot())
    }

    /// Accepts a deletion; timing floors do not apply.
    pub fn validate_delete(&self, object: &PoisonPillConfig) {
        self.audit.record_admission(&AdmissionAuditEvent::new(AdmissionOperation::Delete, object));
    }

    /// Reviews `object` for `operation` and builds the admission outcome.
    #[must_use]
    pub fn review(
        &self,
        operation: AdmissionOperation,
        object: &PoisonPillConfig,
    ) -> AdmissionResponse {
        let result = match operation {
            AdmissionOperation::Create => self.validate_create(object),
            AdmissionOperation::Update => self.validate_update(object),
            AdmissionOperation::Delete => {
                self.validate_delete(object);
                Ok(())
            }
        };
        let name = object.metadata.name.clone();
        match result {
            Ok(()) => AdmissionResponse {
                operation,
                name,
                allowed: true,
                message: None,
                violation: None,
            },
            Err(error) => AdmissionResponse {
                operation,
                name,
                allowed: false,
                message: Some(error.to_string()),
                violation: Some(Violation::from(&error)),
            },
        }
    }
}
