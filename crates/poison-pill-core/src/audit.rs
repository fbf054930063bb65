// crates/poison-pill-core/src/audit.rs
// ============================================================================
// Module: Validation Audit Logging
// Description: Structured audit events for timing rejections and admissions.
// Purpose: Emit JSON-line records through an injected sink.
// Dependencies: serde, serde_json, crate::{admission, fields, resource, validator}
// ============================================================================

//! ## Overview
//! Validators never log through process-wide state. They receive an
//! `Arc<dyn ValidationAuditSink>` and hand it one record per rejection and one
//! per admission review. Sinks swallow their own write failures so the
//! validation outcome is unaffected by the logging pipeline.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

use crate::admission::AdmissionOperation;
use crate::fields::TimingField;
use crate::resource::PoisonPillConfig;
use crate::validator::ValidationError;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Audit record for a rejected timing field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimingRejectionEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Field that violated its floor.
    pub field: TimingField,
    /// Floor in milliseconds.
    pub minimum_ms: i64,
    /// Submitted value in milliseconds.
    pub observed_ms: i64,
    /// Human-readable rejection message.
    pub message: String,
}

impl TimingRejectionEvent {
    /// Creates a rejection record from a validation error.
    #[must_use]
    pub fn new(error: &ValidationError) -> Self {
        Self {
            event: "timing_rejection",
            timestamp_ms: now_ms(),
            field: error.field(),
            minimum_ms: error.minimum_ms(),
            observed_ms: error.observed_ms(),
            message: error.to_string(),
        }
    }
}

/// Audit record for an admission review of a `PoisonPillConfig`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdmissionAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Admission operation under review.
    pub operation: AdmissionOperation,
    /// Object name when present.
    pub name: Option<String>,
    /// Object namespace when present.
    pub namespace: Option<String>,
}

impl AdmissionAuditEvent {
    /// Creates an admission record for `object`.
    #[must_use]
    pub fn new(operation: AdmissionOperation, object: &PoisonPillConfig) -> Self {
        Self {
            event: "admission_review",
            timestamp_ms: now_ms(),
            operation,
            name: object.metadata.name.clone(),
            namespace: object.metadata.namespace.clone(),
        }
    }
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Audit sink for validation events.
pub trait ValidationAuditSink: Send + Sync {
    /// Record a timing rejection.
    fn record_rejection(&self, event: &TimingRejectionEvent);

    /// Record an admission review.
    fn record_admission(&self, _event: &AdmissionAuditEvent) {}
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl ValidationAuditSink for StderrAuditSink {
    fn record_rejection(&self, event: &TimingRejectionEvent) {
        write_stderr(event);
    }

    fn record_admission(&self, event: &AdmissionAuditEvent) {
        write_stderr(event);
    }
}

/// Audit sink that logs JSON lines to a file.
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }

    /// Appends one serialized record.
    fn append<T: Serialize>(&self, event: &T) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

impl ValidationAuditSink for FileAuditSink {
    fn record_rejection(&self, event: &TimingRejectionEvent) {
        self.append(event);
    }

    fn record_admission(&self, event: &AdmissionAuditEvent) {
        self.append(event);
    }
}

/// No-op audit sink.
pub struct NoopAuditSink;

impl ValidationAuditSink for NoopAuditSink {
    fn record_rejection(&self, _event: &TimingRejectionEvent) {}

    fn record_admission(&self, _event: &AdmissionAuditEvent) {}
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns the current wall-clock time in milliseconds since epoch.
fn now_ms() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis()
}

/// Serializes a record as one JSON line on stderr.
fn write_stderr<T: Serialize>(event: &T) {
    if let Ok(payload) = serde_json::to_string(event) {
        let _ = writeln!(std::io::stderr(), "{payload}");
    }
}
