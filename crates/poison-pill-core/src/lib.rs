// crates/poison-pill-core/src/lib.rs
// ============================================================================
// Module: Poison Pill Core Library
// Description: Public API surface for PoisonPillConfig timing validation.
// Purpose: Expose the resource model, timing floors, validators, and sinks.
// Dependencies: crate::{admission, audit, duration, fields, resource, rules,
//               snapshot, validator}
// ============================================================================

//! ## Overview
//! `poison-pill-core` decides whether a `PoisonPillConfig` may be admitted.
//! Six timing fields each carry a hard floor; the first field below its floor
//! rejects the object. The crate holds no mutable global state: thresholds
//! are parsed once into a read-only table and logging goes through an
//! injected [`ValidationAuditSink`].

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod admission;
pub mod audit;
pub mod duration;
pub mod fields;
pub mod resource;
pub mod rules;
pub mod snapshot;
pub mod validator;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use admission::AdmissionOperation;
pub use admission::AdmissionResponse;
pub use admission::AdmissionValidator;
pub use admission::Violation;
pub use audit::AdmissionAuditEvent;
pub use audit::FileAuditSink;
pub use audit::NoopAuditSink;
pub use audit::StderrAuditSink;
pub use audit::TimingRejectionEvent;
pub use audit::ValidationAuditSink;
pub use duration::DurationError;
pub use duration::TimingDuration;
pub use duration::to_milliseconds;
pub use fields::TimingField;
pub use resource::ObjectMeta;
pub use resource::PoisonPillConfig;
pub use resource::PoisonPillConfigSpec;
pub use resource::ResolvedSpec;
pub use rules::ThresholdError;
pub use rules::ThresholdTable;
pub use rules::ValidationRule;
pub use snapshot::ConfigurationSnapshot;
pub use validator::TimingValidator;
pub use validator::ValidationError;
