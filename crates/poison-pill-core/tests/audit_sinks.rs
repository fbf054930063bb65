//! Audit sink tests for poison-pill-core.
// crates/poison-pill-core/tests/audit_sinks.rs
// ============================================================================
// Module: Audit Sink Tests
// Description: JSON-lines output of the file audit sink.
// Purpose: Ensure rejection and admission records are appended as JSON lines.
// ============================================================================

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::fs;
use std::sync::Arc;

use poison_pill_core::AdmissionOperation;
use poison_pill_core::AdmissionValidator;
use poison_pill_core::FileAuditSink;
use poison_pill_core::PoisonPillConfig;
use poison_pill_core::TimingDuration;
use serde_json::Value;

#[test]
fn file_sink_appends_one_json_line_per_record() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("audit.jsonl");
    let sink = Arc::new(FileAuditSink::new(&path).unwrap());
    let admission = AdmissionValidator::new(sink).unwrap();

    let mut object = PoisonPillConfig::named("audited", "poison-pill");
    object.spec.peer_dial_timeout = Some(TimingDuration::from_millis(-5));
    let response = admission.review(AdmissionOperation::Create, &object);
    assert!(!response.allowed);

    let contents = fs::read_to_string(&path).unwrap();
    let lines: Vec<Value> =
        contents.lines().map(|line| serde_json::from_str(line).unwrap()).collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["event"], "admission_review");
    assert_eq!(lines[0]["operation"], "create");
    assert_eq!(lines[0]["name"], "audited");
    assert_eq!(lines[1]["event"], "timing_rejection");
    assert_eq!(lines[1]["field"], "PeerDialTimeout");
    assert_eq!(lines[1]["minimum_ms"], 10);
    assert_eq!(lines[1]["observed_ms"], -5);
}

#[test]
fn file_sink_appends_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("audit.jsonl");
    let object = PoisonPillConfig::named("twice", "default");
    for _ in 0 .. 2 {
        let sink = Arc::new(FileAuditSink::new(&path).unwrap());
        AdmissionValidator::new(sink).unwrap().validate_delete(&object);
    }
    assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 2);
}

#[test]
fn file_sink_rejects_unopenable_path() {
    let dir = tempfile::tempdir().unwrap();
    assert!(FileAuditSink::new(dir.path()).is_err());
}
