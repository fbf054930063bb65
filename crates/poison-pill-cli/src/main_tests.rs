// crates/poison-pill-cli/src/main_tests.rs
// ============================================================================
// Module: CLI Main Helpers Tests
// Description: Unit tests for manifest reads, parsing, and command outcomes.
// Purpose: Ensure CLI inputs fail closed and outcomes map to exit codes.
// Dependencies: poison-pill-cli main helpers, tempfile
// ============================================================================

//! ## Overview
//! Validates bounded manifest reads, manifest parsing, rendering, and the
//! `check` exit code contract.

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

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::CommandFactory;
use clap::Parser;
use poison_pill_core::AdmissionOperation;
use poison_pill_core::AdmissionValidator;
use poison_pill_core::NoopAuditSink;
use poison_pill_core::ThresholdTable;
use poison_pill_core::TimingDuration;
use tempfile::TempDir;

use super::CheckCommand;
use super::Cli;
use super::Commands;
use super::ConfigValidateCommand;
use super::OperationArg;
use super::OutputFormat;
use super::ReadLimitError;
use super::command_check;
use super::command_config_validate;
use super::parse_manifest;
use super::read_bytes_with_limit;
use super::render_check_text;
use super::render_thresholds_text;

// ============================================================================
// SECTION: Helpers
// ============================================================================

const SHORT_INTERVAL_MANIFEST: &str = r"
apiVersion: poison-pill.medik8s.io/v1alpha1
kind: PoisonPillConfig
metadata:
  name: too-eager
  namespace: poison-pill
spec:
  apiCheckInterval: 500ms
";

const VALID_JSON_MANIFEST: &str = r#"{
  "apiVersion": "poison-pill.medik8s.io/v1alpha1",
  "kind": "PoisonPillConfig",
  "metadata": {"name": "poison-pill-config", "namespace": "poison-pill"},
  "spec": {"peerDialTimeout": "10ms", "peerUpdateInterval": "10s"}
}"#;

fn write_file(dir: &TempDir, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write temp file");
    path
}

fn quiet_config(dir: &TempDir) -> PathBuf {
    write_file(dir, "poison-pill-validator.toml", b"[audit]\nsink = \"none\"\n")
}

fn check(manifest: PathBuf, config: PathBuf, operation: OperationArg) -> ExitCode {
    let command = CheckCommand {
        manifest,
        operation,
        config: Some(config),
        format: OutputFormat::Json,
    };
    command_check(&command).expect("check runs")
}

// ============================================================================
// SECTION: Bounded Reads
// ============================================================================

#[test]
fn read_bytes_with_limit_allows_exact_size() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "exact.yaml", &[1_u8; 8]);
    let bytes = read_bytes_with_limit(&path, 8).expect("read within limit");
    assert_eq!(bytes.len(), 8);
}

#[test]
fn read_bytes_with_limit_rejects_oversized_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "large.yaml", &[0_u8; 16]);
    match read_bytes_with_limit(&path, 8) {
        Err(ReadLimitError::TooLarge {
            size,
            limit,
        }) => {
            assert_eq!(size, 16);
            assert_eq!(limit, 8);
        }
        other => panic!("expected size limit error, got {other:?}"),
    }
}

#[test]
fn read_bytes_with_limit_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = read_bytes_with_limit(&dir.path().join("absent.yaml"), 8);
    assert!(matches!(result, Err(ReadLimitError::Io(_))));
}

// ============================================================================
// SECTION: Manifest Parsing
// ============================================================================

#[test]
fn parse_manifest_reads_yaml() {
    let object =
        parse_manifest(Path::new("config.yaml"), SHORT_INTERVAL_MANIFEST.as_bytes()).unwrap();
    assert_eq!(object.metadata.name.as_deref(), Some("too-eager"));
    assert_eq!(object.spec.api_check_interval, Some(TimingDuration::from_millis(500)));
}

#[test]
fn parse_manifest_reads_json_by_extension() {
    let object =
        parse_manifest(Path::new("config.JSON"), VALID_JSON_MANIFEST.as_bytes()).unwrap();
    assert_eq!(object.spec.peer_dial_timeout, Some(TimingDuration::from_millis(10)));
}

#[test]
fn parse_manifest_rejects_bad_duration() {
    let manifest = "spec:\n  apiCheckInterval: soon\n";
    let error = parse_manifest(Path::new("bad.yaml"), manifest.as_bytes()).unwrap_err();
    assert!(error.to_string().contains("bad.yaml"));
}

// ============================================================================
// SECTION: Rendering
// ============================================================================

#[test]
fn render_check_text_reports_rejection_message() {
    let object =
        parse_manifest(Path::new("config.yaml"), SHORT_INTERVAL_MANIFEST.as_bytes()).unwrap();
    let admission = AdmissionValidator::new(Arc::new(NoopAuditSink)).unwrap();
    let response = admission.review(AdmissionOperation::Create, &object);
    assert_eq!(
        render_check_text(&response),
        "create of too-eager rejected: ApiCheckInterval can't be less than 1000ms (time given \
         in milliseconds: 500)"
    );
}

#[test]
fn render_thresholds_text_lists_rules_in_order() {
    let table = ThresholdTable::global().unwrap();
    let text = render_thresholds_text(table);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 7);
    assert_eq!(lines[1], "  PeerApiServerTimeout >= 10ms (10ms)");
    assert_eq!(lines[5], "  ApiCheckInterval >= 1s (1000ms)");
    assert_eq!(lines[6], "  PeerUpdateInterval >= 10s (10000ms)");
}

// ============================================================================
// SECTION: Commands
// ============================================================================

#[test]
fn check_exits_success_when_allowed() {
    let dir = tempfile::tempdir().unwrap();
    let config = quiet_config(&dir);
    let manifest = write_file(&dir, "valid.json", VALID_JSON_MANIFEST.as_bytes());
    assert_eq!(check(manifest, config, OperationArg::Create), ExitCode::SUCCESS);
}

#[test]
fn check_exits_failure_when_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let config = quiet_config(&dir);
    let manifest = write_file(&dir, "eager.yaml", SHORT_INTERVAL_MANIFEST.as_bytes());
    assert_eq!(check(manifest.clone(), config.clone(), OperationArg::Update), ExitCode::FAILURE);
    assert_eq!(check(manifest, config, OperationArg::Delete), ExitCode::SUCCESS);
}

#[test]
fn check_enforces_configured_manifest_limit() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_file(
        &dir,
        "limits.toml",
        b"[audit]\nsink = \"none\"\n[limits]\nmax_manifest_bytes = 1024\n",
    );
    let mut padded = SHORT_INTERVAL_MANIFEST.to_string();
    padded.push_str(&"#".repeat(2048));
    let manifest = write_file(&dir, "padded.yaml", padded.as_bytes());
    let command = CheckCommand {
        manifest,
        operation: OperationArg::Create,
        config: Some(config),
        format: OutputFormat::Text,
    };
    let error = command_check(&command).unwrap_err();
    assert!(error.to_string().contains("limit 1024"));
}

#[test]
fn check_writes_audit_records_to_configured_file() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("audit.jsonl");
    let text = format!("[audit]\nsink = \"file\"\npath = {:?}\n", log.display().to_string());
    let config = write_file(&dir, "file-sink.toml", text.as_bytes());
    let manifest = write_file(&dir, "eager.yaml", SHORT_INTERVAL_MANIFEST.as_bytes());
    assert_eq!(check(manifest, config, OperationArg::Create), ExitCode::FAILURE);
    let contents = fs::read_to_string(&log).unwrap();
    assert_eq!(contents.lines().count(), 2);
    assert!(contents.contains("\"field\":\"ApiCheckInterval\""));
}

#[test]
fn config_validate_reports_invalid_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_file(&dir, "bad.toml", b"[audit]\nsink = \"file\"\n");
    let command = ConfigValidateCommand {
        config: Some(config),
    };
    let error = command_config_validate(&command).unwrap_err();
    assert!(error.to_string().starts_with("Failed to load config"));
}

// ============================================================================
// SECTION: Argument Parsing
// ============================================================================

#[test]
fn cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn check_defaults_to_create_and_text() {
    let cli = Cli::try_parse_from(["poison-pill-validator", "check", "--manifest", "m.yaml"])
        .unwrap();
    match cli.command {
        Some(Commands::Check(command)) => {
            assert_eq!(command.operation, OperationArg::Create);
            assert_eq!(command.format, OutputFormat::Text);
            assert!(command.config.is_none());
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn check_requires_manifest() {
    assert!(Cli::try_parse_from(["poison-pill-validator", "check"]).is_err());
}

#[test]
fn operation_arg_maps_to_admission_operation() {
    assert_eq!(AdmissionOperation::from(OperationArg::Update), AdmissionOperation::Update);
    assert_eq!(AdmissionOperation::from(OperationArg::Delete), AdmissionOperation::Delete);
}
