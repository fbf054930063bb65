// crates/poison-pill-cli/tests/i18n.rs
// ============================================================================
// Module: CLI Message Catalog Tests
// Description: Exercises the message catalog and placeholder substitution.
// Purpose: Ensure CLI user-facing strings route through stable catalog helpers.
// Dependencies: poison-pill-cli i18n module and the `t!` macro.
// ============================================================================

//! ## Overview
//! Validates the validator CLI catalog behavior:
//! - Message arguments capture key/value substitutions.
//! - Translation falls back to keys on misses.
//! - The [`t!`](poison_pill_cli::t) macro formats placeholders correctly.

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

use poison_pill_cli::i18n::MessageArg;
use poison_pill_cli::i18n::translate;
use poison_pill_cli::t;

// ============================================================================
// SECTION: Tests
// ============================================================================

/// Confirms message arguments capture key/value pairs.
#[test]
fn message_arg_new_captures_key_and_value() {
    let arg = MessageArg::new("path", "/tmp/manifest.yaml");
    assert_eq!(arg.key, "path");
    assert_eq!(arg.value, "/tmp/manifest.yaml");
}

/// Confirms catalog entries resolve and replace placeholders.
#[test]
fn translate_substitutes_placeholders() {
    let args = vec![MessageArg::new("error", "missing file")];
    let result = translate("config.load_failed", args);
    assert_eq!(result, "Failed to load config: missing file");
}

/// Confirms missing keys fall back to the key string.
#[test]
fn translate_falls_back_to_key() {
    let result = translate("missing.key", Vec::new());
    assert_eq!(result, "missing.key");
}

/// Confirms the t! macro formats named arguments.
#[test]
fn t_macro_formats_message() {
    let rendered = t!("main.version", version = "0.1.0");
    assert_eq!(rendered, "poison-pill-validator 0.1.0");
}

/// Confirms numeric arguments are substituted.
#[test]
fn t_macro_formats_size_limit_message() {
    let rendered = t!(
        "input.read_too_large",
        kind = "manifest",
        path = "big.yaml",
        size = 2048_u64,
        limit = 1024_usize
    );
    assert_eq!(
        rendered,
        "Refusing to read manifest at big.yaml because it is 2048 bytes (limit 1024)."
    );
}

/// Confirms unused arguments leave the template intact.
#[test]
fn t_macro_ignores_unknown_arguments() {
    let rendered = t!("config.validate.ok", extra = "ignored");
    assert_eq!(rendered, "Config valid.");
}
