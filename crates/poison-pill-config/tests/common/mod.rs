// crates/poison-pill-config/tests/common/mod.rs
// ============================================================================
// Module: Config Test Helpers
// Description: Shared helpers for poison-pill-config validation tests.
// Purpose: Provide fixtures and assertion helpers for config tests.
// Dependencies: poison-pill-config, tempfile
// ============================================================================

//! ## Overview
//! Shared helpers for poison-pill-config integration tests.

#![allow(dead_code, reason = "Not every test binary uses every helper.")]

use std::fs;
use std::path::PathBuf;

use poison_pill_config::ConfigError;
use tempfile::TempDir;

pub type TestResult = Result<(), String>;

/// Asserts that a config result failed with a message containing `needle`.
pub fn assert_invalid<T>(result: Result<T, ConfigError>, needle: &str) -> TestResult {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error {message} did not contain {needle}"))
            }
        }
        Ok(_) => Err("expected invalid config".to_string()),
    }
}

/// Writes `contents` to a config file inside a fresh temp directory.
pub fn write_config(contents: &[u8]) -> Result<(TempDir, PathBuf), String> {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("poison-pill-validator.toml");
    fs::write(&path, contents).map_err(|err| err.to_string())?;
    Ok((dir, path))
}
