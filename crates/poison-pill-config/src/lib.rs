// crates/poison-pill-config/src/lib.rs
// ============================================================================
// Module: Poison Pill Config Library
// Description: Configuration model and validation for the validator process.
// Purpose: Single source of truth for poison-pill-validator.toml semantics.
// Dependencies: poison-pill-core, serde, toml
// ============================================================================

//! ## Overview
//! `poison-pill-config` defines how the validator process is configured:
//! which audit sink receives rejection records and how large a manifest may
//! be. Validation is strict and fails closed.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
