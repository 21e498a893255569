//! Behavioral tests for the console core
//!
//! Tests are organized by topic:
//! - `panel` - slot ownership, route-change and teardown closure
//! - `intro` - onboarding guard decisions, including the full decision table
//! - `effects` - commit-phase ordering

mod intro;
mod panel;
