//! Stable identifiers for the built-in risk rules.
//!
//! Rules are identified everywhere by the `id` field of their category;
//! these constants exist so callers never spell the strings twice.

pub const RULE_MISSING_BUILD_INFRASTRUCTURE: &str = "missing-build-infrastructure";
pub const RULE_MISSING_HARDENING: &str = "missing-hardening";
pub const RULE_MISSING_AUTHENTICATION: &str = "missing-authentication";
