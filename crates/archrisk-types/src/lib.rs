//! Stable DTOs and IDs used across the archrisk workspace.
//!
//! This crate is intentionally boring:
//! - sensitivity and severity enumerations with their total orders
//! - risk category metadata and the emitted risk record
//! - stable string IDs for the built-in rules
//! - the severity lookup shared by every rule

#![forbid(unsafe_code)]

pub mod category;
pub mod ids;
pub mod risk;
pub mod sensitivity;

pub use category::{RiskCategory, RiskFunction, Stride};
pub use risk::{
    calculate_severity, DataBreachProbability, Risk, RiskExploitationImpact,
    RiskExploitationLikelihood, RiskSeverity,
};
pub use sensitivity::{Authentication, Confidentiality, Criticality, TechnologyAttribute};
