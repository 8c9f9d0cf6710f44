// src/lib.rs
//! Requirement gate in front of the video-interview feature.
//!
//! Before a candidate may start an interview they must have answered the
//! onboarding chat, completed the DISC test, uploaded a résumé and filled in
//! their LinkedIn profile. [`validation::InterviewValidator`] checks all four,
//! [`gate::InterviewGate`] opens the interview or hands back a
//! [`remediation::RemediationDialog`] that points at whatever is missing.

pub mod access;
pub mod checkers;
pub mod core;
pub mod credentials;
pub mod gate;
pub mod logging;
pub mod remediation;
pub mod session;
pub mod types;
pub mod utils;
pub mod validation;

#[doc(hidden)]
pub use tracing as __tracing;

pub use gate::{GateOutcome, InterviewGate};
pub use remediation::RemediationDialog;
pub use types::{Requirement, RequirementStatus, User, ValidationResult};
pub use validation::InterviewValidator;
