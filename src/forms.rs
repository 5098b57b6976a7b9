//! Field rules and validation
//!
//! This module provides access to churnguard-forms: the churn rule table,
//! the pure field validator and the form payload encoder.
//!
//! ## Example
//!
//! ```rust
//! use churnguard::forms::{FailureReason, FieldValidator, RuleTable};
//!
//! let validator = FieldValidator::new(RuleTable::churn());
//! let outcome = validator.validate("support_ticket_count", Some("-2"), true);
//! assert_eq!(outcome.reason, Some(FailureReason::Negative));
//! ```

// Re-export all churnguard-forms functionality
pub use churnguard_forms::*;
