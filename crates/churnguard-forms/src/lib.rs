//! Form rules and validation for ChurnGuard
//!
//! This crate holds the part of the prediction form that has no page
//! dependency:
//! - The rule table describing every form control
//! - The field validator producing a [`ValidationOutcome`] per value
//! - Payload encoding for the prediction endpoint

pub mod fields;
pub mod payload;
pub mod rules;
pub mod validators;

pub use fields::{ChoiceSet, NumberError, NumberRange};
pub use payload::{FORM_CONTENT_TYPE, FormPayload, PayloadError, PayloadResult};
pub use rules::{FieldRule, RuleKind, RuleMessages, RuleTable};
pub use validators::{
	FailureReason, FieldValidator, INVALID_NUMBER_MESSAGE, ValidationOutcome, is_blank,
	validate_rule,
};
