//! Field validation against the rule table
//!
//! Validation is a pure decision: it never touches the page. Whether a
//! message is produced depends on `show_all_errors`:
//!
//! - quiet mode (blur/change): `valid` and `reason` are reported, `message`
//!   is always `None`
//! - full-check mode (submit): `message` carries the rule's text for the
//!   failure reason
//!
//! A non-empty enumerated value outside the allowed set is invalid but never
//! messaged in either mode; only emptiness of a select is explained to the
//! user.

use crate::fields::NumberError;
use crate::rules::{FieldRule, RuleKind, RuleTable};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shared text for unparsable numbers, used instead of the rule's messages
pub const INVALID_NUMBER_MESSAGE: &str = "Please enter a valid number";

/// Why a field value failed its rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailureReason {
	Missing,
	Negative,
	OutOfRange,
	InvalidNumber,
	InvalidChoice,
}

impl FailureReason {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Missing => "missing",
			Self::Negative => "negative",
			Self::OutOfRange => "out-of-range",
			Self::InvalidNumber => "invalid-number",
			Self::InvalidChoice => "invalid-choice",
		}
	}
}

impl fmt::Display for FailureReason {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Result of validating one field value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
	pub valid: bool,
	pub reason: Option<FailureReason>,
	pub message: Option<String>,
}

impl ValidationOutcome {
	pub fn valid() -> Self {
		Self {
			valid: true,
			reason: None,
			message: None,
		}
	}

	pub fn invalid(reason: FailureReason, message: Option<String>) -> Self {
		Self {
			valid: false,
			reason: Some(reason),
			message,
		}
	}
}

/// `None`, empty and whitespace-only values all count as blank
pub fn is_blank(raw: Option<&str>) -> bool {
	raw.is_none_or(|value| value.trim().is_empty())
}

/// Validates field values against a [`RuleTable`]
#[derive(Debug, Clone, Copy)]
pub struct FieldValidator<'a> {
	table: &'a RuleTable,
}

impl<'a> FieldValidator<'a> {
	pub fn new(table: &'a RuleTable) -> Self {
		Self { table }
	}

	pub fn table(&self) -> &'a RuleTable {
		self.table
	}

	/// Validate `raw` for the field called `name`
	///
	/// Unknown fields pass through as valid.
	///
	/// # Examples
	///
	/// ```
	/// use churnguard_forms::rules::RuleTable;
	/// use churnguard_forms::validators::{FailureReason, FieldValidator};
	///
	/// let validator = FieldValidator::new(RuleTable::churn());
	///
	/// let outcome = validator.validate("tenure_months", Some(""), true);
	/// assert!(!outcome.valid);
	/// assert_eq!(outcome.reason, Some(FailureReason::Missing));
	/// assert_eq!(outcome.message.as_deref(), Some("Please enter tenure months"));
	///
	/// let quiet = validator.validate("tenure_months", Some(""), false);
	/// assert!(!quiet.valid);
	/// assert!(quiet.message.is_none());
	/// ```
	pub fn validate(
		&self,
		name: &str,
		raw: Option<&str>,
		show_all_errors: bool,
	) -> ValidationOutcome {
		match self.table.get_rule(name) {
			Some(rule) => validate_rule(rule, raw, show_all_errors),
			None => ValidationOutcome::valid(),
		}
	}
}

/// Validate `raw` against a single rule
pub fn validate_rule(
	rule: &FieldRule,
	raw: Option<&str>,
	show_all_errors: bool,
) -> ValidationOutcome {
	let surface = |message: Option<&str>| {
		if show_all_errors {
			message.map(str::to_string)
		} else {
			None
		}
	};

	let value = match raw {
		Some(value) if !is_blank(Some(value)) => value,
		_ if !rule.required => return ValidationOutcome::valid(),
		_ => {
			return ValidationOutcome::invalid(
				FailureReason::Missing,
				surface(Some(&rule.messages.required)),
			);
		}
	};

	match &rule.kind {
		RuleKind::Numeric(range) => match range.check(value) {
			Ok(_) => ValidationOutcome::valid(),
			Err(NumberError::NotANumber) => ValidationOutcome::invalid(
				FailureReason::InvalidNumber,
				surface(Some(INVALID_NUMBER_MESSAGE)),
			),
			Err(NumberError::Negative(_)) => ValidationOutcome::invalid(
				FailureReason::Negative,
				surface(rule.messages.negative.as_deref()),
			),
			Err(NumberError::OutOfRange(_)) => ValidationOutcome::invalid(
				FailureReason::OutOfRange,
				surface(rule.messages.range.as_deref()),
			),
		},
		RuleKind::Choice(choices) => {
			if choices.contains(value) {
				ValidationOutcome::valid()
			} else {
				ValidationOutcome::invalid(FailureReason::InvalidChoice, None)
			}
		}
	}
}
