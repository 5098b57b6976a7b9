//! Rule table for the churn prediction form
//!
//! Every control of the form has exactly one [`FieldRule`]. The table is
//! built once on first use and never mutated afterwards.
//!
//! | field | kind | bounds / values |
//! |-------|------|-----------------|
//! | `tenure_months` | numeric | 1-75 |
//! | `contract_type` | enumerated | month-to-month, one year, two year |
//! | `monthly_charges` | numeric | 19-119 |
//! | `payment_method` | enumerated | electronic check, credit card, bank transfer, mailed check |
//! | `support_ticket_count` | numeric | 0-7 |
//! | `avg_call_minutes` | numeric | 0-275 |
//! | `avg_data_usage_gb` | numeric | 0-30 |

use crate::fields::{ChoiceSet, NumberRange};
use std::sync::LazyLock;

pub const TENURE_MONTHS: &str = "tenure_months";
pub const CONTRACT_TYPE: &str = "contract_type";
pub const MONTHLY_CHARGES: &str = "monthly_charges";
pub const PAYMENT_METHOD: &str = "payment_method";
pub const SUPPORT_TICKET_COUNT: &str = "support_ticket_count";
pub const AVG_CALL_MINUTES: &str = "avg_call_minutes";
pub const AVG_DATA_USAGE_GB: &str = "avg_data_usage_gb";

static CHURN_RULES: LazyLock<RuleTable> = LazyLock::new(|| {
	RuleTable::new(vec![
		FieldRule::numeric(TENURE_MONTHS, NumberRange::new(1.0, 75.0)).with_messages(
			"Please enter tenure months",
			"Tenure cannot be negative",
			"Must be between 1-75 months",
		),
		FieldRule::choice(
			CONTRACT_TYPE,
			ChoiceSet::new(["month-to-month", "one year", "two year"]),
			"Please select a contract type",
		),
		FieldRule::numeric(MONTHLY_CHARGES, NumberRange::new(19.0, 119.0)).with_messages(
			"Please enter monthly charges",
			"Monthly charges cannot be negative",
			"Must be between $19-$119",
		),
		FieldRule::choice(
			PAYMENT_METHOD,
			ChoiceSet::new([
				"electronic check",
				"credit card",
				"bank transfer",
				"mailed check",
			]),
			"Please select a payment method",
		),
		FieldRule::numeric(SUPPORT_TICKET_COUNT, NumberRange::new(0.0, 7.0)).with_messages(
			"Please enter support tickets count",
			"Support tickets cannot be negative",
			"Must be between 0-7 tickets",
		),
		FieldRule::numeric(AVG_CALL_MINUTES, NumberRange::new(0.0, 275.0)).with_messages(
			"Please enter average call minutes",
			"Call minutes cannot be negative",
			"Must be between 0-275 minutes",
		),
		FieldRule::numeric(AVG_DATA_USAGE_GB, NumberRange::new(0.0, 30.0)).with_messages(
			"Please enter average data usage",
			"Data usage cannot be negative",
			"Must be between 0-30 GB",
		),
	])
});

/// Constraint kind of a field
#[derive(Debug, Clone, PartialEq)]
pub enum RuleKind {
	/// Number input with inclusive bounds
	Numeric(NumberRange),
	/// Select control with a fixed option set
	Choice(ChoiceSet),
}

/// User-facing messages of a rule, one per failure reason
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RuleMessages {
	pub required: String,
	pub negative: Option<String>,
	pub range: Option<String>,
}

/// Validation constraints for one form control
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRule {
	/// Control name, also the `{name}_msg` element prefix
	pub name: String,
	pub required: bool,
	pub kind: RuleKind,
	pub messages: RuleMessages,
}

impl FieldRule {
	/// Create a required numeric rule with empty messages
	///
	/// # Examples
	///
	/// ```
	/// use churnguard_forms::fields::NumberRange;
	/// use churnguard_forms::rules::FieldRule;
	///
	/// let rule = FieldRule::numeric("age", NumberRange::new(18.0, 99.0))
	///     .with_messages("Please enter age", "Age cannot be negative", "Must be 18-99");
	/// assert!(rule.required);
	/// assert!(rule.is_numeric());
	/// ```
	pub fn numeric(name: impl Into<String>, range: NumberRange) -> Self {
		Self {
			name: name.into(),
			required: true,
			kind: RuleKind::Numeric(range),
			messages: RuleMessages::default(),
		}
	}

	/// Create a required enumerated rule
	///
	/// Enumerated rules only carry a required message.
	pub fn choice(
		name: impl Into<String>,
		choices: ChoiceSet,
		required_msg: impl Into<String>,
	) -> Self {
		Self {
			name: name.into(),
			required: true,
			kind: RuleKind::Choice(choices),
			messages: RuleMessages {
				required: required_msg.into(),
				negative: None,
				range: None,
			},
		}
	}

	/// Set the required, negative and range messages
	pub fn with_messages(
		mut self,
		required: impl Into<String>,
		negative: impl Into<String>,
		range: impl Into<String>,
	) -> Self {
		self.messages = RuleMessages {
			required: required.into(),
			negative: Some(negative.into()),
			range: Some(range.into()),
		};
		self
	}

	/// Mark the field optional; blank values then pass
	pub fn optional(mut self) -> Self {
		self.required = false;
		self
	}

	pub fn is_numeric(&self) -> bool {
		matches!(self.kind, RuleKind::Numeric(_))
	}

	pub fn is_choice(&self) -> bool {
		matches!(self.kind, RuleKind::Choice(_))
	}
}

/// Ordered lookup of field rules
///
/// Iteration follows declaration order, which is the document order of the
/// form controls.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleTable {
	rules: Vec<FieldRule>,
}

impl RuleTable {
	pub fn new(rules: Vec<FieldRule>) -> Self {
		Self { rules }
	}

	/// The rule table of the churn prediction form
	///
	/// # Examples
	///
	/// ```
	/// use churnguard_forms::rules::RuleTable;
	///
	/// let table = RuleTable::churn();
	/// assert_eq!(table.len(), 7);
	/// assert!(table.get_rule("tenure_months").is_some());
	/// assert!(table.get_rule("customer_id").is_none());
	/// ```
	pub fn churn() -> &'static RuleTable {
		&CHURN_RULES
	}

	pub fn get_rule(&self, name: &str) -> Option<&FieldRule> {
		self.rules.iter().find(|rule| rule.name == name)
	}

	/// Field names in document order
	pub fn field_names(&self) -> impl Iterator<Item = &str> {
		self.rules.iter().map(|rule| rule.name.as_str())
	}

	pub fn iter(&self) -> impl Iterator<Item = &FieldRule> {
		self.rules.iter()
	}

	pub fn len(&self) -> usize {
		self.rules.len()
	}

	pub fn is_empty(&self) -> bool {
		self.rules.is_empty()
	}
}
