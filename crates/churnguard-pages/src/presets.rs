//! Example customers for a quick check
//!
//! Each [`Scenario`] writes a complete, valid value set into the form and
//! replays the quiet feedback pass so the borders match the new values. No
//! request is sent.

use crate::feedback::FeedbackController;
use crate::surface::{FormSurface, SurfaceResult};
use churnguard_forms::FormPayload;
use churnguard_forms::rules::{
	AVG_CALL_MINUTES, AVG_DATA_USAGE_GB, CONTRACT_TYPE, MONTHLY_CHARGES, PAYMENT_METHOD,
	SUPPORT_TICKET_COUNT, TENURE_MONTHS,
};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown scenario: {0}")]
pub struct UnknownScenario(pub String);

/// Preset customer profiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scenario {
	Low,
	Medium,
	High,
}

impl Scenario {
	pub const ALL: [Scenario; 3] = [Scenario::Low, Scenario::Medium, Scenario::High];

	pub fn name(&self) -> &'static str {
		match self {
			Self::Low => "low",
			Self::Medium => "medium",
			Self::High => "high",
		}
	}

	/// Field values in document order
	pub fn values(&self) -> [(&'static str, &'static str); 7] {
		let (tenure, contract, monthly, payment, tickets, minutes, data) = match self {
			Self::Low => ("48", "two year", "45", "credit card", "1", "275", "30"),
			Self::Medium => ("20", "one year", "100", "bank transfer", "1", "250", "25"),
			Self::High => ("7", "month-to-month", "110", "electronic check", "2", "100", "10"),
		};
		[
			(TENURE_MONTHS, tenure),
			(CONTRACT_TYPE, contract),
			(MONTHLY_CHARGES, monthly),
			(PAYMENT_METHOD, payment),
			(SUPPORT_TICKET_COUNT, tickets),
			(AVG_CALL_MINUTES, minutes),
			(AVG_DATA_USAGE_GB, data),
		]
	}

	/// The request body this scenario produces when submitted
	///
	/// # Examples
	///
	/// ```
	/// use churnguard_pages::presets::Scenario;
	///
	/// let body = Scenario::Low.payload().to_urlencoded().unwrap();
	/// assert!(body.starts_with("tenure_months=48&contract_type=two+year"));
	/// ```
	pub fn payload(&self) -> FormPayload {
		self.values().into_iter().collect()
	}

	/// Write the values and refresh the quiet feedback
	pub fn apply<S>(&self, feedback: &FeedbackController<'_>, surface: &mut S) -> SurfaceResult<()>
	where
		S: FormSurface + ?Sized,
	{
		for (field, value) in self.values() {
			surface.set_field_value(field, value)?;
		}
		feedback.trigger_quiet_pass(surface)
	}
}

impl fmt::Display for Scenario {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

impl FromStr for Scenario {
	type Err = UnknownScenario;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|scenario| scenario.name().eq_ignore_ascii_case(s.trim()))
			.ok_or_else(|| UnknownScenario(s.to_string()))
	}
}
