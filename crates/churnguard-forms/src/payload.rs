//! Form payload encoding
//!
//! The prediction endpoint receives the raw control values as an
//! `application/x-www-form-urlencoded` body, in document order.

use crate::rules::RuleTable;
use thiserror::Error;

/// Content type of an encoded [`FormPayload`]
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Errors raised while encoding a payload
#[derive(Debug, Error)]
pub enum PayloadError {
	#[error("Failed to encode form payload: {0}")]
	Encode(#[from] serde_urlencoded::ser::Error),
}

/// Result type for payload operations
pub type PayloadResult<T> = Result<T, PayloadError>;

/// Ordered `name=value` pairs taken from the form controls
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormPayload {
	pairs: Vec<(String, String)>,
}

impl FormPayload {
	pub fn new() -> Self {
		Self::default()
	}

	/// Collect one value per rule, in document order
	///
	/// Missing values are sent as empty strings, the same way a browser
	/// serializes an untouched control.
	///
	/// # Examples
	///
	/// ```
	/// use churnguard_forms::payload::FormPayload;
	/// use churnguard_forms::rules::RuleTable;
	///
	/// let payload = FormPayload::collect(RuleTable::churn(), |name| {
	///     (name == "tenure_months").then(|| "12".to_string())
	/// });
	/// assert_eq!(payload.len(), 7);
	/// assert_eq!(payload.get("tenure_months"), Some("12"));
	/// assert_eq!(payload.get("contract_type"), Some(""));
	/// ```
	pub fn collect<F>(table: &RuleTable, mut value_of: F) -> Self
	where
		F: FnMut(&str) -> Option<String>,
	{
		let pairs = table
			.field_names()
			.map(|name| (name.to_string(), value_of(name).unwrap_or_default()))
			.collect();
		Self { pairs }
	}

	pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
		self.pairs.push((name.into(), value.into()));
	}

	pub fn get(&self, name: &str) -> Option<&str> {
		self.pairs
			.iter()
			.find(|(key, _)| key == name)
			.map(|(_, value)| value.as_str())
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}

	pub fn len(&self) -> usize {
		self.pairs.len()
	}

	pub fn is_empty(&self) -> bool {
		self.pairs.is_empty()
	}

	/// Encode as a urlencoded request body
	///
	/// # Examples
	///
	/// ```
	/// use churnguard_forms::payload::FormPayload;
	///
	/// let mut payload = FormPayload::new();
	/// payload.push("contract_type", "two year");
	/// payload.push("tenure_months", "48");
	/// assert_eq!(
	///     payload.to_urlencoded().unwrap(),
	///     "contract_type=two+year&tenure_months=48"
	/// );
	/// ```
	pub fn to_urlencoded(&self) -> PayloadResult<String> {
		Ok(serde_urlencoded::to_string(&self.pairs)?)
	}
}

impl<K, V> FromIterator<(K, V)> for FormPayload
where
	K: Into<String>,
	V: Into<String>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self {
			pairs: iter
				.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.collect(),
		}
	}
}
