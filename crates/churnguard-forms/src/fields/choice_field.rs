//! Exact-match choice set for select controls

/// Allowed option values for an enumerated field
///
/// Matching is exact: no trimming and no case folding, the same way a
/// `<select>` reports the `value` attribute of the chosen option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceSet {
	values: Vec<String>,
}

impl ChoiceSet {
	/// Create a choice set from option values
	///
	/// # Examples
	///
	/// ```
	/// use churnguard_forms::fields::ChoiceSet;
	///
	/// let choices = ChoiceSet::new(["one year", "two year"]);
	/// assert!(choices.contains("one year"));
	/// assert!(!choices.contains("One Year"));
	/// ```
	pub fn new<I, S>(values: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			values: values.into_iter().map(Into::into).collect(),
		}
	}

	pub fn contains(&self, value: &str) -> bool {
		self.values.iter().any(|v| v == value)
	}

	pub fn values(&self) -> &[String] {
		&self.values
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_exact_match_only() {
		let choices = ChoiceSet::new(["credit card", "mailed check"]);

		assert!(choices.contains("credit card"));
		assert!(!choices.contains("credit card "));
		assert!(!choices.contains("Credit Card"));
		assert!(!choices.contains(""));
	}

	#[rstest]
	fn test_values_keep_declaration_order() {
		let choices = ChoiceSet::new(["b", "a"]);
		assert_eq!(choices.values(), &["b".to_string(), "a".to_string()]);
	}
}
