//! Inclusive numeric range check for number inputs

/// Why a raw number input was rejected by a [`NumberRange`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumberError {
	/// The text does not parse as a finite number
	NotANumber,
	/// The value is below zero
	Negative(f64),
	/// The value is outside `[min, max]`
	OutOfRange(f64),
}

/// Inclusive `[min, max]` bounds for a numeric field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumberRange {
	pub min: f64,
	pub max: f64,
}

impl NumberRange {
	/// Create a range with inclusive bounds
	///
	/// # Examples
	///
	/// ```
	/// use churnguard_forms::fields::NumberRange;
	///
	/// let range = NumberRange::new(1.0, 75.0);
	/// assert!(range.contains(1.0));
	/// assert!(range.contains(75.0));
	/// assert!(!range.contains(75.5));
	/// ```
	pub fn new(min: f64, max: f64) -> Self {
		Self { min, max }
	}

	/// Whether `value` lies within the bounds
	pub fn contains(&self, value: f64) -> bool {
		value >= self.min && value <= self.max
	}

	/// Parse a trimmed input and check it against the bounds
	///
	/// The negative check runs before the range check, so a value such as
	/// `-1` reports [`NumberError::Negative`] even when `min` is above zero.
	///
	/// # Examples
	///
	/// ```
	/// use churnguard_forms::fields::{NumberError, NumberRange};
	///
	/// let range = NumberRange::new(0.0, 7.0);
	/// assert_eq!(range.check(" 3 "), Ok(3.0));
	/// assert_eq!(range.check("-2"), Err(NumberError::Negative(-2.0)));
	/// assert_eq!(range.check("9"), Err(NumberError::OutOfRange(9.0)));
	/// assert_eq!(range.check("three"), Err(NumberError::NotANumber));
	/// ```
	pub fn check(&self, raw: &str) -> Result<f64, NumberError> {
		let value = raw
			.trim()
			.parse::<f64>()
			.map_err(|_| NumberError::NotANumber)?;

		// "inf" and "NaN" parse but are not usable input
		if !value.is_finite() {
			return Err(NumberError::NotANumber);
		}

		if value < 0.0 {
			return Err(NumberError::Negative(value));
		}

		if !self.contains(value) {
			return Err(NumberError::OutOfRange(value));
		}

		Ok(value)
	}
}
