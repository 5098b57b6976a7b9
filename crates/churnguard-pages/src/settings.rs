//! Controller settings
//!
//! All settings have defaults matching the production page, so an empty
//! TOML document is a valid configuration.
//!
//! ```toml
//! endpoint = "/predict"
//! minimum_duration_ms = 1000
//! fade_in_delay_ms = 50
//! submit_label = "Predict Churn"
//! busy_label = "Processing..."
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Errors raised while loading settings
#[derive(Debug, Error)]
pub enum SettingsError {
	#[error("Failed to parse settings: {0}")]
	Parse(#[from] toml::de::Error),

	#[error("Invalid setting `{field}`: {reason}")]
	Invalid { field: &'static str, reason: String },
}

/// Result type for settings operations
pub type SettingsResult<T> = Result<T, SettingsError>;

/// Settings shared by the submission, reset and DOM layers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerSettings {
	/// Prediction endpoint, absolute or relative to the page origin
	pub endpoint: String,
	/// Minimum time the loading indicators stay visible
	pub minimum_duration_ms: u64,
	/// Delay before the "check another" control fades in on first success
	pub fade_in_delay_ms: u64,
	pub submit_label: String,
	pub busy_label: String,
	/// Select border color before anything is chosen
	pub neutral_border_color: String,
	/// Select border color once an option is chosen
	pub filled_border_color: String,
	/// Height of the reserved results container
	pub reserved_height: String,
	pub reserved_margin: String,
}

impl Default for ControllerSettings {
	fn default() -> Self {
		Self {
			endpoint: "/predict".to_string(),
			minimum_duration_ms: 1000,
			fade_in_delay_ms: 50,
			submit_label: "Predict Churn".to_string(),
			busy_label: "Processing...".to_string(),
			neutral_border_color: "#ddd".to_string(),
			filled_border_color: "#2ecc71".to_string(),
			reserved_height: "60px".to_string(),
			reserved_margin: "10px".to_string(),
		}
	}
}

impl ControllerSettings {
	/// Parse settings from TOML and validate them
	///
	/// # Examples
	///
	/// ```
	/// use churnguard_pages::settings::ControllerSettings;
	///
	/// let settings = ControllerSettings::from_toml_str("minimum_duration_ms = 250").unwrap();
	/// assert_eq!(settings.minimum_duration_ms, 250);
	/// assert_eq!(settings.endpoint, "/predict");
	/// ```
	pub fn from_toml_str(source: &str) -> SettingsResult<Self> {
		let settings: Self = toml::from_str(source)?;
		settings.validate()?;
		Ok(settings)
	}

	pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
		self.endpoint = endpoint.into();
		self
	}

	pub fn with_minimum_duration(mut self, duration: Duration) -> Self {
		self.minimum_duration_ms = duration.as_millis() as u64;
		self
	}

	pub fn with_fade_in_delay(mut self, delay: Duration) -> Self {
		self.fade_in_delay_ms = delay.as_millis() as u64;
		self
	}

	pub fn with_labels(mut self, submit: impl Into<String>, busy: impl Into<String>) -> Self {
		self.submit_label = submit.into();
		self.busy_label = busy.into();
		self
	}

	pub fn minimum_duration(&self) -> Duration {
		Duration::from_millis(self.minimum_duration_ms)
	}

	pub fn fade_in_delay(&self) -> Duration {
		Duration::from_millis(self.fade_in_delay_ms)
	}

	/// Reject settings the page cannot work with
	pub fn validate(&self) -> SettingsResult<()> {
		let required = [
			("endpoint", &self.endpoint),
			("submit_label", &self.submit_label),
			("busy_label", &self.busy_label),
		];
		for (field, value) in required {
			if value.trim().is_empty() {
				return Err(SettingsError::Invalid {
					field,
					reason: "must not be empty".to_string(),
				});
			}
		}
		Ok(())
	}

	/// Resolve a relative endpoint against the page origin
	///
	/// # Examples
	///
	/// ```
	/// use churnguard_pages::settings::ControllerSettings;
	///
	/// let settings = ControllerSettings::default();
	/// assert_eq!(
	///     settings.endpoint_url("https://churn.example.com/"),
	///     "https://churn.example.com/predict"
	/// );
	///
	/// let absolute = settings.with_endpoint("http://localhost:8000/predict");
	/// assert_eq!(absolute.endpoint_url("https://ignored"), "http://localhost:8000/predict");
	/// ```
	pub fn endpoint_url(&self, origin: &str) -> String {
		if self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://") {
			return self.endpoint.clone();
		}
		format!(
			"{}/{}",
			origin.trim_end_matches('/'),
			self.endpoint.trim_start_matches('/')
		)
	}
}
