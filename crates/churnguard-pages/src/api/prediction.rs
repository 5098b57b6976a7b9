//! Prediction wire types and the client seam

use crate::surface::ResultView;
use async_trait::async_trait;
use churnguard_forms::{FormPayload, PayloadError};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Message shown when a failed response carries no usable detail
pub const FALLBACK_ERROR_MESSAGE: &str = "Invalid input";

/// Errors raised while requesting a prediction
#[derive(Debug, Error)]
pub enum PredictError {
	/// The request never produced a response
	#[error("Network error: {0}")]
	Network(String),

	/// The service answered with a non-success status
	#[error("Request failed with status {status}")]
	Status { status: u16, detail: Option<String> },

	/// A success response whose body could not be decoded
	#[error("Malformed response: {0}")]
	Malformed(String),

	#[error(transparent)]
	Encode(#[from] PayloadError),
}

impl PredictError {
	/// Text shown to the user after the `Error: ` prefix
	///
	/// # Examples
	///
	/// ```
	/// use churnguard_pages::api::PredictError;
	///
	/// let err = PredictError::Status { status: 400, detail: None };
	/// assert_eq!(err.user_message(), "Invalid input");
	///
	/// let err = PredictError::Status {
	///     status: 400,
	///     detail: Some("Invalid contract type".to_string()),
	/// };
	/// assert_eq!(err.user_message(), "Invalid contract type");
	/// ```
	pub fn user_message(&self) -> String {
		match self {
			Self::Status { detail, .. } => detail
				.clone()
				.unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string()),
			Self::Network(msg) | Self::Malformed(msg) => msg.clone(),
			Self::Encode(err) => err.to_string(),
		}
	}
}

/// Result type for prediction requests
pub type PredictResult<T> = Result<T, PredictError>;

/// Risk band reported by the service
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RiskLevel {
	Low,
	Medium,
	High,
	/// Any label the page does not know, kept verbatim
	Other(String),
}

impl RiskLevel {
	/// Parse a risk label, ignoring case
	pub fn parse(label: &str) -> Self {
		match label.trim().to_ascii_lowercase().as_str() {
			"low" => Self::Low,
			"medium" => Self::Medium,
			"high" => Self::High,
			_ => Self::Other(label.to_string()),
		}
	}

	/// Badge variant class for this level
	pub fn variant(&self) -> String {
		match self {
			Self::Low => "low".to_string(),
			Self::Medium => "medium".to_string(),
			Self::High => "high".to_string(),
			Self::Other(label) => label.to_lowercase(),
		}
	}
}

impl fmt::Display for RiskLevel {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Low => f.write_str("Low"),
			Self::Medium => f.write_str("Medium"),
			Self::High => f.write_str("High"),
			Self::Other(label) => f.write_str(label),
		}
	}
}

/// Success body of the prediction endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
	/// Churn probability in percent, e.g. `12` or `87.35`
	pub probability: f64,
	pub risk: String,
	pub suggestion: String,
}

impl Prediction {
	/// `"12%"` for a probability of `12`
	pub fn probability_text(&self) -> String {
		format!("{}%", self.probability)
	}

	pub fn risk_level(&self) -> RiskLevel {
		RiskLevel::parse(&self.risk)
	}

	/// Badge variant, the lower-cased risk label
	pub fn risk_variant(&self) -> String {
		self.risk_level().variant()
	}

	pub fn to_view(&self) -> ResultView {
		ResultView {
			probability_text: self.probability_text(),
			risk_text: self.risk.clone(),
			risk_variant: self.risk_variant(),
			suggestion: self.suggestion.clone(),
		}
	}
}

/// Error body of the prediction endpoint
///
/// `detail` is either a plain string or a list of validation entries
/// carrying a `msg` each.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
	#[serde(default)]
	pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
	/// Human-readable detail, if the body carries one
	pub fn message(&self) -> Option<String> {
		match self.detail.as_ref()? {
			serde_json::Value::String(text) if !text.is_empty() => Some(text.clone()),
			serde_json::Value::Array(entries) => entries
				.first()
				.and_then(|entry| entry.get("msg"))
				.and_then(serde_json::Value::as_str)
				.filter(|msg| !msg.is_empty())
				.map(str::to_string),
			_ => None,
		}
	}
}

/// Turn a raw HTTP status and body into a prediction or an error
///
/// # Examples
///
/// ```
/// use churnguard_pages::api::{PredictError, interpret_response};
///
/// let body = r#"{"probability": 12, "risk": "Low", "suggestion": "Keep it up"}"#;
/// let ok = interpret_response(200, body).unwrap();
/// assert_eq!(ok.probability_text(), "12%");
///
/// let err = interpret_response(400, r#"{"detail": "Invalid contract type"}"#).unwrap_err();
/// assert_eq!(err.user_message(), "Invalid contract type");
/// ```
pub fn interpret_response(status: u16, body: &str) -> PredictResult<Prediction> {
	if (200..300).contains(&status) {
		return serde_json::from_str(body).map_err(|e| PredictError::Malformed(e.to_string()));
	}

	let detail = serde_json::from_str::<ErrorBody>(body)
		.ok()
		.and_then(|body| body.message());
	Err(PredictError::Status { status, detail })
}

/// Sends an encoded form to the prediction service
///
/// Futures are not `Send`: the page runs on a single thread.
#[async_trait(?Send)]
pub trait PredictionClient {
	async fn predict(&self, payload: &FormPayload) -> PredictResult<Prediction>;
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(12.0, "12%")]
	#[case(87.35, "87.35%")]
	#[case(0.0, "0%")]
	fn test_probability_text(#[case] probability: f64, #[case] expected: &str) {
		let prediction = Prediction {
			probability,
			risk: "LOW".to_string(),
			suggestion: String::new(),
		};
		assert_eq!(prediction.probability_text(), expected);
	}

	#[rstest]
	#[case("LOW", RiskLevel::Low)]
	#[case("Medium", RiskLevel::Medium)]
	#[case("high", RiskLevel::High)]
	#[case("Critical", RiskLevel::Other("Critical".to_string()))]
	fn test_risk_level_parse(#[case] label: &str, #[case] expected: RiskLevel) {
		assert_eq!(RiskLevel::parse(label), expected);
	}

	#[rstest]
	fn test_unknown_risk_variant_is_lowercased() {
		assert_eq!(RiskLevel::parse("Very High").variant(), "very high");
	}

	#[rstest]
	fn test_to_view() {
		let prediction = Prediction {
			probability: 64.2,
			risk: "HIGH".to_string(),
			suggestion: "Offer a retention discount".to_string(),
		};
		let view = prediction.to_view();
		assert_eq!(view.probability_text, "64.2%");
		assert_eq!(view.risk_text, "HIGH");
		assert_eq!(view.risk_variant, "high");
		assert_eq!(view.suggestion, "Offer a retention discount");
	}

	#[rstest]
	fn test_success_with_extra_fields() {
		let body = r#"{"probability": 5.5, "risk": "LOW", "suggestion": "ok", "model": "v2"}"#;
		let prediction = interpret_response(200, body).unwrap();
		assert_eq!(prediction.probability, 5.5);
	}

	#[rstest]
	#[case("not json")]
	#[case(r#"{"probability": "high"}"#)]
	#[case("")]
	fn test_malformed_success_body(#[case] body: &str) {
		let err = interpret_response(200, body).unwrap_err();
		assert!(matches!(err, PredictError::Malformed(_)));
	}

	#[rstest]
	#[case(
		r#"{"detail": "Model not loaded. Please try again later."}"#,
		"Model not loaded. Please try again later."
	)]
	#[case(
		r#"{"detail": [{"loc": ["body", "tenure_months"], "msg": "field required"}]}"#,
		"field required"
	)]
	#[case(r#"{"detail": ""}"#, "Invalid input")]
	#[case(r#"{"detail": 42}"#, "Invalid input")]
	#[case(r#"{}"#, "Invalid input")]
	#[case("<html>Bad Gateway</html>", "Invalid input")]
	fn test_error_detail(#[case] body: &str, #[case] expected: &str) {
		let err = interpret_response(500, body).unwrap_err();
		assert_eq!(err.user_message(), expected);
	}

	#[rstest]
	fn test_error_status_ignores_success_shape() {
		let body = r#"{"probability": 12, "risk": "Low", "suggestion": "..."}"#;
		let err = interpret_response(422, body).unwrap_err();
		assert!(matches!(err, PredictError::Status { status: 422, detail: None }));
	}

	#[rstest]
	fn test_network_message_passes_through() {
		let err = PredictError::Network("Failed to fetch".to_string());
		assert_eq!(err.user_message(), "Failed to fetch");
		assert_eq!(err.to_string(), "Network error: Failed to fetch");
	}
}
