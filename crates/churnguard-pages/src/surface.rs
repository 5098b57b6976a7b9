//! Rendering surface of the prediction page
//!
//! [`FormSurface`] is the capability interface between the controllers and
//! whatever displays the form. The wasm32 host implements it over the DOM
//! (`dom::DomSurface`); [`crate::testing::MemorySurface`] implements it in
//! memory for tests and headless use.
//!
//! ## DOM contract
//!
//! | item | element id / class |
//! |------|--------------------|
//! | form | `churnForm` |
//! | field message | `{field}_msg`, classes `validation-message` and `error` |
//! | field border | classes `valid-border`, `error-border` |
//! | page loading overlay | `bodyLoading` (class `active`) |
//! | error box | `errorBox` |
//! | result heading / loading / result box | `resultHeading`, `loading`, `resultBox` |
//! | reserved container | `buttonContainer` |
//! | "check another" control | `checkAnotherBtn` |
//! | submit control | `predictBtn` |
//! | result values | `probText`, `riskText` (class `risk-badge {variant}`), `suggestionText` |

use thiserror::Error;

pub const FORM_ID: &str = "churnForm";
pub const SUBMIT_BUTTON_ID: &str = "predictBtn";
pub const CONTAINER_ID: &str = "buttonContainer";
pub const CHECK_ANOTHER_ID: &str = "checkAnotherBtn";
pub const PROBABILITY_ID: &str = "probText";
pub const RISK_ID: &str = "riskText";
pub const SUGGESTION_ID: &str = "suggestionText";

pub const MESSAGE_CLASS: &str = "validation-message";
pub const MESSAGE_ERROR_CLASS: &str = "error";
pub const VALID_BORDER_CLASS: &str = "valid-border";
pub const ERROR_BORDER_CLASS: &str = "error-border";
pub const RISK_BADGE_CLASS: &str = "risk-badge";
pub const OVERLAY_ACTIVE_CLASS: &str = "active";

/// Errors raised by a surface implementation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
	/// An element named by the page contract is absent
	#[error("Element not found: {0}")]
	MissingElement(String),

	/// The underlying platform call failed
	#[error("Surface operation failed: {0}")]
	Operation(String),
}

impl SurfaceError {
	pub fn missing(id: impl Into<String>) -> Self {
		Self::MissingElement(id.into())
	}

	pub fn operation(msg: impl Into<String>) -> Self {
		Self::Operation(msg.into())
	}
}

/// Result type for surface operations
pub type SurfaceResult<T> = Result<T, SurfaceError>;

/// Border state of a form control
///
/// At most one of the valid/error borders is shown at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Border {
	#[default]
	None,
	Valid,
	Error,
}

impl Border {
	pub fn class_name(&self) -> Option<&'static str> {
		match self {
			Self::None => None,
			Self::Valid => Some(VALID_BORDER_CLASS),
			Self::Error => Some(ERROR_BORDER_CLASS),
		}
	}
}

/// Page regions toggled by the controllers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
	/// Full-page loading overlay shown during reset
	PageLoading,
	ErrorBox,
	ResultHeading,
	/// Loading indicator shown while a prediction is in flight
	Loading,
	ResultBox,
}

impl Region {
	pub const ALL: [Region; 5] = [
		Region::PageLoading,
		Region::ErrorBox,
		Region::ResultHeading,
		Region::Loading,
		Region::ResultBox,
	];

	pub fn element_id(&self) -> &'static str {
		match self {
			Self::PageLoading => "bodyLoading",
			Self::ErrorBox => "errorBox",
			Self::ResultHeading => "resultHeading",
			Self::Loading => "loading",
			Self::ResultBox => "resultBox",
		}
	}
}

/// Element id of the message slot for `field`
pub fn message_id(field: &str) -> String {
	format!("{}_msg", field)
}

/// Rendered values of a successful prediction
#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
	/// Probability with a `%` suffix, e.g. `"12%"`
	pub probability_text: String,
	pub risk_text: String,
	/// Badge variant class, the lower-cased risk
	pub risk_variant: String,
	pub suggestion: String,
}

/// Capability interface over the rendered form
///
/// Every operation is fallible so a host can report a missing element
/// instead of panicking; the controllers propagate these errors with `?`.
pub trait FormSurface {
	/// Current value of a control, `None` when the control has no value
	fn field_value(&self, field: &str) -> SurfaceResult<Option<String>>;

	fn set_field_value(&mut self, field: &str, value: &str) -> SurfaceResult<()>;

	/// Set or clear the message under a control
	///
	/// `Some` shows the text with the error style, `None` empties the slot
	/// and resets it to the plain message style.
	fn set_message(&mut self, field: &str, message: Option<&str>) -> SurfaceResult<()>;

	fn border(&self, field: &str) -> SurfaceResult<Border>;

	fn set_border(&mut self, field: &str, border: Border) -> SurfaceResult<()>;

	/// Remove the error border, keeping a valid border in place
	fn clear_error_border(&mut self, field: &str) -> SurfaceResult<()> {
		if self.border(field)? == Border::Error {
			self.set_border(field, Border::None)?;
		}
		Ok(())
	}

	/// Remove the valid border, keeping an error border in place
	fn clear_valid_border(&mut self, field: &str) -> SurfaceResult<()> {
		if self.border(field)? == Border::Valid {
			self.set_border(field, Border::None)?;
		}
		Ok(())
	}

	/// Switch a select between its neutral and filled border color
	fn set_select_filled(&mut self, field: &str, filled: bool) -> SurfaceResult<()>;

	/// Scroll a control into view and focus it
	fn focus_field(&mut self, field: &str) -> SurfaceResult<()>;

	fn set_visible(&mut self, region: Region, visible: bool) -> SurfaceResult<()>;

	fn set_error_text(&mut self, text: &str) -> SurfaceResult<()>;

	/// Expand or collapse the reserved results container
	fn set_results_reserved(&mut self, reserved: bool) -> SurfaceResult<()>;

	/// Opacity of the "check another" control, fully shown or hidden
	fn set_check_another_visible(&mut self, visible: bool) -> SurfaceResult<()>;

	/// Enable or disable the submit control and set its label
	fn set_submit_control(&mut self, enabled: bool, label: &str) -> SurfaceResult<()>;

	fn render_result(&mut self, view: &ResultView) -> SurfaceResult<()>;
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_region_ids() {
		let ids: Vec<&str> = Region::ALL.iter().map(Region::element_id).collect();
		assert_eq!(
			ids,
			vec!["bodyLoading", "errorBox", "resultHeading", "loading", "resultBox"]
		);
	}

	#[rstest]
	fn test_border_classes() {
		assert_eq!(Border::None.class_name(), None);
		assert_eq!(Border::Valid.class_name(), Some("valid-border"));
		assert_eq!(Border::Error.class_name(), Some("error-border"));
	}

	#[rstest]
	fn test_message_id() {
		assert_eq!(message_id("tenure_months"), "tenure_months_msg");
	}

	#[rstest]
	fn test_surface_error_display() {
		assert_eq!(
			SurfaceError::missing("probText").to_string(),
			"Element not found: probText"
		);
		assert_eq!(
			SurfaceError::operation("detached").to_string(),
			"Surface operation failed: detached"
		);
	}
}
