//! # ChurnGuard
//!
//! Browser-side form controller for the ChurnGuard churn prediction tool.
//!
//! ChurnGuard validates customer attributes as they are typed, sends them
//! to a prediction service and renders the returned risk assessment. The
//! validation rules are pure and usable anywhere; the page controllers run
//! on `wasm32` against the live DOM and natively against in-memory doubles.
//!
//! ## Feature Flags
//!
//! - `minimal` - Rule table, field validator and payload encoding only
//! - `pages` - Feedback, submission, presets and reset controllers
//! - `full` (default) - Everything above
//! - `debug-hooks` - Verbose state-transition logging in debug builds
//!
//! ## Quick Example
//!
//! ```
//! use churnguard::prelude::*;
//!
//! let validator = FieldValidator::new(RuleTable::churn());
//!
//! let outcome = validator.validate("monthly_charges", Some("150"), true);
//! assert!(!outcome.valid);
//! assert_eq!(outcome.message.as_deref(), Some("Must be between $19-$119"));
//! ```

pub mod forms;
#[cfg(feature = "pages")]
pub mod pages;

// Re-export the validation core
pub use churnguard_forms::{
	FailureReason, FieldRule, FieldValidator, FormPayload, RuleKind, RuleTable,
	ValidationOutcome,
};

// Re-export the page controllers
#[cfg(feature = "pages")]
pub use churnguard_pages::{
	ControllerSettings, FeedbackController, FormSurface, PredictError, Prediction,
	PredictionClient, Scenario, SubmissionOrchestrator, SubmissionState, SubmitOutcome,
	SurfaceError,
};

// Logging macros
#[cfg(feature = "pages")]
pub use churnguard_pages::{debug_log, error_log, info_log, warn_log};

pub mod prelude {
	// Validation - always available
	pub use crate::{
		FailureReason, FieldRule, FieldValidator, FormPayload, RuleKind, RuleTable,
		ValidationOutcome,
	};

	// Page controllers
	#[cfg(feature = "pages")]
	pub use crate::{
		ControllerSettings, FeedbackController, FormSurface, PredictError, Prediction,
		PredictionClient, Scenario, SubmissionOrchestrator, SubmissionState, SubmitOutcome,
		SurfaceError,
	};
}
