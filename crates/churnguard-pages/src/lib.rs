//! ChurnGuard Pages - controllers for the churn prediction page
//!
//! Validates customer attributes as they are entered, submits them to the
//! prediction service and renders the returned risk assessment.
//!
//! ## Architecture
//!
//! - [`surface`]: the [`FormSurface`] capability interface and the DOM contract
//! - [`feedback`]: per-field border and message feedback
//! - [`submit`]: the submission state machine ([`SubmissionOrchestrator`])
//! - [`reset`]: returning the page to its initial state
//! - [`presets`]: example customers ([`Scenario`])
//! - [`api`]: the prediction client
//! - [`clock`]: time source for the minimum loading duration
//! - [`settings`]: [`ControllerSettings`], loadable from TOML
//! - [`testing`]: in-memory doubles for headless use
//!
//! On `wasm32` the `dom` and `launcher` modules mount the controllers on the
//! live document.
//!
//! ## Example
//!
//! ```
//! use churnguard_pages::presets::Scenario;
//! use churnguard_pages::settings::ControllerSettings;
//! use churnguard_pages::submit::{SubmissionOrchestrator, SubmitOutcome};
//! use churnguard_pages::testing::{ManualClock, MemorySurface, MockPredictionClient};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let client = MockPredictionClient::new().succeed(12.0, "Low", "Customer is stable");
//! let mut orchestrator =
//!     SubmissionOrchestrator::churn(client, ManualClock::new(), ControllerSettings::default());
//! let mut surface = MemorySurface::churn();
//!
//! Scenario::Low.apply(&orchestrator.feedback(), &mut surface).unwrap();
//! let outcome = orchestrator.submit(&mut surface).await.unwrap();
//!
//! match outcome {
//!     SubmitOutcome::Predicted(view) => assert_eq!(view.probability_text, "12%"),
//!     other => panic!("unexpected outcome: {:?}", other),
//! }
//! # }
//! ```

pub mod api;
pub mod clock;
pub mod feedback;
pub mod logging;
pub mod presets;
pub mod reset;
pub mod settings;
pub mod submit;
pub mod surface;
pub mod testing;

#[cfg(target_arch = "wasm32")]
pub mod dom;
#[cfg(target_arch = "wasm32")]
pub mod launcher;

pub use api::{
	HttpPredictionClient, PredictError, PredictResult, Prediction, PredictionClient, RiskLevel,
};
#[cfg(target_arch = "wasm32")]
pub use clock::BrowserClock;
pub use clock::Clock;
#[cfg(not(target_arch = "wasm32"))]
pub use clock::TokioClock;
pub use feedback::{BorderUpdate, FeedbackController, FieldEvent, FieldFeedback};
pub use presets::Scenario;
pub use settings::{ControllerSettings, SettingsError, SettingsResult};
pub use submit::{SubmissionOrchestrator, SubmissionState, SubmitOutcome, payload_from_surface};
pub use surface::{Border, FormSurface, Region, ResultView, SurfaceError, SurfaceResult};

// Logging macros are exported via #[macro_export]
// and reach their backends through this module
#[doc(hidden)]
pub mod __private {
	#[cfg(not(target_arch = "wasm32"))]
	pub use tracing;
	#[cfg(target_arch = "wasm32")]
	pub use web_sys;
}
