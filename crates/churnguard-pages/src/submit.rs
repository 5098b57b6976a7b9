//! Submission orchestration
//!
//! [`SubmissionOrchestrator::submit`] drives one submit action through
//! its states:
//!
//! ```text
//! Idle -> Validating -> (invalid) -> Idle
//!                    -> Submitting -> ShowingResult -> Idle
//!                                  -> ShowingError  -> Idle
//! ```
//!
//! The orchestrator owns the first-prediction flag. `&mut self` on `submit`
//! and `reset` keeps at most one of them running at a time.

use crate::api::PredictionClient;
use crate::clock::{Clock, hold_for_minimum};
use crate::feedback::FeedbackController;
use crate::settings::ControllerSettings;
use crate::surface::{FormSurface, Region, ResultView, SurfaceResult};
use crate::{debug_log, error_log, info_log};
use churnguard_forms::{FormPayload, RuleTable};
use std::fmt;

/// Where a submission currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
	#[default]
	Idle,
	Validating,
	Submitting,
	ShowingResult,
	ShowingError,
}

impl fmt::Display for SubmissionState {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Self::Idle => "idle",
			Self::Validating => "validating",
			Self::Submitting => "submitting",
			Self::ShowingResult => "showing-result",
			Self::ShowingError => "showing-error",
		};
		f.write_str(name)
	}
}

/// How a submit action ended
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
	/// Validation failed; `field` is the first failing control
	Rejected { field: String },
	Predicted(ResultView),
	/// The request failed; `message` is the text shown in the error box
	Failed { message: String },
}

/// Read the current form values into a request body
pub fn payload_from_surface<S>(surface: &S, table: &RuleTable) -> SurfaceResult<FormPayload>
where
	S: FormSurface + ?Sized,
{
	table
		.field_names()
		.map(|name| {
			surface
				.field_value(name)
				.map(|value| (name, value.unwrap_or_default()))
		})
		.collect()
}

/// Coordinates validation, the prediction request and result rendering
pub struct SubmissionOrchestrator<'a, C, K> {
	pub(crate) feedback: FeedbackController<'a>,
	pub(crate) client: C,
	pub(crate) clock: K,
	pub(crate) settings: ControllerSettings,
	pub(crate) state: SubmissionState,
	pub(crate) first_prediction: bool,
}

impl<C, K> SubmissionOrchestrator<'static, C, K>
where
	C: PredictionClient,
	K: Clock,
{
	/// Orchestrator over the churn rule table
	pub fn churn(client: C, clock: K, settings: ControllerSettings) -> Self {
		Self::new(RuleTable::churn(), client, clock, settings)
	}
}

impl<'a, C, K> SubmissionOrchestrator<'a, C, K>
where
	C: PredictionClient,
	K: Clock,
{
	pub fn new(table: &'a RuleTable, client: C, clock: K, settings: ControllerSettings) -> Self {
		Self {
			feedback: FeedbackController::new(table),
			client,
			clock,
			settings,
			state: SubmissionState::Idle,
			first_prediction: true,
		}
	}

	pub fn state(&self) -> SubmissionState {
		self.state
	}

	/// True until the first successful prediction since load or reset
	pub fn is_first_prediction(&self) -> bool {
		self.first_prediction
	}

	pub fn client(&self) -> &C {
		&self.client
	}

	pub fn clock(&self) -> &K {
		&self.clock
	}

	pub fn settings(&self) -> &ControllerSettings {
		&self.settings
	}

	pub fn feedback(&self) -> FeedbackController<'a> {
		self.feedback
	}

	pub(crate) fn transition(&mut self, next: SubmissionState) {
		debug_log!("Submission state: {} -> {}", self.state, next);
		self.state = next;
	}

	/// Run one submit action against `surface`
	///
	/// Request failures are reported as [`SubmitOutcome::Failed`] and shown
	/// on the page. A surface error aborts the flow, but the submit control
	/// is still restored and the state returns to idle.
	pub async fn submit<S>(&mut self, surface: &mut S) -> SurfaceResult<SubmitOutcome>
	where
		S: FormSurface + ?Sized,
	{
		let result = self.validate_and_send(surface).await;
		if let Err(err) = &result {
			error_log!("Submission aborted: {}", err);
		}
		self.transition(SubmissionState::Idle);
		result
	}

	async fn validate_and_send<S>(&mut self, surface: &mut S) -> SurfaceResult<SubmitOutcome>
	where
		S: FormSurface + ?Sized,
	{
		self.transition(SubmissionState::Validating);
		if let Some(field) = self.validate_all(surface)? {
			info_log!("Submission rejected, first invalid field: {}", field);
			surface.focus_field(&field)?;
			return Ok(SubmitOutcome::Rejected { field });
		}

		self.transition(SubmissionState::Submitting);
		let fade_in = self.first_prediction;
		let sent = match self.show_busy(surface) {
			Ok(()) => self.send_and_render(surface).await,
			Err(err) => Err(err),
		};

		let restored = surface.set_submit_control(true, &self.settings.submit_label);
		let outcome = sent?;
		restored?;

		if fade_in && matches!(outcome, SubmitOutcome::Predicted(_)) {
			self.clock.sleep(self.settings.fade_in_delay()).await;
			surface.set_check_another_visible(true)?;
		}
		Ok(outcome)
	}

	/// Full-check every field in document order
	///
	/// Returns the first failing field. Every field is rendered, not only the
	/// first failure.
	fn validate_all<S>(&self, surface: &mut S) -> SurfaceResult<Option<String>>
	where
		S: FormSurface + ?Sized,
	{
		self.feedback.clear_all(surface)?;

		let mut first_invalid = None;
		for field in self.feedback.table().field_names() {
			let outcome = self.feedback.validate_field(surface, field, true)?;
			if !outcome.valid && first_invalid.is_none() {
				first_invalid = Some(field.to_string());
			}
		}
		Ok(first_invalid)
	}

	fn show_busy<S>(&self, surface: &mut S) -> SurfaceResult<()>
	where
		S: FormSurface + ?Sized,
	{
		surface.set_error_text("")?;
		surface.set_visible(Region::ErrorBox, false)?;
		surface.set_visible(Region::ResultBox, false)?;
		surface.set_visible(Region::ResultHeading, true)?;
		surface.set_visible(Region::Loading, true)?;
		surface.set_results_reserved(true)?;
		surface.set_check_another_visible(!self.first_prediction)?;
		surface.set_submit_control(false, &self.settings.busy_label)
	}

	async fn send_and_render<S>(&mut self, surface: &mut S) -> SurfaceResult<SubmitOutcome>
	where
		S: FormSurface + ?Sized,
	{
		let payload = payload_from_surface(surface, self.feedback.table())?;
		let started = self.clock.now();
		info_log!("Requesting prediction for {} fields", payload.len());

		let response = self.client.predict(&payload).await;
		hold_for_minimum(&self.clock, started, self.settings.minimum_duration()).await;

		match response {
			Ok(prediction) => {
				let view = prediction.to_view();
				surface.render_result(&view)?;
				surface.set_visible(Region::Loading, false)?;
				surface.set_visible(Region::ResultBox, true)?;
				self.first_prediction = false;
				self.transition(SubmissionState::ShowingResult);
				Ok(SubmitOutcome::Predicted(view))
			}
			Err(err) => {
				let message = format!("Error: {}", err.user_message());
				error_log!("Prediction failed: {}", err);
				surface.set_error_text(&message)?;
				surface.set_visible(Region::ErrorBox, true)?;
				surface.set_visible(Region::Loading, false)?;
				self.transition(SubmissionState::ShowingError);
				Ok(SubmitOutcome::Failed { message })
			}
		}
	}
}
