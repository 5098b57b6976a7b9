//! Returning the page to its initial state

use crate::api::PredictionClient;
use crate::clock::{Clock, hold_for_minimum};
use crate::submit::SubmissionOrchestrator;
use crate::surface::{FormSurface, Region, SurfaceResult};
use crate::{error_log, info_log};

impl<C, K> SubmissionOrchestrator<'_, C, K>
where
	C: PredictionClient,
	K: Clock,
{
	/// Clear the form and results behind the page loading overlay
	///
	/// The overlay stays up for at least the minimum duration and is hidden
	/// even when clearing fails; the clearing error is returned afterwards.
	/// The error box is left as it is.
	pub async fn reset<S>(&mut self, surface: &mut S) -> SurfaceResult<()>
	where
		S: FormSurface + ?Sized,
	{
		surface.set_visible(Region::PageLoading, true)?;
		let started = self.clock.now();

		let cleared = self.restore_initial(surface);
		if let Err(err) = &cleared {
			error_log!("Form reset failed: {}", err);
		}

		hold_for_minimum(&self.clock, started, self.settings.minimum_duration()).await;
		let hidden = surface.set_visible(Region::PageLoading, false);
		cleared.and(hidden)
	}

	fn restore_initial<S>(&mut self, surface: &mut S) -> SurfaceResult<()>
	where
		S: FormSurface + ?Sized,
	{
		for field in self.feedback.table().field_names() {
			surface.set_field_value(field, "")?;
		}
		surface.set_visible(Region::ResultBox, false)?;
		surface.set_visible(Region::ResultHeading, false)?;
		surface.set_visible(Region::Loading, false)?;
		surface.set_results_reserved(false)?;

		self.first_prediction = true;
		self.feedback.clear_all(surface)?;
		self.feedback.init_select_borders(surface)?;
		info_log!("Form reset");
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use crate::presets::Scenario;
	use crate::settings::ControllerSettings;
	use crate::submit::SubmissionOrchestrator;
	use crate::surface::{Border, FormSurface, Region, SurfaceError};
	use crate::testing::{ManualClock, MemorySurface, MockPredictionClient};
	use rstest::rstest;
	use std::time::Duration;

	#[rstest]
	#[tokio::test]
	async fn test_reset_restores_initial_state() {
		let clock = ManualClock::new();
		let client = MockPredictionClient::new().succeed(12.0, "LOW", "ok");
		let mut orchestrator =
			SubmissionOrchestrator::churn(client, clock.clone(), ControllerSettings::default());
		let mut surface = MemorySurface::churn();
		Scenario::Low
			.apply(&orchestrator.feedback(), &mut surface)
			.unwrap();
		orchestrator.submit(&mut surface).await.unwrap();
		assert!(!orchestrator.is_first_prediction());

		orchestrator.reset(&mut surface).await.unwrap();

		assert!(orchestrator.is_first_prediction());
		assert!(surface.values().iter().all(|(_, value)| value.is_empty()));
		for field in ["tenure_months", "contract_type", "avg_data_usage_gb"] {
			assert_eq!(surface.border(field).unwrap(), Border::None);
			assert_eq!(surface.message(field), None);
		}
		assert_eq!(surface.select_filled("contract_type"), Some(false));
		assert!(!surface.is_visible(Region::ResultBox));
		assert!(!surface.is_visible(Region::ResultHeading));
		assert!(!surface.is_visible(Region::Loading));
		assert!(!surface.is_visible(Region::PageLoading));
		assert!(!surface.results_reserved());
	}

	#[rstest]
	#[tokio::test]
	async fn test_reset_holds_overlay_for_minimum() {
		let clock = ManualClock::new();
		let mut orchestrator = SubmissionOrchestrator::churn(
			MockPredictionClient::new(),
			clock.clone(),
			ControllerSettings::default(),
		);
		let mut surface = MemorySurface::churn();

		orchestrator.reset(&mut surface).await.unwrap();

		assert_eq!(clock.sleeps(), vec![Duration::from_millis(1000)]);
		let overlay: Vec<bool> = surface
			.region_history()
			.iter()
			.filter(|(region, _)| *region == Region::PageLoading)
			.map(|(_, visible)| *visible)
			.collect();
		assert_eq!(overlay, vec![true, false]);
	}

	#[rstest]
	#[tokio::test]
	async fn test_reset_hides_overlay_when_clearing_fails() {
		let clock = ManualClock::new();
		let mut orchestrator = SubmissionOrchestrator::churn(
			MockPredictionClient::new(),
			clock.clone(),
			ControllerSettings::default(),
		);
		let mut surface = MemorySurface::churn();
		surface.fail_operation("set_results_reserved");

		let result = orchestrator.reset(&mut surface).await;

		assert_eq!(result, Err(SurfaceError::operation("set_results_reserved")));
		assert!(!surface.is_visible(Region::PageLoading));
		assert_eq!(clock.total_slept(), Duration::from_millis(1000));
	}

	#[rstest]
	#[tokio::test]
	async fn test_reset_keeps_error_box() {
		let clock = ManualClock::new();
		let client =
			MockPredictionClient::new().fail_with_status(400, Some("Invalid tenure value"));
		let mut orchestrator =
			SubmissionOrchestrator::churn(client, clock.clone(), ControllerSettings::default());
		let mut surface = MemorySurface::churn();
		Scenario::High
			.apply(&orchestrator.feedback(), &mut surface)
			.unwrap();
		orchestrator.submit(&mut surface).await.unwrap();

		orchestrator.reset(&mut surface).await.unwrap();

		assert!(surface.is_visible(Region::ErrorBox));
		assert_eq!(surface.error_text(), "Error: Invalid tenure value");
	}
}
