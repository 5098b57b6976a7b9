//! In-memory doubles for driving the controllers without a browser
//!
//! - [`MemorySurface`]: a [`FormSurface`] that records every rendered state
//! - [`ManualClock`]: a [`Clock`] whose sleeps advance time instantly
//! - [`MockPredictionClient`]: a [`PredictionClient`] replaying queued replies

use crate::api::{PredictError, PredictResult, Prediction, PredictionClient};
use crate::clock::Clock;
use crate::surface::{Border, FormSurface, Region, ResultView, SurfaceError, SurfaceResult};
use async_trait::async_trait;
use churnguard_forms::{FormPayload, RuleTable};
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};
use std::rc::Rc;
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct ControlState {
	value: String,
	message: Option<String>,
	border: Border,
	filled: Option<bool>,
}

/// Form surface held entirely in memory
///
/// Controls start empty, every region starts hidden and the submit control
/// starts enabled with the default label. Operations can be made to fail
/// with [`MemorySurface::fail_operation`].
#[derive(Debug, Clone, PartialEq)]
pub struct MemorySurface {
	controls: BTreeMap<String, ControlState>,
	regions: HashMap<Region, bool>,
	region_history: Vec<(Region, bool)>,
	error_text: String,
	results_reserved: bool,
	check_another: Vec<bool>,
	submit_enabled: bool,
	submit_label: String,
	result: Option<ResultView>,
	focused: Vec<String>,
	failing: BTreeSet<&'static str>,
}

impl MemorySurface {
	pub fn new<I, S>(fields: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			controls: fields
				.into_iter()
				.map(|name| (name.into(), ControlState::default()))
				.collect(),
			regions: Region::ALL.iter().map(|region| (*region, false)).collect(),
			region_history: Vec::new(),
			error_text: String::new(),
			results_reserved: false,
			check_another: Vec::new(),
			submit_enabled: true,
			submit_label: "Predict Churn".to_string(),
			result: None,
			focused: Vec::new(),
			failing: BTreeSet::new(),
		}
	}

	/// Surface with one control per churn rule
	pub fn churn() -> Self {
		Self::new(RuleTable::churn().field_names())
	}

	/// Make the named trait operation return an error from now on
	pub fn fail_operation(&mut self, operation: &'static str) {
		self.failing.insert(operation);
	}

	pub fn clear_failures(&mut self) {
		self.failing.clear();
	}

	fn check(&self, operation: &'static str) -> SurfaceResult<()> {
		if self.failing.contains(operation) {
			return Err(SurfaceError::operation(operation));
		}
		Ok(())
	}

	fn control(&self, field: &str) -> SurfaceResult<&ControlState> {
		self.controls
			.get(field)
			.ok_or_else(|| SurfaceError::missing(field))
	}

	fn control_mut(&mut self, field: &str) -> SurfaceResult<&mut ControlState> {
		self.controls
			.get_mut(field)
			.ok_or_else(|| SurfaceError::missing(field))
	}

	pub fn value(&self, field: &str) -> Option<&str> {
		self.controls.get(field).map(|control| control.value.as_str())
	}

	/// Current values in field-name order
	pub fn values(&self) -> Vec<(String, String)> {
		self.controls
			.iter()
			.map(|(name, control)| (name.clone(), control.value.clone()))
			.collect()
	}

	pub fn message(&self, field: &str) -> Option<&str> {
		self.controls
			.get(field)
			.and_then(|control| control.message.as_deref())
	}

	/// Select color state, `None` if never set
	pub fn select_filled(&self, field: &str) -> Option<bool> {
		self.controls.get(field).and_then(|control| control.filled)
	}

	pub fn is_visible(&self, region: Region) -> bool {
		self.regions.get(&region).copied().unwrap_or(false)
	}

	/// Every visibility change in order
	pub fn region_history(&self) -> &[(Region, bool)] {
		&self.region_history
	}

	pub fn error_text(&self) -> &str {
		&self.error_text
	}

	pub fn results_reserved(&self) -> bool {
		self.results_reserved
	}

	/// Latest opacity of the "check another" control, `None` if never set
	pub fn check_another_visible(&self) -> Option<bool> {
		self.check_another.last().copied()
	}

	/// Every opacity change of the "check another" control in order
	pub fn check_another_history(&self) -> &[bool] {
		&self.check_another
	}

	pub fn submit_enabled(&self) -> bool {
		self.submit_enabled
	}

	pub fn submit_label(&self) -> &str {
		&self.submit_label
	}

	pub fn result(&self) -> Option<&ResultView> {
		self.result.as_ref()
	}

	/// Most recently focused control
	pub fn focused(&self) -> Option<&str> {
		self.focused.last().map(String::as_str)
	}

	pub fn focus_count(&self) -> usize {
		self.focused.len()
	}
}

impl FormSurface for MemorySurface {
	fn field_value(&self, field: &str) -> SurfaceResult<Option<String>> {
		self.check("field_value")?;
		Ok(Some(self.control(field)?.value.clone()))
	}

	fn set_field_value(&mut self, field: &str, value: &str) -> SurfaceResult<()> {
		self.check("set_field_value")?;
		self.control_mut(field)?.value = value.to_string();
		Ok(())
	}

	fn set_message(&mut self, field: &str, message: Option<&str>) -> SurfaceResult<()> {
		self.check("set_message")?;
		self.control_mut(field)?.message = message.map(str::to_string);
		Ok(())
	}

	fn border(&self, field: &str) -> SurfaceResult<Border> {
		self.check("border")?;
		Ok(self.control(field)?.border)
	}

	fn set_border(&mut self, field: &str, border: Border) -> SurfaceResult<()> {
		self.check("set_border")?;
		self.control_mut(field)?.border = border;
		Ok(())
	}

	fn set_select_filled(&mut self, field: &str, filled: bool) -> SurfaceResult<()> {
		self.check("set_select_filled")?;
		self.control_mut(field)?.filled = Some(filled);
		Ok(())
	}

	fn focus_field(&mut self, field: &str) -> SurfaceResult<()> {
		self.check("focus_field")?;
		self.control(field)?;
		self.focused.push(field.to_string());
		Ok(())
	}

	fn set_visible(&mut self, region: Region, visible: bool) -> SurfaceResult<()> {
		self.check("set_visible")?;
		self.regions.insert(region, visible);
		self.region_history.push((region, visible));
		Ok(())
	}

	fn set_error_text(&mut self, text: &str) -> SurfaceResult<()> {
		self.check("set_error_text")?;
		self.error_text = text.to_string();
		Ok(())
	}

	fn set_results_reserved(&mut self, reserved: bool) -> SurfaceResult<()> {
		self.check("set_results_reserved")?;
		self.results_reserved = reserved;
		Ok(())
	}

	fn set_check_another_visible(&mut self, visible: bool) -> SurfaceResult<()> {
		self.check("set_check_another_visible")?;
		self.check_another.push(visible);
		Ok(())
	}

	fn set_submit_control(&mut self, enabled: bool, label: &str) -> SurfaceResult<()> {
		self.check("set_submit_control")?;
		self.submit_enabled = enabled;
		self.submit_label = label.to_string();
		Ok(())
	}

	fn render_result(&mut self, view: &ResultView) -> SurfaceResult<()> {
		self.check("render_result")?;
		self.result = Some(view.clone());
		Ok(())
	}
}

/// Clock advanced by hand
///
/// Clones share the same time, so a test can keep a handle while the
/// orchestrator owns another. `sleep` completes immediately and moves time
/// forward by the requested duration.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
	now: Rc<Cell<Duration>>,
	sleeps: Rc<RefCell<Vec<Duration>>>,
}

impl ManualClock {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn advance(&self, by: Duration) {
		self.now.set(self.now.get() + by);
	}

	/// Durations passed to `sleep`, in order
	pub fn sleeps(&self) -> Vec<Duration> {
		self.sleeps.borrow().clone()
	}

	pub fn total_slept(&self) -> Duration {
		self.sleeps.borrow().iter().sum()
	}
}

#[async_trait(?Send)]
impl Clock for ManualClock {
	fn now(&self) -> Duration {
		self.now.get()
	}

	async fn sleep(&self, duration: Duration) {
		self.sleeps.borrow_mut().push(duration);
		self.advance(duration);
	}
}

/// Prediction client replaying queued replies
///
/// Every call records its payload. An empty queue answers with a network
/// error. With [`MockPredictionClient::with_latency`] each call advances a
/// [`ManualClock`] before replying.
#[derive(Debug, Default)]
pub struct MockPredictionClient {
	replies: RefCell<VecDeque<PredictResult<Prediction>>>,
	calls: RefCell<Vec<FormPayload>>,
	latency: Option<(ManualClock, Duration)>,
}

impl MockPredictionClient {
	pub fn new() -> Self {
		Self::default()
	}

	/// Simulate a round trip taking `latency` on `clock`
	pub fn with_latency(mut self, clock: &ManualClock, latency: Duration) -> Self {
		self.latency = Some((clock.clone(), latency));
		self
	}

	pub fn reply(self, reply: PredictResult<Prediction>) -> Self {
		self.replies.borrow_mut().push_back(reply);
		self
	}

	/// Queue a success reply
	pub fn succeed(self, probability: f64, risk: &str, suggestion: &str) -> Self {
		self.reply(Ok(Prediction {
			probability,
			risk: risk.to_string(),
			suggestion: suggestion.to_string(),
		}))
	}

	/// Queue a non-success status reply
	pub fn fail_with_status(self, status: u16, detail: Option<&str>) -> Self {
		self.reply(Err(PredictError::Status {
			status,
			detail: detail.map(str::to_string),
		}))
	}

	/// Queue a transport failure
	pub fn fail_network(self, message: &str) -> Self {
		self.reply(Err(PredictError::Network(message.to_string())))
	}

	pub fn calls(&self) -> Vec<FormPayload> {
		self.calls.borrow().clone()
	}

	pub fn call_count(&self) -> usize {
		self.calls.borrow().len()
	}
}

#[async_trait(?Send)]
impl PredictionClient for MockPredictionClient {
	async fn predict(&self, payload: &FormPayload) -> PredictResult<Prediction> {
		self.calls.borrow_mut().push(payload.clone());
		if let Some((clock, latency)) = &self.latency {
			clock.advance(*latency);
		}
		self.replies
			.borrow_mut()
			.pop_front()
			.unwrap_or_else(|| Err(PredictError::Network("no reply queued".to_string())))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_memory_surface_initial_state() {
		let surface = MemorySurface::churn();
		assert_eq!(surface.values().len(), 7);
		assert!(Region::ALL.iter().all(|region| !surface.is_visible(*region)));
		assert!(surface.submit_enabled());
		assert_eq!(surface.submit_label(), "Predict Churn");
		assert_eq!(surface.check_another_visible(), None);
	}

	#[rstest]
	fn test_memory_surface_unknown_control() {
		let mut surface = MemorySurface::churn();
		assert_eq!(
			surface.set_field_value("coupon", "x"),
			Err(SurfaceError::missing("coupon"))
		);
	}

	#[rstest]
	fn test_memory_surface_injected_failure() {
		let mut surface = MemorySurface::churn();
		surface.fail_operation("render_result");
		let view = ResultView {
			probability_text: "1%".to_string(),
			risk_text: "LOW".to_string(),
			risk_variant: "low".to_string(),
			suggestion: String::new(),
		};
		assert_eq!(
			surface.render_result(&view),
			Err(SurfaceError::operation("render_result"))
		);

		surface.clear_failures();
		assert!(surface.render_result(&view).is_ok());
	}

	#[rstest]
	fn test_clear_error_border_keeps_valid() {
		let mut surface = MemorySurface::churn();
		surface.set_border("tenure_months", Border::Valid).unwrap();
		surface.clear_error_border("tenure_months").unwrap();
		assert_eq!(surface.border("tenure_months").unwrap(), Border::Valid);

		surface.set_border("tenure_months", Border::Error).unwrap();
		surface.clear_error_border("tenure_months").unwrap();
		assert_eq!(surface.border("tenure_months").unwrap(), Border::None);
	}

	#[rstest]
	#[tokio::test]
	async fn test_manual_clock_shared_between_clones() {
		let clock = ManualClock::new();
		let handle = clock.clone();

		clock.sleep(Duration::from_millis(120)).await;
		handle.advance(Duration::from_millis(30));

		assert_eq!(clock.now(), Duration::from_millis(150));
		assert_eq!(handle.sleeps(), vec![Duration::from_millis(120)]);
	}

	#[rstest]
	#[tokio::test]
	async fn test_mock_client_replays_in_order() {
		let clock = ManualClock::new();
		let client = MockPredictionClient::new()
			.with_latency(&clock, Duration::from_millis(80))
			.succeed(12.0, "LOW", "Keep engaging")
			.fail_with_status(400, Some("Invalid contract type"));
		let payload = FormPayload::from_iter([("tenure_months", "12")]);

		let first = client.predict(&payload).await.unwrap();
		let second = client.predict(&payload).await.unwrap_err();
		let third = client.predict(&payload).await.unwrap_err();

		assert_eq!(first.risk, "LOW");
		assert_eq!(second.user_message(), "Invalid contract type");
		assert!(matches!(third, PredictError::Network(_)));
		assert_eq!(client.call_count(), 3);
		assert_eq!(clock.now(), Duration::from_millis(240));
	}
}
