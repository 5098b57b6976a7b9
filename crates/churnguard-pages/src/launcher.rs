//! Browser entry point
//!
//! Mounting wires the page's events to the controllers:
//!
//! | event | target | handler |
//! |-------|--------|---------|
//! | `blur`, `change`, `input` | every ruled control | [`FeedbackController::handle`] |
//! | `invalid` | every ruled control | default popup suppressed |
//! | `submit` | `churnForm` | [`SubmissionOrchestrator::submit`] |
//!
//! `fillLowRiskCustomer`, `fillMediumRiskCustomer`, `fillHighRiskCustomer`
//! and `resetForm` are exported to JavaScript and also published on `window`
//! for inline `onclick` attributes.
//!
//! Settings come from an optional TOML block in the page:
//!
//! ```html
//! <script type="application/toml" id="churnguardSettings">
//! endpoint = "/api/predict"
//! minimum_duration_ms = 1500
//! </script>
//! ```

use crate::api::HttpPredictionClient;
use crate::clock::BrowserClock;
use crate::dom::{DomSurface, js_error};
use crate::feedback::{FeedbackController, FieldEvent};
use crate::presets::Scenario;
use crate::settings::{ControllerSettings, SettingsError, SettingsResult};
use crate::submit::SubmissionOrchestrator;
use crate::surface::{FORM_ID, SurfaceError};
use crate::{error_log, info_log, warn_log};
use churnguard_forms::RuleTable;
use std::cell::RefCell;
use std::rc::Rc;
use thiserror::Error;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, EventTarget};

type PageOrchestrator = SubmissionOrchestrator<'static, HttpPredictionClient, BrowserClock>;

/// Element id of the embedded settings block
pub const SETTINGS_ID: &str = "churnguardSettings";

/// Errors raised while mounting the page
#[derive(Debug, Error)]
pub enum MountError {
	#[error(transparent)]
	Settings(#[from] SettingsError),

	#[error(transparent)]
	Surface(#[from] SurfaceError),
}

#[derive(Clone)]
struct Page {
	settings: Rc<ControllerSettings>,
	/// Taken out while a submit or reset runs
	orchestrator: Rc<RefCell<Option<PageOrchestrator>>>,
}

thread_local! {
	static PAGE: RefCell<Option<Page>> = const { RefCell::new(None) };
}

fn mounted_page() -> Option<Page> {
	PAGE.with(|page| page.borrow().clone())
}

fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<(), SurfaceError>
where
	F: FnMut(Event) + 'static,
{
	let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
	target
		.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
		.map_err(js_error)?;
	// Listeners live as long as the page
	closure.forget();
	Ok(())
}

fn publish(window: &web_sys::Window, name: &str, action: fn()) -> Result<(), SurfaceError> {
	let closure = Closure::<dyn Fn()>::new(action);
	js_sys::Reflect::set(window, &JsValue::from_str(name), closure.as_ref()).map_err(js_error)?;
	closure.forget();
	Ok(())
}

/// Settings embedded in `document`, or the defaults when there are none
pub fn page_settings(document: &Document) -> SettingsResult<ControllerSettings> {
	match document.get_element_by_id(SETTINGS_ID) {
		Some(block) => ControllerSettings::from_toml_str(&block.text_content().unwrap_or_default()),
		None => Ok(ControllerSettings::default()),
	}
}

/// Wire the controllers to the current document
pub fn mount(settings: ControllerSettings) -> Result<(), MountError> {
	settings.validate()?;
	let settings = Rc::new(settings);
	let window = web_sys::window().ok_or_else(|| SurfaceError::missing("window"))?;
	let mut surface = DomSurface::from_window(settings.clone())?;

	let origin = window.location().origin().map_err(js_error)?;
	let client = HttpPredictionClient::new(settings.endpoint_url(&origin));
	let orchestrator =
		SubmissionOrchestrator::churn(client, BrowserClock, settings.as_ref().clone());

	let feedback = FeedbackController::new(RuleTable::churn());
	feedback.init_select_borders(&mut surface)?;

	for rule in RuleTable::churn().iter() {
		let control = surface.control(&rule.name)?;
		for (name, event) in [
			("blur", FieldEvent::Blur),
			("change", FieldEvent::Change),
			("input", FieldEvent::Input),
		] {
			let field = rule.name.clone();
			let mut handler_surface = surface.clone();
			listen(&control, name, move |_event| {
				if let Err(err) = feedback.handle(&mut handler_surface, event, &field) {
					error_log!("Feedback for {} failed: {}", field, err);
				}
			})?;
		}
		listen(&control, "invalid", |event| event.prevent_default())?;
	}

	let form = surface
		.document()
		.get_element_by_id(FORM_ID)
		.ok_or_else(|| SurfaceError::missing(FORM_ID))?;
	listen(&form, "submit", |event| {
		event.prevent_default();
		wasm_bindgen_futures::spawn_local(submit_form());
	})?;

	publish(&window, "fillLowRiskCustomer", fill_low_risk_customer)?;
	publish(&window, "fillMediumRiskCustomer", fill_medium_risk_customer)?;
	publish(&window, "fillHighRiskCustomer", fill_high_risk_customer)?;
	publish(&window, "resetForm", reset_form)?;

	PAGE.with(|page| {
		*page.borrow_mut() = Some(Page {
			settings,
			orchestrator: Rc::new(RefCell::new(Some(orchestrator))),
		})
	});
	info_log!("Prediction page mounted");
	Ok(())
}

async fn submit_form() {
	let Some(page) = mounted_page() else {
		return;
	};
	let Some(mut orchestrator) = page.orchestrator.borrow_mut().take() else {
		warn_log!("Submit ignored, page is busy");
		return;
	};

	match DomSurface::from_window(page.settings.clone()) {
		Ok(mut surface) => {
			if let Err(err) = orchestrator.submit(&mut surface).await {
				error_log!("Submit failed: {}", err);
			}
		}
		Err(err) => error_log!("Submit failed: {}", err),
	}
	*page.orchestrator.borrow_mut() = Some(orchestrator);
}

async fn reset_page() {
	let Some(page) = mounted_page() else {
		return;
	};
	let Some(mut orchestrator) = page.orchestrator.borrow_mut().take() else {
		warn_log!("Reset ignored, page is busy");
		return;
	};

	match DomSurface::from_window(page.settings.clone()) {
		Ok(mut surface) => {
			if let Err(err) = orchestrator.reset(&mut surface).await {
				error_log!("Reset failed: {}", err);
			}
		}
		Err(err) => error_log!("Reset failed: {}", err),
	}
	*page.orchestrator.borrow_mut() = Some(orchestrator);
}

fn fill(scenario: Scenario) {
	let Some(page) = mounted_page() else {
		warn_log!("Page is not mounted");
		return;
	};
	let feedback = FeedbackController::new(RuleTable::churn());
	let applied = DomSurface::from_window(page.settings.clone())
		.and_then(|mut surface| scenario.apply(&feedback, &mut surface));
	if let Err(err) = applied {
		error_log!("Filling the {} risk customer failed: {}", scenario, err);
	}
}

#[wasm_bindgen(js_name = fillLowRiskCustomer)]
pub fn fill_low_risk_customer() {
	fill(Scenario::Low);
}

#[wasm_bindgen(js_name = fillMediumRiskCustomer)]
pub fn fill_medium_risk_customer() {
	fill(Scenario::Medium);
}

#[wasm_bindgen(js_name = fillHighRiskCustomer)]
pub fn fill_high_risk_customer() {
	fill(Scenario::High);
}

#[wasm_bindgen(js_name = resetForm)]
pub fn reset_form() {
	wasm_bindgen_futures::spawn_local(reset_page());
}

/// Mount once the document has finished parsing
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
	let document = web_sys::window()
		.and_then(|window| window.document())
		.ok_or_else(|| JsValue::from_str("document is not available"))?;

	let source = document.clone();
	let run = move || {
		let mounted = page_settings(&source)
			.map_err(MountError::from)
			.and_then(mount);
		if let Err(err) = mounted {
			error_log!("Failed to mount prediction page: {}", err);
		}
	};

	if document.ready_state() == "loading" {
		listen(&document, "DOMContentLoaded", move |_event| run())
			.map_err(|err| JsValue::from_str(&err.to_string()))?;
	} else {
		run();
	}
	Ok(())
}
