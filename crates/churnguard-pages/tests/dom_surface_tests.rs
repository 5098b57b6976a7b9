//! DOM Surface Tests
//!
//! Runs `DomSurface` against a copy of the prediction page markup mounted
//! in the test browser's document.

#![cfg(target_arch = "wasm32")]

use churnguard_forms::RuleTable;
use churnguard_pages::dom::DomSurface;
use churnguard_pages::launcher;
use churnguard_pages::settings::ControllerSettings;
use churnguard_pages::surface::{Border, FormSurface, Region, ResultView};
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

const PAGE: &str = r#"
<div id="bodyLoading"></div>
<form id="churnForm">
	<input name="tenure_months" type="number">
	<span id="tenure_months_msg" class="validation-message"></span>
	<select name="contract_type">
		<option value=""></option>
		<option value="month-to-month">Month-to-month</option>
		<option value="one year">One year</option>
		<option value="two year">Two year</option>
	</select>
	<span id="contract_type_msg" class="validation-message"></span>
	<input name="monthly_charges" type="number">
	<span id="monthly_charges_msg" class="validation-message"></span>
	<select name="payment_method">
		<option value=""></option>
		<option value="electronic check">Electronic check</option>
		<option value="credit card">Credit card</option>
		<option value="bank transfer">Bank transfer</option>
	</select>
	<span id="payment_method_msg" class="validation-message"></span>
	<input name="support_ticket_count" type="number">
	<span id="support_ticket_count_msg" class="validation-message"></span>
	<input name="avg_call_minutes" type="number">
	<input name="avg_data_usage_gb" type="number">
	<span id="avg_data_usage_gb_msg" class="validation-message"></span>
	<div id="buttonContainer">
		<button id="predictBtn" type="submit">Predict Churn</button>
		<button id="checkAnotherBtn" type="button">Check another</button>
	</div>
</form>
<div id="errorBox" style="display: none"></div>
<h3 id="resultHeading" style="display: none"></h3>
<div id="loading" style="display: none"></div>
<div id="resultBox" style="display: none">
	<span id="probText"></span>
	<span id="riskText" class="risk-badge"></span>
	<span id="suggestionText"></span>
</div>
"#;

/// Page markup attached to the body, removed on drop
struct Fixture {
	root: Element,
	surface: DomSurface,
}

impl Fixture {
	fn mount() -> Self {
		let document = document();
		let root = document.create_element("div").unwrap();
		root.set_inner_html(PAGE);
		document.body().unwrap().append_child(&root).unwrap();

		let surface = DomSurface::new(document, Rc::new(ControllerSettings::default()));
		Self { root, surface }
	}

	fn element(&self, id: &str) -> HtmlElement {
		document()
			.get_element_by_id(id)
			.unwrap()
			.dyn_into::<HtmlElement>()
			.unwrap()
	}

	fn style(&self, id: &str, property: &str) -> String {
		self.element(id)
			.style()
			.get_property_value(property)
			.unwrap()
	}
}

impl Drop for Fixture {
	fn drop(&mut self) {
		self.root.remove();
	}
}

fn document() -> Document {
	web_sys::window().unwrap().document().unwrap()
}

#[wasm_bindgen_test]
fn test_field_values_round_trip() {
	let mut page = Fixture::mount();

	page.surface.set_field_value("tenure_months", "12").unwrap();
	page.surface
		.set_field_value("contract_type", "month-to-month")
		.unwrap();

	assert_eq!(
		page.surface.field_value("tenure_months").unwrap().as_deref(),
		Some("12")
	);
	assert_eq!(
		page.surface.field_value("contract_type").unwrap().as_deref(),
		Some("month-to-month")
	);
}

#[wasm_bindgen_test]
fn test_set_message_toggles_error_class() {
	let mut page = Fixture::mount();

	page.surface
		.set_message("tenure_months", Some("Please enter tenure months"))
		.unwrap();
	let slot = page.element("tenure_months_msg");
	assert_eq!(slot.text_content().as_deref(), Some("Please enter tenure months"));
	assert_eq!(slot.class_name(), "validation-message error");

	page.surface.set_message("tenure_months", None).unwrap();
	let slot = page.element("tenure_months_msg");
	assert_eq!(slot.text_content().as_deref(), Some(""));
	assert_eq!(slot.class_name(), "validation-message");
}

#[wasm_bindgen_test]
fn test_clearing_missing_message_slot_is_allowed() {
	let mut page = Fixture::mount();

	assert!(page.surface.set_message("avg_call_minutes", None).is_ok());
	assert!(
		page.surface
			.set_message("avg_call_minutes", Some("Please enter a valid number"))
			.is_err()
	);
}

#[wasm_bindgen_test]
fn test_set_border_keeps_one_class() {
	let mut page = Fixture::mount();

	page.surface.set_border("tenure_months", Border::Valid).unwrap();
	assert_eq!(page.surface.border("tenure_months").unwrap(), Border::Valid);

	page.surface.set_border("tenure_months", Border::Error).unwrap();
	let classes = page.surface.control("tenure_months").unwrap().class_list();
	assert!(classes.contains("error-border"));
	assert!(!classes.contains("valid-border"));

	page.surface.clear_valid_border("tenure_months").unwrap();
	assert_eq!(page.surface.border("tenure_months").unwrap(), Border::Error);

	page.surface.set_border("tenure_months", Border::None).unwrap();
	assert_eq!(page.surface.border("tenure_months").unwrap(), Border::None);
}

#[wasm_bindgen_test]
fn test_render_result_sets_badge_variant() {
	let mut page = Fixture::mount();
	let view = ResultView {
		probability_text: "87.35%".to_string(),
		risk_text: "HIGH".to_string(),
		risk_variant: "high".to_string(),
		suggestion: "Call the customer".to_string(),
	};

	page.surface.render_result(&view).unwrap();

	assert_eq!(page.element("probText").text_content().as_deref(), Some("87.35%"));
	let risk = page.element("riskText");
	assert_eq!(risk.text_content().as_deref(), Some("HIGH"));
	assert_eq!(risk.class_name(), "risk-badge high");
	assert_eq!(
		page.element("suggestionText").text_content().as_deref(),
		Some("Call the customer")
	);
}

#[wasm_bindgen_test]
fn test_set_visible_regions() {
	let mut page = Fixture::mount();

	page.surface.set_visible(Region::ResultBox, true).unwrap();
	assert_eq!(page.style("resultBox", "display"), "block");
	page.surface.set_visible(Region::ResultBox, false).unwrap();
	assert_eq!(page.style("resultBox", "display"), "none");

	page.surface.set_visible(Region::PageLoading, true).unwrap();
	assert!(page.element("bodyLoading").class_list().contains("active"));
	page.surface.set_visible(Region::PageLoading, false).unwrap();
	assert!(!page.element("bodyLoading").class_list().contains("active"));
}

#[wasm_bindgen_test]
fn test_set_results_reserved() {
	let mut page = Fixture::mount();

	page.surface.set_results_reserved(true).unwrap();
	assert_eq!(page.style("buttonContainer", "height"), "60px");
	assert_eq!(page.style("buttonContainer", "margin-top"), "10px");

	page.surface.set_results_reserved(false).unwrap();
	assert_eq!(page.style("buttonContainer", "height"), "0px");
	assert_eq!(page.style("buttonContainer", "margin-top"), "0px");
}

#[wasm_bindgen_test]
fn test_submit_control_and_check_another() {
	let mut page = Fixture::mount();

	page.surface.set_submit_control(false, "Processing...").unwrap();
	let button = page
		.element("predictBtn")
		.dyn_into::<HtmlButtonElement>()
		.unwrap();
	assert!(button.disabled());
	assert_eq!(button.text_content().as_deref(), Some("Processing..."));

	page.surface.set_check_another_visible(false).unwrap();
	assert_eq!(page.style("checkAnotherBtn", "opacity"), "0");
	page.surface.set_check_another_visible(true).unwrap();
	assert_eq!(page.style("checkAnotherBtn", "opacity"), "1");
}

#[wasm_bindgen_test]
fn test_error_text_and_missing_element() {
	let mut page = Fixture::mount();

	page.surface.set_error_text("Error: Invalid input").unwrap();
	assert_eq!(
		page.element("errorBox").text_content().as_deref(),
		Some("Error: Invalid input")
	);

	let err = page.surface.border("coupon").unwrap_err();
	assert_eq!(err.to_string(), "Element not found: coupon");
}

#[wasm_bindgen_test]
fn test_mount_publishes_presets() {
	let page = Fixture::mount();
	launcher::mount(ControllerSettings::default()).unwrap();

	let window = web_sys::window().unwrap();
	let fill = js_sys::Reflect::get(&window, &JsValue::from_str("fillLowRiskCustomer")).unwrap();
	assert!(fill.is_function());

	launcher::fill_low_risk_customer();

	assert_eq!(
		page.surface.field_value("contract_type").unwrap().as_deref(),
		Some("two year")
	);
	for field in RuleTable::churn().field_names() {
		assert_eq!(page.surface.border(field).unwrap(), Border::Valid, "{}", field);
	}
}

#[wasm_bindgen_test]
fn test_page_settings_from_embedded_toml() {
	let page = Fixture::mount();
	let block = document().create_element("script").unwrap();
	block.set_id(launcher::SETTINGS_ID);
	block.set_attribute("type", "application/toml").unwrap();
	block.set_text_content(Some("endpoint = \"/api/predict\"\nminimum_duration_ms = 1500\n"));
	page.root.append_child(&block).unwrap();

	let settings = launcher::page_settings(&document()).unwrap();

	assert_eq!(settings.endpoint, "/api/predict");
	assert_eq!(settings.minimum_duration_ms, 1500);
	assert_eq!(settings.submit_label, "Predict Churn");
}

#[wasm_bindgen_test]
fn test_page_settings_default_and_invalid() {
	let page = Fixture::mount();
	assert_eq!(
		launcher::page_settings(&document()).unwrap(),
		ControllerSettings::default()
	);

	let block = document().create_element("script").unwrap();
	block.set_id(launcher::SETTINGS_ID);
	block.set_text_content(Some("endpoint = \"\""));
	page.root.append_child(&block).unwrap();

	assert!(launcher::page_settings(&document()).is_err());
}
