//! [`FormSurface`] over the browser DOM

use crate::settings::ControllerSettings;
use crate::surface::{
	Border, CHECK_ANOTHER_ID, CONTAINER_ID, ERROR_BORDER_CLASS, FORM_ID, FormSurface,
	MESSAGE_CLASS, MESSAGE_ERROR_CLASS, OVERLAY_ACTIVE_CLASS, PROBABILITY_ID, RISK_BADGE_CLASS,
	RISK_ID, Region, ResultView, SUBMIT_BUTTON_ID, SUGGESTION_ID, SurfaceError, SurfaceResult,
	VALID_BORDER_CLASS, message_id,
};
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
	Document, Element, HtmlButtonElement, HtmlElement, HtmlInputElement, HtmlSelectElement,
	ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
};

pub(crate) fn js_error(err: JsValue) -> SurfaceError {
	SurfaceError::operation(err.as_string().unwrap_or_else(|| format!("{:?}", err)))
}

/// Live view of the prediction page
///
/// Cheap to clone; every event handler builds its own.
#[derive(Debug, Clone)]
pub struct DomSurface {
	document: Document,
	settings: Rc<ControllerSettings>,
}

impl DomSurface {
	pub fn new(document: Document, settings: Rc<ControllerSettings>) -> Self {
		Self { document, settings }
	}

	/// Surface over the current window's document
	pub fn from_window(settings: Rc<ControllerSettings>) -> SurfaceResult<Self> {
		let document = web_sys::window()
			.and_then(|window| window.document())
			.ok_or_else(|| SurfaceError::missing("document"))?;
		Ok(Self::new(document, settings))
	}

	pub fn document(&self) -> &Document {
		&self.document
	}

	fn by_id(&self, id: &str) -> SurfaceResult<Element> {
		self.document
			.get_element_by_id(id)
			.ok_or_else(|| SurfaceError::missing(id))
	}

	fn html_by_id(&self, id: &str) -> SurfaceResult<HtmlElement> {
		self.by_id(id)?
			.dyn_into::<HtmlElement>()
			.map_err(|_| SurfaceError::operation(format!("{} is not an HTML element", id)))
	}

	/// Form control named `field`
	pub fn control(&self, field: &str) -> SurfaceResult<HtmlElement> {
		let selector = format!("#{} [name=\"{}\"]", FORM_ID, field);
		self.document
			.query_selector(&selector)
			.map_err(js_error)?
			.ok_or_else(|| SurfaceError::missing(field))?
			.dyn_into::<HtmlElement>()
			.map_err(|_| SurfaceError::operation(format!("{} is not an HTML element", field)))
	}

	fn set_style(&self, element: &HtmlElement, property: &str, value: &str) -> SurfaceResult<()> {
		element
			.style()
			.set_property(property, value)
			.map_err(js_error)
	}

	fn set_display(&self, id: &str, visible: bool) -> SurfaceResult<()> {
		let element = self.html_by_id(id)?;
		self.set_style(&element, "display", if visible { "block" } else { "none" })
	}
}

impl FormSurface for DomSurface {
	fn field_value(&self, field: &str) -> SurfaceResult<Option<String>> {
		let control = self.control(field)?;
		if let Some(input) = control.dyn_ref::<HtmlInputElement>() {
			return Ok(Some(input.value()));
		}
		if let Some(select) = control.dyn_ref::<HtmlSelectElement>() {
			return Ok(Some(select.value()));
		}
		Ok(None)
	}

	fn set_field_value(&mut self, field: &str, value: &str) -> SurfaceResult<()> {
		let control = self.control(field)?;
		if let Some(input) = control.dyn_ref::<HtmlInputElement>() {
			input.set_value(value);
		} else if let Some(select) = control.dyn_ref::<HtmlSelectElement>() {
			select.set_value(value);
		} else {
			return Err(SurfaceError::operation(format!("{} does not hold a value", field)));
		}
		Ok(())
	}

	fn set_message(&mut self, field: &str, message: Option<&str>) -> SurfaceResult<()> {
		// Controls without a message slot have nothing to clear
		let Some(slot) = self.document.get_element_by_id(&message_id(field)) else {
			return match message {
				Some(_) => Err(SurfaceError::missing(message_id(field))),
				None => Ok(()),
			};
		};
		match message {
			Some(text) => {
				slot.set_text_content(Some(text));
				slot.set_class_name(&format!("{} {}", MESSAGE_CLASS, MESSAGE_ERROR_CLASS));
			}
			None => {
				slot.set_text_content(Some(""));
				slot.set_class_name(MESSAGE_CLASS);
			}
		}
		Ok(())
	}

	fn border(&self, field: &str) -> SurfaceResult<Border> {
		let classes = self.control(field)?.class_list();
		Ok(if classes.contains(ERROR_BORDER_CLASS) {
			Border::Error
		} else if classes.contains(VALID_BORDER_CLASS) {
			Border::Valid
		} else {
			Border::None
		})
	}

	fn set_border(&mut self, field: &str, border: Border) -> SurfaceResult<()> {
		let classes = self.control(field)?.class_list();
		classes
			.remove_2(ERROR_BORDER_CLASS, VALID_BORDER_CLASS)
			.map_err(js_error)?;
		if let Some(class) = border.class_name() {
			classes.add_1(class).map_err(js_error)?;
		}
		Ok(())
	}

	fn set_select_filled(&mut self, field: &str, filled: bool) -> SurfaceResult<()> {
		let control = self.control(field)?;
		let color = if filled {
			&self.settings.filled_border_color
		} else {
			&self.settings.neutral_border_color
		};
		self.set_style(&control, "border-color", color)?;
		self.set_style(&control, "border-width", "1px")?;
		self.set_style(&control, "border-style", "solid")
	}

	fn focus_field(&mut self, field: &str) -> SurfaceResult<()> {
		let control = self.control(field)?;
		let options = ScrollIntoViewOptions::new();
		options.set_behavior(ScrollBehavior::Smooth);
		options.set_block(ScrollLogicalPosition::Center);
		control.scroll_into_view_with_scroll_into_view_options(&options);
		control.focus().map_err(js_error)
	}

	fn set_visible(&mut self, region: Region, visible: bool) -> SurfaceResult<()> {
		match region {
			Region::PageLoading => {
				let classes = self.by_id(region.element_id())?.class_list();
				let toggled = if visible {
					classes.add_1(OVERLAY_ACTIVE_CLASS)
				} else {
					classes.remove_1(OVERLAY_ACTIVE_CLASS)
				};
				toggled.map_err(js_error)
			}
			_ => self.set_display(region.element_id(), visible),
		}
	}

	fn set_error_text(&mut self, text: &str) -> SurfaceResult<()> {
		self.by_id(Region::ErrorBox.element_id())?
			.set_text_content(Some(text));
		Ok(())
	}

	fn set_results_reserved(&mut self, reserved: bool) -> SurfaceResult<()> {
		let container = self.html_by_id(CONTAINER_ID)?;
		let (height, margin) = if reserved {
			(
				self.settings.reserved_height.as_str(),
				self.settings.reserved_margin.as_str(),
			)
		} else {
			("0", "0")
		};
		self.set_style(&container, "height", height)?;
		self.set_style(&container, "margin-top", margin)
	}

	fn set_check_another_visible(&mut self, visible: bool) -> SurfaceResult<()> {
		let control = self.html_by_id(CHECK_ANOTHER_ID)?;
		self.set_style(&control, "opacity", if visible { "1" } else { "0" })
	}

	fn set_submit_control(&mut self, enabled: bool, label: &str) -> SurfaceResult<()> {
		let button = self
			.by_id(SUBMIT_BUTTON_ID)?
			.dyn_into::<HtmlButtonElement>()
			.map_err(|_| SurfaceError::operation(format!("{} is not a button", SUBMIT_BUTTON_ID)))?;
		button.set_disabled(!enabled);
		button.set_text_content(Some(label));
		Ok(())
	}

	fn render_result(&mut self, view: &ResultView) -> SurfaceResult<()> {
		self.by_id(PROBABILITY_ID)?
			.set_text_content(Some(&view.probability_text));

		let risk = self.by_id(RISK_ID)?;
		risk.set_text_content(Some(&view.risk_text));
		risk.set_class_name(&format!("{} {}", RISK_BADGE_CLASS, view.risk_variant));

		self.by_id(SUGGESTION_ID)?
			.set_text_content(Some(&view.suggestion));
		Ok(())
	}
}
