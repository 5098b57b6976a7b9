//! Visual feedback for form controls
//!
//! Event handling is split in two steps:
//!
//! 1. [`decide`] turns a field event and the current value into a
//!    [`FieldFeedback`] without touching the page
//! 2. [`FeedbackController::apply`] writes that decision to a [`FormSurface`]
//!
//! | event | message | border | select color |
//! |-------|---------|--------|--------------|
//! | blur | cleared | valid if non-empty and passing, else none | untouched |
//! | change (select) | cleared | same as blur | filled iff non-empty |
//! | change (other) | cleared | valid border dropped, error kept | untouched |
//! | input | cleared | error border dropped, valid kept | untouched |
//! | submit | rule message | error if failing, valid if passing | untouched |

use crate::surface::{Border, FormSurface, SurfaceResult};
use churnguard_forms::{FieldValidator, RuleTable, ValidationOutcome, is_blank};

/// Interactive events a control can raise
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEvent {
	Blur,
	Change,
	Input,
}

/// How a control's border changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderUpdate {
	Keep,
	Set(Border),
	/// Remove only the error border
	DropError,
	/// Remove only the valid border
	DropValid,
}

/// Presentation decision for one control
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFeedback {
	pub border: BorderUpdate,
	/// `None` clears the message slot
	pub message: Option<String>,
	/// New select color state, `None` leaves it as is
	pub filled: Option<bool>,
	/// Leave the control alone entirely
	pub untouched: bool,
}

impl FieldFeedback {
	/// Feedback for a control without a rule
	pub fn untouched() -> Self {
		Self {
			border: BorderUpdate::Keep,
			message: None,
			filled: None,
			untouched: true,
		}
	}

	/// Full re-render of a control from a validation outcome
	///
	/// The previous message and borders are always replaced. A failing value
	/// only gets the error border in full-check mode; quiet failures end up
	/// with no border at all.
	///
	/// # Examples
	///
	/// ```
	/// use churnguard_forms::{FailureReason, ValidationOutcome};
	/// use churnguard_pages::feedback::{BorderUpdate, FieldFeedback};
	/// use churnguard_pages::surface::Border;
	///
	/// let outcome = ValidationOutcome::invalid(
	///     FailureReason::Missing,
	///     Some("Please enter tenure months".to_string()),
	/// );
	/// let feedback = FieldFeedback::from_outcome(&outcome, true, true);
	/// assert_eq!(feedback.border, BorderUpdate::Set(Border::Error));
	/// assert_eq!(feedback.message.as_deref(), Some("Please enter tenure months"));
	/// ```
	pub fn from_outcome(outcome: &ValidationOutcome, show_all_errors: bool, blank: bool) -> Self {
		let border = if outcome.valid {
			if blank { Border::None } else { Border::Valid }
		} else if show_all_errors {
			Border::Error
		} else {
			Border::None
		};
		let message = if show_all_errors && !outcome.valid {
			outcome.message.clone()
		} else {
			None
		};

		Self {
			border: BorderUpdate::Set(border),
			message,
			filled: None,
			untouched: false,
		}
	}

	/// Quiet feedback: valid border or nothing, never a message
	pub fn quiet(outcome: &ValidationOutcome, blank: bool) -> Self {
		Self::from_outcome(outcome, false, blank)
	}

	/// Optimistic clearing while the user edits
	pub fn editing() -> Self {
		Self {
			border: BorderUpdate::DropError,
			message: None,
			filled: None,
			untouched: false,
		}
	}
}

/// Decide the feedback for an interactive event
///
/// Controls without a rule are left untouched.
pub fn decide(
	validator: &FieldValidator<'_>,
	event: FieldEvent,
	field: &str,
	value: Option<&str>,
) -> FieldFeedback {
	let Some(rule) = validator.table().get_rule(field) else {
		return FieldFeedback::untouched();
	};
	let blank = is_blank(value);

	match event {
		FieldEvent::Blur => FieldFeedback::quiet(&validator.validate(field, value, false), blank),
		FieldEvent::Change if rule.is_choice() => FieldFeedback {
			filled: Some(!blank),
			..FieldFeedback::quiet(&validator.validate(field, value, false), blank)
		},
		// A committed number may no longer be the one that passed on blur
		FieldEvent::Change => FieldFeedback {
			border: BorderUpdate::DropValid,
			..FieldFeedback::editing()
		},
		FieldEvent::Input => FieldFeedback::editing(),
	}
}

/// Applies validation feedback to a [`FormSurface`]
#[derive(Debug, Clone, Copy)]
pub struct FeedbackController<'a> {
	validator: FieldValidator<'a>,
}

impl<'a> FeedbackController<'a> {
	pub fn new(table: &'a RuleTable) -> Self {
		Self {
			validator: FieldValidator::new(table),
		}
	}

	pub fn validator(&self) -> &FieldValidator<'a> {
		&self.validator
	}

	pub fn table(&self) -> &'a RuleTable {
		self.validator.table()
	}

	/// Write a decision to the surface
	pub fn apply<S>(
		&self,
		surface: &mut S,
		field: &str,
		feedback: &FieldFeedback,
	) -> SurfaceResult<()>
	where
		S: FormSurface + ?Sized,
	{
		if feedback.untouched {
			return Ok(());
		}

		surface.set_message(field, feedback.message.as_deref())?;
		match feedback.border {
			BorderUpdate::Keep => {}
			BorderUpdate::Set(border) => surface.set_border(field, border)?,
			BorderUpdate::DropError => surface.clear_error_border(field)?,
			BorderUpdate::DropValid => surface.clear_valid_border(field)?,
		}
		if let Some(filled) = feedback.filled {
			surface.set_select_filled(field, filled)?;
		}
		Ok(())
	}

	/// Remove every message and border from the form
	pub fn clear_all<S>(&self, surface: &mut S) -> SurfaceResult<()>
	where
		S: FormSurface + ?Sized,
	{
		for field in self.table().field_names() {
			surface.set_message(field, None)?;
			surface.set_border(field, Border::None)?;
		}
		Ok(())
	}

	/// Put every select back to its neutral border color
	pub fn init_select_borders<S>(&self, surface: &mut S) -> SurfaceResult<()>
	where
		S: FormSurface + ?Sized,
	{
		for rule in self.table().iter().filter(|rule| rule.is_choice()) {
			surface.set_select_filled(&rule.name, false)?;
		}
		Ok(())
	}

	/// Validate the current value of `field` and render the outcome
	pub fn validate_field<S>(
		&self,
		surface: &mut S,
		field: &str,
		show_all_errors: bool,
	) -> SurfaceResult<ValidationOutcome>
	where
		S: FormSurface + ?Sized,
	{
		let value = surface.field_value(field)?;
		let outcome = self
			.validator
			.validate(field, value.as_deref(), show_all_errors);

		if self.table().get_rule(field).is_some() {
			let feedback =
				FieldFeedback::from_outcome(&outcome, show_all_errors, is_blank(value.as_deref()));
			self.apply(surface, field, &feedback)?;
		}
		Ok(outcome)
	}

	/// Handle an interactive event on `field`
	pub fn handle<S>(
		&self,
		surface: &mut S,
		event: FieldEvent,
		field: &str,
	) -> SurfaceResult<FieldFeedback>
	where
		S: FormSurface + ?Sized,
	{
		let value = surface.field_value(field)?;
		let feedback = decide(&self.validator, event, field, value.as_deref());
		self.apply(surface, field, &feedback)?;
		Ok(feedback)
	}

	pub fn apply_blur_feedback<S>(
		&self,
		surface: &mut S,
		field: &str,
	) -> SurfaceResult<FieldFeedback>
	where
		S: FormSurface + ?Sized,
	{
		self.handle(surface, FieldEvent::Blur, field)
	}

	pub fn apply_change_feedback<S>(
		&self,
		surface: &mut S,
		field: &str,
	) -> SurfaceResult<FieldFeedback>
	where
		S: FormSurface + ?Sized,
	{
		self.handle(surface, FieldEvent::Change, field)
	}

	pub fn apply_input_feedback<S>(
		&self,
		surface: &mut S,
		field: &str,
	) -> SurfaceResult<FieldFeedback>
	where
		S: FormSurface + ?Sized,
	{
		self.handle(surface, FieldEvent::Input, field)
	}

	/// Replay blur on every control and change on every select
	///
	/// Used after values are written programmatically so the borders match
	/// the new values without user interaction.
	pub fn trigger_quiet_pass<S>(&self, surface: &mut S) -> SurfaceResult<()>
	where
		S: FormSurface + ?Sized,
	{
		for rule in self.table().iter() {
			self.apply_blur_feedback(surface, &rule.name)?;
			if rule.is_choice() {
				self.apply_change_feedback(surface, &rule.name)?;
			}
		}
		Ok(())
	}
}
