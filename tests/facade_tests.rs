//! Facade Integration Tests
//!
//! Checks that the `churnguard` facade exposes the validation core and,
//! with the `pages` feature, the page controllers.

use churnguard::prelude::*;
use rstest::rstest;

#[rstest]
#[case("tenure_months", "", Some("Please enter tenure months"))]
#[case("tenure_months", "80", Some("Must be between 1-75 months"))]
#[case("avg_call_minutes", "many", Some("Please enter a valid number"))]
#[case("payment_method", "cash", None)]
fn test_validation_through_prelude(
	#[case] field: &str,
	#[case] value: &str,
	#[case] message: Option<&str>,
) {
	let validator = FieldValidator::new(RuleTable::churn());

	let outcome = validator.validate(field, Some(value), true);

	assert!(!outcome.valid);
	assert_eq!(outcome.message.as_deref(), message);
}

#[cfg(feature = "pages")]
#[rstest]
#[tokio::test]
async fn test_submit_through_facade() {
	use churnguard::pages::testing::{ManualClock, MemorySurface, MockPredictionClient};

	let client = MockPredictionClient::new().succeed(42.5, "MEDIUM", "Review the contract");
	let mut orchestrator =
		SubmissionOrchestrator::churn(client, ManualClock::new(), ControllerSettings::default());
	let mut surface = MemorySurface::churn();
	Scenario::Medium
		.apply(&orchestrator.feedback(), &mut surface)
		.unwrap();

	let outcome = orchestrator.submit(&mut surface).await.unwrap();

	match outcome {
		SubmitOutcome::Predicted(view) => {
			assert_eq!(view.probability_text, "42.5%");
			assert_eq!(view.risk_variant, "medium");
		}
		other => panic!("unexpected outcome: {:?}", other),
	}
	assert_eq!(orchestrator.state(), SubmissionState::Idle);
}
