//! `reqwest`-backed prediction client
//!
//! `reqwest` uses `fetch` on `wasm32` and hyper natively, so the same client
//! serves the browser page and native tests.

use super::prediction::{
	PredictError, PredictResult, Prediction, PredictionClient, interpret_response,
};
use crate::{debug_log, info_log, warn_log};
use async_trait::async_trait;
use churnguard_forms::{FORM_CONTENT_TYPE, FormPayload};
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;

/// Posts form-encoded payloads to the prediction endpoint
///
/// # Examples
///
/// ```no_run
/// use churnguard_pages::api::{HttpPredictionClient, PredictionClient};
/// use churnguard_pages::presets::Scenario;
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let client = HttpPredictionClient::new("http://localhost:8000/predict");
/// let prediction = client.predict(&Scenario::Low.payload()).await?;
/// println!("{} risk", prediction.risk);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpPredictionClient {
	client: Client,
	url: String,
}

impl HttpPredictionClient {
	pub fn new(url: impl Into<String>) -> Self {
		Self::with_client(Client::new(), url)
	}

	/// Use a preconfigured `reqwest` client
	pub fn with_client(client: Client, url: impl Into<String>) -> Self {
		Self {
			client,
			url: url.into(),
		}
	}

	pub fn url(&self) -> &str {
		&self.url
	}
}

#[async_trait(?Send)]
impl PredictionClient for HttpPredictionClient {
	async fn predict(&self, payload: &FormPayload) -> PredictResult<Prediction> {
		let body = payload.to_urlencoded()?;
		debug_log!("POST {} body={}", self.url, body);

		let response = self
			.client
			.post(&self.url)
			.header(CONTENT_TYPE, FORM_CONTENT_TYPE)
			.body(body)
			.send()
			.await
			.map_err(|e| PredictError::Network(e.to_string()))?;

		let status = response.status().as_u16();
		let text = response
			.text()
			.await
			.map_err(|e| PredictError::Network(e.to_string()))?;

		let result = interpret_response(status, &text);
		match &result {
			Ok(prediction) => info_log!(
				"Prediction received: {} ({}%)",
				prediction.risk,
				prediction.probability
			),
			Err(err) => warn_log!("Prediction request failed: {}", err),
		}
		result
	}
}
