//! Prediction service client
//!
//! - [`prediction`]: wire types, errors and the [`PredictionClient`] seam
//! - [`client`]: the `reqwest` implementation used by the page

pub mod client;
pub mod prediction;

pub use client::HttpPredictionClient;
pub use prediction::{
	ErrorBody, FALLBACK_ERROR_MESSAGE, PredictError, PredictResult, Prediction, PredictionClient,
	RiskLevel, interpret_response,
};
