//! Page controllers
//!
//! This module provides access to churnguard-pages: visual feedback, the
//! submission state machine, scenario presets, reset, and the prediction
//! client. On `wasm32` it also mounts the controllers on the live page.
//!
//! ## Example
//!
//! ```rust
//! use churnguard::pages::feedback::FeedbackController;
//! use churnguard::pages::presets::Scenario;
//! use churnguard::pages::surface::Border;
//! use churnguard::pages::testing::MemorySurface;
//! use churnguard::pages::FormSurface;
//! use churnguard::RuleTable;
//!
//! let feedback = FeedbackController::new(RuleTable::churn());
//! let mut surface = MemorySurface::churn();
//! Scenario::High.apply(&feedback, &mut surface).unwrap();
//! assert_eq!(surface.border("tenure_months").unwrap(), Border::Valid);
//! ```

// Re-export all churnguard-pages functionality
pub use churnguard_pages::*;
