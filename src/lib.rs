//! prediction-tracker: a file-backed ledger of forecasts
//!
//! Predictions are recorded with a confidence and a due date, resolved once
//! as correct or incorrect, and scored for accuracy and calibration (Brier
//! score). The whole collection lives in one JSON document that is rewritten
//! after every change.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod store;

pub use error::{Result, StoreError};
pub use models::{Outcome, PendingPrediction, Prediction, PredictionDraft, PredictionStats, Urgency};
pub use store::PredictionStore;
