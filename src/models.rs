//! Prediction models - persisted record and derived views
//!
//! A [`Prediction`] is the only persisted entity. [`PendingPrediction`] and
//! [`PredictionStats`] are computed on demand and never written to disk.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Days ahead of the due date at which a pending prediction is flagged as due soon
pub const DUE_SOON_WINDOW_DAYS: i64 = 2;

//=============================================================================
// RECORDS
//=============================================================================

/// A forecast with a confidence, a due date and, eventually, an outcome.
///
/// Field order here is the field order of the persisted document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// `PRED-<year>-<seq>`, assigned at creation
    pub id: String,
    /// The forecast itself
    #[serde(alias = "prediction")]
    pub statement: String,
    /// Classification tag (Diplomacy, Security, ...)
    pub domain: String,
    /// Stated probability as a percentage; the range is checked when adding, not when loading
    pub confidence: i32,
    pub created_date: NaiveDate,
    pub due_date: NaiveDate,
    /// How the prediction would be confirmed
    pub verification: String,
    /// How the prediction would be refuted
    pub falsification: String,
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(default)]
    pub outcome: Outcome,
    #[serde(default)]
    pub evaluated_date: Option<NaiveDate>,
    #[serde(default)]
    pub outcome_notes: Option<String>,
}

impl Prediction {
    pub fn is_pending(&self) -> bool {
        self.outcome == Outcome::Pending
    }

    /// Signed number of days from `today` until the due date.
    pub fn days_left(&self, today: NaiveDate) -> i64 {
        (self.due_date - today).num_days()
    }
}

/// Caller-supplied fields for a new prediction.
///
/// Identity, dates and outcome are filled in by the store.
#[derive(Debug, Clone, Default)]
pub struct PredictionDraft {
    pub statement: String,
    pub domain: String,
    pub confidence: i32,
    /// Offset from today; negative values are accepted
    pub due_in_days: i64,
    pub verification: String,
    pub falsification: String,
    pub sources: Vec<String>,
}

/// Resolution state of a prediction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    #[default]
    Pending,
    Correct,
    Incorrect,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Pending => "pending",
            Outcome::Correct => "correct",
            Outcome::Incorrect => "incorrect",
        }
    }

    /// Whether this outcome ends the prediction's lifecycle
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::Pending)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Outcome {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Outcome::Pending),
            "correct" => Ok(Outcome::Correct),
            "incorrect" => Ok(Outcome::Incorrect),
            other => Err(format!("unknown outcome '{}'", other)),
        }
    }
}

//=============================================================================
// DERIVED VIEWS
//=============================================================================

/// Display urgency of a pending prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    Overdue,
    DueToday,
    /// Due within [`DUE_SOON_WINDOW_DAYS`]; carries the days left
    DueSoon(i64),
}

impl Urgency {
    pub fn from_days_left(days_left: i64) -> Option<Self> {
        match days_left {
            d if d < 0 => Some(Urgency::Overdue),
            0 => Some(Urgency::DueToday),
            d if d <= DUE_SOON_WINDOW_DAYS => Some(Urgency::DueSoon(d)),
            _ => None,
        }
    }

    pub fn label(&self) -> String {
        match self {
            Urgency::Overdue => "OVERDUE".to_string(),
            Urgency::DueToday => "DUE TODAY".to_string(),
            Urgency::DueSoon(days) => format!("DUE IN {}d", days),
        }
    }
}

/// A pending prediction annotated for display
#[derive(Debug, Clone, PartialEq)]
pub struct PendingPrediction<'a> {
    pub prediction: &'a Prediction,
    pub days_left: i64,
    pub urgency: Option<Urgency>,
}

/// Aggregate accuracy and calibration over a collection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PredictionStats {
    pub total: usize,
    pub evaluated: usize,
    pub correct: usize,
    pub incorrect: usize,
    pub pending: usize,
    /// Percentage of evaluated predictions that were correct
    pub accuracy: f64,
    /// Mean squared error of confidence against outcome; lower is better
    pub brier_score: f64,
}

impl PredictionStats {
    pub fn from_predictions(predictions: &[Prediction]) -> Self {
        let mut stats = PredictionStats {
            total: predictions.len(),
            ..Default::default()
        };
        let mut squared_error = 0.0;

        for p in predictions {
            let indicator = match p.outcome {
                Outcome::Pending => {
                    stats.pending += 1;
                    continue;
                }
                Outcome::Correct => {
                    stats.correct += 1;
                    1.0
                }
                Outcome::Incorrect => {
                    stats.incorrect += 1;
                    0.0
                }
            };
            stats.evaluated += 1;
            squared_error += (f64::from(p.confidence) / 100.0 - indicator).powi(2);
        }

        if stats.evaluated > 0 {
            let evaluated = stats.evaluated as f64;
            stats.accuracy = stats.correct as f64 / evaluated * 100.0;
            stats.brier_score = squared_error / evaluated;
        }

        stats
    }
}
