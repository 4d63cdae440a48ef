//! Prediction store
//!
//! Owns the in-memory collection and its backing JSON document. Every
//! mutation rewrites the whole document; there is no incremental format.
//!
//! Operations that depend on the current date have an `_on` variant taking
//! the date explicitly. The plain variants use the local calendar date.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Datelike, Local, NaiveDate, TimeDelta};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{Result, StoreError};
use crate::models::{Outcome, PendingPrediction, Prediction, PredictionDraft, PredictionStats, Urgency};

/// Current local calendar date
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// File-backed collection of predictions
#[derive(Debug)]
pub struct PredictionStore {
    path: PathBuf,
    predictions: Vec<Prediction>,
}

impl PredictionStore {
    /// Load the document at `path`, or start empty if it does not exist.
    ///
    /// A document that exists but cannot be read or parsed is an error;
    /// the store refuses to start from a partial view.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let predictions = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|source| StoreError::Io {
                path: path.clone(),
                source,
            })?;
            serde_json::from_str(&content).map_err(|source| StoreError::Corrupt {
                path: path.clone(),
                source,
            })?
        } else {
            info!(path = %path.display(), "No prediction document found, starting empty");
            Vec::new()
        };

        debug!(path = %path.display(), count = predictions.len(), "Loaded predictions");
        Ok(Self { path, predictions })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All records in storage order
    pub fn predictions(&self) -> &[Prediction] {
        &self.predictions
    }

    pub fn len(&self) -> usize {
        self.predictions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predictions.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Prediction> {
        self.predictions.iter().find(|p| p.id == id)
    }

    /// Rewrite the whole document.
    ///
    /// Writes a sibling `.tmp` file and renames it over the target.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.predictions.serialize(&mut serializer)?;
        buf.push(b'\n');

        let mut tmp_name = self.path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);

        fs::write(&tmp_path, &buf).map_err(|source| StoreError::Io {
            path: tmp_path.clone(),
            source,
        })?;
        if let Err(source) = fs::rename(&tmp_path, &self.path) {
            fs::remove_file(&tmp_path).ok();
            return Err(StoreError::Io {
                path: self.path.clone(),
                source,
            });
        }

        info!(
            count = self.predictions.len(),
            path = %self.path.display(),
            "Saved predictions"
        );
        Ok(())
    }

    /// Record a new prediction created today. Returns its id.
    pub fn add(&mut self, draft: PredictionDraft) -> Result<String> {
        self.add_on(draft, today())
    }

    /// Record a new prediction created on `today`. Returns its id.
    pub fn add_on(&mut self, draft: PredictionDraft, today: NaiveDate) -> Result<String> {
        if !(0..=100).contains(&draft.confidence) {
            return Err(StoreError::InvalidConfidence(draft.confidence));
        }
        let due_date = TimeDelta::try_days(draft.due_in_days)
            .and_then(|offset| today.checked_add_signed(offset))
            .ok_or(StoreError::InvalidDueOffset(draft.due_in_days))?;

        let id = self.next_id(today.year());
        self.predictions.push(Prediction {
            id: id.clone(),
            statement: draft.statement,
            domain: draft.domain,
            confidence: draft.confidence,
            created_date: today,
            due_date,
            verification: draft.verification,
            falsification: draft.falsification,
            sources: draft.sources,
            outcome: Outcome::Pending,
            evaluated_date: None,
            outcome_notes: None,
        });

        if let Err(e) = self.save() {
            self.predictions.pop();
            return Err(e);
        }

        info!(id = %id, due = %due_date, "Added prediction");
        Ok(id)
    }

    /// Resolve a pending prediction as of today.
    ///
    /// Returns `Ok(false)` when no record has this id; nothing is written.
    pub fn evaluate(&mut self, id: &str, outcome: Outcome, notes: Option<String>) -> Result<bool> {
        self.evaluate_on(id, outcome, notes, today())
    }

    /// Resolve a pending prediction as of `today`.
    pub fn evaluate_on(
        &mut self,
        id: &str,
        outcome: Outcome,
        notes: Option<String>,
        today: NaiveDate,
    ) -> Result<bool> {
        if !outcome.is_terminal() {
            return Err(StoreError::InvalidOutcome(outcome));
        }

        let Some(index) = self.predictions.iter().position(|p| p.id == id) else {
            info!(id = %id, "Prediction not found, nothing to evaluate");
            return Ok(false);
        };

        let current = self.predictions[index].outcome;
        if current.is_terminal() {
            warn!(id = %id, outcome = %current, "Rejected re-evaluation");
            return Err(StoreError::AlreadyEvaluated {
                id: id.to_string(),
                outcome: current,
            });
        }

        let previous = self.predictions[index].clone();
        let record = &mut self.predictions[index];
        record.outcome = outcome;
        record.evaluated_date = Some(today);
        record.outcome_notes = notes;

        if let Err(e) = self.save() {
            self.predictions[index] = previous;
            return Err(e);
        }

        info!(id = %id, outcome = %outcome, "Evaluated prediction");
        Ok(true)
    }

    /// Pending predictions by due date, annotated relative to today.
    pub fn list_pending(&self) -> Vec<PendingPrediction<'_>> {
        self.list_pending_on(today())
    }

    pub fn list_pending_on(&self, today: NaiveDate) -> Vec<PendingPrediction<'_>> {
        let mut pending: Vec<PendingPrediction<'_>> = self
            .predictions
            .iter()
            .filter(|p| p.is_pending())
            .map(|p| {
                let days_left = p.days_left(today);
                PendingPrediction {
                    prediction: p,
                    days_left,
                    urgency: Urgency::from_days_left(days_left),
                }
            })
            .collect();

        pending.sort_by_key(|entry| entry.prediction.due_date);
        pending
    }

    pub fn stats(&self) -> PredictionStats {
        PredictionStats::from_predictions(&self.predictions)
    }

    /// Next free id for `year`: one past the number of ids already carrying
    /// the year's prefix, advanced further if that id is taken.
    fn next_id(&self, year: i32) -> String {
        let prefix = format!("PRED-{}-", year);
        let existing = self
            .predictions
            .iter()
            .filter(|p| p.id.starts_with(&prefix))
            .count();

        let mut seq = existing + 1;
        loop {
            let candidate = format!("{}{:03}", prefix, seq);
            if self.get(&candidate).is_none() {
                debug!(id = %candidate, "Generated prediction id");
                return candidate;
            }
            warn!(id = %candidate, "Generated id already in use, advancing sequence");
            seq += 1;
        }
    }
}
