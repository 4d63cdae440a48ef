//! Interactive add and evaluate flows
//!
//! Invalid answers are reported and the flow returns before the store is
//! touched. Store and I/O failures propagate to the caller.

use std::io::{BufRead, Write};

use chrono::NaiveDate;
use tracing::debug;

use super::display::{banner, divider, format_prediction, preview};
use super::prompt::Prompter;
use crate::config::DisplayConfig;
use crate::models::{Outcome, PredictionDraft};
use crate::store::PredictionStore;

/// Split a comma-separated answer into trimmed, non-empty sources
pub fn parse_sources(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Collect a new prediction and add it on confirmation.
///
/// Returns the new id, or `None` when cancelled or aborted.
pub fn interactive_add<R: BufRead, W: Write>(
    store: &mut PredictionStore,
    prompter: &mut Prompter<R, W>,
    display: &DisplayConfig,
    today: NaiveDate,
) -> anyhow::Result<Option<String>> {
    prompter.say(format!("\n{}", banner("ADD NEW PREDICTION")))?;

    let statement = prompter.ask("\nPrediction statement:\n> ")?;
    if statement.is_empty() {
        prompter.say("Cancelled.")?;
        return Ok(None);
    }

    let domain = prompter.ask("\nDomain (Diplomacy/Security/Economic/Political/Canada):\n> ")?;

    let raw = prompter.ask("\nConfidence (50-95):\n> ")?;
    let confidence = match raw.parse::<i32>() {
        Ok(c) if (0..=100).contains(&c) => c,
        _ => {
            prompter.say(format!(
                "Invalid confidence '{}': expected a whole number from 0 to 100.",
                raw
            ))?;
            return Ok(None);
        }
    };

    let raw = prompter.ask("\nDays until due (e.g., 5):\n> ")?;
    let Ok(due_in_days) = raw.parse::<i64>() else {
        prompter.say(format!("Invalid number of days '{}'.", raw))?;
        return Ok(None);
    };

    let verification = prompter.ask("\nVerification criteria (how to prove correct):\n> ")?;
    let falsification = prompter.ask("\nFalsification criteria (how to prove incorrect):\n> ")?;
    let sources = parse_sources(&prompter.ask("\nSources (comma-separated, or blank):\n> ")?);

    prompter.say(format!("\n{}", divider()))?;
    prompter.say("REVIEW:")?;
    prompter.say(format!("  Prediction: {}", preview(&statement, display.review_preview)))?;
    prompter.say(format!("  Domain: {}", domain))?;
    prompter.say(format!("  Confidence: {}%", confidence))?;
    prompter.say(format!("  Due in: {} days", due_in_days))?;
    prompter.say(divider())?;

    let confirm = prompter.ask("\nConfirm? (y/n): ")?;
    if !confirm.eq_ignore_ascii_case("y") {
        prompter.say("Cancelled.")?;
        return Ok(None);
    }

    let id = store.add_on(
        PredictionDraft {
            statement,
            domain,
            confidence,
            due_in_days,
            verification,
            falsification,
            sources,
        },
        today,
    )?;

    if let Some(p) = store.get(&id) {
        prompter.say(format!("\nAdded prediction: {}", p.id))?;
        prompter.say(format!("  Domain: {}", p.domain))?;
        prompter.say(format!("  Confidence: {}%", p.confidence))?;
        prompter.say(format!("  Due: {}", p.due_date))?;
    }

    Ok(Some(id))
}

/// Show a pending prediction, ask for its outcome and record it.
///
/// Returns whether the prediction was evaluated.
pub fn interactive_evaluate<R: BufRead, W: Write>(
    store: &mut PredictionStore,
    prompter: &mut Prompter<R, W>,
    id: &str,
    today: NaiveDate,
) -> anyhow::Result<bool> {
    let Some(p) = store.get(id) else {
        prompter.say(format!("Prediction {} not found.", id))?;
        return Ok(false);
    };

    if !p.is_pending() {
        let when = p
            .evaluated_date
            .map(|d| format!(" on {}", d))
            .unwrap_or_default();
        prompter.say(format!(
            "Prediction {} was already evaluated as {}{}.",
            id, p.outcome, when
        ))?;
        return Ok(false);
    }

    let rendered = format_prediction(p);
    prompter.say(format!("\n{}", banner(&format!("EVALUATE: {}", id))))?;
    prompter.say(format!("\n{}", rendered))?;

    let raw = prompter.ask("\nOutcome (correct/incorrect): ")?;
    let outcome = match raw.parse::<Outcome>() {
        Ok(o) if o.is_terminal() => o,
        _ => {
            debug!(answer = %raw, "Rejected outcome answer");
            prompter.say("Invalid outcome. Use 'correct' or 'incorrect'.")?;
            return Ok(false);
        }
    };

    let notes = prompter.ask("Notes (what happened):\n> ")?;
    let notes = (!notes.is_empty()).then_some(notes);

    if store.evaluate_on(id, outcome, notes.clone(), today)? {
        prompter.say(format!("\nEvaluated {}: {}", id, outcome.as_str().to_uppercase()))?;
        if let Some(notes) = notes {
            prompter.say(format!("  Notes: {}", notes))?;
        }
        Ok(true)
    } else {
        prompter.say(format!("Prediction {} not found", id))?;
        Ok(false)
    }
}
