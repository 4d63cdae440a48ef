//! Text rendering for reports and records

use crate::models::{PendingPrediction, Prediction, PredictionStats};

const RULE_WIDTH: usize = 60;

fn rule(ch: char) -> String {
    ch.to_string().repeat(RULE_WIDTH)
}

/// Section title framed by `=` rules
pub fn banner(title: &str) -> String {
    let line = rule('=');
    format!("{line}\n{title}\n{line}")
}

/// Separator used inside a section
pub fn divider() -> String {
    rule('-')
}

/// First `width` characters of `text`, with `...` when something was cut
pub fn preview(text: &str, width: usize) -> String {
    match text.char_indices().nth(width) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Format the statistics summary
pub fn format_stats(stats: &PredictionStats) -> String {
    let mut output = String::new();
    output.push_str(&banner("PREDICTION STATISTICS"));
    output.push('\n');

    output.push_str(&format!("  Total predictions:  {}\n", stats.total));
    output.push_str(&format!("  Evaluated:          {}\n", stats.evaluated));
    output.push_str(&format!("  Correct:            {}\n", stats.correct));
    output.push_str(&format!("  Incorrect:          {}\n", stats.incorrect));
    output.push_str(&format!("  Pending:            {}\n", stats.pending));
    output.push_str(&format!("  Accuracy:           {:.1}%\n", stats.accuracy));
    output.push_str(&format!("  Brier Score:        {:.3}\n", stats.brier_score));
    output.push_str(&rule('='));

    output
}

/// Format the pending list, already sorted by the store
pub fn format_pending(pending: &[PendingPrediction<'_>], statement_width: usize) -> String {
    let mut output = banner(&format!("PENDING PREDICTIONS ({})", pending.len()));

    for entry in pending {
        let p = entry.prediction;
        let status = entry
            .urgency
            .map(|u| format!(" [{}]", u.label()))
            .unwrap_or_default();

        output.push_str(&format!("\n\n{}{}\n", p.id, status));
        output.push_str(&format!("  {}\n", preview(&p.statement, statement_width)));
        output.push_str(&format!(
            "  Domain: {} | Confidence: {}% | Due: {}",
            p.domain, p.confidence, p.due_date
        ));
    }

    output
}

/// Format a single record for review before evaluation
pub fn format_prediction(p: &Prediction) -> String {
    let mut output = String::new();
    output.push_str(&format!("{}\n\n", p.statement));
    output.push_str(&format!("Domain: {} | Confidence: {}%\n", p.domain, p.confidence));
    output.push_str(&format!("Created: {} | Due: {}\n", p.created_date, p.due_date));
    if !p.sources.is_empty() {
        output.push_str(&format!("Sources: {}\n", p.sources.join(", ")));
    }
    output.push_str(&format!("\nVerification: {}\n", p.verification));
    output.push_str(&format!("Falsification: {}", p.falsification));
    output
}
