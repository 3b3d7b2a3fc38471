use colored::*;
use palmist_common::analysis::{FallbackReason, Origin};
use palmist_common::reading::{Bucket, CategoryResult};

use crate::terminal::colors;

type Detail = (String, ColoredString);

pub fn percent_text(score: f64) -> String {
    format!("{:.0}%", score * 100.0)
}

/// A score as a percentage, colored by its bucket.
pub fn score(score: f64) -> ColoredString {
    let color = match Bucket::of(score) {
        Bucket::High => colors::SCORE_HIGH,
        Bucket::Medium => colors::SCORE_MEDIUM,
        Bucket::Low => colors::SCORE_LOW,
    };
    percent_text(score).color(color).bold()
}

pub fn list(items: &[String]) -> String {
    items.join("، ")
}

pub fn origin_text(origin: &Origin) -> String {
    match origin {
        Origin::Remote => "remote".to_string(),
        Origin::Local {
            reason: FallbackReason::NotConfigured { provider },
        } => format!("local ({provider} not configured)"),
        Origin::Local {
            reason: FallbackReason::Failed { provider, .. },
        } => format!("local ({provider} failed)"),
    }
}

pub fn origin(origin: &Origin) -> ColoredString {
    let text = origin_text(origin);
    match origin {
        Origin::Remote => text.green(),
        Origin::Local {
            reason: FallbackReason::NotConfigured { .. },
        } => text.normal(),
        Origin::Local { .. } => text.yellow(),
    }
}

pub fn category_to_details(result: &CategoryResult) -> Vec<Detail> {
    vec![
        ("Score".to_string(), score(result.score)),
        ("Reading".to_string(), result.reading.normal()),
        ("Advice".to_string(), result.advice.italic()),
        ("Timeline".to_string(), result.timeline.normal()),
    ]
}
