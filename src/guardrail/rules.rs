//! Local, deterministic output checks that run before the output classifier.

use std::sync::LazyLock;

use regex::Regex;

static CONFIRMATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:(?:booking|reservation) (?:is |has been )?(?:now )?confirmed|(?:i|we)(?:'ve| have)? (?:booked|reserved|confirmed)|successfully (?:booked|reserved)|booked you (?:on|in|into|at)|(?:flight|flights|hotel|room|seat|seats|stay|trip|ticket|tickets) (?:is|are|has been|have been) (?:now )?(?:booked|reserved|confirmed)|you(?:'re| are) (?:all )?booked|confirmation (?:number|code))\b",
    )
    .expect("confirmation regex must compile")
});

static TOTAL_COST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:[$€£¥]\s?\d[\d,]*(?:\.\d+)?|\b\d[\d,]*(?:\.\d+)?\s?(?:usd|eur|gbp|jpy|dollars)\b|\b(?:usd|eur|gbp|jpy)\s?\d[\d,]*(?:\.\d+)?|\btotal\b[^.\n\d]{0,20}\d[\d,]*\.\d{2}\b)",
    )
    .expect("total cost regex must compile")
});

/// Matches a nightly-rate suffix right after a price.
static PER_NIGHT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:/\s*|per\s+|a\s+|each\s+)night\b")
        .expect("per-night regex must compile")
});

/// Reason given when a booking is confirmed without a price in front of it.
pub const MISSING_COST_REASON: &str = "booking confirmed without showing the total cost";

/// Returns a denial reason if `text` confirms a booking before stating a
/// total cost figure. Nightly rates do not count as a total.
pub fn unpriced_confirmation(text: &str) -> Option<&'static str> {
    let confirmation = CONFIRMATION_RE.find(text)?;
    let before = &text[..confirmation.start()];
    let priced = TOTAL_COST_RE
        .find_iter(before)
        .any(|cost| !PER_NIGHT_RE.is_match(&before[cost.end()..]));
    if priced {
        None
    } else {
        Some(MISSING_COST_REASON)
    }
}
