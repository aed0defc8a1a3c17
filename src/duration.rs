/*
Duration text <-> whole minutes.
"2h 30m" -> 150, 150 -> "2h 30m"
*/

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

static HOURS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([0-9]+)h").unwrap());
static MINUTES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([0-9]+)m").unwrap());

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DurationError {
    #[error("no hour or minute token in {0:?}")]
    Unparsed(String),
}

// Digit runs too long for u32 saturate instead of vanishing
fn capture(re: &Regex, text: &str) -> Option<u32> {
    let digits = re.captures(text)?.get(1)?.as_str();
    Some(digits.parse().unwrap_or(u32::MAX))
}

// Parse a duration expression into minutes.
//
// Hour and minute tokens are looked up independently, so
// "30m 1h" and "1h 30m" are the same. Anything else in the
// text is ignored. No tokens -> 0.
pub fn parse(text: &str) -> u32 {
    let hours = capture(&HOURS_RE, text).unwrap_or(0);
    let minutes = capture(&MINUTES_RE, text).unwrap_or(0);
    hours.saturating_mul(60).saturating_add(minutes)
}

/// Like [`parse`], but refuses text that carries neither an hour nor a minute token.
pub fn parse_strict(text: &str) -> Result<u32, DurationError> {
    if !HOURS_RE.is_match(text) && !MINUTES_RE.is_match(text) {
        return Err(DurationError::Unparsed(text.to_string()));
    }
    Ok(parse(text))
}

// Format minutes as text.
//     0   -> "0m"
//     45  -> "45m"
//     60  -> "1h"
//     150 -> "2h 30m"
pub fn format(minutes: u32) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;

    if hours == 0 {
        format!("{mins}m")
    } else if mins == 0 {
        format!("{hours}h")
    } else {
        format!("{hours}h {mins}m")
    }
}
