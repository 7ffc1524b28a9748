//! Letter post-processing: greeting, closing and date normalisation.
//!
//! Each step only adds what is missing, so `format_cover_letter` applied to
//! its own output returns it unchanged.

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::text::contains_any;

/// Any of these (case-insensitive) counts as a closing.
pub const CLOSINGS: &[&str] = &["sincerely", "best regards", "respectfully", "regards"];
pub const SIGN_OFF: &str = "Sincerely,\n[Your Name]";
const DEFAULT_GREETING: &str = "Dear Hiring Manager,";

/// A leading line at most this long that carries a recent year is a date header.
const MAX_DATE_LINE_CHARS: usize = 40;
const RECENT_YEARS_BACK: i32 = 6;
const RECENT_YEARS_AHEAD: i32 = 1;

static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d{4}\b").unwrap());

pub fn greeting(company: Option<&str>) -> String {
    match company {
        Some(name) => format!("Dear {name} Hiring Team,"),
        None => DEFAULT_GREETING.to_string(),
    }
}

/// "Month Day, Year", e.g. "October 18, 2026".
pub fn date_line(today: NaiveDate) -> String {
    today.format("%B %d, %Y").to_string()
}

pub fn has_closing(text: &str) -> bool {
    contains_any(&text.to_lowercase(), CLOSINGS)
}

/// True when any standalone 4-digit number in `text` falls within a few years of `today`.
pub fn mentions_recent_year(text: &str, today: NaiveDate) -> bool {
    let current = today.year();
    let recent = (current - RECENT_YEARS_BACK)..=(current + RECENT_YEARS_AHEAD);
    YEAR_RE
        .find_iter(text)
        .filter_map(|m| m.as_str().parse::<i32>().ok())
        .any(|year| recent.contains(&year))
}

/// Splits off a leading date line, returning it with the remaining body.
fn split_date_header(text: &str, today: NaiveDate) -> (Option<&str>, &str) {
    let first_line = text.lines().next().unwrap_or_default();
    let trimmed = first_line.trim();
    if !trimmed.starts_with("Dear")
        && trimmed.chars().count() <= MAX_DATE_LINE_CHARS
        && mentions_recent_year(trimmed, today)
    {
        (Some(trimmed), text[first_line.len()..].trim_start())
    } else {
        (None, text)
    }
}

/// Ensures the letter opens with a greeting, ends with a closing and carries a date.
///
/// The greeting is checked after any leading date line, and a synthesized
/// greeting goes below that line.
pub fn format_cover_letter(content: &str, company: Option<&str>, today: NaiveDate) -> String {
    let content = content.trim();
    if content.is_empty() {
        return String::new();
    }

    let (date_header, body) = split_date_header(content, today);
    let mut letter = if body.starts_with("Dear") {
        content.to_string()
    } else {
        let greeting = greeting(company);
        match date_header {
            Some(date) => format!("{date}\n\n{greeting}\n\n{body}"),
            None => format!("{greeting}\n\n{body}"),
        }
    };

    if !has_closing(&letter) {
        letter.push_str("\n\n");
        letter.push_str(SIGN_OFF);
    }

    if !mentions_recent_year(&letter, today) {
        letter = format!("{}\n\n{letter}", date_line(today));
    }

    letter
}
