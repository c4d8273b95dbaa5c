use std::sync::LazyLock;

use chrono::{Days, NaiveDate};
use regex::Regex;

use super::ExtractError;

// "afisat de la 05-03-2020 pana la ..."
static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"de\s+la\s+(\d{1,2})[-/](\d{1,2})[-/](\d{4})").unwrap()
});

// "termen limita de transmitere a propunerilor: 10 zile", "10 (zece) zile"
static FEEDBACK_DAYS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)termen.*?\b(\d{1,3})\b\D{0,40}?\bzi").unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublicationDates {
    pub date: Option<NaiveDate>,
    pub feedback_days: u32,
    pub max_feedback_date: Option<NaiveDate>,
}

/// Pull the publication date and the feedback window out of lower-cased body
/// text. The window is mandatory, the date is not.
pub fn extract_dates(text: &str) -> Result<PublicationDates, ExtractError> {
    let date = find_date(text);
    let feedback_days = find_feedback_days(text).ok_or(ExtractError::MissingFeedbackDays)?;
    let max_feedback_date = date.and_then(|d| d.checked_add_days(Days::new(feedback_days.into())));

    Ok(PublicationDates {
        date,
        feedback_days,
        max_feedback_date,
    })
}

/// First "de la d-m-yyyy" only. A match that is not a real calendar date
/// yields `None`; later matches are not consulted.
pub fn find_date(text: &str) -> Option<NaiveDate> {
    let caps = DATE_RE.captures(text)?;
    let day = caps[1].parse().ok()?;
    let month = caps[2].parse().ok()?;
    let year = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

pub fn find_feedback_days(text: &str) -> Option<u32> {
    FEEDBACK_DAYS_RE
        .captures(text)
        .and_then(|c| c[1].parse().ok())
}
