//! Collected news keyed by day, plus validation of `YYYY-MM-DD` day keys.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::domain::{entities::news_item::NewsItem, error::DomainError};

/// Format of day keys and content file stems.
pub const DAY_FORMAT: &str = "%Y-%m-%d";

/// Check that `day` is a `YYYY-MM-DD` calendar date.
pub fn validate_day(day: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(day, DAY_FORMAT).map_err(|_| DomainError::InvalidDay(day.to_owned()))
}

/// All persisted content, keyed by day (`YYYY-MM-DD`, the content file stem).
///
/// Keys sort lexicographically, which for ISO dates is chronological.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentArchive {
    days: BTreeMap<String, Vec<NewsItem>>,
}

impl ContentArchive {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_day(mut self, day: impl Into<String>, items: Vec<NewsItem>) -> Self {
        self.insert(day, items);
        self
    }

    pub fn insert(&mut self, day: impl Into<String>, items: Vec<NewsItem>) {
        self.days.insert(day.into(), items);
    }

    pub fn get(&self, day: &str) -> Option<&[NewsItem]> {
        self.days.get(day).map(Vec::as_slice)
    }

    /// Day keys, most recent first.
    pub fn days_newest_first(&self) -> Vec<&str> {
        self.days.keys().rev().map(String::as_str).collect()
    }

    /// The day the front page shows: `today` when it has content, otherwise
    /// the most recent day.
    pub fn front_page_day(&self, today: &str) -> Option<&str> {
        if let Some((day, _)) = self.days.get_key_value(today) {
            return Some(day.as_str());
        }
        self.days.keys().next_back().map(String::as_str)
    }

    /// Item count per day.
    pub fn counts(&self) -> BTreeMap<String, usize> {
        self.days
            .iter()
            .map(|(day, items)| (day.clone(), items.len()))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[NewsItem])> {
        self.days
            .iter()
            .map(|(day, items)| (day.as_str(), items.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}
