//! Keyword filtering, deduplication and ordering of collected items.

use std::collections::HashSet;

use crate::domain::{entities::NewsItem, error::DomainError};

/// Keywords used when none are configured.
pub const DEFAULT_KEYWORDS: [&str; 18] = [
    "AI",
    "artificial intelligence",
    "machine learning",
    "deep learning",
    "neural network",
    "GPT",
    "LLM",
    "language model",
    "ChatGPT",
    "Claude",
    "Gemini",
    "automation",
    "coding assistant",
    "GitHub Copilot",
    "OpenAI",
    "Anthropic",
    "Google AI",
    "Microsoft AI",
];

/// Case-insensitive substring filter over title and description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordFilter {
    /// Lowercased, non-empty.
    keywords: Vec<String>,
}

impl KeywordFilter {
    pub fn new<I, S>(keywords: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords: Vec<String> = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();

        if keywords.is_empty() {
            return Err(DomainError::EmptyKeywords);
        }
        Ok(Self { keywords })
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn matches(&self, item: &NewsItem) -> bool {
        let text = item.searchable_text().to_lowercase();
        self.keywords.iter().any(|k| text.contains(k.as_str()))
    }

    pub fn apply(&self, items: Vec<NewsItem>) -> Vec<NewsItem> {
        items.into_iter().filter(|item| self.matches(item)).collect()
    }
}

impl Default for KeywordFilter {
    fn default() -> Self {
        Self {
            keywords: DEFAULT_KEYWORDS.iter().map(|k| k.to_lowercase()).collect(),
        }
    }
}

/// Drop items whose title was already seen, keeping the first occurrence.
pub fn dedupe_by_title(items: Vec<NewsItem>) -> Vec<NewsItem> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.title.clone()))
        .collect()
}

/// Order items with a parseable `pubDate` newest first.
///
/// Undated items stay in the slots they occupy; only dated items move among
/// the remaining slots. Ties keep their relative order.
pub fn sort_newest_first(items: &mut [NewsItem]) {
    let slots: Vec<usize> = items
        .iter()
        .enumerate()
        .filter(|(_, item)| item.published_at().is_some())
        .map(|(i, _)| i)
        .collect();

    let mut dated: Vec<NewsItem> = slots.iter().map(|&i| items[i].clone()).collect();
    dated.sort_by_key(|item| std::cmp::Reverse(item.published_at()));

    for (slot, item) in slots.into_iter().zip(dated) {
        items[slot] = item;
    }
}

/// Filter, dedupe and sort in the order the collector applies them.
pub fn curate(filter: &KeywordFilter, items: Vec<NewsItem>) -> Vec<NewsItem> {
    let mut items = dedupe_by_title(filter.apply(items));
    sort_newest_first(&mut items);
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(title: &str) -> NewsItem {
        NewsItem::new(title, "https://example.com", "test")
    }

    fn titles(items: &[NewsItem]) -> Vec<&str> {
        items.iter().map(|i| i.title.as_str()).collect()
    }

    #[test]
    fn default_filter_is_case_insensitive() {
        let filter = KeywordFilter::default();
        assert_eq!(filter.keywords().len(), 18);
        assert!(filter.matches(&item("New openai model")));
        assert!(filter.matches(&item("Weather").with_description("Deep Learning for rain")));
        assert!(!filter.matches(&item("Gardening tips")));
    }

    #[test]
    fn short_keywords_match_as_substrings() {
        // "AI" matches inside words, as a plain substring test does.
        assert!(KeywordFilter::default().matches(&item("Daily email digest")));
    }

    #[test]
    fn empty_keyword_list_is_rejected() {
        assert_eq!(
            KeywordFilter::new(["", "  "]).unwrap_err(),
            DomainError::EmptyKeywords
        );
        let filter = KeywordFilter::new(["Rust"]).unwrap();
        assert!(filter.matches(&item("rust 2024")));
    }

    #[test]
    fn dedupe_keeps_first() {
        let items = vec![
            item("A").with_description("first"),
            item("B"),
            item("A").with_description("second"),
        ];
        let out = dedupe_by_title(items);
        assert_eq!(titles(&out), vec!["A", "B"]);
        assert_eq!(out[0].description.as_deref(), Some("first"));
    }

    #[test]
    fn sort_moves_only_dated_items() {
        let mut items = vec![
            item("old").with_pub_date("2024-01-01T00:00:00Z"),
            item("undated"),
            item("new").with_pub_date("Fri, 05 Jan 2024 10:00:00 +0000"),
            item("bad").with_pub_date("soon"),
            item("mid").with_pub_date("2024-01-03"),
        ];
        sort_newest_first(&mut items);
        assert_eq!(titles(&items), vec!["new", "undated", "mid", "bad", "old"]);
    }

    #[test]
    fn curate_runs_every_stage() {
        let items = vec![
            item("AI one").with_pub_date("2024-01-01"),
            item("cooking"),
            item("AI two").with_pub_date("2024-01-02"),
            item("AI one").with_pub_date("2024-01-09"),
        ];
        let out = curate(&KeywordFilter::default(), items);
        assert_eq!(titles(&out), vec!["AI two", "AI one"]);
    }
}
