//! The news item record shared by the collector, the content store and the
//! template engine.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::template::helpers::parse_date;

/// A single collected news item.
///
/// Serialized with camelCase keys (`pubDate`) so content files stay
/// compatible with the published JSON layout. Optional fields are omitted
/// when absent; scraped items never carry a description or a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    pub title: String,
    pub link: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pub_date: Option<String>,
    #[serde(default)]
    pub source: String,
}

impl NewsItem {
    /// Create an item with the three mandatory fields.
    pub fn new(title: impl Into<String>, link: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            description: None,
            pub_date: None,
            source: source.into(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_pub_date(mut self, pub_date: impl Into<String>) -> Self {
        self.pub_date = Some(pub_date.into());
        self
    }

    /// Borrow a field by its typed name.
    pub fn field(&self, field: ItemField) -> Option<&str> {
        match field {
            ItemField::Title => Some(&self.title),
            ItemField::Link => Some(&self.link),
            ItemField::Description => self.description.as_deref(),
            ItemField::PubDate => self.pub_date.as_deref(),
            ItemField::Source => Some(&self.source),
        }
    }

    /// Text the keyword filter searches: title and description.
    pub fn searchable_text(&self) -> String {
        format!(
            "{} {}",
            self.title,
            self.description.as_deref().unwrap_or_default()
        )
    }

    /// Publication instant, if the item carries a parseable date.
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        self.pub_date.as_deref().and_then(parse_date)
    }
}

/// Fields a template may reference on an item (`this.title`, `this.pubDate`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemField {
    Title,
    Link,
    Description,
    PubDate,
    Source,
}

impl ItemField {
    pub const ALL: [ItemField; 5] = [
        Self::Title,
        Self::Link,
        Self::Description,
        Self::PubDate,
        Self::Source,
    ];

    /// Name as it appears in templates and JSON.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Link => "link",
            Self::Description => "description",
            Self::PubDate => "pubDate",
            Self::Source => "source",
        }
    }
}

impl FromStr for ItemField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(Self::Title),
            "link" => Ok(Self::Link),
            "description" => Ok(Self::Description),
            "pubDate" | "pub_date" => Ok(Self::PubDate),
            "source" => Ok(Self::Source),
            other => Err(format!("unknown item field '{other}'")),
        }
    }
}

impl fmt::Display for ItemField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_camel_case_and_skips_missing() {
        let item = NewsItem::new("T", "https://x", "HN").with_pub_date("2024-01-05");
        let json = serde_json::to_value(&item).unwrap();

        assert_eq!(json["pubDate"], "2024-01-05");
        assert!(json.get("description").is_none());
        assert!(json.get("pub_date").is_none());
    }

    #[test]
    fn deserializes_scraped_item_without_optional_fields() {
        let item: NewsItem =
            serde_json::from_str(r#"{"title":"T","link":"https://x","source":"Hacker News"}"#)
                .unwrap();
        assert_eq!(item.description, None);
        assert_eq!(item.pub_date, None);
        assert_eq!(item.source, "Hacker News");
    }

    #[test]
    fn field_names_round_trip() {
        for field in ItemField::ALL {
            assert_eq!(field.as_str().parse::<ItemField>().unwrap(), field);
        }
        assert_eq!("pub_date".parse::<ItemField>().unwrap(), ItemField::PubDate);
        assert!("author".parse::<ItemField>().is_err());
    }

    #[test]
    fn searchable_text_joins_title_and_description() {
        let item = NewsItem::new("LLM news", "l", "s").with_description("about GPT");
        assert_eq!(item.searchable_text(), "LLM news about GPT");
        assert_eq!(NewsItem::new("Only", "l", "s").searchable_text(), "Only ");
    }

    #[test]
    fn published_at_parses_rfc2822() {
        let item = NewsItem::new("t", "l", "s").with_pub_date("Fri, 05 Jan 2024 10:00:00 GMT");
        assert!(item.published_at().is_some());
        assert!(NewsItem::new("t", "l", "s").with_pub_date("soon").published_at().is_none());
    }
}
