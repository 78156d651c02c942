//! Render contexts for the generated pages.

use crate::domain::{
    entities::{ContentArchive, NewsItem, RenderContext, Value},
    template::helpers::format_date,
};

/// Context of the front page and of a daily page:
/// `{ date, newsCount, news }`.
///
/// `day` is `None` when there is no content at all; the date then reads
/// `Invalid Date`, like any other unparseable date.
pub fn day_context(day: Option<&str>, items: &[NewsItem]) -> RenderContext {
    RenderContext::new()
        .with("date", format_date(day.unwrap_or_default()))
        .with("newsCount", items.len())
        .with("news", items.to_vec())
}

/// Context of the archive page: `{ dates, counts }`, dates newest first.
pub fn archive_context(archive: &ContentArchive) -> RenderContext {
    let dates: Vec<Value> = archive
        .days_newest_first()
        .into_iter()
        .map(Value::from)
        .collect();
    RenderContext::new()
        .with("dates", dates)
        .with("counts", archive.counts())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_context_shape() {
        let items = vec![NewsItem::new("A", "L", "S"), NewsItem::new("B", "L", "S")];
        let ctx = day_context(Some("2024-01-05"), &items);
        assert_eq!(ctx.get("date"), Some(&Value::from("January 5, 2024")));
        assert_eq!(ctx.get("newsCount"), Some(&Value::from(2_usize)));
        assert_eq!(ctx.get("news").and_then(Value::as_sequence).map(<[Value]>::len), Some(2));
    }

    #[test]
    fn empty_content_reads_invalid_date() {
        let ctx = day_context(None, &[]);
        assert_eq!(ctx.get("date"), Some(&Value::from("Invalid Date")));
        assert_eq!(ctx.get("newsCount"), Some(&Value::from(0_usize)));
    }

    #[test]
    fn archive_context_orders_dates() {
        let archive = ContentArchive::new()
            .with_day("2024-01-04", vec![NewsItem::new("A", "L", "S")])
            .with_day("2024-01-05", vec![]);
        let ctx = archive_context(&archive);
        assert_eq!(
            ctx.get("dates"),
            Some(&Value::from(vec!["2024-01-05", "2024-01-04"]))
        );
        let counts = ctx.get("counts").unwrap();
        assert_eq!(counts.get("2024-01-04").unwrap().to_string(), "1");
    }
}
