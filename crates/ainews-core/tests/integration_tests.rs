//! Integration tests for ainews-core through its public API.

use ainews_core::domain::{
    ContentArchive, KeywordFilter, NewsItem, RenderContext, Template, archive_context, curate,
    day_context, render,
};

const INDEX: &str = r#"<h1>AI News - {{date}}</h1>
<p>{{newsCount}} stories</p>
<ul>
{{#each news}}  <li>
    <a href="{{this.link}}">{{this.title}}</a> <span>{{this.source}}</span>
    {{#if this.pubDate}}<time>{{formatDate this.pubDate}}</time>{{/if}}
    {{#if this.description}}<p>{{truncate this.description 12}}</p>{{/if}}
  </li>
{{/each}}</ul>"#;

#[test]
fn index_template_renders_collected_day() {
    let items = curate(
        &KeywordFilter::default(),
        vec![
            NewsItem::new("Claude gets tools", "https://a", "HN")
                .with_pub_date("Fri, 05 Jan 2024 09:00:00 +0000")
                .with_description("Anthropic shipped tool use today."),
            NewsItem::new("Sourdough", "https://b", "HN"),
        ],
    );
    let html = Template::parse(INDEX)
        .unwrap()
        .render(&day_context(Some("2024-01-05"), &items));

    assert!(html.contains("<h1>AI News - January 5, 2024</h1>"));
    assert!(html.contains("<p>1 stories</p>"));
    assert!(html.contains(r#"<a href="https://a">Claude gets tools</a> <span>HN</span>"#));
    assert!(html.contains("<time>January 5, 2024</time>"));
    assert!(html.contains("<p>Anthropic sh...</p>"));
    assert!(!html.contains("Sourdough"));
    assert!(!html.contains("{{"));
}

#[test]
fn rendering_is_referentially_transparent() {
    let ctx = RenderContext::new().with("news", vec![NewsItem::new("AI", "L", "S")]);
    let first = render(INDEX, &ctx);
    assert_eq!(first, render(INDEX, &ctx));
    assert_eq!(first, Template::parse(INDEX).unwrap().render(&ctx));
}

#[test]
fn archive_template_over_json_context() {
    let from_json = RenderContext::try_from(serde_json::json!({
        "dates": ["2024-01-05", "2024-01-04"],
        "counts": {"2024-01-05": 3, "2024-01-04": 1}
    }))
    .unwrap();
    let from_archive = archive_context(
        &ContentArchive::new()
            .with_day("2024-01-04", vec![NewsItem::new("A", "L", "S")])
            .with_day(
                "2024-01-05",
                vec![
                    NewsItem::new("B", "L", "S"),
                    NewsItem::new("C", "L", "S"),
                    NewsItem::new("D", "L", "S"),
                ],
            ),
    );

    let template = "{{#each dates}}<a href=\"{{this}}/\">{{formatDate this}}</a> {{lookup counts this}}\n{{/each}}";
    let expected = "<a href=\"2024-01-05/\">January 5, 2024</a> 3\n<a href=\"2024-01-04/\">January 4, 2024</a> 1\n";
    assert_eq!(render(template, &from_json), expected);
    assert_eq!(render(template, &from_archive), expected);
}

#[test]
fn malformed_template_is_rejected_strictly_and_tolerated_leniently() {
    let src = "<ul>\n{{#each news}}\n<li>{{this.title}}</li>\n</ul>";
    let err = Template::parse(src).unwrap_err();
    assert!(err.to_string().contains("line 2"), "{err}");

    let ctx = RenderContext::new();
    assert_eq!(render(src, &ctx), "<ul>\n{{#each news}}\n<li></li>\n</ul>");
}
