//! Templates and stylesheet that ship inside the binary.
//!
//! Used whenever the configured templates directory does not provide its own
//! `index.html` / `archive.html`, and as `static/style.css` when no static
//! directory is configured.

use ainews_core::domain::{DomainError, SiteTemplates, Template};

/// Front page and daily pages. Context: `{ date, newsCount, news }`.
pub const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>AI News - {{date}}</title>
  <link rel="stylesheet" href="/static/style.css">
</head>
<body>
  <header>
    <h1><a href="/">AI News</a></h1>
    <nav><a href="/archive/">Archive</a></nav>
  </header>
  <main>
    <h2>{{date}}</h2>
    <p class="count">{{newsCount}} stories</p>
    <ul class="news">
{{#each news}}      <li class="item">
        <a class="title" href="{{this.link}}" target="_blank" rel="noopener">{{this.title}}</a>
        <div class="meta">
          <span class="source">{{this.source}}</span>
{{#if this.pubDate}}          <time>{{formatDate this.pubDate}}</time>
{{/if}}        </div>
{{#if this.description}}        <p class="summary">{{truncate this.description 200}}</p>
{{/if}}      </li>
{{/each}}    </ul>
  </main>
  <footer><p>Collected automatically from public feeds.</p></footer>
</body>
</html>
"#;

/// Archive page. Context: `{ dates, counts }`.
pub const ARCHIVE_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>AI News - Archive</title>
  <link rel="stylesheet" href="/static/style.css">
</head>
<body>
  <header>
    <h1><a href="/">AI News</a></h1>
    <nav><a href="/archive/">Archive</a></nav>
  </header>
  <main>
    <h2>Archive</h2>
    <ul class="archive">
{{#each dates}}      <li><a href="/{{this}}/">{{formatDate this}}</a> <span class="count">({{lookup counts this}} stories)</span></li>
{{/each}}    </ul>
  </main>
</body>
</html>
"#;

/// Default `static/style.css`.
pub const STYLE_CSS: &str = r#":root {
  --fg: #1f2328;
  --muted: #656d76;
  --accent: #0969da;
  --bg: #ffffff;
}

body {
  margin: 0 auto;
  max-width: 48rem;
  padding: 1rem;
  font-family: system-ui, -apple-system, "Segoe UI", sans-serif;
  color: var(--fg);
  background: var(--bg);
  line-height: 1.5;
}

header {
  display: flex;
  align-items: baseline;
  justify-content: space-between;
  border-bottom: 1px solid #d0d7de;
}

header h1 a {
  color: inherit;
  text-decoration: none;
}

a {
  color: var(--accent);
}

ul.news,
ul.archive {
  list-style: none;
  padding: 0;
}

li.item {
  padding: 0.75rem 0;
  border-bottom: 1px solid #eaeef2;
}

.title {
  font-weight: 600;
}

.meta,
.count {
  color: var(--muted);
  font-size: 0.875rem;
}

.meta time::before {
  content: " · ";
}

.summary {
  margin: 0.25rem 0 0;
}
"#;

/// Parse both built-in page templates.
pub fn site_templates() -> Result<SiteTemplates, DomainError> {
    Ok(SiteTemplates::new(
        Template::parse(INDEX_HTML)?,
        Template::parse(ARCHIVE_HTML)?,
    ))
}
