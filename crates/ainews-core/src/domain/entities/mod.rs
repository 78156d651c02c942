pub mod archive;
pub mod context;
pub mod news_item;
pub mod site;
pub mod source;

pub use archive::{ContentArchive, DAY_FORMAT, validate_day};
pub use context::{RenderContext, Value};
pub use news_item::{ItemField, NewsItem};
pub use site::{SiteLayout, SiteTemplates};
pub use source::{DEFAULT_SCRAPE_LIMIT, FeedSource, SourceKind};
