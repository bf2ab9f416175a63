//! Tools backed by the crawl4ai content-extraction API.

mod common;
mod html;
mod md;

pub use html::{CrawlHtmlParams, CrawlHtmlTool};
pub use md::{CrawlMarkdownParams, CrawlMarkdownTool};
