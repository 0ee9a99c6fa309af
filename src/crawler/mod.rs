//! Page crawling
//!
//! Splits into a fetching seam (`fetcher`) and the batch loop that maps
//! pages to document records (`batch`).

pub mod batch;
pub mod fetcher;

pub use batch::{Crawler, Locator};
pub use fetcher::{build_http_client, HttpPageSource, PageSession, PageSource, SessionError};
