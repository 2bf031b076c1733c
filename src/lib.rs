pub mod client;
pub mod fetcher;
pub mod filters;
pub mod routes;
pub mod service;
pub mod types;
pub mod words;

pub use client::{HackerNews, HnClient};
pub use fetcher::fetch_batched;
pub use filters::{filter_by_date, select_top_user_stories};
pub use service::TrendsService;
pub use types::{ApiConfig, ItemId, Result, Story, TrendsError, User, WordCount};
pub use words::top_words;
