/// Filing documents; download & conversion to paginated text.
pub mod content;

/// The filing aggregator: recent & historical feeds merged, filtered and deduplicated.
pub mod filings;

/// Form types the aggregator accepts.
pub mod forms;

/// Per-filer submissions; the recent window and the historical chunks.
pub mod submissions;

/// Ticker to CIK resolution, from `company_tickers.json`.
pub mod tickers;

pub use content::{ContentFetcher, Converter, TextConverter};
pub use filings::{FilingResult, Filings};
pub use forms::FormType;
pub use submissions::{FeedReader, FilingRecord};
pub use tickers::TickerResolver;
