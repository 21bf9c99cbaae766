use thiserror::Error;

/// Every failure the spider can report.
///
/// `MalformedDate` and `ContentFetch` are local: the aggregator drops the record, and the content
/// fetcher records an absent result, so neither reaches the caller of a batch.
#[derive(Debug, Error)]
pub enum SpiderError {
    #[error("unknown ticker: {0}")]
    UnknownTicker(String),

    #[error("form {0} not supported")]
    UnsupportedForm(String),

    #[error("failed to fetch {url}, error({reason})")]
    UpstreamFetch { url: String, reason: String },

    #[error("failed to parse JSON from {url}, error({source})")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("malformed date: {0:?}")]
    MalformedDate(String),

    #[error("failed to fetch content from {link:?}, error({reason})")]
    ContentFetch { link: String, reason: String },

    #[error("failed to read environment variable {0}")]
    Config(&'static str),

    #[error("failed to write workbook, error({0})")]
    Export(#[from] rust_xlsxwriter::XlsxError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SpiderError {
    pub(crate) fn upstream(url: &str, reason: impl std::fmt::Display) -> Self {
        SpiderError::UpstreamFetch {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }
}
