use crate::http::var;
use crate::stock::common::Cik;
use crate::SpiderError;
use tracing::{debug, error};

pub const TICKERS_URL: &'static str = "https://www.sec.gov/files/company_tickers.json";

pub const SUBMISSIONS_URL: &'static str = "https://data.sec.gov/submissions/";

pub const ARCHIVES_URL: &'static str = "https://www.sec.gov/Archives/edgar/data/";

/// Endpoints and identity used for every request made to EDGAR.
///
/// The SEC requires each request to carry a `User-Agent` that identifies the caller, e.g.
/// `"Your Name your.email@example.com"`.
#[derive(Clone, Debug)]
pub struct SpiderConfig {
    pub user_agent: String,
    pub tickers_url: String,
    pub submissions_url: String,
    pub archives_url: String,
}

impl SpiderConfig {
    /// Default endpoints, with the given `User-Agent`.
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            tickers_url: TICKERS_URL.to_string(),
            submissions_url: SUBMISSIONS_URL.to_string(),
            archives_url: ARCHIVES_URL.to_string(),
        }
    }

    /// Read the configuration from the environment (and a `.env` file, if one exists).
    ///
    /// `USER_AGENT` is required; `EDGAR_TICKERS_URL`, `EDGAR_SUBMISSIONS_URL` and
    /// `EDGAR_ARCHIVES_URL` override the default endpoints.
    pub fn from_env() -> Result<Self, SpiderError> {
        dotenv::dotenv().ok();

        let user_agent = var("USER_AGENT").map_err(|err| {
            error!("failed to read USER_AGENT, error({err})");
            SpiderError::Config("USER_AGENT")
        })?;

        let mut config = Self::new(user_agent);
        if let Ok(url) = var("EDGAR_TICKERS_URL") {
            config.tickers_url = url;
        }
        if let Ok(url) = var("EDGAR_SUBMISSIONS_URL") {
            config.submissions_url = url;
        }
        if let Ok(url) = var("EDGAR_ARCHIVES_URL") {
            config.archives_url = url;
        }
        debug!("spider configuration loaded: {config:?}");

        Ok(config)
    }

    /// The submissions document of a single filer, i.e. `.../submissions/CIK0000320193.json`.
    pub fn submissions(&self, cik: &Cik) -> String {
        format!("{}/CIK{cik}.json", self.submissions_url.trim_end_matches('/'))
    }

    /// A historical chunk, named as listed in the submissions document.
    pub fn chunk(&self, name: &str) -> String {
        format!("{}/{name}", self.submissions_url.trim_end_matches('/'))
    }

    /// Canonical link to the primary document of a filing.
    pub fn archive_link(&self, cik: &Cik, accession_number: &str, document: &str) -> String {
        format!(
            "{base}/{cik}/{accession}/{document}",
            base = self.archives_url.trim_end_matches('/'),
            cik = cik.decimal(),
            accession = accession_number.replace('-', ""),
        )
    }
}

//////////////////////////////////////////////////////////////
// -- TESTS --
//////////////////////////////////////////////////////////////
