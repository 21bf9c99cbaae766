#![allow(dead_code)]

use edgar_spider::{SpiderConfig, SpiderError, Transport};
use std::collections::HashMap;
use std::sync::Mutex;

pub const USER_AGENT: &str = "edgar-spider tests test@example.com";

pub fn config() -> SpiderConfig {
    SpiderConfig::new(USER_AGENT)
}

/// In-memory EDGAR: canned bodies per URL, and a log of every URL requested.
///
/// Unknown URLs answer like a 404.
#[derive(Default)]
pub struct Fixture {
    routes: HashMap<String, Vec<u8>>,
    requests: Mutex<Vec<String>>,
}

impl Fixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, url: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        self.routes.insert(url.into(), body.into());
        self
    }

    pub fn json(self, url: impl Into<String>, body: serde_json::Value) -> Self {
        self.route(url, body.to_string())
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for Fixture {
    async fn get(&self, url: &str) -> Result<Vec<u8>, SpiderError> {
        self.requests.lock().unwrap().push(url.to_string());
        match self.routes.get(url) {
            Some(body) => Ok(body.clone()),
            None => Err(SpiderError::UpstreamFetch {
                url: url.to_string(),
                reason: "HTTP status client error (404 Not Found)".to_string(),
            }),
        }
    }
}

pub const TICKERS_URL: &str = "https://www.sec.gov/files/company_tickers.json";

pub fn tickers() -> serde_json::Value {
    serde_json::json!({
        "0": { "cik_str": 320193, "ticker": "AAPL", "title": "Apple Inc." },
        "1": { "cik_str": 789019, "ticker": "MSFT", "title": "MICROSOFT CORP" },
        "2": { "cik_str": 1065280, "ticker": "NFLX", "title": "NETFLIX INC" }
    })
}

pub fn submissions_url(cik: &str) -> String {
    format!("https://data.sec.gov/submissions/CIK{cik}.json")
}

pub fn chunk_url(name: &str) -> String {
    format!("https://data.sec.gov/submissions/{name}")
}
