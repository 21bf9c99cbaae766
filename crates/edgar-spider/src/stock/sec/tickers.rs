use crate::http::*;
use crate::stock::common::{de_cik, Cik};
use crate::{SpiderConfig, SpiderError};
use serde::de::{IgnoredAny, Visitor};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, error, trace};

/// The SEC ticker registry, loaded once and held for the rest of the session.
///
/// The registry is not global; build it once at startup with [`TickerResolver::load`] and pass it
/// by reference to whatever needs to resolve tickers.
#[derive(Debug)]
pub struct TickerResolver {
    map: HashMap<String, Ticker>,
}

impl TickerResolver {
    /// Fetch `company_tickers.json` and index it by (upper-case) ticker.
    pub async fn load<H: Transport>(http: &H, config: &SpiderConfig) -> Result<Self, SpiderError> {
        let time = std::time::Instant::now();

        debug!("fetching SEC Company Tickers");
        let tickers: Tickers = get_json(http, &config.tickers_url).await.map_err(|err| {
            error!("failed to fetch SEC Company Tickers, error({err})");
            err
        })?;

        let resolver = Self::from_tickers(tickers.0);
        debug!(
            "{} SEC Company Tickers loaded. {}",
            resolver.len(),
            crate::time_elapsed(time)
        );

        Ok(resolver)
    }

    /// Build the registry from an already collected list of tickers.
    ///
    /// A ticker listed twice keeps its first entry.
    pub fn from_tickers(tickers: impl IntoIterator<Item = Ticker>) -> Self {
        let mut map = HashMap::new();
        for ticker in tickers {
            map.entry(ticker.ticker.to_uppercase()).or_insert(ticker);
        }
        Self { map }
    }

    /// The CIK of `ticker` (case-insensitive).
    pub fn resolve(&self, ticker: &str) -> Result<Cik, SpiderError> {
        match self.map.get(&ticker.to_uppercase()) {
            Some(entry) => {
                trace!("[{ticker}] resolved to CIK{}", entry.cik);
                Ok(entry.cik.clone())
            }
            None => Err(SpiderError::UnknownTicker(ticker.to_string())),
        }
    }

    /// The registered company name of `ticker`, i.e. `"Apple Inc."`.
    pub fn title(&self, ticker: &str) -> Option<&str> {
        self.map
            .get(&ticker.to_uppercase())
            .map(|entry| entry.title.as_str())
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

// de
// ----------------------------------------------------------------------------

#[derive(Debug)]
struct Tickers(Vec<Ticker>);

/// A single row of `company_tickers.json`.
#[derive(Clone, Debug, Deserialize)]
pub struct Ticker {
    #[serde(rename = "cik_str", deserialize_with = "de_cik")]
    pub cik: Cik,
    pub ticker: String,
    #[serde(default)]
    pub title: String,
}

struct TickerVisitor;

impl<'de> Visitor<'de> for TickerVisitor {
    type Value = Tickers;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("Map of tickers")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        // each entry is in the form of:
        // `0: { "cik_str": 320193, "ticker": "AAPL", "title": "Apple Inc." },
        //  1: { ... },
        //  ...`
        let mut tickers: Vec<Ticker> = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((_, ticker)) = map.next_entry::<IgnoredAny, Ticker>()? {
            tickers.push(ticker);
        }
        Ok(Tickers(tickers))
    }
}

impl<'de> Deserialize<'de> for Tickers {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        // we want a vector returned, but the deserialize will expect a map, given
        // how the API has been designed
        deserializer.deserialize_map(TickerVisitor)
    }
}

//////////////////////////////////////////////////////////////
// -- TESTS --
//////////////////////////////////////////////////////////////
