use crate::SpiderError;
use serde::{Deserialize, Deserializer};
use std::fmt;

/// Central Index Key; the SEC's identifier for a filer, held as the 10 digit, zero-padded string
/// used by the submissions endpoints (i.e. `"0000320193"`).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Cik(String);

impl Cik {
    pub const WIDTH: usize = 10;

    /// The zero-padded form, i.e. `"0000320193"`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The decimal form, without leading zeros, as used in archive links (i.e. `"320193"`).
    pub fn decimal(&self) -> &str {
        match self.0.trim_start_matches('0') {
            "" => "0",
            digits => digits,
        }
    }
}

impl From<u64> for Cik {
    fn from(cik: u64) -> Self {
        Cik(format!("{cik:0width$}", width = Self::WIDTH))
    }
}

impl fmt::Display for Cik {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// `company_tickers.json` carries the CIK as a bare number (`"cik_str": 320193`); older dumps use
/// a string. Either is padded to a [`Cik`].
pub fn de_cik<'de, D>(deserializer: D) -> Result<Cik, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(Cik::from(n)),
        Raw::Text(s) => s
            .trim()
            .parse::<u64>()
            .map(Cik::from)
            .map_err(|_| serde::de::Error::custom(format!("invalid CIK {s:?}"))),
    }
}

/// Parse an EDGAR date (`YYYY-MM-DD`); anything from a `T` onward (a time component) is ignored.
pub fn convert_date_type(str_date: &str) -> Result<chrono::NaiveDate, SpiderError> {
    let date = str_date.split('T').next().unwrap_or_default();
    chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| SpiderError::MalformedDate(str_date.to_string()))
}

//////////////////////////////////////////////////////////////
// -- TESTS --
//////////////////////////////////////////////////////////////
