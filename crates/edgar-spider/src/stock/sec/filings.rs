use super::forms::FormType;
use super::submissions::{FeedReader, FilingRecord};
use super::tickers::TickerResolver;
use crate::http::*;
use crate::stock::common::{convert_date_type, Cik};
use crate::{SpiderConfig, SpiderError};
use chrono::{Days, NaiveDate};
use std::collections::HashSet;
use tracing::{debug, info, trace};

/// A filing selected by [`Filings::get_filings`]; one per accession number.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilingResult {
    pub accession_number: String,
    /// As listed upstream, i.e. `"2024-01-02"`.
    pub filing_date: String,
    pub document: String,
    /// `<archives>/<cik>/<accession number without dashes>/<document>`.
    pub link: String,
    /// `"recent"`, or the name of the historical chunk the filing came from.
    pub source: String,
}

impl FilingResult {
    /// Column names, in export order.
    pub const COLUMNS: [&'static str; 5] =
        ["accessionNumber", "filingDate", "document", "link", "source"];

    /// `(column, value)` pairs, in export order.
    pub fn fields(&self) -> [(&'static str, &str); 5] {
        [
            (Self::COLUMNS[0], &self.accession_number),
            (Self::COLUMNS[1], &self.filing_date),
            (Self::COLUMNS[2], &self.document),
            (Self::COLUMNS[3], &self.link),
            (Self::COLUMNS[4], &self.source),
        ]
    }
}

/// Filings of a single form type, over a number of years, from both the recent window and the
/// historical chunks of a filer.
pub struct Filings<'a, H> {
    http: &'a H,
    tickers: &'a TickerResolver,
    config: &'a SpiderConfig,
    tui: bool,
}

impl<'a, H: Transport> Filings<'a, H> {
    pub fn new(http: &'a H, tickers: &'a TickerResolver, config: &'a SpiderConfig) -> Self {
        Self {
            http,
            tickers,
            config,
            tui: false,
        }
    }

    /// Show progress bars while the feeds are read.
    pub fn tui(mut self, tui: bool) -> Self {
        self.tui = tui;
        self
    }

    /// All `form` filings of `ticker` within the last `years_back` years (counted from today, UTC),
    /// newest first.
    pub async fn get_filings(
        &self,
        ticker: &str,
        form: &str,
        years_back: u32,
    ) -> Result<Vec<FilingResult>, SpiderError> {
        let today = chrono::Utc::now().date_naive();
        self.get_filings_as_of(ticker, form, years_back, today).await
    }

    /// As [`Filings::get_filings`], with `today` given explicitly.
    pub async fn get_filings_as_of(
        &self,
        ticker: &str,
        form: &str,
        years_back: u32,
        today: NaiveDate,
    ) -> Result<Vec<FilingResult>, SpiderError> {
        let time = std::time::Instant::now();

        // validate & resolve before anything touches the network
        let form: FormType = form.parse()?;
        let cik = self.tickers.resolve(ticker)?;
        let cutoff = cutoff(today, years_back);
        debug!("collecting {form} filings for [{ticker}] CIK{cik} since {cutoff}");

        // both feeds; either failing fails the call
        let reader = FeedReader::new(self.http, self.config).tui(self.tui);
        let submissions = reader.submissions(&cik).await?;
        let recent = submissions.recent_records();
        let historical = reader.chunks(&submissions).await?;

        let results = aggregate(
            self.config,
            &cik,
            form,
            cutoff,
            recent.into_iter().chain(historical),
        );

        info!(
            "{} {form} filings collected for [{ticker}]. {}",
            results.len(),
            crate::time_elapsed(time)
        );

        Ok(results)
    }
}

/// `today` less `365 * years_back` days; not calendar aware.
pub fn cutoff(today: NaiveDate, years_back: u32) -> NaiveDate {
    today
        .checked_sub_days(Days::new(365 * u64::from(years_back)))
        .unwrap_or(NaiveDate::MIN)
}

/// Filter, link, deduplicate and order `records`.
///
/// `records` must come recent feed first: on a repeated accession number the first record seen is
/// kept, so a filing listed by both feeds keeps its recent entry.
pub fn aggregate(
    config: &SpiderConfig,
    cik: &Cik,
    form: FormType,
    cutoff: NaiveDate,
    records: impl IntoIterator<Item = FilingRecord>,
) -> Vec<FilingResult> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut results: Vec<FilingResult> = records
        .into_iter()
        .filter(|record| record.form.as_deref() == Some(form.as_str()))
        .filter_map(|record| select(config, cik, cutoff, record))
        .filter(|result| seen.insert(result.accession_number.clone()))
        .collect();

    // stable; equal dates keep their merge order
    results.sort_by(|a, b| b.filing_date.cmp(&a.filing_date));
    results
}

/// A record within the cutoff, with its canonical link; `None` for anything that can't be dated or
/// linked.
fn select(
    config: &SpiderConfig,
    cik: &Cik,
    cutoff: NaiveDate,
    record: FilingRecord,
) -> Option<FilingResult> {
    let filing_date = record.filing_date?;
    let dated = match convert_date_type(&filing_date) {
        Ok(dated) => dated,
        Err(err) => {
            trace!("dropping {:?} from {}, {err}", record.accession_number, record.source);
            return None;
        }
    };
    if dated < cutoff {
        return None;
    }

    let (Some(accession_number), Some(document)) = (record.accession_number, record.primary_document)
    else {
        trace!("dropping a record from {} without accession number or document", record.source);
        return None;
    };

    Some(FilingResult {
        link: config.archive_link(cik, &accession_number, &document),
        accession_number,
        filing_date,
        document,
        source: record.source,
    })
}

//////////////////////////////////////////////////////////////
// -- TESTS --
//////////////////////////////////////////////////////////////
