use crate::http::*;
use crate::stock::common::Cik;
use crate::{SpiderConfig, SpiderError};
use futures::{stream, StreamExt};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::{debug, error, trace, warn};

/// Source tag of every record read from the recent window.
pub const RECENT: &'static str = "recent";

/// A filing as listed by one of the two feeds, before any filtering.
///
/// Every field but `source` may be absent; EDGAR's arrays are not guaranteed to be the same
/// length, and individual entries may be `null`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilingRecord {
    pub form: Option<String>,
    pub accession_number: Option<String>,
    pub filing_date: Option<String>,
    pub report_date: Option<String>,
    pub primary_document: Option<String>,
    /// `"recent"`, or the name of the historical chunk the record came from.
    pub source: String,
}

/// Reads the two filing feeds of a filer: the recent window, and the historical chunks.
pub struct FeedReader<'a, H> {
    http: &'a H,
    config: &'a SpiderConfig,
    tui: bool,
}

impl<'a, H: Transport> FeedReader<'a, H> {
    pub fn new(http: &'a H, config: &'a SpiderConfig) -> Self {
        Self {
            http,
            config,
            tui: false,
        }
    }

    /// Show a progress bar while the historical chunks are fetched.
    pub fn tui(mut self, tui: bool) -> Self {
        self.tui = tui;
        self
    }

    /// GET the submissions document of `cik`.
    pub async fn submissions(&self, cik: &Cik) -> Result<Submissions, SpiderError> {
        let url = self.config.submissions(cik);
        debug!("fetching submissions for CIK{cik}");
        get_json(self.http, &url).await.map_err(|err| {
            error!("failed to fetch submissions for CIK{cik}, error({err})");
            err
        })
    }

    /// The recent window of `cik`, tagged `"recent"`.
    pub async fn load_recent(&self, cik: &Cik) -> Result<Vec<FilingRecord>, SpiderError> {
        let submissions = self.submissions(cik).await?;
        Ok(submissions.recent_records())
    }

    /// Every historical chunk of `cik`, each record tagged with its chunk's name.
    pub async fn load_historical(&self, cik: &Cik) -> Result<Vec<FilingRecord>, SpiderError> {
        let submissions = self.submissions(cik).await?;
        self.chunks(&submissions).await
    }

    /// Fetch & decode every chunk listed in `submissions`, in listed order.
    ///
    /// The first chunk that fails to fetch fails the whole read; no partial list is returned.
    pub async fn chunks(&self, submissions: &Submissions) -> Result<Vec<FilingRecord>, SpiderError> {
        let time = std::time::Instant::now();
        let listed: Vec<(&str, &ChunkRef)> = submissions
            .filings
            .files
            .iter()
            .filter_map(|chunk| Some((chunk.name.as_deref()?, chunk)))
            .filter(|(name, _)| !name.is_empty())
            .collect();

        let pb = crate::tui::progress(
            listed.len(),
            "collecting historical filings ...".to_string(),
            self.tui,
        );

        let mut records = Vec::new();
        let mut stream = stream::iter(listed);
        while let Some((name, listing)) = stream.next().await {
            let url = self.config.chunk(name);
            trace!(
                "fetching chunk {name}, {} filings from {} to {}",
                listing.filing_count.map_or("?".to_string(), |n| n.to_string()),
                listing.filing_from.as_deref().unwrap_or("?"),
                listing.filing_to.as_deref().unwrap_or("?"),
            );
            let chunk: Chunk = get_json(self.http, &url).await.map_err(|err| {
                error!("failed to fetch chunk {name}, error({err})");
                pb.finish_and_clear();
                err
            })?;

            let decoded = chunk.into_records(name);
            trace!("{} records decoded from chunk {name}", decoded.len());
            records.extend(decoded);
            pb.inc(1);
        }

        pb.finish_and_clear();
        debug!(
            "{} historical records collected. {}",
            records.len(),
            crate::time_elapsed(time)
        );

        Ok(records)
    }
}

/// Entry `i` of a parallel array; absent when the array is too short or the entry isn't a string.
fn at(column: &[Option<String>], i: usize) -> Option<String> {
    column.get(i).cloned().flatten()
}

/// An array of strings; any entry that isn't one (`null`, a number, ...) is read as absent.
fn de_entries<'de, D>(deserializer: D) -> Result<Vec<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = Vec::<Value>::deserialize(deserializer)?;
    Ok(entries.into_iter().map(string_entry).collect())
}

/// As [`de_entries`], but a column that isn't an array at all reads as empty.
fn de_column<'de, D>(deserializer: D) -> Result<Vec<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(entries) => Ok(entries.into_iter().map(string_entry).collect()),
        _ => Ok(vec![]),
    }
}

fn string_entry(entry: Value) -> Option<String> {
    match entry {
        Value::String(s) => Some(s),
        _ => None,
    }
}

// de
// ----------------------------------------------------------------------------

// {
//     "cik": "320193",
//     "name": "Apple Inc.",
//     ...
//     "filings": {
//         "recent": { ... parallel arrays ... },
//         "files": [
//             {
//                 "name": "CIK0000320193-submissions-001.json",
//                 "filingCount": 1243,
//                 "filingFrom": "1994-01-26",
//                 "filingTo": "2014-10-29"
//             },
//             ...
//         ]
//     }
// }
#[derive(Debug, Default, Deserialize)]
pub struct Submissions {
    #[serde(default)]
    pub filings: FilingsSection,
}

#[derive(Debug, Default, Deserialize)]
pub struct FilingsSection {
    #[serde(default)]
    pub recent: RecentWindow,
    #[serde(default)]
    pub files: Vec<ChunkRef>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChunkRef {
    pub name: Option<String>,
    pub filing_count: Option<u64>,
    pub filing_from: Option<String>,
    pub filing_to: Option<String>,
}

//         "recent": {
//             "accessionNumber": ["0000320193-24-000123", ...],
//             "filingDate": ["2024-11-01", ...],
//             "reportDate": ["2024-09-28", ...],
//             "form": ["10-K", ...],
//             "primaryDocument": ["aapl-20240928.htm", ...],
//             ...
//         }
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentWindow {
    #[serde(default, deserialize_with = "de_column")]
    pub form: Vec<Option<String>>,
    #[serde(default, deserialize_with = "de_column")]
    pub accession_number: Vec<Option<String>>,
    #[serde(default, deserialize_with = "de_column")]
    pub report_date: Vec<Option<String>>,
    #[serde(default, deserialize_with = "de_column")]
    pub primary_document: Vec<Option<String>>,
}

impl Submissions {
    /// Records of the recent window, one per `form` entry.
    ///
    /// The recent window's *report* date fills both date slots of the record; the window's own
    /// `filingDate` array is not read.
    pub fn recent_records(&self) -> Vec<FilingRecord> {
        let recent = &self.filings.recent;
        let records: Vec<FilingRecord> = (0..recent.form.len())
            .map(|i| {
                let report_date = at(&recent.report_date, i);
                FilingRecord {
                    form: at(&recent.form, i),
                    accession_number: at(&recent.accession_number, i),
                    filing_date: report_date.clone(),
                    report_date,
                    primary_document: at(&recent.primary_document, i),
                    source: RECENT.to_string(),
                }
            })
            .collect();

        debug!("{} recent records collected", records.len());
        records
    }
}

// A historical chunk is usually the same parallel arrays as the recent window, at the top level:
//
// {
//     "accessionNumber": [...],
//     "form": [...],
//     "filingDate": [...],
//     "reportDate": [...],
//     "primaryDocument": [...],
//     ...
// }
//
// though some are a nested list of already structured records:
//
// {
//     "filings": [
//         { "form": "10-K", "accessionNumber": "...", "filingDate": "...", "document": "..." },
//         ...
//     ]
// }
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Chunk {
    Arrays(ParallelArrays),
    Nested { filings: Vec<StructuredRecord> },
    Unrecognised(IgnoredAny),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ParallelArrays {
    // the only column that decides whether a chunk is parallel arrays
    #[serde(deserialize_with = "de_entries")]
    accession_number: Vec<Option<String>>,
    #[serde(default, deserialize_with = "de_column")]
    form: Vec<Option<String>>,
    #[serde(default, deserialize_with = "de_column")]
    filing_date: Vec<Option<String>>,
    #[serde(default, deserialize_with = "de_column")]
    report_date: Vec<Option<String>>,
    #[serde(default, deserialize_with = "de_column")]
    primary_document: Vec<Option<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StructuredRecord {
    #[serde(default)]
    form: Option<String>,
    #[serde(default)]
    accession_number: Option<String>,
    #[serde(default)]
    filing_date: Option<String>,
    #[serde(default)]
    report_date: Option<String>,
    #[serde(default, alias = "document")]
    primary_document: Option<String>,
}

impl Chunk {
    fn into_records(self, name: &str) -> Vec<FilingRecord> {
        match self {
            // `accessionNumber` drives the iteration; the other columns are read alongside it
            Chunk::Arrays(arrays) => arrays
                .accession_number
                .iter()
                .enumerate()
                .map(|(i, accession_number)| FilingRecord {
                    form: at(&arrays.form, i),
                    accession_number: accession_number.clone(),
                    filing_date: at(&arrays.filing_date, i),
                    report_date: at(&arrays.report_date, i),
                    primary_document: at(&arrays.primary_document, i),
                    source: name.to_string(),
                })
                .collect(),
            Chunk::Nested { filings } => filings
                .into_iter()
                .map(|record| FilingRecord {
                    form: record.form,
                    accession_number: record.accession_number,
                    filing_date: record.filing_date,
                    report_date: record.report_date,
                    primary_document: record.primary_document,
                    source: name.to_string(),
                })
                .collect(),
            Chunk::Unrecognised(_) => {
                warn!("chunk {name} is neither parallel arrays nor a list of filings; skipped");
                vec![]
            }
        }
    }
}

//////////////////////////////////////////////////////////////
// -- TESTS --
//////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_arrays_yield_absent_fields() {
        let json = r#"{
            "accessionNumber": ["a-1", "a-2", "a-3"],
            "form": ["10-K", "10-Q"],
            "filingDate": ["2020-01-01", null, "2020-03-01"],
            "primaryDocument": ["one.htm"]
        }"#;
        let chunk: Chunk = serde_json::from_str(json).unwrap();
        let records = chunk.into_records("CIK0000000001-submissions-001.json");

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].primary_document.as_deref(), Some("one.htm"));
        assert_eq!(records[1].filing_date, None);
        assert_eq!(records[2].form, None);
        assert_eq!(records[2].primary_document, None);
        assert_eq!(records[2].report_date, None);
        assert!(records
            .iter()
            .all(|r| r.source == "CIK0000000001-submissions-001.json"));
    }

    #[test]
    fn non_string_entries_yield_absent_fields() {
        let json = r#"{
            "accessionNumber": ["a-1", "a-2", 3],
            "form": ["10-K", "10-K", "10-K"],
            "filingDate": ["2023-02-01", "2022-02-01", "2021-02-01"],
            "reportDate": ["2022-12-31", 0],
            "primaryDocument": "k.htm"
        }"#;
        let chunk: Chunk = serde_json::from_str(json).unwrap();
        let records = chunk.into_records("chunk-001.json");

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].report_date.as_deref(), Some("2022-12-31"));
        assert_eq!(records[1].report_date, None);
        assert_eq!(records[1].filing_date.as_deref(), Some("2022-02-01"));
        assert_eq!(records[2].accession_number, None);
        assert!(records.iter().all(|r| r.primary_document.is_none()));
    }

    #[test]
    fn chunk_listing_metadata() {
        let json = r#"{
            "filings": {
                "files": [
                    {
                        "name": "CIK0000320193-submissions-001.json",
                        "filingCount": 1243,
                        "filingFrom": "1994-01-26",
                        "filingTo": "2014-10-29"
                    },
                    { "name": "CIK0000320193-submissions-002.json" }
                ]
            }
        }"#;
        let submissions: Submissions = serde_json::from_str(json).unwrap();
        let files = &submissions.filings.files;

        assert_eq!(files.len(), 2);
        assert_eq!(files[0].filing_count, Some(1243));
        assert_eq!(files[0].filing_from.as_deref(), Some("1994-01-26"));
        assert_eq!(files[0].filing_to.as_deref(), Some("2014-10-29"));
        assert_eq!(files[1].filing_count, None);
    }

    #[test]
    fn nested_chunk_accepts_document_alias() {
        let json = r#"{
            "filings": [
                { "form": "10-K", "accessionNumber": "a-1", "filingDate": "2015-02-01", "document": "k.htm" }
            ]
        }"#;
        let chunk: Chunk = serde_json::from_str(json).unwrap();
        let records = chunk.into_records("chunk-002.json");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].primary_document.as_deref(), Some("k.htm"));
        assert_eq!(records[0].source, "chunk-002.json");
    }

    #[test]
    fn unrecognised_chunk_is_empty() {
        let chunk: Chunk = serde_json::from_str(r#"{ "something": "else" }"#).unwrap();
        assert!(chunk.into_records("chunk-003.json").is_empty());
    }

    #[test]
    fn recent_window_uses_report_date_for_filing_date() {
        let json = r#"{
            "filings": {
                "recent": {
                    "form": ["10-K", "8-K"],
                    "accessionNumber": ["a-1"],
                    "filingDate": ["2024-02-01", "2024-03-01"],
                    "reportDate": ["2023-12-31", ""],
                    "primaryDocument": ["k.htm", "ex.htm"]
                },
                "files": []
            }
        }"#;
        let submissions: Submissions = serde_json::from_str(json).unwrap();
        let records = submissions.recent_records();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].filing_date.as_deref(), Some("2023-12-31"));
        assert_eq!(records[0].report_date.as_deref(), Some("2023-12-31"));
        assert_eq!(records[1].accession_number, None);
        assert_eq!(records[1].filing_date.as_deref(), Some(""));
        assert!(records.iter().all(|r| r.source == RECENT));
    }
}
