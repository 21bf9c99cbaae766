use super::filings::FilingResult;
use crate::http::*;
use crate::SpiderError;
use regex::Regex;
use tracing::{debug, trace, warn};

/// Marker separating two pages of converted text.
pub const PAGE_BREAK: &'static str = "\n---\n";

lazy_static::lazy_static! {
    /// Inline tags whose markup is dropped but whose text is kept.
    static ref STRIPPED_TAGS: Regex = Regex::new(r"(?i)</?(?:a|b|i|u|code|pre)\b[^>]*>")
        .expect("valid stripped tags pattern");

    /// Horizontal rules; EDGAR filings separate printed pages with them.
    static ref RULES: Regex = Regex::new(r"(?i)<hr\b[^>]*>").expect("valid rule pattern");
}

/// Markup to text.
pub trait Converter {
    fn convert(&self, markup: &str) -> String;
}

/// [`Converter`] rendering HTML to plain text with [`html2text`], keeping page breaks as
/// [`PAGE_BREAK`].
///
/// [`html2text`]: https://docs.rs/html2text/latest/html2text/
#[derive(Clone, Debug)]
pub struct TextConverter {
    /// Column at which text is wrapped.
    pub width: usize,
}

impl Default for TextConverter {
    fn default() -> Self {
        Self { width: 120 }
    }
}

impl Converter for TextConverter {
    fn convert(&self, markup: &str) -> String {
        let markup = STRIPPED_TAGS.replace_all(markup, "");
        let markup = RULES.replace_all(&markup, "<p>---</p>");
        html2text::from_read(markup.as_bytes(), self.width)
    }
}

/// Downloads filing documents, and converts them to pages of text.
pub struct ContentFetcher<'a, H, C> {
    http: &'a H,
    converter: C,
    tui: bool,
}

impl<'a, H: Transport, C: Converter> ContentFetcher<'a, H, C> {
    pub fn new(http: &'a H, converter: C) -> Self {
        Self {
            http,
            converter,
            tui: false,
        }
    }

    /// Show a progress bar during [`ContentFetcher::fetch_all`].
    pub fn tui(mut self, tui: bool) -> Self {
        self.tui = tui;
        self
    }

    /// The raw document behind `link`; `None`, with a warning, if it can't be downloaded.
    pub async fn fetch_raw(&self, link: &str) -> Option<Vec<u8>> {
        match self.download(link).await {
            Ok(bytes) => Some(bytes),
            Err(err) => {
                warn!("failed to download {link}, error({err})");
                None
            }
        }
    }

    /// The document behind `link` as trimmed pages of text; `None`, with a warning, if it can't be
    /// downloaded.
    ///
    /// `link` may be a plain URL or a spreadsheet `=HYPERLINK("url", ...)` formula.
    pub async fn fetch_and_convert(&self, link: &str) -> Option<Vec<String>> {
        let bytes = self.fetch_raw(link).await?;

        // filings are served as latin-1
        let markup: String = bytes.iter().map(|&b| b as char).collect();
        let text = self.converter.convert(&markup);
        let pages = split_pages(&text);
        trace!("{} pages converted from {link}", pages.len());

        Some(pages)
    }

    /// [`ContentFetcher::fetch_and_convert`] for each filing, in order; a failure leaves `None` in
    /// its slot and the rest are still fetched.
    pub async fn fetch_all(&self, filings: &[FilingResult]) -> Vec<Option<Vec<String>>> {
        let time = std::time::Instant::now();
        let pb = crate::tui::progress(
            filings.len(),
            "downloading filings ...".to_string(),
            self.tui,
        );

        let mut documents = Vec::with_capacity(filings.len());
        for filing in filings {
            documents.push(self.fetch_and_convert(&filing.link).await);
            pb.inc(1);
        }
        pb.finish_and_clear();

        let failures = documents.iter().filter(|doc| doc.is_none()).count();
        debug!(
            "{} of {} filings downloaded. {}",
            documents.len() - failures,
            documents.len(),
            crate::time_elapsed(time)
        );

        documents
    }

    async fn download(&self, link: &str) -> Result<Vec<u8>, SpiderError> {
        let url = unwrap_hyperlink(link).ok_or_else(|| SpiderError::ContentFetch {
            link: link.to_string(),
            reason: "no URL found".to_string(),
        })?;
        self.http.get(url).await
    }
}

/// The URL inside a `=HYPERLINK("url", "label")` formula, or `link` itself when it isn't one.
pub fn unwrap_hyperlink(link: &str) -> Option<&str> {
    let url = if link.starts_with("=HYPERLINK(") {
        link.split('"').nth(1)?
    } else {
        link
    };

    match url.trim() {
        "" => None,
        url => Some(url),
    }
}

/// Split converted text on [`PAGE_BREAK`], trimming each page.
pub fn split_pages(text: &str) -> Vec<String> {
    text.split(PAGE_BREAK)
        .map(|page| page.trim().to_string())
        .collect()
}

//////////////////////////////////////////////////////////////
// -- TESTS --
//////////////////////////////////////////////////////////////
