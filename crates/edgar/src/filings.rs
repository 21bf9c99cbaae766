use edgar_spider::export::{save_to_excel, save_to_text};
use edgar_spider::stock::sec::{ContentFetcher, Filings, TextConverter, TickerResolver};
use edgar_spider::tui::banner;
use edgar_spider::{time_elapsed, HttpTransport, SpiderConfig};
use std::path::PathBuf;
use tracing::{debug, info, trace};

pub(crate) struct Args {
    pub ticker: String,
    pub form: String,
    pub years: u32,
    pub output: Option<PathBuf>,
    pub text: Option<PathBuf>,
    pub pages: bool,
}

/// Collect, export and (optionally) download the filings of a single ticker.
pub(crate) async fn run(config: &SpiderConfig, args: Args, tui: bool) -> anyhow::Result<()> {
    let time = std::time::Instant::now();
    let http = HttpTransport::new(config)?;

    // 1. ticker registry, loaded once
    trace!("loading ticker registry ...");
    let tickers = TickerResolver::load(&http, config).await?;

    if tui {
        let title = tickers.title(&args.ticker).unwrap_or_default();
        banner(&format!("[{}] {title}", args.ticker.to_uppercase()));
    }

    // 2. recent & historical filings, merged
    let filings = Filings::new(&http, &tickers, config)
        .tui(tui)
        .get_filings(&args.ticker, &args.form, args.years)
        .await?;
    debug!("{} filings collected", filings.len());

    // 3. exports
    let output = args.output.unwrap_or_else(|| {
        PathBuf::from(format!(
            "{ticker}_{form}s_combined_{years}yrs.xlsx",
            ticker = args.ticker.to_uppercase(),
            form = args.form,
            years = args.years,
        ))
    });
    save_to_excel(&filings, &output)?;

    if let Some(path) = &args.text {
        save_to_text(&filings, path).await?;
    }

    // 4. documents, as pages of text
    if args.pages {
        let documents = ContentFetcher::new(&http, TextConverter::default())
            .tui(tui)
            .fetch_all(&filings)
            .await;

        match documents.into_iter().next().flatten() {
            Some(pages) => {
                for (idx, page) in pages.iter().enumerate() {
                    println!("\n{bar} page {n} {bar}\n", bar = "-".repeat(20), n = idx + 1);
                    println!("{page}");
                }
            }
            None => println!("No text content available for the first filing."),
        }
    }

    info!(
        "finished collecting filings for [{}]. {}",
        args.ticker,
        time_elapsed(time)
    );

    Ok(())
}
