use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Sets the level of tracing.
    ///
    /// Without a trace level, progress is shown as a tui instead.
    #[arg(short, long, global = true)]
    pub trace: Option<TraceLevel>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve a ticker to its SEC Central Index Key (CIK).
    Cik {
        /// Stock ticker, e.g. MSFT.
        ticker: String,
    },

    /// Collect a company's filings of one form type, and export them to a spreadsheet.
    Filings {
        /// Stock ticker, e.g. NFLX.
        ticker: String,

        /// Form type, spelled as EDGAR does; see `edgar forms`.
        #[arg(short, long, default_value = "10-K")]
        form: String,

        /// How many years of filings to collect.
        #[arg(short, long, default_value_t = 5)]
        years: u32,

        /// Output workbook; defaults to `<TICKER>_<FORM>s_combined_<YEARS>yrs.xlsx`.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also write the filings to a text file, one line per filing.
        #[arg(long)]
        text: Option<PathBuf>,

        /// Download every filing, convert it to pages of text, and print the pages of the newest.
        #[arg(long)]
        pages: bool,
    },

    /// List the supported form types.
    Forms,
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
#[clap(rename_all = "UPPERCASE")]
pub enum TraceLevel {
    DEBUG,
    ERROR,
    INFO,
    TRACE,
    WARN,
}
