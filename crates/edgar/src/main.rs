mod cli;
mod filings;

// remote imports
use clap::Parser;
use cli::{Cli, TraceLevel};
use edgar_spider::stock::sec::{FormType, TickerResolver};
use edgar_spider::{HttpTransport, SpiderConfig};
use tracing::{subscriber, trace, Level};
use tracing_subscriber::FmtSubscriber;

////////////////////////////////////////////////////////////////////////////

// preproccess the trace level, and open the .env file
fn preprocess(trace_level: Level) -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let my_subscriber = FmtSubscriber::builder()
        .with_max_level(trace_level)
        .finish();
    subscriber::set_global_default(my_subscriber)?;
    Ok(())
}

////////////////////////////////////////////////////////////////////////////

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // set the trace level
    if let Some(trace_level) = cli.trace {
        preprocess(match trace_level {
            TraceLevel::DEBUG => Level::DEBUG,
            TraceLevel::ERROR => Level::ERROR,
            TraceLevel::INFO => Level::INFO,
            TraceLevel::TRACE => Level::TRACE,
            TraceLevel::WARN => Level::WARN,
        })?;
    }
    trace!("command line input recorded: {cli:?}");

    // if no trace level provided, use tui
    let tui = cli.trace.is_none();

    // read cli inputs
    use cli::Commands::*;
    match cli.command {
        // `edgar forms`: no network needed
        Forms => {
            for form in FormType::ALL {
                println!("{form}");
            }
        }

        // `edgar cik <TICKER>`
        Cik { ticker } => {
            let config = SpiderConfig::from_env()?;
            let http = HttpTransport::new(&config)?;
            let tickers = TickerResolver::load(&http, &config).await?;

            let cik = tickers.resolve(&ticker)?;
            match tickers.title(&ticker) {
                Some(title) => println!("{cik}\t[{}] {title}", ticker.to_uppercase()),
                None => println!("{cik}"),
            }
        }

        // `edgar filings <TICKER> [-f FORM] [-y YEARS] [-o OUTPUT] [--text PATH] [--pages]`
        Filings {
            ticker,
            form,
            years,
            output,
            text,
            pages,
        } => {
            let config = SpiderConfig::from_env()?;
            filings::run(
                &config,
                filings::Args {
                    ticker,
                    form,
                    years,
                    output,
                    text,
                    pages,
                },
                tui,
            )
            .await?;
        }
    }

    Ok(())
}
