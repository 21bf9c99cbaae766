pub mod common;

/// US stock filings from the [SEC]; tickers, submissions (recent & historical) and the filing
/// documents themselves.
///
/// [SEC]: https://www.sec.gov/search-filings/edgar-application-programming-interfaces
pub mod sec;
