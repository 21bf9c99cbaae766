pub mod api;
pub mod config;
pub mod error;
pub mod export;
pub mod stock;
pub mod tui;

pub use api::{HttpTransport, Transport};
pub use config::SpiderConfig;
pub use error::SpiderError;

/// Shortcut for required API elements.
pub mod http {
    pub use crate::api::{get_json, HttpTransport, Transport};
    pub(crate) use dotenv::var;
    pub(crate) use reqwest::Client as HttpClient;
}

/// Human readable elapsed time, for the end of a logged step.
pub fn time_elapsed(time: std::time::Instant) -> String {
    format!("time elapsed: {:.2?}", time.elapsed())
}

//////////////////////////////////////////////////////////////
// -- TESTS --
//////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    #[test]
    fn elapsed_to_two_decimals() {
        let elapsed = super::time_elapsed(std::time::Instant::now());
        let (label, value) = elapsed.split_once(": ").unwrap();
        assert_eq!(label, "time elapsed");
        let digits = value.trim_end_matches(|c: char| c.is_alphabetic() || c == 'µ');
        assert_eq!(digits.split_once('.').map(|(_, frac)| frac.len()), Some(2));
    }
}
