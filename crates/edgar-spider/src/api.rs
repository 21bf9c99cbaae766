use crate::http::HttpClient;
use crate::{SpiderConfig, SpiderError};
use serde::de::DeserializeOwned;
use std::future::Future;
use tracing::{error, trace};

/// Spider API calls are made up the following components:
/// 1. HTTP
///     a) client, carrying the configured `User-Agent`
///     b) request
///     c) deserializer
///     d) OPTIONAL: transformation
///
/// [`Transport`] covers 1a & 1b, returning the raw body; [`get_json`] covers 1c. Everything
/// downstream (the feed readers, the aggregator, the content fetcher) is generic over the
/// transport, so an in-memory one can stand in for EDGAR.
pub trait Transport {
    /// GET `url`, returning the body of a successful response.
    ///
    /// Any non-success status is an [`SpiderError::UpstreamFetch`].
    fn get(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, SpiderError>> + Send;
}

/// [`Transport`] over a [`reqwest::Client`].
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: HttpClient,
}

impl HttpTransport {
    pub fn new(config: &SpiderConfig) -> Result<Self, SpiderError> {
        let client = reqwest::ClientBuilder::new()
            .user_agent(&config.user_agent)
            .build()
            .map_err(|err| {
                error!("failed to build reqwest client, error({err})");
                SpiderError::upstream("<client>", err)
            })?;

        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<Vec<u8>, SpiderError> {
        trace!("GET {url}");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| {
                error!("failed to fetch data, error({err})");
                SpiderError::upstream(url, err)
            })?
            .error_for_status()
            .map_err(|err| {
                error!("failed to fetch data, error({err})");
                SpiderError::upstream(url, err)
            })?;

        let body = response.bytes().await.map_err(|err| {
            error!("failed to read response body, error({err})");
            SpiderError::upstream(url, err)
        })?;

        Ok(body.to_vec())
    }
}

/// GET `url` and deserialize the body as JSON.
pub async fn get_json<T, H>(http: &H, url: &str) -> Result<T, SpiderError>
where
    T: DeserializeOwned,
    H: Transport,
{
    let body = http.get(url).await?;
    trace!("{} bytes read from {url}; deserializing ...", body.len());
    serde_json::from_slice(&body).map_err(|err| {
        error!("failed to parse JSON, error({err})");
        SpiderError::Decode {
            url: url.to_string(),
            source: err,
        }
    })
}
