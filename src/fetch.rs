//! Plain HTTP GET, behind a trait so the resolver can run against canned
//! responses.

use log::debug;
use reqwest::blocking::Client;

use crate::error::{Error, Result};

/// Status and body of a GET request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: Vec<u8>,
}

impl Response {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub trait Fetch {
    /// GET `url`. Only transport failures are errors; any HTTP status is a
    /// successful fetch.
    fn get(&self, url: &str) -> Result<Response>;
}

/// Blocking HTTP client. No timeout and no retries: a run either gets its
/// answer or waits.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("mvn2bp/", env!("CARGO_PKG_VERSION")))
            .timeout(Option::<std::time::Duration>::None)
            .build()
            .map_err(|source| Error::Http {
                url: String::new(),
                source,
            })?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    fn get(&self, url: &str) -> Result<Response> {
        debug!("GET {}", url);
        let http_err = |source| Error::Http {
            url: url.to_string(),
            source,
        };
        let response = self.client.get(url).send().map_err(http_err)?;
        let status = response.status().as_u16();
        let body = response.bytes().map_err(http_err)?.to_vec();
        debug!("GET {} -> {} ({} bytes)", url, status, body.len());
        Ok(Response { status, body })
    }
}
