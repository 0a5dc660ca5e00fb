use hyper::body::{Body, Bytes};
use hyper::client::connect::Connect;
use hyper::client::Client;
use hyper::header::{ACCEPT_LANGUAGE, LOCATION};
use hyper::http::uri::{InvalidUri, Uri};
use hyper::StatusCode;
use hyper_tls::HttpsConnector;
use std::time::Duration;
use thiserror::Error;

const MAX_REDIRECTS: usize = 8;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error(transparent)]
    Hyper(#[from] hyper::Error),
    #[error(transparent)]
    Http(#[from] hyper::http::Error),
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] InvalidUri),
    #[error("Non-success status code: {0}")]
    NonSuccess(StatusCode),
    #[error("Too many redirects, last status code: {0}")]
    TooManyRedirects(StatusCode),
    #[error("Cannot start HTTP runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
}

impl From<StatusCode> for TransportError {
    fn from(status_code: StatusCode) -> Self {
        TransportError::NonSuccess(status_code)
    }
}

/// Blocking HTTP GET used by [`crate::Client`].
///
/// Implementations return the raw response body of a successful (2xx) response.
pub trait Transport: Send + Sync {
    fn get(&self, url: &str, accept_language: Option<&str>) -> Result<Bytes, TransportError>;
}

/// hyper-based transport supporting both http and https endpoints.
///
/// Every call builds its own connector and single-threaded tokio runtime, so nothing is kept
/// between requests. It blocks the calling thread and must not be called from within an async
/// runtime.
#[derive(Debug, Clone, Default)]
pub struct HyperTransport {
    timeout: Option<Duration>,
}

impl HyperTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bounds the whole request, redirects included
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    async fn fetch<C>(
        client: &Client<C>,
        mut uri: Uri,
        accept_language: Option<&str>,
    ) -> Result<Bytes, TransportError>
    where
        C: Connect + Clone + Send + Sync + 'static,
    {
        let mut redirects = 0;
        let response = loop {
            let mut builder = hyper::Request::get(&uri);
            if let Some(lang) = accept_language {
                builder = builder.header(ACCEPT_LANGUAGE, lang);
            }
            let request = builder.body(Body::empty())?;
            let response = client.request(request).await?;

            if response.status().is_success() {
                break response;
            } else if response.status().is_redirection() {
                if redirects == MAX_REDIRECTS {
                    return Err(TransportError::TooManyRedirects(response.status()));
                }
                let location: Uri = response
                    .headers()
                    .get(LOCATION)
                    .ok_or_else(|| response.status())?
                    .as_bytes()
                    .try_into()
                    .map_err(|_| response.status())?;
                uri = resolve_location(&uri, location)?;
                redirects += 1;
                log::debug!("following {} redirect", response.status());
            } else {
                return Err(response.status().into());
            }
        };
        Ok(hyper::body::to_bytes(response.into_body()).await?)
    }
}

impl Transport for HyperTransport {
    fn get(&self, url: &str, accept_language: Option<&str>) -> Result<Bytes, TransportError> {
        let uri: Uri = url.parse()?;
        let https = HttpsConnector::new();
        let client = Client::builder().build::<_, Body>(https);
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        rt.block_on(async {
            let fetch = Self::fetch(&client, uri, accept_language);
            match self.timeout {
                Some(timeout) => match tokio::time::timeout(timeout, fetch).await {
                    Ok(result) => result,
                    Err(_) => Err(TransportError::Timeout(timeout)),
                },
                None => fetch.await,
            }
        })
    }
}

/// Relative `Location` values reuse scheme and authority of the previous request
fn resolve_location(current: &Uri, location: Uri) -> Result<Uri, TransportError> {
    if location.scheme().is_some() {
        return Ok(location);
    }
    let mut parts = location.into_parts();
    parts.scheme = current.scheme().cloned();
    parts.authority = current.authority().cloned();
    Uri::from_parts(parts).map_err(|e| TransportError::Http(e.into()))
}
