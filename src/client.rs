use crate::error::{ClientError, Error};
use crate::request::{compose_url, redacted_url, AddressQuery, DEFAULT_BASE_URL};
use crate::response::{decode, ApiResponse};
use crate::transport::{HyperTransport, Transport};

/// DB-IP API client.
///
/// Holds the API key, the base endpoint and an optional preferred language. Every call is a
/// single blocking GET through the transport `T`.
///
/// ```no_run
/// let client = dbip::Client::new("free").with_language("fr");
/// let info = client.lookup_address("1.1.1.1")?;
/// println!("{:?}", info.get("countryName"));
/// # Ok::<(), dbip::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Client<T = HyperTransport> {
    api_key: String,
    base_url: String,
    language: Option<String>,
    transport: T,
}

impl Client<HyperTransport> {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_transport(api_key, HyperTransport::new())
    }
}

impl<T: Transport> Client<T> {
    pub fn with_transport(api_key: impl Into<String>, transport: T) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            language: None,
            transport,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.set_base_url(base_url);
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.set_preferred_language(language);
        self
    }

    /// Replaces the API key and, when given, the base endpoint
    pub fn configure(&mut self, api_key: impl Into<String>, base_url: Option<String>) {
        self.api_key = api_key.into();
        if let Some(base_url) = base_url {
            self.base_url = base_url;
        }
    }

    pub fn set_base_url(&mut self, base_url: impl Into<String>) {
        self.base_url = base_url.into();
    }

    /// Sent as `Accept-Language` with every following request
    pub fn set_preferred_language(&mut self, language: impl Into<String>) {
        self.language = Some(language.into());
    }

    pub fn clear_preferred_language(&mut self) {
        self.language = None;
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn preferred_language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Geolocation of one address, or of several addresses in one combined response.
    ///
    /// Addresses are sent as they are, the server reports malformed ones with
    /// [`crate::ErrorCode::InvalidAddress`].
    pub fn lookup_address(&self, addresses: impl Into<AddressQuery>) -> Result<ApiResponse, Error> {
        let query = addresses.into();
        self.call(Some(&query.path()))
    }

    /// Account and quota metadata of the configured key
    pub fn key_info(&self) -> Result<ApiResponse, Error> {
        self.call(None)
    }

    fn call(&self, path: Option<&str>) -> Result<ApiResponse, Error> {
        let url = compose_url(&self.base_url, &self.api_key, path);
        log::debug!("GET {}", redacted_url(&self.base_url, path));

        let body = self
            .transport
            .get(&url, self.language.as_deref())
            .map_err(|source| ClientError::Fetch {
                url: url.clone(),
                source,
            })?;
        if body.is_empty() {
            return Err(ClientError::EmptyResponse { url }.into());
        }
        log::debug!("received {} bytes", body.len());

        decode(&body).map_err(|error| {
            if let Error::Server(e) = &error {
                log::warn!(
                    "DB-IP reported an error ({}): {}",
                    e.code().map(|code| code.as_str()).unwrap_or("-"),
                    e.message(),
                );
            }
            error
        })
    }
}
