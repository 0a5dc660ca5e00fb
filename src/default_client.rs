//! Process-wide default [`Client`] for one-off lookups.
//!
//! The instance is built on first use from the key given to [`set_default_api_key`]. Code that
//! owns its configuration should create a [`Client`] directly instead.

use crate::client::Client;
use crate::error::{ClientError, Error};
use crate::request::AddressQuery;
use crate::response::ApiResponse;

use lazy_static::lazy_static;
use std::sync::{Arc, RwLock};

#[derive(Default)]
struct DefaultState {
    api_key: Option<String>,
    client: Option<Arc<Client>>,
}

lazy_static! {
    static ref DEFAULT_STATE: RwLock<DefaultState> = RwLock::new(DefaultState::default());
}

/// Sets the key for the default client, a previously built default client is discarded
pub fn set_default_api_key(api_key: impl Into<String>) {
    let mut state = DEFAULT_STATE.write().unwrap_or_else(|e| e.into_inner());
    state.api_key = Some(api_key.into());
    state.client = None;
}

/// Installs a fully configured client as the default one
pub fn set_default_client(client: Client) {
    let mut state = DEFAULT_STATE.write().unwrap_or_else(|e| e.into_inner());
    state.api_key = Some(client.api_key().to_owned());
    state.client = Some(Arc::new(client));
}

pub fn default_client() -> Result<Arc<Client>, ClientError> {
    {
        let state = DEFAULT_STATE.read().unwrap_or_else(|e| e.into_inner());
        if let Some(client) = &state.client {
            return Ok(client.clone());
        }
    }
    let mut state = DEFAULT_STATE.write().unwrap_or_else(|e| e.into_inner());
    // Another thread could have built it while we were waiting for the lock
    if let Some(client) = &state.client {
        return Ok(client.clone());
    }
    let api_key = state.api_key.clone().ok_or(ClientError::MissingApiKey)?;
    let client = Arc::new(Client::new(api_key));
    state.client = Some(client.clone());
    Ok(client)
}

/// [`Client::lookup_address`] on the default client
pub fn lookup(addresses: impl Into<AddressQuery>) -> Result<ApiResponse, Error> {
    default_client()?.lookup_address(addresses)
}

/// [`Client::key_info`] on the default client
pub fn key_info() -> Result<ApiResponse, Error> {
    default_client()?.key_info()
}

#[cfg(test)]
fn reset() {
    *DEFAULT_STATE.write().unwrap_or_else(|e| e.into_inner()) = DefaultState::default();
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;

    // Tests below share the global state
    lazy_static! {
        static ref SERIAL: Mutex<()> = Mutex::new(());
    }

    #[test]
    fn missing_key() {
        let _guard = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
        reset();
        assert!(matches!(default_client(), Err(ClientError::MissingApiKey)));
        let err = lookup("1.1.1.1").unwrap_err();
        assert!(err.is_client_error());
        assert!(matches!(
            key_info(),
            Err(Error::Client(ClientError::MissingApiKey))
        ));
    }

    #[test]
    fn client_is_built_once() {
        let _guard = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
        reset();
        set_default_api_key("first");
        let a = default_client().unwrap();
        let b = default_client().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.api_key(), "first");
        assert_eq!(a.base_url(), crate::request::DEFAULT_BASE_URL);
    }

    #[test]
    fn new_key_rebuilds_client() {
        let _guard = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
        reset();
        set_default_api_key("first");
        let a = default_client().unwrap();
        set_default_api_key("second");
        let b = default_client().unwrap();
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(a.api_key(), "first");
        assert_eq!(b.api_key(), "second");
    }

    #[test]
    fn injected_client_is_used() {
        let _guard = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
        reset();
        set_default_client(
            Client::new("injected")
                .with_base_url("http://127.0.0.1:9/")
                .with_language("de"),
        );
        let client = default_client().unwrap();
        assert_eq!(client.api_key(), "injected");
        assert_eq!(client.base_url(), "http://127.0.0.1:9/");
        assert_eq!(client.preferred_language(), Some("de"));
    }

    #[test]
    fn helpers_go_through_default_client() {
        use crate::transport::tests::serve;
        use hyper::{Body, Request, Response};

        fn reply(request: &Request<Body>) -> Response<Body> {
            let body = match request.uri().path() {
                "/k/1.1.1.1" => r#"{"ipAddress":"1.1.1.1","countryCode":"AU"}"#,
                "/k" => r#"{"apiKey":"k","queriesLeft":42}"#,
                _ => r#"{"error":"unexpected path","errorCode":"INVALID_ADDRESS"}"#,
            };
            Response::new(body.into())
        }

        let _guard = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
        reset();
        let (addr, seen) = serve(reply);
        set_default_client(Client::new("k").with_base_url(format!("http://{addr}/")));

        let record = lookup("1.1.1.1").unwrap();
        assert_eq!(record["countryCode"], "AU");
        let info = key_info().unwrap();
        assert_eq!(info["queriesLeft"], 42);

        let paths: Vec<_> = seen.lock().unwrap().iter().map(|(p, _)| p.clone()).collect();
        assert_eq!(paths, ["/k/1.1.1.1", "/k"]);
        reset();
    }
}
