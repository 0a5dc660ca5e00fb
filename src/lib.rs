//! Client for the [DB-IP](https://db-ip.com) IP geolocation API.
//!
//! ```no_run
//! let client = dbip::Client::new("free");
//! let record = client.lookup_address(["1.1.1.1", "8.8.8.8"])?;
//! let key = client.key_info()?;
//! # Ok::<(), dbip::Error>(())
//! ```

mod client;
pub mod config;
mod default_client;
mod error;
mod error_code;
mod request;
mod response;
pub mod transport;

pub use client::Client;
pub use default_client::{default_client, key_info, lookup, set_default_api_key, set_default_client};
pub use error::{ClientError, Error, JsonKind, ServerError};
pub use error_code::ErrorCode;
pub use request::{compose_url, AddressQuery, DEFAULT_BASE_URL};
pub use response::{decode, ApiResponse};
pub use transport::{HyperTransport, Transport, TransportError};
