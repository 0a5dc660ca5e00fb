use std::fmt::Display;
use std::net::IpAddr;

pub const DEFAULT_BASE_URL: &str = "http://api.db-ip.com/v2/";

/// Concatenates endpoint, key and optional path, nothing is escaped.
pub fn compose_url(base_url: &str, api_key: &str, path: Option<&str>) -> String {
    [base_url, api_key, path.unwrap_or_default()].concat()
}

/// Same URL with the API key masked, suitable for logs
pub(crate) fn redacted_url(base_url: &str, path: Option<&str>) -> String {
    compose_url(base_url, "<key>", path)
}

/// Addresses of a single lookup request.
///
/// Addresses are not validated locally, the server rejects malformed ones with
/// `INVALID_ADDRESS`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressQuery {
    Single(String),
    Many(Vec<String>),
}

impl AddressQuery {
    /// Path segment without the leading slash: the address itself or the list joined with commas
    pub fn path_segment(&self) -> String {
        match self {
            Self::Single(address) => address.clone(),
            Self::Many(addresses) => addresses.join(","),
        }
    }

    pub fn path(&self) -> String {
        format!("/{}", self.path_segment())
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Many(addresses) => addresses.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<&str> for AddressQuery {
    fn from(address: &str) -> Self {
        Self::Single(address.to_owned())
    }
}

impl From<String> for AddressQuery {
    fn from(address: String) -> Self {
        Self::Single(address)
    }
}

impl From<&String> for AddressQuery {
    fn from(address: &String) -> Self {
        Self::Single(address.clone())
    }
}

impl From<IpAddr> for AddressQuery {
    fn from(address: IpAddr) -> Self {
        Self::Single(address.to_string())
    }
}

impl<T: Display> From<Vec<T>> for AddressQuery {
    fn from(addresses: Vec<T>) -> Self {
        addresses.as_slice().into()
    }
}

impl<T: Display> From<&[T]> for AddressQuery {
    fn from(addresses: &[T]) -> Self {
        Self::Many(addresses.iter().map(ToString::to_string).collect())
    }
}

impl<T: Display, const N: usize> From<[T; N]> for AddressQuery {
    fn from(addresses: [T; N]) -> Self {
        addresses.as_slice().into()
    }
}

impl<T: Display, const N: usize> From<&[T; N]> for AddressQuery {
    fn from(addresses: &[T; N]) -> Self {
        addresses.as_slice().into()
    }
}

impl<T: Display> FromIterator<T> for AddressQuery {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::Many(iter.into_iter().map(|a| a.to_string()).collect())
    }
}
