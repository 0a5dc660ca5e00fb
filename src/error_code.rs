use serde::Deserialize;
use std::fmt;

/// Machine-readable error code reported by the API in the `errorCode` field.
///
/// The named variants are the codes the service documents. Anything else is kept
/// verbatim in [`ErrorCode::Other`], so [`ErrorCode::as_str`] always returns
/// exactly what the server sent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum ErrorCode {
    InvalidKey,
    InvalidAddress,
    HttpsNotAllowed,
    TemporaryBlocked,
    TooManyAddresses,
    OverQueryLimit,
    Expired,
    Unavailable,
    Other(String),
}

impl ErrorCode {
    pub fn as_str(&self) -> &str {
        match self {
            Self::InvalidKey => "INVALID_KEY",
            Self::InvalidAddress => "INVALID_ADDRESS",
            Self::HttpsNotAllowed => "HTTPS_NOT_ALLOWED",
            Self::TemporaryBlocked => "TEMPORARY_BLOCKED",
            Self::TooManyAddresses => "TOO_MANY_ADDRESSES",
            Self::OverQueryLimit => "OVER_QUERY_LIMIT",
            Self::Expired => "EXPIRED",
            Self::Unavailable => "UNAVAILABLE",
            Self::Other(s) => s,
        }
    }

    /// `true` for codes outside the documented vocabulary
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Other(_))
    }
}

impl<'a> From<&'a str> for ErrorCode {
    fn from(s: &'a str) -> Self {
        // No trimming or case folding, the code must survive unchanged
        match s {
            "INVALID_KEY" => Self::InvalidKey,
            "INVALID_ADDRESS" => Self::InvalidAddress,
            "HTTPS_NOT_ALLOWED" => Self::HttpsNotAllowed,
            "TEMPORARY_BLOCKED" => Self::TemporaryBlocked,
            "TOO_MANY_ADDRESSES" => Self::TooManyAddresses,
            "OVER_QUERY_LIMIT" => Self::OverQueryLimit,
            "EXPIRED" => Self::Expired,
            "UNAVAILABLE" => Self::Unavailable,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl From<String> for ErrorCode {
    fn from(s: String) -> Self {
        match Self::from(s.as_str()) {
            Self::Other(_) => Self::Other(s),
            known => known,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PartialEq<str> for ErrorCode {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for ErrorCode {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KNOWN: [&str; 8] = [
        "INVALID_KEY",
        "INVALID_ADDRESS",
        "HTTPS_NOT_ALLOWED",
        "TEMPORARY_BLOCKED",
        "TOO_MANY_ADDRESSES",
        "OVER_QUERY_LIMIT",
        "EXPIRED",
        "UNAVAILABLE",
    ];

    #[test]
    fn known_codes_are_recognised() {
        for code in KNOWN {
            let error_code = ErrorCode::from(code);
            assert!(!error_code.is_unknown(), "{code}");
            assert_eq!(error_code.as_str(), code);
        }
        assert_eq!(ErrorCode::from("OVER_QUERY_LIMIT"), ErrorCode::OverQueryLimit);
    }

    #[test]
    fn unknown_code_passes_through_verbatim() {
        for code in ["SOMETHING_NEW", "invalid_key", " INVALID_KEY", ""] {
            let error_code = ErrorCode::from(code.to_owned());
            assert!(error_code.is_unknown());
            assert_eq!(error_code, code);
            assert_eq!(error_code.to_string(), code);
        }
    }

    #[test]
    fn deserialize_from_json_string() {
        let code: ErrorCode = serde_json::from_str(r#""EXPIRED""#).unwrap();
        assert_eq!(code, ErrorCode::Expired);
        let code: ErrorCode = serde_json::from_str(r#""NOPE""#).unwrap();
        assert_eq!(code, ErrorCode::Other("NOPE".into()));
    }
}
