use crate::error::{ClientError, Error, JsonKind, ServerError};
use crate::error_code::ErrorCode;

use serde_json::{Map, Value};

/// Decoded API payload, kept as a generic JSON object since the field set is up to the server.
pub type ApiResponse = Map<String, Value>;

const ERROR_FIELD: &str = "error";
const ERROR_CODE_FIELD: &str = "errorCode";

/// Turns a raw response body into the API payload or the failure it describes
pub fn decode(body: &[u8]) -> Result<ApiResponse, Error> {
    let value: Value = serde_json::from_slice(body).map_err(ClientError::Decode)?;
    let object = match value {
        Value::Object(object) => object,
        other => return Err(ClientError::UnexpectedShape(JsonKind::from(&other)).into()),
    };
    if let Some(error) = server_error(&object) {
        return Err(error.into());
    }
    Ok(object)
}

/// `error: null` counts as no error at all
fn server_error(object: &ApiResponse) -> Option<ServerError> {
    let message = match object.get(ERROR_FIELD)? {
        Value::Null => return None,
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    let code = object.get(ERROR_CODE_FIELD).and_then(|value| match value {
        Value::Null => None,
        Value::String(s) => Some(ErrorCode::from(s.as_str())),
        other => Some(ErrorCode::from(other.to_string())),
    });
    Some(ServerError::new(message, code))
}
