use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::error;

use crate::transport::ApiResponse;

use super::ClientError;

/// Anything but `expected` fails the call; the body is not looked at.
pub(crate) fn expect_status(
    response: &ApiResponse,
    expected: StatusCode,
) -> Result<(), ClientError> {
    if response.status != expected {
        error!(status_code = response.status.as_u16(), "unexpected response");
        return Err(ClientError::UnexpectedStatus {
            code: response.status.as_u16(),
        });
    }
    Ok(())
}

pub(crate) fn decode_json<T: DeserializeOwned>(response: &ApiResponse) -> Result<T, ClientError> {
    serde_json::from_slice(&response.body).map_err(|err| {
        error!(error = %err, "failed to decode body");
        ClientError::Decode(err.to_string())
    })
}

/// The balance endpoint answers with a bare decimal literal.
pub(crate) fn decode_number(response: &ApiResponse) -> Result<f64, ClientError> {
    let malformed = || {
        let input = String::from_utf8_lossy(&response.body).into_owned();
        error!(body = %input, "failed to parse value from body");
        ClientError::MalformatedNumber { input }
    };
    std::str::from_utf8(&response.body)
        .map_err(|_| malformed())?
        .trim()
        .parse::<f64>()
        .map_err(|_| malformed())
}
