//! Conversions from external infrastructure errors into domain errors.

use regwapi_domain::WapiError;
use reqwest::Error as HttpError;
use reqwest::StatusCode;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub WapiError);

impl From<InfraError> for WapiError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<WapiError> for InfraError {
    fn from(value: WapiError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoWapiError {
    fn into_wapi(self) -> WapiError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → WapiError */
/* -------------------------------------------------------------------------- */

impl IntoWapiError for HttpError {
    fn into_wapi(self) -> WapiError {
        if self.is_timeout() {
            return WapiError::Timeout(format!("HTTP request timed out: {self}"));
        }

        if self.is_connect() {
            return WapiError::Connection(format!("HTTP connection failure: {self}"));
        }

        if let Some(status) = self.status() {
            let url = self.url().map(|u| u.to_string()).unwrap_or_default();
            return status_error(status, &url);
        }

        WapiError::Request(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_wapi())
    }
}

/// Error for a reply whose HTTP status is not a success.
pub fn status_error(status: StatusCode, url: &str) -> WapiError {
    WapiError::Request(format!(
        "HTTP {} {} from {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("unknown status"),
        url
    ))
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
