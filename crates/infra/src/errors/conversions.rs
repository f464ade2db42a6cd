//! Conversions from external infrastructure errors into domain errors.

use reqwest::Error as HttpError;
use shiptrack_domain::ShiptrackError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub ShiptrackError);

impl From<InfraError> for ShiptrackError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<ShiptrackError> for InfraError {
    fn from(value: ShiptrackError) -> Self {
        InfraError(value)
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → ShiptrackError */
/* -------------------------------------------------------------------------- */

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        if value.is_timeout() {
            return InfraError(ShiptrackError::Transport("HTTP request timed out".into()));
        }

        if value.is_connect() {
            return InfraError(ShiptrackError::Transport("HTTP connection failure".into()));
        }

        if let Some(status) = value.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

            return InfraError(match code {
                401 | 403 => ShiptrackError::Auth(message),
                400..=499 => ShiptrackError::InvalidInput(message),
                _ => ShiptrackError::Transport(message),
            });
        }

        InfraError(ShiptrackError::Transport(value.to_string()))
    }
}
