use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

use crate::commands::Error;

/// Client errors become `400 Bad Request` with the error message as body, anything else a
/// generic `500 Internal Server Error`.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        if self.is_client_error() {
            warn!(error = %self, "rejected request");
            (StatusCode::BAD_REQUEST, self.to_string()).into_response()
        } else {
            error!(error = %self, "request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Something went wrong: {self}"),
            )
                .into_response()
        }
    }
}
