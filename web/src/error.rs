use axum::{
    Json,
    extract::rejection::{BytesRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::warn;

#[derive(thiserror::Error, Debug)]
pub(crate) enum Error {
    #[error(transparent)]
    Liblimno(#[from] liblimno::Error),
    #[error("The request body could not be read: {0}")]
    BodyRejection(#[from] BytesRejection),
    #[error("The sample id in the path is not valid: {0}")]
    InvalidId(#[from] PathRejection),
}

impl Error {
    pub(crate) fn to_client_status(&self) -> (StatusCode, String) {
        match self {
            Error::Liblimno(liblimno::Error::InvalidPayload(e)) => {
                (StatusCode::BAD_REQUEST, format!("Invalid sample: {e}"))
            }
            Error::BodyRejection(rejection) => (rejection.status(), rejection.body_text()),
            Error::InvalidId(rejection) => (StatusCode::BAD_REQUEST, rejection.body_text()),
        }
    }
}

// Tell axum how to convert `Error` into a response.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        warn!("Got error for response: {self:?}");
        let (status, message) = self.to_client_status();
        (status, Json(json!({ "error": message }))).into_response()
    }
}
