//! Request extractors that report failures through [Error]
use crate::error::Error;
use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
};
use liblimno::Record;

/// Like [Path], but a segment that can't be parsed is turned into an [Error]
/// so that the client gets a json error body.
#[derive(FromRequestParts)]
#[from_request(via(Path), rejection(Error))]
pub(crate) struct ApiPath<T>(pub(crate) T);

/// A sample decoded from the request body.
///
/// The body is always treated as json; the `Content-Type` header is not
/// checked.
pub(crate) struct JsonBody<R>(pub(crate) R);

impl<S, R> FromRequest<S> for JsonBody<R>
where
    S: Send + Sync,
    R: Record,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await?;
        Ok(Self(R::from_json(&bytes)?))
    }
}
