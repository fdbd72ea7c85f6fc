use crate::{
    extract::{ApiPath, JsonBody},
    state::AppState,
};
use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, put},
};
use liblimno::Record;
use tracing::debug;

pub fn router<R: Record>() -> Router<AppState<R>> {
    Router::new()
        .route("/samples", get(list_samples::<R>).post(new_sample::<R>))
        .route(
            "/samples/{id}",
            put(modify_sample::<R>).delete(delete_sample::<R>),
        )
}

async fn list_samples<R: Record>(State(state): State<AppState<R>>) -> Json<Vec<R>> {
    Json(state.store.list().await)
}

async fn new_sample<R: Record>(
    State(state): State<AppState<R>>,
    JsonBody(sample): JsonBody<R>,
) -> Json<R> {
    let sample = state.store.create(sample).await;
    debug!(id = sample.id(), "Added sample");
    Json(sample)
}

// Unknown ids are not an error, the client gets 204 either way
async fn modify_sample<R: Record>(
    State(state): State<AppState<R>>,
    ApiPath(id): ApiPath<i64>,
    JsonBody(sample): JsonBody<R>,
) -> StatusCode {
    if !state.store.update(id, sample).await {
        debug!(id, "No sample to modify");
    }
    StatusCode::NO_CONTENT
}

async fn delete_sample<R: Record>(
    State(state): State<AppState<R>>,
    ApiPath(id): ApiPath<i64>,
) -> StatusCode {
    match state.store.delete(id).await {
        Some(_) => debug!(id, "Deleted sample"),
        None => debug!(id, "No sample to delete"),
    }
    StatusCode::NO_CONTENT
}
