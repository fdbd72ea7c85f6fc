use crate::state::AppState;
use axum::Router;
use liblimno::Record;

mod sample;

#[cfg(test)]
mod tests;

pub fn router<R: Record>() -> Router<AppState<R>> {
    Router::new().merge(sample::router())
}
