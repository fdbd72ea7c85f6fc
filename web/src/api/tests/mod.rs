use crate::test_app;
use anyhow::Result;
use axum::{
    Router,
    body::Body,
    http::{Request, Response, StatusCode, header::CONTENT_TYPE},
};
use http_body_util::BodyExt;
use serde_json::Value;
use test_log::test;
use tower::Service;


/// Sends a request to the app, with `body` as a json document if given
async fn send(
    app: &mut Router,
    method: &str,
    uri: &str,
    body: Option<&str>,
) -> Result<Response<Body>> {
    let builder = Request::builder().uri(uri).method(method);
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))?,
        None => builder.body(Body::empty())?,
    };
    Ok(app.as_service().call(request).await?)
}

async fn json_body(response: Response<Body>) -> Result<Value> {
    let bytes = response.into_body().collect().await?.to_bytes();
    Ok(serde_json::from_slice(&bytes)?)
}

/// Fetches the full sample list through the api
async fn list(app: &mut Router) -> Result<Value> {
    let response = send(app, "GET", "/api/samples", None).await?;
    assert_eq!(response.status(), StatusCode::OK);
    json_body(response).await
}

#[test(tokio::test)]
async fn test_unknown_api_route() {
    let (mut app, _state) = test_app::<liblimno::sample::MinimalSample>();
    let response = send(&mut app, "GET", "/api/no-such-thing", None)
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[test(tokio::test)]
async fn test_request_id_is_propagated() {
    let (mut app, _state) = test_app::<liblimno::sample::MinimalSample>();
    let response = send(&mut app, "GET", "/api/samples", None)
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
}
