//! Integration tests for store failures surfacing as the fixed 500 response.

mod common;

use axum::http::{Method, StatusCode};
use common::call;
use serde_json::json;

const ID: &str = "573a1390f29313caabcd4135";

#[tokio::test]
async fn every_route_maps_store_failure_to_500() {
    let movie = format!("/api/movie/{ID}");
    let comment = format!("/api/movie/comment/{ID}");
    let comments = format!("/api/movie/comments?movie_id={ID}");

    let cases = [
        (Method::GET, "/api/movies".to_string(), None),
        (Method::POST, "/api/movies".to_string(), Some(json!({ "title": "Heat" }))),
        (Method::GET, movie.clone(), None),
        (Method::PUT, movie.clone(), Some(json!({ "title": "Heat" }))),
        (Method::DELETE, movie, None),
        (Method::GET, comments, None),
        (
            Method::POST,
            "/api/movie/comments".to_string(),
            Some(json!({ "text": "hi", "movie_id": ID })),
        ),
        (Method::GET, comment.clone(), None),
        (Method::PUT, comment.clone(), Some(json!({ "text": "hi" }))),
        (Method::DELETE, comment, None),
    ];

    for (method, uri, body) in cases {
        let (status, json) = call(common::failing_app(), method.clone(), &uri, body).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{method} {uri}");
        assert_eq!(
            json,
            json!({ "status": 500, "message": "Erreur interne au niveau du serveur." }),
            "{method} {uri}"
        );
    }
}

#[tokio::test]
async fn validation_runs_before_the_store() {
    // A failing store must not turn client errors into 500s
    let (status, json) = call(common::failing_app(), Method::GET, "/api/movie/bogus", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Identifiant invalide.");

    let app = common::failing_app();
    let (status, json) = call(app, Method::GET, "/api/movie/comments", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "ID du film requis");

    let app = common::failing_app();
    let (status, _) = call(app, Method::POST, "/api/movies", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn internal_errors_do_not_leak_details() {
    let (_, json) = call(common::failing_app(), Method::GET, "/api/movies", None).await;

    let body = json.to_string();
    assert!(!body.contains("connection refused"));
}
