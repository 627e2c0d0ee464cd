use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use models::Place;
use serde_json::{json, Value};
use server::{routes, state::ServerState};
use service::{catalog::PlaceRegistry, storage::JsonListCodec};
use tower::ServiceExt;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

fn tmp_file() -> PathBuf {
    std::env::temp_dir().join(format!("places_api_{}.json", Uuid::new_v4()))
}

async fn app_with(places: Vec<Place>) -> anyhow::Result<(Router, PathBuf)> {
    let path = tmp_file();
    if !places.is_empty() {
        JsonListCodec::<Place>::new(&path).save(&places).await?;
    }
    let app = server::startup::build_app(&path).await?;
    Ok((app, path))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<String>) -> anyhow::Result<(StatusCode, Value)> {
    let req = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(b) => req.header(CONTENT_TYPE, "application/json").body(Body::from(b))?,
        None => req.body(Body::empty())?,
    };
    let res = app.clone().oneshot(req).await?;
    let status = res.status();
    let bytes = res.into_body().collect().await?.to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    Ok((status, value))
}

async fn list(app: &Router) -> anyhow::Result<Vec<Place>> {
    let (status, body) = send(app, Method::GET, "/places", None).await?;
    assert_eq!(status, StatusCode::OK);
    Ok(serde_json::from_value(body)?)
}

fn cafe() -> Place {
    Place::new("Cafe", "nice", "food")
}

fn park() -> Place {
    Place::new("Park", "trees", "outdoors").with_review("lots of shade", 4)
}

#[tokio::test]
async fn root_serves_welcome_text() -> anyhow::Result<()> {
    let (app, _) = app_with(vec![]).await?;
    let (status, body) = send(&app, Method::GET, "/", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String(routes::WELCOME.to_string()));

    let (status, body) = send(&app, Method::GET, "/health", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn create_then_list_on_empty_registry() -> anyhow::Result<()> {
    let (app, path) = app_with(vec![]).await?;
    let body = json!({"name": "Cafe", "description": "nice", "category": "food", "reviews": []});
    let (status, res) = send(&app, Method::POST, "/places", Some(body.to_string())).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(res["id"], 0);
    assert!(res["message"].is_string());

    let (_, listed) = send(&app, Method::GET, "/places", None).await?;
    assert_eq!(listed, json!([body]));

    let _ = tokio::fs::remove_file(&path).await;
    Ok(())
}

#[tokio::test]
async fn duplicate_name_is_conflict() -> anyhow::Result<()> {
    let (app, path) = app_with(vec![cafe(), park()]).await?;
    let body = json!({"name": "Cafe", "description": "again", "category": "bar", "reviews": []});
    let (status, res) = send(&app, Method::POST, "/places", Some(body.to_string())).await?;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(res["error"].is_string());
    assert_eq!(list(&app).await?, vec![cafe(), park()]);
    let _ = tokio::fs::remove_file(&path).await;
    Ok(())
}

#[tokio::test]
async fn null_fields_in_create_body_are_zero_values() -> anyhow::Result<()> {
    let (app, path) = app_with(vec![]).await?;
    let body = json!({"name": "Cafe", "description": null, "category": null, "reviews": null});
    let (status, res) = send(&app, Method::POST, "/places", Some(body.to_string())).await?;
    assert_eq!(status, StatusCode::OK, "body {res}");
    assert_eq!(list(&app).await?, vec![Place::new("Cafe", "", "")]);
    let _ = tokio::fs::remove_file(&path).await;
    Ok(())
}

#[tokio::test]
async fn undecodable_body_is_bad_request() -> anyhow::Result<()> {
    let (app, path) = app_with(vec![cafe()]).await?;
    for bad in ["{not json", r#"{"description": "no name"}"#, r#"{"name": "X", "reviews": 3}"#] {
        let (status, _) = send(&app, Method::POST, "/places", Some(bad.to_string())).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {bad:?}");
    }
    assert_eq!(list(&app).await?.len(), 1);
    let _ = tokio::fs::remove_file(&path).await;
    Ok(())
}

#[tokio::test]
async fn update_description_changes_one_place() -> anyhow::Result<()> {
    let (app, path) = app_with(vec![cafe(), park()]).await?;
    let (status, res) = send(&app, Method::PUT, "/places/1?description=green%20space", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(res["message"].is_string());

    let places = list(&app).await?;
    assert_eq!(places[1].description, "green space");
    assert_eq!(places[1].reviews, park().reviews);
    assert_eq!(places[0], cafe());
    let _ = tokio::fs::remove_file(&path).await;
    Ok(())
}

#[tokio::test]
async fn update_validates_id_and_description() -> anyhow::Result<()> {
    let (app, path) = app_with(vec![cafe()]).await?;

    let (status, _) = send(&app, Method::PUT, "/places/0", None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = send(&app, Method::PUT, "/places/0?description=", None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = send(&app, Method::PUT, "/places/abc?description=x", None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = send(&app, Method::PUT, "/places/3?description=x", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, Method::PUT, "/places/-1?description=x", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    assert_eq!(list(&app).await?, vec![cafe()]);
    let _ = tokio::fs::remove_file(&path).await;
    Ok(())
}

#[tokio::test]
async fn delete_first_shifts_the_rest() -> anyhow::Result<()> {
    let (app, path) = app_with(vec![cafe(), park()]).await?;
    let (status, _) = send(&app, Method::DELETE, "/places/0", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list(&app).await?, vec![park()]);

    let (status, body) = send(&app, Method::GET, "/places/0", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Park");
    let _ = tokio::fs::remove_file(&path).await;
    Ok(())
}

#[tokio::test]
async fn delete_unknown_id_is_not_found() -> anyhow::Result<()> {
    let (app, path) = app_with(vec![cafe()]).await?;
    let (status, res) = send(&app, Method::DELETE, "/places/5", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(res["error"].is_string());
    let (status, _) = send(&app, Method::DELETE, "/places/x1", None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(list(&app).await?, vec![cafe()]);
    let _ = tokio::fs::remove_file(&path).await;
    Ok(())
}

#[tokio::test]
async fn multi_digit_ids_address_the_right_place() -> anyhow::Result<()> {
    let seed: Vec<Place> = (0..13).map(|i| Place::new(format!("place-{i}"), "", "misc")).collect();
    let (app, path) = app_with(seed).await?;

    let (status, body) = send(&app, Method::GET, "/places/12", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "place-12");

    let (status, _) = send(&app, Method::PUT, "/places/12?description=last", None).await?;
    assert_eq!(status, StatusCode::OK);
    let places = list(&app).await?;
    assert_eq!(places[12].description, "last");
    assert_eq!(places[1].description, "");

    let (status, _) = send(&app, Method::DELETE, "/places/12", None).await?;
    assert_eq!(status, StatusCode::OK);
    let places = list(&app).await?;
    assert_eq!(places.len(), 12);
    assert!(places.iter().all(|p| p.name != "place-12"));
    assert_eq!(places[1].name, "place-1");

    let _ = tokio::fs::remove_file(&path).await;
    Ok(())
}

#[tokio::test]
async fn storage_failure_reports_500_and_keeps_state() -> anyhow::Result<()> {
    let blocker = tmp_file();
    tokio::fs::write(&blocker, b"file where a directory should be").await?;
    let codec = JsonListCodec::<Place>::new(blocker.join("places.json"));
    let registry = Arc::new(PlaceRegistry::from_parts(codec, vec![cafe()]));
    let app = routes::build_router(ServerState::new(registry), CorsLayer::very_permissive());

    let body = json!({"name": "Park"}).to_string();
    let (status, res) = send(&app, Method::POST, "/places", Some(body)).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(res["error"].is_string());

    let (status, _) = send(&app, Method::DELETE, "/places/0", None).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(list(&app).await?, vec![cafe()]);

    let _ = tokio::fs::remove_file(&blocker).await;
    Ok(())
}
