use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    routing::{get, post},
    Router,
};
use chrono::{Duration, Utc};
use serde_json::Value as JsonValue;
use tower::ServiceExt;
use uuid::Uuid;

use talentscout_backend::models::application::{Application, CandidateAnalysis};
use talentscout_backend::models::form::FormSchema;
use talentscout_backend::models::job::Job;
use talentscout_backend::routes;
use talentscout_backend::services::gemini::GeminiClient;
use talentscout_backend::store::{DynStore, MemoryStore};
use talentscout_backend::AppState;

fn test_app() -> (Router, DynStore) {
    let store: DynStore = Arc::new(MemoryStore::new());
    let state = AppState::new(store.clone(), GeminiClient::disabled());
    let router = Router::new()
        .route("/api/admin/jobs", get(routes::job::list_admin_jobs))
        .route(
            "/api/admin/jobs/:id/applications",
            get(routes::application::list_candidates),
        )
        .route(
            "/api/admin/jobs/:id/analyze-all",
            post(routes::application::analyze_all),
        )
        .route(
            "/api/admin/applications/:id/analyze",
            post(routes::application::analyze_application),
        )
        .route("/api/public/config", get(routes::health::service_config))
        .with_state(state);
    (router, store)
}

fn sample_job(title: &str, minutes_ago: i64) -> Job {
    let mut job = Job::new(
        title.to_string(),
        "Engineering".to_string(),
        "Description".to_string(),
        "Requirements".to_string(),
        FormSchema::new(),
    );
    job.created_at = Utc::now() - Duration::minutes(minutes_ago);
    job
}

fn application_for(job: &Job, name: &str, score: Option<i32>) -> Application {
    Application {
        id: Uuid::new_v4(),
        job_id: job.id,
        candidate_name: name.to_string(),
        candidate_email: format!("{}@x.com", name.to_lowercase()),
        responses: HashMap::new(),
        resume_text: "resume".to_string(),
        resume_data: None,
        resume_mime_type: None,
        submitted_at: Utc::now(),
        ai_analysis: score.map(|score| CandidateAnalysis {
            score,
            reasoning: "scripted".to_string(),
            strengths: vec![],
            weaknesses: vec![],
        }),
    }
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, JsonValue) {
    let req = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn post_json(app: &Router, uri: &str) -> (StatusCode, JsonValue) {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn dashboard_lists_jobs_with_application_counts() {
    let (app, store) = test_app();
    let staffed = sample_job("Backend Engineer", 60);
    let empty = sample_job("Designer", 5);
    store.save_job(&staffed).await.unwrap();
    store.save_job(&empty).await.unwrap();
    store
        .save_application(&application_for(&staffed, "Alice", None))
        .await
        .unwrap();
    store
        .save_application(&application_for(&staffed, "Bob", Some(64)))
        .await
        .unwrap();

    let (status, body) = get_json(&app, "/api/admin/jobs").await;
    assert_eq!(status, StatusCode::OK);

    // Newest job first, each row carrying its candidate count.
    assert_eq!(body[0]["title"], "Designer");
    assert_eq!(body[0]["application_count"], 0);
    assert_eq!(body[1]["title"], "Backend Engineer");
    assert_eq!(body[1]["application_count"], 2);
}

#[tokio::test]
async fn candidates_are_listed_best_score_first() {
    let (app, store) = test_app();
    let job = sample_job("Backend Engineer", 10);
    store.save_job(&job).await.unwrap();
    store
        .save_application(&application_for(&job, "Low", Some(35)))
        .await
        .unwrap();
    store
        .save_application(&application_for(&job, "Unscored", None))
        .await
        .unwrap();
    store
        .save_application(&application_for(&job, "High", Some(91)))
        .await
        .unwrap();

    let (status, body) = get_json(
        &app,
        &format!("/api/admin/jobs/{}/applications", job.id),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["candidate_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["High", "Low", "Unscored"]);
}

#[tokio::test]
async fn listing_candidates_for_an_unknown_job_is_not_found() {
    let (app, _store) = test_app();
    let (status, _) = get_json(
        &app,
        &format!("/api/admin/jobs/{}/applications", Uuid::new_v4()),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn analyze_all_with_ai_disabled_persists_sentinel_results() {
    let (app, store) = test_app();
    let job = sample_job("Backend Engineer", 10);
    store.save_job(&job).await.unwrap();
    store
        .save_application(&application_for(&job, "Alice", None))
        .await
        .unwrap();
    store
        .save_application(&application_for(&job, "Bob", Some(70)))
        .await
        .unwrap();

    let (status, body) = post_json(&app, &format!("/api/admin/jobs/{}/analyze-all", job.id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["analyzed"], 1);
    assert_eq!(body["skipped"], 1);

    // The failed assessment landed as a zero-score sentinel, not an error.
    let stored = store.get_applications(job.id).await.unwrap();
    let alice = stored
        .iter()
        .find(|a| a.candidate_name == "Alice")
        .unwrap();
    let analysis = alice.ai_analysis.as_ref().unwrap();
    assert_eq!(analysis.score, 0);
    assert!(!analysis.reasoning.is_empty());
}

#[tokio::test]
async fn analyze_one_returns_the_updated_application() {
    let (app, store) = test_app();
    let job = sample_job("Backend Engineer", 10);
    store.save_job(&job).await.unwrap();
    let application = application_for(&job, "Alice", None);
    store.save_application(&application).await.unwrap();

    let (status, body) = post_json(
        &app,
        &format!("/api/admin/applications/{}/analyze", application.id),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ai_analysis"]["score"], 0);
    assert_eq!(body["candidate_name"], "Alice");
}

#[tokio::test]
async fn service_config_reports_ai_disabled() {
    let (app, _store) = test_app();
    let (status, body) = get_json(&app, "/api/public/config").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ai_enabled"], false);
}
