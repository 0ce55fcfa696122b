use std::sync::Arc;

use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestedProject {
    pub project_id: u64,
    pub language: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SubmissionRequest {
    pub id: Uuid,
    pub status: String,
    pub projects: Vec<RequestedProject>,
}

#[derive(Deserialize)]
pub struct NewSubmissionRequest {
    pub projects: Vec<RequestedProject>,
}

pub type Db = Arc<RwLock<Vec<SubmissionRequest>>>;

#[derive(Clone)]
pub struct AppState {
    token: Arc<str>,
    db: Db,
}

/// Error body returned for rejected requests.
pub struct Rejection {
    status: StatusCode,
    message: &'static str,
}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

pub fn app(token: &str) -> Router {
    let state = AppState {
        token: Arc::from(token),
        db: Arc::new(RwLock::new(Vec::new())),
    };
    let api = Router::new()
        .route("/me.json", get(reviewer_profile))
        .route("/me/certifications.json", get(list_certifications))
        .route("/me/submission_requests.json", get(list_submission_requests))
        .route(
            "/me/submissions/assigned_count.json",
            get(assigned_count),
        )
        .route("/submission_requests.json", post(create_submission_request));
    Router::new().nest("/api/v1", api).with_state(state)
}

pub async fn run(listener: TcpListener, token: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app(token)).await
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), Rejection> {
    let presented = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());
    if presented == Some(&*state.token) {
        Ok(())
    } else {
        Err(Rejection {
            status: StatusCode::UNAUTHORIZED,
            message: "unauthorized",
        })
    }
}

pub fn certifications_fixture() -> Value {
    json!([
        { "project_id": 145, "status": "certified", "project": { "name": "Build a Game App" } },
        { "project_id": 15, "status": "applied", "project": { "name": "Tournament Results" } },
        { "project_id": 14, "status": "certified", "project": { "name": "Conference Central" } }
    ])
}

pub fn reviewer_fixture() -> Value {
    json!({
        "id": 1,
        "application": { "languages": ["en-us", "zh-cn", "pt-br"] }
    })
}

async fn list_certifications(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Value>, Rejection> {
    authorize(&state, &headers)?;
    Ok(Json(certifications_fixture()))
}

async fn reviewer_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Value>, Rejection> {
    authorize(&state, &headers)?;
    Ok(Json(reviewer_fixture()))
}

async fn assigned_count(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Value>, Rejection> {
    authorize(&state, &headers)?;
    // The mock never assigns submissions.
    Ok(Json(json!({ "assigned_count": 0 })))
}

async fn list_submission_requests(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<SubmissionRequest>>, Rejection> {
    authorize(&state, &headers)?;
    let requests = state.db.read().await;
    Ok(Json(requests.clone()))
}

async fn create_submission_request(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<NewSubmissionRequest>,
) -> Result<(StatusCode, Json<SubmissionRequest>), Rejection> {
    authorize(&state, &headers)?;
    if input.projects.is_empty() {
        return Err(Rejection {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: "projects must not be empty",
        });
    }
    let request = SubmissionRequest {
        id: Uuid::new_v4(),
        status: "available".to_string(),
        projects: input.projects,
    };
    state.db.write().await.push(request.clone());
    Ok((StatusCode::CREATED, Json(request)))
}
