use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};

use super::{AppState, CreateJobResponse, LookupQuery};
use crate::compiler::identifier::literal_name;
use crate::compiler::{CompiledJob, CreateJobRequest, registered_name};
use crate::error::{CompileError, RepositoryError};

fn compile_error_response(error: &CompileError) -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({
            "error": error.code(),
            "message": error.to_string(),
        })),
    )
}

fn repository_error_response(error: &RepositoryError) -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::BAD_GATEWAY,
        Json(serde_json::json!({
            "error": "repository_unavailable",
            "message": error.to_string(),
        })),
    )
}

fn compile_request(
    state: &AppState,
    request: CreateJobRequest,
) -> Result<CompiledJob, (StatusCode, Json<serde_json::Value>)> {
    request
        .into_definition()
        .and_then(|definition| state.compiler.compile(&definition))
        .map_err(|error| {
            tracing::info!(error = %error, "rejected cleanup job request");
            compile_error_response(&error)
        })
}

/// GET /health: liveness and repository backend
pub async fn handle_health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "repository": state.repository.name(),
    }))
}

/// GET /jobs: name a job would be registered under
pub async fn handle_lookup(Query(query): Query<LookupQuery>) -> impl IntoResponse {
    let names = literal_name("jobName", &query.job_name)
        .and_then(|job| literal_name("databaseName", &query.database_name).map(|db| (job, db)));

    match names {
        Ok((job, database)) => (
            StatusCode::OK,
            Json(serde_json::json!({ "registeredName": registered_name(database, job) })),
        ),
        Err(error) => compile_error_response(&error),
    }
}

/// POST /jobs/preview: compile without submitting
pub async fn handle_preview(
    State(state): State<AppState>,
    Json(request): Json<CreateJobRequest>,
) -> impl IntoResponse {
    match compile_request(&state, request) {
        Ok(compiled) => (StatusCode::OK, Json(serde_json::json!(compiled))),
        Err(response) => response,
    }
}

/// POST /jobs: compile and hand the statement to the repository once
pub async fn handle_create_job(
    State(state): State<AppState>,
    Json(request): Json<CreateJobRequest>,
) -> impl IntoResponse {
    let compiled = match compile_request(&state, request) {
        Ok(compiled) => compiled,
        Err(response) => return response,
    };

    let acknowledgement = match state.repository.submit(&compiled.query).await {
        Ok(ack) => ack,
        Err(error) => {
            tracing::error!(
                job = %compiled.registered_name,
                repository = state.repository.name(),
                "failed to submit cleanup job: {error}"
            );
            return repository_error_response(&error);
        }
    };

    tracing::info!(
        job = %compiled.registered_name,
        repository = state.repository.name(),
        acknowledgement,
        "cleanup job submitted"
    );

    let body = CreateJobResponse {
        query: compiled.query,
        registered_name: compiled.registered_name,
        adjustments: compiled.adjustments,
        acknowledgement,
    };
    (StatusCode::CREATED, Json(serde_json::json!(body)))
}
