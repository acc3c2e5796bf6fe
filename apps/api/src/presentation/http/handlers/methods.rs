//! Named-method RPC endpoint.
//!
//! Callers POST a JSON array of positional arguments to
//! `/api/v1/methods/{name}`; the payload variant is decided here, once,
//! before the use case runs.

use crate::{
    application::{
        sign_file::{dto::SignFileRequest, use_case::SignFileUseCase},
        upload_file::{dto::UploadFileRequest, use_case::UploadFileUseCase},
    },
    domain::storage::value_objects::FilePayload,
    presentation::http::{errors::AppError, state::AppState},
};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;

pub const SIGN_FILE: &str = "googleStorage.signFile";
pub const UPLOAD_FILE: &str = "googleStorage.uploadFile";

pub async fn call_method(
    State(state): State<AppState>,
    Path(method): Path<String>,
    args: Result<Json<Vec<Value>>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(args) = args.map_err(rejection_error)?;

    match method.as_str() {
        SIGN_FILE => sign_file(state, &args).await,
        UPLOAD_FILE => upload_file(state, &args).await,
        other => Err(AppError::NotFound(format!("Method '{}' not found", other))),
    }
}

async fn sign_file(state: AppState, args: &[Value]) -> Result<Response, AppError> {
    let file_reference = required_string(args, 0, "fileReference")?;

    let result = SignFileUseCase::new(state.storage.clone(), state.bucket_name().to_string())
        .execute(SignFileRequest { file_reference })
        .await?;

    Ok(Json(result).into_response())
}

async fn upload_file(state: AppState, args: &[Value]) -> Result<Response, AppError> {
    let file_data = required_string(args, 0, "fileData")?;
    let file_name = required_string(args, 1, "fileName")?;
    let content_type = optional_string(args, 2, "contentType")?;

    let payload = FilePayload::parse(&file_data)?;

    let result = UploadFileUseCase::new(state.storage.clone(), state.bucket_name().to_string())
        .execute(UploadFileRequest {
            payload,
            file_name,
            content_type,
        })
        .await?;

    Ok(Json(result).into_response())
}

fn rejection_error(rejection: JsonRejection) -> AppError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::PayloadTooLarge(
            "Request body exceeds the upload size limit".to_string(),
        );
    }
    AppError::BadRequest(format!(
        "Arguments must be a JSON array: {}",
        rejection.body_text()
    ))
}

fn required_string(args: &[Value], index: usize, name: &str) -> Result<String, AppError> {
    match args.get(index) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(AppError::BadRequest(format!("{} must be a string", name))),
        None => Err(AppError::BadRequest(format!("Missing argument {}", name))),
    }
}

fn optional_string(args: &[Value], index: usize, name: &str) -> Result<Option<String>, AppError> {
    match args.get(index) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(AppError::BadRequest(format!("{} must be a string", name))),
    }
}
