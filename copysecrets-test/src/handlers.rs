//! HTTP handlers for the emulated Secrets Manager API

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::Response,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::storage::{Operation, SecretsStorage};

/// Handle requests based on the X-Amz-Target header
pub async fn handle_request(
    State(storage): State<Arc<SecretsStorage>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let target = headers
        .get("x-amz-target")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    debug!(target = %target, "Secrets Manager request");

    let Some(operation) = Operation::from_target(target) else {
        warn!(target = %target, "Unknown Secrets Manager operation");
        return error_response(
            StatusCode::BAD_REQUEST,
            "UnknownOperationException",
            &format!("Unknown operation: {}", target),
        );
    };

    storage.record_call(operation);

    if let Some(fault) = storage.fault_for(operation) {
        debug!(?operation, code = %fault.code, "Returning injected fault");
        return error_response(status_for(&fault.code), &fault.code, &fault.message);
    }

    match operation {
        Operation::GetSecretValue => handle_get_secret_value(&storage, &body),
        Operation::CreateSecret => handle_create_secret(&storage, &body),
    }
}

// === Request/Response types ===

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CreateSecretRequest {
    name: String,
    secret_string: Option<String>,
    secret_binary: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct CreateSecretResponse {
    #[serde(rename = "ARN")]
    arn: String,
    name: String,
    version_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct GetSecretValueRequest {
    secret_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct GetSecretValueResponse {
    #[serde(rename = "ARN")]
    arn: String,
    name: String,
    version_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    secret_string: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    secret_binary: Option<String>,
    version_stages: Vec<String>,
    created_date: f64,
}

// === Handlers ===

fn handle_create_secret(storage: &SecretsStorage, body: &[u8]) -> Response {
    let req: CreateSecretRequest = match serde_json::from_slice(body) {
        Ok(r) => r,
        Err(e) => {
            return error_response(
                StatusCode::BAD_REQUEST,
                "InvalidRequestException",
                &e.to_string(),
            )
        }
    };

    match storage.create_secret(&req.name, req.secret_string, req.secret_binary) {
        Ok(secret) => json_response(
            StatusCode::OK,
            &CreateSecretResponse {
                arn: secret.arn,
                name: secret.name,
                version_id: secret.version_id,
            },
        ),
        Err(e) => error_response(StatusCode::BAD_REQUEST, e.code(), &e.to_string()),
    }
}

fn handle_get_secret_value(storage: &SecretsStorage, body: &[u8]) -> Response {
    let req: GetSecretValueRequest = match serde_json::from_slice(body) {
        Ok(r) => r,
        Err(e) => {
            return error_response(
                StatusCode::BAD_REQUEST,
                "InvalidRequestException",
                &e.to_string(),
            )
        }
    };

    match storage.get_secret_value(&req.secret_id) {
        Ok(secret) => json_response(
            StatusCode::OK,
            &GetSecretValueResponse {
                arn: secret.arn,
                name: secret.name,
                version_id: secret.version_id,
                secret_string: secret.secret_string,
                secret_binary: secret.secret_binary,
                version_stages: vec!["AWSCURRENT".to_string()],
                created_date: secret.created_date.timestamp() as f64,
            },
        ),
        Err(e) => error_response(StatusCode::BAD_REQUEST, e.code(), &e.to_string()),
    }
}

// === Helpers ===

fn status_for(code: &str) -> StatusCode {
    match code {
        "InternalServiceError" => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::BAD_REQUEST,
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    match serde_json::to_string(body) {
        Ok(json) => build_response(status, json),
        Err(e) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "InternalServiceError",
            &e.to_string(),
        ),
    }
}

fn error_response(status: StatusCode, error_type: &str, message: &str) -> Response {
    let body = serde_json::json!({
        "__type": error_type,
        "message": message
    });
    build_response(status, body.to_string())
}

fn build_response(status: StatusCode, body: String) -> Response {
    let mut response = Response::new(Body::from(body));
    *response.status_mut() = status;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static("application/x-amz-json-1.1"),
    );
    response
}
