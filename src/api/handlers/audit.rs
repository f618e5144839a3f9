// src/api/handlers/audit.rs

use actix_web::{web, HttpResponse, Responder};
use actix_multipart::Multipart;
use futures::StreamExt;
use std::collections::HashMap;
use log::{info, warn, error};
use crate::api::AppState;
use crate::api::types::{AuditJsonRequest, AuditResponse, AuditUploadForm};
use crate::auditor::{AuditError, BatchSummary, CancelSignal};
use crate::models::{AuditRequest, TestResult};

const MISSING_PARAMETERS: &str = "Missing URL, username field, or password field";

/// Audit credentials from an uploaded CSV
///
/// Submits every row of the uploaded table to the target login form and
/// reports per-credential outcome and password strength.
#[utoipa::path(
    post,
    path = "/audit",
    tag = "Audit",
    request_body(content = AuditUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Audit results", body = AuditResponse),
        (status = 400, description = "Invalid upload or parameters", body = AuditResponse),
        (status = 413, description = "Upload too large", body = AuditResponse),
        (status = 500, description = "Internal server error", body = AuditResponse)
    )
)]
pub async fn audit_upload(
    state: web::Data<AppState>,
    mut payload: Multipart,
) -> impl Responder {
    let limit = state.config.max_upload_bytes;
    let mut received = 0usize;
    let mut file: Option<(String, Vec<u8>)> = None;
    let mut params: HashMap<String, String> = HashMap::new();

    // Process the multipart form
    while let Some(item) = payload.next().await {
        let mut field = match item {
            Ok(field) => field,
            Err(e) => {
                warn!("Invalid multipart payload: {}", e);
                return HttpResponse::BadRequest()
                    .json(AuditResponse::failure(format!("Invalid multipart payload: {}", e)));
            }
        };

        let content_disposition = field.content_disposition();
        let name = content_disposition.get_name().map(str::to_owned);
        let filename = content_disposition.get_filename().map(str::to_owned);

        let mut data = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = match chunk {
                Ok(chunk) => chunk,
                Err(e) => {
                    error!("Failed to read upload chunk: {}", e);
                    return HttpResponse::BadRequest()
                        .json(AuditResponse::failure(format!("Failed to read upload: {}", e)));
                }
            };

            received += chunk.len();
            if received > limit {
                return HttpResponse::PayloadTooLarge()
                    .json(AuditResponse::failure(format!("Upload exceeds {} bytes", limit)));
            }
            data.extend_from_slice(&chunk);
        }

        match name.as_deref() {
            Some("file") => file = Some((filename.unwrap_or_default(), data)),
            Some(other) => {
                params.insert(other.to_string(), String::from_utf8_lossy(&data).into_owned());
            }
            None => continue,
        }
    }

    let (filename, table) = match file {
        Some(file) => file,
        None => {
            return HttpResponse::BadRequest()
                .json(AuditResponse::failure("No file part in the request"));
        }
    };

    if filename.is_empty() {
        return HttpResponse::BadRequest().json(AuditResponse::failure("No selected file"));
    }

    let request = match required_params(&params) {
        Some(request) => request,
        None => return HttpResponse::BadRequest().json(AuditResponse::failure(MISSING_PARAMETERS)),
    };

    info!("Audit of '{}' against {} requested", filename, request.url);

    let outcome = state.tester
        .audit_table(&request, table.as_slice(), CancelSignal::never())
        .await;

    respond(outcome)
}

/// Audit credentials supplied as JSON
#[utoipa::path(
    post,
    path = "/audit/json",
    tag = "Audit",
    request_body = AuditJsonRequest,
    responses(
        (status = 200, description = "Audit results", body = AuditResponse),
        (status = 400, description = "Invalid parameters", body = AuditResponse),
        (status = 500, description = "Internal server error", body = AuditResponse)
    )
)]
pub async fn audit_json(
    state: web::Data<AppState>,
    body: web::Json<AuditJsonRequest>,
) -> impl Responder {
    let body = body.into_inner();
    let request = AuditRequest::new(body.url, body.username_field, body.password_field);

    let outcome = state.tester.test(&request, body.credentials).await;

    respond(outcome)
}

fn required_params(params: &HashMap<String, String>) -> Option<AuditRequest> {
    let get = |key: &str| params.get(key).filter(|v| !v.trim().is_empty()).cloned();

    Some(AuditRequest::new(
        get("url")?,
        get("username_field")?,
        get("password_field")?,
    ))
}

fn respond(outcome: Result<Vec<TestResult>, AuditError>) -> HttpResponse {
    match outcome {
        Ok(results) => HttpResponse::Ok().json(AuditResponse {
            success: true,
            summary: Some(BatchSummary::from_results(&results)),
            results,
            error: None,
        }),
        Err(AuditError::Client(e)) => {
            error!("HTTP client failure: {}", e);
            HttpResponse::InternalServerError()
                .json(AuditResponse::failure(format!("HTTP client failure: {}", e)))
        }
        Err(e) => {
            warn!("Audit rejected: {}", e);
            HttpResponse::BadRequest().json(AuditResponse::failure(e.to_string()))
        }
    }
}
