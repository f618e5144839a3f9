// src/api/handlers/generator.rs

use actix_web::{web, HttpResponse, Responder};
use crate::api::AppState;
use crate::api::types::{
    PasswordGenerationQuery, PasswordGenerationResponse,
    StrengthRequest, StrengthResponse,
};
use crate::generators::{generate_strong_password, PasswordGenerator};
use crate::models::{PasswordGenerationOptions, StrengthLabel};
use crate::strength;

/// Generate a strong password
///
/// Draws characters uniformly from letters, digits and punctuation.
#[utoipa::path(
    get,
    path = "/generator/password",
    tag = "Generator",
    params(PasswordGenerationQuery),
    responses(
        (status = 200, description = "Generated password", body = PasswordGenerationResponse),
        (status = 400, description = "Invalid length", body = PasswordGenerationResponse)
    )
)]
pub async fn generate_password(
    state: web::Data<AppState>,
    query: web::Query<PasswordGenerationQuery>,
) -> impl Responder {
    let options = PasswordGenerationOptions {
        length: query.length.unwrap_or(state.config.suggested_password_length),
    };

    match PasswordGenerator::new().generate_password(&options) {
        Ok(password) => HttpResponse::Ok().json(PasswordGenerationResponse {
            success: true,
            password: Some(password),
            error: None,
        }),
        Err(e) => HttpResponse::BadRequest().json(PasswordGenerationResponse {
            success: false,
            password: None,
            error: Some(e.to_string()),
        }),
    }
}

/// Analyze password strength
///
/// Scores the password against the five composition checks and suggests a
/// replacement when it is weak.
#[utoipa::path(
    post,
    path = "/strength",
    tag = "Generator",
    request_body = StrengthRequest,
    responses(
        (status = 200, description = "Password analysis result", body = StrengthResponse)
    )
)]
pub async fn analyze_password(
    state: web::Data<AppState>,
    body: web::Json<StrengthRequest>,
) -> impl Responder {
    let verdict = strength::evaluate(&body.password);
    let suggested_password = (verdict.label == StrengthLabel::Weak)
        .then(|| generate_strong_password(state.config.suggested_password_length));

    HttpResponse::Ok().json(StrengthResponse {
        success: true,
        verdict,
        suggested_password,
    })
}
