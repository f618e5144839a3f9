// src/api/mod.rs
use actix_web::{web, App, HttpServer};
use actix_cors::Cors;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use crate::auditor::{AuditError, CredentialTester};
use crate::core::config::Config;

pub mod types;
pub mod routes;
pub mod handlers;

/// Shared by every worker of the HTTP server.
pub struct AppState {
    pub config: Config,
    pub tester: CredentialTester,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, AuditError> {
        let tester = CredentialTester::from_config(&config)?;
        Ok(Self { config, tester })
    }
}

// This will hold our API documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::handlers::audit::audit_upload,
        crate::api::handlers::audit::audit_json,
        crate::api::handlers::generator::analyze_password,
        crate::api::handlers::generator::generate_password,
        crate::api::handlers::system::health
    ),
    components(
        schemas(
            crate::api::types::AuditUploadForm,
            crate::api::types::AuditJsonRequest,
            crate::api::types::AuditResponse,
            crate::api::types::StrengthRequest,
            crate::api::types::StrengthResponse,
            crate::api::types::PasswordGenerationQuery,
            crate::api::types::PasswordGenerationResponse,
            crate::api::types::HealthResponse,
            crate::auditor::BatchSummary,
            crate::models::Credential,
            crate::models::TestResult,
            crate::models::TestStatus,
            crate::models::StrengthVerdict,
            crate::models::StrengthLabel
        )
    ),
    tags(
        (name = "Audit", description = "Credential testing against a login form"),
        (name = "Generator", description = "Password strength and generation"),
        (name = "System", description = "Service status")
    ),
    info(
        title = "Credential Auditor API",
        version = "0.1.0",
        description = "Tests credential lists against a login form and grades their passwords",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

pub async fn start_server(config: Config) -> std::io::Result<()> {
    let address = config.web_address.clone();
    let port = config.web_port;

    let state = AppState::new(config)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    let state = web::Data::new(state);

    log::info!("Starting credential auditor API on {}:{}", address, port);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST"])
            .allowed_headers(vec![
                "Content-Type",
                "Accept",
                "X-Requested-With",
            ])
            .max_age(3600);

        App::new()
            .wrap(cors)
            .app_data(state.clone())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi())
            )
            .configure(routes::configure_routes)
    })
    .bind((address.as_str(), port))?
    .run()
    .await
}
