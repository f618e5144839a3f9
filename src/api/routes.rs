// src/api/routes.rs
use super::handlers;
use actix_web::web;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // Audit routes
    cfg.service(
        web::scope("/audit")
            .route("", web::post().to(handlers::audit::audit_upload))
            .route("/json", web::post().to(handlers::audit::audit_json))
    );

    // Strength and generator routes
    cfg.route("/strength", web::post().to(handlers::generator::analyze_password));
    cfg.service(
        web::scope("/generator")
            .route("/password", web::get().to(handlers::generator::generate_password))
    );

    // System routes
    cfg.route("/health", web::get().to(handlers::system::health));
}
