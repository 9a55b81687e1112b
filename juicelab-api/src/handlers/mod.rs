pub mod calculations;
pub mod calendar;
pub mod documents;

use actix_web::{web, HttpResponse};
use laboratory::{ActivityGenerator, ProductionCalculator};
use shared_types::{CalculationError, CalendarError, ErrorResponse};
use std::path::PathBuf;

/// Read-only state shared by every worker
#[derive(Debug, Clone)]
pub struct AppState {
    pub generator: ActivityGenerator,
    pub calculator: ProductionCalculator,
    pub upload_dir: PathBuf,
}

pub(crate) fn error_json(
    mut builder: actix_web::HttpResponseBuilder,
    message: impl Into<String>,
) -> HttpResponse {
    builder.json(ErrorResponse {
        error: message.into(),
    })
}

pub(crate) fn calendar_error(error: CalendarError) -> HttpResponse {
    error_json(HttpResponse::BadRequest(), error.to_string())
}

pub(crate) fn calculation_error(error: CalculationError) -> HttpResponse {
    error_json(HttpResponse::BadRequest(), error.to_string())
}

/// Register every API route
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/api/laboratory/calendar",
        web::get().to(calendar::month_calendar),
    )
    .route(
        "/api/laboratory/calendar/print",
        web::get().to(calendar::month_calendar),
    )
    .route(
        "/api/laboratory/calendar/annual",
        web::get().to(calendar::year_calendar),
    )
    .route(
        "/api/laboratory/calendar/annual/print",
        web::get().to(calendar::year_calendar),
    )
    .route("/api/documents/inspect", web::post().to(documents::inspect_document))
    .route("/api/calculations/factors", web::get().to(calculations::get_factors))
    .route("/api/calculations/ratio", web::post().to(calculations::ratio))
    .route("/api/calculations/acidity", web::post().to(calculations::acidity))
    .route(
        "/api/calculations/acid-titration",
        web::post().to(calculations::acid_titration),
    )
    .route("/api/calculations/density", web::post().to(calculations::density))
    .route(
        "/api/calculations/production-liters",
        web::post().to(calculations::production_liters),
    )
    .route("/api/calculations/net-weight", web::post().to(calculations::net_weight))
    .route(
        "/api/calculations/tank-finalization",
        web::post().to(calculations::tank_finalization),
    )
    .route("/api/calculations/blend", web::post().to(calculations::blend))
    .route(
        "/api/calculations/brix-correction",
        web::post().to(calculations::brix_correction),
    )
    .route("/api/calculations/sugar", web::post().to(calculations::sugar))
    .route("/api/calculations/soda", web::post().to(calculations::soda))
    .route("/api/calculations/base-loss", web::post().to(calculations::base_loss));
}
