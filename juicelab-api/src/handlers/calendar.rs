use super::{calendar_error, AppState};
use actix_web::{web, HttpResponse, Result as ActixResult};
use chrono::Datelike;
use shared_types::CalendarQuery;
use tracing::info;

/// Month view; missing query parameters fall back to the current month
pub async fn month_calendar(
    state: web::Data<AppState>,
    query: web::Query<CalendarQuery>,
) -> ActixResult<HttpResponse> {
    let today = chrono::Local::now().date_naive();
    let year = query.year.unwrap_or_else(|| today.year());
    let month = query.month.unwrap_or_else(|| today.month());

    match state.generator.month_calendar(year, month) {
        Ok(calendar) => {
            info!(year, month, "Served month calendar");
            Ok(HttpResponse::Ok().json(calendar))
        }
        Err(e) => Ok(calendar_error(e)),
    }
}

pub async fn year_calendar(
    state: web::Data<AppState>,
    query: web::Query<CalendarQuery>,
) -> ActixResult<HttpResponse> {
    let year = query
        .year
        .unwrap_or_else(|| chrono::Local::now().date_naive().year());

    match state.generator.year_calendar(year) {
        Ok(calendar) => {
            info!(year, "Served annual calendar");
            Ok(HttpResponse::Ok().json(calendar))
        }
        Err(e) => Ok(calendar_error(e)),
    }
}

#[cfg(test)]
mod tests {
    use crate::handlers::{configure, AppState};
    use actix_web::{test, web, App};
    use laboratory::{ActivityGenerator, ProductionCalculator};
    use serde_json::Value;

    fn state() -> web::Data<AppState> {
        web::Data::new(AppState {
            generator: ActivityGenerator::with_defaults(),
            calculator: ProductionCalculator::default(),
            upload_dir: std::env::temp_dir(),
        })
    }

    #[actix_web::test]
    async fn test_month_calendar() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;

        let req = test::TestRequest::get()
            .uri("/api/laboratory/calendar?year=2025&month=5")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["month_name"], "MAIO");
        assert_eq!(body["days_in_month"], 31);
        assert_eq!(body["days_in_previous_month"], 30);
        assert_eq!(body["first_weekday"], 3);
        // Thursday: water analysis then the rotating check, both on shift 1
        assert_eq!(body["activities"]["1"]["1"][0], "ANÁLISE DE ÁGUA");
        assert_eq!(body["activities"]["1"]["1"][1], "SHELF LIFE 10D");
    }

    #[actix_web::test]
    async fn test_print_view_matches_month_view() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;

        let screen: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get()
                .uri("/api/laboratory/calendar?year=2024&month=2")
                .to_request(),
        )
        .await;
        let print: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get()
                .uri("/api/laboratory/calendar/print?year=2024&month=2")
                .to_request(),
        )
        .await;

        assert_eq!(screen, print);
        assert_eq!(screen["days_in_month"], 29);
    }

    #[actix_web::test]
    async fn test_invalid_month_is_bad_request() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;

        let req = test::TestRequest::get()
            .uri("/api/laboratory/calendar?year=2025&month=13")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);

        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"].as_str().unwrap().contains("month"));
    }

    #[actix_web::test]
    async fn test_annual_calendar() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;

        let req = test::TestRequest::get()
            .uri("/api/laboratory/calendar/annual?year=2025")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["year"], 2025);
        assert_eq!(body["months"].as_object().unwrap().len(), 12);
        assert_eq!(body["months"]["2"]["days_in_month"], 28);
    }
}
