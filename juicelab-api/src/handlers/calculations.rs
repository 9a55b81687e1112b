use super::{calculation_error, AppState};
use actix_web::{web, HttpResponse, Result as ActixResult};
use laboratory::calculations as calc;
use serde::Serialize;
use shared_types::{
    AcidTitrationRequest, AcidityRequest, BaseLossRequest, BlendRequest, BrixCorrectionRequest, CalculationError,
    DensityRequest, NetWeightRequest, ProductionLitersRequest, RatioRequest, SodaDosingRequest,
    SugarDosingRequest, TankFinalizationRequest,
};
use tracing::debug;

fn respond<T: Serialize>(
    name: &str,
    result: Result<T, CalculationError>,
) -> ActixResult<HttpResponse> {
    match result {
        Ok(value) => {
            debug!(calculation = name, "Calculation succeeded");
            Ok(HttpResponse::Ok().json(value))
        }
        Err(e) => {
            debug!(calculation = name, error = %e, "Calculation rejected");
            Ok(calculation_error(e))
        }
    }
}

pub async fn get_factors(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(state.calculator.factors()))
}

pub async fn ratio(request: web::Json<RatioRequest>) -> ActixResult<HttpResponse> {
    respond("ratio", calc::ratio(request.brix, request.acidity))
}

pub async fn acidity(request: web::Json<AcidityRequest>) -> ActixResult<HttpResponse> {
    respond(
        "acidity",
        calc::titratable_acidity(
            request.sample_volume,
            request.titration_factor,
            request.naoh_volume,
        ),
    )
}

pub async fn acid_titration(
    state: web::Data<AppState>,
    request: web::Json<AcidTitrationRequest>,
) -> ActixResult<HttpResponse> {
    respond("acid-titration", state.calculator.acid_titration(&request))
}

pub async fn density(request: web::Json<DensityRequest>) -> ActixResult<HttpResponse> {
    respond("density", calc::density(request.mass, request.volume))
}

pub async fn production_liters(
    request: web::Json<ProductionLitersRequest>,
) -> ActixResult<HttpResponse> {
    respond(
        "production-liters",
        calc::production_liters(request.total_weight, request.density),
    )
}

pub async fn net_weight(
    state: web::Data<AppState>,
    request: web::Json<NetWeightRequest>,
) -> ActixResult<HttpResponse> {
    respond("net-weight", state.calculator.net_weight_check(&request))
}

pub async fn tank_finalization(
    request: web::Json<TankFinalizationRequest>,
) -> ActixResult<HttpResponse> {
    respond("tank-finalization", calc::tank_finalization(&request))
}

pub async fn blend(request: web::Json<BlendRequest>) -> ActixResult<HttpResponse> {
    respond("blend", calc::blend_forecast(&request.parts))
}

pub async fn brix_correction(
    state: web::Data<AppState>,
    request: web::Json<BrixCorrectionRequest>,
) -> ActixResult<HttpResponse> {
    respond(
        "brix-correction",
        calc::brix_temperature_correction(
            request.measured_brix,
            request.temperature,
            state.calculator.factors().brix.reference_temperature,
        ),
    )
}

pub async fn sugar(request: web::Json<SugarDosingRequest>) -> ActixResult<HttpResponse> {
    respond(
        "sugar",
        calc::sugar_to_add(
            request.current_brix,
            request.target_brix,
            request.volume,
            request.density,
        ),
    )
}

pub async fn soda(request: web::Json<SodaDosingRequest>) -> ActixResult<HttpResponse> {
    respond(
        "soda",
        calc::soda_dosage(
            request.volume,
            request.current_acidity,
            request.soda_concentration,
        ),
    )
}

pub async fn base_loss(request: web::Json<BaseLossRequest>) -> ActixResult<HttpResponse> {
    respond(
        "base-loss",
        calc::base_loss_percent(request.initial_volume, request.final_volume),
    )
}

#[cfg(test)]
mod tests {
    use crate::handlers::{configure, AppState};
    use actix_web::{test, web, App};
    use laboratory::{ActivityGenerator, ProductionCalculator};
    use serde_json::{json, Value};

    fn state() -> web::Data<AppState> {
        web::Data::new(AppState {
            generator: ActivityGenerator::with_defaults(),
            calculator: ProductionCalculator::default(),
            upload_dir: std::env::temp_dir(),
        })
    }

    async fn post(uri: &str, payload: Value) -> (u16, Value) {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = test::TestRequest::post()
            .uri(uri)
            .set_json(payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        let status = resp.status().as_u16();
        (status, test::read_body_json(resp).await)
    }

    #[actix_web::test]
    async fn test_ratio() {
        let (status, body) = post(
            "/api/calculations/ratio",
            json!({ "brix": 12.5, "acidity": 0.5 }),
        )
        .await;
        assert_eq!(status, 200);
        assert_eq!(body["ratio"], 25.0);
        assert_eq!(body["classification"], "sweet");
    }

    #[actix_web::test]
    async fn test_invalid_input_is_bad_request() {
        let (status, body) = post(
            "/api/calculations/density",
            json!({ "mass": 10.0, "volume": 0.0 }),
        )
        .await;
        assert_eq!(status, 400);
        assert!(body["error"].as_str().unwrap().contains("volume"));
    }

    #[actix_web::test]
    async fn test_net_weight_uses_default_specification() {
        let (status, body) = post(
            "/api/calculations/net-weight",
            json!({ "gross_weight": 215.0, "tare": 14.0 }),
        )
        .await;
        assert_eq!(status, 200);
        assert_eq!(body["net_weight"], 201.0);
        assert_eq!(body["status"], "within-tolerance");
    }

    #[actix_web::test]
    async fn test_acid_titration_defaults_to_citric() {
        let (status, body) = post(
            "/api/calculations/acid-titration",
            json!({ "titrant_volume": 10.0, "normality": 0.1, "sample_volume": 10.0 }),
        )
        .await;
        assert_eq!(status, 200);
        assert!((body["value"].as_f64().unwrap() - 0.0064).abs() < 1e-12);
        assert_eq!(body["unit"], "%");

        let (status, body) = post(
            "/api/calculations/acid-titration",
            json!({
                "titrant_volume": 10.0,
                "normality": 0.1,
                "sample_volume": 10.0,
                "acid": "malic"
            }),
        )
        .await;
        assert_eq!(status, 200);
        assert!((body["value"].as_f64().unwrap() - 0.0067).abs() < 1e-12);
    }

    #[actix_web::test]
    async fn test_acid_titration_rejects_empty_sample() {
        let (status, body) = post(
            "/api/calculations/acid-titration",
            json!({ "titrant_volume": 10.0, "normality": 0.1, "sample_volume": 0.0 }),
        )
        .await;
        assert_eq!(status, 400);
        assert!(body["error"].as_str().unwrap().contains("sample_volume"));
    }

    #[actix_web::test]
    async fn test_tank_dilution_not_possible() {
        let (status, body) = post(
            "/api/calculations/tank-finalization",
            json!({
                "current_brix": 10.0,
                "target_brix": 12.0,
                "current_volume": 1000.0,
                "adjustment": "dilution"
            }),
        )
        .await;
        assert_eq!(status, 200);
        assert_eq!(body["possible"], false);
        assert!(body["added_volume"].is_null());
    }

    #[actix_web::test]
    async fn test_factors() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = test::TestRequest::get()
            .uri("/api/calculations/factors")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["acidity"]["citric"], 0.064);
        assert_eq!(body["brix"]["reference_temperature"], 20.0);
    }
}
