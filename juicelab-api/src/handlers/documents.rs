use super::{error_json, AppState};
use actix_web::{web, HttpResponse, Result as ActixResult};
use shared_types::{ExtractionError, InspectDocumentRequest};
use std::path::{Component, Path, PathBuf};
use tracing::{info, warn};

/// Join `filename` onto `upload_dir`, refusing anything that could leave it
pub fn resolve_upload_path(
    upload_dir: &Path,
    filename: &str,
) -> Result<PathBuf, ExtractionError> {
    if filename.trim().is_empty() {
        return Err(ExtractionError::InvalidInput("filename is empty".to_string()));
    }

    let relative = Path::new(filename);
    if !relative
        .components()
        .all(|component| matches!(component, Component::Normal(_) | Component::CurDir))
    {
        return Err(ExtractionError::InvalidInput(format!(
            "filename escapes the upload directory: {}",
            filename
        )));
    }
    Ok(upload_dir.join(relative))
}

fn extraction_error(error: ExtractionError) -> HttpResponse {
    match error {
        ExtractionError::UnsupportedFormat(_) | ExtractionError::InvalidInput(_) => {
            error_json(HttpResponse::BadRequest(), error.to_string())
        }
        ExtractionError::ParseError(_) => {
            error_json(HttpResponse::UnprocessableEntity(), error.to_string())
        }
        ExtractionError::Io(_) => {
            error_json(HttpResponse::InternalServerError(), error.to_string())
        }
    }
}

/// Detect the form fields of an uploaded document
pub async fn inspect_document(
    state: web::Data<AppState>,
    request: web::Json<InspectDocumentRequest>,
) -> ActixResult<HttpResponse> {
    let filename = request.into_inner().filename;

    let path = match resolve_upload_path(&state.upload_dir, &filename) {
        Ok(path) => path,
        Err(e) => {
            warn!(filename = %filename, error = %e, "Rejected document path");
            return Ok(extraction_error(e));
        }
    };

    if let Err(e) = extractors::detect_format(&path) {
        return Ok(extraction_error(e));
    }
    if !path.is_file() {
        return Ok(error_json(
            HttpResponse::NotFound(),
            format!("Document not found: {}", filename),
        ));
    }

    let result = web::block(move || extractors::extract_document(&path))
        .await
        .map_err(|e| actix_web::error::ErrorInternalServerError(e.to_string()))?;

    match result {
        Ok(structure) => {
            info!(
                filename = %filename,
                format = structure.format.as_str(),
                fields = structure.fields.len(),
                "Inspected document"
            );
            Ok(HttpResponse::Ok().json(structure))
        }
        Err(e) => {
            warn!(filename = %filename, error = %e, "Document inspection failed");
            Ok(extraction_error(e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::configure;
    use actix_web::{test, App};
    use laboratory::{ActivityGenerator, ProductionCalculator};
    use serde_json::{json, Value};

    fn state(upload_dir: &Path) -> web::Data<AppState> {
        web::Data::new(AppState {
            generator: ActivityGenerator::with_defaults(),
            calculator: ProductionCalculator::default(),
            upload_dir: upload_dir.to_path_buf(),
        })
    }

    #[::core::prelude::v1::test]
    fn test_resolve_upload_path() {
        let dir = Path::new("/srv/uploads");
        assert_eq!(
            resolve_upload_path(dir, "ficha.xlsx").unwrap(),
            PathBuf::from("/srv/uploads/ficha.xlsx")
        );
        assert_eq!(
            resolve_upload_path(dir, "lotes/ficha.pdf").unwrap(),
            PathBuf::from("/srv/uploads/lotes/ficha.pdf")
        );

        for rejected in ["../etc/passwd", "/etc/passwd", "", "   "] {
            assert!(
                matches!(
                    resolve_upload_path(dir, rejected),
                    Err(ExtractionError::InvalidInput(_))
                ),
                "{:?} should be rejected",
                rejected
            );
        }
    }

    async fn inspect(upload_dir: &Path, filename: &str) -> (u16, Value) {
        let app = test::init_service(
            App::new()
                .app_data(state(upload_dir))
                .configure(configure),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/api/documents/inspect")
            .set_json(json!({ "filename": filename }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        let status = resp.status().as_u16();
        (status, test::read_body_json(resp).await)
    }

    #[actix_web::test]
    async fn test_error_statuses() {
        let dir = tempfile::tempdir().unwrap();

        let (status, body) = inspect(dir.path(), "notas.txt").await;
        assert_eq!(status, 400);
        assert!(body["error"].as_str().unwrap().starts_with("Unsupported format"));

        let (status, body) = inspect(dir.path(), "../fora.pdf").await;
        assert_eq!(status, 400);
        assert!(body["error"].as_str().unwrap().starts_with("Invalid input"));

        let (status, body) = inspect(dir.path(), "").await;
        assert_eq!(status, 400);
        assert_eq!(body["error"], "Invalid input: filename is empty");

        let (status, _) = inspect(dir.path(), "ausente.pdf").await;
        assert_eq!(status, 404);

        std::fs::write(dir.path().join("quebrado.pdf"), b"%PDF-garbage").unwrap();
        let (status, _) = inspect(dir.path(), "quebrado.pdf").await;
        assert_eq!(status, 500);
    }

    #[actix_web::test]
    async fn test_inspect_docx() {
        use docx_rs::{Docx, Paragraph, Run};

        let dir = tempfile::tempdir().unwrap();
        let file = std::fs::File::create(dir.path().join("laudo.docx")).unwrap();
        Docx::new()
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text("Lote: ABC123")))
            .build()
            .pack(file)
            .unwrap();

        let (status, body) = inspect(dir.path(), "laudo.docx").await;
        assert_eq!(status, 200);
        assert_eq!(body["format"], "wordprocessing");
        assert_eq!(body["fields"][0]["label"], "Lote");
        assert_eq!(body["fields"][0]["value"], "ABC123");
        assert_eq!(body["fields"][0]["locator"]["kind"], "paragraph");
    }
}
