use actix_cors::Cors;
use actix_web::{get, web, App, HttpResponse, HttpServer, Responder};
use anyhow::Context;
use clap::Parser;
use juicelab_api::config::ApiConfig;
use juicelab_api::{handlers, AppState};
use laboratory::{ActivityGenerator, ProductionCalculator};
use std::path::PathBuf;
use tracing_subscriber::prelude::*;

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long)]
    log_file_path: Option<String>,

    /// Config file to use instead of ~/.config/juicelab/api.toml
    #[arg(long)]
    config: Option<PathBuf>,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    if let Some(log_path) = args.log_file_path {
        let log_path = std::path::Path::new(&log_path);
        let file_appender = tracing_appender::rolling::never(
            log_path.parent().unwrap_or(std::path::Path::new(".")),
            log_path
                .file_name()
                .unwrap_or(std::ffi::OsStr::new("juicelab-api.log")),
        );
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        std::mem::forget(guard);

        tracing_subscriber::registry()
            .with(env_filter.clone())
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(true)
                    .with_writer(std::io::stdout),
            )
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(non_blocking),
            )
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let (config, config_path) =
        ApiConfig::load(args.config.as_deref()).context("Failed to load config")?;
    tracing::info!("Loaded config from {}", config_path.display());

    let generator = ActivityGenerator::new(
        config
            .rotation_policy()
            .context("Invalid [calendar] section")?,
    )
    .context("Invalid [calendar] section")?;
    tracing::info!("Calendar rotation policy: {:?}", generator.policy());

    let upload_dir = config.upload_dir();
    std::fs::create_dir_all(&upload_dir).with_context(|| {
        format!("Failed to create upload directory {}", upload_dir.display())
    })?;
    tracing::info!("Serving documents from {}", upload_dir.display());

    let state = web::Data::new(AppState {
        generator,
        calculator: ProductionCalculator::new(config.factors()),
        upload_dir,
    });

    let (host, port) = config.host_and_port();
    tracing::info!("Server will listen on {}:{}", host, port);

    let cors_config = config.cors.clone();
    HttpServer::new(move || {
        // Configure CORS
        let cors = if let Some(cors_config) = &cors_config {
            let mut cors_builder = Cors::default();
            for origin in &cors_config.allowed_origins {
                cors_builder = cors_builder.allowed_origin(origin);
            }
            cors_builder
                .allowed_methods(vec!["GET", "POST", "OPTIONS"])
                .allowed_headers(vec!["Accept", "Content-Type"])
                .max_age(3600)
        } else {
            Cors::default()
                .allow_any_origin()
                .allowed_methods(vec!["GET", "POST", "OPTIONS"])
                .allowed_headers(vec!["Accept", "Content-Type"])
                .max_age(3600)
        };

        App::new()
            .wrap(cors)
            .app_data(state.clone())
            .service(health)
            .configure(handlers::configure)
    })
    .bind((host.as_str(), port))
    .with_context(|| format!("Failed to bind {}:{}", host, port))?
    .run()
    .await?;

    Ok(())
}
