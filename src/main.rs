use std::sync::Arc;

use actix_web::middleware::NormalizePath;
use actix_web::web::Data;
use actix_web::{App, HttpServer, Responder, get};
use dotenvy::dotenv;

mod api;
mod auth;
mod config;
mod db;
mod docs;
mod error;
mod excel;
mod model;
mod models;
mod routes;
mod service;
mod store;

use config::Config;
use db::init_db;

use crate::docs::ApiDoc;
use crate::service::frequencia::FrequenciaService;
use crate::service::funcionario::FuncionarioService;
use crate::service::log::LogService;
use crate::service::relatorio::RelatorioService;
use crate::store::mysql::{MySqlFrequenciaStore, MySqlFuncionarioStore};
use tracing::info;
use tracing_appender::rolling;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[get("/")]
async fn index() -> impl Responder {
    "Sistema de Gestão Interna"
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    let config = Config::from_env();

    // Rolling daily log
    let file_appender = rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!("Server starting...");

    let pool = init_db(&config.database_url).await;

    let funcionario_service = Arc::new(FuncionarioService::new(Arc::new(
        MySqlFuncionarioStore::new(pool.clone()),
    )));
    let frequencia_service = Arc::new(FrequenciaService::new(
        Arc::new(MySqlFrequenciaStore::new(pool.clone())),
        funcionario_service.clone(),
    ));
    let relatorio_service = Arc::new(RelatorioService::new(
        frequencia_service.clone(),
        funcionario_service.clone(),
    ));
    let log_service = Arc::new(LogService::new(pool.clone()));

    let funcionarios_para_warmup = funcionario_service.clone();
    actix_web::rt::spawn(async move {
        match funcionarios_para_warmup.warmup().await {
            Ok(total) => info!(total, "Cache de funcionários aquecido"),
            Err(e) => eprintln!("Failed to warmup funcionario cache: {e:?}"),
        }
    });

    let server_addr = config.server_addr.clone();
    let config_data = config.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(Data::new(pool.clone()))
            .app_data(Data::new(config.clone()))
            .app_data(Data::from(funcionario_service.clone()))
            .app_data(Data::from(frequencia_service.clone()))
            .app_data(Data::from(relatorio_service.clone()))
            .app_data(Data::from(log_service.clone()))
            .service(index)
            .configure(|cfg| routes::configure(cfg, config_data.clone()))
    })
    .bind(server_addr)?
    .run()
    .await
}
