use actix_web::{HttpResponse, http::StatusCode};
use serde_json::json;
use thiserror::Error;

/// Erros de negócio do sistema, mapeados direto para respostas HTTP.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validacao(String),

    #[error("{0}")]
    NaoEncontrado(String),

    #[error("{0}")]
    Conflito(String),

    #[error("{0}")]
    Interno(String),

    #[error("erro de banco de dados: {0}")]
    Banco(#[from] sqlx::Error),
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validacao(_) => StatusCode::BAD_REQUEST,
            AppError::NaoEncontrado(_) => StatusCode::NOT_FOUND,
            AppError::Conflito(_) => StatusCode::CONFLICT,
            AppError::Interno(_) | AppError::Banco(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Banco(e) => {
                tracing::error!(error = %e, "Erro de banco de dados");
                HttpResponse::InternalServerError().json(json!({
                    "detail": "Erro interno do servidor"
                }))
            }
            AppError::Interno(msg) => {
                tracing::error!(error = %msg, "Erro interno");
                HttpResponse::InternalServerError().json(json!({
                    "detail": "Erro interno do servidor"
                }))
            }
            outro => HttpResponse::build(self.status_code()).json(json!({
                "detail": outro.to_string()
            })),
        }
    }
}
