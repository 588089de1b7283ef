use actix_web::{HttpResponse, web};

use crate::error::AppError;
use crate::model::relatorio::{RelatorioRequest, RelatorioResponse};
use crate::service::relatorio::RelatorioService;

#[utoipa::path(
    post,
    path = "/api/relatorios",
    tag = "relatorios",
    request_body = RelatorioRequest,
    responses(
        (status = 200, description = "Relatório gerado", body = RelatorioResponse),
        (status = 400, description = "Período ou tipo inválido"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn gerar(
    dados: web::Json<RelatorioRequest>,
    service: web::Data<RelatorioService>,
) -> Result<HttpResponse, AppError> {
    let relatorio = service.gerar(dados.into_inner()).await?;
    Ok(HttpResponse::Ok().json(relatorio))
}
