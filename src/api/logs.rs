use actix_web::{HttpResponse, web};

use crate::auth::auth::AuthUser;
use crate::model::log::{LogEntry, LogQuery};
use crate::service::log::LogService;

#[utoipa::path(
    get,
    path = "/api/logs",
    tag = "logs",
    params(LogQuery),
    responses(
        (status = 200, description = "Entradas do log de auditoria", body = Vec<LogEntry>),
        (status = 403, description = "Acesso restrito a administradores"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn listar(
    user: AuthUser,
    query: web::Query<LogQuery>,
    service: web::Data<LogService>,
) -> actix_web::Result<HttpResponse> {
    user.require_admin()?;

    let entradas = service.listar(&query).await?;
    Ok(HttpResponse::Ok().json(entradas))
}
