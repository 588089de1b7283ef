use actix_web::{HttpRequest, HttpResponse, web};
use serde::Deserialize;
use serde_json::json;
use utoipa::IntoParams;

use crate::api::ip_origem;
use crate::auth::auth::AuthUser;
use crate::error::AppError;
use crate::model::frequencia::{
    CreateRegistroFrequencia, RegistroFrequencia, UpdateRegistroFrequencia,
};
use crate::service::frequencia::FrequenciaService;
use crate::service::log::{LogService, NovoLog};
use crate::store::FiltroFrequencia;

#[derive(Debug, Deserialize, IntoParams)]
pub struct FiltroFrequenciaQuery {
    pub funcionario_id: Option<String>,
    /// Formato YYYY-MM-DD.
    pub data_inicio: Option<chrono::NaiveDate>,
    pub data_fim: Option<chrono::NaiveDate>,
}

#[utoipa::path(
    post,
    path = "/api/frequencia",
    tag = "frequencia",
    request_body = CreateRegistroFrequencia,
    responses(
        (status = 201, description = "Registro criado", body = RegistroFrequencia),
        (status = 400, description = "Horário malformado"),
        (status = 404, description = "Funcionário não encontrado"),
        (status = 409, description = "Já existe registro para o funcionário no dia"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn create(
    req: HttpRequest,
    user: AuthUser,
    dados: web::Json<CreateRegistroFrequencia>,
    service: web::Data<FrequenciaService>,
    log: web::Data<LogService>,
) -> Result<HttpResponse, AppError> {
    let registro = service.create(dados.into_inner()).await?;

    log.registrar(NovoLog {
        usuario: &user.username,
        acao: format!("Registro de frequência criado para {}", registro.data),
        tipo: "create",
        modulo: Some("frequencia"),
        status: "sucesso",
        detalhes: json!({
            "registro_id": registro.id,
            "funcionario_id": registro.funcionario_id,
        }),
        ip_origem: ip_origem(&req),
    })
    .await;

    Ok(HttpResponse::Created().json(registro))
}

#[utoipa::path(
    get,
    path = "/api/frequencia",
    tag = "frequencia",
    params(FiltroFrequenciaQuery),
    responses((status = 200, description = "Registros do filtro", body = Vec<RegistroFrequencia>)),
    security(("bearer_auth" = []))
)]
pub async fn listar(
    query: web::Query<FiltroFrequenciaQuery>,
    service: web::Data<FrequenciaService>,
) -> Result<HttpResponse, AppError> {
    let filtro = FiltroFrequencia {
        funcionario_id: query.funcionario_id.clone(),
        data_inicio: query.data_inicio,
        data_fim: query.data_fim,
    };
    let registros = service.listar(filtro).await?;
    Ok(HttpResponse::Ok().json(registros))
}

#[utoipa::path(
    get,
    path = "/api/frequencia/{id}",
    tag = "frequencia",
    params(("id" = String, Path, description = "Id do registro")),
    responses(
        (status = 200, description = "Registro encontrado", body = RegistroFrequencia),
        (status = 404, description = "Registro não encontrado"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn get(
    id: web::Path<String>,
    service: web::Data<FrequenciaService>,
) -> Result<HttpResponse, AppError> {
    match service.get(&id).await? {
        Some(registro) => Ok(HttpResponse::Ok().json(registro)),
        None => Err(AppError::NaoEncontrado("Registro não encontrado".to_string())),
    }
}

#[utoipa::path(
    put,
    path = "/api/frequencia/{id}",
    tag = "frequencia",
    params(("id" = String, Path, description = "Id do registro")),
    request_body = UpdateRegistroFrequencia,
    responses(
        (status = 200, description = "Registro atualizado", body = RegistroFrequencia),
        (status = 400, description = "Horário malformado"),
        (status = 404, description = "Registro não encontrado"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn update(
    req: HttpRequest,
    user: AuthUser,
    id: web::Path<String>,
    dados: web::Json<UpdateRegistroFrequencia>,
    service: web::Data<FrequenciaService>,
    log: web::Data<LogService>,
) -> Result<HttpResponse, AppError> {
    let Some(registro) = service.update(&id, dados.into_inner()).await? else {
        return Err(AppError::NaoEncontrado("Registro não encontrado".to_string()));
    };

    log.registrar(NovoLog {
        usuario: &user.username,
        acao: format!("Registro de frequência {} atualizado", registro.id),
        tipo: "update",
        modulo: Some("frequencia"),
        status: "sucesso",
        detalhes: json!({ "registro_id": registro.id }),
        ip_origem: ip_origem(&req),
    })
    .await;

    Ok(HttpResponse::Ok().json(registro))
}

#[utoipa::path(
    delete,
    path = "/api/frequencia/{id}",
    tag = "frequencia",
    params(("id" = String, Path, description = "Id do registro")),
    responses(
        (status = 200, description = "Registro removido"),
        (status = 404, description = "Registro não encontrado"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete(
    req: HttpRequest,
    user: AuthUser,
    id: web::Path<String>,
    service: web::Data<FrequenciaService>,
    log: web::Data<LogService>,
) -> Result<HttpResponse, AppError> {
    if !service.delete(&id).await? {
        return Err(AppError::NaoEncontrado("Registro não encontrado".to_string()));
    }

    log.registrar(NovoLog {
        usuario: &user.username,
        acao: format!("Registro de frequência {id} removido"),
        tipo: "delete",
        modulo: Some("frequencia"),
        status: "sucesso",
        detalhes: json!({ "registro_id": id.as_str() }),
        ip_origem: ip_origem(&req),
    })
    .await;

    Ok(HttpResponse::Ok().json(json!({ "message": "Registro removido com sucesso" })))
}

#[utoipa::path(
    get,
    path = "/api/frequencia/funcionario/{funcionario_id}/mes/{ano}/{mes}",
    tag = "frequencia",
    params(
        ("funcionario_id" = String, Path, description = "Id do funcionário"),
        ("ano" = i32, Path, description = "Ano civil"),
        ("mes" = u32, Path, description = "Mês, 1 a 12"),
    ),
    responses(
        (status = 200, description = "Registros do mês", body = Vec<RegistroFrequencia>),
        (status = 400, description = "Mês inválido"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn listar_mes(
    caminho: web::Path<(String, i32, u32)>,
    service: web::Data<FrequenciaService>,
) -> Result<HttpResponse, AppError> {
    let (funcionario_id, ano, mes) = caminho.into_inner();
    let registros = service.listar_mes(&funcionario_id, ano, mes).await?;
    Ok(HttpResponse::Ok().json(registros))
}
