use actix_web::{HttpRequest, HttpResponse, web};
use serde::Deserialize;
use serde_json::json;
use utoipa::IntoParams;

use crate::api::ip_origem;
use crate::auth::auth::AuthUser;
use crate::error::AppError;
use crate::model::funcionario::{CreateFuncionario, Funcionario, UpdateFuncionario};
use crate::service::funcionario::FuncionarioService;
use crate::service::log::{LogService, NovoLog};

#[derive(Debug, Deserialize, IntoParams)]
pub struct FiltroFuncionarioQuery {
    pub ativo: Option<bool>,
    pub setor: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/funcionarios",
    tag = "funcionarios",
    request_body = CreateFuncionario,
    responses(
        (status = 201, description = "Funcionário criado", body = Funcionario),
        (status = 409, description = "CPF já cadastrado"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn create(
    req: HttpRequest,
    user: AuthUser,
    dados: web::Json<CreateFuncionario>,
    service: web::Data<FuncionarioService>,
    log: web::Data<LogService>,
) -> Result<HttpResponse, AppError> {
    let funcionario = service.create(dados.into_inner()).await?;

    log.registrar(NovoLog {
        usuario: &user.username,
        acao: format!("Funcionário {} cadastrado", funcionario.nome),
        tipo: "create",
        modulo: Some("funcionarios"),
        status: "sucesso",
        detalhes: json!({ "funcionario_id": funcionario.id }),
        ip_origem: ip_origem(&req),
    })
    .await;

    Ok(HttpResponse::Created().json(funcionario))
}

#[utoipa::path(
    get,
    path = "/api/funcionarios",
    tag = "funcionarios",
    params(FiltroFuncionarioQuery),
    responses((status = 200, description = "Funcionários do filtro", body = Vec<Funcionario>)),
    security(("bearer_auth" = []))
)]
pub async fn listar(
    query: web::Query<FiltroFuncionarioQuery>,
    service: web::Data<FuncionarioService>,
) -> Result<HttpResponse, AppError> {
    let funcionarios = service.listar(query.ativo, query.setor.as_deref()).await?;
    Ok(HttpResponse::Ok().json(funcionarios))
}

#[utoipa::path(
    get,
    path = "/api/funcionarios/{id}",
    tag = "funcionarios",
    params(("id" = String, Path, description = "Id do funcionário")),
    responses(
        (status = 200, description = "Funcionário encontrado", body = Funcionario),
        (status = 404, description = "Funcionário não encontrado"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn get(
    id: web::Path<String>,
    service: web::Data<FuncionarioService>,
) -> Result<HttpResponse, AppError> {
    match service.buscar(&id).await? {
        Some(funcionario) => Ok(HttpResponse::Ok().json(funcionario)),
        None => Err(AppError::NaoEncontrado(
            "Funcionário não encontrado".to_string(),
        )),
    }
}

#[utoipa::path(
    put,
    path = "/api/funcionarios/{id}",
    tag = "funcionarios",
    params(("id" = String, Path, description = "Id do funcionário")),
    request_body = UpdateFuncionario,
    responses(
        (status = 200, description = "Funcionário atualizado", body = Funcionario),
        (status = 404, description = "Funcionário não encontrado"),
        (status = 409, description = "CPF já em uso"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn update(
    req: HttpRequest,
    user: AuthUser,
    id: web::Path<String>,
    dados: web::Json<UpdateFuncionario>,
    service: web::Data<FuncionarioService>,
    log: web::Data<LogService>,
) -> Result<HttpResponse, AppError> {
    let Some(funcionario) = service.update(&id, dados.into_inner()).await? else {
        return Err(AppError::NaoEncontrado(
            "Funcionário não encontrado".to_string(),
        ));
    };

    log.registrar(NovoLog {
        usuario: &user.username,
        acao: format!("Funcionário {} atualizado", funcionario.nome),
        tipo: "update",
        modulo: Some("funcionarios"),
        status: "sucesso",
        detalhes: json!({ "funcionario_id": funcionario.id }),
        ip_origem: ip_origem(&req),
    })
    .await;

    Ok(HttpResponse::Ok().json(funcionario))
}

#[utoipa::path(
    delete,
    path = "/api/funcionarios/{id}",
    tag = "funcionarios",
    params(("id" = String, Path, description = "Id do funcionário")),
    responses(
        (status = 200, description = "Funcionário desativado"),
        (status = 403, description = "Acesso restrito a administradores"),
        (status = 404, description = "Funcionário não encontrado ou já inativo"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete(
    req: HttpRequest,
    user: AuthUser,
    id: web::Path<String>,
    service: web::Data<FuncionarioService>,
    log: web::Data<LogService>,
) -> actix_web::Result<HttpResponse> {
    user.require_admin()?;

    if !service.delete(&id).await? {
        return Err(AppError::NaoEncontrado("Funcionário não encontrado".to_string()).into());
    }

    log.registrar(NovoLog {
        usuario: &user.username,
        acao: format!("Funcionário {id} desativado"),
        tipo: "delete",
        modulo: Some("funcionarios"),
        status: "sucesso",
        detalhes: json!({ "funcionario_id": id.as_str() }),
        ip_origem: ip_origem(&req),
    })
    .await;

    Ok(HttpResponse::Ok().json(json!({ "message": "Funcionário desativado com sucesso" })))
}
