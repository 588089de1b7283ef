use actix_web::{HttpRequest, HttpResponse, web};
use serde::Deserialize;
use serde_json::json;
use utoipa::IntoParams;

use crate::api::ip_origem;
use crate::auth::auth::AuthUser;
use crate::error::AppError;
use crate::excel::exportacao::{exportar_frequencia_csv, exportar_funcionarios_csv, nome_arquivo};
use crate::excel::importacao::{ImportacaoFrequencia, ResultadoImportacao, ler_csv};
use crate::service::frequencia::FrequenciaService;
use crate::service::funcionario::FuncionarioService;
use crate::service::log::{LogService, NovoLog};
use crate::store::FiltroFrequencia;

#[derive(Debug, Deserialize, IntoParams)]
pub struct ImportQuery {
    /// Nome do arquivo enviado, usado só na trilha de auditoria.
    pub arquivo: Option<String>,
}

/// Importação em massa: corpo da requisição é o CSV cru.
#[utoipa::path(
    post,
    path = "/api/excel/frequencia/import",
    tag = "excel",
    params(ImportQuery),
    request_body(content = String, content_type = "text/csv"),
    responses(
        (status = 200, description = "Importação processada", body = ResultadoImportacao),
        (status = 400, description = "Arquivo ilegível ou colunas obrigatórias ausentes"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn import_frequencia(
    req: HttpRequest,
    user: AuthUser,
    query: web::Query<ImportQuery>,
    corpo: web::Bytes,
    service: web::Data<FrequenciaService>,
    log: web::Data<LogService>,
) -> Result<HttpResponse, AppError> {
    let arquivo = query
        .arquivo
        .clone()
        .unwrap_or_else(|| "upload.csv".to_string());

    if !arquivo.to_lowercase().ends_with(".csv") {
        return Err(AppError::Validacao(format!(
            "Formato de arquivo não suportado: '{arquivo}' (esperado .csv)"
        )));
    }

    let importacao = ImportacaoFrequencia::new(service.into_inner());

    let resultado = match ler_csv(&corpo) {
        Ok(planilha) => importacao.importar(&planilha).await,
        Err(e) => Err(e),
    };

    match resultado {
        Ok(resultado) => {
            log.registrar(NovoLog {
                usuario: &user.username,
                acao: format!("Importação de frequência via {arquivo}"),
                tipo: "import",
                modulo: Some("frequencia"),
                status: "sucesso",
                detalhes: json!({
                    "arquivo": arquivo,
                    "total_processados": resultado.total_processados,
                    "criados": resultado.criados.len(),
                    "erros": resultado.erros.len(),
                }),
                ip_origem: ip_origem(&req),
            })
            .await;

            Ok(HttpResponse::Ok().json(json!({
                "message": "Importação de frequência concluída",
                "total_processados": resultado.total_processados,
                "criados": resultado.criados.len(),
                "erros": resultado.erros.len(),
                "detalhes_erros": resultado.detalhes_erros(),
            })))
        }
        Err(e) => {
            log.registrar(NovoLog {
                usuario: &user.username,
                acao: format!("Importação de frequência via {arquivo}"),
                tipo: "import",
                modulo: Some("frequencia"),
                status: "erro",
                detalhes: json!({ "arquivo": arquivo, "erro": e.to_string() }),
                ip_origem: ip_origem(&req),
            })
            .await;

            Err(e)
        }
    }
}

fn resposta_csv(bytes: Vec<u8>, nome: &str) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{nome}\""),
        ))
        .body(bytes)
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ExportFrequenciaQuery {
    pub funcionario_id: Option<String>,
    pub data_inicio: Option<chrono::NaiveDate>,
    pub data_fim: Option<chrono::NaiveDate>,
}

#[utoipa::path(
    get,
    path = "/api/excel/frequencia/export",
    tag = "excel",
    params(ExportFrequenciaQuery),
    responses(
        (status = 200, description = "CSV de frequência", content_type = "text/csv"),
        (status = 404, description = "Nenhum registro no filtro"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn export_frequencia(
    query: web::Query<ExportFrequenciaQuery>,
    service: web::Data<FrequenciaService>,
) -> Result<HttpResponse, AppError> {
    let filtro = FiltroFrequencia {
        funcionario_id: query.funcionario_id.clone(),
        data_inicio: query.data_inicio,
        data_fim: query.data_fim,
    };
    let registros = service.listar(filtro).await?;

    if registros.is_empty() {
        return Err(AppError::NaoEncontrado(
            "Nenhum registro encontrado".to_string(),
        ));
    }

    let bytes = exportar_frequencia_csv(&registros)?;
    Ok(resposta_csv(bytes, &nome_arquivo("frequencia")))
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ExportFuncionariosQuery {
    pub ativo: Option<bool>,
    pub setor: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/excel/funcionarios/export",
    tag = "excel",
    params(ExportFuncionariosQuery),
    responses(
        (status = 200, description = "CSV de funcionários", content_type = "text/csv"),
        (status = 404, description = "Nenhum funcionário no filtro"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn export_funcionarios(
    query: web::Query<ExportFuncionariosQuery>,
    service: web::Data<FuncionarioService>,
) -> Result<HttpResponse, AppError> {
    let funcionarios = service.listar(query.ativo, query.setor.as_deref()).await?;

    if funcionarios.is_empty() {
        return Err(AppError::NaoEncontrado(
            "Nenhum registro encontrado".to_string(),
        ));
    }

    let bytes = exportar_funcionarios_csv(&funcionarios)?;
    Ok(resposta_csv(bytes, &nome_arquivo("funcionarios")))
}
