use crate::auth::handlers::LoginResponse;
use crate::excel::importacao::{ErroLinha, ResultadoImportacao};
use crate::model::frequencia::{
    CreateRegistroFrequencia, RegistroFrequencia, TipoDia, UpdateRegistroFrequencia,
};
use crate::model::funcionario::{CreateFuncionario, Funcionario, UpdateFuncionario};
use crate::model::log::{LogEntry, LogQuery};
use crate::model::relatorio::{
    Periodo, RelatorioRequest, RelatorioResponse, ResumoFuncionario, TipoRelatorio,
    TotaisFrequencia,
};
use crate::models::{LoginReqDto, UserReq};
use utoipa::Modify;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Gestão Interna API",
        version = "1.0.0",
        description = r#"
## Sistema de Gestão Interna

API de apoio à operação de uma empresa de pequeno porte, centrada no
controle de frequência dos funcionários.

### 🔹 Funcionalidades
- **Funcionários**
  - Cadastro, atualização, listagem e desligamento (soft delete)
- **Frequência**
  - Lançamento diário de entrada/saída com cálculo automático de horas
  - Importação em massa via CSV e exportação para planilha
- **Relatórios**
  - Consolidado de horas por funcionário e visão geral por setor
- **Auditoria**
  - Trilha de toda operação mutadora, consultável por administradores

### 🔐 Segurança
Rotas sob `/api` exigem **JWT Bearer**. A consulta de logs é restrita
ao perfil administrador.
"#,
    ),
    paths(
        crate::auth::handlers::register,
        crate::auth::handlers::login,
        crate::auth::handlers::refresh_token,
        crate::auth::handlers::logout,

        crate::api::frequencia::create,
        crate::api::frequencia::listar,
        crate::api::frequencia::get,
        crate::api::frequencia::update,
        crate::api::frequencia::delete,
        crate::api::frequencia::listar_mes,

        crate::api::funcionario::create,
        crate::api::funcionario::listar,
        crate::api::funcionario::get,
        crate::api::funcionario::update,
        crate::api::funcionario::delete,

        crate::api::relatorio::gerar,

        crate::api::excel::import_frequencia,
        crate::api::excel::export_frequencia,
        crate::api::excel::export_funcionarios,

        crate::api::logs::listar,
    ),
    components(
        schemas(
            UserReq,
            LoginReqDto,
            LoginResponse,
            TipoDia,
            RegistroFrequencia,
            CreateRegistroFrequencia,
            UpdateRegistroFrequencia,
            Funcionario,
            CreateFuncionario,
            UpdateFuncionario,
            TipoRelatorio,
            RelatorioRequest,
            RelatorioResponse,
            Periodo,
            ResumoFuncionario,
            TotaisFrequencia,
            ResultadoImportacao,
            ErroLinha,
            LogEntry,
            LogQuery
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Autenticação e sessão"),
        (name = "frequencia", description = "Registros de frequência"),
        (name = "funcionarios", description = "Cadastro de funcionários"),
        (name = "relatorios", description = "Relatórios consolidados"),
        (name = "excel", description = "Importação e exportação de planilhas"),
        (name = "logs", description = "Trilha de auditoria"),
    )
)]
pub struct ApiDoc;

pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
