use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::AppError;
use crate::model::frequencia::{PatchFrequencia, RegistroFrequencia};
use crate::model::funcionario::{Funcionario, UpdateFuncionario};

#[cfg(test)]
pub mod memoria;
pub mod mysql;

/// Teto de linhas em listagens, contra resultados ilimitados.
pub const LIMITE_LISTAGEM: i64 = 5000;

#[derive(Debug, Default, Clone)]
pub struct FiltroFrequencia {
    pub funcionario_id: Option<String>,
    pub data_inicio: Option<NaiveDate>,
    pub data_fim: Option<NaiveDate>,
}

/// Persistência dos registros de frequência.
///
/// `inserir` devolve `Conflito` quando já existe registro ativo para o
/// mesmo par (funcionario_id, data); no MySQL isso é garantido pelo
/// índice único, que fecha a corrida checagem-então-inserção.
#[async_trait]
pub trait FrequenciaStore: Send + Sync {
    async fn inserir(&self, registro: &RegistroFrequencia) -> Result<(), AppError>;

    async fn buscar(&self, id: &str) -> Result<Option<RegistroFrequencia>, AppError>;

    async fn buscar_por_dia(
        &self,
        funcionario_id: &str,
        data: NaiveDate,
    ) -> Result<Option<RegistroFrequencia>, AppError>;

    /// Aplica apenas os campos presentes no patch; `None` quando o id
    /// não existe.
    async fn atualizar(
        &self,
        id: &str,
        patch: &PatchFrequencia,
    ) -> Result<Option<RegistroFrequencia>, AppError>;

    /// `true` se algum registro foi removido.
    async fn remover(&self, id: &str) -> Result<bool, AppError>;

    /// Registros do filtro, ordenados por data decrescente, limitados a
    /// [`LIMITE_LISTAGEM`].
    async fn listar(
        &self,
        filtro: &FiltroFrequencia,
    ) -> Result<Vec<RegistroFrequencia>, AppError>;
}

/// Persistência do cadastro de funcionários.
#[async_trait]
pub trait FuncionarioStore: Send + Sync {
    async fn inserir(&self, funcionario: &Funcionario) -> Result<(), AppError>;

    async fn buscar(&self, id: &str) -> Result<Option<Funcionario>, AppError>;

    async fn buscar_por_cpf(&self, cpf: &str) -> Result<Option<Funcionario>, AppError>;

    async fn atualizar(
        &self,
        id: &str,
        campos: &UpdateFuncionario,
    ) -> Result<Option<Funcionario>, AppError>;

    /// Soft delete: marca o funcionário como inativo.
    async fn desativar(&self, id: &str) -> Result<bool, AppError>;

    async fn listar(
        &self,
        ativo: Option<bool>,
        setor: Option<&str>,
    ) -> Result<Vec<Funcionario>, AppError>;
}
