use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::MySqlPool;

use crate::error::AppError;
use crate::model::frequencia::{PatchFrequencia, RegistroFrequencia};
use crate::model::funcionario::{Funcionario, UpdateFuncionario};
use crate::store::{FiltroFrequencia, FrequenciaStore, FuncionarioStore, LIMITE_LISTAGEM};

const COLUNAS_FREQUENCIA: &str =
    "id, funcionario_id, nome, data, tipo_dia, hora_entrada, hora_saida, observacao, total_horas";

const COLUNAS_FUNCIONARIO: &str =
    "id, nome, cpf, cargo, setor, email, telefone, data_admissao, ativo";

/// Converte violação de chave única (SQLSTATE 23000) em conflito de
/// negócio; qualquer outro erro sobe como indisponibilidade do banco.
fn mapear_duplicidade(e: sqlx::Error, mensagem: String) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.code().as_deref() == Some("23000") {
            return AppError::Conflito(mensagem);
        }
    }
    AppError::Banco(e)
}

pub struct MySqlFrequenciaStore {
    pool: MySqlPool,
}

impl MySqlFrequenciaStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FrequenciaStore for MySqlFrequenciaStore {
    async fn inserir(&self, registro: &RegistroFrequencia) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO frequencia
            (id, funcionario_id, nome, data, tipo_dia, hora_entrada, hora_saida, observacao, total_horas)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&registro.id)
        .bind(&registro.funcionario_id)
        .bind(&registro.nome)
        .bind(registro.data)
        .bind(registro.tipo_dia)
        .bind(&registro.hora_entrada)
        .bind(&registro.hora_saida)
        .bind(&registro.observacao)
        .bind(registro.total_horas)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            mapear_duplicidade(
                e,
                format!(
                    "Já existe registro de frequência para o funcionário {} em {}",
                    registro.funcionario_id, registro.data
                ),
            )
        })?;

        Ok(())
    }

    async fn buscar(&self, id: &str) -> Result<Option<RegistroFrequencia>, AppError> {
        let registro = sqlx::query_as::<_, RegistroFrequencia>(&format!(
            "SELECT {COLUNAS_FREQUENCIA} FROM frequencia WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(registro)
    }

    async fn buscar_por_dia(
        &self,
        funcionario_id: &str,
        data: NaiveDate,
    ) -> Result<Option<RegistroFrequencia>, AppError> {
        let registro = sqlx::query_as::<_, RegistroFrequencia>(&format!(
            "SELECT {COLUNAS_FREQUENCIA} FROM frequencia WHERE funcionario_id = ? AND data = ?"
        ))
        .bind(funcionario_id)
        .bind(data)
        .fetch_optional(&self.pool)
        .await?;

        Ok(registro)
    }

    async fn atualizar(
        &self,
        id: &str,
        patch: &PatchFrequencia,
    ) -> Result<Option<RegistroFrequencia>, AppError> {
        if patch.is_empty() {
            return self.buscar(id).await;
        }

        // ---------- monta SET dinamicamente ----------
        let mut sets = Vec::new();
        if patch.hora_entrada.is_some() {
            sets.push("hora_entrada = ?");
        }
        if patch.hora_saida.is_some() {
            sets.push("hora_saida = ?");
        }
        if patch.tipo_dia.is_some() {
            sets.push("tipo_dia = ?");
        }
        if patch.observacao.is_some() {
            sets.push("observacao = ?");
        }
        if patch.total_horas.is_some() {
            sets.push("total_horas = ?");
        }

        let sql = format!("UPDATE frequencia SET {} WHERE id = ?", sets.join(", "));

        let mut query = sqlx::query(&sql);
        if let Some(hora_entrada) = &patch.hora_entrada {
            query = query.bind(hora_entrada);
        }
        if let Some(hora_saida) = &patch.hora_saida {
            query = query.bind(hora_saida);
        }
        if let Some(tipo_dia) = patch.tipo_dia {
            query = query.bind(tipo_dia);
        }
        if let Some(observacao) = &patch.observacao {
            query = query.bind(observacao);
        }
        if let Some(total_horas) = patch.total_horas {
            query = query.bind(total_horas);
        }
        query.bind(id).execute(&self.pool).await?;

        // rows_affected é 0 tanto para id inexistente quanto para valores
        // idênticos; o reload decide.
        self.buscar(id).await
    }

    async fn remover(&self, id: &str) -> Result<bool, AppError> {
        let resultado = sqlx::query("DELETE FROM frequencia WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(resultado.rows_affected() > 0)
    }

    async fn listar(
        &self,
        filtro: &FiltroFrequencia,
    ) -> Result<Vec<RegistroFrequencia>, AppError> {
        let mut conditions = Vec::new();
        if filtro.funcionario_id.is_some() {
            conditions.push("funcionario_id = ?");
        }
        if filtro.data_inicio.is_some() {
            conditions.push("data >= ?");
        }
        if filtro.data_fim.is_some() {
            conditions.push("data <= ?");
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };

        let sql = format!(
            "SELECT {COLUNAS_FREQUENCIA} FROM frequencia{where_clause} ORDER BY data DESC LIMIT ?"
        );

        let mut query = sqlx::query_as::<_, RegistroFrequencia>(&sql);
        if let Some(funcionario_id) = &filtro.funcionario_id {
            query = query.bind(funcionario_id);
        }
        if let Some(data_inicio) = filtro.data_inicio {
            query = query.bind(data_inicio);
        }
        if let Some(data_fim) = filtro.data_fim {
            query = query.bind(data_fim);
        }

        let registros = query.bind(LIMITE_LISTAGEM).fetch_all(&self.pool).await?;
        Ok(registros)
    }
}

pub struct MySqlFuncionarioStore {
    pool: MySqlPool,
}

impl MySqlFuncionarioStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FuncionarioStore for MySqlFuncionarioStore {
    async fn inserir(&self, funcionario: &Funcionario) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO funcionarios
            (id, nome, cpf, cargo, setor, email, telefone, data_admissao, ativo)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&funcionario.id)
        .bind(&funcionario.nome)
        .bind(&funcionario.cpf)
        .bind(&funcionario.cargo)
        .bind(&funcionario.setor)
        .bind(&funcionario.email)
        .bind(&funcionario.telefone)
        .bind(funcionario.data_admissao)
        .bind(funcionario.ativo)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            mapear_duplicidade(
                e,
                format!("Funcionário com CPF {} já existe", funcionario.cpf),
            )
        })?;

        Ok(())
    }

    async fn buscar(&self, id: &str) -> Result<Option<Funcionario>, AppError> {
        let funcionario = sqlx::query_as::<_, Funcionario>(&format!(
            "SELECT {COLUNAS_FUNCIONARIO} FROM funcionarios WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(funcionario)
    }

    async fn buscar_por_cpf(&self, cpf: &str) -> Result<Option<Funcionario>, AppError> {
        let funcionario = sqlx::query_as::<_, Funcionario>(&format!(
            "SELECT {COLUNAS_FUNCIONARIO} FROM funcionarios WHERE cpf = ?"
        ))
        .bind(cpf)
        .fetch_optional(&self.pool)
        .await?;

        Ok(funcionario)
    }

    async fn atualizar(
        &self,
        id: &str,
        campos: &UpdateFuncionario,
    ) -> Result<Option<Funcionario>, AppError> {
        if campos.is_empty() {
            return self.buscar(id).await;
        }

        let mut sets = Vec::new();
        if campos.nome.is_some() {
            sets.push("nome = ?");
        }
        if campos.cpf.is_some() {
            sets.push("cpf = ?");
        }
        if campos.cargo.is_some() {
            sets.push("cargo = ?");
        }
        if campos.setor.is_some() {
            sets.push("setor = ?");
        }
        if campos.email.is_some() {
            sets.push("email = ?");
        }
        if campos.telefone.is_some() {
            sets.push("telefone = ?");
        }
        if campos.ativo.is_some() {
            sets.push("ativo = ?");
        }

        let sql = format!("UPDATE funcionarios SET {} WHERE id = ?", sets.join(", "));

        let mut query = sqlx::query(&sql);
        if let Some(nome) = &campos.nome {
            query = query.bind(nome);
        }
        if let Some(cpf) = &campos.cpf {
            query = query.bind(cpf);
        }
        if let Some(cargo) = &campos.cargo {
            query = query.bind(cargo);
        }
        if let Some(setor) = &campos.setor {
            query = query.bind(setor);
        }
        if let Some(email) = &campos.email {
            query = query.bind(email);
        }
        if let Some(telefone) = &campos.telefone {
            query = query.bind(telefone);
        }
        if let Some(ativo) = campos.ativo {
            query = query.bind(ativo);
        }

        query
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                mapear_duplicidade(
                    e,
                    format!(
                        "CPF {} já está em uso",
                        campos.cpf.as_deref().unwrap_or_default()
                    ),
                )
            })?;

        self.buscar(id).await
    }

    async fn desativar(&self, id: &str) -> Result<bool, AppError> {
        let resultado = sqlx::query("UPDATE funcionarios SET ativo = FALSE WHERE id = ? AND ativo = TRUE")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(resultado.rows_affected() > 0)
    }

    async fn listar(
        &self,
        ativo: Option<bool>,
        setor: Option<&str>,
    ) -> Result<Vec<Funcionario>, AppError> {
        let mut conditions = Vec::new();
        if ativo.is_some() {
            conditions.push("ativo = ?");
        }
        if setor.is_some() {
            conditions.push("setor = ?");
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };

        let sql = format!(
            "SELECT {COLUNAS_FUNCIONARIO} FROM funcionarios{where_clause} ORDER BY nome ASC LIMIT ?"
        );

        let mut query = sqlx::query_as::<_, Funcionario>(&sql);
        if let Some(ativo) = ativo {
            query = query.bind(ativo);
        }
        if let Some(setor) = setor {
            query = query.bind(setor);
        }

        let funcionarios = query.bind(LIMITE_LISTAGEM).fetch_all(&self.pool).await?;
        Ok(funcionarios)
    }
}
