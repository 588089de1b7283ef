use sqlx::MySqlPool;

use crate::error::AppError;
use crate::model::log::{LogEntry, LogQuery};

const LIMITE_PADRAO: u32 = 100;
const LIMITE_MAXIMO: u32 = 500;

/// Uma entrada a registrar no log de auditoria.
pub struct NovoLog<'a> {
    pub usuario: &'a str,
    pub acao: String,
    pub tipo: &'a str,
    pub modulo: Option<&'a str>,
    pub status: &'a str,
    pub detalhes: serde_json::Value,
    pub ip_origem: Option<String>,
}

/// Trilha de auditoria das operações mutadoras. Falha de gravação
/// nunca derruba a operação de negócio que a originou.
pub struct LogService {
    pool: MySqlPool,
}

impl LogService {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub async fn registrar(&self, entrada: NovoLog<'_>) {
        let resultado = sqlx::query(
            r#"
            INSERT INTO logs (usuario, acao, tipo, modulo, status, detalhes, ip_origem, data_hora)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(entrada.usuario)
        .bind(&entrada.acao)
        .bind(entrada.tipo)
        .bind(entrada.modulo)
        .bind(entrada.status)
        .bind(sqlx::types::Json(&entrada.detalhes))
        .bind(&entrada.ip_origem)
        .bind(chrono::Utc::now().naive_utc())
        .execute(&self.pool)
        .await;

        if let Err(e) = resultado {
            tracing::warn!(error = %e, acao = %entrada.acao, "Falha ao gravar log de auditoria");
        }
    }

    pub async fn listar(&self, query: &LogQuery) -> Result<Vec<LogEntry>, AppError> {
        let mut conditions = Vec::new();
        if query.usuario.is_some() {
            conditions.push("usuario = ?");
        }
        if query.tipo.is_some() {
            conditions.push("tipo = ?");
        }
        if query.modulo.is_some() {
            conditions.push("modulo = ?");
        }
        if query.status.is_some() {
            conditions.push("status = ?");
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };

        let sql = format!(
            "SELECT id, usuario, acao, tipo, modulo, status, detalhes, ip_origem, data_hora \
             FROM logs{where_clause} ORDER BY data_hora DESC LIMIT ?"
        );

        let limite = query
            .limite
            .unwrap_or(LIMITE_PADRAO)
            .clamp(1, LIMITE_MAXIMO);

        let mut consulta = sqlx::query_as::<_, LogEntry>(&sql);
        if let Some(usuario) = &query.usuario {
            consulta = consulta.bind(usuario);
        }
        if let Some(tipo) = &query.tipo {
            consulta = consulta.bind(tipo);
        }
        if let Some(modulo) = &query.modulo {
            consulta = consulta.bind(modulo);
        }
        if let Some(status) = &query.status {
            consulta = consulta.bind(status);
        }

        let entradas = consulta.bind(limite).fetch_all(&self.pool).await?;
        Ok(entradas)
    }
}
