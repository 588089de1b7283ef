use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Uma entrada do log de auditoria, gravada a cada operação mutadora
/// ou tentativa de importação.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct LogEntry {
    pub id: u64,

    #[schema(example = "maria")]
    pub usuario: String,

    #[schema(example = "Importação de frequência via frequencia_jan.csv")]
    pub acao: String,

    #[schema(example = "import")]
    pub tipo: String,

    #[schema(example = "frequencia", nullable = true)]
    pub modulo: Option<String>,

    #[schema(example = "sucesso")]
    pub status: String,

    #[schema(value_type = Object)]
    pub detalhes: sqlx::types::Json<serde_json::Value>,

    #[schema(nullable = true)]
    pub ip_origem: Option<String>,

    #[schema(value_type = String, format = "date-time")]
    pub data_hora: NaiveDateTime,
}

#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct LogQuery {
    pub usuario: Option<String>,
    pub tipo: Option<String>,
    pub modulo: Option<String>,
    pub status: Option<String>,
    /// Máximo de entradas retornadas (padrão 100, teto 500).
    pub limite: Option<u32>,
}
