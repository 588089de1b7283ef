use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TipoRelatorio {
    Frequencia,
    Geral,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "tipo": "frequencia",
        "data_inicio": "2025-01-01",
        "data_fim": "2025-01-31",
        "setor": "Obras"
    })
)]
pub struct RelatorioRequest {
    pub tipo: TipoRelatorio,

    #[schema(example = "2025-01-01", value_type = String, format = "date")]
    pub data_inicio: NaiveDate,

    #[schema(example = "2025-01-31", value_type = String, format = "date")]
    pub data_fim: NaiveDate,

    pub funcionario_id: Option<String>,

    pub setor: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Periodo {
    #[schema(value_type = String, format = "date")]
    pub data_inicio: NaiveDate,

    #[schema(value_type = String, format = "date")]
    pub data_fim: NaiveDate,
}

/// Acumulado de um funcionário dentro do período consultado.
#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
pub struct ResumoFuncionario {
    pub funcionario_id: String,
    pub nome: Option<String>,
    pub total_registros: u64,
    pub total_horas: f64,
    /// Dias com entrada e saída preenchidas.
    pub dias_trabalhados: u64,
}

#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
pub struct TotaisFrequencia {
    pub total_registros: u64,
    pub total_horas: f64,
    pub total_funcionarios: u64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RelatorioResponse {
    pub tipo: TipoRelatorio,

    pub periodo: Periodo,

    #[schema(value_type = Vec<Object>)]
    pub dados: Vec<serde_json::Value>,

    #[schema(value_type = Object)]
    pub totalizadores: serde_json::Value,

    #[schema(example = "2025-02-01T12:00:00+00:00")]
    pub gerado_em: String,
}
