use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Classificação do dia do registro; alimenta regras de pagamento fora
/// deste sistema.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum TipoDia {
    #[default]
    Util,
    Feriado,
    FimDeSemana,
}

impl TipoDia {
    pub fn as_str(&self) -> &'static str {
        match self {
            TipoDia::Util => "util",
            TipoDia::Feriado => "feriado",
            TipoDia::FimDeSemana => "fim_de_semana",
        }
    }

    /// Conversão tolerante para texto vindo de planilha; valores
    /// desconhecidos caem no padrão `util`.
    pub fn from_texto(texto: &str) -> TipoDia {
        match texto.trim().to_lowercase().as_str() {
            "feriado" => TipoDia::Feriado,
            "fim_de_semana" | "fim de semana" | "domingo" | "sabado" | "sábado" => {
                TipoDia::FimDeSemana
            }
            _ => TipoDia::Util,
        }
    }
}

/// Registro de entrada/saída de um funcionário em um dia.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": "123e4567-e89b-12d3-a456-426614174001",
        "funcionario_id": "123e4567-e89b-12d3-a456-426614174000",
        "nome": "João Silva",
        "data": "2025-01-20",
        "tipo_dia": "util",
        "hora_entrada": "07:00",
        "hora_saida": "17:00",
        "observacao": null,
        "total_horas": 10.0
    })
)]
pub struct RegistroFrequencia {
    pub id: String,

    pub funcionario_id: String,

    /// Nome do funcionário copiado do cadastro no momento da criação.
    /// Não é atualizado em renomeações posteriores.
    #[schema(nullable = true)]
    pub nome: Option<String>,

    #[schema(example = "2025-01-20", value_type = String, format = "date")]
    pub data: NaiveDate,

    pub tipo_dia: TipoDia,

    #[schema(example = "07:00", nullable = true)]
    pub hora_entrada: Option<String>,

    #[schema(example = "17:00", nullable = true)]
    pub hora_saida: Option<String>,

    #[schema(nullable = true)]
    pub observacao: Option<String>,

    /// Horas trabalhadas derivadas de entrada/saída; nula quando algum
    /// dos horários falta ou não é interpretável.
    #[schema(example = 10.0, nullable = true)]
    pub total_horas: Option<f64>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateRegistroFrequencia {
    #[schema(example = "123e4567-e89b-12d3-a456-426614174000")]
    pub funcionario_id: String,

    #[schema(example = "2025-01-20", value_type = String, format = "date")]
    pub data: NaiveDate,

    #[serde(default)]
    pub tipo_dia: TipoDia,

    #[schema(example = "07:00")]
    pub hora_entrada: Option<String>,

    #[schema(example = "17:00")]
    pub hora_saida: Option<String>,

    pub observacao: Option<String>,
}

/// Campos atualizáveis; campos ausentes são mantidos como estão.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateRegistroFrequencia {
    #[schema(example = "08:00")]
    pub hora_entrada: Option<String>,

    #[schema(example = "18:00")]
    pub hora_saida: Option<String>,

    pub tipo_dia: Option<TipoDia>,

    pub observacao: Option<String>,
}

impl UpdateRegistroFrequencia {
    pub fn is_empty(&self) -> bool {
        self.hora_entrada.is_none()
            && self.hora_saida.is_none()
            && self.tipo_dia.is_none()
            && self.observacao.is_none()
    }
}

/// Alterações efetivas aplicadas pelo store. `total_horas` usa dois
/// níveis de `Option`: `Some(None)` grava NULL, `None` não toca o campo.
#[derive(Debug, Clone, Default)]
pub struct PatchFrequencia {
    pub hora_entrada: Option<String>,
    pub hora_saida: Option<String>,
    pub tipo_dia: Option<TipoDia>,
    pub observacao: Option<String>,
    pub total_horas: Option<Option<f64>>,
}

impl PatchFrequencia {
    pub fn is_empty(&self) -> bool {
        self.hora_entrada.is_none()
            && self.hora_saida.is_none()
            && self.tipo_dia.is_none()
            && self.observacao.is_none()
            && self.total_horas.is_none()
    }
}
