use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": "123e4567-e89b-12d3-a456-426614174000",
        "nome": "João Silva",
        "cpf": "123.456.789-00",
        "cargo": "Pedreiro",
        "setor": "Obras",
        "email": "joao@example.com",
        "telefone": "(31) 98765-4321",
        "data_admissao": "2024-01-15",
        "ativo": true
    })
)]
pub struct Funcionario {
    pub id: String,

    #[schema(example = "João Silva")]
    pub nome: String,

    #[schema(example = "123.456.789-00")]
    pub cpf: String,

    #[schema(example = "Pedreiro")]
    pub cargo: String,

    #[schema(example = "Obras")]
    pub setor: String,

    #[schema(nullable = true)]
    pub email: Option<String>,

    #[schema(nullable = true)]
    pub telefone: Option<String>,

    #[schema(example = "2024-01-15", value_type = String, format = "date")]
    pub data_admissao: NaiveDate,

    /// Desligamentos são soft delete: o funcionário vira inativo mas os
    /// registros de frequência permanecem.
    pub ativo: bool,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateFuncionario {
    #[schema(example = "João Silva")]
    pub nome: String,

    #[schema(example = "123.456.789-00")]
    pub cpf: String,

    #[schema(example = "Pedreiro")]
    pub cargo: String,

    #[schema(example = "Obras")]
    pub setor: String,

    pub email: Option<String>,

    pub telefone: Option<String>,

    #[schema(example = "2024-01-15", value_type = String, format = "date")]
    pub data_admissao: NaiveDate,

    #[serde(default = "padrao_ativo")]
    pub ativo: bool,
}

fn padrao_ativo() -> bool {
    true
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateFuncionario {
    pub nome: Option<String>,
    pub cpf: Option<String>,
    pub cargo: Option<String>,
    pub setor: Option<String>,
    pub email: Option<String>,
    pub telefone: Option<String>,
    pub ativo: Option<bool>,
}

impl UpdateFuncionario {
    pub fn is_empty(&self) -> bool {
        self.nome.is_none()
            && self.cpf.is_none()
            && self.cargo.is_none()
            && self.setor.is_none()
            && self.email.is_none()
            && self.telefone.is_none()
            && self.ativo.is_none()
    }
}
