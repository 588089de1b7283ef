use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use uuid::Uuid;

use crate::error::AppError;
use crate::model::frequencia::{
    CreateRegistroFrequencia, PatchFrequencia, RegistroFrequencia, UpdateRegistroFrequencia,
};
use crate::service::funcionario::FuncionarioService;
use crate::service::horas::{calcular_horas, formato_valido};
use crate::store::{FiltroFrequencia, FrequenciaStore};

/// Regras de negócio dos registros de frequência: um registro por
/// funcionário por dia, horas totais derivadas de entrada/saída.
pub struct FrequenciaService {
    store: Arc<dyn FrequenciaStore>,
    funcionarios: Arc<FuncionarioService>,
}

impl FrequenciaService {
    pub fn new(store: Arc<dyn FrequenciaStore>, funcionarios: Arc<FuncionarioService>) -> Self {
        Self { store, funcionarios }
    }

    fn validar_horario(rotulo: &str, valor: Option<&str>) -> Result<(), AppError> {
        match valor {
            Some(v) if !formato_valido(v) => Err(AppError::Validacao(format!(
                "{rotulo} inválida: '{v}' (esperado HH:MM)"
            ))),
            _ => Ok(()),
        }
    }

    pub async fn create(
        &self,
        dados: CreateRegistroFrequencia,
    ) -> Result<RegistroFrequencia, AppError> {
        let funcionario = self
            .funcionarios
            .resolver(&dados.funcionario_id)
            .await?
            .ok_or_else(|| {
                AppError::NaoEncontrado(format!(
                    "Funcionário {} não encontrado",
                    dados.funcionario_id
                ))
            })?;

        Self::validar_horario("Hora de entrada", dados.hora_entrada.as_deref())?;
        Self::validar_horario("Hora de saída", dados.hora_saida.as_deref())?;

        // Pré-checagem para dar mensagem com o nome; a corrida residual
        // é fechada pelo índice único do store.
        if self
            .store
            .buscar_por_dia(&dados.funcionario_id, dados.data)
            .await?
            .is_some()
        {
            return Err(AppError::Conflito(format!(
                "Já existe registro de frequência para {} em {}",
                funcionario.nome, dados.data
            )));
        }

        let total_horas =
            calcular_horas(dados.hora_entrada.as_deref(), dados.hora_saida.as_deref());

        let registro = RegistroFrequencia {
            id: Uuid::new_v4().to_string(),
            funcionario_id: dados.funcionario_id,
            nome: Some(funcionario.nome),
            data: dados.data,
            tipo_dia: dados.tipo_dia,
            hora_entrada: dados.hora_entrada,
            hora_saida: dados.hora_saida,
            observacao: dados.observacao,
            total_horas,
        };

        self.store.inserir(&registro).await?;
        tracing::info!(
            registro_id = %registro.id,
            funcionario_id = %registro.funcionario_id,
            data = %registro.data,
            "Registro de frequência criado"
        );
        Ok(registro)
    }

    pub async fn get(&self, id: &str) -> Result<Option<RegistroFrequencia>, AppError> {
        self.store.buscar(id).await
    }

    /// Atualização parcial. Quando algum horário muda, o total de horas
    /// é recalculado combinando o patch com os valores já gravados.
    pub async fn update(
        &self,
        id: &str,
        dados: UpdateRegistroFrequencia,
    ) -> Result<Option<RegistroFrequencia>, AppError> {
        if dados.is_empty() {
            return self.store.buscar(id).await;
        }

        Self::validar_horario("Hora de entrada", dados.hora_entrada.as_deref())?;
        Self::validar_horario("Hora de saída", dados.hora_saida.as_deref())?;

        let Some(atual) = self.store.buscar(id).await? else {
            return Ok(None);
        };

        let mexeu_em_horario = dados.hora_entrada.is_some() || dados.hora_saida.is_some();

        let mut patch = PatchFrequencia {
            hora_entrada: dados.hora_entrada,
            hora_saida: dados.hora_saida,
            tipo_dia: dados.tipo_dia,
            observacao: dados.observacao,
            total_horas: None,
        };

        if mexeu_em_horario {
            let entrada = patch
                .hora_entrada
                .as_deref()
                .or(atual.hora_entrada.as_deref());
            let saida = patch.hora_saida.as_deref().or(atual.hora_saida.as_deref());
            patch.total_horas = Some(calcular_horas(entrada, saida));
        }

        let atualizado = self.store.atualizar(id, &patch).await?;
        if atualizado.is_some() {
            tracing::info!(registro_id = %id, "Registro de frequência atualizado");
        }
        Ok(atualizado)
    }

    pub async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let removido = self.store.remover(id).await?;
        if removido {
            tracing::info!(registro_id = %id, "Registro de frequência removido");
        }
        Ok(removido)
    }

    pub async fn listar(
        &self,
        filtro: FiltroFrequencia,
    ) -> Result<Vec<RegistroFrequencia>, AppError> {
        self.store.listar(&filtro).await
    }

    /// Registros do funcionário no mês civil dado, do primeiro ao
    /// último dia.
    pub async fn listar_mes(
        &self,
        funcionario_id: &str,
        ano: i32,
        mes: u32,
    ) -> Result<Vec<RegistroFrequencia>, AppError> {
        let inicio = NaiveDate::from_ymd_opt(ano, mes, 1)
            .ok_or_else(|| AppError::Validacao(format!("Mês inválido: {ano}-{mes:02}")))?;

        let proximo = if inicio.month() == 12 {
            NaiveDate::from_ymd_opt(inicio.year() + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(inicio.year(), inicio.month() + 1, 1)
        }
        .ok_or_else(|| AppError::Interno("data fora do intervalo suportado".to_string()))?;

        let filtro = FiltroFrequencia {
            funcionario_id: Some(funcionario_id.to_string()),
            data_inicio: Some(inicio),
            data_fim: proximo.pred_opt(),
        };
        self.store.listar(&filtro).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::frequencia::TipoDia;
    use crate::model::funcionario::CreateFuncionario;
    use crate::store::memoria::{MemFrequenciaStore, MemFuncionarioStore};

    async fn fixture() -> (FrequenciaService, String) {
        let funcionarios = Arc::new(FuncionarioService::new(Arc::new(
            MemFuncionarioStore::new(),
        )));
        let joao = funcionarios
            .create(CreateFuncionario {
                nome: "João Silva".to_string(),
                cpf: "111.111.111-11".to_string(),
                cargo: "Pedreiro".to_string(),
                setor: "Obras".to_string(),
                email: None,
                telefone: None,
                data_admissao: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
                ativo: true,
            })
            .await
            .unwrap();

        let service = FrequenciaService::new(Arc::new(MemFrequenciaStore::new()), funcionarios);
        (service, joao.id)
    }

    fn registro(funcionario_id: &str, data: NaiveDate) -> CreateRegistroFrequencia {
        CreateRegistroFrequencia {
            funcionario_id: funcionario_id.to_string(),
            data,
            tipo_dia: TipoDia::Util,
            hora_entrada: Some("07:00".to_string()),
            hora_saida: Some("17:00".to_string()),
            observacao: None,
        }
    }

    fn dia(ano: i32, mes: u32, dia: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(ano, mes, dia).unwrap()
    }

    #[actix_web::test]
    async fn create_calcula_horas_e_copia_nome() {
        let (svc, joao) = fixture().await;
        let criado = svc.create(registro(&joao, dia(2025, 1, 20))).await.unwrap();

        assert_eq!(criado.total_horas, Some(10.0));
        assert_eq!(criado.nome.as_deref(), Some("João Silva"));
    }

    #[actix_web::test]
    async fn create_sem_horario_fica_sem_total() {
        let (svc, joao) = fixture().await;
        let mut dados = registro(&joao, dia(2025, 1, 20));
        dados.hora_saida = None;

        let criado = svc.create(dados).await.unwrap();
        assert_eq!(criado.total_horas, None);
    }

    #[actix_web::test]
    async fn create_exige_funcionario_existente() {
        let (svc, _) = fixture().await;
        let erro = svc
            .create(registro("desconhecido", dia(2025, 1, 20)))
            .await
            .unwrap_err();
        assert!(matches!(erro, AppError::NaoEncontrado(_)));
    }

    #[actix_web::test]
    async fn create_rejeita_horario_malformado() {
        let (svc, joao) = fixture().await;
        let mut dados = registro(&joao, dia(2025, 1, 20));
        dados.hora_entrada = Some("7h30".to_string());

        let erro = svc.create(dados).await.unwrap_err();
        assert!(matches!(erro, AppError::Validacao(_)));
    }

    #[actix_web::test]
    async fn segundo_registro_no_mesmo_dia_conflita() {
        let (svc, joao) = fixture().await;
        svc.create(registro(&joao, dia(2025, 1, 20))).await.unwrap();

        let erro = svc.create(registro(&joao, dia(2025, 1, 20))).await.unwrap_err();
        assert!(matches!(erro, AppError::Conflito(_)));

        // outro dia segue livre
        svc.create(registro(&joao, dia(2025, 1, 21))).await.unwrap();
    }

    #[actix_web::test]
    async fn update_so_de_observacao_preserva_horas() {
        let (svc, joao) = fixture().await;
        let criado = svc.create(registro(&joao, dia(2025, 1, 20))).await.unwrap();

        let dados = UpdateRegistroFrequencia {
            observacao: Some("chegou de carona".to_string()),
            ..Default::default()
        };
        let atualizado = svc.update(&criado.id, dados).await.unwrap().unwrap();

        assert_eq!(atualizado.total_horas, Some(10.0));
        assert_eq!(atualizado.observacao.as_deref(), Some("chegou de carona"));
    }

    #[actix_web::test]
    async fn update_de_entrada_recalcula_com_saida_gravada() {
        let (svc, joao) = fixture().await;
        let criado = svc.create(registro(&joao, dia(2025, 1, 20))).await.unwrap();

        let dados = UpdateRegistroFrequencia {
            hora_entrada: Some("08:00".to_string()),
            ..Default::default()
        };
        let atualizado = svc.update(&criado.id, dados).await.unwrap().unwrap();

        assert_eq!(atualizado.total_horas, Some(9.0));
    }

    #[actix_web::test]
    async fn update_de_horario_sem_par_zera_total() {
        let (svc, joao) = fixture().await;
        let mut dados = registro(&joao, dia(2025, 1, 20));
        dados.hora_entrada = None;
        dados.hora_saida = None;
        let criado = svc.create(dados).await.unwrap();

        let so_entrada = UpdateRegistroFrequencia {
            hora_entrada: Some("07:00".to_string()),
            ..Default::default()
        };
        let atualizado = svc.update(&criado.id, so_entrada).await.unwrap().unwrap();

        assert_eq!(atualizado.hora_entrada.as_deref(), Some("07:00"));
        assert_eq!(atualizado.total_horas, None);
    }

    #[actix_web::test]
    async fn update_vazio_devolve_registro_intacto() {
        let (svc, joao) = fixture().await;
        let criado = svc.create(registro(&joao, dia(2025, 1, 20))).await.unwrap();

        let atualizado = svc
            .update(&criado.id, UpdateRegistroFrequencia::default())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(atualizado.total_horas, criado.total_horas);
        assert_eq!(atualizado.hora_entrada, criado.hora_entrada);
    }

    #[actix_web::test]
    async fn update_de_id_desconhecido_devolve_none() {
        let (svc, _) = fixture().await;
        let dados = UpdateRegistroFrequencia {
            observacao: Some("x".to_string()),
            ..Default::default()
        };
        assert!(svc.update("nao-existe", dados).await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn delete_e_idempotente_no_retorno() {
        let (svc, joao) = fixture().await;
        let criado = svc.create(registro(&joao, dia(2025, 1, 20))).await.unwrap();

        assert!(svc.delete(&criado.id).await.unwrap());
        assert!(!svc.delete(&criado.id).await.unwrap());
    }

    #[actix_web::test]
    async fn listar_mes_cobre_o_mes_inteiro() {
        let (svc, joao) = fixture().await;
        svc.create(registro(&joao, dia(2025, 1, 1))).await.unwrap();
        svc.create(registro(&joao, dia(2025, 1, 31))).await.unwrap();
        svc.create(registro(&joao, dia(2025, 2, 1))).await.unwrap();

        let janeiro = svc.listar_mes(&joao, 2025, 1).await.unwrap();
        assert_eq!(janeiro.len(), 2);
        // ordenação decrescente por data
        assert_eq!(janeiro[0].data, dia(2025, 1, 31));
        assert_eq!(janeiro[1].data, dia(2025, 1, 1));
    }

    #[actix_web::test]
    async fn listar_mes_vira_o_ano_em_dezembro() {
        let (svc, joao) = fixture().await;
        svc.create(registro(&joao, dia(2024, 12, 31))).await.unwrap();
        svc.create(registro(&joao, dia(2025, 1, 1))).await.unwrap();

        let dezembro = svc.listar_mes(&joao, 2024, 12).await.unwrap();
        assert_eq!(dezembro.len(), 1);
        assert_eq!(dezembro[0].data, dia(2024, 12, 31));
    }

    #[actix_web::test]
    async fn listar_mes_rejeita_mes_invalido() {
        let (svc, joao) = fixture().await;
        let erro = svc.listar_mes(&joao, 2025, 13).await.unwrap_err();
        assert!(matches!(erro, AppError::Validacao(_)));
    }
}
