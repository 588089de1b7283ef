use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use serde_json::json;

use crate::error::AppError;
use crate::model::frequencia::RegistroFrequencia;
use crate::model::relatorio::{
    Periodo, RelatorioRequest, RelatorioResponse, ResumoFuncionario, TipoRelatorio,
    TotaisFrequencia,
};
use crate::service::frequencia::FrequenciaService;
use crate::service::funcionario::FuncionarioService;
use crate::service::horas::arredondar;
use crate::store::FiltroFrequencia;

/// Agregação de frequência por período, para consumo em tela e export.
pub struct RelatorioService {
    frequencia: Arc<FrequenciaService>,
    funcionarios: Arc<FuncionarioService>,
}

impl RelatorioService {
    pub fn new(frequencia: Arc<FrequenciaService>, funcionarios: Arc<FuncionarioService>) -> Self {
        Self { frequencia, funcionarios }
    }

    pub async fn gerar(&self, req: RelatorioRequest) -> Result<RelatorioResponse, AppError> {
        if req.data_fim < req.data_inicio {
            return Err(AppError::Validacao(
                "Data final anterior à data inicial".to_string(),
            ));
        }

        match req.tipo {
            TipoRelatorio::Frequencia => self.relatorio_frequencia(req).await,
            TipoRelatorio::Geral => self.relatorio_geral(req).await,
        }
    }

    /// Resumo por funcionário dos registros do período, com filtro
    /// opcional por funcionário ou por setor.
    async fn relatorio_frequencia(
        &self,
        req: RelatorioRequest,
    ) -> Result<RelatorioResponse, AppError> {
        let filtro = FiltroFrequencia {
            funcionario_id: req.funcionario_id.clone(),
            data_inicio: Some(req.data_inicio),
            data_fim: Some(req.data_fim),
        };
        let mut registros = self.frequencia.listar(filtro).await?;

        if let Some(setor) = &req.setor {
            let do_setor: HashSet<String> = self
                .funcionarios
                .listar(Some(true), Some(setor))
                .await?
                .into_iter()
                .map(|f| f.id)
                .collect();
            registros.retain(|r| do_setor.contains(&r.funcionario_id));
        }

        let (resumos, totais) = agregar(&registros);

        Ok(RelatorioResponse {
            tipo: TipoRelatorio::Frequencia,
            periodo: Periodo {
                data_inicio: req.data_inicio,
                data_fim: req.data_fim,
            },
            dados: resumos
                .into_iter()
                .map(|r| serde_json::to_value(r).unwrap_or_default())
                .collect(),
            totalizadores: serde_json::to_value(totais).unwrap_or_default(),
            gerado_em: chrono::Utc::now().to_rfc3339(),
        })
    }

    /// Visão gerencial: censo de funcionários ativos por setor mais o
    /// total de horas do período.
    async fn relatorio_geral(&self, req: RelatorioRequest) -> Result<RelatorioResponse, AppError> {
        let ativos = self.funcionarios.listar(Some(true), None).await?;

        let mut por_setor: BTreeMap<String, u64> = BTreeMap::new();
        for funcionario in &ativos {
            *por_setor.entry(funcionario.setor.clone()).or_default() += 1;
        }

        let filtro = FiltroFrequencia {
            funcionario_id: None,
            data_inicio: Some(req.data_inicio),
            data_fim: Some(req.data_fim),
        };
        let registros = self.frequencia.listar(filtro).await?;
        let (_, totais) = agregar(&registros);

        let dados = por_setor
            .into_iter()
            .map(|(setor, quantidade)| json!({ "setor": setor, "funcionarios_ativos": quantidade }))
            .collect();

        Ok(RelatorioResponse {
            tipo: TipoRelatorio::Geral,
            periodo: Periodo {
                data_inicio: req.data_inicio,
                data_fim: req.data_fim,
            },
            dados,
            totalizadores: json!({
                "funcionarios_ativos": ativos.len(),
                "total_registros": totais.total_registros,
                "total_horas": totais.total_horas,
            }),
            gerado_em: chrono::Utc::now().to_rfc3339(),
        })
    }
}

/// Agrupa registros por funcionário. Horas nulas contam como zero;
/// dia trabalhado exige entrada e saída preenchidas.
pub(crate) fn agregar(
    registros: &[RegistroFrequencia],
) -> (Vec<ResumoFuncionario>, TotaisFrequencia) {
    let mut por_funcionario: BTreeMap<&str, ResumoFuncionario> = BTreeMap::new();
    let mut horas_brutas = 0.0_f64;

    for registro in registros {
        let resumo = por_funcionario
            .entry(registro.funcionario_id.as_str())
            .or_insert_with(|| ResumoFuncionario {
                funcionario_id: registro.funcionario_id.clone(),
                nome: registro.nome.clone(),
                total_registros: 0,
                total_horas: 0.0,
                dias_trabalhados: 0,
            });

        resumo.total_registros += 1;
        let horas = registro.total_horas.unwrap_or(0.0);
        resumo.total_horas += horas;
        horas_brutas += horas;
        if registro.hora_entrada.is_some() && registro.hora_saida.is_some() {
            resumo.dias_trabalhados += 1;
        }
    }

    let resumos: Vec<ResumoFuncionario> = por_funcionario
        .into_values()
        .map(|mut r| {
            r.total_horas = arredondar(r.total_horas);
            r
        })
        .collect();

    let totais = TotaisFrequencia {
        total_registros: registros.len() as u64,
        total_horas: arredondar(horas_brutas),
        total_funcionarios: resumos.len() as u64,
    };

    (resumos, totais)
}
