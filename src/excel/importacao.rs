//! Importação em massa de frequência a partir de CSV. Cada linha passa
//! pelas mesmas regras do lançamento individual; linhas ruins não
//! interrompem as demais.

use std::sync::Arc;

use serde::Serialize;
use utoipa::ToSchema;

use crate::error::AppError;
use crate::excel::colunas::{resolver_colunas, validar_obrigatorias};
use crate::excel::valores::{limpar_data, limpar_texto};
use crate::model::frequencia::{CreateRegistroFrequencia, TipoDia};
use crate::service::frequencia::FrequenciaService;

/// Conteúdo tabular já separado em cabeçalhos e linhas de dados.
pub struct Planilha {
    pub cabecalhos: Vec<String>,
    pub linhas: Vec<Vec<String>>,
}

/// Decodifica o corpo do upload como CSV. Arquivos fora de UTF-8 são
/// tratados como Latin-1, comum em exports de planilha brasileiros.
pub fn ler_csv(bytes: &[u8]) -> Result<Planilha, AppError> {
    let texto = match std::str::from_utf8(bytes) {
        Ok(texto) => texto.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    };

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(texto.as_bytes());

    let cabecalhos = reader
        .headers()
        .map_err(|e| AppError::Validacao(format!("Erro ao processar arquivo: {e}")))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut linhas = Vec::new();
    for registro in reader.records() {
        let registro =
            registro.map_err(|e| AppError::Validacao(format!("Erro ao processar arquivo: {e}")))?;
        linhas.push(registro.iter().map(str::to_string).collect());
    }

    Ok(Planilha { cabecalhos, linhas })
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErroLinha {
    /// Número da linha no arquivo original (1 é o cabeçalho).
    pub linha: usize,
    pub erro: String,
}

/// Teto de detalhes de erro devolvidos na resposta HTTP; as contagens
/// cobrem sempre o total.
const MAX_ERROS_DETALHE: usize = 10;

#[derive(Debug, Serialize, ToSchema)]
pub struct ResultadoImportacao {
    pub total_processados: usize,
    pub criados: Vec<String>,
    pub erros: Vec<ErroLinha>,
}

impl ResultadoImportacao {
    /// Primeiros erros, limitados a [`MAX_ERROS_DETALHE`].
    pub fn detalhes_erros(&self) -> &[ErroLinha] {
        &self.erros[..self.erros.len().min(MAX_ERROS_DETALHE)]
    }
}

pub struct ImportacaoFrequencia {
    service: Arc<FrequenciaService>,
}

impl ImportacaoFrequencia {
    pub fn new(service: Arc<FrequenciaService>) -> Self {
        Self { service }
    }

    /// Processa a planilha linha a linha. Falta de coluna obrigatória
    /// aborta antes de qualquer gravação; erro de linha só marca a
    /// linha. Linhas sem funcionário e data são puladas em silêncio.
    pub async fn importar(&self, planilha: &Planilha) -> Result<ResultadoImportacao, AppError> {
        let mapa = resolver_colunas(&planilha.cabecalhos);
        validar_obrigatorias(&mapa)?;

        let mut criados = Vec::new();
        let mut erros = Vec::new();
        let mut total_processados = 0;

        for (idx, celulas) in planilha.linhas.iter().enumerate() {
            let linha = idx + 2;

            let funcionario_id = mapa
                .valor("funcionario_id", celulas)
                .and_then(limpar_texto);
            let data_bruta = mapa.valor("data", celulas).and_then(limpar_texto);

            // linha em branco ou de preenchimento parcial de planilha
            let (Some(funcionario_id), Some(data_bruta)) = (funcionario_id, data_bruta) else {
                continue;
            };
            total_processados += 1;

            let Some(data) = limpar_data(&data_bruta) else {
                erros.push(ErroLinha {
                    linha,
                    erro: format!("Data inválida: '{data_bruta}'"),
                });
                continue;
            };

            let dados = CreateRegistroFrequencia {
                funcionario_id,
                data,
                tipo_dia: mapa
                    .valor("tipo_dia", celulas)
                    .and_then(limpar_texto)
                    .map(|t| TipoDia::from_texto(&t))
                    .unwrap_or_default(),
                hora_entrada: mapa.valor("hora_entrada", celulas).and_then(limpar_texto),
                hora_saida: mapa.valor("hora_saida", celulas).and_then(limpar_texto),
                observacao: mapa.valor("observacao", celulas).and_then(limpar_texto),
            };

            match self.service.create(dados).await {
                Ok(registro) => criados.push(registro.id),
                Err(AppError::Banco(e)) => return Err(AppError::Banco(e)),
                Err(e) => erros.push(ErroLinha {
                    linha,
                    erro: e.to_string(),
                }),
            }
        }

        tracing::info!(
            total = total_processados,
            criados = criados.len(),
            erros = erros.len(),
            "Importação de frequência concluída"
        );

        Ok(ResultadoImportacao {
            total_processados,
            criados,
            erros,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::funcionario::CreateFuncionario;
    use crate::service::funcionario::FuncionarioService;
    use crate::store::memoria::{MemFrequenciaStore, MemFuncionarioStore};
    use chrono::NaiveDate;

    async fn fixture() -> (ImportacaoFrequencia, Arc<FrequenciaService>, String) {
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

        let frequencia = Arc::new(FrequenciaService::new(
            Arc::new(MemFrequenciaStore::new()),
            funcionarios,
        ));
        (ImportacaoFrequencia::new(frequencia.clone()), frequencia, joao.id)
    }

    #[actix_web::test]
    async fn importa_csv_simples() {
        let (importacao, frequencia, joao) = fixture().await;
        let csv = format!(
            "funcionario_id,data,hora_entrada,hora_saida\n\
             {joao},2025-01-20,07:00,17:00\n\
             {joao},2025-01-21,07:00,12:00\n"
        );

        let planilha = ler_csv(csv.as_bytes()).unwrap();
        let resultado = importacao.importar(&planilha).await.unwrap();

        assert_eq!(resultado.total_processados, 2);
        assert_eq!(resultado.criados.len(), 2);
        assert!(resultado.erros.is_empty());

        let registros = frequencia.listar_mes(&joao, 2025, 1).await.unwrap();
        assert_eq!(registros.len(), 2);
        assert_eq!(registros[0].total_horas, Some(5.0));
    }

    #[actix_web::test]
    async fn linha_com_funcionario_desconhecido_nao_derruba_as_demais() {
        let (importacao, _, joao) = fixture().await;
        let csv = format!(
            "funcionario_id,data\n\
             {joao},2025-01-20\n\
             {joao},2025-01-21\n\
             fantasma,2025-01-22\n\
             {joao},2025-01-23\n\
             {joao},2025-01-24\n"
        );

        let planilha = ler_csv(csv.as_bytes()).unwrap();
        let resultado = importacao.importar(&planilha).await.unwrap();

        assert_eq!(resultado.total_processados, 5);
        assert_eq!(resultado.criados.len(), 4);
        assert_eq!(resultado.erros.len(), 1);
        assert_eq!(resultado.erros[0].linha, 4);
        assert!(resultado.erros[0].erro.contains("fantasma"));
    }

    #[actix_web::test]
    async fn coluna_obrigatoria_ausente_aborta() {
        let (importacao, _, _) = fixture().await;
        let csv = "hora_entrada,hora_saida\n07:00,17:00\n";

        let planilha = ler_csv(csv.as_bytes()).unwrap();
        let erro = importacao.importar(&planilha).await.unwrap_err();
        assert!(matches!(erro, AppError::Validacao(_)));
        assert!(erro.to_string().contains("funcionario_id"));
    }

    #[actix_web::test]
    async fn linhas_em_branco_sao_puladas() {
        let (importacao, _, joao) = fixture().await;
        let csv = format!(
            "funcionario_id,data\n\
             {joao},2025-01-20\n\
             ,\n\
             ,2025-01-22\n"
        );

        let planilha = ler_csv(csv.as_bytes()).unwrap();
        let resultado = importacao.importar(&planilha).await.unwrap();

        assert_eq!(resultado.total_processados, 1);
        assert_eq!(resultado.criados.len(), 1);
        assert!(resultado.erros.is_empty());
    }

    #[actix_web::test]
    async fn cabecalho_acentuado_e_data_brasileira() {
        let (importacao, frequencia, joao) = fixture().await;
        let csv = format!(
            "Funcionário ID,Dia,Entrada,Saída,Tipo\n\
             {joao},20/01/2025,07:00,17:00,feriado\n"
        );

        let planilha = ler_csv(csv.as_bytes()).unwrap();
        let resultado = importacao.importar(&planilha).await.unwrap();
        assert_eq!(resultado.criados.len(), 1);

        let registros = frequencia.listar_mes(&joao, 2025, 1).await.unwrap();
        assert_eq!(registros[0].data, NaiveDate::from_ymd_opt(2025, 1, 20).unwrap());
        assert_eq!(registros[0].tipo_dia, TipoDia::Feriado);
    }

    #[actix_web::test]
    async fn data_invalida_marca_a_linha() {
        let (importacao, _, joao) = fixture().await;
        let csv = format!(
            "funcionario_id,data\n\
             {joao},ontem\n"
        );

        let planilha = ler_csv(csv.as_bytes()).unwrap();
        let resultado = importacao.importar(&planilha).await.unwrap();

        assert_eq!(resultado.total_processados, 1);
        assert!(resultado.criados.is_empty());
        assert_eq!(resultado.erros[0].linha, 2);
        assert!(resultado.erros[0].erro.contains("Data inválida"));
    }

    #[actix_web::test]
    async fn detalhes_de_erro_limitados_as_contagens_nao() {
        let (importacao, _, _) = fixture().await;
        let mut csv = String::from("funcionario_id,data\n");
        for dia in 1..=12 {
            csv.push_str(&format!("fantasma,2025-01-{dia:02}\n"));
        }

        let planilha = ler_csv(csv.as_bytes()).unwrap();
        let resultado = importacao.importar(&planilha).await.unwrap();

        assert_eq!(resultado.total_processados, 12);
        assert_eq!(resultado.erros.len(), 12);
        assert_eq!(resultado.detalhes_erros().len(), 10);
        assert_eq!(resultado.detalhes_erros()[0].linha, 2);
    }

    #[actix_web::test]
    async fn arquivo_em_latin1_ainda_importa() {
        let (importacao, _, joao) = fixture().await;
        // "Funcionário ID,Dia" gravado em ISO-8859-1
        let mut bytes = b"Funcion\xe1rio ID,Dia\n".to_vec();
        bytes.extend_from_slice(format!("{joao},2025-01-20\n").as_bytes());
        assert!(std::str::from_utf8(&bytes).is_err());

        let planilha = ler_csv(&bytes).unwrap();
        let resultado = importacao.importar(&planilha).await.unwrap();

        assert_eq!(resultado.criados.len(), 1);
        assert!(resultado.erros.is_empty());
    }

    #[actix_web::test]
    async fn linha_duplicada_marca_so_a_duplicata() {
        let (importacao, _, joao) = fixture().await;
        let csv = format!(
            "funcionario_id,data\n\
             {joao},2025-01-20\n\
             {joao},2025-01-20\n"
        );

        let planilha = ler_csv(csv.as_bytes()).unwrap();
        let resultado = importacao.importar(&planilha).await.unwrap();

        assert_eq!(resultado.criados.len(), 1);
        assert_eq!(resultado.erros.len(), 1);
        assert_eq!(resultado.erros[0].linha, 3);
    }
}
