//! Geração de CSV para download, com cabeçalhos em português no mesmo
//! vocabulário aceito pela importação.

use crate::error::AppError;
use crate::model::frequencia::RegistroFrequencia;
use crate::model::funcionario::Funcionario;

fn erro_csv(e: impl std::fmt::Display) -> AppError {
    AppError::Interno(format!("Erro ao gerar arquivo: {e}"))
}

pub fn exportar_frequencia_csv(registros: &[RegistroFrequencia]) -> Result<Vec<u8>, AppError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record([
            "Funcionário ID",
            "Nome",
            "Data",
            "Tipo Dia",
            "Hora Entrada",
            "Hora Saída",
            "Observação",
            "Total Horas",
        ])
        .map_err(erro_csv)?;

    for registro in registros {
        writer
            .write_record([
                registro.funcionario_id.as_str(),
                registro.nome.as_deref().unwrap_or_default(),
                &registro.data.to_string(),
                registro.tipo_dia.as_str(),
                registro.hora_entrada.as_deref().unwrap_or_default(),
                registro.hora_saida.as_deref().unwrap_or_default(),
                registro.observacao.as_deref().unwrap_or_default(),
                &registro
                    .total_horas
                    .map(|h| format!("{h:.2}"))
                    .unwrap_or_default(),
            ])
            .map_err(erro_csv)?;
    }

    writer.into_inner().map_err(erro_csv)
}

pub fn exportar_funcionarios_csv(funcionarios: &[Funcionario]) -> Result<Vec<u8>, AppError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record([
            "ID",
            "Nome",
            "CPF",
            "Cargo",
            "Setor",
            "Email",
            "Telefone",
            "Data Admissão",
            "Ativo",
        ])
        .map_err(erro_csv)?;

    for funcionario in funcionarios {
        writer
            .write_record([
                funcionario.id.as_str(),
                &funcionario.nome,
                &funcionario.cpf,
                &funcionario.cargo,
                &funcionario.setor,
                funcionario.email.as_deref().unwrap_or_default(),
                funcionario.telefone.as_deref().unwrap_or_default(),
                &funcionario.data_admissao.to_string(),
                if funcionario.ativo { "Sim" } else { "Não" },
            ])
            .map_err(erro_csv)?;
    }

    writer.into_inner().map_err(erro_csv)
}

/// Nome de download com carimbo de data/hora local.
pub fn nome_arquivo(prefixo: &str) -> String {
    format!("{prefixo}_{}.csv", chrono::Local::now().format("%Y%m%d_%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::frequencia::TipoDia;
    use chrono::NaiveDate;

    #[test]
    fn frequencia_com_campos_nulos() {
        let registros = vec![RegistroFrequencia {
            id: "r-1".to_string(),
            funcionario_id: "f-1".to_string(),
            nome: Some("João Silva".to_string()),
            data: NaiveDate::from_ymd_opt(2025, 1, 20).unwrap(),
            tipo_dia: TipoDia::Util,
            hora_entrada: Some("07:00".to_string()),
            hora_saida: None,
            observacao: None,
            total_horas: None,
        }];

        let bytes = exportar_frequencia_csv(&registros).unwrap();
        let texto = String::from_utf8(bytes).unwrap();
        let mut linhas = texto.lines();

        assert!(linhas.next().unwrap().starts_with("Funcionário ID,Nome"));
        assert_eq!(linhas.next().unwrap(), "f-1,João Silva,2025-01-20,util,07:00,,,");
    }

    #[test]
    fn frequencia_formata_horas_com_duas_casas() {
        let registros = vec![RegistroFrequencia {
            id: "r-1".to_string(),
            funcionario_id: "f-1".to_string(),
            nome: None,
            data: NaiveDate::from_ymd_opt(2025, 1, 20).unwrap(),
            tipo_dia: TipoDia::Feriado,
            hora_entrada: Some("08:00".to_string()),
            hora_saida: Some("12:30".to_string()),
            observacao: Some("meio período".to_string()),
            total_horas: Some(4.5),
        }];

        let bytes = exportar_frequencia_csv(&registros).unwrap();
        let texto = String::from_utf8(bytes).unwrap();
        assert!(texto.contains(",4.50"));
        assert!(texto.contains(",feriado,"));
    }

    #[test]
    fn funcionarios_marcam_ativo_em_portugues() {
        let funcionarios = vec![Funcionario {
            id: "f-1".to_string(),
            nome: "João Silva".to_string(),
            cpf: "111.111.111-11".to_string(),
            cargo: "Pedreiro".to_string(),
            setor: "Obras".to_string(),
            email: None,
            telefone: None,
            data_admissao: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            ativo: false,
        }];

        let bytes = exportar_funcionarios_csv(&funcionarios).unwrap();
        let texto = String::from_utf8(bytes).unwrap();
        assert!(texto.lines().nth(1).unwrap().ends_with(",Não"));
    }

    #[test]
    fn nome_de_arquivo_carrega_prefixo_e_extensao() {
        let nome = nome_arquivo("frequencia");
        assert!(nome.starts_with("frequencia_"));
        assert!(nome.ends_with(".csv"));
    }
}
