//! Reconhecimento de cabeçalhos de planilha. Os arquivos chegam com
//! variações de acento, caixa e apelidos de coluna; tudo é normalizado
//! antes de casar com a tabela de aliases.

use std::collections::HashMap;

use crate::error::AppError;

/// Campo canônico -> apelidos aceitos (já em forma normalizada).
pub const COLUNAS_FREQUENCIA: &[(&str, &[&str])] = &[
    (
        "funcionario_id",
        &["funcionario_id", "funcionarioid", "id_funcionario", "funcionario", "id"],
    ),
    ("data", &["data", "date", "dia"]),
    ("hora_entrada", &["hora_entrada", "horaentrada", "entrada", "checkin"]),
    ("hora_saida", &["hora_saida", "horasaida", "saida", "checkout"]),
    ("tipo_dia", &["tipo_dia", "tipodia", "tipo"]),
    ("observacao", &["observacao", "observacoes", "obs", "notas"]),
];

pub const OBRIGATORIAS: &[&str] = &["funcionario_id", "data"];

/// Minúsculas, sem acento, espaços viram underscore.
pub fn normalizar(cabecalho: &str) -> String {
    let mut saida = String::with_capacity(cabecalho.len());
    let mut anterior_era_espaco = false;

    for c in cabecalho.trim().to_lowercase().chars() {
        let mapeado = match c {
            'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            'ç' => 'c',
            c if c.is_whitespace() => {
                if !anterior_era_espaco {
                    saida.push('_');
                }
                anterior_era_espaco = true;
                continue;
            }
            c => c,
        };
        anterior_era_espaco = false;
        saida.push(mapeado);
    }

    saida
}

/// Posições das colunas reconhecidas dentro da planilha.
pub struct MapaColunas {
    posicoes: HashMap<&'static str, usize>,
}

impl MapaColunas {
    /// Valor da célula do campo na linha, ou `None` quando a coluna não
    /// existe na planilha.
    pub fn valor<'a>(&self, campo: &str, linha: &'a [String]) -> Option<&'a str> {
        self.posicoes
            .get(campo)
            .and_then(|&idx| linha.get(idx))
            .map(String::as_str)
    }

    pub fn contem(&self, campo: &str) -> bool {
        self.posicoes.contains_key(campo)
    }
}

pub fn resolver_colunas(cabecalhos: &[String]) -> MapaColunas {
    let mut posicoes = HashMap::new();

    for (idx, cabecalho) in cabecalhos.iter().enumerate() {
        let normalizado = normalizar(cabecalho);
        for (campo, apelidos) in COLUNAS_FREQUENCIA {
            if !posicoes.contains_key(campo) && apelidos.contains(&normalizado.as_str()) {
                posicoes.insert(*campo, idx);
            }
        }
    }

    MapaColunas { posicoes }
}

pub fn validar_obrigatorias(mapa: &MapaColunas) -> Result<(), AppError> {
    let ausentes: Vec<&str> = OBRIGATORIAS
        .iter()
        .copied()
        .filter(|campo| !mapa.contem(campo))
        .collect();

    if ausentes.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validacao(format!(
            "Colunas obrigatórias ausentes: {}",
            ausentes.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normaliza_acentos_e_espacos() {
        assert_eq!(normalizar("Funcionário ID"), "funcionario_id");
        assert_eq!(normalizar("  Observação  "), "observacao");
        assert_eq!(normalizar("HORA   ENTRADA"), "hora_entrada");
        assert_eq!(normalizar("data"), "data");
    }

    fn cabecalhos(itens: &[&str]) -> Vec<String> {
        itens.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn resolve_apelidos() {
        let mapa = resolver_colunas(&cabecalhos(&["ID Funcionário", "Dia", "Entrada", "Saída"]));

        let linha = cabecalhos(&["f-1", "2025-01-20", "07:00", "17:00"]);
        assert_eq!(mapa.valor("funcionario_id", &linha), Some("f-1"));
        assert_eq!(mapa.valor("data", &linha), Some("2025-01-20"));
        assert_eq!(mapa.valor("hora_entrada", &linha), Some("07:00"));
        assert_eq!(mapa.valor("hora_saida", &linha), Some("17:00"));
        assert_eq!(mapa.valor("observacao", &linha), None);
    }

    #[test]
    fn primeira_coluna_casada_vence() {
        // "id" e "funcionario" apelidam o mesmo campo; vale a primeira
        let mapa = resolver_colunas(&cabecalhos(&["id", "funcionario"]));
        let linha = cabecalhos(&["a", "b"]);
        assert_eq!(mapa.valor("funcionario_id", &linha), Some("a"));
    }

    #[test]
    fn obrigatorias_ausentes_listadas() {
        let mapa = resolver_colunas(&cabecalhos(&["Entrada", "Saída"]));
        let erro = validar_obrigatorias(&mapa).unwrap_err();
        assert_eq!(
            erro.to_string(),
            "Colunas obrigatórias ausentes: funcionario_id, data"
        );
    }

    #[test]
    fn obrigatorias_presentes_passam() {
        let mapa = resolver_colunas(&cabecalhos(&["Funcionário", "Data"]));
        assert!(validar_obrigatorias(&mapa).is_ok());
    }
}
