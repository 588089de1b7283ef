//! Limpeza de células vindas de planilha. Valores impossíveis de
//! interpretar caem em padrões neutros em vez de abortar a linha,
//! exceto datas, que são obrigatórias onde usadas.

use chrono::NaiveDate;

pub fn limpar_texto(bruto: &str) -> Option<String> {
    let limpo = bruto.trim();
    if limpo.is_empty() {
        None
    } else {
        Some(limpo.to_string())
    }
}

/// Números monetários/decimais em convenção brasileira ("R$ 1.234,56")
/// ou internacional ("1234.56"). Ilegível vira 0.0.
pub fn limpar_valor(bruto: &str) -> f64 {
    let mut limpo = bruto.trim().replace("R$", "").trim().to_string();

    if limpo.contains(',') {
        // ponto é separador de milhar, vírgula é decimal
        limpo = limpo.replace('.', "").replace(',', ".");
    }

    limpo.parse().unwrap_or(0.0)
}

pub fn limpar_inteiro(bruto: &str) -> i64 {
    limpar_valor(bruto) as i64
}

/// Datas em "YYYY-MM-DD", "DD/MM/YYYY" ou "DD-MM-YYYY", ignorando
/// qualquer componente de hora colado na célula. Células puramente
/// numéricas são lidas como serial de data do Excel.
pub fn limpar_data(bruto: &str) -> Option<NaiveDate> {
    let so_data = bruto
        .trim()
        .split(['T', ' '])
        .next()
        .unwrap_or_default();

    for formato in ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y"] {
        if let Ok(data) = NaiveDate::parse_from_str(so_data, formato) {
            return Some(data);
        }
    }

    // serial do Excel: dias desde 1899-12-30
    if so_data.chars().all(|c| c.is_ascii_digit() || c == '.') {
        let serial = limpar_inteiro(so_data);
        if serial > 0 {
            return NaiveDate::from_ymd_opt(1899, 12, 30)
                .and_then(|base| base.checked_add_days(chrono::Days::new(serial as u64)));
        }
    }

    None
}
