//! Cálculo de horas trabalhadas a partir dos horários de entrada e
//! saída no formato "HH:MM".

use chrono::NaiveTime;

/// Diferença saída - entrada em horas decimais, arredondada a duas
/// casas. `None` quando algum dos horários falta ou não é "HH:MM"
/// válido. Saída anterior à entrada produz valor negativo; turnos que
/// viram a meia-noite não são tratados.
pub fn calcular_horas(hora_entrada: Option<&str>, hora_saida: Option<&str>) -> Option<f64> {
    let entrada = NaiveTime::parse_from_str(hora_entrada?, "%H:%M").ok()?;
    let saida = NaiveTime::parse_from_str(hora_saida?, "%H:%M").ok()?;

    let minutos = saida.signed_duration_since(entrada).num_minutes();
    Some(arredondar(minutos as f64 / 60.0))
}

/// `true` quando `s` tem exatamente a forma "HH:MM" (dígitos e dois
/// pontos nas posições fixas). A validade do valor fica com o chrono.
pub fn formato_valido(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 5
        && bytes[0].is_ascii_digit()
        && bytes[1].is_ascii_digit()
        && bytes[2] == b':'
        && bytes[3].is_ascii_digit()
        && bytes[4].is_ascii_digit()
}

pub fn arredondar(horas: f64) -> f64 {
    (horas * 100.0).round() / 100.0
}
