pub mod excel;
pub mod frequencia;
pub mod funcionario;
pub mod logs;
pub mod relatorio;

use actix_web::HttpRequest;

/// IP de origem para a trilha de auditoria: primeiro valor do
/// X-Forwarded-For quando atrás de proxy, senão o peer direto.
pub fn ip_origem(req: &HttpRequest) -> Option<String> {
    if let Some(forwarded) = req
        .headers()
        .get("X-Forwarded-For")
        .and_then(|h| h.to_str().ok())
    {
        if let Some(primeiro) = forwarded.split(',').next() {
            let primeiro = primeiro.trim();
            if !primeiro.is_empty() {
                return Some(primeiro.to_string());
            }
        }
    }

    req.peer_addr().map(|addr| addr.ip().to_string())
}
