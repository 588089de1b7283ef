pub mod frequencia;
pub mod funcionario;
pub mod horas;
pub mod log;
pub mod relatorio;
