pub mod frequencia;
pub mod funcionario;
pub mod log;
pub mod relatorio;
pub mod role;
