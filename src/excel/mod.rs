pub mod colunas;
pub mod exportacao;
pub mod importacao;
pub mod valores;
