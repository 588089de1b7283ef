//! Implementações em memória dos stores, usadas apenas nos testes de
//! serviço. Mantêm as mesmas garantias de unicidade do MySQL.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::AppError;
use crate::model::frequencia::{PatchFrequencia, RegistroFrequencia};
use crate::model::funcionario::{Funcionario, UpdateFuncionario};
use crate::store::{FiltroFrequencia, FrequenciaStore, FuncionarioStore, LIMITE_LISTAGEM};

#[derive(Default)]
pub struct MemFrequenciaStore {
    registros: Mutex<Vec<RegistroFrequencia>>,
}

impl MemFrequenciaStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FrequenciaStore for MemFrequenciaStore {
    async fn inserir(&self, registro: &RegistroFrequencia) -> Result<(), AppError> {
        let mut registros = self.registros.lock().unwrap();
        if registros
            .iter()
            .any(|r| r.funcionario_id == registro.funcionario_id && r.data == registro.data)
        {
            return Err(AppError::Conflito(format!(
                "Já existe registro de frequência para o funcionário {} em {}",
                registro.funcionario_id, registro.data
            )));
        }
        registros.push(registro.clone());
        Ok(())
    }

    async fn buscar(&self, id: &str) -> Result<Option<RegistroFrequencia>, AppError> {
        let registros = self.registros.lock().unwrap();
        Ok(registros.iter().find(|r| r.id == id).cloned())
    }

    async fn buscar_por_dia(
        &self,
        funcionario_id: &str,
        data: NaiveDate,
    ) -> Result<Option<RegistroFrequencia>, AppError> {
        let registros = self.registros.lock().unwrap();
        Ok(registros
            .iter()
            .find(|r| r.funcionario_id == funcionario_id && r.data == data)
            .cloned())
    }

    async fn atualizar(
        &self,
        id: &str,
        patch: &PatchFrequencia,
    ) -> Result<Option<RegistroFrequencia>, AppError> {
        let mut registros = self.registros.lock().unwrap();
        let Some(registro) = registros.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };

        if let Some(hora_entrada) = &patch.hora_entrada {
            registro.hora_entrada = Some(hora_entrada.clone());
        }
        if let Some(hora_saida) = &patch.hora_saida {
            registro.hora_saida = Some(hora_saida.clone());
        }
        if let Some(tipo_dia) = patch.tipo_dia {
            registro.tipo_dia = tipo_dia;
        }
        if let Some(observacao) = &patch.observacao {
            registro.observacao = Some(observacao.clone());
        }
        if let Some(total_horas) = patch.total_horas {
            registro.total_horas = total_horas;
        }

        Ok(Some(registro.clone()))
    }

    async fn remover(&self, id: &str) -> Result<bool, AppError> {
        let mut registros = self.registros.lock().unwrap();
        let antes = registros.len();
        registros.retain(|r| r.id != id);
        Ok(registros.len() < antes)
    }

    async fn listar(
        &self,
        filtro: &FiltroFrequencia,
    ) -> Result<Vec<RegistroFrequencia>, AppError> {
        let registros = self.registros.lock().unwrap();
        let mut selecionados: Vec<RegistroFrequencia> = registros
            .iter()
            .filter(|r| {
                filtro
                    .funcionario_id
                    .as_ref()
                    .map_or(true, |f| &r.funcionario_id == f)
                    && filtro.data_inicio.map_or(true, |d| r.data >= d)
                    && filtro.data_fim.map_or(true, |d| r.data <= d)
            })
            .cloned()
            .collect();
        selecionados.sort_by(|a, b| b.data.cmp(&a.data));
        selecionados.truncate(LIMITE_LISTAGEM as usize);
        Ok(selecionados)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::frequencia::TipoDia;
    use chrono::Days;

    fn registro(funcionario_id: &str, data: NaiveDate) -> RegistroFrequencia {
        RegistroFrequencia {
            id: uuid::Uuid::new_v4().to_string(),
            funcionario_id: funcionario_id.to_string(),
            nome: None,
            data,
            tipo_dia: TipoDia::Util,
            hora_entrada: None,
            hora_saida: None,
            observacao: None,
            total_horas: None,
        }
    }

    #[actix_web::test]
    async fn listagem_respeita_o_teto_e_mantem_ordem() {
        let store = MemFrequenciaStore::new();
        let base = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();

        for i in 0..=LIMITE_LISTAGEM as u64 {
            store
                .inserir(&registro("f-1", base + Days::new(i)))
                .await
                .unwrap();
        }

        let registros = store.listar(&FiltroFrequencia::default()).await.unwrap();

        assert_eq!(registros.len(), LIMITE_LISTAGEM as usize);
        // ficam os mais recentes, em ordem decrescente
        assert_eq!(registros[0].data, base + Days::new(LIMITE_LISTAGEM as u64));
        assert_eq!(
            registros.last().unwrap().data,
            base + Days::new(1)
        );
    }
}

#[derive(Default)]
pub struct MemFuncionarioStore {
    funcionarios: Mutex<Vec<Funcionario>>,
}

impl MemFuncionarioStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FuncionarioStore for MemFuncionarioStore {
    async fn inserir(&self, funcionario: &Funcionario) -> Result<(), AppError> {
        let mut funcionarios = self.funcionarios.lock().unwrap();
        if funcionarios.iter().any(|f| f.cpf == funcionario.cpf) {
            return Err(AppError::Conflito(format!(
                "Funcionário com CPF {} já existe",
                funcionario.cpf
            )));
        }
        funcionarios.push(funcionario.clone());
        Ok(())
    }

    async fn buscar(&self, id: &str) -> Result<Option<Funcionario>, AppError> {
        let funcionarios = self.funcionarios.lock().unwrap();
        Ok(funcionarios.iter().find(|f| f.id == id).cloned())
    }

    async fn buscar_por_cpf(&self, cpf: &str) -> Result<Option<Funcionario>, AppError> {
        let funcionarios = self.funcionarios.lock().unwrap();
        Ok(funcionarios.iter().find(|f| f.cpf == cpf).cloned())
    }

    async fn atualizar(
        &self,
        id: &str,
        campos: &UpdateFuncionario,
    ) -> Result<Option<Funcionario>, AppError> {
        let mut funcionarios = self.funcionarios.lock().unwrap();
        if let Some(cpf) = &campos.cpf {
            if funcionarios.iter().any(|f| &f.cpf == cpf && f.id != id) {
                return Err(AppError::Conflito(format!("CPF {cpf} já está em uso")));
            }
        }
        let Some(funcionario) = funcionarios.iter_mut().find(|f| f.id == id) else {
            return Ok(None);
        };

        if let Some(nome) = &campos.nome {
            funcionario.nome = nome.clone();
        }
        if let Some(cpf) = &campos.cpf {
            funcionario.cpf = cpf.clone();
        }
        if let Some(cargo) = &campos.cargo {
            funcionario.cargo = cargo.clone();
        }
        if let Some(setor) = &campos.setor {
            funcionario.setor = setor.clone();
        }
        if let Some(email) = &campos.email {
            funcionario.email = Some(email.clone());
        }
        if let Some(telefone) = &campos.telefone {
            funcionario.telefone = Some(telefone.clone());
        }
        if let Some(ativo) = campos.ativo {
            funcionario.ativo = ativo;
        }

        Ok(Some(funcionario.clone()))
    }

    async fn desativar(&self, id: &str) -> Result<bool, AppError> {
        let mut funcionarios = self.funcionarios.lock().unwrap();
        match funcionarios.iter_mut().find(|f| f.id == id && f.ativo) {
            Some(funcionario) => {
                funcionario.ativo = false;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn listar(
        &self,
        ativo: Option<bool>,
        setor: Option<&str>,
    ) -> Result<Vec<Funcionario>, AppError> {
        let funcionarios = self.funcionarios.lock().unwrap();
        let mut selecionados: Vec<Funcionario> = funcionarios
            .iter()
            .filter(|f| {
                ativo.map_or(true, |a| f.ativo == a)
                    && setor.map_or(true, |s| f.setor == s)
            })
            .cloned()
            .collect();
        selecionados.sort_by(|a, b| a.nome.cmp(&b.nome));
        selecionados.truncate(LIMITE_LISTAGEM as usize);
        Ok(selecionados)
    }
}
