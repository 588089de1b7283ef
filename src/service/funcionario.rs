use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use uuid::Uuid;

use crate::error::AppError;
use crate::model::funcionario::{CreateFuncionario, Funcionario, UpdateFuncionario};
use crate::store::FuncionarioStore;

const CACHE_CAPACIDADE: u64 = 10_000;
const CACHE_TTL_SEGUNDOS: u64 = 300;

/// Cadastro de funcionários. Consultas por id passam por um cache com
/// TTL curto; mutações invalidam a entrada correspondente.
pub struct FuncionarioService {
    store: Arc<dyn FuncionarioStore>,
    cache: Cache<String, Funcionario>,
}

impl FuncionarioService {
    pub fn new(store: Arc<dyn FuncionarioStore>) -> Self {
        let cache = Cache::builder()
            .max_capacity(CACHE_CAPACIDADE)
            .time_to_live(Duration::from_secs(CACHE_TTL_SEGUNDOS))
            .build();
        Self { store, cache }
    }

    pub async fn create(&self, dados: CreateFuncionario) -> Result<Funcionario, AppError> {
        if let Some(existente) = self.store.buscar_por_cpf(&dados.cpf).await? {
            return Err(AppError::Conflito(format!(
                "Funcionário com CPF {} já existe",
                existente.cpf
            )));
        }

        let funcionario = Funcionario {
            id: Uuid::new_v4().to_string(),
            nome: dados.nome,
            cpf: dados.cpf,
            cargo: dados.cargo,
            setor: dados.setor,
            email: dados.email,
            telefone: dados.telefone,
            data_admissao: dados.data_admissao,
            ativo: dados.ativo,
        };

        self.store.inserir(&funcionario).await?;
        tracing::info!(funcionario_id = %funcionario.id, "Funcionário criado");

        self.cache
            .insert(funcionario.id.clone(), funcionario.clone())
            .await;
        Ok(funcionario)
    }

    pub async fn buscar(&self, id: &str) -> Result<Option<Funcionario>, AppError> {
        self.store.buscar(id).await
    }

    /// Busca com cache; é o caminho quente usado pela frequência para
    /// validar o funcionário de cada registro. Funcionários inativos
    /// continuam resolvíveis.
    pub async fn resolver(&self, id: &str) -> Result<Option<Funcionario>, AppError> {
        if let Some(funcionario) = self.cache.get(id).await {
            return Ok(Some(funcionario));
        }

        let funcionario = self.store.buscar(id).await?;
        if let Some(funcionario) = &funcionario {
            self.cache
                .insert(funcionario.id.clone(), funcionario.clone())
                .await;
        }
        Ok(funcionario)
    }

    pub async fn update(
        &self,
        id: &str,
        campos: UpdateFuncionario,
    ) -> Result<Option<Funcionario>, AppError> {
        if campos.is_empty() {
            return self.store.buscar(id).await;
        }

        if let Some(cpf) = &campos.cpf {
            if let Some(existente) = self.store.buscar_por_cpf(cpf).await? {
                if existente.id != id {
                    return Err(AppError::Conflito(format!("CPF {cpf} já está em uso")));
                }
            }
        }

        let atualizado = self.store.atualizar(id, &campos).await?;
        if atualizado.is_some() {
            self.cache.invalidate(id).await;
            tracing::info!(funcionario_id = %id, "Funcionário atualizado");
        }
        Ok(atualizado)
    }

    /// Soft delete. `false` quando o id não existe ou já está inativo.
    pub async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let desativado = self.store.desativar(id).await?;
        if desativado {
            self.cache.invalidate(id).await;
            tracing::info!(funcionario_id = %id, "Funcionário desativado");
        }
        Ok(desativado)
    }

    pub async fn listar(
        &self,
        ativo: Option<bool>,
        setor: Option<&str>,
    ) -> Result<Vec<Funcionario>, AppError> {
        self.store.listar(ativo, setor).await
    }

    /// Pré-aquece o cache com os funcionários ativos. Chamado em
    /// background na subida do servidor.
    pub async fn warmup(&self) -> anyhow::Result<usize> {
        let ativos = self.store.listar(Some(true), None).await?;
        let total = ativos.len();

        let inserts = ativos
            .into_iter()
            .map(|f| self.cache.insert(f.id.clone(), f));
        futures::future::join_all(inserts).await;

        Ok(total)
    }
}
