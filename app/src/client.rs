use std::path::Path;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, StatusCode};
use serde_json::{Map, Value};

use crate::error::{ClientError, Result};
use crate::export::ExportFormat;
use crate::models::Empresa;
use crate::table::Table;
use crate::ui;
use crate::utils;

pub const DEFAULT_BASE_URL: &str = "https://empresas.p.rapidapi.com";
pub const RAPIDAPI_HOST: &str = "empresas.p.rapidapi.com";

const HEADER_HOST: &str = "x-rapidapi-host";
const HEADER_KEY: &str = "x-rapidapi-key";

/// Configuração fixa do cliente. Criada uma vez e nunca alterada.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    base_url: String,
    http_method: Method,
    headers: HeaderMap,
}

impl ClientConfig {
    pub fn new(api_key: &str) -> Result<Self> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Mesma configuração apontando para outra URL base (ex: um mock local).
    pub fn with_base_url(api_key: &str, base_url: &str) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(ClientError::MissingApiKey);
        }

        let mut key = HeaderValue::from_str(api_key).map_err(ClientError::InvalidApiKey)?;
        key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static(HEADER_HOST), HeaderValue::from_static(RAPIDAPI_HOST));
        headers.insert(HeaderName::from_static(HEADER_KEY), key);

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_method: Method::GET,
            headers,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn http_method(&self) -> &Method {
        &self.http_method
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

/// Cliente da API de empresas do RapidAPI.
///
/// Todas as consultas são sequenciais: cada requisição termina antes da
/// próxima começar, e o primeiro erro interrompe o lote inteiro.
#[derive(Debug, Clone)]
pub struct EmpresasClient {
    config: ClientConfig,
    http: reqwest::Client,
}

impl EmpresasClient {
    pub fn new(api_key: &str) -> Result<Self> {
        Self::from_config(ClientConfig::new(api_key)?)
    }

    pub fn from_config(config: ClientConfig) -> Result<Self> {
        // Sem timeout: uma chamada travada bloqueia até a conexão falhar
        let http = reqwest::Client::builder()
            .build()
            .map_err(ClientError::ClientBuild)?;

        Ok(Self { config, http })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Consulta uma empresa pelo CNPJ.
    ///
    /// Qualquer status diferente de 200 vira [`ClientError::Http`].
    pub async fn fetch_one(&self, tax_id: &str) -> Result<Empresa> {
        let url = utils::join_url(&self.config.base_url, tax_id);
        ui::print_verbose(&format!("{} {}", self.config.http_method, url));

        let response = self
            .http
            .request(self.config.http_method.clone(), &url)
            .headers(self.config.headers.clone())
            .send()
            .await
            .map_err(|e| ClientError::Request {
                tax_id: tax_id.to_string(),
                source: e,
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ClientError::Http {
                status,
                tax_id: tax_id.to_string(),
            });
        }

        let fields: Map<String, Value> = response.json().await.map_err(|e| ClientError::Decode {
            tax_id: tax_id.to_string(),
            source: e,
        })?;
        let empresa = Empresa::new(fields);

        if let Some(nome) = empresa.official_name() {
            ui::print_verbose(&format!("{}: {}", tax_id, nome));
        }
        if let Some(cnae) = empresa.atividade_principal() {
            ui::print_verbose(&format!("CNAE principal: {} - {}", cnae.code, cnae.description));
        }

        Ok(empresa)
    }

    /// Consulta várias empresas em sequência, na ordem recebida.
    ///
    /// CNPJs vazios são ignorados. O primeiro erro aborta o lote sem
    /// resultado parcial.
    pub async fn fetch_many<S: AsRef<str>>(&self, tax_ids: &[S]) -> Result<Vec<Empresa>> {
        let ids = utils::non_empty_ids(tax_ids);
        let pb = ui::progress_bar(ids.len());

        let mut empresas = Vec::with_capacity(ids.len());
        for (idx, tax_id) in ids.iter().enumerate() {
            pb.set_message(format!("{} | {}", tax_id, utils::format_progress(idx + 1, ids.len())));
            match self.fetch_one(tax_id).await {
                Ok(empresa) => empresas.push(empresa),
                Err(e) => {
                    pb.abandon_with_message(format!("✗ {}", tax_id));
                    return Err(e);
                }
            }
            pb.inc(1);
        }

        pb.finish_and_clear();
        Ok(empresas)
    }

    /// Igual a [`fetch_many`](Self::fetch_many), devolvendo a estrutura tabular.
    pub async fn fetch_many_as_table<S: AsRef<str>>(&self, tax_ids: &[S]) -> Result<Table> {
        let empresas = self.fetch_many(tax_ids).await?;
        Ok(Table::from_records(empresas))
    }

    /// Consulta os CNPJs e grava o resultado em `result_path`.
    ///
    /// O formato vem da extensão (`.csv` ou `.json`) e é validado antes de
    /// qualquer requisição. Devolve o número de registros exportados.
    pub async fn export<S: AsRef<str>>(&self, tax_ids: &[S], result_path: Option<&Path>) -> Result<usize> {
        let format = ExportFormat::from_path(result_path)?;
        let path = result_path.ok_or(ClientError::MissingResultPath)?;

        let table = self.fetch_many_as_table(tax_ids).await?;
        format.write(&table, path)?;

        ui::print_verbose(&format!("{} registro(s) gravado(s) em {} ({})", table.len(), path.display(), format));
        Ok(table.len())
    }
}
