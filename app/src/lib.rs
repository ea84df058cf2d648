//! Cliente da API "empresas" do RapidAPI: consulta dados cadastrais de
//! empresas brasileiras pelo CNPJ e exporta o resultado em CSV ou JSON.
//!
//! ```no_run
//! # async fn run() -> Result<(), empresas_brasil::ClientError> {
//! use std::path::Path;
//! use empresas_brasil::EmpresasClient;
//!
//! let client = EmpresasClient::new("minha-chave")?;
//! client.export(&["11111111000191"], Some(Path::new("empresas.csv"))).await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod export;
pub mod models;
pub mod table;
pub mod ui;
pub mod utils;

pub use client::{ClientConfig, EmpresasClient, DEFAULT_BASE_URL};
pub use error::ClientError;
pub use export::ExportFormat;
pub use models::{AtividadeEconomica, Empresa};
pub use table::Table;
