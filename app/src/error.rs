use reqwest::StatusCode;
use thiserror::Error;

/// Erros do cliente da API de empresas.
///
/// Nenhum erro é tratado localmente: cada variante encerra a operação
/// corrente (consulta, lote ou exportação).
#[derive(Debug, Error)]
pub enum ClientError {
    /// A API respondeu com status diferente de 200.
    #[error("API respondeu HTTP {status} para o CNPJ {tax_id}")]
    Http { status: StatusCode, tax_id: String },

    #[error("Falha na requisição para o CNPJ {tax_id}")]
    Request {
        tax_id: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Resposta inválida para o CNPJ {tax_id}: corpo não é um objeto JSON")]
    Decode {
        tax_id: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Chave da API não informada")]
    MissingApiKey,

    #[error("Chave da API contém caracteres inválidos para um header HTTP")]
    InvalidApiKey(#[source] reqwest::header::InvalidHeaderValue),

    #[error("Falha ao criar cliente HTTP")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Caminho do resultado não foi definido")]
    MissingResultPath,

    #[error("Formato do arquivo (ex: .csv ou .json) não especificado em {path}")]
    MissingFormat { path: String },

    #[error("Formato `.{extension}` não é suportado (use .csv ou .json)")]
    UnsupportedFormat { extension: String },

    #[error("Falha de E/S ao gravar {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Falha ao gravar CSV")]
    Csv(#[from] csv::Error),

    #[error("Falha ao gravar JSON")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    /// Status HTTP da resposta, quando o erro veio da API.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Erros de configuração: chave ausente/inválida, cliente HTTP que não
    /// pôde ser criado ou caminho não informado.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            ClientError::MissingApiKey
                | ClientError::InvalidApiKey(_)
                | ClientError::ClientBuild(_)
                | ClientError::MissingResultPath
        )
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
