use std::fmt;
use std::path::Path;

use crate::error::{ClientError, Result};
use crate::table::Table;

/// Formato do arquivo de saída, definido pela extensão do caminho.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    /// Valida o caminho do resultado e extrai o formato.
    ///
    /// A ordem das verificações importa: caminho ausente, depois extensão
    /// ausente, depois extensão não suportada. O formato é o texto após o
    /// último `.` do nome do arquivo, comparado exatamente (`.CSV` não vale).
    pub fn from_path(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => return Err(ClientError::MissingResultPath),
        };

        let file_name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
        let extension = match file_name.rsplit_once('.') {
            Some((_, ext)) => ext,
            None => {
                return Err(ClientError::MissingFormat {
                    path: path.display().to_string(),
                })
            }
        };

        match extension {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            _ => Err(ClientError::UnsupportedFormat {
                extension: extension.to_string(),
            }),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    /// Grava a tabela no caminho, criando ou sobrescrevendo o arquivo.
    pub fn write(&self, table: &Table, path: &Path) -> Result<()> {
        match self {
            ExportFormat::Csv => table.to_csv(path),
            ExportFormat::Json => table.to_json(path),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".{}", self.extension())
    }
}
