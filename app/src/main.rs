use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use indicatif::HumanBytes;

use empresas_brasil::{ui, utils, ClientConfig, EmpresasClient, DEFAULT_BASE_URL};

#[derive(Parser)]
#[command(name = "empresas-brasil")]
#[command(about = "Consulta empresas brasileiras por CNPJ na API empresas (RapidAPI) e exporta em CSV ou JSON", long_about = None)]
struct Cli {
    /// CNPJ da empresa (pode ser repetido)
    #[arg(short = 'i', long = "id", value_name = "CNPJ")]
    ids: Vec<String>,

    /// Arquivo onde salvar o resultado (.csv ou .json)
    #[arg(short, long, value_name = "ARQUIVO")]
    path: Option<PathBuf>,

    /// Chave da API no RapidAPI
    #[arg(short, long, env = "RAPIDAPI_KEY", hide_env_values = true)]
    key: String,

    /// URL base da API
    #[arg(long, env = "EMPRESAS_API_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Modo silencioso (menos saída)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Modo verboso (mais detalhes)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    ui::init(cli.quiet, cli.verbose);

    if let Err(e) = run(cli).await {
        ui::print_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    ui::print_header("🏢 Consulta de Empresas por CNPJ");
    ui::print_info(&format!("Hora de início: {}", Local::now().format("%Y-%m-%d %H:%M:%S")));
    ui::print_verbose(&format!("API: {}", cli.base_url));

    let config = ClientConfig::with_base_url(&cli.key, &cli.base_url)
        .context("Configuração do cliente inválida")?;
    let client = EmpresasClient::from_config(config)?;

    let total = utils::non_empty_ids(&cli.ids).len();
    if total == 0 {
        ui::print_warning("Nenhum CNPJ informado; o arquivo terá apenas a estrutura vazia.");
    } else {
        ui::print_info(&format!("{} CNPJ(s) para consultar", total));
    }

    let exported = client
        .export(&cli.ids, cli.path.as_deref())
        .await
        .context("Falha ao exportar empresas")?;

    ui::print_separator();
    if let Some(path) = &cli.path {
        let size = utils::file_size(path).unwrap_or(0);
        ui::print_success(&format!(
            "{} empresa(s) exportada(s) para {} ({})",
            exported,
            path.display(),
            HumanBytes(size)
        ));
    }
    ui::print_info(&format!("Hora de término: {}", Local::now().format("%Y-%m-%d %H:%M:%S")));

    Ok(())
}
