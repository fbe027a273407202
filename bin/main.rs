use std::path::PathBuf;

use anyhow::{Context as _, bail};
use clap::{Parser, Subcommand};
use odoo_graphql_client::OdooClient;
use odoo_graphql_registry::{OperationDocument, OperationKind, OperationName, registry};
use odoo_graphql_runtime::{Config, read_config, read_config_from_env};
use serde_json::Value;
use tracing::{info, warn};

/// Inspect and run the GraphQL operations the storefront sends to Odoo
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Path to the config file
    #[arg(long, short, global = true, env = "ODOO_GRAPHQL_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List every registered operation
    List,

    /// Print the document of an operation
    Show {
        /// Symbolic name, e.g. `LoadCartQuery`
        name: String,
    },

    /// Run a query against the configured endpoint
    Query {
        name: String,

        /// Variables as a JSON object
        #[arg(long)]
        variables: Option<String>,
    },

    /// Run a mutation against the configured endpoint
    Mutate {
        name: String,

        /// Variables as a JSON object
        #[arg(long, default_value = "{}")]
        variables: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    match args.command {
        Command::List => list(),
        Command::Show { name } => show(&name),
        Command::Query { name, variables } => {
            let name = parse_name(&name, OperationKind::Query)?;
            let variables = variables.as_deref().map(parse_variables).transpose()?;
            run(args.config, name, variables).await
        }
        Command::Mutate { name, variables } => {
            let name = parse_name(&name, OperationKind::Mutation)?;
            let variables = parse_variables(&variables)?;
            run(args.config, name, Some(variables)).await
        }
    }
}

fn list() -> anyhow::Result<()> {
    for document in registry()?.documents() {
        println!(
            "{:<9}{:<30}{}",
            document.kind(),
            document.name(),
            signature(document)
        );
    }
    Ok(())
}

fn show(name: &str) -> anyhow::Result<()> {
    let name: OperationName = name.parse()?;
    let document = registry()?.resolve(name)?;
    if let Some(path) = document.source_path() {
        println!("# {path}");
    }
    print!("{}", document.source_text());
    Ok(())
}

async fn run(
    config_path: Option<PathBuf>,
    name: OperationName,
    variables: Option<Value>,
) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let _guard = config.logging.install()?;

    let client = OdooClient::connect(config.http_config())?;
    info!(%name, endpoint = %config.endpoint, "Running operation");

    let response = client.run(name, variables).await?;
    if let Some(errors) = response.errors.as_deref() {
        for error in errors {
            warn!("GraphQL error: {error}");
        }
    }
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

fn load_config(path: Option<PathBuf>) -> anyhow::Result<Config> {
    let config = match path {
        Some(path) => read_config(&path)
            .with_context(|| format!("failed to read config file '{}'", path.display()))?,
        None => read_config_from_env().context("failed to read config from environment")?,
    };
    Ok(config)
}

fn parse_name(name: &str, kind: OperationKind) -> anyhow::Result<OperationName> {
    let name: OperationName = name.parse()?;
    if name.kind() != kind {
        bail!("`{name}` is a {}, not a {kind}", name.kind());
    }
    Ok(name)
}

fn parse_variables(variables: &str) -> anyhow::Result<Value> {
    let value: Value = serde_json::from_str(variables).context("variables are not valid JSON")?;
    if !value.is_object() {
        bail!("variables must be a JSON object");
    }
    Ok(value)
}

fn signature(document: &OperationDocument) -> String {
    document
        .variables()
        .iter()
        .map(|variable| format!("${}: {}", variable.name, variable.ty))
        .collect::<Vec<_>>()
        .join(", ")
}
