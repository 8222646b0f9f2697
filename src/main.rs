use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use dmlforge::{
    ColumnMetadataCollection, Command as BuiltCommand, CommandBuilder, DataRequest, Dialect,
    ProviderMetadata,
};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "dmlforge")]
#[command(about = "Print the commands generated for a table description")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    Insert {
        #[command(flatten)]
        table: TableArgs,
        /// Comma separated modified column names
        #[arg(long, default_value = "")]
        modified: String,
    },
    Update {
        #[command(flatten)]
        table: TableArgs,
        #[arg(long, default_value = "")]
        modified: String,
    },
    Delete {
        #[command(flatten)]
        table: TableArgs,
    },
    Procedure {
        #[command(flatten)]
        table: TableArgs,
        /// insert, update or delete
        #[arg(long)]
        kind: String,
    },
}

#[derive(Args)]
struct TableArgs {
    /// JSON table description: `{ "provider": {..}, "columns": {..} }`
    #[arg(long)]
    table: PathBuf,
    /// JSON dialect overrides
    #[arg(long)]
    dialect: Option<PathBuf>,
    /// Print the command as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Deserialize)]
struct TableDescription {
    #[serde(default)]
    catalog: Option<String>,
    #[serde(default)]
    schema: Option<String>,
    provider: ProviderMetadata,
    columns: ColumnMetadataCollection,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Insert { table, modified } => {
            let (builder, mut request) = load(&table)?;
            let modified = split_columns(&modified);
            let cmd = builder.build_insert(&mut request, &modified)?;
            report(&builder, &request, &cmd, table.json)
        }
        Command::Update { table, modified } => {
            let (builder, mut request) = load(&table)?;
            let modified = split_columns(&modified);
            let cmd = builder.build_update(&mut request, &modified)?;
            report(&builder, &request, &cmd, table.json)
        }
        Command::Delete { table } => {
            let (builder, mut request) = load(&table)?;
            let cmd = builder.build_delete(&mut request)?;
            report(&builder, &request, &cmd, table.json)
        }
        Command::Procedure { table, kind } => {
            let (builder, mut request) = load(&table)?;
            let cmd = match kind.as_str() {
                "insert" => builder.build_insert_procedure(&mut request)?,
                "update" => builder.build_update_procedure(&mut request)?,
                "delete" => builder.build_delete_procedure(&mut request)?,
                other => anyhow::bail!("Unknown procedure kind '{}'. Expected insert, update or delete", other),
            };
            report(&builder, &request, &cmd, table.json)
        }
    }
}

fn load(args: &TableArgs) -> Result<(CommandBuilder, DataRequest)> {
    let dialect = match &args.dialect {
        Some(path) => Dialect::from_json(&read(path)?)
            .with_context(|| format!("Invalid dialect in '{}'", path.display()))?,
        None => Dialect::default(),
    };

    let description: TableDescription = serde_json::from_str(&read(&args.table)?)
        .with_context(|| format!("Invalid table description in '{}'", args.table.display()))?;

    let mut request = DataRequest::new(description.provider, description.columns);
    request.catalog = description.catalog;
    request.schema = description.schema;

    Ok((CommandBuilder::new(dialect), request))
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read '{}'", path.display()))
}

fn split_columns(input: &str) -> Vec<&str> {
    input
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .collect()
}

fn report(builder: &CommandBuilder, request: &DataRequest, cmd: &BuiltCommand, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(cmd)?);
        return Ok(());
    }

    println!("{}", cmd.text);
    for p in &cmd.parameters {
        println!(
            "  {} {} {:?} {:?}",
            p.name, p.provider_type, p.direction, p.source_version
        );
    }
    for (key, value) in request.properties.entries(builder.dialect()) {
        println!("  {} = {}", key, value);
    }
    Ok(())
}
