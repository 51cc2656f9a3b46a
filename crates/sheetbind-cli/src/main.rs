use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use futures::future::try_join_all;
use sheetbind_client::{ClientConfig, Save, SpreadsheetClient};
use sheetbind_core::{col_from_label, LookupPolicy, Row};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "sheetbind", version, about = "Read and write spreadsheet rows and columns")]
struct Cli {
    /// Spreadsheet key (overrides SHEETBIND_SPREADSHEET_ID)
    #[arg(long, short = 's')]
    spreadsheet_id: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the spreadsheet title and a row count per worksheet
    Info,
    /// Print every row of a worksheet as a JSON object keyed by header
    Rows {
        sheet: String,
        /// Leave out row 0 (the header itself)
        #[arg(long)]
        skip_header: bool,
    },
    /// Print one column; COLUMN is an index (0) or a letter (A)
    Column {
        sheet: String,
        #[arg(value_parser = parse_column)]
        column: u32,
    },
    /// Set one field of one row and save the row
    Set {
        sheet: String,
        /// Row index as returned by `rows` (0 is the header)
        row: usize,
        key: String,
        value: String,
    },
}

fn parse_column(s: &str) -> Result<u32, String> {
    match s.parse::<u32>() {
        Ok(index) => Ok(index),
        Err(_) => col_from_label(s).map_err(|e| e.to_string()),
    }
}

fn row_to_json(row: &Row) -> serde_json::Value {
    let mut fields = serde_json::Map::new();
    for (key, value) in row.keys().iter().zip(row.values()) {
        // First header wins, same as key-based access
        fields
            .entry(key.clone())
            .or_insert_with(|| serde_json::Value::String(value.clone()));
    }
    serde_json::json!({ "index": row.index(), "fields": fields })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("sheetbind_client=info,sheetbind=info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = ClientConfig::from_env()?;
    if let Some(id) = cli.spreadsheet_id {
        config = config.spreadsheet_id(id);
    }
    if !config.is_auth_active() {
        tracing::warn!("no SHEETBIND_ACCESS_TOKEN set; only public sheets will be readable");
    }

    let client = SpreadsheetClient::new(config)?;

    match cli.command {
        Command::Info => {
            let info = client.get_info().await?;
            println!("Loaded spreadsheet: {}", info.title);

            let fetches = info
                .worksheets
                .iter()
                .map(|ws| client.get_worksheet_rows(ws));
            let all_rows = try_join_all(fetches).await?;

            for (ws, rows) in info.worksheets.iter().zip(all_rows) {
                println!(
                    "{} ({}x{}) --> Read {} rows",
                    ws.title,
                    ws.row_count,
                    ws.col_count,
                    rows.len()
                );
            }
        }
        Command::Rows { sheet, skip_header } => {
            let rows = client.get_rows(&sheet).await?;
            let skip = usize::from(skip_header);
            let json: Vec<_> = rows.iter().skip(skip).map(row_to_json).collect();
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        Command::Column { sheet, column } => {
            let column = client.get_column(&sheet, column).await?;
            println!("{} ({})", column.header(), column.key());
            for value in column.values() {
                println!("  {}", value);
            }
        }
        Command::Set {
            sheet,
            row,
            key,
            value,
        } => {
            let mut rows = client.get_rows(&sheet).await?;
            let count = rows.len();
            let Some(target) = rows.get_mut(row) else {
                bail!("row {} does not exist ({} rows in {})", row, count, sheet);
            };

            target.set_lookup_policy(LookupPolicy::Strict);
            target
                .set_value(&key, value)
                .with_context(|| format!("headers are {:?}", target.keys()))?;

            let response = target.save(&client).await?;
            println!(
                "Updated {} ({} cells)",
                response.updated_range.unwrap_or_default(),
                response.updated_cells
            );
        }
    }

    Ok(())
}
