use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;

use contact_refinery::app::process_use_case::ProcessUseCase;
use contact_refinery::infra::csv_table::{read_table, write_table};
use contact_refinery::infra::mx_classifier::DnsMxClassifier;
use contact_refinery::pipeline::processing::normalize::find_website_column;
use contact_refinery::pipeline::tasks::{spawn_job, ProcessorEvent};
use contact_refinery::{logging, types::Table};

#[derive(Parser)]
#[command(name = "contact_refinery")]
#[command(about = "Contact list cleaning and mail-provider enrichment")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full cleaning/enrichment pipeline over a CSV file
    Process {
        /// Input CSV file
        input: PathBuf,
        /// Column holding the raw company name
        #[arg(long, default_value = "company")]
        company_column: String,
        /// Output CSV file; defaults to <input>.cleaned.csv
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Parse a CSV file and report its shape without processing it
    Inspect {
        /// Input CSV file
        input: PathBuf,
        /// Emit the parsed rows as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },
}

async fn run_process(
    input: PathBuf,
    company_column: String,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let table = read_table(&input)?;
    let input_rows = table.len();
    println!("🔄 Processing {} rows from {}...", input_rows, input.display());

    let use_case = ProcessUseCase::with_default_collaborators(Box::new(DnsMxClassifier::new()));
    let mut job = spawn_job(use_case, table, company_column);
    info!(job_id = %job.job_id, "job spawned");

    let mut cleaned: Option<Table> = None;
    while let Some(event) = job.next_event().await {
        match event {
            ProcessorEvent::Progress(update) => {
                println!("   [{:>3}%] {}", update.percent, update.stage);
            }
            ProcessorEvent::Complete { table } => {
                cleaned = Some(table);
            }
            ProcessorEvent::Error { message } => {
                println!("❌ {}", message);
                return Err(message.into());
            }
        }
    }

    let cleaned = cleaned.ok_or("job ended without a result")?;
    let output = output.unwrap_or_else(|| input.with_extension("cleaned.csv"));
    write_table(&output, &cleaned)?;

    println!("\n📊 Processing Results:");
    println!("   Rows in: {}", input_rows);
    println!("   Rows out: {}", cleaned.len());
    println!("   Duplicates removed: {}", input_rows.saturating_sub(cleaned.len()));
    println!("   Output file: {}", output.display());
    Ok(())
}

fn run_inspect(input: PathBuf, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let table = read_table(&input)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&table)?);
        return Ok(());
    }

    println!("📋 {}:", input.display());
    println!("   Rows: {}", table.len());
    match table.first() {
        Some(first) => {
            let columns: Vec<&str> = first.columns().collect();
            println!("   Columns: {}", columns.join(", "));
            match find_website_column(&columns.iter().map(|c| c.to_string()).collect::<Vec<_>>()) {
                Some(column) => println!("   Website column: {}", column),
                None => println!("   Website column: none detected"),
            }
        }
        None => println!("   Columns: none"),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse();
    match cli.command {
        Commands::Process {
            input,
            company_column,
            output,
        } => run_process(input, company_column, output).await,
        Commands::Inspect { input, json } => run_inspect(input, json),
    }
}
