use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tabled::{settings::Style, Table, Tabled};

use leasing_docs::config::{config_dir, init_config_dir, load_config, resolve_output_dir, Config};
use leasing_docs::document::{contract_layout, invoice_layout, load_input, ContractInput, InvoiceInput};
use leasing_docs::error::Result;
use leasing_docs::layout::Document;
use leasing_docs::pdf::{default_output_path, write_document, OutputFormat};
use leasing_docs::schedule::schedule_rows;

#[derive(Parser)]
#[command(name = "leasing-docs")]
#[command(version, about = "Lease contract and invoice documents", long_about = None)]
struct Cli {
    /// Path to config directory (default: XDG config dir or ~/.leasing-docs)
    #[arg(short = 'C', long, global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize config directory with a config template and sample inputs
    Init,

    /// Render a lease contract from a JSON input file
    Contract(RenderArgs),

    /// Render an invoice from a JSON input file
    Invoice(RenderArgs),

    /// Show the sorted payment schedule of a contract input
    Schedule {
        /// Contract input JSON file
        input: PathBuf,
    },
}

#[derive(Args)]
struct RenderArgs {
    /// Input JSON file
    input: PathBuf,

    /// Output file path (default: output_dir/<kind>-<number>.<ext>)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format: pdf, typst or json (default: from --output extension, else pdf)
    #[arg(short, long)]
    format: Option<String>,

    /// Open generated PDF with system default viewer
    #[arg(long)]
    open: bool,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let cfg_dir = match cli.config_dir {
        Some(p) => p,
        None => config_dir()?,
    };
    log::debug!("using config dir {}", cfg_dir.display());

    match cli.command {
        Commands::Init => cmd_init(&cfg_dir),
        Commands::Contract(args) => cmd_contract(&cfg_dir, &args),
        Commands::Invoice(args) => cmd_invoice(&cfg_dir, &args),
        Commands::Schedule { input } => cmd_schedule(&input),
    }
}

/// Initialize config directory with template files
fn cmd_init(cfg_dir: &Path) -> Result<()> {
    init_config_dir(cfg_dir)?;

    println!("Initialized leasing-docs config at: {}", cfg_dir.display());
    println!();
    println!("Next steps:");
    println!(
        "  1. Adjust renderer settings:  $EDITOR {}/config.toml",
        cfg_dir.display()
    );
    println!(
        "  2. Try the samples:           leasing-docs contract {}/samples/contract.json",
        cfg_dir.display()
    );
    println!(
        "                                leasing-docs invoice {}/samples/invoice.json",
        cfg_dir.display()
    );

    Ok(())
}

fn cmd_contract(cfg_dir: &Path, args: &RenderArgs) -> Result<()> {
    let config = load_config(cfg_dir)?;
    let input: ContractInput = load_input(&args.input)?;
    let doc = contract_layout(&input);

    render(cfg_dir, &config, &doc, "contract", &input.contract_number, args)
}

fn cmd_invoice(cfg_dir: &Path, args: &RenderArgs) -> Result<()> {
    let config = load_config(cfg_dir)?;
    let input: InvoiceInput = load_input(&args.input)?;
    let doc = invoice_layout(&input);

    render(cfg_dir, &config, &doc, "invoice", &input.invoice_number, args)
}

fn render(
    cfg_dir: &Path,
    config: &Config,
    doc: &Document,
    kind: &str,
    number: &str,
    args: &RenderArgs,
) -> Result<()> {
    let format = match (&args.format, &args.output) {
        (Some(f), _) => f.parse()?,
        (None, Some(path)) => OutputFormat::from_path(path)?,
        (None, None) => OutputFormat::Pdf,
    };

    let output_path = match &args.output {
        Some(path) => path.clone(),
        None => {
            let output_dir = resolve_output_dir(&config.output.dir, cfg_dir);
            default_output_path(&output_dir, kind, number, format)
        }
    };

    write_document(doc, format, &config.render, &output_path)?;

    println!("Generated {} {}", kind, number);
    println!("  Saved:  {}", output_path.display());

    if args.open {
        if format == OutputFormat::Pdf {
            open_path(&output_path)?;
        } else {
            log::warn!("--open ignored for {} output", format.extension());
        }
    }

    Ok(())
}

#[derive(Tabled)]
struct ScheduleTableRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "DUE DATE")]
    due_date: String,
    #[tabled(rename = "AMOUNT")]
    amount: String,
    #[tabled(rename = "STATUS")]
    status: String,
}

/// Print the normalized payment schedule of a contract input
fn cmd_schedule(input_path: &Path) -> Result<()> {
    let input: ContractInput = load_input(input_path)?;

    println!("Payment schedule for {}", input.contract_number);

    if input.payments().is_empty() {
        println!("  No payments scheduled.");
        return Ok(());
    }

    let rows: Vec<ScheduleTableRow> = schedule_rows(input.payments())
        .into_iter()
        .map(|row| ScheduleTableRow {
            index: row.number,
            due_date: if row.due_date.is_empty() {
                "-".to_string()
            } else {
                row.due_date
            },
            amount: row.amount,
            status: row.status,
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");

    Ok(())
}

fn open_path(pdf_path: &Path) -> Result<()> {
    // Open with system default viewer
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(pdf_path).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(pdf_path).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", ""])
            .arg(pdf_path)
            .spawn()?;
    }

    Ok(())
}
