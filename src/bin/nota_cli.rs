//! Nota Thermal CLI
//!
//! Edits the stored receipt in a data directory.
//! Outputs JSON or receipt text to stdout, logs to stderr.
//! Returns 2 when an item is rejected or printing is refused.

use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use nota_thermal::{
    format_idr, persistence::StoredReceipt, DocumentField, FileStore, ItemField, PaperWidth,
    PrintHost, ReceiptSession, CORE_VERSION,
};

#[derive(Parser)]
#[command(name = "nota-cli")]
#[command(about = "Nota Thermal CLI - thermal receipt builder")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory holding the stored receipt
    #[arg(short, long, default_value = ".nota")]
    data_dir: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current receipt as JSON
    Show,

    /// Set a text field (store-name, cashier-name, note, footer1, footer2)
    Set { field: DocumentField, value: String },

    /// Show or hide the cashier line
    Cashier {
        #[arg(action = clap::ArgAction::Set)]
        enabled: bool,
    },

    /// Transaction date as YYYY-MM-DD, empty to use today
    Date { value: String },

    /// Paper width: 58 or 80
    Paper { width: PaperWidth },

    /// Add an item; qty and price accept free text like "Rp 12.000"
    Add {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        qty: String,
        #[arg(short, long)]
        price: String,
    },

    /// Edit one column (name, qty, price) of an item
    Update {
        id: String,
        field: ItemField,
        value: String,
    },

    /// Remove an item
    Remove { id: String },

    /// Use an image file as logo
    Logo { path: PathBuf },

    /// Remove the logo
    ClearLogo,

    /// Print the receipt text layout
    Preview,

    /// Send the receipt to stdout as a print job
    Print,

    /// Dump the stored record
    Export,

    /// Delete everything
    Reset {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

struct StdoutPrinter;

impl PrintHost for StdoutPrinter {
    fn print(&mut self, receipt: &str) {
        print!("{receipt}");
    }
}

fn ask_on_stdin(prompt: &str) -> bool {
    ask(prompt, &mut io::stdin().lock(), &mut io::stderr())
}

fn ask(prompt: &str, input: &mut impl BufRead, output: &mut impl Write) -> bool {
    if let Err(e) = write!(output, "{prompt} [y/N] ").and_then(|_| output.flush()) {
        tracing::debug!(error = %e, "confirmation prompt not shown");
    }
    let mut answer = String::new();
    if let Err(e) = input.read_line(&mut answer) {
        tracing::debug!(error = %e, "no confirmation answer");
        return false;
    }
    matches!(answer.trim(), "y" | "Y" | "ya" | "yes")
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nota_thermal=info,nota_cli=info".into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut session = ReceiptSession::open(FileStore::new(&cli.data_dir));

    match cli.command {
        Commands::Show => {
            let output = serde_json::json!({
                "version": CORE_VERSION,
                "receipt": StoredReceipt::from(session.document()),
                "total": session.total(),
                "totalDisplay": format_idr(session.total()),
                "displayDate": session.display_date(),
            });
            print_json(&output);
            ExitCode::SUCCESS
        }

        Commands::Set { field, value } => {
            session.set_text(field, &value);
            ExitCode::SUCCESS
        }

        Commands::Cashier { enabled } => {
            session.set_cashier_enabled(enabled);
            ExitCode::SUCCESS
        }

        Commands::Date { value } => {
            session.set_transaction_date_input(&value);
            println!("{}", session.display_date());
            ExitCode::SUCCESS
        }

        Commands::Paper { width } => {
            session.set_paper_width(width);
            ExitCode::SUCCESS
        }

        Commands::Add { name, qty, price } => {
            session.set_draft_name(&name);
            session.set_draft_qty(&qty);
            session.set_draft_price(&price);
            match session.add_item() {
                Some(item) => {
                    print_json(&serde_json::json!({ "added": item, "total": session.total() }));
                    ExitCode::SUCCESS
                }
                None => {
                    print_json(&serde_json::json!({ "added": null, "error": "item rejected" }));
                    ExitCode::from(2)
                }
            }
        }

        Commands::Update { id, field, value } => {
            let updated = session.update_item_field(&id, field, &value);
            print_json(&serde_json::json!({ "updated": updated, "total": session.total() }));
            ExitCode::SUCCESS
        }

        Commands::Remove { id } => {
            let removed = session.remove_item(&id);
            print_json(&serde_json::json!({ "removed": removed, "total": session.total() }));
            ExitCode::SUCCESS
        }

        Commands::Logo { path } => {
            if session.set_logo_from_file(&path) {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }

        Commands::ClearLogo => {
            session.clear_logo();
            ExitCode::SUCCESS
        }

        Commands::Preview => {
            print!("{}", session.preview());
            ExitCode::SUCCESS
        }

        Commands::Print => {
            if session.print(&mut StdoutPrinter) {
                ExitCode::SUCCESS
            } else {
                eprintln!("Nothing to print: add an item first");
                ExitCode::from(2)
            }
        }

        Commands::Export => {
            if let Some(raw) = session.store().load_raw() {
                println!("{raw}");
            }
            ExitCode::SUCCESS
        }

        Commands::Reset { yes } => {
            let reset = if yes {
                session.reset(&|_: &str| true)
            } else {
                session.reset(&ask_on_stdin)
            };
            if !reset {
                eprintln!("Reset cancelled");
            }
            ExitCode::SUCCESS
        }
    }
}

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!(r#"{{"error": "{}"}}"#, e),
    }
}
