//! # Tillroll CLI
//!
//! Command-line interface for ESC/POS receipt printing.
//!
//! ## Usage
//!
//! ```bash
//! # Save a network printer
//! tillroll configure --name "Front Counter" --type ip --host 192.168.1.50
//!
//! # Print an invoice from JSON
//! tillroll invoice invoice.json
//!
//! # Preview it as text instead
//! tillroll invoice --preview invoice.json
//!
//! # Print the diagnostic page on 58mm paper, capturing bytes to a file
//! tillroll --width 32 --out page.bin test-page
//!
//! # Show the bytes of a command sequence
//! tillroll encode INIT ALIGN_CENTER BOLD_ON "FEED_LINES(3)" CUT_PAPER
//!
//! # Serve the HTTP API
//! tillroll serve --listen 0.0.0.0:8080
//! ```
//!
//! Without a saved printer, jobs go to the in-memory simulated printer.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use clap::{Parser, Subcommand};
use tracing::info;

use tillroll::{
    TillrollError,
    command::parse_symbols,
    document::{self, InvoiceDocument, PrintJob, build_test_page},
    printer::{Connection, PrinterConfig, PrinterProfile, SavedPrinter, config::DEFAULT_NETWORK_PORT},
    protocol::encoding::TextEncoding,
    server::{self, DEFAULT_LISTEN_ADDR, ServerConfig},
    transport::{
        self,
        device::{DEFAULT_BLUETOOTH_DEVICE, DEFAULT_USB_DEVICE},
    },
};

/// Tillroll - ESC/POS receipt printing
#[derive(Parser, Debug)]
#[command(name = "tillroll")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Saved printer settings file
    #[arg(long, global = true, value_name = "FILE", default_value = "tillroll.json")]
    settings: PathBuf,

    /// Override paper width in characters
    #[arg(long, global = true)]
    width: Option<usize>,

    /// Override text encoding (utf8, ascii, cp437, gbk)
    #[arg(long, global = true)]
    encoding: Option<TextEncoding>,

    /// Write job bytes to a file instead of printing
    #[arg(long, global = true, value_name = "FILE")]
    out: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print an invoice described by a JSON file
    Invoice {
        /// Invoice JSON
        file: PathBuf,

        /// Print a text preview instead of printing
        #[arg(long)]
        preview: bool,
    },

    /// Print the diagnostic test page
    TestPage,

    /// Encode symbolic commands and print them as hex
    Encode {
        /// Command symbols, e.g. INIT BOLD_ON "FEED_LINES(2)"
        #[arg(required = true)]
        symbols: Vec<String>,
    },

    /// Save the printer to the settings file
    Configure {
        /// Display name
        #[arg(long)]
        name: String,

        /// Stable identifier (defaults to a slug of the name)
        #[arg(long)]
        id: Option<String>,

        /// Transport: ip, usb, bluetooth or simulated
        #[arg(long = "type", default_value = "ip")]
        kind: String,

        /// Printer host (ip)
        #[arg(long)]
        host: Option<String>,

        /// Printer port (ip)
        #[arg(long, default_value_t = DEFAULT_NETWORK_PORT)]
        port: u16,

        /// Device node (usb, bluetooth)
        #[arg(long)]
        device: Option<String>,

        /// Serial speed (bluetooth)
        #[arg(long)]
        baud_rate: Option<u32>,
    },

    /// Run the HTTP API
    Serve {
        /// Address to listen on
        #[arg(long, default_value = DEFAULT_LISTEN_ADDR)]
        listen: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tillroll=info,tower_http=info".into()),
        )
        .init();

    if let Err(e) = run(Cli::parse()).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), TillrollError> {
    match &cli.command {
        Commands::Invoice { file, preview } => {
            let printer = load_printer(&cli)?;
            let text = fs::read_to_string(file)?;
            let doc: InvoiceDocument = serde_json::from_str(&text)?;

            if *preview {
                let commands = document::compile_invoice(&doc, &printer.config)?;
                print!("{}", document::preview(&commands));
                return Ok(());
            }

            let job = document::build_invoice(&doc, &printer.config)?;
            deliver(&printer, job, cli.out.as_deref()).await
        }

        Commands::TestPage => {
            let printer = load_printer(&cli)?;
            let job = build_test_page(
                &printer.profile,
                &printer.config,
                Local::now().naive_local(),
            )?;
            deliver(&printer, job, cli.out.as_deref()).await
        }

        Commands::Encode { symbols } => {
            let config = overrides(&cli, PrinterConfig::default());
            let commands = parse_symbols(symbols)?;
            let job = PrintJob::encode(&commands, config.encoding)?;
            match &cli.out {
                Some(path) => write_job(path, job),
                None => {
                    println!("{}", job.to_hex());
                    Ok(())
                }
            }
        }

        Commands::Configure {
            name,
            id,
            kind,
            host,
            port,
            device,
            baud_rate,
        } => {
            let connection = match kind.as_str() {
                "ip" => Connection::Ip {
                    host: host.clone().ok_or_else(|| {
                        TillrollError::InvalidConfig("--host is required for ip printers".into())
                    })?,
                    port: *port,
                },
                "usb" => Connection::Usb {
                    device: device.clone().unwrap_or_else(|| DEFAULT_USB_DEVICE.to_string()),
                },
                "bluetooth" => Connection::Bluetooth {
                    device: device
                        .clone()
                        .unwrap_or_else(|| DEFAULT_BLUETOOTH_DEVICE.to_string()),
                },
                "simulated" => Connection::Simulated,
                other => {
                    return Err(TillrollError::InvalidConfig(format!(
                        "unknown printer type: {}",
                        other
                    )));
                }
            };

            let id = id.clone().unwrap_or_else(|| slug(name));
            let mut config = overrides(&cli, PrinterConfig::default());
            if let Some(baud_rate) = baud_rate {
                config.baud_rate = *baud_rate;
            }

            let saved = SavedPrinter::new(PrinterProfile::new(id, name.clone(), connection), config);
            // Fail early on settings the transport would reject
            transport::open(&saved.profile, &saved.config)?;
            saved.save(&cli.settings)?;
            println!(
                "Saved {} ({}) to {}",
                saved.profile.name,
                saved.profile.connection,
                cli.settings.display()
            );
            Ok(())
        }

        Commands::Serve { listen } => {
            let printer = load_printer(&cli)?;
            server::serve(ServerConfig {
                listen_addr: listen.clone(),
                profile: printer.profile,
                printer: printer.config,
            })
            .await
        }
    }
}

/// Saved printer with CLI overrides applied, or the simulated printer.
fn load_printer(cli: &Cli) -> Result<SavedPrinter, TillrollError> {
    let saved = match SavedPrinter::load(&cli.settings)? {
        Some(saved) => saved,
        None => {
            info!(
                settings = %cli.settings.display(),
                "no saved printer, using the simulated printer"
            );
            SavedPrinter::new(PrinterProfile::simulated(), PrinterConfig::default())
        }
    };
    let config = overrides(cli, saved.config);
    config.validate()?;
    Ok(SavedPrinter::new(saved.profile, config))
}

fn overrides(cli: &Cli, mut config: PrinterConfig) -> PrinterConfig {
    if let Some(width) = cli.width {
        config.paper_width = width;
    }
    if let Some(encoding) = cli.encoding {
        config.encoding = encoding;
    }
    config
}

async fn deliver(
    printer: &SavedPrinter,
    job: PrintJob,
    out: Option<&Path>,
) -> Result<(), TillrollError> {
    if let Some(path) = out {
        return write_job(path, job);
    }

    let bytes = job.len();
    let sink = transport::open(&printer.profile, &printer.config)?;
    sink.deliver(job).await?;
    println!(
        "Printed {} bytes to {} ({})",
        bytes,
        printer.profile.name,
        printer.profile.connection
    );
    Ok(())
}

fn write_job(path: &Path, job: PrintJob) -> Result<(), TillrollError> {
    let bytes = job.into_bytes();
    fs::write(path, &bytes)?;
    println!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

fn slug(name: &str) -> String {
    let slug: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    let slug = slug.trim_matches('-').to_string();
    if slug.is_empty() {
        "printer".to_string()
    } else {
        slug
    }
}
