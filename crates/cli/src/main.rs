//! Command-line interface for reading smart cards over PC/SC

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tapcard_session::{Response, Session};
use tapcard_transport_pcsc::{PcscDeviceManager, PcscReader, PcscTransport};
use tapcard_thaiid::ThaiIdReader;

#[derive(Parser)]
#[command(version, about = "Read smart cards over PC/SC")]
struct Cli {
    /// Optional reader name to use (will auto-detect if not specified)
    #[arg(short, long)]
    reader: Option<String>,

    /// Trace level output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available readers
    List,

    /// Transmit a raw APDU (hex) and print the response
    Apdu {
        /// APDU command as hex, spaces allowed
        #[arg(required = true)]
        apdu: String,
    },

    /// Read a Thai National ID card
    Read {
        /// Write the photo JPEG to this path instead of printing base64
        #[arg(long)]
        photo: Option<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let manager = PcscDeviceManager::new()?;

    match &cli.command {
        Commands::List => list_readers(&manager),
        Commands::Apdu { apdu } => apdu_command(open_transport(&manager, cli.reader.as_deref())?, apdu),
        Commands::Read { photo } => read_command(
            open_transport(&manager, cli.reader.as_deref())?,
            photo.as_deref(),
        ),
    }
}

/// Pick the named reader, or the first one with a card, and open a transport
fn open_transport(
    manager: &PcscDeviceManager,
    reader_name: Option<&str>,
) -> Result<PcscTransport, Box<dyn std::error::Error>> {
    let reader = match reader_name {
        Some(name) => manager.find_reader(name)?,
        None => manager.find_reader_with_card()?,
    };
    info!("using reader: {}", reader.name());
    Ok(manager.open_reader(reader.name())?)
}

fn setup_logging(verbose: bool) {
    let default = if verbose { "trace" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn list_readers(manager: &PcscDeviceManager) -> Result<(), Box<dyn std::error::Error>> {
    for reader in manager.list_readers()? {
        print_reader(&reader);
    }
    Ok(())
}

fn print_reader(reader: &PcscReader) {
    let status = if reader.has_card() {
        "card present".green()
    } else {
        "empty".dimmed()
    };
    println!("{} [{}]", reader.name().bold(), status);
    if let Some(atr) = reader.atr() {
        println!("  ATR: {}", hex::encode_upper(atr));
    }
}

fn apdu_command(transport: PcscTransport, apdu: &str) -> Result<(), Box<dyn std::error::Error>> {
    let command = hex::decode(apdu.replace(' ', ""))?;

    let mut session = Session::new(transport);
    session.connect()?;
    let raw = session.transmit(&command)?;
    session.disconnect();

    let response = Response::from_bytes(&raw)?;
    if !response.payload().is_empty() {
        println!("data:   {}", hex::encode_upper(response.payload()));
    }
    println!(
        "status: {} ({})",
        response.status(),
        response.status().description()
    );
    Ok(())
}

fn read_command(
    transport: PcscTransport,
    photo_path: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut reader = ThaiIdReader::new(transport);
    let person = reader.read()?;

    println!("{} {}", "Citizen ID:".bold(), person.citizen_id);
    println!("{} {}", "Name (TH): ".bold(), person.name_th);
    println!("{} {}", "Name (EN): ".bold(), person.name_en);
    println!("{} {}", "Birthday:  ".bold(), format_date(person.birthday));
    println!("{} {:?}", "Gender:    ".bold(), person.gender);
    println!("{} {}", "Address:   ".bold(), person.address);
    println!("{} {}", "Issued:    ".bold(), format_date(person.issue_date));
    println!("{} {}", "Expires:   ".bold(), format_date(person.expiry_date));
    println!("{} {}", "Issuer:    ".bold(), person.issuer);

    match photo_path {
        Some(path) => {
            std::fs::write(path, &person.photo)?;
            println!("{} written to {}", "Photo:     ".bold(), path.display());
        }
        None => println!("{} {}", "Photo:     ".bold(), person.photo_base64()),
    }
    Ok(())
}

fn format_date(date: Option<chrono::NaiveDate>) -> String {
    date.map_or_else(|| "-".to_string(), |d| d.to_string())
}
