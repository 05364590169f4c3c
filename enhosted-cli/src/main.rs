//! enhosted command-line tools
//!
//! Usage:
//!   enhosted template descriptor.json jitsu.FirebaseConfig
//!   enhosted destinations destinations.json
//!   enhosted config api_keys.json destinations.json --hosted-s3 s3.toml
//!   enhosted destination-types
//!   enhosted source-types

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{Level, debug};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "enhosted")]
#[command(about = "enhosted configuration tools")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the JSON template of a protobuf message type
    Template {
        /// Path to the JSON descriptor
        descriptor: PathBuf,

        /// Dotted message name, e.g. jitsu.FirebaseConfig
        type_name: String,

        /// Path to a TOML template config
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// List the destinations of a stored destinations document
    Destinations {
        /// Path to the stored JSON document
        file: PathBuf,
    },

    /// Print the EventNative server configuration for stored keys and destinations
    Config {
        /// Path to the stored API keys document
        api_keys: PathBuf,

        /// Path to the stored destinations document
        destinations: PathBuf,

        /// TOML file with the hosted S3 bucket for Redshift staging
        #[arg(long)]
        hosted_s3: Option<PathBuf>,

        /// Server name (random if omitted)
        #[arg(short, long)]
        name: Option<String>,
    },

    /// List supported destination types
    DestinationTypes,

    /// List supported source types
    SourceTypes,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    debug!("Running {:?}", args.command);
    match args.command {
        Command::Template {
            descriptor,
            type_name,
            config,
        } => {
            let template = enhosted_cli::template(&descriptor, &type_name, config.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&template)?);
        }
        Command::Destinations { file } => {
            let list = enhosted_cli::load_destinations(&file)?;
            print_rows(enhosted_cli::destination_rows(&list));
        }
        Command::Config {
            api_keys,
            destinations,
            hosted_s3,
            name,
        } => {
            let config = enhosted_cli::eventnative_config(
                &api_keys,
                &destinations,
                hosted_s3.as_deref(),
                name.as_deref(),
            )?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        Command::DestinationTypes => print_rows(enhosted_cli::destination_type_rows()),
        Command::SourceTypes => print_rows(enhosted_cli::source_type_rows()),
    }
    Ok(())
}

fn print_rows(rows: Vec<String>) {
    for row in rows {
        println!("{row}");
    }
}
