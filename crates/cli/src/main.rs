mod commands;
mod config;
mod logging;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use kinfolk_core::{EndpointMode, ImportError, ImportOptions, Strictness};

use commands::import::cmd_import;
use commands::records::cmd_records;

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Kinfolk genealogy import toolkit.
#[derive(Parser)]
#[command(
    name = "kinfolk",
    version,
    about = "Kinfolk genealogy import toolkit"
)]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    /// More log output (-v info, -vv debug, -vvv trace); KINFOLK_LOG overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to a kinfolk.toml configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a .ged / .gedcom file and print the resulting family tree
    Import {
        /// Path to the .ged or .gedcom file
        file: PathBuf,
        #[command(flatten)]
        flags: ImportFlags,
        /// Point relationship endpoints at generated person ids instead of
        /// document pointers
        #[arg(long)]
        resolve_endpoints: bool,
        /// Tree name used when the document has no individuals
        #[arg(long)]
        default_tree_name: Option<String>,
    },

    /// Print the raw individuals and families assembled from a .ged / .gedcom file
    Records {
        /// Path to the .ged or .gedcom file
        file: PathBuf,
        #[command(flatten)]
        flags: ImportFlags,
    },
}

#[derive(clap::Args)]
struct ImportFlags {
    /// Report malformed lines, unknown tags and unresolved pointers
    #[arg(long)]
    strict: bool,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    let config = match config::load_config(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            report_import_error(&e, cli.output, cli.quiet);
            process::exit(1);
        }
    };

    match cli.command {
        Commands::Import {
            file,
            flags,
            resolve_endpoints,
            default_tree_name,
        } => {
            let mut options = apply_flags(config.import, &flags);
            if resolve_endpoints {
                options.endpoints = EndpointMode::PersonId;
            }
            if let Some(name) = default_tree_name {
                options.default_tree_name = name;
            }
            cmd_import(&file, &options, cli.output, cli.quiet);
        }
        Commands::Records { file, flags } => {
            let options = apply_flags(config.import, &flags);
            cmd_records(&file, &options, cli.output, cli.quiet);
        }
    }
}

fn apply_flags(mut options: ImportOptions, flags: &ImportFlags) -> ImportOptions {
    if flags.strict {
        options.strictness = Strictness::Strict;
    }
    options
}

pub(crate) fn report_import_error(err: &ImportError, output: OutputFormat, quiet: bool) {
    match output {
        OutputFormat::Json => {
            let err_json = serde_json::to_string_pretty(&err.to_json_value())
                .unwrap_or_else(|_| format!("{{\"error\": \"{:?}\"}}", err));
            eprintln!("{}", err_json);
        }
        OutputFormat::Text => {
            if !quiet {
                eprintln!("error: {}", err);
            }
        }
    }
}
