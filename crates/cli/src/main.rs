mod commands;
mod logging;
mod utils;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use mailweave_core::DialectKind;

use commands::*;

#[derive(Parser)]
#[command(name = "mailweave")]
#[command(about = "Render, fill and validate email templates", version)]
struct Cli {
    /// YAML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Repeat-marker dialect (comment or attribute)
    #[arg(long, global = true, value_parser = utils::parse_dialect)]
    dialect: Option<DialectKind>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render an editor document (JSON) into a template
    Render {
        /// Element list or saved template record
        input: PathBuf,

        /// Template name used as the document title
        #[arg(long)]
        name: Option<String>,

        /// Output file (stdout when omitted)
        #[arg(long, short)]
        out: Option<PathBuf>,

        /// Fail on invalid elements instead of writing the fallback shell
        #[arg(long)]
        strict: bool,
    },

    /// Fill a template with a JSON data context
    Process {
        /// Rendered template
        template: PathBuf,

        /// Data context (JSON object)
        #[arg(long)]
        data: PathBuf,

        /// Print the processing report to stderr
        #[arg(long)]
        report: bool,

        /// Output file (stdout when omitted)
        #[arg(long, short)]
        out: Option<PathBuf>,
    },

    /// Check repeat markers and placeholder paths
    Validate {
        template: PathBuf,

        /// Sample data context used to check repeat keys
        #[arg(long)]
        data: Option<PathBuf>,
    },

    /// List placeholder paths used by a template
    Vars {
        template: PathBuf,

        /// Only paths missing from the built-in catalog
        #[arg(long)]
        unknown: bool,
    },

    /// Show the built-in variable catalog
    Catalog {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("❌ {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = utils::load_config(cli.config.as_deref(), cli.dialect)?;
    logging::init_logging(&config.logging, cli.verbose)?;

    match cli.command {
        Commands::Render {
            input,
            name,
            out,
            strict,
        } => {
            render::run(
                render::RenderArgs {
                    input,
                    name,
                    out,
                    strict,
                },
                &config,
            )?;
        }
        Commands::Process {
            template,
            data,
            report,
            out,
        } => {
            process::run(
                process::ProcessArgs {
                    template,
                    data,
                    report,
                    out,
                },
                &config,
            )?;
        }
        Commands::Validate { template, data } => {
            let valid = validate::run(validate::ValidateArgs { template, data }, &config)?;
            if !valid {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Vars { template, unknown } => {
            vars::run(vars::VarsArgs { template, unknown })?;
        }
        Commands::Catalog { json } => {
            catalog::run(json)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}
