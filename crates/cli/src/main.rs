// SIPOT pre-validator CLI - checks transparency templates before upload

mod exit_codes;
mod logging;
mod validate;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde_json::json;

use sipot_config::Settings;
use sipot_engine::Rule;

// Re-export exit codes from registry (single source of truth)
use exit_codes::{EXIT_OUTPUT, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "sipot")]
#[command(about = "Pre-validate SIPOT transparency templates before upload")]
#[command(long_version = long_version())]
#[command(version)]
struct Cli {
    /// Settings file (default: <config dir>/sipot/settings.json)
    #[arg(long, global = true, env = "SIPOT_CONFIG", value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate one or more templates (csv, tsv, txt, xlsx, xlsm, xls, xlsb, ods)
    #[command(after_help = "\
Examples:
  sipot validate LGTA70FVIII.xlsx
  sipot validate *.xlsx --json
  sipot validate formato.csv --out listos/ --acuse acuses/

Exit codes: 0 clean, 1 findings, 2 usage, 3 load failure, 4 write failure")]
    Validate {
        /// Template files to validate
        #[arg(required = true, value_name = "FILES")]
        files: Vec<PathBuf>,

        /// Print one JSON object per file instead of text
        #[arg(long)]
        json: bool,

        /// Directory for the JSON document of clean files
        #[arg(long, short = 'o', value_name = "DIR")]
        out: Option<PathBuf>,

        /// Write an ACUSE DE ERRORES for every file with findings into DIR
        #[arg(long, value_name = "DIR")]
        acuse: Option<PathBuf>,

        /// No log lines on stderr (the log file is still written)
        #[arg(long, short = 'q')]
        quiet: bool,
    },

    /// List the data-type rules recognised in the rule row
    Rules {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (", env!("GIT_COMMIT_HASH"), ")",
        "\nengine:  sipot-engine ", env!("CARGO_PKG_VERSION"),
        "\ntarget:  ", env!("TARGET"),
    )
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Validate {
            files,
            json,
            out,
            acuse,
            quiet,
        } => validate::cmd_validate(
            validate::ValidateArgs {
                files,
                json,
                out,
                acuse,
                quiet,
            },
            cli.config,
        ),
        Commands::Rules { json } => cmd_rules(json),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_OUTPUT, message: msg.into(), hint: None }
    }

    /// Exit with `code` without printing anything; the reports already
    /// told the user what happened.
    pub fn silent(code: u8) -> Self {
        Self { code, message: String::new(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Resolve settings: an explicit file must load, the default location falls
/// back to defaults with a warning for the caller to log.
pub fn load_settings(config: Option<PathBuf>) -> Result<(Settings, Option<String>), CliError> {
    match config {
        Some(path) => Settings::load_from(&path)
            .map(|settings| (settings, None))
            .map_err(|e| {
                CliError::args(e.to_string()).with_hint("fix or remove the --config / SIPOT_CONFIG file")
            }),
        None => match Settings::load() {
            Ok(settings) => Ok((settings, None)),
            Err(e) => Ok((Settings::default(), Some(format!("{e}; using default settings")))),
        },
    }
}

// ============================================================================
// rules
// ============================================================================

fn cmd_rules(json: bool) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    if json {
        let rules: Vec<_> = Rule::ALL
            .iter()
            .map(|rule| {
                json!({
                    "code": rule.code(),
                    "rule": rule,
                    "nombre": rule.display_name(),
                })
            })
            .collect();
        let text = serde_json::to_string(&rules).map_err(|e| CliError::io(e.to_string()))?;
        writeln!(handle, "{}", text).map_err(|e| CliError::io(e.to_string()))?;
        return Ok(());
    }

    writeln!(handle, "{:>4}  {}", "code", "expected").map_err(|e| CliError::io(e.to_string()))?;
    for rule in Rule::ALL {
        writeln!(handle, "{:>4}  {}", rule.code(), rule.display_name())
            .map_err(|e| CliError::io(e.to_string()))?;
    }
    writeln!(handle, "\nAny other code, or an empty rule cell, only requires a value.")
        .map_err(|e| CliError::io(e.to_string()))?;

    Ok(())
}
