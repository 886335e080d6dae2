// validate command: load, run, write results, report

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;
use serde::Serialize;
use uuid::Uuid;

use sipot_engine::{ErrorBlock, Outcome};
use sipot_io::acuse::{self, Acuse};
use sipot_io::document;

use crate::exit_codes::{self, EXIT_FINDINGS, EXIT_LOAD, EXIT_OUTPUT, EXIT_SUCCESS};
use crate::logging::{self, LoggingConfig};
use crate::{load_settings, CliError};

pub struct ValidateArgs {
    pub files: Vec<PathBuf>,
    pub json: bool,
    pub out: Option<PathBuf>,
    pub acuse: Option<PathBuf>,
    pub quiet: bool,
}

/// Where a run leaves its output files.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub download_dir: PathBuf,
    /// Write an acuse here when the file has findings.
    pub acuse_dir: Option<PathBuf>,
}

/// Result of validating one file, as printed and serialized.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Report {
    /// Cells were rejected.
    Error {
        file: String,
        run_id: String,
        nombre_corto: String,
        errors: Vec<ErrorBlock>,
        #[serde(skip_serializing_if = "Option::is_none")]
        acuse_file: Option<String>,
    },
    /// Clean file; its records were written to `download_file`.
    Success {
        file: String,
        run_id: String,
        nombre_corto: String,
        download_file: String,
        records: usize,
    },
    /// The run could not complete.
    Failed {
        file: String,
        run_id: String,
        error: String,
        #[serde(skip)]
        code: u8,
    },
}

impl Report {
    pub fn exit_code(&self) -> u8 {
        match self {
            Report::Error { .. } => EXIT_FINDINGS,
            Report::Success { .. } => EXIT_SUCCESS,
            Report::Failed { code, .. } => *code,
        }
    }
}

/// A run that stopped before producing a report.
struct Failure {
    code: u8,
    message: String,
}

impl Failure {
    fn load(err: impl std::fmt::Display) -> Self {
        Self { code: EXIT_LOAD, message: err.to_string() }
    }

    fn output(err: impl std::fmt::Display) -> Self {
        Self { code: EXIT_OUTPUT, message: err.to_string() }
    }
}

pub fn cmd_validate(args: ValidateArgs, config: Option<PathBuf>) -> Result<(), CliError> {
    let (settings, settings_warning) = load_settings(config)?;

    let (_log_guard, log_fallback) = logging::init(&LoggingConfig::from_settings(&settings, args.quiet));
    if let Some(warning) = settings_warning {
        tracing::warn!("{warning}");
    }
    if let Some(reason) = log_fallback {
        tracing::warn!("file logging disabled: {reason}");
    }

    let download_dir = args.out.unwrap_or_else(|| settings.download_dir.clone());
    let acuse_dir = args
        .acuse
        .or_else(|| settings.write_acuse.then(|| download_dir.clone()));
    let options = RunOptions { download_dir, acuse_dir };

    // Files run in parallel; collect keeps input order
    let reports: Vec<Report> = args
        .files
        .par_iter()
        .map(|path| run_file(path, &options))
        .collect();

    print_reports(&reports, args.json)?;

    match exit_codes::combine(reports.iter().map(Report::exit_code)) {
        EXIT_SUCCESS => Ok(()),
        code => Err(CliError::silent(code)),
    }
}

/// Validate one file end to end and log its summary line.
pub fn run_file(path: &Path, options: &RunOptions) -> Report {
    let run_id = Uuid::new_v4().to_string();
    let file = sipot_io::file_label(path);
    let started = Instant::now();

    let report = match execute(path, &run_id, &file, options) {
        Ok(report) => report,
        Err(Failure { code, message }) => {
            tracing::error!("[{run_id}] Archivo: {file} | Error: {message}");
            return Report::Failed {
                file,
                run_id,
                error: message,
                code,
            };
        }
    };

    let size_mb = std::fs::metadata(path)
        .map(|m| m.len() as f64 / (1024.0 * 1024.0))
        .unwrap_or(0.0);
    let (short_name, errors, status) = match &report {
        Report::Error { nombre_corto, errors, .. } => (nombre_corto.as_str(), errors.len(), "ERROR"),
        Report::Success { nombre_corto, .. } => (nombre_corto.as_str(), 0, "OK"),
        Report::Failed { .. } => ("N/D", 0, "ERROR"),
    };
    tracing::info!(
        "[{run_id}] Archivo: {file} | Nombre Corto: {short_name} | Tamaño: {size_mb:.2} MB | Errores: {errors} | Tiempo: {:.1}s | Estado: {status}",
        started.elapsed().as_secs_f64()
    );

    report
}

fn execute(path: &Path, run_id: &str, file: &str, options: &RunOptions) -> Result<Report, Failure> {
    let sheet = sipot_io::load(path).map_err(Failure::load)?;
    let outcome = sipot_engine::run(&sheet).map_err(Failure::load)?;
    let short_name = outcome.short_name().to_string();

    match outcome {
        Outcome::Findings(findings) => {
            let acuse_file = match &options.acuse_dir {
                Some(dir) => {
                    let acuse_path = dir.join(format!("ACUSE_DE_ERRORES_{run_id}.txt"));
                    let validated_at = chrono::Local::now().naive_local();
                    acuse::write(
                        &Acuse::new(&short_name, validated_at, &findings.blocks),
                        &acuse_path,
                    )
                    .map_err(Failure::output)?;
                    Some(acuse_path.display().to_string())
                }
                None => None,
            };
            tracing::debug!(
                cells = findings.cell_errors,
                blocks = findings.blocks.len(),
                "findings consolidated"
            );

            Ok(Report::Error {
                file: file.to_string(),
                run_id: run_id.to_string(),
                nombre_corto: short_name,
                errors: findings.blocks,
                acuse_file,
            })
        }
        Outcome::Clean(extraction) => {
            let doc_path = document::document_path(&options.download_dir, run_id);
            document::write_extraction(&extraction, &doc_path).map_err(Failure::output)?;

            Ok(Report::Success {
                file: file.to_string(),
                run_id: run_id.to_string(),
                nombre_corto: short_name,
                download_file: doc_path.display().to_string(),
                records: extraction.records.len(),
            })
        }
    }
}

fn print_reports(reports: &[Report], json: bool) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let write_err = |e: io::Error| CliError::io(e.to_string());

    for report in reports {
        if json {
            let line = serde_json::to_string(report).map_err(|e| CliError::io(e.to_string()))?;
            writeln!(handle, "{}", line).map_err(write_err)?;
            continue;
        }

        match report {
            Report::Error {
                file,
                nombre_corto,
                errors,
                acuse_file,
                ..
            } => {
                writeln!(
                    handle,
                    "{}: {} bloque(s) de errores [Nombre Corto: {}]",
                    file,
                    errors.len(),
                    nombre_corto
                )
                .map_err(write_err)?;
                for (idx, block) in errors.iter().enumerate() {
                    writeln!(handle, "  {}. {}", idx + 1, block).map_err(write_err)?;
                }
                if let Some(acuse_file) = acuse_file {
                    writeln!(handle, "  acuse: {}", acuse_file).map_err(write_err)?;
                }
            }
            Report::Success {
                file,
                download_file,
                records,
                ..
            } => {
                writeln!(handle, "{}: OK ({} registros) -> {}", file, records, download_file)
                    .map_err(write_err)?;
            }
            Report::Failed { file, error, .. } => {
                eprintln!("error: {}: {}", file, error);
            }
        }
    }

    Ok(())
}
