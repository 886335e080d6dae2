//! Plain-text "ACUSE DE ERRORES": the receipt handed back to whoever
//! submitted a template that failed validation.

use std::fmt::Write as _;
use std::path::Path;

use chrono::NaiveDateTime;

use sipot_engine::ErrorBlock;

use crate::error::LoadError;

const BANNER: &str = "Sistema de Validación de Formatos SIPOT";
const TITLE: &str = "ACUSE DE ERRORES";
const INTRO: &str =
    "A continuación se despliegan los errores detectados durante la validación del formato:";
const FOOTER: &str = "Documento generado automáticamente por el validador SIPOT.";
const DESCRIPTION_HEADER: &str = "Descripción del error";

/// Everything printed on an acuse.
#[derive(Debug, Clone, Copy)]
pub struct Acuse<'a> {
    pub short_name: &'a str,
    pub validated_at: NaiveDateTime,
    pub blocks: &'a [ErrorBlock],
}

impl<'a> Acuse<'a> {
    pub fn new(short_name: &'a str, validated_at: NaiveDateTime, blocks: &'a [ErrorBlock]) -> Self {
        Self {
            short_name,
            validated_at,
            blocks,
        }
    }
}

/// Render the acuse as text.
pub fn render(acuse: &Acuse<'_>) -> String {
    let number_width = acuse.blocks.len().to_string().len().max(1);
    let rule = "=".repeat(BANNER.chars().count());

    let mut out = String::new();
    let _ = writeln!(out, "{BANNER}");
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out);
    let _ = writeln!(out, "{TITLE}");
    let _ = writeln!(out);
    let _ = writeln!(out, "Nombre del Formato: {}", acuse.short_name);
    let _ = writeln!(
        out,
        "Fecha de validación: {}",
        acuse.validated_at.format("%d/%m/%Y %H:%M:%S")
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "{INTRO}");
    let _ = writeln!(out);
    let _ = writeln!(out, "{:>number_width$}  {DESCRIPTION_HEADER}", "#");
    let _ = writeln!(
        out,
        "{}  {}",
        "-".repeat(number_width),
        "-".repeat(DESCRIPTION_HEADER.chars().count())
    );
    for (idx, block) in acuse.blocks.iter().enumerate() {
        let _ = writeln!(out, "{:>number_width$}  {block}", idx + 1);
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{FOOTER}");
    out
}

/// Render the acuse and write it to `path`, creating parent directories.
pub fn write(acuse: &Acuse<'_>, path: &Path) -> Result<(), LoadError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| LoadError::io(parent, e))?;
    }
    std::fs::write(path, render(acuse)).map_err(|e| LoadError::io(path, e))?;
    tracing::debug!(path = %path.display(), blocks = acuse.blocks.len(), "acuse written");
    Ok(())
}
