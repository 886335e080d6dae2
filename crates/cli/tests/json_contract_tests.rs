// Integration tests enforcing the --json stdout contract and exit codes.
//
// These tests guarantee that stdout from `sipot validate --json` is:
//   1. One JSON object per input file, one per line, in input order
//   2. No extra lines, banners or log output
//   3. The correct shape for its status
//
// Run with: cargo test -p sipot-cli --test json_contract_tests -- --nocapture

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

const TEMPLATE: &str = "\
FMT-01
Transparencia
Sueldos,,,LGTA70FVIII
3,4,12
TIPO
DESCRIPCION
Monto,Fecha,Ejercicio
";

/// A scratch workspace with its own settings file, so tests never touch the
/// user's configuration or log directory.
struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let settings = format!(
            "{{\n  // test settings\n  \"output.downloadDir\": {:?},\n  \"log.dir\": {:?}\n}}\n",
            dir.path().join("temp_downloads").display().to_string(),
            dir.path().join("logs").display().to_string(),
        );
        std::fs::write(dir.path().join("settings.json"), settings).unwrap();
        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn file(&self, name: &str, data_rows: &str) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, format!("{TEMPLATE}{data_rows}")).unwrap();
        path
    }

    fn sipot(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_sipot"));
        cmd.current_dir(self.dir.path())
            .env("SIPOT_CONFIG", self.path("settings.json"))
            .env_remove("RUST_LOG");
        cmd
    }

    fn validate(&self, files: &[&Path], extra: &[&str]) -> Output {
        let mut cmd = self.sipot();
        cmd.arg("validate");
        for file in files {
            cmd.arg(file);
        }
        cmd.args(extra).output().expect("run sipot validate")
    }
}

/// Parse stdout as JSON Lines, asserting every line is one JSON object.
fn json_lines(output: &Output) -> Vec<serde_json::Value> {
    let stdout = String::from_utf8_lossy(&output.stdout);
    stdout
        .lines()
        .map(|line| {
            let value: serde_json::Value = serde_json::from_str(line).unwrap_or_else(|e| {
                panic!("stdout line must be valid JSON.\nParse error: {e}\nline: {line}\nstdout:\n{stdout}")
            });
            assert!(value.is_object(), "each line must be a JSON object: {line}");
            value
        })
        .collect()
}

// ===========================================================================
// sipot validate --json
// ===========================================================================

#[test]
fn clean_file_reports_success_and_writes_document() {
    let ws = Workspace::new();
    let input = ws.file("ok.csv", "1500.50,2024-01-15,2024\n0,15/01/2024,2023\n");

    let output = ws.validate(&[&input], &["--json", "--quiet"]);
    assert_eq!(output.status.code(), Some(0), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let lines = json_lines(&output);
    assert_eq!(lines.len(), 1);
    let report = &lines[0];
    assert_eq!(report["status"], "success");
    assert_eq!(report["file"], "ok.csv");
    assert_eq!(report["nombre_corto"], "LGTA70FVIII");
    assert_eq!(report["records"], 2);

    let download = PathBuf::from(report["download_file"].as_str().unwrap());
    assert!(download.starts_with(ws.path("temp_downloads")));
    assert_eq!(
        download.file_name().unwrap().to_string_lossy(),
        format!("{}.json", report["run_id"].as_str().unwrap())
    );

    let doc: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&download).unwrap()).unwrap();
    assert_eq!(doc["id_formato"], "FMT-01");
    assert_eq!(doc["Titulo"], "Sueldos");
    assert_eq!(doc["Nombre Corto"], "LGTA70FVIII");
    assert_eq!(doc["data"][0]["Monto"], "1500.50");
    assert_eq!(doc["data"][1]["Fecha"], "15/01/2024");
}

#[test]
fn findings_report_consolidated_errors() {
    let ws = Workspace::new();
    let input = ws.file(
        "bad.csv",
        ",2024-01-15,2024\n,2024-01-16,2024\n,2024-01-17,2024\n5,ayer,24\n",
    );

    let output = ws.validate(&[&input], &["--json", "--quiet"]);
    assert_eq!(output.status.code(), Some(1));

    let lines = json_lines(&output);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["status"], "error");
    assert_eq!(lines[0]["nombre_corto"], "LGTA70FVIII");
    assert_eq!(
        lines[0]["errors"],
        serde_json::json!([
            "Celda A8 hasta A10 bajo 'Monto' vacía.",
            "Celda B11 ('ayer') inválida. Se esperaba: Fecha.",
            "Celda C11 ('24') inválida. Se esperaba: Año (4 dígitos).",
        ])
    );
    assert!(lines[0].get("acuse_file").is_none());
    assert!(!ws.path("temp_downloads").exists(), "no document on findings");
}

#[test]
fn several_files_keep_input_order() {
    let ws = Workspace::new();
    let good = ws.file("a.csv", "1,2024-01-01,2024\n");
    let bad = ws.file("b.csv", "x,2024-01-01,2024\n");
    let missing = ws.path("c.xlsx");

    let output = ws.validate(&[&good, &bad, &missing, &good], &["--json", "--quiet"]);
    // A load failure outranks findings
    assert_eq!(output.status.code(), Some(3));

    let lines = json_lines(&output);
    let statuses: Vec<&str> = lines.iter().map(|l| l["status"].as_str().unwrap()).collect();
    assert_eq!(statuses, vec!["success", "error", "failed", "success"]);
    assert_eq!(lines[2]["file"], "c.xlsx");
    assert!(lines[2]["error"].as_str().unwrap().contains("c.xlsx"));
    assert_ne!(lines[0]["run_id"], lines[3]["run_id"], "one run id per file");
}

#[test]
fn unsupported_extension_fails_the_run() {
    let ws = Workspace::new();
    let input = ws.path("formato.pdf");
    std::fs::write(&input, "%PDF-1.4").unwrap();

    let output = ws.validate(&[&input], &["--json", "--quiet"]);
    assert_eq!(output.status.code(), Some(3));
    let lines = json_lines(&output);
    assert_eq!(lines[0]["status"], "failed");
}

// ===========================================================================
// Text output, acuse and logs
// ===========================================================================

#[test]
fn acuse_written_for_findings() {
    let ws = Workspace::new();
    let input = ws.file("bad.csv", "1,2024-01-01,202\n");
    let acuses = ws.path("acuses");

    let output = ws.validate(&[&input], &["--quiet", "--acuse", acuses.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("bad.csv: 1 bloque(s) de errores [Nombre Corto: LGTA70FVIII]"), "{stdout}");
    assert!(stdout.contains("  1. Celda C8 ('202') inválida. Se esperaba: Año (4 dígitos)."));

    let written: Vec<_> = std::fs::read_dir(&acuses).unwrap().collect();
    assert_eq!(written.len(), 1);
    let text = std::fs::read_to_string(written[0].as_ref().unwrap().path()).unwrap();
    assert!(text.contains("ACUSE DE ERRORES"));
    assert!(text.contains("Celda C8 ('202') inválida."));
}

#[test]
fn summary_line_goes_to_daily_log() {
    let ws = Workspace::new();
    let input = ws.file("ok.csv", "1,2024-01-01,2024\n");

    let output = ws.validate(&[&input], &["--quiet"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(output.stderr.is_empty(), "quiet keeps stderr clean");

    let logs: Vec<PathBuf> = std::fs::read_dir(ws.path("logs"))
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(logs.len(), 1);
    let name = logs[0].file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("validacion.") && name.ends_with(".log"), "{name}");

    let log = std::fs::read_to_string(&logs[0]).unwrap();
    assert!(log.contains("Archivo: ok.csv | Nombre Corto: LGTA70FVIII"), "{log}");
    assert!(log.contains("Errores: 0"));
    assert!(log.contains("Estado: OK"));
}

// ===========================================================================
// Usage errors and rules
// ===========================================================================

#[test]
fn missing_files_is_a_usage_error() {
    let ws = Workspace::new();
    let output = ws.sipot().arg("validate").output().unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn malformed_config_is_a_usage_error() {
    let ws = Workspace::new();
    let input = ws.file("ok.csv", "1,2024-01-01,2024\n");
    let config = ws.path("broken.json");
    std::fs::write(&config, "{ not json").unwrap();

    let output = ws
        .sipot()
        .args(["validate", input.to_str().unwrap(), "--config", config.to_str().unwrap()])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("error:"));
}

#[test]
fn rules_json_lists_registry() {
    let ws = Workspace::new();
    let output = ws.sipot().args(["rules", "--json"]).output().unwrap();
    assert!(output.status.success());

    let rules: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let codes: Vec<&str> = rules
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["code"].as_str().unwrap())
        .collect();
    assert_eq!(codes, vec!["3", "4", "5", "6", "7", "12", "13"]);
    assert_eq!(rules[5]["nombre"], "Año (4 dígitos)");
}
