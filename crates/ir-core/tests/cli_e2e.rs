//! End-to-end tests for the ir-core CLI.
//!
//! Each test runs the real binary against a file store in a temp directory.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const FORM: &str = r#"{"clientName":"Acme","preparedBy":"J. Doe","reportDate":"2024-01-15",
    "introduction":"Intro","conclusion":"Thanks"}"#;

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    fn store_path(&self) -> PathBuf {
        self.dir.path().join("store.json")
    }

    fn write(&self, name: &str, body: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, body).expect("write fixture");
        path
    }

    /// Command with an isolated store and no ambient config.
    fn ir_core(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("ir-core");
        cmd.env_remove("IR_CONFIG")
            .env_remove("IR_LOG")
            .env_remove("RUST_LOG")
            .env("XDG_CONFIG_HOME", self.dir.path().join("xdg"))
            .env("IR_STORE", self.store_path());
        cmd
    }

    fn import_records(&self, body: &str) {
        let file = self.write("records.json", body);
        self.ir_core()
            .args(["store", "import-records"])
            .arg(&file)
            .assert()
            .success();
    }

    fn import_form(&self, body: &str) {
        let file = self.write("form.json", body);
        self.ir_core()
            .args(["store", "import-form"])
            .arg(&file)
            .assert()
            .success();
    }
}

fn records_json(n: usize) -> String {
    let rows: Vec<String> = (0..n)
        .map(|i| format!(r#"{{"Unit":"{}","Kitchen Aerator":1,"Toilet":""}}"#, 101 + i))
        .collect();
    format!("[{}]", rows.join(","))
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().expect("run ir-core");
    String::from_utf8(output.stdout).expect("utf8 stdout")
}

mod render {
    use super::*;

    #[test]
    fn seventeen_records_render_two_detail_pages() {
        let ws = Workspace::new();
        ws.import_records(&records_json(17));
        ws.import_form(FORM);

        let html = stdout_of(ws.ir_core().arg("render"));
        let pages = Regex::new(r#"id="details-page-\d+""#).unwrap();
        assert_eq!(pages.find_iter(&html).count(), 2);
        assert!(html.contains(r#"id="cover""#));
        assert!(html.contains(r#"id="letter""#));
        assert!(html.contains(r#"id="summary""#));
        assert!(html.contains(r#"id="total-units">17<"#));
        assert!(html.contains("Showing 2 units on this page. Total units in report: 17"));
    }

    #[test]
    fn duplicate_unit_rows_are_consolidated() {
        let ws = Workspace::new();
        ws.import_records(
            r#"[{"Unit":"101","Toilet":1},{"Unit":"101 (2)","Toilet":"","Shower":1},
                {"Unit":"102","Toilet":1}]"#,
        );
        ws.import_form(FORM);

        ws.ir_core()
            .arg("render")
            .assert()
            .success()
            .stdout(predicate::str::contains("Total units in report: 2"))
            .stdout(predicate::str::contains("101 (2)").not());
    }

    #[test]
    fn out_file_reports_summary() {
        let ws = Workspace::new();
        ws.import_records(&records_json(3));
        ws.import_form(FORM);
        let out = ws.dir.path().join("report.html");

        ws.ir_core()
            .args(["render", "--out"])
            .arg(&out)
            .assert()
            .success()
            .stdout(predicate::str::contains(r#""status": "rendered""#))
            .stdout(predicate::str::contains(r#""total_units": 3"#))
            .stdout(predicate::str::contains(r#""generated_at""#));

        let html = fs::read_to_string(&out).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"name="generated-at""#));
    }

    #[test]
    fn missing_data_redirects_home() {
        let ws = Workspace::new();
        ws.import_form(FORM);

        ws.ir_core()
            .arg("render")
            .assert()
            .code(15)
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains(r#""status":"redirect""#))
            .stderr(predicate::str::contains(r#""route":"/""#))
            .stderr(predicate::str::contains("missing_data"));
    }

    #[test]
    fn malformed_data_redirects_home() {
        let ws = Workspace::new();
        let store = serde_json::json!({
            "installationData": "{not json",
            "reportFormData": FORM,
        });
        fs::write(ws.store_path(), store.to_string()).unwrap();

        ws.ir_core()
            .arg("render")
            .assert()
            .code(15)
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains("parse_failure"));
    }

    #[test]
    fn empty_dataset_renders_placeholder() {
        let ws = Workspace::new();
        ws.import_records("[]");
        ws.import_form(FORM);

        ws.ir_core()
            .arg("render")
            .assert()
            .success()
            .stdout(predicate::str::contains("No data found."));
    }

    #[test]
    fn empty_dataset_redirect_policy() {
        let ws = Workspace::new();
        ws.import_records("[]");
        ws.import_form(FORM);
        let config = ws.write("config.json", r#"{"empty_dataset": "redirect"}"#);

        ws.ir_core()
            .arg("--config")
            .arg(&config)
            .arg("render")
            .assert()
            .code(15)
            .stderr(predicate::str::contains("empty_dataset"));
    }

    #[test]
    fn blank_form_names_still_render() {
        let ws = Workspace::new();
        let store = serde_json::json!({
            "installationData": records_json(1),
            "reportFormData": r#"{"clientName":"","preparedBy":"","reportDate":"2024-01-15","introduction":"","conclusion":""}"#,
        });
        fs::write(ws.store_path(), store.to_string()).unwrap();

        ws.ir_core()
            .arg("render")
            .assert()
            .success()
            .stdout(predicate::str::contains("Total units in report: 1"));
    }

    #[test]
    fn human_redirect_message() {
        let ws = Workspace::new();

        ws.ir_core()
            .args(["-f", "human", "render"])
            .assert()
            .code(15)
            .stderr(predicate::str::contains("redirect to /"));
    }
}

mod store {
    use super::*;

    #[test]
    fn invalid_form_is_rejected() {
        let ws = Workspace::new();
        let file = ws.write(
            "form.json",
            r#"{"clientName":" ","preparedBy":"J","reportDate":"2024-01-15",
                "introduction":"","conclusion":""}"#,
        );

        ws.ir_core()
            .args(["store", "import-form"])
            .arg(&file)
            .assert()
            .code(15)
            .stderr(predicate::str::contains("clientName"));
        assert!(!ws.store_path().exists());
    }

    #[test]
    fn nested_record_values_are_rejected() {
        let ws = Workspace::new();
        let file = ws.write("records.json", r#"[{"Unit":"101","Fixtures":{"a":1}}]"#);

        ws.ir_core()
            .args(["store", "import-records"])
            .arg(&file)
            .assert()
            .code(15);
    }

    #[test]
    fn missing_input_file_is_io_error() {
        let ws = Workspace::new();

        ws.ir_core()
            .args(["store", "import-records", "/nonexistent/records.json"])
            .assert()
            .code(21);
    }

    #[test]
    fn show_and_clear() {
        let ws = Workspace::new();
        ws.import_records(&records_json(2));
        ws.import_form(FORM);

        ws.ir_core()
            .args(["-f", "human", "store", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("installationData"))
            .stdout(predicate::str::contains("reportFormData"));

        ws.ir_core()
            .args(["store", "clear"])
            .assert()
            .success()
            .stdout(predicate::str::contains(r#""removed": 2"#));

        ws.ir_core()
            .args(["-f", "human", "store", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("(empty)"));
    }

    #[test]
    fn store_path_must_not_be_directory() {
        let ws = Workspace::new();

        ws.ir_core()
            .arg("--store")
            .arg(ws.dir.path())
            .args(["store", "show"])
            .assert()
            .code(21);
    }
}

mod cli {
    use super::*;

    fn workspace_config(ws: &Workspace, body: &str) -> PathBuf {
        ws.write("config.json", body)
    }

    fn assert_args_error(ws: &Workspace, config: &Path) {
        ws.ir_core()
            .arg("--config")
            .arg(config)
            .arg("render")
            .assert()
            .code(10);
    }

    #[test]
    fn version_reports_schema() {
        let ws = Workspace::new();
        ws.ir_core()
            .arg("version")
            .assert()
            .success()
            .stdout(predicate::str::contains("ir_core_version"))
            .stdout(predicate::str::contains("config_schema_version"));
    }

    #[test]
    fn unknown_command_is_args_error() {
        let ws = Workspace::new();
        ws.ir_core()
            .arg("nonexistent-command")
            .assert()
            .code(10)
            .stderr(predicate::str::contains("error"));
    }

    #[test]
    fn help_exits_clean() {
        let ws = Workspace::new();
        ws.ir_core()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("render"));
    }

    #[test]
    fn schema_mismatch_is_args_error() {
        let ws = Workspace::new();
        let config = workspace_config(&ws, r#"{"schema_version": "2.0.0"}"#);
        assert_args_error(&ws, &config);
    }

    #[test]
    fn zero_page_size_is_args_error() {
        let ws = Workspace::new();
        let config = workspace_config(&ws, r#"{"limits": {"rows_per_page": 0}}"#);
        assert_args_error(&ws, &config);
    }

    #[test]
    fn custom_page_size_applies() {
        let ws = Workspace::new();
        ws.import_records(&records_json(10));
        ws.import_form(FORM);
        let config = workspace_config(&ws, r#"{"limits": {"rows_per_page": 4}}"#);

        let html = stdout_of(ws.ir_core().arg("--config").arg(&config).arg("render"));
        assert!(html.contains("Installation Details - Page 3"));
        assert!(!html.contains("Installation Details - Page 4"));
    }
}
